// USPC Classification
// United States Patent Classification: main class (zero-padded to width 3)
// plus an optional sub class.

use crate::types::{ClassificationKind, ParseError, ValidationError, PARSE_FAILED_MARKER};
use regex::Regex;
use tracing::debug;

/// 1-3 character main class, optional `/`-separated sub class
const USPC_PATTERN: &str = r"^([0-9A-Z]{1,3})(?:/([0-9A-Z.]{1,6}))?$";

/// USPC classification: `[mainClass]` or `[mainClass, subClass]`
///
/// The main class is zero-padded left to width 3 (`"21"` becomes `"021"`);
/// design and plant classes keep their letter prefixes (`"D12"`, `"PLT"`).
/// Input is trimmed and uppercased before the grammar is applied.
#[derive(Debug, Clone)]
pub struct UspcClassification {
    text_original: String,
    inventive_or_main: bool,
    parsed: bool,
    parse_failed: bool,
    main_class: Option<String>,
    sub_class: Option<String>,
}

impl UspcClassification {
    /// Create an unparsed instance from raw text and the main/inventive flag
    pub fn new(original_text: &str, inventive_or_main: bool) -> Self {
        Self {
            text_original: original_text.to_string(),
            inventive_or_main,
            parsed: false,
            parse_failed: false,
            main_class: None,
            sub_class: None,
        }
    }

    pub fn kind(&self) -> ClassificationKind {
        ClassificationKind::Uspc
    }

    pub fn text_original(&self) -> &str {
        &self.text_original
    }

    pub fn is_inventive_or_main(&self) -> bool {
        self.inventive_or_main
    }

    pub fn parse_failed(&self) -> bool {
        self.parse_failed
    }

    /// Main class, zero-padded to width 3
    pub fn main_class(&self) -> Option<&str> {
        self.main_class.as_deref()
    }

    pub fn sub_class(&self) -> Option<&str> {
        self.sub_class.as_deref()
    }

    /// Parse the original text against the USPC grammar
    ///
    /// Exactly-once, same contract as the other taxonomies.
    pub fn parse_text(&mut self) -> Result<(), ParseError> {
        if self.parsed {
            return self.parse_outcome();
        }
        self.parsed = true;

        let text = self.text_original.trim().to_uppercase();

        let pattern = Regex::new(USPC_PATTERN).map_err(|_| self.fail(&text))?;
        if let Some(caps) = pattern.captures(&text) {
            self.main_class = Some(format!("{:0>3}", &caps[1]));
            self.sub_class = caps.get(2).map(|m| m.as_str().to_string());
            Ok(())
        } else {
            debug!(text = %text, "USPC parse failed");
            Err(self.fail(&text))
        }
    }

    fn fail(&mut self, text: &str) -> ParseError {
        self.parse_failed = true;
        self.main_class = None;
        self.sub_class = None;
        ParseError::Grammar {
            kind: ClassificationKind::Uspc,
            text: text.to_string(),
        }
    }

    fn parse_outcome(&self) -> Result<(), ParseError> {
        if self.parse_failed {
            Err(ParseError::Grammar {
                kind: ClassificationKind::Uspc,
                text: self.text_original.trim().to_uppercase(),
            })
        } else {
            Ok(())
        }
    }

    /// Canonical `"MMM/SS"` form, or `"MMM"` when no sub class
    pub fn text_normalized(&self) -> String {
        if self.parse_failed || !self.parsed {
            return format!("{}{}", self.text_original, PARSE_FAILED_MARKER);
        }
        let main = self.main_class.as_deref().unwrap_or_default();
        match &self.sub_class {
            Some(sub) => format!("{}/{}", main, sub),
            None => main.to_string(),
        }
    }

    /// Ordered hierarchy segments; empty if the parse failed
    pub fn parts(&self) -> Vec<String> {
        if self.parse_failed {
            return Vec::new();
        }
        [&self.main_class, &self.sub_class]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    /// Number of populated hierarchy levels (0-2)
    pub fn depth(&self) -> usize {
        if self.parse_failed {
            return 0;
        }
        self.parts().len()
    }

    /// Post-parse sanity gate: the main class is mandatory
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.main_class.as_deref() {
            Some(main) if !main.is_empty() => Ok(()),
            _ => Err(ValidationError::MissingSegment {
                kind: ClassificationKind::Uspc,
                segment: "main class",
            }),
        }
    }
}
