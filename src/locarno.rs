// Locarno Classification
// International classification for industrial designs, used within design
// patents. See http://www.wipo.int/classifications/locarno/en/

use crate::types::{ClassificationKind, ParseError, ValidationError, PARSE_FAILED_MARKER};
use regex::Regex;
use tracing::debug;

/// Two fixed-width digit groups, separated by hyphen, slash, or nothing
const LOCARNO_PATTERN: &str = r"^([0-9]{2})[-/]?([0-9]{2})$";

/// Locarno classification: `[mainClass, subClass]`, both exactly two digits
///
/// Accepts the full form (`"15-02"`, `"15/02"`, `"1502"`) and the short
/// form: a bare 1-2 digit main class, zero-padded, with the sub class
/// forced to `"00"`. The short form is a documented leniency of the input
/// data, not an error.
///
/// # Example
/// ```
/// use classmatch::LocarnoClassification;
///
/// let mut locarno = LocarnoClassification::new("15-02", true);
/// locarno.parse_text().unwrap();
/// assert_eq!(locarno.text_normalized(), "15-02");
/// assert_eq!(locarno.depth(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LocarnoClassification {
    text_original: String,
    inventive_or_main: bool,
    parsed: bool,
    parse_failed: bool,
    main_class: Option<String>,
    sub_class: Option<String>,
}

impl LocarnoClassification {
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
        ClassificationKind::Locarno
    }

    /// The untransformed input text
    pub fn text_original(&self) -> &str {
        &self.text_original
    }

    /// Whether this is the document's primary classification
    pub fn is_inventive_or_main(&self) -> bool {
        self.inventive_or_main
    }

    pub fn parse_failed(&self) -> bool {
        self.parse_failed
    }

    pub fn main_class(&self) -> Option<&str> {
        self.main_class.as_deref()
    }

    pub fn sub_class(&self) -> Option<&str> {
        self.sub_class.as_deref()
    }

    /// Parse the original text against the Locarno grammar
    ///
    /// Exactly-once: a repeat call re-returns the recorded outcome without
    /// re-parsing. On grammar mismatch the instance stays queryable with
    /// empty parts and a failure-tagged normalized text.
    pub fn parse_text(&mut self) -> Result<(), ParseError> {
        if self.parsed {
            return self.parse_outcome();
        }
        self.parsed = true;

        let text = self.text_original.trim().to_string();

        // Short-form fallback: bare 1-2 digit main class, sub class "00"
        if !text.is_empty() && text.len() <= 2 && text.bytes().all(|b| b.is_ascii_digit()) {
            self.main_class = Some(format!("{:0>2}", text));
            self.sub_class = Some("00".to_string());
            return Ok(());
        }

        let pattern = Regex::new(LOCARNO_PATTERN).map_err(|_| self.fail(&text))?;
        if let Some(caps) = pattern.captures(&text) {
            // Captured groups are already width 2 by construction
            self.main_class = Some(caps[1].to_string());
            self.sub_class = Some(caps[2].to_string());
            Ok(())
        } else {
            debug!(text = %text, "LOCARNO parse failed");
            Err(self.fail(&text))
        }
    }

    fn fail(&mut self, text: &str) -> ParseError {
        self.parse_failed = true;
        self.main_class = None;
        self.sub_class = None;
        ParseError::Grammar {
            kind: ClassificationKind::Locarno,
            text: text.to_string(),
        }
    }

    fn parse_outcome(&self) -> Result<(), ParseError> {
        if self.parse_failed {
            Err(ParseError::Grammar {
                kind: ClassificationKind::Locarno,
                text: self.text_original.trim().to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Canonical `"MM-SS"` form, or the original text tagged with the
    /// failure marker if the grammar did not match
    pub fn text_normalized(&self) -> String {
        if self.parse_failed || !self.parsed {
            return format!("{}{}", self.text_original, PARSE_FAILED_MARKER);
        }
        format!(
            "{}-{}",
            self.main_class.as_deref().unwrap_or_default(),
            self.sub_class.as_deref().unwrap_or_default()
        )
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

    /// Number of populated hierarchy levels: 0 unparsed/failed, 1 main
    /// class only, 2 main + sub class
    pub fn depth(&self) -> usize {
        if self.parse_failed {
            return 0;
        }
        match (&self.main_class, &self.sub_class) {
            (Some(_), Some(_)) => 2,
            (Some(_), None) => 1,
            _ => 0,
        }
    }

    /// Post-parse sanity gate: the main class is mandatory
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.main_class.as_deref() {
            Some(main) if !main.is_empty() => Ok(()),
            _ => Err(ValidationError::MissingSegment {
                kind: ClassificationKind::Locarno,
                segment: "main class",
            }),
        }
    }
}
