// CPC Classification
// Cooperative Patent Classification: section, class, subclass, main group,
// sub group. Partial (coarser) forms are valid; deeper segments require
// all shallower ones.

use crate::types::{ClassificationKind, ParseError, ValidationError, PARSE_FAILED_MARKER};
use regex::Regex;
use tracing::debug;

/// Section letter, then optional 2-digit class, subclass letter, main
/// group, and `/`-separated sub group
const CPC_PATTERN: &str = r"^([A-HY])\s*([0-9]{2})?\s*([A-Z])?\s*([0-9]{1,4})?(?:/([0-9]{2,6}))?$";

/// CPC classification: `[section, class, subclass, mainGroup, subGroup]`
///
/// Accepts any prefix of the hierarchy: `"H"`, `"H04"`, `"H04N"`,
/// `"H04N21"`, `"H04N 21/00"`. Input is trimmed and uppercased before the
/// grammar is applied.
///
/// # Example
/// ```
/// use classmatch::CpcClassification;
///
/// let mut cpc = CpcClassification::new("H04N 21/00", true);
/// cpc.parse_text().unwrap();
/// assert_eq!(cpc.text_normalized(), "H04N21/00");
/// assert_eq!(cpc.depth(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct CpcClassification {
    text_original: String,
    inventive_or_main: bool,
    parsed: bool,
    parse_failed: bool,
    section: Option<String>,
    main_class: Option<String>,
    sub_class: Option<String>,
    main_group: Option<String>,
    sub_group: Option<String>,
}

impl CpcClassification {
    /// Create an unparsed instance from raw text and the main/inventive flag
    pub fn new(original_text: &str, inventive_or_main: bool) -> Self {
        Self {
            text_original: original_text.to_string(),
            inventive_or_main,
            parsed: false,
            parse_failed: false,
            section: None,
            main_class: None,
            sub_class: None,
            main_group: None,
            sub_group: None,
        }
    }

    pub fn kind(&self) -> ClassificationKind {
        ClassificationKind::Cpc
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

    /// Section letter (`A`-`H` or `Y`)
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Two-digit class within the section
    pub fn main_class(&self) -> Option<&str> {
        self.main_class.as_deref()
    }

    /// Subclass letter
    pub fn sub_class(&self) -> Option<&str> {
        self.sub_class.as_deref()
    }

    /// Main group digits (variable width, no padding)
    pub fn main_group(&self) -> Option<&str> {
        self.main_group.as_deref()
    }

    /// Sub group digits after the slash
    pub fn sub_group(&self) -> Option<&str> {
        self.sub_group.as_deref()
    }

    /// Parse the original text against the CPC grammar
    ///
    /// Exactly-once, same contract as the other taxonomies. A segment
    /// present without its parent (e.g. a subclass letter with no class
    /// digits) is a grammar mismatch, not a partial success.
    pub fn parse_text(&mut self) -> Result<(), ParseError> {
        if self.parsed {
            return self.parse_outcome();
        }
        self.parsed = true;

        let text = self.text_original.trim().to_uppercase();

        let pattern = Regex::new(CPC_PATTERN).map_err(|_| self.fail(&text))?;
        let Some(caps) = pattern.captures(&text) else {
            debug!(text = %text, "CPC parse failed");
            return Err(self.fail(&text));
        };

        let section = caps.get(1).map(|m| m.as_str().to_string());
        let main_class = caps.get(2).map(|m| m.as_str().to_string());
        let sub_class = caps.get(3).map(|m| m.as_str().to_string());
        let main_group = caps.get(4).map(|m| m.as_str().to_string());
        let sub_group = caps.get(5).map(|m| m.as_str().to_string());

        // No gaps: each level requires the one above it
        let levels = [&section, &main_class, &sub_class, &main_group, &sub_group];
        let mut seen_absent = false;
        for level in levels {
            if level.is_none() {
                seen_absent = true;
            } else if seen_absent {
                debug!(text = %text, "CPC parse failed: segment gap");
                return Err(self.fail(&text));
            }
        }

        self.section = section;
        self.main_class = main_class;
        self.sub_class = sub_class;
        self.main_group = main_group;
        self.sub_group = sub_group;
        Ok(())
    }

    fn fail(&mut self, text: &str) -> ParseError {
        self.parse_failed = true;
        self.section = None;
        self.main_class = None;
        self.sub_class = None;
        self.main_group = None;
        self.sub_group = None;
        ParseError::Grammar {
            kind: ClassificationKind::Cpc,
            text: text.to_string(),
        }
    }

    fn parse_outcome(&self) -> Result<(), ParseError> {
        if self.parse_failed {
            Err(ParseError::Grammar {
                kind: ClassificationKind::Cpc,
                text: self.text_original.trim().to_uppercase(),
            })
        } else {
            Ok(())
        }
    }

    /// Canonical concatenated form, `/` before the sub group:
    /// `"H04N21/00"`, or a coarser prefix like `"H04"`
    pub fn text_normalized(&self) -> String {
        if self.parse_failed || !self.parsed {
            return format!("{}{}", self.text_original, PARSE_FAILED_MARKER);
        }
        let mut normalized = String::new();
        for segment in [&self.section, &self.main_class, &self.sub_class, &self.main_group] {
            if let Some(segment) = segment {
                normalized.push_str(segment);
            }
        }
        if let Some(sub_group) = &self.sub_group {
            normalized.push('/');
            normalized.push_str(sub_group);
        }
        normalized
    }

    /// Ordered hierarchy segments; empty if the parse failed
    pub fn parts(&self) -> Vec<String> {
        if self.parse_failed {
            return Vec::new();
        }
        [
            &self.section,
            &self.main_class,
            &self.sub_class,
            &self.main_group,
            &self.sub_group,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    /// Number of populated hierarchy levels (0-5)
    pub fn depth(&self) -> usize {
        if self.parse_failed {
            return 0;
        }
        self.parts().len()
    }

    /// Post-parse sanity gate: the section is mandatory
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.section.as_deref() {
            Some(section) if !section.is_empty() => Ok(()),
            _ => Err(ValidationError::MissingSegment {
                kind: ClassificationKind::Cpc,
                segment: "section",
            }),
        }
    }
}
