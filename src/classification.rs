// Classification Model
// One tagged variant per taxonomy behind a shared capability surface,
// plus the registry filters used to partition a wanted set by taxonomy.

use crate::cpc::CpcClassification;
use crate::locarno::LocarnoClassification;
use crate::types::{ClassificationKind, ParseError, ValidationError};
use crate::uspc::UspcClassification;
use rustc_hash::FxHashMap;

/// A parsed (or failed-parse) patent classification in any taxonomy
///
/// Every variant exposes the same capability set: parse exactly once,
/// canonical normalized text, ordered hierarchy parts, depth, prefix
/// containment, and post-parse validation.
///
/// # Example
/// ```
/// use classmatch::{Classification, ClassificationKind};
///
/// let (cpc, outcome) = Classification::from_text(ClassificationKind::Cpc, "H04N21/00", true);
/// assert!(outcome.is_ok());
/// assert_eq!(cpc.text_normalized(), "H04N21/00");
/// ```
#[derive(Debug, Clone)]
pub enum Classification {
    Cpc(CpcClassification),
    Uspc(UspcClassification),
    Locarno(LocarnoClassification),
}

impl Classification {
    /// Construct and parse in one step
    ///
    /// Returns the instance alongside the parse outcome: a grammar
    /// mismatch leaves the instance queryable (failure-tagged normalized
    /// text, empty parts), so batch callers can log and skip rather than
    /// abort.
    pub fn from_text(
        kind: ClassificationKind,
        original_text: &str,
        inventive_or_main: bool,
    ) -> (Self, Result<(), ParseError>) {
        let mut classification = match kind {
            ClassificationKind::Cpc => {
                Classification::Cpc(CpcClassification::new(original_text, inventive_or_main))
            }
            ClassificationKind::Uspc => {
                Classification::Uspc(UspcClassification::new(original_text, inventive_or_main))
            }
            ClassificationKind::Locarno => {
                Classification::Locarno(LocarnoClassification::new(original_text, inventive_or_main))
            }
        };
        let outcome = classification.parse_text();
        (classification, outcome)
    }

    pub fn kind(&self) -> ClassificationKind {
        match self {
            Classification::Cpc(c) => c.kind(),
            Classification::Uspc(u) => u.kind(),
            Classification::Locarno(l) => l.kind(),
        }
    }

    pub fn text_original(&self) -> &str {
        match self {
            Classification::Cpc(c) => c.text_original(),
            Classification::Uspc(u) => u.text_original(),
            Classification::Locarno(l) => l.text_original(),
        }
    }

    pub fn is_inventive_or_main(&self) -> bool {
        match self {
            Classification::Cpc(c) => c.is_inventive_or_main(),
            Classification::Uspc(u) => u.is_inventive_or_main(),
            Classification::Locarno(l) => l.is_inventive_or_main(),
        }
    }

    pub fn parse_failed(&self) -> bool {
        match self {
            Classification::Cpc(c) => c.parse_failed(),
            Classification::Uspc(u) => u.parse_failed(),
            Classification::Locarno(l) => l.parse_failed(),
        }
    }

    /// Apply the taxonomy grammar to the original text (exactly-once)
    pub fn parse_text(&mut self) -> Result<(), ParseError> {
        match self {
            Classification::Cpc(c) => c.parse_text(),
            Classification::Uspc(u) => u.parse_text(),
            Classification::Locarno(l) => l.parse_text(),
        }
    }

    pub fn text_normalized(&self) -> String {
        match self {
            Classification::Cpc(c) => c.text_normalized(),
            Classification::Uspc(u) => u.text_normalized(),
            Classification::Locarno(l) => l.text_normalized(),
        }
    }

    pub fn parts(&self) -> Vec<String> {
        match self {
            Classification::Cpc(c) => c.parts(),
            Classification::Uspc(u) => u.parts(),
            Classification::Locarno(l) => l.parts(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Classification::Cpc(c) => c.depth(),
            Classification::Uspc(u) => u.depth(),
            Classification::Locarno(l) => l.depth(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Classification::Cpc(c) => c.validate(),
            Classification::Uspc(u) => u.validate(),
            Classification::Locarno(l) => l.validate(),
        }
    }

    /// Prefix containment within one taxonomy
    ///
    /// True iff `other` is present, is the same taxonomy, and every
    /// hierarchy segment this instance defines equals the corresponding
    /// segment of `other` (a coarser classification contains any finer
    /// one sharing its prefix). Fail-closed: an absent or cross-taxonomy
    /// argument yields `false`, never an error. Reflexive for every
    /// successfully parsed classification.
    pub fn is_contained(&self, other: Option<&Classification>) -> bool {
        let Some(other) = other else {
            return false;
        };
        if self.kind() != other.kind() {
            return false;
        }
        let mine = self.parts();
        let theirs = other.parts();
        if mine.is_empty() || mine.len() > theirs.len() {
            return false;
        }
        mine.iter().zip(theirs.iter()).all(|(a, b)| a == b)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.text_normalized())
    }
}

/// Ordered subsequence of `classes` whose taxonomy matches `kind`
///
/// Pure filter, no mutation. Used to partition a wanted-classifications
/// set before compiling taxonomy-specific predicates.
pub fn filter_by_kind(
    classes: &[Classification],
    kind: ClassificationKind,
) -> Vec<&Classification> {
    classes.iter().filter(|c| c.kind() == kind).collect()
}

/// One-pass partition of `classes` by taxonomy
///
/// Insertion order is preserved within each bucket; kinds with no entries
/// are absent from the map.
pub fn group_by_kind(
    classes: &[Classification],
) -> FxHashMap<ClassificationKind, Vec<&Classification>> {
    let mut groups: FxHashMap<ClassificationKind, Vec<&Classification>> = FxHashMap::default();
    for class in classes {
        groups.entry(class.kind()).or_default().push(class);
    }
    groups
}
