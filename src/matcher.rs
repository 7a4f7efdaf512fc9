// Pattern Matcher
// Holds an ordered set of compiled predicates and evaluates a document
// against all of them, reporting which one matched first.

use crate::predicate::DocPredicate;
use roxmltree::Document;

/// An ordered, logically OR'd set of compiled document predicates
///
/// Insertion order is the evaluation and tie-break order: the first
/// matching predicate is the one reported. Evaluation is pure — the
/// matched predicate comes back as a value rather than as matcher state,
/// so one compiled matcher can be shared read-only across concurrent
/// evaluations.
///
/// # Example
/// ```
/// use classmatch::{predicate, CpcClassification, PatternMatcher};
///
/// let mut cpc = CpcClassification::new("H04N21/00", true);
/// cpc.parse_text().unwrap();
///
/// let mut matcher = PatternMatcher::new();
/// matcher.add(predicate::compile_cpc(&cpc).unwrap());
/// assert_eq!(matcher.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PatternMatcher {
    predicates: Vec<DocPredicate>,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate; no de-duplication
    pub fn add(&mut self, predicate: DocPredicate) {
        self.predicates.push(predicate);
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate predicates in insertion order, short-circuiting on the
    /// first match
    ///
    /// Returns the matching predicate for diagnostics, or `None` if no
    /// predicate matched (an empty set never matches). Never fails.
    pub fn evaluate<'a>(&'a self, doc: &Document) -> Option<&'a DocPredicate> {
        self.predicates.iter().find(|p| p.matches(doc))
    }

    /// Boolean convenience over [`evaluate`](Self::evaluate)
    pub fn is_match(&self, doc: &Document) -> bool {
        self.evaluate(doc).is_some()
    }
}
