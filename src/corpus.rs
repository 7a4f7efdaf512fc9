// Corpus Match Adapter
// Matches documents by looking only at the classifications stored in each
// document's XML: group wanted classifications by taxonomy, compile one
// predicate per classification, evaluate the bound document.

use crate::classification::{group_by_kind, Classification};
use crate::matcher::PatternMatcher;
use crate::predicate;
use crate::types::{ClassificationKind, CompileError, PatentType};
use roxmltree::Document;
use tracing::debug;

/// Kinds with a document schema fragment, in predicate insertion order
const COMPILED_KINDS: [ClassificationKind; 2] =
    [ClassificationKind::Cpc, ClassificationKind::Uspc];

/// Matches documents against a wanted-classifications set
///
/// The public entry point for a corpus-building driver: call [`setup`]
/// once to compile the predicate set, then for each document [`on`] to
/// bind it, [`is_match`] to evaluate, and [`last_match_pattern`] to see
/// which predicate accepted it.
///
/// [`setup`]: Self::setup
/// [`on`]: Self::on
/// [`is_match`]: Self::is_match
/// [`last_match_pattern`]: Self::last_match_pattern
///
/// # Example
/// ```
/// use classmatch::{Classification, ClassificationKind, ClassificationMatch, PatentType};
///
/// let (wanted, outcome) = Classification::from_text(ClassificationKind::Uspc, "345/1", true);
/// outcome.unwrap();
///
/// let mut corpus_match = ClassificationMatch::new(vec![wanted]);
/// corpus_match.setup().unwrap();
///
/// let xml = "<doc><classification-national>\
///            <main-classification>345/156</main-classification>\
///            </classification-national></doc>";
/// assert!(corpus_match.on(xml, PatentType::Grant).is_match());
/// ```
#[derive(Debug)]
pub struct ClassificationMatch {
    wanted: Vec<Classification>,
    matcher: Option<PatternMatcher>,
    doc_xml: Option<String>,
    patent_type: Option<PatentType>,
    last_match: Option<String>,
}

impl ClassificationMatch {
    pub fn new(wanted: Vec<Classification>) -> Self {
        Self {
            wanted,
            matcher: None,
            doc_xml: None,
            patent_type: None,
            last_match: None,
        }
    }

    /// Compile the wanted set into a fresh predicate matcher
    ///
    /// Idempotent: recompiling yields the same predicate set. Any single
    /// compile failure aborts setup — a partially compiled set would
    /// silently change match semantics. Kinds with no document schema
    /// mapping (Locarno) are skipped.
    pub fn setup(&mut self) -> Result<(), CompileError> {
        let mut matcher = PatternMatcher::new();
        let groups = group_by_kind(&self.wanted);

        for kind in COMPILED_KINDS {
            for class in groups.get(&kind).into_iter().flatten() {
                let compiled = predicate::compile(class)?;
                debug!(kind = %kind, expression = compiled.expression(), "compiled predicate");
                matcher.add(compiled);
            }
        }

        if let Some(skipped) = groups.get(&ClassificationKind::Locarno) {
            debug!(
                count = skipped.len(),
                "no document schema for LOCARNO, skipping"
            );
        }

        self.matcher = Some(matcher);
        Ok(())
    }

    /// Bind the next document for evaluation
    ///
    /// The patent type travels with the document for the driver's benefit;
    /// matching itself does not consult it.
    pub fn on(&mut self, xml: &str, patent_type: PatentType) -> &mut Self {
        self.doc_xml = Some(xml.to_string());
        self.patent_type = Some(patent_type);
        self
    }

    /// Evaluate the bound document against the compiled predicate set
    ///
    /// Never fails: no bound document, no prior [`setup`](Self::setup), an
    /// unparseable document, or an empty predicate set all evaluate as
    /// no-match. A non-matching call clears the recorded last pattern so
    /// diagnostics never go stale.
    pub fn is_match(&mut self) -> bool {
        self.last_match = None;

        let Some(matcher) = &self.matcher else {
            debug!("is_match called before setup, treating as no match");
            return false;
        };
        let Some(xml) = &self.doc_xml else {
            return false;
        };
        let doc = match Document::parse(xml) {
            Ok(doc) => doc,
            Err(err) => {
                debug!(%err, "document failed to parse, treating as no match");
                return false;
            }
        };

        match matcher.evaluate(&doc) {
            Some(matched) => {
                self.last_match = Some(matched.expression().to_string());
                true
            }
            None => false,
        }
    }

    /// Expression of the predicate that accepted the most recent
    /// [`is_match`](Self::is_match) call, if it matched
    pub fn last_match_pattern(&self) -> Option<&str> {
        self.last_match.as_deref()
    }

    /// Type tag of the currently bound document
    pub fn patent_type(&self) -> Option<PatentType> {
        self.patent_type
    }

    /// The wanted-classifications set this matcher was built from
    pub fn wanted(&self) -> &[Classification] {
        &self.wanted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(kind: ClassificationKind, text: &str) -> Classification {
        let (classification, outcome) = Classification::from_text(kind, text, true);
        outcome.unwrap();
        classification
    }

    const GRANT_XML: &str = r#"
        <us-patent-grant>
          <classifications-cpc>
            <main-cpc>
              <classification-cpc>
                <section>H</section>
                <class>04</class>
                <subclass>N</subclass>
                <main-group>21</main-group>
              </classification-cpc>
            </main-cpc>
          </classifications-cpc>
        </us-patent-grant>"#;

    #[test]
    fn test_setup_then_match() {
        let mut corpus_match =
            ClassificationMatch::new(vec![parsed(ClassificationKind::Cpc, "H04N21/00")]);
        corpus_match.setup().unwrap();

        assert!(corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
        let pattern = corpus_match.last_match_pattern().unwrap();
        assert!(pattern.contains("classification-cpc"));
        assert_eq!(corpus_match.patent_type(), Some(PatentType::Grant));
    }

    #[test]
    fn test_match_before_setup_is_false() {
        let mut corpus_match =
            ClassificationMatch::new(vec![parsed(ClassificationKind::Cpc, "H04N21/00")]);
        assert!(!corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
    }

    #[test]
    fn test_match_without_document_is_false() {
        let mut corpus_match = ClassificationMatch::new(Vec::new());
        corpus_match.setup().unwrap();
        assert!(!corpus_match.is_match());
    }

    #[test]
    fn test_unparseable_document_is_false() {
        let mut corpus_match =
            ClassificationMatch::new(vec![parsed(ClassificationKind::Cpc, "H04N21/00")]);
        corpus_match.setup().unwrap();
        assert!(!corpus_match.on("<broken", PatentType::Grant).is_match());
    }

    #[test]
    fn test_locarno_wanted_skipped_not_fatal() {
        let mut corpus_match =
            ClassificationMatch::new(vec![parsed(ClassificationKind::Locarno, "15-02")]);
        corpus_match.setup().unwrap();
        assert!(!corpus_match.on(GRANT_XML, PatentType::Design).is_match());
    }

    #[test]
    fn test_uncompilable_wanted_aborts_setup() {
        // Depth-3 CPC parses, but lacks the main group the predicate needs
        let mut corpus_match =
            ClassificationMatch::new(vec![parsed(ClassificationKind::Cpc, "H04N")]);
        assert!(matches!(
            corpus_match.setup(),
            Err(CompileError::MissingField { .. })
        ));
    }

    #[test]
    fn test_setup_idempotent() {
        let mut corpus_match =
            ClassificationMatch::new(vec![parsed(ClassificationKind::Cpc, "H04N21/00")]);
        corpus_match.setup().unwrap();
        corpus_match.setup().unwrap();
        assert!(corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
    }
}
