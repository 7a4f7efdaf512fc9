// Integration tests for the corpus match adapter: the full
// wanted-set -> predicates -> document evaluation flow

use classmatch::{
    Classification, ClassificationKind, ClassificationMatch, CompileError, PatentType,
};

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
      <classification-national>
        <main-classification>345/156</main-classification>
      </classification-national>
    </us-patent-grant>"#;

const UNRELATED_XML: &str = r#"
    <us-patent-grant>
      <classifications-cpc>
        <main-cpc>
          <classification-cpc>
            <section>A</section>
            <class>61</class>
            <subclass>B</subclass>
            <main-group>5</main-group>
          </classification-cpc>
        </main-cpc>
      </classifications-cpc>
    </us-patent-grant>"#;

// ============ End-to-End Matching ============

#[test]
fn test_cpc_wanted_accepts_matching_grant() {
    let mut corpus_match =
        ClassificationMatch::new(vec![parsed(ClassificationKind::Cpc, "H04N 21/00")]);
    corpus_match.setup().unwrap();

    assert!(corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
    let pattern = corpus_match.last_match_pattern().unwrap();
    assert!(pattern.contains("section/text()='H'"));
    assert!(pattern.contains("starts-with(.,'21')"));
}

#[test]
fn test_uspc_wanted_accepts_by_prefix() {
    let mut corpus_match =
        ClassificationMatch::new(vec![parsed(ClassificationKind::Uspc, "345")]);
    corpus_match.setup().unwrap();

    assert!(corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
    assert_eq!(
        corpus_match.last_match_pattern(),
        Some("//classification-national/main-classification[starts-with(.,'345')]")
    );
}

#[test]
fn test_unrelated_document_rejected() {
    let mut corpus_match = ClassificationMatch::new(vec![
        parsed(ClassificationKind::Cpc, "H04N21/00"),
        parsed(ClassificationKind::Uspc, "345"),
    ]);
    corpus_match.setup().unwrap();

    assert!(!corpus_match.on(UNRELATED_XML, PatentType::Grant).is_match());
    assert_eq!(corpus_match.last_match_pattern(), None);
}

#[test]
fn test_empty_wanted_set_never_matches() {
    let mut corpus_match = ClassificationMatch::new(Vec::new());
    corpus_match.setup().unwrap();
    assert!(!corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
}

// ============ Last-Match Diagnostics ============

#[test]
fn test_non_matching_call_clears_last_pattern() {
    let mut corpus_match =
        ClassificationMatch::new(vec![parsed(ClassificationKind::Cpc, "H04N21/00")]);
    corpus_match.setup().unwrap();

    assert!(corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
    assert!(corpus_match.last_match_pattern().is_some());

    assert!(!corpus_match.on(UNRELATED_XML, PatentType::Grant).is_match());
    assert_eq!(corpus_match.last_match_pattern(), None);
}

#[test]
fn test_sequential_documents_track_latest_match() {
    let mut corpus_match = ClassificationMatch::new(vec![
        parsed(ClassificationKind::Cpc, "A61B5/00"),
        parsed(ClassificationKind::Cpc, "H04N21/00"),
    ]);
    corpus_match.setup().unwrap();

    assert!(corpus_match.on(UNRELATED_XML, PatentType::Grant).is_match());
    let first = corpus_match.last_match_pattern().unwrap().to_string();
    assert!(first.contains("section/text()='A'"));

    assert!(corpus_match.on(GRANT_XML, PatentType::Grant).is_match());
    let second = corpus_match.last_match_pattern().unwrap();
    assert!(second.contains("section/text()='H'"));
}

// ============ Setup Failure Policy ============

#[test]
fn test_partial_depth_cpc_aborts_setup() {
    let mut corpus_match = ClassificationMatch::new(vec![
        parsed(ClassificationKind::Cpc, "H04N21/00"),
        parsed(ClassificationKind::Cpc, "G06"), // no subclass or group
    ]);
    assert!(matches!(
        corpus_match.setup(),
        Err(CompileError::MissingField { .. })
    ));
}

#[test]
fn test_locarno_only_set_compiles_to_empty_matcher() {
    let mut corpus_match = ClassificationMatch::new(vec![
        parsed(ClassificationKind::Locarno, "15-02"),
        parsed(ClassificationKind::Locarno, "7"),
    ]);
    corpus_match.setup().unwrap();
    assert!(!corpus_match.on(GRANT_XML, PatentType::Design).is_match());
}
