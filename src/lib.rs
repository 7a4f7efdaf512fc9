//! # Classmatch: Patent Classification Corpus Matching
//!
//! Parses raw textual patent-classification codes across several
//! international taxonomies and decides whether a patent XML document
//! belongs to a caller-specified set of classifications.
//!
//! ## Three Taxonomies
//!
//! 1. **CPC** - section/class/subclass/main group(/sub group), e.g. `"H04N 21/00"`
//! 2. **USPC** - main class with optional sub class, e.g. `"345/156"`
//! 3. **Locarno** - two 2-digit classes for industrial designs, e.g. `"15-02"`
//!
//! Each taxonomy owns its grammar behind one shared capability set:
//! parse exactly once, canonical normalized text, ordered hierarchy
//! parts, depth, prefix containment, and post-parse validation. A
//! classification whose text does not match its grammar stays queryable
//! (empty parts, failure-tagged normalized text) so batch pipelines can
//! log and skip instead of aborting.
//!
//! ## Example Usage
//!
//! ```
//! use classmatch::{Classification, ClassificationKind, ClassificationMatch, PatentType};
//!
//! let (wanted, outcome) =
//!     Classification::from_text(ClassificationKind::Cpc, "H04N 21/00", true);
//! outcome.unwrap();
//!
//! let mut corpus_match = ClassificationMatch::new(vec![wanted]);
//! corpus_match.setup().unwrap();
//!
//! let xml = r#"<us-patent-grant><classifications-cpc><main-cpc>
//!     <classification-cpc>
//!       <section>H</section><class>04</class>
//!       <subclass>N</subclass><main-group>21</main-group>
//!     </classification-cpc>
//!     </main-cpc></classifications-cpc></us-patent-grant>"#;
//!
//! if corpus_match.on(xml, PatentType::Grant).is_match() {
//!     println!("accepted by {}", corpus_match.last_match_pattern().unwrap());
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Classification Model** - per-taxonomy parse/normalize/contain/validate
//! - **Registry** - partitions a heterogeneous set by taxonomy
//! - **Predicate Compiler** - one structural document predicate per classification
//! - **Pattern Matcher** - ordered predicate set, first-match evaluation
//! - **Corpus Match Adapter** - the entry point a corpus driver consumes

pub mod classification;
pub mod corpus;
pub mod cpc;
pub mod locarno;
pub mod matcher;
pub mod predicate;
pub mod types;
pub mod uspc;

// Re-export main types and functions for convenience
pub use classification::{filter_by_kind, group_by_kind, Classification};
pub use corpus::ClassificationMatch;
pub use cpc::CpcClassification;
pub use locarno::LocarnoClassification;
pub use matcher::PatternMatcher;
pub use predicate::{DocPredicate, FieldTest, TestOp};
pub use types::{
    ClassificationKind, CompileError, ParseError, PatentType, ValidationError,
    PARSE_FAILED_MARKER,
};
pub use uspc::UspcClassification;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
