// Classmatch Type Definitions
// Shared enums and error types for classification parsing and matching

use thiserror::Error;

/// Suffix appended to the normalized text of a classification whose raw
/// text did not match its taxonomy grammar. Failed records stay
/// distinguishable downstream without raising.
pub const PARSE_FAILED_MARKER: &str = "__parseFailed";

/// Patent classification taxonomies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationKind {
    /// Cooperative Patent Classification (section/class/subclass/group)
    Cpc,

    /// United States Patent Classification (main class, optional sub class)
    Uspc,

    /// Locarno industrial design classification (main class, sub class)
    Locarno,
}

impl std::fmt::Display for ClassificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationKind::Cpc => write!(f, "CPC"),
            ClassificationKind::Uspc => write!(f, "USPC"),
            ClassificationKind::Locarno => write!(f, "LOCARNO"),
        }
    }
}

/// Document type tag supplied by the corpus driver alongside each document.
/// Informational to the matching logic itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatentType {
    Grant,
    Application,
    Design,
}

impl std::fmt::Display for PatentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatentType::Grant => write!(f, "Grant"),
            PatentType::Application => write!(f, "Application"),
            PatentType::Design => write!(f, "Design"),
        }
    }
}

/// Raw text did not match the taxonomy grammar
///
/// Recoverable: the classification instance survives in a degraded but
/// queryable state (empty parts, failure-tagged normalized text).
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("failed to parse {kind} classification: '{text}'")]
    Grammar {
        kind: ClassificationKind,
        text: String,
    },
}

/// Post-parse policy failure: a mandatory segment is missing
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("invalid {kind} classification: missing {segment}")]
    MissingSegment {
        kind: ClassificationKind,
        segment: &'static str,
    },
}

/// A classification could not be compiled into a document predicate
///
/// Fatal to matcher setup: a partially compiled predicate set would
/// silently change match semantics.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error("cannot compile {kind} predicate: {field} is empty")]
    MissingField {
        kind: ClassificationKind,
        field: &'static str,
    },

    #[error("cannot compile predicate: {field} value '{value}' is not safe for the expression syntax")]
    UnsafeValue { field: &'static str, value: String },

    #[error("no document schema mapping for {0} classifications")]
    UnsupportedKind(ClassificationKind),
}
