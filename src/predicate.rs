// Predicate Compiler
// Turns one classification into a structural predicate over its taxonomy's
// document schema fragment. Compilation is pure and deterministic; unsafe
// field content fails compilation rather than producing a malformed
// expression.

use crate::classification::Classification;
use crate::cpc::CpcClassification;
use crate::types::{ClassificationKind, CompileError};
use crate::uspc::UspcClassification;
use roxmltree::{Document, Node};

/// CPC fragment path within the document schema
const CPC_PATH: [&str; 3] = ["classifications-cpc", "main-cpc", "classification-cpc"];

/// USPC fragment path within the document schema
const USPC_PATH: [&str; 2] = ["classification-national", "main-classification"];

/// How a field test compares the node text against the compiled value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOp {
    Equals,
    StartsWith,
}

/// One condition within a predicate
///
/// `field: Some(name)` tests the text of a child element; `None` tests the
/// text of the path's terminal node itself.
#[derive(Debug, Clone)]
pub struct FieldTest {
    pub field: Option<&'static str>,
    pub op: TestOp,
    pub value: String,
}

/// A compiled structural predicate: an element path anchored at any
/// document depth, plus a conjunction of field tests on the terminal node
///
/// The rendered `expression` is deterministic for a given classification
/// and doubles as the diagnostic identity of the predicate.
#[derive(Debug, Clone)]
pub struct DocPredicate {
    path: &'static [&'static str],
    tests: Vec<FieldTest>,
    expression: String,
}

impl DocPredicate {
    /// The rendered expression text, e.g.
    /// `//classification-national/main-classification[starts-with(.,'345')]`
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluate this predicate against a parsed document
    ///
    /// True iff some element chain matching the path satisfies every field
    /// test. Never fails; a document without the fragment simply does not
    /// match.
    pub fn matches(&self, doc: &Document) -> bool {
        let Some((first, rest)) = self.path.split_first() else {
            return false;
        };
        doc.root()
            .descendants()
            .filter(|n| n.is_element() && n.has_tag_name(*first))
            .any(|n| self.matches_from(n, rest))
    }

    fn matches_from(&self, node: Node, remaining: &[&str]) -> bool {
        let Some((next, rest)) = remaining.split_first() else {
            return self.tests_hold(node);
        };
        node.children()
            .filter(|c| c.is_element() && c.has_tag_name(*next))
            .any(|c| self.matches_from(c, rest))
    }

    fn tests_hold(&self, node: Node) -> bool {
        self.tests.iter().all(|test| {
            let target = match test.field {
                Some(field) => node
                    .children()
                    .find(|c| c.is_element() && c.has_tag_name(field)),
                None => Some(node),
            };
            let Some(target) = target else {
                return false;
            };
            let text = target.text().map(str::trim).unwrap_or_default();
            match test.op {
                TestOp::Equals => text == test.value,
                TestOp::StartsWith => text.starts_with(&test.value),
            }
        })
    }
}

impl std::fmt::Display for DocPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Compile one classification into its taxonomy's document predicate
///
/// Locarno has no document schema fragment; compiling one is an error the
/// caller decides how to treat (matcher setup skips Locarno entries).
pub fn compile(classification: &Classification) -> Result<DocPredicate, CompileError> {
    match classification {
        Classification::Cpc(cpc) => compile_cpc(cpc),
        Classification::Uspc(uspc) => compile_uspc(uspc),
        Classification::Locarno(_) => {
            Err(CompileError::UnsupportedKind(ClassificationKind::Locarno))
        }
    }
}

/// CPC predicate: section, class, and subclass equal; main group by prefix
/// (sub group detail is not required to match)
pub fn compile_cpc(cpc: &CpcClassification) -> Result<DocPredicate, CompileError> {
    let section = required(cpc.section(), ClassificationKind::Cpc, "section")?;
    let class = required(cpc.main_class(), ClassificationKind::Cpc, "class")?;
    let subclass = required(cpc.sub_class(), ClassificationKind::Cpc, "subclass")?;
    let main_group = required(cpc.main_group(), ClassificationKind::Cpc, "main-group")?;

    let expression = format!(
        "//{}[section/text()='{}' and class/text()='{}' and subclass/text()='{}' and main-group[starts-with(.,'{}')]]",
        CPC_PATH.join("/"),
        section,
        class,
        subclass,
        main_group,
    );

    Ok(DocPredicate {
        path: &CPC_PATH,
        tests: vec![
            FieldTest {
                field: Some("section"),
                op: TestOp::Equals,
                value: section,
            },
            FieldTest {
                field: Some("class"),
                op: TestOp::Equals,
                value: class,
            },
            FieldTest {
                field: Some("subclass"),
                op: TestOp::Equals,
                value: subclass,
            },
            FieldTest {
                field: Some("main-group"),
                op: TestOp::StartsWith,
                value: main_group,
            },
        ],
        expression,
    })
}

/// USPC predicate: terminal node text begins with the main class
/// (intentionally no sub-class boundary)
pub fn compile_uspc(uspc: &UspcClassification) -> Result<DocPredicate, CompileError> {
    let main_class = required(uspc.main_class(), ClassificationKind::Uspc, "main class")?;

    let expression = format!(
        "//{}[starts-with(.,'{}')]",
        USPC_PATH.join("/"),
        main_class,
    );

    Ok(DocPredicate {
        path: &USPC_PATH,
        tests: vec![FieldTest {
            field: None,
            op: TestOp::StartsWith,
            value: main_class,
        }],
        expression,
    })
}

/// A required field must be present, non-empty, and safe to interpolate
fn required(
    value: Option<&str>,
    kind: ClassificationKind,
    field: &'static str,
) -> Result<String, CompileError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(CompileError::MissingField { kind, field }),
    };
    if !value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-'))
    {
        return Err(CompileError::UnsafeValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}
