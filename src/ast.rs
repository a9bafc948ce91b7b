use serde_json::Number;
use std::fmt::Display;

/// One parsed message: a scalar, an ordered sequence, or an ordered keyed collection.
///
/// Keyed members keep document order and duplicate keys are kept as they are.
/// Nodes are produced once by the parser on the read side and assembled
/// through the builders on the write side; nothing mutates them afterwards.
#[derive(Debug, PartialEq, Clone)]
pub enum DocumentNode {
    Scalar(Scalar),
    Sequence(Vec<DocumentNode>),
    Keyed(Vec<(String, DocumentNode)>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl DocumentNode {
    pub fn text(value: impl Into<String>) -> Self {
        DocumentNode::Scalar(Scalar::Text(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        DocumentNode::Scalar(Scalar::Bool(value))
    }

    pub fn null() -> Self {
        DocumentNode::Scalar(Scalar::Null)
    }

    pub fn number(value: impl Into<Number>) -> Self {
        DocumentNode::Scalar(Scalar::Number(value.into()))
    }

    /// Builds a floating point number node. Non-finite values have no JSON
    /// representation and become `null`.
    pub fn float(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => DocumentNode::Scalar(Scalar::Number(n)),
            None => DocumentNode::null(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentNode::Scalar(Scalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocumentNode::Scalar(Scalar::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocumentNode::Scalar(Scalar::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocumentNode::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocumentNode::Scalar(Scalar::Null))
    }

    /// Short name of the node's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            DocumentNode::Scalar(Scalar::Text(_)) => "text",
            DocumentNode::Scalar(Scalar::Number(_)) => "number",
            DocumentNode::Scalar(Scalar::Bool(_)) => "boolean",
            DocumentNode::Scalar(Scalar::Null) => "null",
            DocumentNode::Sequence(_) => "sequence",
            DocumentNode::Keyed(_) => "keyed",
        }
    }
}

impl From<&str> for DocumentNode {
    fn from(value: &str) -> Self {
        DocumentNode::text(value)
    }
}

impl From<String> for DocumentNode {
    fn from(value: String) -> Self {
        DocumentNode::text(value)
    }
}

impl From<bool> for DocumentNode {
    fn from(value: bool) -> Self {
        DocumentNode::bool(value)
    }
}

impl From<i64> for DocumentNode {
    fn from(value: i64) -> Self {
        DocumentNode::number(value)
    }
}

impl From<i32> for DocumentNode {
    fn from(value: i32) -> Self {
        DocumentNode::number(value)
    }
}

impl From<f64> for DocumentNode {
    fn from(value: f64) -> Self {
        DocumentNode::float(value)
    }
}

/// The key of the pair under a struct or map cursor.
///
/// Struct fields and keyed maps carry plain names; maps written as a sequence
/// of `[key, value]` entries can carry any node as their key.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum KeyRef<'a> {
    Name(&'a str),
    Node(&'a DocumentNode),
}

impl<'a> KeyRef<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            KeyRef::Name(name) => Some(name),
            KeyRef::Node(node) => node.as_str(),
        }
    }

    pub fn to_node(&self) -> DocumentNode {
        match self {
            KeyRef::Name(name) => DocumentNode::text(*name),
            KeyRef::Node(node) => (*node).clone(),
        }
    }
}

/// Whether a session consumes an existing document or assembles a new one.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Read,
    Write,
}

/// The aggregates a protocol cursor can enter and exit.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AggregateKind {
    Struct,
    /// Lists and sets share one representation.
    Sequence,
    Map,
}

/// Every kind of frame that can sit on a context stack.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ContextKind {
    Root,
    Struct,
    Sequence,
    Map,
}

impl From<AggregateKind> for ContextKind {
    fn from(kind: AggregateKind) -> Self {
        match kind {
            AggregateKind::Struct => ContextKind::Struct,
            AggregateKind::Sequence => ContextKind::Sequence,
            AggregateKind::Map => ContextKind::Map,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Read => write!(f, "read"),
            Mode::Write => write!(f, "write"),
        }
    }
}

impl Display for AggregateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ContextKind::from(*self).fmt(f)
    }
}

impl Display for ContextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextKind::Root => write!(f, "root"),
            ContextKind::Struct => write!(f, "struct"),
            ContextKind::Sequence => write!(f, "sequence"),
            ContextKind::Map => write!(f, "map"),
        }
    }
}
