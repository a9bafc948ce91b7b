use crate::ast::{ContextKind, Mode};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum TextError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Context(#[from] ContextError),
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Malformed document: {message}")]
    #[diagnostic(
        code(parse::syntax),
        help("The text is not valid JSON at this position.")
    )]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Unexpected end of document")]
    #[diagnostic(
        code(parse::unexpected_eof),
        help("The document ended before every object and array was closed.")
    )]
    UnexpectedEof {
        #[source_code]
        src: NamedSource<String>,
        #[label("Document ended here")]
        span: SourceSpan,
    },

    #[error("Invalid document data: {message}")]
    #[diagnostic(
        code(parse::invalid_data),
        help("The text is valid JSON but cannot be represented as a document.")
    )]
    InvalidData {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },
}

/// Misuse of a context or of the stack that owns it.
///
/// Every variant means the protocol cursor, the schema, and the document
/// disagree. The session that raised it should be abandoned.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ContextError {
    #[error("Advanced past the last child of a {context} context")]
    #[diagnostic(
        code(context::exhausted),
        help("The cursor asked for more elements than the document holds.")
    )]
    ExhaustedContext { context: ContextKind },

    #[error("No current child in {context} context")]
    #[diagnostic(
        code(context::no_current_child),
        help("Call `advance` before reading the current child.")
    )]
    NoCurrentChild { context: ContextKind },

    #[error("`{operation}` is not available in {mode} mode")]
    #[diagnostic(code(context::wrong_mode))]
    WrongMode { operation: &'static str, mode: Mode },

    #[error("The context stack is empty")]
    #[diagnostic(
        code(context::empty_stack),
        help("The session has already ended or was never started.")
    )]
    EmptyStack,

    #[error("Cannot exit {expected}: the innermost open context is {found}")]
    #[diagnostic(
        code(context::mismatched_nesting),
        help("Every exit must match the most recent enter that is still open.")
    )]
    MismatchedNesting {
        expected: ContextKind,
        found: ContextKind,
    },

    #[error("`{operation}` is not supported by a {context} context")]
    #[diagnostic(code(context::unsupported))]
    Unsupported {
        operation: &'static str,
        context: ContextKind,
    },

    #[error("Cannot enter a {expected} here: the current child is {found}")]
    #[diagnostic(code(context::unexpected_node))]
    UnexpectedNode {
        expected: ContextKind,
        found: &'static str,
    },

    #[error("Map entry {index} is not a [key, value] pair")]
    #[diagnostic(
        code(context::malformed_map_entry),
        help("Maps written as sequences need exactly two elements per entry.")
    )]
    MalformedMapEntry { index: usize },

    #[error("A value was appended to a {context} context without a key")]
    #[diagnostic(code(context::missing_key))]
    MissingKey { context: ContextKind },

    #[error("A key in the {context} context has no value")]
    #[diagnostic(code(context::dangling_key))]
    DanglingKey { context: ContextKind },

    #[error("The {context} context has already been finished")]
    #[diagnostic(code(context::sealed))]
    Sealed { context: ContextKind },

    #[error("The document already has a top-level value")]
    #[diagnostic(code(context::root_occupied))]
    RootOccupied,

    #[error("The session ended without writing a top-level value")]
    #[diagnostic(code(context::empty_document))]
    EmptyDocument,

    #[error("The session ended with {depth} aggregate(s) still open")]
    #[diagnostic(code(context::unclosed_contexts))]
    UnclosedContexts { depth: usize },

    #[error("A read session needs a document to read")]
    #[diagnostic(code(context::missing_root))]
    MissingRoot,

    #[error("Nesting deeper than {limit} levels")]
    #[diagnostic(
        code(context::depth_limit),
        help("Raise `StackOptions::max_depth` if documents this deep are expected.")
    )]
    DepthLimitExceeded { limit: usize },
}
