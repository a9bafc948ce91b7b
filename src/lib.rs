//! Context stack for a human-readable, JSON-backed encoding of schema-typed
//! protocol messages.
//!
//! A protocol cursor reading or writing a message field by field keeps no
//! tree-shaped state of its own. It enters and exits aggregates on a
//! [`ContextStack`], and the stack's innermost [`Context`] answers "what is
//! the current child" while reading and collects children while writing.

pub mod api;
pub mod ast;
pub mod builder;
pub mod context;
pub mod error;
pub mod options;
pub mod parser;
pub mod stack;
pub mod utils;
pub mod walk;
mod serialization;

pub use api::{begin_session, end_session, parse, print, print_compact, reencode};
pub use ast::{AggregateKind, ContextKind, DocumentNode, KeyRef, Mode, Scalar};
pub use context::Context;
pub use error::{ContextError, ParseError, TextError};
pub use options::StackOptions;
pub use stack::ContextStack;
