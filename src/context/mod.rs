//! Cursors over one level of a document.
//!
//! A [`Context`] is bound to a single aggregate and to a single [`Mode`]. In
//! read mode it borrows the aggregate's children from the caller's document
//! and walks them with an index. In write mode it owns a builder that is
//! sealed into a [`DocumentNode`] by [`Context::finish`].

mod map;
mod root;
mod sequence;
mod structure;

pub use map::MapContext;
pub use root::RootContext;
pub use sequence::SequenceContext;
pub use structure::StructContext;

use crate::ast::{AggregateKind, ContextKind, DocumentNode, KeyRef, Mode};
use crate::error::ContextError;

#[derive(Debug)]
pub enum Context<'a> {
    Root(RootContext<'a>),
    Struct(StructContext<'a>),
    Sequence(SequenceContext<'a>),
    Map(MapContext<'a>),
}

/// Read cursor or write builder of one context. A finished builder leaves
/// the context `Sealed`.
#[derive(Debug)]
pub(crate) enum Side<R, W> {
    Read(R),
    Write(W),
    Sealed,
}

impl<R, W> Side<R, W> {
    pub(crate) fn mode(&self) -> Mode {
        match self {
            Side::Read(_) => Mode::Read,
            Side::Write(_) | Side::Sealed => Mode::Write,
        }
    }

    pub(crate) fn reader(&self, operation: &'static str) -> Result<&R, ContextError> {
        match self {
            Side::Read(cursor) => Ok(cursor),
            _ => Err(ContextError::WrongMode {
                operation,
                mode: Mode::Write,
            }),
        }
    }

    pub(crate) fn reader_mut(&mut self, operation: &'static str) -> Result<&mut R, ContextError> {
        match self {
            Side::Read(cursor) => Ok(cursor),
            _ => Err(ContextError::WrongMode {
                operation,
                mode: Mode::Write,
            }),
        }
    }

    pub(crate) fn builder_mut(
        &mut self,
        operation: &'static str,
        context: ContextKind,
    ) -> Result<&mut W, ContextError> {
        match self {
            Side::Write(builder) => Ok(builder),
            Side::Read(_) => Err(ContextError::WrongMode {
                operation,
                mode: Mode::Read,
            }),
            Side::Sealed => Err(ContextError::Sealed { context }),
        }
    }

    pub(crate) fn builder(
        &self,
        operation: &'static str,
        context: ContextKind,
    ) -> Result<&W, ContextError> {
        match self {
            Side::Write(builder) => Ok(builder),
            Side::Read(_) => Err(ContextError::WrongMode {
                operation,
                mode: Mode::Read,
            }),
            Side::Sealed => Err(ContextError::Sealed { context }),
        }
    }

    /// Moves the builder out, leaving the side sealed.
    pub(crate) fn take_builder(&mut self, context: ContextKind) -> Result<W, ContextError> {
        match std::mem::replace(self, Side::Sealed) {
            Side::Write(builder) => Ok(builder),
            Side::Read(cursor) => {
                *self = Side::Read(cursor);
                Err(ContextError::WrongMode {
                    operation: "finish",
                    mode: Mode::Read,
                })
            }
            Side::Sealed => Err(ContextError::Sealed { context }),
        }
    }
}

impl<'a> Context<'a> {
    /// Opens a read context over `node`, which must have the shape `kind` expects.
    pub fn reader(kind: AggregateKind, node: &'a DocumentNode) -> Result<Self, ContextError> {
        Ok(match kind {
            AggregateKind::Struct => Context::Struct(StructContext::reader(node)?),
            AggregateKind::Sequence => Context::Sequence(SequenceContext::reader(node)?),
            AggregateKind::Map => Context::Map(MapContext::reader(node)?),
        })
    }

    pub fn writer(kind: AggregateKind) -> Self {
        match kind {
            AggregateKind::Struct => Context::Struct(StructContext::writer()),
            AggregateKind::Sequence => Context::Sequence(SequenceContext::writer()),
            AggregateKind::Map => Context::Map(MapContext::writer()),
        }
    }

    pub fn kind(&self) -> ContextKind {
        match self {
            Context::Root(_) => ContextKind::Root,
            Context::Struct(_) => ContextKind::Struct,
            Context::Sequence(_) => ContextKind::Sequence,
            Context::Map(_) => ContextKind::Map,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Context::Root(c) => c.mode(),
            Context::Struct(c) => c.mode(),
            Context::Sequence(c) => c.mode(),
            Context::Map(c) => c.mode(),
        }
    }

    /// Whether another child (a whole pair, for maps) is left to advance to.
    /// Always `false` for write contexts.
    pub fn has_more(&self) -> bool {
        match self {
            Context::Root(c) => c.has_more(),
            Context::Struct(c) => c.has_more(),
            Context::Sequence(c) => c.has_more(),
            Context::Map(c) => c.has_more(),
        }
    }

    pub fn advance(&mut self) -> Result<(), ContextError> {
        match self {
            Context::Root(c) => c.advance(),
            Context::Struct(c) => c.advance(),
            Context::Sequence(c) => c.advance(),
            Context::Map(c) => c.advance(),
        }
    }

    pub fn advance_to_value(&mut self) -> Result<(), ContextError> {
        match self {
            Context::Map(c) => c.advance_to_value(),
            other => Err(other.unsupported("advance_to_value")),
        }
    }

    /// The node under the cursor. Structs and maps answer with the value of
    /// the current pair.
    pub fn current_child(&self) -> Result<&'a DocumentNode, ContextError> {
        match self {
            Context::Root(c) => c.current_child(),
            Context::Struct(c) => c.current_child(),
            Context::Sequence(c) => c.current_child(),
            Context::Map(c) => c.current_value(),
        }
    }

    pub fn current_key(&self) -> Result<KeyRef<'a>, ContextError> {
        match self {
            Context::Struct(c) => c.current_key(),
            Context::Map(c) => c.current_key(),
            other => Err(other.unsupported("current_key")),
        }
    }

    pub fn current_value(&self) -> Result<&'a DocumentNode, ContextError> {
        match self {
            Context::Struct(c) => c.current_child(),
            Context::Map(c) => c.current_value(),
            other => Err(other.unsupported("current_value")),
        }
    }

    /// The entry a nested read context would open over. Inside a map that
    /// has not stepped to the value yet this is the key.
    pub(crate) fn enter_target(&self) -> Result<KeyRef<'a>, ContextError> {
        match self {
            Context::Map(c) => c.current_entry(),
            other => other.current_child().map(KeyRef::Node),
        }
    }

    pub fn append_child(&mut self, node: DocumentNode) -> Result<(), ContextError> {
        match self {
            Context::Root(c) => c.append_child(node),
            Context::Struct(c) => c.append_child(node),
            Context::Sequence(c) => c.append_child(node),
            Context::Map(c) => c.append_child(node),
        }
    }

    pub fn begin_field(&mut self, key: impl Into<String>) -> Result<(), ContextError> {
        match self {
            Context::Struct(c) => c.begin_field(key.into()),
            other => Err(other.unsupported("begin_field")),
        }
    }

    pub fn append_field(
        &mut self,
        key: impl Into<String>,
        value: DocumentNode,
    ) -> Result<(), ContextError> {
        match self {
            Context::Struct(c) => c.append_field(key, value),
            other => Err(other.unsupported("append_field")),
        }
    }

    pub fn append_key(&mut self, key: DocumentNode) -> Result<(), ContextError> {
        match self {
            Context::Map(c) => c.append_key(key),
            other => Err(other.unsupported("append_key")),
        }
    }

    pub fn append_pair(
        &mut self,
        key: DocumentNode,
        value: DocumentNode,
    ) -> Result<(), ContextError> {
        match self {
            Context::Map(c) => c.append_pair(key, value),
            other => Err(other.unsupported("append_pair")),
        }
    }

    /// Seals the write builder into a node. Only the first call succeeds.
    pub fn finish(&mut self) -> Result<DocumentNode, ContextError> {
        match self {
            Context::Root(c) => c.finish(),
            Context::Struct(c) => c.finish(),
            Context::Sequence(c) => c.finish(),
            Context::Map(c) => c.finish(),
        }
    }

    /// Fails with the error `append_child` would return, without appending.
    pub(crate) fn check_append(&self) -> Result<(), ContextError> {
        match self {
            Context::Root(c) => c.check_append(),
            Context::Struct(c) => c.check_append(),
            Context::Sequence(c) => c.check_append(),
            Context::Map(c) => c.check_append(),
        }
    }

    /// Fails with the error `finish` would return, leaving the builder in place.
    pub(crate) fn check_finish(&self) -> Result<(), ContextError> {
        match self {
            Context::Root(c) => c.check_finish(),
            Context::Struct(c) => c.check_finish(),
            Context::Sequence(c) => c.check_finish(),
            Context::Map(c) => c.check_finish(),
        }
    }

    fn unsupported(&self, operation: &'static str) -> ContextError {
        ContextError::Unsupported {
            operation,
            context: self.kind(),
        }
    }
}
