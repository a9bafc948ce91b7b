use super::Side;
use crate::ast::{ContextKind, DocumentNode, Mode};
use crate::error::ContextError;

const KIND: ContextKind = ContextKind::Root;

/// The bottom frame of every stack: exactly one top-level document.
#[derive(Debug)]
pub struct RootContext<'a> {
    side: Side<RootCursor<'a>, Option<DocumentNode>>,
}

#[derive(Debug)]
struct RootCursor<'a> {
    document: &'a DocumentNode,
    advanced: bool,
}

impl<'a> RootContext<'a> {
    pub fn reader(document: &'a DocumentNode) -> Self {
        Self {
            side: Side::Read(RootCursor {
                document,
                advanced: false,
            }),
        }
    }

    pub fn writer() -> Self {
        Self {
            side: Side::Write(None),
        }
    }

    pub fn mode(&self) -> Mode {
        self.side.mode()
    }

    pub fn has_more(&self) -> bool {
        matches!(&self.side, Side::Read(cursor) if !cursor.advanced)
    }

    pub fn advance(&mut self) -> Result<(), ContextError> {
        let cursor = self.side.reader_mut("advance")?;
        if cursor.advanced {
            return Err(ContextError::ExhaustedContext { context: KIND });
        }
        cursor.advanced = true;
        Ok(())
    }

    pub fn current_child(&self) -> Result<&'a DocumentNode, ContextError> {
        let cursor = self.side.reader("current_child")?;
        if cursor.advanced {
            Ok(cursor.document)
        } else {
            Err(ContextError::NoCurrentChild { context: KIND })
        }
    }

    /// The document this root was opened over, whether or not it was advanced.
    pub fn document(&self) -> Option<&'a DocumentNode> {
        match &self.side {
            Side::Read(cursor) => Some(cursor.document),
            _ => None,
        }
    }

    pub fn append_child(&mut self, node: DocumentNode) -> Result<(), ContextError> {
        let slot = self.side.builder_mut("append_child", KIND)?;
        if slot.is_some() {
            return Err(ContextError::RootOccupied);
        }
        *slot = Some(node);
        Ok(())
    }

    pub(crate) fn check_append(&self) -> Result<(), ContextError> {
        match self.side.builder("append_child", KIND)? {
            Some(_) => Err(ContextError::RootOccupied),
            None => Ok(()),
        }
    }

    pub(crate) fn check_finish(&self) -> Result<(), ContextError> {
        self.side
            .builder("finish", KIND)?
            .as_ref()
            .map(|_| ())
            .ok_or(ContextError::EmptyDocument)
    }

    pub fn finish(&mut self) -> Result<DocumentNode, ContextError> {
        self.side
            .take_builder(KIND)?
            .ok_or(ContextError::EmptyDocument)
    }
}
