use super::Side;
use crate::ast::{ContextKind, DocumentNode, KeyRef, Mode};
use crate::builder::StructBuilder;
use crate::error::ContextError;

const KIND: ContextKind = ContextKind::Struct;

/// Context for structs: `(field key, value)` pairs in document order.
///
/// Keys are handed back as they are. Deciding what to do with a field the
/// schema does not know is up to the caller.
#[derive(Debug)]
pub struct StructContext<'a> {
    side: Side<StructCursor<'a>, StructBuilder>,
}

#[derive(Debug)]
struct StructCursor<'a> {
    fields: &'a [(String, DocumentNode)],
    next: usize,
}

impl<'a> StructCursor<'a> {
    fn current(&self) -> Result<&'a (String, DocumentNode), ContextError> {
        let fields: &'a [(String, DocumentNode)] = self.fields;
        self.next
            .checked_sub(1)
            .and_then(|index| fields.get(index))
            .ok_or(ContextError::NoCurrentChild { context: KIND })
    }
}

impl<'a> StructContext<'a> {
    pub fn reader(node: &'a DocumentNode) -> Result<Self, ContextError> {
        match node {
            DocumentNode::Keyed(fields) => Ok(Self {
                side: Side::Read(StructCursor { fields, next: 0 }),
            }),
            other => Err(ContextError::UnexpectedNode {
                expected: KIND,
                found: other.shape(),
            }),
        }
    }

    pub fn writer() -> Self {
        Self {
            side: Side::Write(StructBuilder::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        self.side.mode()
    }

    pub fn has_more(&self) -> bool {
        match &self.side {
            Side::Read(cursor) => cursor.next < cursor.fields.len(),
            _ => false,
        }
    }

    pub fn advance(&mut self) -> Result<(), ContextError> {
        let cursor = self.side.reader_mut("advance")?;
        if cursor.next >= cursor.fields.len() {
            return Err(ContextError::ExhaustedContext { context: KIND });
        }
        cursor.next += 1;
        Ok(())
    }

    pub fn current_key(&self) -> Result<KeyRef<'a>, ContextError> {
        let (key, _) = self.side.reader("current_key")?.current()?;
        Ok(KeyRef::Name(key))
    }

    pub fn current_child(&self) -> Result<&'a DocumentNode, ContextError> {
        let (_, value) = self.side.reader("current_child")?.current()?;
        Ok(value)
    }

    pub fn begin_field(&mut self, key: String) -> Result<(), ContextError> {
        self.side.builder_mut("begin_field", KIND)?.begin_field(key)
    }

    /// Appends `value` under the pending field key.
    pub fn append_child(&mut self, value: DocumentNode) -> Result<(), ContextError> {
        self.side.builder_mut("append_child", KIND)?.push(value)
    }

    pub fn append_field(
        &mut self,
        key: impl Into<String>,
        value: DocumentNode,
    ) -> Result<(), ContextError> {
        let builder = self.side.builder_mut("append_field", KIND)?;
        builder.begin_field(key.into())?;
        builder.push(value)
    }

    /// A value can only be appended under a pending field key.
    pub(crate) fn check_append(&self) -> Result<(), ContextError> {
        if !self.side.builder("append_child", KIND)?.has_pending_key() {
            return Err(ContextError::MissingKey { context: KIND });
        }
        Ok(())
    }

    pub(crate) fn check_finish(&self) -> Result<(), ContextError> {
        if self.side.builder("finish", KIND)?.has_pending_key() {
            return Err(ContextError::DanglingKey { context: KIND });
        }
        Ok(())
    }

    pub fn finish(&mut self) -> Result<DocumentNode, ContextError> {
        self.side.take_builder(KIND)?.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_fields() -> DocumentNode {
        DocumentNode::Keyed(vec![
            ("1".to_string(), DocumentNode::text("x")),
            ("2".to_string(), DocumentNode::from(42)),
            ("3".to_string(), DocumentNode::bool(true)),
        ])
    }

    #[test]
    fn test_fields_in_document_order() {
        let node = three_fields();
        let mut context = StructContext::reader(&node).unwrap();

        context.advance().unwrap();
        assert_eq!(context.current_key().unwrap(), KeyRef::Name("1"));
        assert_eq!(context.current_child().unwrap().as_str(), Some("x"));

        context.advance().unwrap();
        assert_eq!(context.current_key().unwrap(), KeyRef::Name("2"));
        assert_eq!(context.current_child().unwrap().as_i64(), Some(42));

        context.advance().unwrap();
        assert_eq!(context.current_key().unwrap(), KeyRef::Name("3"));
        assert_eq!(context.current_child().unwrap().as_bool(), Some(true));

        assert!(!context.has_more());
        assert_eq!(
            context.advance(),
            Err(ContextError::ExhaustedContext { context: KIND })
        );
    }

    #[test]
    fn test_key_before_advance() {
        let node = three_fields();
        let context = StructContext::reader(&node).unwrap();
        assert!(matches!(
            context.current_key(),
            Err(ContextError::NoCurrentChild { .. })
        ));
    }

    #[test]
    fn test_writer_preserves_append_order() {
        let mut context = StructContext::writer();
        context.append_field("zeta", DocumentNode::from(1)).unwrap();
        context.begin_field("alpha".to_string()).unwrap();
        context.append_child(DocumentNode::from(2)).unwrap();
        assert_eq!(
            context.finish().unwrap(),
            DocumentNode::Keyed(vec![
                ("zeta".to_string(), DocumentNode::from(1)),
                ("alpha".to_string(), DocumentNode::from(2)),
            ])
        );
    }

    #[test]
    fn test_reader_rejects_writes() {
        let node = three_fields();
        let mut context = StructContext::reader(&node).unwrap();
        assert!(matches!(
            context.append_field("4", DocumentNode::null()),
            Err(ContextError::WrongMode { mode: Mode::Read, .. })
        ));
    }

    #[test]
    fn test_checks_follow_the_pending_key() {
        let mut context = StructContext::writer();
        assert_eq!(
            context.check_append(),
            Err(ContextError::MissingKey { context: KIND })
        );
        assert!(context.check_finish().is_ok());

        context.begin_field("name".to_string()).unwrap();
        assert!(context.check_append().is_ok());
        assert_eq!(
            context.check_finish(),
            Err(ContextError::DanglingKey { context: KIND })
        );

        context.append_child(DocumentNode::text("kit")).unwrap();
        assert!(context.check_finish().is_ok());
        context.finish().unwrap();
        assert_eq!(
            context.check_append(),
            Err(ContextError::Sealed { context: KIND })
        );
    }
}
