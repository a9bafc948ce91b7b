use super::Side;
use crate::ast::{ContextKind, DocumentNode, Mode};
use crate::builder::SequenceBuilder;
use crate::error::ContextError;

const KIND: ContextKind = ContextKind::Sequence;

/// Context for lists and sets.
///
/// The element count comes from the document: once every element has been
/// advanced over, any further `advance` is an [`ContextError::ExhaustedContext`].
#[derive(Debug)]
pub struct SequenceContext<'a> {
    side: Side<SequenceCursor<'a>, SequenceBuilder>,
}

#[derive(Debug)]
struct SequenceCursor<'a> {
    elements: &'a [DocumentNode],
    /// Index of the element the next `advance` moves to.
    next: usize,
}

impl<'a> SequenceContext<'a> {
    pub fn reader(node: &'a DocumentNode) -> Result<Self, ContextError> {
        match node {
            DocumentNode::Sequence(elements) => Ok(Self {
                side: Side::Read(SequenceCursor { elements, next: 0 }),
            }),
            other => Err(ContextError::UnexpectedNode {
                expected: KIND,
                found: other.shape(),
            }),
        }
    }

    pub fn writer() -> Self {
        Self {
            side: Side::Write(SequenceBuilder::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        self.side.mode()
    }

    pub fn has_more(&self) -> bool {
        match &self.side {
            Side::Read(cursor) => cursor.next < cursor.elements.len(),
            _ => false,
        }
    }

    pub fn advance(&mut self) -> Result<(), ContextError> {
        let cursor = self.side.reader_mut("advance")?;
        if cursor.next >= cursor.elements.len() {
            return Err(ContextError::ExhaustedContext { context: KIND });
        }
        cursor.next += 1;
        Ok(())
    }

    pub fn current_child(&self) -> Result<&'a DocumentNode, ContextError> {
        let cursor = self.side.reader("current_child")?;
        let elements: &'a [DocumentNode] = cursor.elements;
        cursor
            .next
            .checked_sub(1)
            .and_then(|index| elements.get(index))
            .ok_or(ContextError::NoCurrentChild { context: KIND })
    }

    pub fn append_child(&mut self, node: DocumentNode) -> Result<(), ContextError> {
        self.side.builder_mut("append_child", KIND)?.push(node);
        Ok(())
    }

    pub(crate) fn check_append(&self) -> Result<(), ContextError> {
        self.side.builder("append_child", KIND).map(|_| ())
    }

    pub(crate) fn check_finish(&self) -> Result<(), ContextError> {
        self.side.builder("finish", KIND).map(|_| ())
    }

    pub fn finish(&mut self) -> Result<DocumentNode, ContextError> {
        Ok(self.side.take_builder(KIND)?.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: i64) -> DocumentNode {
        DocumentNode::Sequence((0..n).map(DocumentNode::from).collect())
    }

    #[test]
    fn test_exactly_n_advances_succeed() {
        for n in 0..5 {
            let list = numbers(n);
            let mut context = SequenceContext::reader(&list).unwrap();
            for i in 0..n {
                assert!(context.has_more());
                context.advance().unwrap();
                assert_eq!(context.current_child().unwrap().as_i64(), Some(i));
            }
            assert!(!context.has_more());
            assert_eq!(
                context.advance(),
                Err(ContextError::ExhaustedContext { context: KIND })
            );
        }
    }

    #[test]
    fn test_empty_sequence() {
        let list = DocumentNode::Sequence(vec![]);
        let mut context = SequenceContext::reader(&list).unwrap();
        assert!(!context.has_more());
        assert!(matches!(
            context.current_child(),
            Err(ContextError::NoCurrentChild { .. })
        ));
        assert!(context.advance().is_err());
    }

    #[test]
    fn test_current_child_does_not_move() {
        let list = numbers(2);
        let mut context = SequenceContext::reader(&list).unwrap();
        context.advance().unwrap();
        assert_eq!(context.current_child().unwrap().as_i64(), Some(0));
        assert_eq!(context.current_child().unwrap().as_i64(), Some(0));
        assert!(context.has_more());
    }

    #[test]
    fn test_reader_rejects_other_shapes() {
        let node = DocumentNode::Keyed(vec![]);
        assert!(matches!(
            SequenceContext::reader(&node),
            Err(ContextError::UnexpectedNode {
                expected: ContextKind::Sequence,
                found: "keyed"
            })
        ));
    }

    #[test]
    fn test_writer_cannot_advance() {
        let mut context = SequenceContext::writer();
        assert!(!context.has_more());
        assert_eq!(
            context.advance(),
            Err(ContextError::WrongMode {
                operation: "advance",
                mode: Mode::Write
            })
        );
        assert!(matches!(
            context.current_child(),
            Err(ContextError::WrongMode { .. })
        ));
    }

    #[test]
    fn test_finish_twice_is_rejected() {
        let mut context = SequenceContext::writer();
        context.append_child(DocumentNode::text("x")).unwrap();
        assert_eq!(
            context.finish().unwrap(),
            DocumentNode::Sequence(vec![DocumentNode::text("x")])
        );
        assert_eq!(
            context.finish(),
            Err(ContextError::Sealed { context: KIND })
        );
        assert_eq!(
            context.append_child(DocumentNode::text("y")),
            Err(ContextError::Sealed { context: KIND })
        );
    }
}
