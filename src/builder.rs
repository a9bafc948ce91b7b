//! Write-side accumulators.
//!
//! Each builder collects the children of one aggregate in append order and is
//! consumed by `finish`, which turns it into an immutable [`DocumentNode`].

use crate::ast::{ContextKind, DocumentNode, Scalar};
use crate::error::ContextError;

#[derive(Debug, Default)]
pub struct SequenceBuilder {
    elements: Vec<DocumentNode>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: DocumentNode) {
        self.elements.push(node);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn finish(self) -> DocumentNode {
        DocumentNode::Sequence(self.elements)
    }
}

/// Collects struct fields. A field key is recorded first with
/// [`StructBuilder::begin_field`] and the next pushed value is stored under it.
#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<(String, DocumentNode)>,
    pending: Option<String>,
}

impl StructBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_field(&mut self, key: String) -> Result<(), ContextError> {
        if self.pending.is_some() {
            return Err(ContextError::DanglingKey {
                context: ContextKind::Struct,
            });
        }
        self.pending = Some(key);
        Ok(())
    }

    pub fn push(&mut self, value: DocumentNode) -> Result<(), ContextError> {
        let key = self.pending.take().ok_or(ContextError::MissingKey {
            context: ContextKind::Struct,
        })?;
        self.fields.push((key, value));
        Ok(())
    }

    pub fn has_pending_key(&self) -> bool {
        self.pending.is_some()
    }

    pub fn finish(self) -> Result<DocumentNode, ContextError> {
        if self.pending.is_some() {
            return Err(ContextError::DanglingKey {
                context: ContextKind::Struct,
            });
        }
        Ok(DocumentNode::Keyed(self.fields))
    }
}

/// Collects map entries as alternating key and value appends.
#[derive(Debug, Default)]
pub struct MapBuilder {
    pairs: Vec<(DocumentNode, DocumentNode)>,
    pending: Option<DocumentNode>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: DocumentNode) -> Result<(), ContextError> {
        if self.pending.is_some() {
            return Err(ContextError::DanglingKey {
                context: ContextKind::Map,
            });
        }
        self.pending = Some(key);
        Ok(())
    }

    pub fn push_value(&mut self, value: DocumentNode) -> Result<(), ContextError> {
        let key = self.pending.take().ok_or(ContextError::MissingKey {
            context: ContextKind::Map,
        })?;
        self.pairs.push((key, value));
        Ok(())
    }

    /// Stores `node` as the key of a new pair, or as the value of the open one.
    pub fn push(&mut self, node: DocumentNode) {
        match self.pending.take() {
            Some(key) => self.pairs.push((key, node)),
            None => self.pending = Some(node),
        }
    }

    pub fn has_pending_key(&self) -> bool {
        self.pending.is_some()
    }

    /// Maps whose keys are all text become a keyed node. Any other key
    /// forces the `[[key, value], ...]` form so that key types survive.
    pub fn finish(self) -> Result<DocumentNode, ContextError> {
        if self.pending.is_some() {
            return Err(ContextError::DanglingKey {
                context: ContextKind::Map,
            });
        }
        if self.pairs.iter().all(|(key, _)| key.as_str().is_some()) {
            let entries = self
                .pairs
                .into_iter()
                .filter_map(|(key, value)| match key {
                    DocumentNode::Scalar(Scalar::Text(name)) => Some((name, value)),
                    _ => None,
                })
                .collect();
            return Ok(DocumentNode::Keyed(entries));
        }
        let entries = self
            .pairs
            .into_iter()
            .map(|(key, value)| DocumentNode::Sequence(vec![key, value]))
            .collect();
        Ok(DocumentNode::Sequence(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_builder_keeps_append_order() {
        let mut builder = SequenceBuilder::new();
        assert!(builder.is_empty());
        builder.push(DocumentNode::from(3));
        builder.push(DocumentNode::from(1));
        builder.push(DocumentNode::from(2));
        assert_eq!(builder.len(), 3);
        assert_eq!(
            builder.finish(),
            DocumentNode::Sequence(vec![
                DocumentNode::from(3),
                DocumentNode::from(1),
                DocumentNode::from(2)
            ])
        );
    }

    #[test]
    fn test_struct_builder_requires_key() {
        let mut builder = StructBuilder::new();
        let err = builder.push(DocumentNode::from(1)).unwrap_err();
        assert_eq!(
            err,
            ContextError::MissingKey {
                context: ContextKind::Struct
            }
        );
    }

    #[test]
    fn test_struct_builder_rejects_two_pending_keys() {
        let mut builder = StructBuilder::new();
        builder.begin_field("a".to_string()).unwrap();
        assert!(matches!(
            builder.begin_field("b".to_string()),
            Err(ContextError::DanglingKey { .. })
        ));
    }

    #[test]
    fn test_struct_builder_finish_with_dangling_key() {
        let mut builder = StructBuilder::new();
        builder.begin_field("name".to_string()).unwrap();
        assert!(builder.has_pending_key());
        assert!(matches!(
            builder.finish(),
            Err(ContextError::DanglingKey { .. })
        ));
    }

    #[test]
    fn test_map_builder_text_keys_become_keyed() {
        let mut builder = MapBuilder::new();
        builder.push(DocumentNode::text("b"));
        assert!(builder.has_pending_key());
        builder.push(DocumentNode::from(2));
        assert!(!builder.has_pending_key());
        builder.push(DocumentNode::text("a"));
        builder.push(DocumentNode::from(1));
        assert_eq!(
            builder.finish().unwrap(),
            DocumentNode::Keyed(vec![
                ("b".to_string(), DocumentNode::from(2)),
                ("a".to_string(), DocumentNode::from(1)),
            ])
        );
    }

    #[test]
    fn test_map_builder_numeric_keys_become_pairs() {
        let mut builder = MapBuilder::new();
        builder.push_key(DocumentNode::from(7)).unwrap();
        builder.push_value(DocumentNode::text("seven")).unwrap();
        assert_eq!(
            builder.finish().unwrap(),
            DocumentNode::Sequence(vec![DocumentNode::Sequence(vec![
                DocumentNode::from(7),
                DocumentNode::text("seven"),
            ])])
        );
    }

    #[test]
    fn test_map_builder_value_without_key() {
        let mut builder = MapBuilder::new();
        assert!(matches!(
            builder.push_value(DocumentNode::null()),
            Err(ContextError::MissingKey { .. })
        ));
    }
}
