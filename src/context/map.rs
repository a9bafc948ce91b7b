use super::Side;
use crate::ast::{ContextKind, DocumentNode, KeyRef, Mode};
use crate::builder::MapBuilder;
use crate::error::ContextError;

const KIND: ContextKind = ContextKind::Map;

/// Context for maps, walked one key/value pair at a time.
///
/// A map is read either from a keyed node or from a sequence of
/// `[key, value]` entries. `advance` opens the next pair on its key,
/// `advance_to_value` steps to that pair's value. `has_more` counts whole
/// pairs only.
#[derive(Debug)]
pub struct MapContext<'a> {
    side: Side<MapCursor<'a>, MapBuilder>,
}

#[derive(Debug, Clone, Copy)]
enum MapEntries<'a> {
    Keyed(&'a [(String, DocumentNode)]),
    Pairs(&'a [DocumentNode]),
}

#[derive(Debug)]
struct MapCursor<'a> {
    entries: MapEntries<'a>,
    next: usize,
    on_value: bool,
}

impl<'a> MapEntries<'a> {
    fn len(&self) -> usize {
        match self {
            MapEntries::Keyed(entries) => entries.len(),
            MapEntries::Pairs(entries) => entries.len(),
        }
    }

    fn pair(&self, index: usize) -> Option<(KeyRef<'a>, &'a DocumentNode)> {
        match *self {
            MapEntries::Keyed(entries) => entries
                .get(index)
                .map(|(key, value)| (KeyRef::Name(key.as_str()), value)),
            MapEntries::Pairs(entries) => match entries.get(index)? {
                DocumentNode::Sequence(pair) if pair.len() == 2 => {
                    Some((KeyRef::Node(&pair[0]), &pair[1]))
                }
                _ => None,
            },
        }
    }
}

impl<'a> MapCursor<'a> {
    fn current(&self) -> Result<(KeyRef<'a>, &'a DocumentNode), ContextError> {
        self.next
            .checked_sub(1)
            .and_then(|index| self.entries.pair(index))
            .ok_or(ContextError::NoCurrentChild { context: KIND })
    }
}

impl<'a> MapContext<'a> {
    /// Opens a map over `node`. Entries of the sequence form are checked
    /// here, so a malformed entry is reported before any pair is read.
    pub fn reader(node: &'a DocumentNode) -> Result<Self, ContextError> {
        let entries = match node {
            DocumentNode::Keyed(entries) => MapEntries::Keyed(entries),
            DocumentNode::Sequence(entries) => {
                if let Some(index) = entries
                    .iter()
                    .position(|entry| !matches!(entry, DocumentNode::Sequence(pair) if pair.len() == 2))
                {
                    return Err(ContextError::MalformedMapEntry { index });
                }
                MapEntries::Pairs(entries)
            }
            other => {
                return Err(ContextError::UnexpectedNode {
                    expected: KIND,
                    found: other.shape(),
                })
            }
        };
        Ok(Self {
            side: Side::Read(MapCursor {
                entries,
                next: 0,
                on_value: false,
            }),
        })
    }

    pub fn writer() -> Self {
        Self {
            side: Side::Write(MapBuilder::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        self.side.mode()
    }

    pub fn has_more(&self) -> bool {
        match &self.side {
            Side::Read(cursor) => cursor.next < cursor.entries.len(),
            _ => false,
        }
    }

    /// Opens the next pair on its key.
    pub fn advance(&mut self) -> Result<(), ContextError> {
        let cursor = self.side.reader_mut("advance")?;
        if cursor.next >= cursor.entries.len() {
            return Err(ContextError::ExhaustedContext { context: KIND });
        }
        cursor.next += 1;
        cursor.on_value = false;
        Ok(())
    }

    /// Steps from the key of the open pair to its value.
    pub fn advance_to_value(&mut self) -> Result<(), ContextError> {
        let cursor = self.side.reader_mut("advance_to_value")?;
        if cursor.next == 0 {
            return Err(ContextError::NoCurrentChild { context: KIND });
        }
        if cursor.on_value {
            return Err(ContextError::ExhaustedContext { context: KIND });
        }
        cursor.on_value = true;
        Ok(())
    }

    pub fn current_key(&self) -> Result<KeyRef<'a>, ContextError> {
        let (key, _) = self.side.reader("current_key")?.current()?;
        Ok(key)
    }

    pub fn current_value(&self) -> Result<&'a DocumentNode, ContextError> {
        let cursor = self.side.reader("current_value")?;
        if !cursor.on_value {
            return Err(ContextError::NoCurrentChild { context: KIND });
        }
        let (_, value) = cursor.current()?;
        Ok(value)
    }

    /// The key while on the key, the value once stepped to it.
    pub(crate) fn current_entry(&self) -> Result<KeyRef<'a>, ContextError> {
        let cursor = self.side.reader("current_child")?;
        let (key, value) = cursor.current()?;
        Ok(if cursor.on_value {
            KeyRef::Node(value)
        } else {
            key
        })
    }

    /// Stores the key of a new pair, or the value of the open one.
    pub fn append_child(&mut self, node: DocumentNode) -> Result<(), ContextError> {
        self.side.builder_mut("append_child", KIND)?.push(node);
        Ok(())
    }

    pub fn append_key(&mut self, key: DocumentNode) -> Result<(), ContextError> {
        self.side.builder_mut("append_key", KIND)?.push_key(key)
    }

    pub fn append_pair(
        &mut self,
        key: DocumentNode,
        value: DocumentNode,
    ) -> Result<(), ContextError> {
        let builder = self.side.builder_mut("append_pair", KIND)?;
        builder.push_key(key)?;
        builder.push_value(value)
    }

    /// Maps take any node: the key of a new pair or the value of the open one.
    pub(crate) fn check_append(&self) -> Result<(), ContextError> {
        self.side.builder("append_child", KIND).map(|_| ())
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
