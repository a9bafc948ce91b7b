//! Drives a [`ContextStack`] the way a protocol cursor would.
//!
//! [`write_node`] replays an existing node as enter/append/exit calls and
//! [`read_node`] rebuilds a node from the current position of a read
//! session. Keyed nodes are walked as structs; [`write_map`] and
//! [`read_map`] cover maps explicitly since a keyed node alone does not say
//! which of the two it is.

use crate::ast::{AggregateKind, ContextKind, DocumentNode, KeyRef};
use crate::error::ContextError;
use crate::stack::ContextStack;

/// Appends `node` to the innermost write context.
pub fn write_node(stack: &mut ContextStack<'_>, node: &DocumentNode) -> Result<(), ContextError> {
    match node {
        DocumentNode::Scalar(_) => stack.append_child(node.clone()),
        DocumentNode::Sequence(elements) => {
            stack.enter(AggregateKind::Sequence)?;
            for element in elements {
                write_node(stack, element)?;
            }
            stack.exit(AggregateKind::Sequence)
        }
        DocumentNode::Keyed(fields) => {
            stack.enter(AggregateKind::Struct)?;
            for (key, value) in fields {
                stack.begin_field(key.as_str())?;
                write_node(stack, value)?;
            }
            stack.exit(AggregateKind::Struct)
        }
    }
}

pub fn write_map(
    stack: &mut ContextStack<'_>,
    pairs: &[(DocumentNode, DocumentNode)],
) -> Result<(), ContextError> {
    stack.enter(AggregateKind::Map)?;
    for (key, value) in pairs {
        write_node(stack, key)?;
        write_node(stack, value)?;
    }
    stack.exit(AggregateKind::Map)
}

/// Rebuilds the node under the cursor of the innermost read context. The
/// caller must have advanced onto it. The text key of a keyed map comes back
/// as a text scalar.
pub fn read_node(stack: &mut ContextStack<'_>) -> Result<DocumentNode, ContextError> {
    let node = match stack.current_entry()? {
        KeyRef::Name(name) => return Ok(DocumentNode::text(name)),
        KeyRef::Node(node) => node,
    };
    match node {
        DocumentNode::Scalar(_) => Ok(node.clone()),
        DocumentNode::Sequence(_) => {
            stack.enter(AggregateKind::Sequence)?;
            let mut elements = Vec::new();
            while stack.has_more() {
                stack.advance()?;
                elements.push(read_node(stack)?);
            }
            stack.exit(AggregateKind::Sequence)?;
            Ok(DocumentNode::Sequence(elements))
        }
        DocumentNode::Keyed(_) => {
            stack.enter(AggregateKind::Struct)?;
            let mut fields = Vec::new();
            while stack.has_more() {
                stack.advance()?;
                let key = match stack.current_key()? {
                    KeyRef::Name(name) => name.to_string(),
                    KeyRef::Node(other) => {
                        return Err(ContextError::UnexpectedNode {
                            expected: ContextKind::Struct,
                            found: other.shape(),
                        })
                    }
                };
                fields.push((key, read_node(stack)?));
            }
            stack.exit(AggregateKind::Struct)?;
            Ok(DocumentNode::Keyed(fields))
        }
    }
}

/// Reads the node under the cursor as a map.
pub fn read_map(
    stack: &mut ContextStack<'_>,
) -> Result<Vec<(DocumentNode, DocumentNode)>, ContextError> {
    stack.enter(AggregateKind::Map)?;
    let mut pairs = Vec::new();
    while stack.has_more() {
        stack.advance()?;
        let key = read_node(stack)?;
        stack.advance_to_value()?;
        pairs.push((key, read_node(stack)?));
    }
    stack.exit(AggregateKind::Map)?;
    Ok(pairs)
}

/// Replays `document` through a fresh write session.
pub fn write_document(document: &DocumentNode) -> Result<DocumentNode, ContextError> {
    let mut stack = ContextStack::writer();
    write_node(&mut stack, document)?;
    Ok(stack.end()?.into_owned())
}

/// Rebuilds `document` through a read session over it.
pub fn read_document(document: &DocumentNode) -> Result<DocumentNode, ContextError> {
    let mut stack = ContextStack::reader(document);
    stack.advance()?;
    let rebuilt = read_node(&mut stack)?;
    stack.end()?;
    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentNode {
        DocumentNode::Keyed(vec![
            ("name".to_string(), DocumentNode::text("scribe")),
            (
                "ports".to_string(),
                DocumentNode::Sequence(vec![DocumentNode::from(80), DocumentNode::from(443)]),
            ),
            (
                "owner".to_string(),
                DocumentNode::Keyed(vec![("id".to_string(), DocumentNode::from(1))]),
            ),
            ("empty".to_string(), DocumentNode::Sequence(vec![])),
        ])
    }

    #[test]
    fn test_write_then_read_is_identity() {
        let document = sample();
        let written = write_document(&document).unwrap();
        assert_eq!(written, document);
        assert_eq!(read_document(&written).unwrap(), document);
    }

    #[test]
    fn test_scalar_document() {
        let document = DocumentNode::text("alone");
        assert_eq!(write_document(&document).unwrap(), document);
        assert_eq!(read_document(&document).unwrap(), document);
    }

    #[test]
    fn test_map_with_structured_keys() {
        let key = DocumentNode::Keyed(vec![("x".to_string(), DocumentNode::from(1))]);
        let pairs = vec![(key.clone(), DocumentNode::text("point"))];

        let mut stack = ContextStack::writer();
        write_map(&mut stack, &pairs).unwrap();
        let document = stack.end().unwrap().into_owned();
        assert_eq!(
            document,
            DocumentNode::Sequence(vec![DocumentNode::Sequence(vec![
                key,
                DocumentNode::text("point")
            ])])
        );

        let mut stack = ContextStack::reader(&document);
        stack.advance().unwrap();
        assert_eq!(read_map(&mut stack).unwrap(), pairs);
    }
}
