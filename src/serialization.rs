use crate::ast::{DocumentNode, Scalar};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};
use std::fmt;

impl Serialize for DocumentNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DocumentNode::Scalar(scalar) => scalar.serialize(serializer),
            DocumentNode::Sequence(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            DocumentNode::Keyed(entries) => {
                // entries go out one by one so order and duplicates survive
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

struct DocumentNodeVisitor;

impl<'de> Visitor<'de> for DocumentNodeVisitor {
    type Value = DocumentNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DocumentNode::bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DocumentNode::number(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DocumentNode::number(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Number::from_f64(v)
            .map(|n| DocumentNode::Scalar(Scalar::Number(n)))
            .ok_or_else(|| E::custom(format!("number {v} has no JSON representation")))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DocumentNode::text(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DocumentNode::text(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DocumentNode::null())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DocumentNode::null())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        DocumentNode::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(DocumentNode::Sequence(elements))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // a plain Vec keeps document order and duplicate keys
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, DocumentNode>()? {
            entries.push((key, value));
        }
        Ok(DocumentNode::Keyed(entries))
    }
}

impl<'de> Deserialize<'de> for DocumentNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DocumentNodeVisitor)
    }
}

impl From<Value> for DocumentNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DocumentNode::null(),
            Value::Bool(b) => DocumentNode::bool(b),
            Value::Number(n) => DocumentNode::Scalar(Scalar::Number(n)),
            Value::String(s) => DocumentNode::text(s),
            Value::Array(elements) => {
                DocumentNode::Sequence(elements.into_iter().map(DocumentNode::from).collect())
            }
            Value::Object(entries) => DocumentNode::Keyed(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, DocumentNode::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Converts into a `serde_json::Value`. Duplicate keys collapse to the last
/// occurrence, as they would in any JSON object model.
pub(crate) fn to_value(node: &DocumentNode) -> Value {
    match node {
        DocumentNode::Scalar(Scalar::Text(s)) => Value::String(s.clone()),
        DocumentNode::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
        DocumentNode::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
        DocumentNode::Scalar(Scalar::Null) => Value::Null,
        DocumentNode::Sequence(elements) => Value::Array(elements.iter().map(to_value).collect()),
        DocumentNode::Keyed(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), to_value(value)))
                .collect(),
        ),
    }
}

impl From<&DocumentNode> for Value {
    fn from(node: &DocumentNode) -> Self {
        to_value(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_keeps_document_order_and_duplicates() {
        let node: DocumentNode = serde_json::from_str(r#"{"b": 1, "a": 2, "b": 3}"#).unwrap();
        assert_eq!(
            node,
            DocumentNode::Keyed(vec![
                ("b".to_string(), DocumentNode::from(1)),
                ("a".to_string(), DocumentNode::from(2)),
                ("b".to_string(), DocumentNode::from(3)),
            ])
        );
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"b":1,"a":2,"b":3}"#
        );
    }

    #[test]
    fn test_numbers_keep_integer_precision() {
        let node: DocumentNode = serde_json::from_str("[9007199254740993, -1, 2.5]").unwrap();
        let DocumentNode::Sequence(elements) = &node else {
            panic!("expected a sequence, got {node:?}");
        };
        assert_eq!(elements[0].as_i64(), Some(9_007_199_254_740_993));
        assert_eq!(elements[1].as_i64(), Some(-1));
        assert_eq!(elements[2].as_f64(), Some(2.5));
    }

    #[test]
    fn test_value_conversion() {
        let value = serde_json::json!({ "name": "x", "tags": [true, null] });
        let node = DocumentNode::from(value.clone());
        assert_eq!(to_value(&node), value);
    }
}
