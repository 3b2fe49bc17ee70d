use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// A vendor extension value (`x-*`) or an enum literal attached to a document node.
///
/// Only `String`, `Boolean`, `Timestamp`, `List` and `Object` have an outline
/// representation. `Integer`, `Number` and `Null` exist so that a document can
/// carry them, but every printer skips them without output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ExtensionValue {
    String(String),
    Boolean(bool),
    Timestamp(DateTime<FixedOffset>),
    List(Vec<ExtensionValue>),
    Object(IndexMap<String, ExtensionValue>),
    Integer(i64),
    Number(f64),
    Null,
}

impl ExtensionValue {
    pub fn kind(&self) -> ExtensionKind {
        match self {
            ExtensionValue::String(_) => ExtensionKind::String,
            ExtensionValue::Boolean(_) => ExtensionKind::Boolean,
            ExtensionValue::Timestamp(_) => ExtensionKind::Timestamp,
            ExtensionValue::List(_) => ExtensionKind::List,
            ExtensionValue::Object(_) => ExtensionKind::Object,
            ExtensionValue::Integer(_) => ExtensionKind::Integer,
            ExtensionValue::Number(_) => ExtensionKind::Number,
            ExtensionValue::Null => ExtensionKind::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtensionValue::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtensionValue::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ExtensionValue]> {
        match self {
            ExtensionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ExtensionValue>> {
        match self {
            ExtensionValue::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<Value> for ExtensionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => ExtensionValue::String(text),
            Value::Bool(flag) => ExtensionValue::Boolean(flag),
            Value::Array(items) => {
                ExtensionValue::List(items.into_iter().map(ExtensionValue::from).collect())
            }
            Value::Object(fields) => ExtensionValue::Object(
                fields
                    .into_iter()
                    .map(|(key, field)| (key, ExtensionValue::from(field)))
                    .collect(),
            ),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => ExtensionValue::Integer(integer),
                None => ExtensionValue::Number(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::Null => ExtensionValue::Null,
        }
    }
}

impl From<DateTime<FixedOffset>> for ExtensionValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        ExtensionValue::Timestamp(value)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ExtensionKind {
    String,
    Boolean,
    Timestamp,
    List,
    Object,
    Integer,
    Number,
    Null,
}

impl Display for ExtensionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtensionKind::String => write!(f, "string"),
            ExtensionKind::Boolean => write!(f, "boolean"),
            ExtensionKind::Timestamp => write!(f, "timestamp"),
            ExtensionKind::List => write!(f, "list"),
            ExtensionKind::Object => write!(f, "object"),
            ExtensionKind::Integer => write!(f, "integer"),
            ExtensionKind::Number => write!(f, "number"),
            ExtensionKind::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_keeps_document_order() {
        let value = ExtensionValue::from(json!({
            "zeta": "last letter",
            "alpha": true,
            "mid": [1, "two"]
        }));
        let fields = value.as_object().unwrap();
        let keys: Vec<&str> = fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            fields["mid"],
            ExtensionValue::List(vec![
                ExtensionValue::Integer(1),
                ExtensionValue::String("two".to_string())
            ])
        );
    }

    #[test]
    fn test_numbers_and_null_have_their_own_kinds() {
        assert_eq!(ExtensionValue::from(json!(3)).kind(), ExtensionKind::Integer);
        assert_eq!(ExtensionValue::from(json!(1.5)).kind(), ExtensionKind::Number);
        assert_eq!(ExtensionValue::from(json!(null)).kind(), ExtensionKind::Null);
    }

    #[test]
    fn test_strings_are_never_promoted_to_timestamps() {
        let value = ExtensionValue::from(json!("2024-01-02T03:04:05Z"));
        assert_eq!(value.kind(), ExtensionKind::String);
    }
}
