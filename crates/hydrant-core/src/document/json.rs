use super::{Document, Value};
use crate::{Error, Result};

impl From<serde_json::Value> for Value {
    fn from(src: serde_json::Value) -> Self {
        match src {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(v) => match v.as_i64() {
                Some(v) => Self::I64(v),
                None => Self::F64(v.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(v) => Self::String(v),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Self::Document(fields.into_iter().collect()),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(src: &Value) -> Self {
        match src {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::I32(v) => serde_json::Value::from(*v),
            Value::I64(v) => serde_json::Value::from(*v),
            Value::F64(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(v) => serde_json::Value::String(v.clone()),
            Value::List(items) => items.iter().map(serde_json::Value::from).collect(),
            Value::Document(document) => serde_json::Value::Object(
                document
                    .iter()
                    .map(|(key, value)| (key.to_string(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Document {
    /// Builds a document from a JSON object.
    pub fn from_json(src: serde_json::Value) -> Result<Self> {
        match Value::from(src) {
            Value::Document(document) => Ok(document),
            other => Err(Error::invalid_document(format!(
                "expected a JSON object, got {}",
                other.kind_name()
            ))),
        }
    }
}

impl TryFrom<serde_json::Value> for Document {
    type Error = Error;

    fn try_from(src: serde_json::Value) -> Result<Self> {
        Self::from_json(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_becomes_ordered_document() {
        let document = Document::from_json(json!({
            "title": "Doc A",
            "views": 3,
            "score": 1.5,
            "tags": ["a", "b"],
            "meta": { "draft": false },
            "gone": null,
        }))
        .unwrap();

        assert_eq!(
            document.keys().collect::<Vec<_>>(),
            ["title", "views", "score", "tags", "meta", "gone"]
        );
        assert_eq!(document.get("views"), Some(&Value::I64(3)));
        assert_eq!(document.get("score"), Some(&Value::F64(1.5)));
        assert!(document.get("meta").unwrap().is_document());
        assert_eq!(document.get_present("gone"), None);
        assert!(document.contains_key("gone"));
    }

    #[test]
    fn json_scalar_is_not_a_document() {
        let err = Document::from_json(json!(42)).unwrap_err();
        assert!(err.is_invalid_document());
    }
}
