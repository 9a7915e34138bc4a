use super::{Document, Value};
use crate::{Error, Result};

impl TryFrom<&bson::Bson> for Value {
    type Error = Error;

    fn try_from(src: &bson::Bson) -> Result<Self> {
        Ok(match src {
            bson::Bson::Null | bson::Bson::Undefined => Value::Null,
            bson::Bson::Boolean(v) => Value::Bool(*v),
            bson::Bson::Int32(v) => Value::I32(*v),
            bson::Bson::Int64(v) => Value::I64(*v),
            bson::Bson::Double(v) => Value::F64(*v),
            bson::Bson::String(v) => Value::String(v.clone()),
            bson::Bson::ObjectId(oid) => Value::String(oid.to_hex()),
            bson::Bson::DateTime(v) => Value::I64(v.timestamp_millis()),
            bson::Bson::Array(items) => Value::List(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            bson::Bson::Document(document) => Value::Document(Document::try_from(document)?),
            other => {
                return Err(Error::invalid_document(format!(
                    "unsupported BSON element type {:?}",
                    other.element_type()
                )))
            }
        })
    }
}

impl TryFrom<&bson::Document> for Document {
    type Error = Error;

    fn try_from(src: &bson::Document) -> Result<Self> {
        src.iter()
            .map(|(key, value)| Ok((key.to_string(), Value::try_from(value)?)))
            .collect()
    }
}
