use crate::{Hydrator, Object, ObjectId, Result};
use hydrant_core::{schema::FieldMapping, Error, Value};

/// Hydrates one embedded document owned by `parent`.
///
/// The new object is registered, along with its parent edge, once the
/// enclosing hydration succeeds.
pub(crate) fn embed(
    hydrator: &Hydrator,
    field: &FieldMapping,
    parent: ObjectId,
    key: &str,
    raw: &Value,
) -> Result<Object> {
    let class = hydrator.schema().class_name_from_discriminator(field, raw)?;

    let Some(document) = raw.as_document() else {
        return Err(Error::invalid_document(format!(
            "embedded `{key}` should be a document, got {}",
            raw.kind_name()
        )));
    };

    let mut object = Object::new(class);
    let data = hydrator.hydrate(&mut object, document)?;

    hydrator.register_embedded(object.clone(), data, field, parent, key);

    Ok(object)
}
