use crate::{Hydrator, Object, Owner, PersistentCollection, Result};
use hydrant_core::{schema::FieldMapping, Error, Value};

/// Wraps the raw elements of a collection field in an uninitialized proxy.
///
/// A missing value still produces a proxy; it fetches its elements on first
/// access instead.
pub(super) fn collection(
    hydrator: &Hydrator,
    object: &Object,
    field: &FieldMapping,
    raw: Option<&Value>,
) -> Result<PersistentCollection> {
    let raw = match raw {
        None => None,
        Some(Value::List(items)) => Some(items.clone()),
        Some(other) => {
            return Err(Error::invalid_document(format!(
                "collection `{}` should be a list, got {}",
                field.key(),
                other.kind_name()
            )))
        }
    };

    let owner = Owner {
        object: object.id(),
        class: object.class().clone(),
        field: field.app_name().to_string(),
    };

    Ok(PersistentCollection::new(
        hydrator.clone(),
        owner,
        field.clone(),
        raw,
    ))
}
