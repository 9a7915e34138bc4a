use crate::{Hydrator, Reference, Result};
use hydrant_core::{
    schema::{ClassMapping, FieldMapping, ReferenceStorage},
    Error, Value,
};

/// Builds an unresolved [`Reference`] from a raw reference value.
///
/// Nothing is fetched: the concrete class comes from the discriminator (or
/// the target hint) and the identifier is coerced with the target's
/// identifier type.
pub(crate) fn reference(hydrator: &Hydrator, field: &FieldMapping, raw: &Value) -> Result<Reference> {
    let schema = hydrator.schema();
    let storage = field
        .ty
        .as_reference()
        .map(|reference| reference.storage)
        .unwrap_or_default();

    let class = schema.class_name_from_discriminator(field, raw)?;

    let id = match storage {
        ReferenceStorage::DbRef => raw
            .as_document()
            .and_then(|descriptor| descriptor.get_present("$id"))
            .cloned()
            .ok_or_else(|| {
                Error::invalid_document(format!(
                    "reference `{}` has no `$id` in its descriptor",
                    field.key()
                ))
            })?,
        ReferenceStorage::Id if raw.is_document() || raw.is_list() => {
            return Err(Error::invalid_document(format!(
                "reference `{}` should hold a bare identifier, got {}",
                field.key(),
                raw.kind_name()
            )))
        }
        ReferenceStorage::Id => raw.clone(),
    };

    let id_ty = schema
        .mapping(class.as_str())
        .and_then(ClassMapping::identifier_field)
        .and_then(|id_field| id_field.ty.as_primitive());

    let id = match id_ty {
        Some(ty) => ty.coerce(id)?,
        None => id,
    };

    Ok(hydrator.get_reference(class, id))
}
