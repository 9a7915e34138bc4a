use crate::{ObjectRef, Owner, Result, Value};
use hydrant_core::schema::{ClassName, FieldMapping};

/// Access to the query layer, used when lazy relations are first read.
pub trait Resolver {
    /// Returns the authoritative object for `(class, id)`.
    fn resolve_reference(&self, class: &ClassName, id: &Value) -> Result<ObjectRef>;

    /// Loads the raw elements of a collection that was not seeded with data
    /// during hydration.
    fn fetch_collection(&self, owner: &Owner, field: &FieldMapping) -> Result<Vec<Value>>;
}
