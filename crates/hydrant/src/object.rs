use crate::{relation::PersistentCollection, Reference};
use hydrant_core::{schema::ClassName, Value};

use indexmap::IndexMap;
use std::{cell::RefCell, fmt, rc::Rc};

/// Generate a process-unique object ID.
///
/// Uses a global atomic counter, so IDs are never reused within a process
/// and the function can be called from any thread.
pub fn generate_object_id() -> ObjectId {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_OBJECT_ID: AtomicUsize = AtomicUsize::new(0);

    let id = NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed);
    ObjectId(id)
}

/// Identity of a hydrated object, stable for the object's lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// An instance of a mapped class.
///
/// Cloning copies the field values and keeps the same [`ObjectId`].
#[derive(Debug, Clone)]
pub struct Object {
    id: ObjectId,
    class: ClassName,
    fields: IndexMap<String, FieldValue>,
}

/// A shared handle to an independently identified object, as handed out by
/// a [`Resolver`](crate::Resolver).
pub type ObjectRef = Rc<RefCell<Object>>;

/// A value written into an object field by hydration.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// A coerced scalar, list or hash
    Value(Value),

    /// A not-yet-resolved pointer to another document
    Reference(Reference),

    /// A document owned by the parent
    Embedded(Box<Object>),

    /// A lazily materialized collection
    Collection(PersistentCollection),
}

/// The field of a specific object that owns a collection or embedded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner {
    pub object: ObjectId,
    pub class: ClassName,
    pub field: String,
}

impl Object {
    /// Creates a blank instance. No field is set.
    pub fn new(class: impl Into<ClassName>) -> Self {
        Self {
            id: generate_object_id(),
            class: class.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.shift_remove(field)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &FieldValue)> + '_ {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.get(field).and_then(FieldValue::as_value)
    }

    pub fn reference(&self, field: &str) -> Option<&Reference> {
        self.get(field).and_then(FieldValue::as_reference)
    }

    pub fn embedded(&self, field: &str) -> Option<&Object> {
        self.get(field).and_then(FieldValue::as_embedded)
    }

    pub fn collection(&self, field: &str) -> Option<&PersistentCollection> {
        self.get(field).and_then(FieldValue::as_collection)
    }

    /// Wraps the object in a shared handle.
    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }
}

impl FieldValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<&Object> {
        match self {
            Self::Embedded(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&PersistentCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_embedded(&self) -> &Object {
        match self {
            Self::Embedded(object) => object,
            _ => panic!("expected embedded object, but was {self:?}"),
        }
    }

    #[track_caller]
    pub fn expect_reference(&self) -> &Reference {
        match self {
            Self::Reference(reference) => reference,
            _ => panic!("expected reference, but was {self:?}"),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Object> for FieldValue {
    fn from(value: Object) -> Self {
        Self::Embedded(Box::new(value))
    }
}

impl From<Reference> for FieldValue {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<PersistentCollection> for FieldValue {
    fn from(value: PersistentCollection) -> Self {
        Self::Collection(value)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ObjectId({})", self.0)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}#{}.{}", self.class, self.object.0, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_are_unique() {
        let a = Object::new("Post");
        let b = Object::new("Post");
        assert_ne!(a.id(), b.id());
        assert!(a.id() < b.id());
    }

    #[test]
    fn clone_keeps_identity() {
        let mut a = Object::new("Post");
        a.set("title", Value::from("Doc A"));

        let b = a.clone();
        assert_eq!(a.id(), b.id());
        assert_eq!(b.value("title"), Some(&Value::from("Doc A")));
    }

    #[test]
    fn unset_fields_are_absent() {
        let a = Object::new("Post");
        assert!(!a.contains("title"));
        assert!(a.value("title").is_none());
        assert_eq!(a.fields().len(), 0);
    }
}
