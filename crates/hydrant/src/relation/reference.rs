use crate::{Hydrator, ObjectRef, Result, Value};
use hydrant_core::schema::ClassName;

use std::{cell::OnceCell, fmt, rc::Rc};

/// A pointer to an independently stored document, resolved on first access.
///
/// Clones share the resolution state.
#[derive(Clone)]
pub struct Reference {
    inner: Rc<Inner>,
}

struct Inner {
    hydrator: Hydrator,
    class: ClassName,
    id: Value,
    resolved: OnceCell<ObjectRef>,
}

impl Reference {
    pub(crate) fn new(hydrator: Hydrator, class: ClassName, id: Value) -> Self {
        Self {
            inner: Rc::new(Inner {
                hydrator,
                class,
                id,
                resolved: OnceCell::new(),
            }),
        }
    }

    /// The concrete class the reference points at.
    pub fn class(&self) -> &ClassName {
        &self.inner.class
    }

    /// The typed identifier of the referenced document.
    pub fn id(&self) -> &Value {
        &self.inner.id
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.resolved.get().is_some()
    }

    /// Resolves the reference. Only the first successful call reaches the
    /// resolver; later calls return the same object.
    pub fn get(&self) -> Result<ObjectRef> {
        if let Some(object) = self.inner.resolved.get() {
            return Ok(object.clone());
        }

        let object = self
            .inner
            .hydrator
            .resolver()
            .resolve_reference(&self.inner.class, &self.inner.id)?;

        Ok(self.inner.resolved.get_or_init(|| object).clone())
    }

    /// Returns `true` if both handles share the same resolution state.
    pub fn ptr_eq(&self, other: &Reference) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Reference")
            .field("class", &self.inner.class)
            .field("id", &self.inner.id)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
