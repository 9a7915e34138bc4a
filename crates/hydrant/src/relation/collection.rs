use crate::{procedure, FieldValue, Hydrator, Owner, Result, Value};
use hydrant_core::{err, schema::FieldMapping, schema::FieldTy};

use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::Rc,
};

/// A collection field whose elements are hydrated on first access.
///
/// Holds the raw element data captured during hydration together with the
/// owning object and field. Reading the contents materializes every element
/// once; the proxy then stays initialized. Clones share state.
///
/// Materialization is not synchronized. The proxy is `!Send`, so first
/// access always happens on the thread that built the graph.
#[derive(Clone)]
pub struct PersistentCollection {
    inner: Rc<Inner>,
}

struct Inner {
    hydrator: Hydrator,
    owner: Owner,
    field: FieldMapping,

    /// Raw element data, if seeded or already fetched
    raw: RefCell<Option<Vec<Value>>>,

    /// Materialized elements. `None` until initialized.
    elements: RefCell<Option<Vec<FieldValue>>>,

    dirty: Cell<bool>,
}

impl PersistentCollection {
    pub(crate) fn new(
        hydrator: Hydrator,
        owner: Owner,
        field: FieldMapping,
        raw: Option<Vec<Value>>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                hydrator,
                owner,
                field,
                raw: RefCell::new(raw),
                elements: RefCell::new(None),
                dirty: Cell::new(false),
            }),
        }
    }

    /// The object and field this collection belongs to.
    pub fn owner(&self) -> &Owner {
        &self.inner.owner
    }

    pub fn field(&self) -> &FieldMapping {
        &self.inner.field
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.elements.borrow().is_some()
    }

    /// Raw element data captured at hydration time (or fetched since).
    pub fn raw(&self) -> Option<Vec<Value>> {
        self.inner.raw.borrow().clone()
    }

    /// Materializes every raw element. Does nothing once initialized.
    ///
    /// If an element fails to hydrate the collection stays uninitialized, no
    /// element is registered with the unit of work, and the next access
    /// tries again.
    pub fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let inner = &*self.inner;

        let seeded = inner.raw.borrow().clone();
        let raw = match seeded {
            Some(raw) => raw,
            None => {
                let raw = inner
                    .hydrator
                    .resolver()
                    .fetch_collection(&inner.owner, &inner.field)?;
                *inner.raw.borrow_mut() = Some(raw.clone());
                raw
            }
        };

        let elements = inner
            .hydrator
            .staged(|| {
                raw.iter()
                    .enumerate()
                    .map(|(index, raw)| self.materialize(index, raw))
                    .collect::<Result<Vec<_>>>()
            })
            .map_err(|err| err.context(err!("initializing collection `{}`", inner.owner)))?;

        tracing::debug!(
            owner = %inner.owner,
            elements = elements.len(),
            "initialized collection"
        );

        *inner.elements.borrow_mut() = Some(elements);
        Ok(())
    }

    fn materialize(&self, index: usize, raw: &Value) -> Result<FieldValue> {
        let inner = &*self.inner;

        match &inner.field.ty {
            FieldTy::ReferenceMany(_) => {
                procedure::reference(&inner.hydrator, &inner.field, raw).map(FieldValue::Reference)
            }
            FieldTy::EmbedMany(_) => {
                let key = format!("{}.{index}", inner.field.key());
                procedure::embed(&inner.hydrator, &inner.field, inner.owner.object, &key, raw)
                    .map(FieldValue::from)
            }
            ty => Err(err!(
                "field `{}` is not a collection ({})",
                inner.field.app_name(),
                ty.kind_name()
            )),
        }
    }

    /// Returns the elements, materializing them first if needed.
    pub fn get(&self) -> Result<Ref<'_, [FieldValue]>> {
        self.initialize()?;
        Ok(Ref::map(self.inner.elements.borrow(), |elements| {
            elements.as_deref().unwrap_or(&[])
        }))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.get()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.get()?.is_empty())
    }

    /// Appends an element, materializing the existing ones first.
    pub fn push(&self, value: impl Into<FieldValue>) -> Result<()> {
        self.initialize()?;
        self.inner
            .elements
            .borrow_mut()
            .get_or_insert_with(Vec::new)
            .push(value.into());
        self.inner.dirty.set(true);
        Ok(())
    }

    /// Returns `true` if elements were added since hydration (or since the
    /// last [`clear_dirty`](Self::clear_dirty)).
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.get()
    }

    pub fn clear_dirty(&self) {
        self.inner.dirty.set(false);
    }

    /// Returns `true` if both handles share the same state.
    pub fn ptr_eq(&self, other: &PersistentCollection) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PersistentCollection {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = fmt.debug_struct("PersistentCollection");
        debug.field("owner", &self.inner.owner);

        match &*self.inner.elements.borrow() {
            Some(elements) => debug.field("elements", elements),
            None => debug.field("initialized", &false),
        };

        debug.finish()
    }
}
