use crate::{
    HydratorFactory, Object, ObjectId, Reference, Resolver, Result, Snapshot, UnitOfWork, Value,
};
use hydrant_core::{
    schema::{ClassName, FieldMapping},
    Document, Schema,
};

use std::{cell::RefCell, fmt, rc::Rc, sync::Arc};

/// Hydrates one object graph.
///
/// Binds the process-wide [`HydratorFactory`] to the unit of work and
/// resolver of a single session. Cloning is cheap; lazy references and
/// collections keep a clone so they can finish their work on first access.
#[derive(Clone)]
pub struct Hydrator {
    inner: Rc<Inner>,
}

struct Inner {
    factory: Arc<HydratorFactory>,
    unit_of_work: Rc<dyn UnitOfWork>,
    resolver: Rc<dyn Resolver>,

    /// Embedded objects waiting for the enclosing hydration to succeed, one
    /// batch per nesting level
    staged: RefCell<Vec<Vec<Registration>>>,
}

/// An embedded object and its parent edge, not yet reported to the unit of
/// work.
struct Registration {
    object: Object,
    data: Snapshot,
    field: FieldMapping,
    parent: ObjectId,
    key: String,
}

impl Hydrator {
    pub fn new(
        factory: Arc<HydratorFactory>,
        unit_of_work: Rc<dyn UnitOfWork>,
        resolver: Rc<dyn Resolver>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                factory,
                unit_of_work,
                resolver,
                staged: RefCell::new(vec![]),
            }),
        }
    }

    pub fn factory(&self) -> &Arc<HydratorFactory> {
        &self.inner.factory
    }

    pub fn schema(&self) -> &Schema {
        self.inner.factory.schema()
    }

    pub(crate) fn resolver(&self) -> &dyn Resolver {
        &*self.inner.resolver
    }

    /// Populates `object` from `data` using the procedure of the object's class.
    ///
    /// Returns the fields that were written. Fields whose keys are absent from
    /// `data` are left untouched.
    ///
    /// Embedded objects created along the way reach the unit of work only if
    /// the whole call succeeds.
    pub fn hydrate(&self, object: &mut Object, data: &Document) -> Result<Snapshot> {
        let procedure = self.inner.factory.procedure(object.class().as_str())?;
        self.staged(|| procedure.hydrate(self, object, data))
    }

    /// Runs `f`, holding back embedded registrations until it returns. On
    /// success they move to the enclosing batch, or to the unit of work at the
    /// outermost level. On failure they are dropped.
    pub(crate) fn staged<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.inner.staged.borrow_mut().push(vec![]);
        let result = f();
        let batch = self.inner.staged.borrow_mut().pop().unwrap_or_default();

        if result.is_ok() {
            for registration in batch {
                self.register_embedded(
                    registration.object,
                    registration.data,
                    &registration.field,
                    registration.parent,
                    &registration.key,
                );
            }
        }

        result
    }

    /// Reports an embedded object and its parent edge to the unit of work,
    /// or stages them if a hydration is in progress.
    pub(crate) fn register_embedded(
        &self,
        object: Object,
        data: Snapshot,
        field: &FieldMapping,
        parent: ObjectId,
        key: &str,
    ) {
        if let Some(batch) = self.inner.staged.borrow_mut().last_mut() {
            batch.push(Registration {
                object,
                data,
                field: field.clone(),
                parent,
                key: key.to_string(),
            });
            return;
        }

        let unit_of_work = &*self.inner.unit_of_work;
        unit_of_work.register_managed(&object, None, &data);
        unit_of_work.set_parent_association(&object, field, parent, key);
    }

    /// Returns an unresolved reference to `(class, id)`.
    pub fn get_reference(&self, class: impl Into<ClassName>, id: impl Into<Value>) -> Reference {
        Reference::new(self.clone(), class.into(), id.into())
    }
}

impl fmt::Debug for Hydrator {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Hydrator").finish_non_exhaustive()
    }
}
