use crate::{Object, ObjectId, Snapshot, Value};
use hydrant_core::schema::FieldMapping;

/// Identity and ownership tracking for hydrated objects.
///
/// Hydration reports every embedded object it creates here. Implementations
/// typically keep state behind a `RefCell`, as calls arrive through `&self`.
pub trait UnitOfWork {
    /// Starts tracking `object`. `data` is the snapshot of what hydration
    /// wrote, the baseline for change detection.
    fn register_managed(&self, object: &Object, id: Option<&Value>, data: &Snapshot);

    /// Records that `child` is stored under `key` of `parent` through `field`.
    fn set_parent_association(
        &self,
        child: &Object,
        field: &FieldMapping,
        parent: ObjectId,
        key: &str,
    );
}
