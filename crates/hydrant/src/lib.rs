mod factory;
pub use factory::{Builder, CoercionPolicy, HydratorConfig, HydratorFactory};

mod hydrator;
pub use hydrator::Hydrator;

pub mod object;
pub use object::{FieldValue, Object, ObjectId, ObjectRef, Owner};

mod procedure;
pub use procedure::Procedure;

pub mod relation;
pub use relation::{PersistentCollection, Reference};

mod resolver;
pub use resolver::Resolver;

mod snapshot;
pub use snapshot::Snapshot;

mod unit_of_work;
pub use unit_of_work::UnitOfWork;

pub use hydrant_core::{document, err, schema, Document, Error, Result, Schema, Value};
