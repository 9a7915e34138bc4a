mod association;
pub use association::{Discriminator, Embedded, Reference, ReferenceStorage};

mod class;
pub use class::{ClassMapping, ClassName};

mod field;
pub use field::{FieldMapping, FieldName, FieldTy};

#[allow(clippy::module_inception)]
mod schema;
pub use schema::{Builder, Schema};

mod verify;
