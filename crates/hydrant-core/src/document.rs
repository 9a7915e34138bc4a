//! The loosely-typed data model documents are decoded into before hydration.

#[cfg(feature = "bson")]
mod bson;

mod doc;
pub use doc::Document;

mod json;

mod ty;
pub use ty::{CustomType, FieldCoercer, Type};

mod value;
pub use value::Value;
