pub mod document;
pub use document::{Document, Value};

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::Schema;

/// A Result type alias that uses Hydrant's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
