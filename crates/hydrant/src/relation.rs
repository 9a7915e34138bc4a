mod collection;
pub use collection::PersistentCollection;

mod reference;
pub use reference::Reference;
