use super::ClassName;
use indexmap::IndexMap;

/// A field pointing at an independently stored document.
#[derive(Debug, Clone)]
pub struct Reference {
    /// Class used when the raw data carries no discriminator value
    pub target: Option<ClassName>,

    pub discriminator: Option<Discriminator>,

    pub storage: ReferenceStorage,
}

/// How a reference is laid out in the raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceStorage {
    /// A descriptor document: `{ "$ref": ..., "$id": ..., "$db": ... }`
    #[default]
    DbRef,

    /// The raw value is the identifier itself
    Id,
}

/// A field holding documents stored inline in the parent.
#[derive(Debug, Clone)]
pub struct Embedded {
    /// Class used when the raw data carries no discriminator value
    pub target: Option<ClassName>,

    pub discriminator: Option<Discriminator>,
}

/// Picks a concrete class from a value stored alongside the data.
#[derive(Debug, Clone)]
pub struct Discriminator {
    /// Document key holding the discriminator value
    pub field: String,

    /// Discriminator value to class. When empty, the value is the class name.
    pub map: IndexMap<String, ClassName>,
}

impl Reference {
    pub fn new(target: impl Into<ClassName>) -> Self {
        Self {
            target: Some(target.into()),
            discriminator: None,
            storage: ReferenceStorage::DbRef,
        }
    }

    /// A reference whose class always comes from the discriminator.
    pub fn polymorphic(discriminator: Discriminator) -> Self {
        Self {
            target: None,
            discriminator: Some(discriminator),
            storage: ReferenceStorage::DbRef,
        }
    }

    pub fn discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }

    /// Stores the bare identifier instead of a descriptor document.
    pub fn simple(mut self) -> Self {
        self.storage = ReferenceStorage::Id;
        self
    }
}

impl Embedded {
    pub fn new(target: impl Into<ClassName>) -> Self {
        Self {
            target: Some(target.into()),
            discriminator: None,
        }
    }

    pub fn polymorphic(discriminator: Discriminator) -> Self {
        Self {
            target: None,
            discriminator: Some(discriminator),
        }
    }

    pub fn discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }
}

impl Discriminator {
    pub const DEFAULT_FIELD: &'static str = "_class";

    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            map: IndexMap::new(),
        }
    }

    pub fn map(mut self, value: &str, class: impl Into<ClassName>) -> Self {
        self.map.insert(value.to_string(), class.into());
        self
    }
}

impl Default for Discriminator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FIELD)
    }
}
