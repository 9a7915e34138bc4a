use super::{Discriminator, FieldMapping};

use std::{fmt, sync::Arc};

/// Identifies a mapped class.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(Arc<str>);

/// Static description of how a class is stored.
#[derive(Debug, Clone)]
pub struct ClassMapping {
    /// Name of the class
    pub name: ClassName,

    /// Fields in declaration order. Hydration visits them in this order.
    pub fields: Vec<FieldMapping>,

    /// Name of the field holding the document identifier, if any.
    pub identifier: Option<String>,

    /// Discriminator stored in documents of this class hierarchy. Used by
    /// associations targeting this class that declare none of their own.
    pub discriminator: Option<Discriminator>,

    /// True if instances only ever live inside a parent document
    pub embedded: bool,
}

impl ClassName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with namespace separators removed, usable as a file stem.
    pub fn flattened(&self) -> String {
        self.0
            .chars()
            .filter(|ch| !matches!(ch, '\\' | ':' | '.' | '/'))
            .collect()
    }
}

impl ClassMapping {
    pub fn new(name: impl Into<ClassName>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
            identifier: None,
            discriminator: None,
            embedded: false,
        }
    }

    /// Creates a mapping for a class stored inside its parent's document.
    pub fn embedded(name: impl Into<ClassName>) -> Self {
        Self {
            embedded: true,
            ..Self::new(name)
        }
    }

    pub fn discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }

    pub fn field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds `field` and marks it as the identifier.
    pub fn id_field(mut self, field: FieldMapping) -> Self {
        self.identifier = Some(field.name.app_name.clone());
        self.fields.push(field);
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.name.app_name == name)
    }

    pub fn field_by_key(&self, key: &str) -> Option<&FieldMapping> {
        self.fields
            .iter()
            .find(|field| field.name.storage_name() == key)
    }

    pub fn identifier_field(&self) -> Option<&FieldMapping> {
        self.identifier
            .as_deref()
            .and_then(|name| self.field_by_name(name))
    }
}

impl From<&str> for ClassName {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for ClassName {
    fn from(src: String) -> Self {
        Self(src.into())
    }
}

impl From<&ClassName> for ClassName {
    fn from(src: &ClassName) -> Self {
        src.clone()
    }
}

impl PartialEq<str> for ClassName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ClassName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::borrow::Borrow<str> for ClassName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.0)
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ClassName({})", self.0)
    }
}
