use super::{Discriminator, Embedded, Reference};
use crate::document::Type;

use std::fmt;

#[derive(Debug, Clone)]
pub struct FieldMapping {
    /// The field name
    pub name: FieldName,

    /// Primitive, reference or embedded
    pub ty: FieldTy,

    /// Legacy document keys tried, in order, when the primary key is absent.
    pub also_load: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FieldName {
    /// Name of the field on the hydrated object
    pub app_name: String,

    /// Document key, when it differs from `app_name`
    pub storage_name: Option<String>,
}

impl FieldName {
    pub fn storage_name(&self) -> &str {
        self.storage_name.as_ref().unwrap_or(&self.app_name)
    }
}

/// The closed set of field shapes.
#[derive(Clone)]
pub enum FieldTy {
    Primitive(Type),
    ReferenceOne(Reference),
    ReferenceMany(Reference),
    EmbedOne(Embedded),
    EmbedMany(Embedded),
}

impl FieldMapping {
    fn new(name: &str, ty: FieldTy) -> Self {
        Self {
            name: FieldName {
                app_name: name.to_string(),
                storage_name: None,
            },
            ty,
            also_load: vec![],
        }
    }

    pub fn primitive(name: &str, ty: Type) -> Self {
        Self::new(name, FieldTy::Primitive(ty))
    }

    pub fn reference_one(name: &str, reference: Reference) -> Self {
        Self::new(name, FieldTy::ReferenceOne(reference))
    }

    pub fn reference_many(name: &str, reference: Reference) -> Self {
        Self::new(name, FieldTy::ReferenceMany(reference))
    }

    pub fn embed_one(name: &str, embedded: Embedded) -> Self {
        Self::new(name, FieldTy::EmbedOne(embedded))
    }

    pub fn embed_many(name: &str, embedded: Embedded) -> Self {
        Self::new(name, FieldTy::EmbedMany(embedded))
    }

    /// Stores the field under `key` instead of its name.
    pub fn storage_name(mut self, key: &str) -> Self {
        self.name.storage_name = Some(key.to_string());
        self
    }

    /// Also loads the field from `key` when the primary key is absent.
    pub fn also_load(mut self, key: &str) -> Self {
        self.also_load.push(key.to_string());
        self
    }

    /// Gets the name on the hydrated object.
    pub fn app_name(&self) -> &str {
        &self.name.app_name
    }

    /// Gets the primary document key.
    pub fn key(&self) -> &str {
        self.name.storage_name()
    }

    /// The primary key followed by every alias, in lookup order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.key()).chain(self.also_load.iter().map(String::as_str))
    }

    pub fn is_association(&self) -> bool {
        !self.ty.is_primitive()
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&Type> {
        match self {
            Self::Primitive(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::ReferenceOne(reference) | Self::ReferenceMany(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<&Embedded> {
        match self {
            Self::EmbedOne(embedded) | Self::EmbedMany(embedded) => Some(embedded),
            _ => None,
        }
    }

    /// The static target class hint of an association.
    pub fn target(&self) -> Option<&super::ClassName> {
        match self {
            Self::Primitive(_) => None,
            Self::ReferenceOne(reference) | Self::ReferenceMany(reference) => {
                reference.target.as_ref()
            }
            Self::EmbedOne(embedded) | Self::EmbedMany(embedded) => embedded.target.as_ref(),
        }
    }

    pub fn discriminator(&self) -> Option<&Discriminator> {
        match self {
            Self::Primitive(_) => None,
            Self::ReferenceOne(reference) | Self::ReferenceMany(reference) => {
                reference.discriminator.as_ref()
            }
            Self::EmbedOne(embedded) | Self::EmbedMany(embedded) => {
                embedded.discriminator.as_ref()
            }
        }
    }

    /// Short name of the shape, used in procedure fingerprints.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "field",
            Self::ReferenceOne(_) => "reference_one",
            Self::ReferenceMany(_) => "reference_many",
            Self::EmbedOne(_) => "embed_one",
            Self::EmbedMany(_) => "embed_many",
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => ty.fmt(fmt),
            Self::ReferenceOne(ty) => fmt.debug_tuple("ReferenceOne").field(ty).finish(),
            Self::ReferenceMany(ty) => fmt.debug_tuple("ReferenceMany").field(ty).finish(),
            Self::EmbedOne(ty) => fmt.debug_tuple("EmbedOne").field(ty).finish(),
            Self::EmbedMany(ty) => fmt.debug_tuple("EmbedMany").field(ty).finish(),
        }
    }
}
