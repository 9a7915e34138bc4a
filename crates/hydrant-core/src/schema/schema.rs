use super::{ClassMapping, ClassName, FieldMapping};
use crate::{document::Value, Error, Result};

use indexmap::IndexMap;

/// Read-only registry of class mappings.
#[derive(Debug, Default)]
pub struct Schema {
    pub mappings: IndexMap<ClassName, ClassMapping>,
}

#[derive(Default)]
pub struct Builder {
    mappings: Vec<ClassMapping>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get a class mapping by name
    pub fn mapping(&self, class: &str) -> Option<&ClassMapping> {
        self.mappings.get(class)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.mappings.contains_key(class)
    }

    pub fn mappings(&self) -> impl Iterator<Item = &ClassMapping> {
        self.mappings.values()
    }

    /// Resolves the concrete class stored in an association field.
    ///
    /// If the field (or, failing that, its target class) has a discriminator
    /// and `raw` is a document carrying a value for it, that value picks the
    /// class, either through the discriminator map or, when the map is empty,
    /// as the class name itself. Otherwise the field's target hint is used.
    pub fn class_name_from_discriminator(
        &self,
        field: &FieldMapping,
        raw: &Value,
    ) -> Result<ClassName> {
        if field.ty.is_primitive() {
            return Err(Error::invalid_schema(format!(
                "field `{}` is not an association",
                field.app_name()
            )));
        }

        let discriminator = field.ty.discriminator().or_else(|| {
            field
                .ty
                .target()
                .and_then(|target| self.mapping(target.as_str()))
                .and_then(|mapping| mapping.discriminator.as_ref())
        });

        if let (Some(discriminator), Some(document)) = (discriminator, raw.as_document()) {
            if let Some(value) = document.get_present(&discriminator.field) {
                let value = value.to_display_string();

                let class = if discriminator.map.is_empty() {
                    Some(value.as_str())
                } else {
                    discriminator.map.get(&value).map(ClassName::as_str)
                };

                return class
                    .and_then(|class| self.mappings.get_key_value(class))
                    .map(|(class, _)| class.clone())
                    .ok_or_else(|| Error::discriminator_resolution(field.app_name(), value));
            }
        }

        field
            .ty
            .target()
            .cloned()
            .ok_or_else(|| Error::unresolved_target(field.app_name()))
    }
}

impl Builder {
    pub fn register(&mut self, mapping: ClassMapping) -> &mut Self {
        self.mappings.push(mapping);
        self
    }

    /// Builds the registry, rejecting mappings that break a field invariant.
    pub fn build(&mut self) -> Result<Schema> {
        let mut mappings = IndexMap::new();

        for mapping in self.mappings.drain(..) {
            let name = mapping.name.clone();
            if mappings.insert(name.clone(), mapping).is_some() {
                return Err(Error::invalid_schema(format!(
                    "class `{name}` registered twice"
                )));
            }
        }

        let schema = Schema { mappings };
        schema.verify()?;
        Ok(schema)
    }
}

impl FromIterator<ClassMapping> for Builder {
    fn from_iter<T: IntoIterator<Item = ClassMapping>>(iter: T) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
        }
    }
}
