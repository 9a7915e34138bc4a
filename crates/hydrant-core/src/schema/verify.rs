use super::{ClassMapping, Schema};
use crate::{Error, Result};

use std::collections::HashSet;

impl Schema {
    pub(crate) fn verify(&self) -> Result<()> {
        for mapping in self.mappings() {
            self.verify_mapping(mapping)
                .map_err(|err| err.context(crate::err!("class `{}`", mapping.name)))?;
        }

        Ok(())
    }

    fn verify_mapping(&self, mapping: &ClassMapping) -> Result<()> {
        let mut names = HashSet::new();
        let mut keys = HashSet::new();

        for field in &mapping.fields {
            if !names.insert(field.app_name()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate field `{}`",
                    field.app_name()
                )));
            }

            if !keys.insert(field.key()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate document key `{}`",
                    field.key()
                )));
            }
        }

        // Aliases are checked once every primary key is known.
        let mut aliases = HashSet::new();

        for field in &mapping.fields {
            for alias in &field.also_load {
                if keys.contains(alias.as_str()) || !aliases.insert(alias.as_str()) {
                    return Err(Error::invalid_schema(format!(
                        "alias `{alias}` of field `{}` collides with another key",
                        field.app_name()
                    )));
                }
            }

            let targets = field.ty.target().into_iter().chain(
                field
                    .ty
                    .discriminator()
                    .into_iter()
                    .flat_map(|discriminator| discriminator.map.values()),
            );

            for target in targets {
                let Some(target_mapping) = self.mapping(target.as_str()) else {
                    return Err(Error::invalid_schema(format!(
                        "field `{}` targets unregistered class `{target}`",
                        field.app_name()
                    )));
                };

                if field.ty.as_embedded().is_some() && !target_mapping.embedded {
                    return Err(Error::invalid_schema(format!(
                        "field `{}` embeds `{target}`, which is not an embedded class",
                        field.app_name()
                    )));
                }
            }

            if field.is_association()
                && field.ty.target().is_none()
                && field.ty.discriminator().is_none()
            {
                return Err(Error::invalid_schema(format!(
                    "field `{}` has neither a target class nor a discriminator",
                    field.app_name()
                )));
            }
        }

        if let Some(discriminator) = &mapping.discriminator {
            for target in discriminator.map.values() {
                if !self.contains(target.as_str()) {
                    return Err(Error::invalid_schema(format!(
                        "discriminator maps to unregistered class `{target}`"
                    )));
                }
            }
        }

        if let Some(identifier) = &mapping.identifier {
            if mapping.field_by_name(identifier).is_none() {
                return Err(Error::invalid_schema(format!(
                    "identifier field `{identifier}` does not exist"
                )));
            }
        }

        Ok(())
    }
}
