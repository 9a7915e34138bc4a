mod artifact;
pub(crate) use artifact::ProcedureArtifact;

mod embed;
pub(crate) use embed::embed;

mod many;

mod reference;
pub(crate) use reference::reference;

use crate::{CoercionPolicy, FieldValue, Hydrator, Object, Result, Snapshot};
use hydrant_core::{
    err,
    schema::{ClassMapping, ClassName, FieldMapping, FieldTy},
    Document, Value,
};

/// A hydration routine specialized for one class.
///
/// Built once per class by the [`HydratorFactory`](crate::HydratorFactory)
/// and never mutated afterwards, so it can be shared freely.
#[derive(Debug)]
pub struct Procedure {
    class: ClassName,
    steps: Vec<Step>,
    on_coercion_error: CoercionPolicy,
}

#[derive(Debug)]
struct Step {
    field: FieldMapping,

    /// Document keys to try, primary key first
    keys: Vec<String>,
}

impl Procedure {
    pub(crate) fn compile(mapping: &ClassMapping, on_coercion_error: CoercionPolicy) -> Self {
        let steps = mapping
            .fields
            .iter()
            .map(|field| Step {
                field: field.clone(),
                keys: field.keys().map(String::from).collect(),
            })
            .collect();

        Self {
            class: mapping.name.clone(),
            steps,
            on_coercion_error,
        }
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    /// The fields visited by this procedure, in order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &FieldMapping> + '_ {
        self.steps.iter().map(|step| &step.field)
    }

    /// Writes every field found in `data` into `object` and returns what was
    /// written.
    pub fn hydrate(
        &self,
        hydrator: &Hydrator,
        object: &mut Object,
        data: &Document,
    ) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();

        for step in &self.steps {
            let raw = step.keys.iter().find_map(|key| data.get_present(key));

            let value = match self.hydrate_field(hydrator, object, &step.field, raw) {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(err) => {
                    return Err(err.context(err!(
                        "hydrating `{}.{}`",
                        self.class,
                        step.field.app_name()
                    )))
                }
            };

            snapshot.insert(step.field.app_name(), value.clone());
            object.set(step.field.app_name(), value);
        }

        Ok(snapshot)
    }

    fn hydrate_field(
        &self,
        hydrator: &Hydrator,
        object: &Object,
        field: &FieldMapping,
        raw: Option<&Value>,
    ) -> Result<Option<FieldValue>> {
        match &field.ty {
            FieldTy::Primitive(ty) => {
                let Some(raw) = raw else {
                    return Ok(None);
                };

                let value = ty.coerce(raw.clone()).map(FieldValue::Value);
                self.skip_on_coercion_error(field, value)
            }
            FieldTy::ReferenceOne(_) => {
                let Some(raw) = raw else {
                    return Ok(None);
                };

                let value = reference(hydrator, field, raw).map(FieldValue::Reference);
                self.skip_on_coercion_error(field, value)
            }
            FieldTy::EmbedOne(_) => raw
                .map(|raw| {
                    embed(hydrator, field, object.id(), field.key(), raw).map(FieldValue::from)
                })
                .transpose(),
            FieldTy::ReferenceMany(_) | FieldTy::EmbedMany(_) => {
                let collection = many::collection(hydrator, object, field, raw)?;
                Ok(Some(FieldValue::Collection(collection)))
            }
        }
    }

    /// Drops a value that failed type coercion when the policy allows it.
    fn skip_on_coercion_error(
        &self,
        field: &FieldMapping,
        value: Result<FieldValue>,
    ) -> Result<Option<FieldValue>> {
        match value {
            Ok(value) => Ok(Some(value)),
            Err(err)
                if err.is_type_conversion() && self.on_coercion_error == CoercionPolicy::Skip =>
            {
                tracing::warn!(
                    class = %self.class,
                    field = field.app_name(),
                    error = %err,
                    "skipping field that failed type coercion"
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub(crate) fn to_artifact(&self, mapping: &ClassMapping) -> ProcedureArtifact {
        ProcedureArtifact {
            class: self.class.to_string(),
            fingerprint: artifact::fingerprint(mapping),
            steps: self
                .steps
                .iter()
                .map(|step| artifact::StepArtifact {
                    field: step.field.app_name().to_string(),
                    kind: step.field.ty.kind_name().to_string(),
                    keys: step.keys.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds a procedure from a persisted artifact.
    ///
    /// The artifact must have been generated from an identical mapping.
    pub(crate) fn from_artifact(
        mapping: &ClassMapping,
        artifact: ProcedureArtifact,
        on_coercion_error: CoercionPolicy,
    ) -> Result<Self> {
        if mapping.name != artifact.class.as_str() {
            hydrant_core::bail!(
                "artifact was generated for `{}`, not `{}`",
                artifact.class,
                mapping.name
            );
        }

        if artifact.fingerprint != artifact::fingerprint(mapping) {
            hydrant_core::bail!("artifact for `{}` is stale", mapping.name);
        }

        let steps = artifact
            .steps
            .into_iter()
            .map(|step| -> Result<Step> {
                let field = mapping.field_by_name(&step.field).ok_or_else(|| {
                    err!("artifact field `{}` is not mapped", step.field)
                })?;

                if field.ty.kind_name() != step.kind {
                    hydrant_core::bail!(
                        "artifact field `{}` is a {}, mapping says {}",
                        step.field,
                        step.kind,
                        field.ty.kind_name()
                    );
                }

                Ok(Step {
                    field: field.clone(),
                    keys: step.keys,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            class: mapping.name.clone(),
            steps,
            on_coercion_error,
        })
    }
}
