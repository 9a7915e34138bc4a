use hydrant_core::schema::{ClassMapping, FieldTy};
use serde::{Deserialize, Serialize};

use std::fmt::Write;

/// The persisted form of a [`Procedure`](super::Procedure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProcedureArtifact {
    pub(crate) class: String,

    /// Summary of the mapping the artifact was generated from
    pub(crate) fingerprint: String,

    pub(crate) steps: Vec<StepArtifact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StepArtifact {
    pub(crate) field: String,
    pub(crate) kind: String,
    pub(crate) keys: Vec<String>,
}

/// Describes every hydration-relevant detail of a mapping, so an artifact
/// built from a different mapping is detected on load.
pub(crate) fn fingerprint(mapping: &ClassMapping) -> String {
    let mut out = String::new();

    for field in &mapping.fields {
        let _ = write!(out, "{}@{}:{}", field.app_name(), field.key(), field.ty.kind_name());

        match &field.ty {
            FieldTy::Primitive(ty) => {
                let _ = write!(out, "<{}>", ty.name());
            }
            ty => {
                if let Some(target) = ty.target() {
                    let _ = write!(out, "<{target}>");
                }
                if let Some(discriminator) = ty.discriminator() {
                    let _ = write!(out, "/{}", discriminator.field);
                }
            }
        }

        for alias in &field.also_load {
            let _ = write!(out, "|{alias}");
        }

        out.push(';');
    }

    out
}
