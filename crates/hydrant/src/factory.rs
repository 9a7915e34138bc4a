mod builder;
pub use builder::Builder;

mod config;
pub use config::{CoercionPolicy, HydratorConfig};

mod store;
use store::ProcedureStore;

use crate::{Procedure, Result};
use hydrant_core::{schema::ClassName, Error, Schema};

use parking_lot::RwLock;
use std::{collections::HashMap, path::PathBuf, sync::Arc};

/// Builds, caches and hands out one [`Procedure`] per class.
///
/// The cache lives as long as the factory: a class is compiled on first use
/// and the result is reused until [`invalidate`](Self::invalidate) or
/// [`clear`](Self::clear) is called. Share the factory across threads with
/// an `Arc`.
#[derive(Debug)]
pub struct HydratorFactory {
    schema: Arc<Schema>,
    config: HydratorConfig,

    /// Backing store for generated procedures, if configured
    store: Option<ProcedureStore>,

    procedures: RwLock<HashMap<ClassName, Arc<Procedure>>>,
}

impl HydratorFactory {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &HydratorConfig {
        &self.config
    }

    /// Returns the procedure for `class`, building it on first use.
    ///
    /// With a backing store and auto-generation enabled, the procedure is
    /// compiled from the mapping and written to the store; a failed write is
    /// logged and does not fail the call. With auto-generation disabled the
    /// procedure is loaded from the store, and a missing or stale artifact
    /// fails with a mapping-not-found error.
    pub fn procedure(&self, class: &str) -> Result<Arc<Procedure>> {
        if let Some(procedure) = self.procedures.read().get(class) {
            return Ok(procedure.clone());
        }

        let mapping = self
            .schema
            .mapping(class)
            .ok_or_else(|| Error::mapping_not_found(class))?;

        let policy = self.config.on_coercion_error;

        let (procedure, source) = match &self.store {
            None => (Procedure::compile(mapping, policy), "compiled"),
            Some(store) if self.config.auto_generate => {
                let procedure = Procedure::compile(mapping, policy);

                match store.write(&procedure.to_artifact(mapping)) {
                    Ok(path) => {
                        tracing::debug!(%class, path = %path.display(), "generated hydration procedure")
                    }
                    Err(err) => {
                        tracing::warn!(%class, error = %err, "failed to persist hydration procedure")
                    }
                }

                (procedure, "compiled")
            }
            Some(store) => {
                let procedure = store
                    .read(&mapping.name)
                    .and_then(|artifact| Procedure::from_artifact(mapping, artifact, policy))
                    .map_err(|err| err.context(Error::mapping_not_found(class)))?;

                (procedure, "loaded")
            }
        };

        tracing::debug!(
            %class,
            source,
            fields = procedure.fields().len(),
            "built hydration procedure"
        );

        // Another thread may have built the same procedure meanwhile. Both are
        // equivalent; keep whichever landed first.
        let mut procedures = self.procedures.write();
        let procedure = procedures
            .entry(mapping.name.clone())
            .or_insert_with(|| Arc::new(procedure));

        Ok(procedure.clone())
    }

    /// Writes the artifact for `class` to the backing store, replacing any
    /// existing one. Errors are returned, not logged.
    pub fn generate(&self, class: &str) -> Result<PathBuf> {
        let Some(store) = &self.store else {
            hydrant_core::bail!("no procedure directory configured");
        };

        let mapping = self
            .schema
            .mapping(class)
            .ok_or_else(|| Error::mapping_not_found(class))?;

        let procedure = Procedure::compile(mapping, self.config.on_coercion_error);
        store.write(&procedure.to_artifact(mapping))
    }

    /// Writes artifacts for every registered class.
    pub fn generate_all(&self) -> Result<Vec<PathBuf>> {
        self.schema
            .mappings()
            .map(|mapping| self.generate(mapping.name.as_str()))
            .collect()
    }

    /// Drops the cached procedure for `class`. Returns `true` if one was cached.
    pub fn invalidate(&self, class: &str) -> bool {
        self.procedures.write().remove(class).is_some()
    }

    /// Drops every cached procedure.
    pub fn clear(&self) {
        self.procedures.write().clear();
    }

    pub fn is_cached(&self, class: &str) -> bool {
        self.procedures.read().contains_key(class)
    }

    /// Names of the classes with a cached procedure.
    pub fn cached(&self) -> Vec<ClassName> {
        self.procedures.read().keys().cloned().collect()
    }
}
