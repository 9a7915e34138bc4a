use super::{CoercionPolicy, HydratorConfig, HydratorFactory, ProcedureStore};
use crate::Result;
use hydrant_core::Schema;

use parking_lot::RwLock;
use std::{collections::HashMap, path::PathBuf, sync::Arc};

#[derive(Debug, Default)]
pub struct Builder {
    config: HydratorConfig,
}

impl Builder {
    /// Replaces every setting at once.
    pub fn config(&mut self, config: HydratorConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Persist generated procedures under `dir`.
    pub fn procedure_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.config.procedure_dir = Some(dir.into());
        self
    }

    /// Set the sub-directory used inside the procedure directory
    pub fn namespace(&mut self, namespace: &str) -> &mut Self {
        self.config.namespace = namespace.to_string();
        self
    }

    pub fn auto_generate(&mut self, auto_generate: bool) -> &mut Self {
        self.config.auto_generate = auto_generate;
        self
    }

    pub fn on_coercion_error(&mut self, policy: CoercionPolicy) -> &mut Self {
        self.config.on_coercion_error = policy;
        self
    }

    pub fn build(&self, schema: impl Into<Arc<Schema>>) -> Result<HydratorFactory> {
        let store = match &self.config.procedure_dir {
            Some(dir) => {
                let store = ProcedureStore::new(dir, &self.config.namespace);
                if self.config.auto_generate {
                    store.create()?;
                }
                Some(store)
            }
            None => None,
        };

        Ok(HydratorFactory {
            schema: schema.into(),
            config: self.config.clone(),
            store,
            procedures: RwLock::new(HashMap::new()),
        })
    }
}
