use crate::Result;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings applied when a [`HydratorFactory`](crate::HydratorFactory) is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydratorConfig {
    /// Directory where generated procedures are persisted. `None` keeps
    /// procedures in memory only.
    pub procedure_dir: Option<PathBuf>,

    /// Sub-directory of `procedure_dir` holding this factory's artifacts
    pub namespace: String,

    /// Regenerate artifacts from the mappings instead of trusting the ones
    /// already on disk
    pub auto_generate: bool,

    /// What to do when a scalar value cannot be coerced
    pub on_coercion_error: CoercionPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Fail the whole hydration call
    #[default]
    Abort,

    /// Leave the field unset and log a warning
    Skip,
}

impl HydratorConfig {
    pub const DEFAULT_NAMESPACE: &'static str = "Hydrators";

    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }
}

impl Default for HydratorConfig {
    fn default() -> Self {
        Self {
            procedure_dir: None,
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            auto_generate: true,
            on_coercion_error: CoercionPolicy::Abort,
        }
    }
}
