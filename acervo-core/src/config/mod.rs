//! Configuration: one struct per subsystem, defaults from [`defaults`],
//! every section independently overridable from TOML.

pub mod defaults;

mod classifier_config;
mod hyde_config;
mod multihop_config;
mod search_config;
mod validation_config;

pub use classifier_config::ClassifierConfig;
pub use hyde_config::HydeConfig;
pub use multihop_config::MultihopConfig;
pub use search_config::SearchConfig;
pub use validation_config::ValidationConfig;

use serde::{Deserialize, Serialize};

use crate::errors::AcervoResult;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AcervoConfig {
    pub search: SearchConfig,
    pub classifier: ClassifierConfig,
    pub multihop: MultihopConfig,
    pub hyde: HydeConfig,
    pub validation: ValidationConfig,
}

impl AcervoConfig {
    /// Parse from TOML. Missing sections and fields take defaults.
    pub fn from_toml_str(raw: &str) -> AcervoResult<Self> {
        Ok(toml::from_str(raw)?)
    }
}
