//! Run configuration.
//!
//! Read once from a JSON file at startup and passed by reference to the
//! assembler. A missing or broken file is not an error: the built-in
//! defaults apply and a warning is logged.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::schedule::ClassMapping;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Show looked up when the config does not name one.
pub const DEFAULT_SHOW_ID: u64 = 11474;

/// What to look up and how to label it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowConfig {
    /// Fox Village show ID.
    pub show_id: u64,

    /// Riders to schedule, matched by name against the roster.
    pub rider_names: Vec<String>,

    /// Class label overrides, in priority order.
    pub class_mapping: ClassMapping,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            show_id: DEFAULT_SHOW_ID,
            rider_names: Vec::new(),
            class_mapping: ClassMapping::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ShowConfig {
    /// Load a config file. Keys that are absent take their default value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a config file, falling back to the defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!(
                    path = %path.display(),
                    show_id = config.show_id,
                    riders = config.rider_names.len(),
                    mappings = config.class_mapping.len(),
                    "loaded configuration"
                );
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Replace the configured rider names, unless `names` is empty.
    pub fn with_rider_names(mut self, names: Vec<String>) -> Self {
        if !names.is_empty() {
            self.rider_names = names;
        }
        self
    }
}
