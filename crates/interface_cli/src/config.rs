//! CLI configuration

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON file holding the person directory
    pub data_file: PathBuf,
    /// Log level or filter directive
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/persons.json"),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `ENROLLMENT_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix("ENROLLMENT"))
    }

    /// Loads configuration from an explicit variable map instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix("ENROLLMENT").source(Some(vars)))
    }

    fn load(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Replaces the data file when a command-line override is given
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}
