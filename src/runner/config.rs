//! Realm configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::runner::ds::error::ClassError;

/// Settings for a new [`Realm`](crate::runner::ds::realm::Realm).
///
/// Expected format:
/// ```toml
/// constructor_extends = true
/// root_name = "Class"
/// global_name = "global"
/// ```
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    /// Initial `constructorExtends` static of the root class, inherited by every
    /// class that does not override it.
    pub constructor_extends: bool,
    /// Label of the root class in diagnostics.
    pub root_name: String,
    /// Label of the registry's global object in diagnostics.
    pub global_name: String,
}

impl RealmConfig {
    pub fn new() -> Self {
        RealmConfig {
            constructor_extends: true,
            root_name: "Class".to_string(),
            global_name: "global".to_string(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ClassError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ClassError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ClassError> {
        toml::from_str(content).map_err(|e| ClassError::Config(e.to_string()))
    }
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self::new()
    }
}
