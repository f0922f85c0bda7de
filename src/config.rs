//! Module configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BindingError;

/// Settings for a [`crate::dispatch::Module`]
///
/// Missing fields in a JSON document fall back to [`ModuleConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Module name
    pub name: String,
    /// Module doc string
    pub doc: String,
    /// Run the second, converting resolution pass
    pub implicit_conversion: bool,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        ModuleConfig {
            name: "hello_bindings".to_string(),
            doc: "Example bindings: functions, classes and numeric buffers".to_string(),
            implicit_conversion: true,
        }
    }
}

impl ModuleConfig {
    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, BindingError> {
        serde_json::from_str(json).map_err(|e| BindingError::Config(e.to_string()))
    }

    /// Read from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BindingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BindingError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String, BindingError> {
        serde_json::to_string_pretty(self).map_err(|e| BindingError::Config(e.to_string()))
    }
}
