//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use trisect_core::ParameterInfo;
use trisect_engine::EngineParams;

use crate::error::{ConfigError, FileOp};
use crate::validation::{validate_param, validate_preset};

/// Flat key/value preset for the engine.
///
/// Keys are stable parameter string IDs; absent keys take their defaults.
///
/// # TOML Format
///
/// ```toml
/// name = "Kick Duck Bass"
/// description = "External kick ducks the low band"
///
/// [params]
/// sidechainMode = 1
/// xLowHz = 150
/// thLo = -36
/// raLo = 8
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by string ID.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Create a new empty preset (every parameter at its default).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set one parameter by string ID. Not validated until use.
    pub fn with_param(mut self, id: impl Into<String>, value: f32) -> Self {
        self.params.insert(id.into(), value);
        self
    }

    /// Capture every parameter of a snapshot.
    pub fn from_engine_params(name: impl Into<String>, params: &EngineParams) -> Self {
        let values = EngineParams::descriptors()
            .iter()
            .enumerate()
            .map(|(index, desc)| (desc.string_id.to_string(), params.get_param(index)))
            .collect();
        Self {
            name: name.into(),
            description: None,
            params: values,
        }
    }

    /// Validate and apply over the engine defaults.
    pub fn to_engine_params(&self) -> Result<EngineParams, ConfigError> {
        validate_preset(self)?;
        let mut params = EngineParams::default();
        for (id, &value) in &self.params {
            let index = validate_param(id, value)?;
            params.set_param(index, value);
        }
        Ok(params)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::file(FileOp::Read, path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        tracing::debug!(
            "preset_load: '{}' from {} ({} params)",
            preset.name,
            path.display(),
            preset.params.len()
        );
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::file(FileOp::CreateDir, parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::file(FileOp::Write, path, e))?;
        tracing::debug!("preset_save: '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
