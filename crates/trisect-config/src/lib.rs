//! Preset persistence and validation for the trisect engine.
//!
//! A preset is a flat key/value map from stable parameter string IDs to
//! numbers, stored as TOML. Keys that are absent take their defaults.
//!
//! # Features
//!
//! - **Preset System**: Load and save presets from TOML files
//! - **Validation**: Reject unknown parameter IDs and out-of-range values
//! - **Factory Presets**: Built-in presets for common sidechain tasks
//!
//! # Example
//!
//! ```rust,no_run
//! use trisect_config::{Preset, validate_preset};
//!
//! let preset = Preset::new("Pump")
//!     .with_description("Hard kick ducking")
//!     .with_param("thLo", -40.0)
//!     .with_param("raLo", 10.0);
//! validate_preset(&preset).unwrap();
//!
//! let path = std::env::temp_dir().join("trisect-doc-pump.toml");
//! preset.save(&path).unwrap();
//! let params = Preset::load(&path).unwrap().to_engine_params().unwrap();
//! assert_eq!(params.bands[0].ratio, 10.0);
//! ```

mod error;
mod preset;

/// Preset validation against the engine's parameter descriptors.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::{ConfigError, FileOp};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset, resolve_preset,
};
pub use preset::Preset;
pub use validation::{
    ValidationError, ValidationResult, parse_param_assignment, validate_param, validate_preset,
};
