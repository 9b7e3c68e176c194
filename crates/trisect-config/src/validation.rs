//! Parameter and preset validation.
//!
//! Every key must be one of the engine's stable parameter string IDs and
//! every value must be finite and inside the descriptor's range. Unlike the
//! engine, which silently clamps, validation reports the problem.
//!
//! # Example
//!
//! ```rust
//! use trisect_config::{validate_param, ValidationError};
//!
//! assert_eq!(validate_param("raMi", 8.0), Ok(10));
//! assert!(matches!(
//!     validate_param("raMi", 50.0),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use thiserror::Error;
use trisect_engine::EngineParams;

use crate::Preset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Key is not a known parameter ID.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Parameter ID.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// NaN or infinite value.
    #[error("parameter '{0}' is not a finite number")]
    NotFinite(String),

    /// Malformed `id=value` assignment.
    #[error("invalid assignment '{input}': {reason}")]
    InvalidFormat {
        /// The text that failed to parse.
        input: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks one parameter and returns its index.
pub fn validate_param(id: &str, value: f32) -> ValidationResult<usize> {
    let index =
        EngineParams::index_of(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))?;
    let desc = &EngineParams::descriptors()[index];

    if !value.is_finite() {
        return Err(ValidationError::NotFinite(id.to_string()));
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(index)
}

/// Checks every entry of a preset.
///
/// A single problem is returned as-is; several are collected into
/// [`ValidationError::Multiple`].
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = preset
        .params
        .iter()
        .filter_map(|(id, &value)| validate_param(id, value).err())
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Parses and validates an `id=value` assignment, as given on a command
/// line.
///
/// `on`/`off` and `true`/`false` are accepted for toggles.
pub fn parse_param_assignment(input: &str) -> ValidationResult<(usize, f32)> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (id, value_str) = input.split_once('=').ok_or_else(|| invalid("expected id=value"))?;
    let id = id.trim();
    let value_str = value_str.trim();

    let value = match value_str.to_ascii_lowercase().as_str() {
        "on" | "true" => 1.0,
        "off" | "false" => 0.0,
        other => other
            .parse::<f32>()
            .map_err(|_| invalid("value is not a number"))?,
    };

    let index = validate_param(id, value)?;
    Ok((index, value))
}
