//! Parameter introspection for discoverable processor parameters.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! let a caller enumerate, describe and set parameters by index without knowing
//! the concrete processor. A generic control surface, the preset layer and the
//! command line all work from the same descriptor list.
//!
//! Each parameter is described by a [`ParamDescriptor`] that also carries:
//!
//! - [`ParamId`]: stable numeric ID for automation and persistence
//! - [`ParamScale`]: normalization curve (linear or power)
//! - [`ParamFlags`]: capability flags (automatable, stepped, ...)
//! - `string_id`: stable textual key used in preset files
//! - `group`: parameter grouping for tree display
//!
//! # Example
//!
//! ```rust
//! use trisect_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Trim", "Trim", -24.0, 24.0, 0.0)
//!                 .with_id(ParamId(1), "trim")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let (0, Some(desc)) = (index, self.param_info(index)) {
//!             self.gain_db = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { gain_db: 0.0 };
//! trim.set_param(0, 40.0);
//! assert_eq!(trim.get_param(0), 24.0);
//! assert_eq!(trim.find_param_by_string_id("trim"), Some(0));
//! ```

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\].
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
///
/// `Power(2.0)` gives the lower half of the range three quarters of the
/// normalized travel, the usual skew for crossover and time controls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// Power curve with the given exponent (> 1.0 favors the low end).
    Power(f32),
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// # Example
///
/// ```rust
/// use trisect_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::NONE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Discrete steps (toggle or enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the instance. Valid indices are `0..param_count()`.
///
/// This trait does not require thread safety; cross-thread parameter
/// transfer goes through an atomic store instead.
pub trait ParameterInfo {
    /// Returns the number of parameters.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`, or `None` if out
    /// of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at `index`.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`.
    ///
    /// Implementations clamp to the descriptor range and ignore out-of-range
    /// indices.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by its stable string ID (exact match).
    fn find_param_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count())
            .find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// `short_name` should be 8 characters or less for small displays.
///
/// # Example
///
/// ```rust
/// use trisect_core::{ParamDescriptor, ParamId, ParamScale};
///
/// let attack = ParamDescriptor::time_ms("Low Attack", "Atk Lo", 0.1, 200.0, 10.0)
///     .with_id(ParamId(7), "atLo")
///     .with_scale(ParamScale::Power(2.0));
///
/// assert_eq!(attack.string_id, "atLo");
/// assert_eq!(attack.clamp(500.0), 200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Low Threshold").
    pub name: &'static str,

    /// Short name for compact displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value on initialization or reset.
    pub default: f32,

    /// Recommended step increment for encoder-style control.
    pub step: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable textual ID used as the preset key. Default: `""` (unassigned).
    pub string_id: &'static str,

    /// Normalization curve. Default: [`ParamScale::Linear`].
    pub scale: ParamScale,

    /// Capability flags. Default: [`ParamFlags::AUTOMATABLE`].
    pub flags: ParamFlags,

    /// Parameter group for tree display (e.g., `"low"`). Empty means top level.
    pub group: &'static str,
}

impl ParamDescriptor {
    const fn base(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Gain or level parameter in decibels (thresholds, makeup).
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Decibels, min, max, default, 0.5)
    }

    /// Time parameter in milliseconds (attack, release).
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Milliseconds, min, max, default, 0.1)
    }

    /// Frequency parameter in Hz (crossover points).
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Hertz, min, max, default, 1.0)
    }

    /// Compression ratio (n:1).
    pub const fn ratio(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Ratio, min, max, default, 0.1)
    }

    /// Two-state switch: 0.0 = off, 1.0 = on.
    pub const fn toggle(name: &'static str, short_name: &'static str, default_on: bool) -> Self {
        let default = if default_on { 1.0 } else { 0.0 };
        let mut desc = Self::base(name, short_name, ParamUnit::None, 0.0, 1.0, default, 1.0);
        desc.flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
        desc
    }

    /// Sets the stable numeric ID and string ID.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trisect_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::toggle("Bypass", "Bypass", false)
    ///     .with_id(ParamId(0), "globalBypass");
    /// assert_eq!(desc.string_id, "globalBypass");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Returns true if this is a stepped (discrete) parameter.
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN maps to the default. Stepped parameters are rounded to the
    /// nearest integer.
    ///
    /// ```rust
    /// use trisect_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Makeup", "Makeup", -24.0, 24.0, 0.0);
    /// assert_eq!(desc.clamp(-100.0), -24.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = if self.is_stepped() {
            libm::roundf(value)
        } else {
            value
        };
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns true if `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Converts a plain value to normalized range (0.0 to 1.0), honoring
    /// [`ParamScale`].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Power(exp) => {
                let linear = (value - self.min) / range;
                libm::powf(linear.max(0.0), 1.0 / exp)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Power(exp) => {
                let curved = libm::powf(normalized.max(0.0), exp);
                self.min + curved * (self.max - self.min)
            }
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB): thresholds, makeup, gain reduction.
    Decibels,

    /// Hertz (Hz): crossover frequencies.
    Hertz,

    /// Milliseconds (ms): attack and release.
    Milliseconds,

    /// Ratio (n:1): compression ratio.
    Ratio,

    /// Dimensionless: switches and modes.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use trisect_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Ratio.suffix(), ":1");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Ratio => ":1",
            ParamUnit::None => "",
        }
    }
}
