//! Mathematical utility functions for DSP.
//!
//! Provides the level and time conversions used by the dynamics and
//! crossover code. All functions are allocation-free and suitable for
//! `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Utilities
//!
//! - [`flush_denormal`] - Zero out values in the subnormal range
//! - [`hz_to_omega`] - Frequency to angular frequency
//! - [`ms_to_samples`] - Time conversion
//! - [`ms_to_coefficient`] - One-pole smoothing coefficient from a time constant

use libm::{expf, logf};

/// Floor added to the time-constant denominator of [`ms_to_coefficient`].
///
/// Keeps a 0 ms time constant finite (coefficient 0, i.e. instantaneous).
pub const TIME_CONSTANT_EPSILON: f32 = 1e-6;

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use trisect_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored there, so silence maps to
/// -200 dB rather than `-inf`.
///
/// # Example
/// ```rust
/// use trisect_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// assert!(linear_to_db(0.0).is_finite());
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert frequency in Hz to angular frequency in radians per sample.
#[inline]
pub fn hz_to_omega(freq_hz: f32, sample_rate: f32) -> f32 {
    core::f32::consts::TAU * freq_hz / sample_rate
}

/// Convert milliseconds to samples.
///
/// # Arguments
/// * `ms` - Time in milliseconds
/// * `sample_rate` - Sample rate in Hz
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// One-pole smoothing coefficient for a time constant.
///
/// `coeff = exp(-1 / (sample_rate * ms / 1000 + ε))`. A coefficient of 0
/// follows the input instantly; values close to 1 smooth heavily.
///
/// # Example
/// ```rust
/// use trisect_core::ms_to_coefficient;
///
/// let fast = ms_to_coefficient(1.0, 48000.0);
/// let slow = ms_to_coefficient(100.0, 48000.0);
/// assert!(fast < slow);
/// assert_eq!(ms_to_coefficient(0.0, 48000.0), 0.0);
/// ```
#[inline]
pub fn ms_to_coefficient(ms: f32, sample_rate: f32) -> f32 {
    expf(-1.0 / (ms_to_samples(ms, sample_rate) + TIME_CONSTANT_EPSILON))
}

/// Flush subnormal-range values to zero.
///
/// Filter and envelope state decaying towards silence would otherwise spend
/// many samples in the subnormal range, which is slow on most CPUs.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Replace NaN and infinities with silence.
///
/// Applied to samples before they enter recursive filter or envelope state,
/// where a single non-finite value would otherwise persist indefinitely.
#[inline]
pub fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() { x } else { 0.0 }
}
