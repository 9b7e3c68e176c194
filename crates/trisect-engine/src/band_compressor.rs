//! Per-band hard-knee gain computer.
//!
//! # Signal Flow
//!
//! ```text
//! Detection band → Envelope Follower → dB → Gain Computer → × Main band
//!                                                  ↓
//!                                            Makeup Gain
//! ```
//!
//! The envelope follower does all of the time-domain shaping; the gain
//! computer is a static curve evaluated per sample:
//!
//! ```text
//! env_db = 20·log10(env + 1e-8)
//! over   = env_db - threshold
//! gr_db  = over > 0 ? over - over / ratio : 0
//! gain   = 10^(-gr_db / 20) · 10^(makeup / 20)
//! ```

use trisect_core::{db_to_linear, linear_to_db};

use crate::params::BandParams;

/// Smallest ratio the gain computer accepts.
///
/// Keeps `over / ratio` away from the degenerate 1:1 slope.
pub const MIN_RATIO: f32 = 1.001;

/// Added to the envelope before the dB conversion so silence stays finite.
pub const DETECTOR_EPSILON: f32 = 1e-8;

/// Static gain curve of one band.
///
/// # Example
///
/// ```rust
/// use trisect_engine::{BandCompressor, BandParams};
///
/// let mut comp = BandCompressor::new();
/// comp.configure(&BandParams {
///     threshold_db: -20.0,
///     ratio: 4.0,
///     attack_ms: 10.0,
///     release_ms: 100.0,
///     makeup_db: 0.0,
/// });
///
/// // 8 dB over threshold at 4:1 leaves 2 dB over: 6 dB of reduction
/// assert!((comp.reduction_db(-12.0) - 6.0).abs() < 1e-5);
/// assert_eq!(comp.compute_gain(-30.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandCompressor {
    threshold_db: f32,
    ratio: f32,
    makeup_db: f32,
    makeup_linear: f32,
}

impl BandCompressor {
    /// Creates a compressor with unity settings (0 dB threshold, 1:1, no makeup).
    pub fn new() -> Self {
        let mut comp = Self {
            threshold_db: 0.0,
            ratio: MIN_RATIO,
            makeup_db: 0.0,
            makeup_linear: 1.0,
        };
        comp.configure(&BandParams::unity());
        comp
    }

    /// Applies threshold, ratio and makeup from a band snapshot.
    ///
    /// Ratio is clamped to at least [`MIN_RATIO`]. Attack and release are
    /// not used here; they belong to the envelope followers.
    pub fn configure(&mut self, params: &BandParams) {
        self.threshold_db = params.threshold_db;
        self.ratio = params.ratio.max(MIN_RATIO);
        if params.makeup_db != self.makeup_db {
            self.makeup_db = params.makeup_db;
            self.makeup_linear = db_to_linear(params.makeup_db);
        }
    }

    /// Threshold in dB.
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    /// Effective (clamped) ratio.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Makeup gain as a linear factor.
    pub fn makeup_linear(&self) -> f32 {
        self.makeup_linear
    }

    /// Gain reduction in dB for a detector level (0 or positive).
    #[inline]
    pub fn reduction_db(&self, envelope_db: f32) -> f32 {
        let over = envelope_db - self.threshold_db;
        if over > 0.0 {
            over - over / self.ratio
        } else {
            0.0
        }
    }

    /// Linear gain, makeup included, for a detector level in dB.
    #[inline]
    pub fn compute_gain(&self, envelope_db: f32) -> f32 {
        let reduction_db = self.reduction_db(envelope_db);
        if reduction_db == 0.0 {
            self.makeup_linear
        } else {
            db_to_linear(-reduction_db) * self.makeup_linear
        }
    }

    /// Linear gain for a linear envelope level.
    ///
    /// Returns the gain and the reduction in dB, the latter for metering.
    #[inline]
    pub fn gain_for_envelope(&self, envelope: f32) -> (f32, f32) {
        let envelope_db = linear_to_db(envelope + DETECTOR_EPSILON);
        let reduction_db = self.reduction_db(envelope_db);
        let gain = if reduction_db == 0.0 {
            self.makeup_linear
        } else {
            db_to_linear(-reduction_db) * self.makeup_linear
        };
        (gain, reduction_db)
    }
}

impl Default for BandCompressor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(threshold_db: f32, ratio: f32, makeup_db: f32) -> BandCompressor {
        let mut c = BandCompressor::new();
        c.configure(&BandParams {
            threshold_db,
            ratio,
            attack_ms: 10.0,
            release_ms: 100.0,
            makeup_db,
        });
        c
    }

    #[test]
    fn test_below_threshold_is_makeup_only() {
        let c = comp(-24.0, 4.0, 6.0);
        assert_eq!(c.compute_gain(-60.0), db_to_linear(6.0));
        assert_eq!(c.compute_gain(-24.0), db_to_linear(6.0));
    }

    #[test]
    fn test_reduction_curve() {
        let c = comp(-24.0, 4.0, 0.0);
        // 12 dB over at 4:1: 9 dB reduction
        assert!((c.reduction_db(-12.0) - 9.0).abs() < 1e-5);
        let gain = c.compute_gain(-12.0);
        assert!((linear_to_db(gain) + 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_ratio_clamped() {
        let c = comp(-24.0, 1.0, 0.0);
        assert_eq!(c.ratio(), MIN_RATIO);
        // Near-unity ratio gives almost no reduction
        assert!(c.reduction_db(0.0) < 0.03);

        let c = comp(-24.0, -5.0, 0.0);
        assert_eq!(c.ratio(), MIN_RATIO);
    }

    #[test]
    fn test_silence_is_finite() {
        let c = comp(-60.0, 20.0, 24.0);
        let (gain, reduction) = c.gain_for_envelope(0.0);
        assert!(gain.is_finite());
        assert_eq!(reduction, 0.0);
    }

    #[test]
    fn test_monotonic_above_threshold() {
        let c = comp(-30.0, 8.0, 3.0);
        let mut prev = c.compute_gain(-30.0);
        for step in 1..=60 {
            let gain = c.compute_gain(-30.0 + step as f32 * 0.5);
            assert!(gain <= prev, "gain rose at step {step}");
            prev = gain;
        }
    }

    #[test]
    fn test_gain_for_envelope_matches_compute_gain() {
        let c = comp(-18.0, 3.0, -2.0);
        for &env in &[0.0, 0.01, 0.1, 0.5, 1.0] {
            let (gain, _) = c.gain_for_envelope(env);
            let expected = c.compute_gain(linear_to_db(env + DETECTOR_EPSILON));
            assert_eq!(gain, expected);
        }
    }
}
