//! Envelope follower for tracking signal amplitude.
//!
//! Drives the per-band gain computers: each band and channel owns one
//! follower, fed from the matching detection-band sample.

use crate::math::{finite_or_zero, ms_to_coefficient};

/// Peak envelope follower with asymmetric attack/release smoothing.
///
/// One-pole smoother on the rectified input:
///
/// ```text
/// x     = |input|
/// coeff = x > state ? attack : release
/// state = (1 - coeff) * x + coeff * state
/// ```
///
/// With `attack < release` the follower rises faster than it falls, the
/// usual peak-detector behavior. The level persists across blocks; only
/// [`reset`](Self::reset) clears it.
///
/// # Example
///
/// ```rust
/// use trisect_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::new(48000.0);
/// env.set_times(10.0, 100.0);
///
/// let input_sample = 0.5;
/// let envelope_level = env.process(input_sample);
/// assert!(envelope_level > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current envelope level (linear)
    envelope: f32,
    /// Attack coefficient
    attack_coeff: f32,
    /// Release coefficient
    release_coeff: f32,
    /// Sample rate
    sample_rate: f32,
    /// Attack time in ms (for recalculation)
    attack_ms: f32,
    /// Release time in ms (for recalculation)
    release_ms: f32,
}

impl EnvelopeFollower {
    /// Create a new envelope follower with default attack/release times.
    ///
    /// Defaults:
    /// - Attack: 10ms
    /// - Release: 100ms
    pub fn new(sample_rate: f32) -> Self {
        Self::with_times(sample_rate, 10.0, 100.0)
    }

    /// Create with specified attack and release times.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms,
            release_ms,
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Configure sample rate and times, and clear the accumulated level.
    ///
    /// Called when the processing configuration is (re)established.
    pub fn prepare(&mut self, sample_rate: f32, attack_ms: f32, release_ms: f32) {
        self.sample_rate = sample_rate;
        self.envelope = 0.0;
        self.set_times(attack_ms, release_ms);
    }

    /// Set attack and release times in milliseconds.
    ///
    /// Only the smoothing coefficients change; the accumulated envelope
    /// level is kept so automation never produces a discontinuity.
    /// Negative times are treated as 0 ms (instantaneous).
    pub fn set_times(&mut self, attack_ms: f32, release_ms: f32) {
        self.attack_ms = attack_ms.max(0.0);
        self.release_ms = release_ms.max(0.0);
        self.recalculate_coefficients();
    }

    /// Get current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Get current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Update sample rate and recalculate coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Process a sample and return the current envelope level.
    ///
    /// Returns the envelope amplitude (never negative). Non-finite input
    /// is treated as silence.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input_abs = finite_or_zero(input).abs();

        let coeff = if input_abs > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        self.envelope = (1.0 - coeff) * input_abs + coeff * self.envelope;
        self.envelope
    }

    /// Get current envelope level without processing new input.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = ms_to_coefficient(self.attack_ms, self.sample_rate);
        self.release_coeff = ms_to_coefficient(self.release_ms, self.sample_rate);
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_attack() {
        let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 100.0);

        let mut envelope = 0.0;
        for _ in 0..500 {
            envelope = env.process(1.0);
        }

        assert!(envelope > 0.9, "Envelope should rise, got {}", envelope);
    }

    #[test]
    fn test_non_finite_input_keeps_level_finite() {
        let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 10.0);
        for _ in 0..100 {
            env.process(0.5);
        }
        let before = env.level();

        assert!(env.process(f32::NAN).is_finite());
        assert!(env.process(f32::INFINITY).is_finite());
        assert!(env.level() < before);

        for _ in 0..500 {
            env.process(0.5);
        }
        assert!((env.level() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_envelope_release() {
        let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 10.0);

        for _ in 0..500 {
            env.process(1.0);
        }

        let mut envelope = 0.0;
        for _ in 0..1000 {
            envelope = env.process(0.0);
        }

        // ~2 time constants after the input stops: e^-2 ≈ 0.135
        assert!(envelope < 0.15, "Envelope should fall, got {}", envelope);
    }

    #[test]
    fn test_attack_faster_than_release() {
        let mut rising = EnvelopeFollower::with_times(48000.0, 5.0, 200.0);
        let mut falling = rising.clone();

        // Rise from 0 towards 1 for 240 samples (5ms)
        for _ in 0..240 {
            rising.process(1.0);
        }
        let rise = rising.level();

        // Fall from 1 towards 0 for the same duration
        for _ in 0..48000 {
            falling.process(1.0);
        }
        for _ in 0..240 {
            falling.process(0.0);
        }
        let fall = 1.0 - falling.level();

        assert!(rise > fall, "rise {rise} should exceed fall {fall}");
    }

    #[test]
    fn test_set_times_keeps_level() {
        let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 100.0);
        for _ in 0..1000 {
            env.process(0.8);
        }
        let before = env.level();

        env.set_times(50.0, 500.0);
        assert_eq!(env.level(), before);
        assert_eq!(env.attack_ms(), 50.0);
        assert_eq!(env.release_ms(), 500.0);
    }

    #[test]
    fn test_prepare_clears_level() {
        let mut env = EnvelopeFollower::new(44100.0);
        for _ in 0..100 {
            env.process(1.0);
        }
        env.prepare(48000.0, 10.0, 100.0);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn test_zero_attack_is_instant() {
        let mut env = EnvelopeFollower::with_times(48000.0, 0.0, 100.0);
        assert_eq!(env.process(0.7), 0.7);
    }

    #[test]
    fn test_envelope_follows_amplitude() {
        let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 100.0);

        // Negative input should be rectified
        let level = env.process(-0.5);
        assert!(level > 0.0);
    }

    #[test]
    fn test_envelope_reset() {
        let mut env = EnvelopeFollower::new(48000.0);

        for _ in 0..100 {
            env.process(1.0);
        }

        env.reset();
        assert_eq!(env.level(), 0.0);
    }
}
