//! Biquad (bi-quadratic) filter sections.
//!
//! Coefficients and state are separate types: [`BiquadCoefficients`] is a
//! small `Copy` value that many channels can share, while [`BiquadState`]
//! holds one channel's delay registers and is owned by whoever processes
//! that channel.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use crate::math::{flush_denormal, hz_to_omega};
use libm::{cosf, sinf};

/// Q of a second-order Butterworth section (1/√2).
pub const BUTTERWORTH_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Normalized biquad coefficients (a0 = 1).
///
/// Direct Form I difference equation:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficients
    pub b0: f32,
    /// Feedforward coefficient for x[n-1]
    pub b1: f32,
    /// Feedforward coefficient for x[n-2]
    pub b2: f32,
    /// Feedback coefficient for y[n-1]
    pub a1: f32,
    /// Feedback coefficient for y[n-2]
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Builds coefficients from raw cookbook values, normalizing by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Low-pass section (RBJ cookbook).
    ///
    /// # Arguments
    ///
    /// * `frequency` - Cutoff frequency in Hz
    /// * `q` - Q factor ([`BUTTERWORTH_Q`] for a Butterworth response)
    /// * `sample_rate` - Sample rate in Hz
    pub fn lowpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let omega = hz_to_omega(frequency, sample_rate);
        let cos_omega = cosf(omega);
        let alpha = sinf(omega) / (2.0 * q);

        Self::from_raw(
            (1.0 - cos_omega) / 2.0,
            1.0 - cos_omega,
            (1.0 - cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// High-pass section (RBJ cookbook).
    ///
    /// Shares its denominator with [`lowpass`](Self::lowpass) at the same
    /// frequency and Q, which is what lets the two be matched for a
    /// crossover.
    pub fn highpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let omega = hz_to_omega(frequency, sample_rate);
        let cos_omega = cosf(omega);
        let alpha = sinf(omega) / (2.0 * q);

        Self::from_raw(
            (1.0 + cos_omega) / 2.0,
            -(1.0 + cos_omega),
            (1.0 + cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Delay registers of one biquad section for one channel.
#[derive(Debug, Clone, Default)]
pub struct BiquadState {
    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl BiquadState {
    /// Creates zeroed state.
    pub const fn new() -> Self {
        Self {
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample using the given coefficients.
    #[inline]
    pub fn process(&mut self, c: &BiquadCoefficients, input: f32) -> f32 {
        let output = flush_denormal(
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2,
        );

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay registers.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns true if all registers are zero.
    pub fn is_clear(&self) -> bool {
        self.x1 == 0.0 && self.x2 == 0.0 && self.y1 == 0.0 && self.y2 == 0.0
    }
}
