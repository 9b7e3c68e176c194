//! Linkwitz-Riley 24 dB/oct crossover filters.
//!
//! An LR24 low-pass is two identical Butterworth (Q = 1/√2) low-pass
//! sections in cascade; the matching high-pass is two Butterworth
//! high-pass sections at the same cutoff. Summing the two outputs gives an
//! allpass response: flat magnitude and a smooth phase rotation, with both
//! halves in phase at the cutoff (each at -6 dB). This is what makes a
//! band split transparent when the bands are added back together.
//!
//! # Ownership
//!
//! [`CrossoverCoefficients`] carries the cutoff and the derived section
//! coefficients; it is a `Copy` value shared by every filter that runs at
//! that cutoff. [`CrossoverFilter`] owns only delay registers, one instance
//! per channel and per signal path, so two paths running the same cutoff
//! never touch each other's state.
//!
//! ```rust
//! use trisect_core::{CrossoverCoefficients, CrossoverFilter};
//!
//! let coeffs = CrossoverCoefficients::new(48000.0, 200.0);
//! let mut low = CrossoverFilter::lowpass();
//! let mut high = CrossoverFilter::highpass();
//!
//! let x = 0.25;
//! let sum = low.process(&coeffs, x) + high.process(&coeffs, x);
//! assert!(sum.is_finite());
//! ```

use crate::biquad::{BUTTERWORTH_Q, BiquadCoefficients, BiquadState};

/// Lowest cutoff the coefficients accept, in Hz.
pub const MIN_CUTOFF_HZ: f32 = 10.0;

/// Highest cutoff as a fraction of the sample rate (just below Nyquist).
pub const MAX_CUTOFF_RATIO: f32 = 0.49;

/// Shared crossover coefficients for one cutoff frequency.
///
/// Coefficients are recomputed only when the cutoff or sample rate actually
/// changes, so calling [`set_cutoff`](Self::set_cutoff) once per block with
/// an unchanged value costs a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverCoefficients {
    sample_rate: f32,
    cutoff_hz: f32,
    lowpass: BiquadCoefficients,
    highpass: BiquadCoefficients,
}

impl CrossoverCoefficients {
    /// Creates coefficients for the given sample rate and cutoff.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut coeffs = Self {
            sample_rate,
            cutoff_hz: clamp_cutoff(cutoff_hz, sample_rate),
            lowpass: BiquadCoefficients::IDENTITY,
            highpass: BiquadCoefficients::IDENTITY,
        };
        coeffs.recalculate();
        coeffs
    }

    /// Sets the sample rate, recomputing if it changed.
    pub fn prepare(&mut self, sample_rate: f32) {
        if sample_rate != self.sample_rate {
            self.sample_rate = sample_rate;
            self.cutoff_hz = clamp_cutoff(self.cutoff_hz, sample_rate);
            self.recalculate();
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "crossover_prepare: {} Hz at {sample_rate} Hz sample rate",
                self.cutoff_hz
            );
        }
    }

    /// Sets the cutoff frequency in Hz.
    ///
    /// The value is clamped to `[MIN_CUTOFF_HZ, MAX_CUTOFF_RATIO * sample_rate]`.
    /// Returns `true` if the coefficients were recomputed.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) -> bool {
        let cutoff_hz = clamp_cutoff(cutoff_hz, self.sample_rate);
        if cutoff_hz == self.cutoff_hz {
            return false;
        }
        self.cutoff_hz = cutoff_hz;
        self.recalculate();
        true
    }

    /// Current (clamped) cutoff in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Sample rate the coefficients were computed for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Butterworth low-pass section coefficients.
    pub fn lowpass(&self) -> &BiquadCoefficients {
        &self.lowpass
    }

    /// Butterworth high-pass section coefficients.
    pub fn highpass(&self) -> &BiquadCoefficients {
        &self.highpass
    }

    fn recalculate(&mut self) {
        self.lowpass =
            BiquadCoefficients::lowpass(self.cutoff_hz, BUTTERWORTH_Q, self.sample_rate);
        self.highpass =
            BiquadCoefficients::highpass(self.cutoff_hz, BUTTERWORTH_Q, self.sample_rate);
    }
}

fn clamp_cutoff(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let max = (sample_rate * MAX_CUTOFF_RATIO).max(MIN_CUTOFF_HZ);
    if cutoff_hz.is_nan() {
        return MIN_CUTOFF_HZ;
    }
    cutoff_hz.clamp(MIN_CUTOFF_HZ, max)
}

/// Which half of the crossover a filter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverKind {
    /// Content below the cutoff.
    Lowpass,
    /// Content above the cutoff.
    Highpass,
}

/// One channel of an LR24 low-pass or high-pass.
///
/// Holds the delay registers of the two cascaded sections. Coefficients are
/// borrowed per call from a [`CrossoverCoefficients`].
#[derive(Debug, Clone)]
pub struct CrossoverFilter {
    kind: CrossoverKind,
    sections: [BiquadState; 2],
}

impl CrossoverFilter {
    /// Creates a filter of the given kind with cleared state.
    pub const fn new(kind: CrossoverKind) -> Self {
        Self {
            kind,
            sections: [BiquadState::new(), BiquadState::new()],
        }
    }

    /// LR24 low-pass.
    pub const fn lowpass() -> Self {
        Self::new(CrossoverKind::Lowpass)
    }

    /// LR24 high-pass.
    pub const fn highpass() -> Self {
        Self::new(CrossoverKind::Highpass)
    }

    /// Which half this filter produces.
    pub fn kind(&self) -> CrossoverKind {
        self.kind
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, coeffs: &CrossoverCoefficients, input: f32) -> f32 {
        let c = match self.kind {
            CrossoverKind::Lowpass => coeffs.lowpass(),
            CrossoverKind::Highpass => coeffs.highpass(),
        };
        let [first, second] = &mut self.sections;
        let stage = first.process(c, input);
        second.process(c, stage)
    }

    /// Processes a block in place.
    pub fn process_block(&mut self, coeffs: &CrossoverCoefficients, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(coeffs, *sample);
        }
    }

    /// Processes `input` into `output`.
    ///
    /// Processes `min(input.len(), output.len())` samples.
    pub fn process_into(
        &mut self,
        coeffs: &CrossoverCoefficients,
        input: &[f32],
        output: &mut [f32],
    ) {
        debug_assert_eq!(input.len(), output.len());
        for (out, &inp) in output.iter_mut().zip(input.iter()) {
            *out = self.process(coeffs, inp);
        }
    }

    /// Zeroes all delay registers.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }

    /// Returns true if all delay registers are zero.
    pub fn is_reset(&self) -> bool {
        self.sections.iter().all(BiquadState::is_clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    fn sine(freq: f32, len: usize) -> impl Iterator<Item = f32> {
        (0..len).map(move |i| libm::sinf(core::f32::consts::TAU * freq * i as f32 / SR))
    }

    fn steady_state_peak(
        filter: &mut CrossoverFilter,
        coeffs: &CrossoverCoefficients,
        freq: f32,
    ) -> f32 {
        let mut peak = 0.0f32;
        for (i, x) in sine(freq, 48000).enumerate() {
            let y = filter.process(coeffs, x);
            if i > 24000 {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn test_halves_are_minus_6db_at_cutoff() {
        let coeffs = CrossoverCoefficients::new(SR, 1000.0);

        let low = steady_state_peak(&mut CrossoverFilter::lowpass(), &coeffs, 1000.0);
        let high = steady_state_peak(&mut CrossoverFilter::highpass(), &coeffs, 1000.0);

        assert!((low - 0.5).abs() < 0.02, "lowpass at cutoff: {low}");
        assert!((high - 0.5).abs() < 0.02, "highpass at cutoff: {high}");
    }

    #[test]
    fn test_slopes() {
        let coeffs = CrossoverCoefficients::new(SR, 500.0);

        // Two octaves above cutoff: ~-48 dB for a 24 dB/oct slope
        let low = steady_state_peak(&mut CrossoverFilter::lowpass(), &coeffs, 2000.0);
        assert!(low < 0.01, "lowpass should attenuate 2 kHz, got {low}");

        let high = steady_state_peak(&mut CrossoverFilter::highpass(), &coeffs, 125.0);
        assert!(high < 0.01, "highpass should attenuate 125 Hz, got {high}");
    }

    #[test]
    fn test_sum_is_allpass() {
        // The impulse response of an allpass has unit energy.
        let coeffs = CrossoverCoefficients::new(SR, 300.0);
        let mut low = CrossoverFilter::lowpass();
        let mut high = CrossoverFilter::highpass();

        let mut energy = 0.0f64;
        for i in 0..16384 {
            let x = if i == 0 { 1.0 } else { 0.0 };
            let y = low.process(&coeffs, x) + high.process(&coeffs, x);
            energy += f64::from(y) * f64::from(y);
        }

        assert!((energy - 1.0).abs() < 1e-3, "allpass energy: {energy}");
    }

    #[test]
    fn test_set_cutoff_recomputes_only_on_change() {
        let mut coeffs = CrossoverCoefficients::new(SR, 120.0);
        assert!(!coeffs.set_cutoff(120.0));
        assert!(coeffs.set_cutoff(250.0));
        assert_eq!(coeffs.cutoff_hz(), 250.0);
        assert_eq!(*coeffs.lowpass(), BiquadCoefficients::lowpass(250.0, BUTTERWORTH_Q, SR));
    }

    #[test]
    fn test_cutoff_clamped_below_nyquist() {
        let mut coeffs = CrossoverCoefficients::new(SR, 100_000.0);
        assert!(coeffs.cutoff_hz() <= SR * MAX_CUTOFF_RATIO);

        coeffs.set_cutoff(f32::NAN);
        assert_eq!(coeffs.cutoff_hz(), MIN_CUTOFF_HZ);

        coeffs.set_cutoff(-5.0);
        assert_eq!(coeffs.cutoff_hz(), MIN_CUTOFF_HZ);
    }

    #[test]
    fn test_prepare_tracks_sample_rate() {
        let mut coeffs = CrossoverCoefficients::new(44100.0, 3000.0);
        coeffs.prepare(96000.0);
        assert_eq!(coeffs.sample_rate(), 96000.0);
        assert_eq!(coeffs, CrossoverCoefficients::new(96000.0, 3000.0));
    }

    #[test]
    fn test_reset_clears_state() {
        let coeffs = CrossoverCoefficients::new(SR, 1000.0);
        let mut filter = CrossoverFilter::highpass();
        for x in sine(440.0, 64) {
            filter.process(&coeffs, x);
        }
        assert!(!filter.is_reset());

        filter.reset();
        assert!(filter.is_reset());
        assert_eq!(filter.kind(), CrossoverKind::Highpass);
    }

    #[test]
    fn test_block_matches_per_sample() {
        let coeffs = CrossoverCoefficients::new(SR, 800.0);
        let input: [f32; 64] = core::array::from_fn(|i| libm::sinf(i as f32 * 0.3));

        let mut per_sample = CrossoverFilter::lowpass();
        let expected: [f32; 64] = core::array::from_fn(|i| per_sample.process(&coeffs, input[i]));

        let mut block = CrossoverFilter::lowpass();
        let mut buffer = input;
        block.process_block(&coeffs, &mut buffer);

        assert_eq!(buffer, expected);
    }
}
