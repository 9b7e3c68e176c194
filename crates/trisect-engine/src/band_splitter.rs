//! Three-way band split built from two LR24 crossovers.
//!
//! ```text
//! low  = LR24 low-pass (input, xLow)
//! high = LR24 high-pass(input, xHigh)
//! mid  = input - low - high
//! ```
//!
//! Because the mid band is the residual, `low + mid + high == input`
//! sample for sample whatever the filters do.
//!
//! Coefficients live in [`SplitCoefficients`], shared by every splitter of an
//! engine. Each [`BandSplitter`] owns its own per-channel filter state, so the
//! main path and the detection path never disturb each other.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use trisect_core::{CrossoverCoefficients, CrossoverFilter, finite_or_zero};

/// Coefficients for both crossover points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCoefficients {
    /// Low/mid crossover.
    pub low: CrossoverCoefficients,
    /// Mid/high crossover.
    pub high: CrossoverCoefficients,
}

impl SplitCoefficients {
    /// Creates coefficients for the given sample rate and crossover points.
    pub fn new(sample_rate: f32, low_hz: f32, high_hz: f32) -> Self {
        Self {
            low: CrossoverCoefficients::new(sample_rate, low_hz),
            high: CrossoverCoefficients::new(sample_rate, high_hz),
        }
    }

    /// Sets the sample rate of both crossovers.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.low.prepare(sample_rate);
        self.high.prepare(sample_rate);
    }

    /// Sets both cutoffs, recomputing only those that changed.
    pub fn set_cutoffs(&mut self, low_hz: f32, high_hz: f32) {
        self.low.set_cutoff(low_hz);
        self.high.set_cutoff(high_hz);
    }
}

/// Mutable output slices for one channel of a split.
pub struct BandSlices<'a> {
    /// Low band output.
    pub low: &'a mut [f32],
    /// Mid band output.
    pub mid: &'a mut [f32],
    /// High band output.
    pub high: &'a mut [f32],
}

#[derive(Debug, Clone)]
struct ChannelFilters {
    low: CrossoverFilter,
    high: CrossoverFilter,
}

impl ChannelFilters {
    const fn new() -> Self {
        Self {
            low: CrossoverFilter::lowpass(),
            high: CrossoverFilter::highpass(),
        }
    }
}

/// Per-channel crossover state for one signal path.
///
/// # Example
///
/// ```rust
/// use trisect_engine::{BandSlices, BandSplitter, SplitCoefficients};
///
/// let coeffs = SplitCoefficients::new(48000.0, 120.0, 3000.0);
/// let mut splitter = BandSplitter::new(1);
///
/// let input = [0.3f32; 32];
/// let (mut low, mut mid, mut high) = ([0.0; 32], [0.0; 32], [0.0; 32]);
/// splitter.split(0, &coeffs, &input, BandSlices { low: &mut low, mid: &mut mid, high: &mut high });
///
/// for i in 0..32 {
///     assert!((low[i] + mid[i] + high[i] - input[i]).abs() < 1e-6);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BandSplitter {
    channels: Vec<ChannelFilters>,
}

impl BandSplitter {
    /// Creates a splitter for `channels` channels with cleared state.
    pub fn new(channels: usize) -> Self {
        let mut splitter = Self {
            channels: Vec::new(),
        };
        splitter.resize(channels);
        splitter
    }

    /// Changes the channel count, clearing all state. Allocates.
    pub fn resize(&mut self, channels: usize) {
        self.channels.clear();
        self.channels.resize(channels, ChannelFilters::new());
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Splits one channel's block into three bands.
    ///
    /// Processes `input.len()` samples; each output slice must be at least
    /// that long. Channels beyond the prepared count are ignored. Non-finite
    /// input samples are split as silence so they never reach filter state.
    pub fn split(
        &mut self,
        channel: usize,
        coeffs: &SplitCoefficients,
        input: &[f32],
        out: BandSlices<'_>,
    ) {
        let Some(filters) = self.channels.get_mut(channel) else {
            return;
        };
        let n = input.len();
        let BandSlices { low, mid, high } = out;
        let (low, mid, high) = (&mut low[..n], &mut mid[..n], &mut high[..n]);

        // mid doubles as the sanitized copy of the input until the residual
        for (m, &x) in mid.iter_mut().zip(input) {
            *m = finite_or_zero(x);
        }
        filters.low.process_into(&coeffs.low, mid, low);
        filters.high.process_into(&coeffs.high, mid, high);

        for ((m, &l), &h) in mid.iter_mut().zip(low.iter()).zip(high.iter()) {
            *m = *m - l - h;
        }
    }

    /// Zeroes every filter register.
    pub fn reset(&mut self) {
        for filters in &mut self.channels {
            filters.low.reset();
            filters.high.reset();
        }
    }

    /// Returns true if every filter register is zero.
    pub fn is_reset(&self) -> bool {
        self.channels
            .iter()
            .all(|f| f.low.is_reset() && f.high.is_reset())
    }
}
