//! Preallocated planar scratch storage for the three bands.
//!
//! One contiguous `Vec<f32>` per band, `channels × max_block` samples, channel
//! `c` occupying `[c * max_block, (c + 1) * max_block)`. Sized in
//! [`BandBuffers::resize`] at configuration time and never reallocated by
//! the block path.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::band_splitter::BandSlices;
use crate::params::Band;

/// Scratch band storage for one signal path.
#[derive(Debug, Clone, Default)]
pub struct BandBuffers {
    bands: [Vec<f32>; 3],
    channels: usize,
    max_block: usize,
}

impl BandBuffers {
    /// Allocates storage for `channels` channels of up to `max_block` samples.
    pub fn new(channels: usize, max_block: usize) -> Self {
        let mut buffers = Self::default();
        buffers.resize(channels, max_block);
        buffers
    }

    /// Reallocates for a new layout and zeroes all samples.
    pub fn resize(&mut self, channels: usize, max_block: usize) {
        self.channels = channels;
        self.max_block = max_block;
        for band in &mut self.bands {
            band.clear();
            band.resize(channels * max_block, 0.0);
        }
    }

    /// Channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Maximum block length.
    pub fn max_block(&self) -> usize {
        self.max_block
    }

    fn range(&self, channel: usize, len: usize) -> core::ops::Range<usize> {
        debug_assert!(channel < self.channels && len <= self.max_block);
        let start = channel * self.max_block;
        start..start + len
    }

    /// First `len` samples of one band and channel.
    pub fn band(&self, band: Band, channel: usize, len: usize) -> &[f32] {
        let range = self.range(channel, len);
        &self.bands[band.index()][range]
    }

    /// Mutable first `len` samples of one band and channel.
    pub fn band_mut(&mut self, band: Band, channel: usize, len: usize) -> &mut [f32] {
        let range = self.range(channel, len);
        &mut self.bands[band.index()][range]
    }

    /// Mutable slices of all three bands for one channel, ready for a split.
    pub fn split_slices(&mut self, channel: usize, len: usize) -> BandSlices<'_> {
        let range = self.range(channel, len);
        let [low, mid, high] = &mut self.bands;
        BandSlices {
            low: &mut low[range.clone()],
            mid: &mut mid[range.clone()],
            high: &mut high[range],
        }
    }

    /// Writes `low + mid + high` for one channel into `out`.
    pub fn sum_into(&self, channel: usize, out: &mut [f32]) {
        let range = self.range(channel, out.len());
        let [low, mid, high] = &self.bands;
        let (low, mid, high) = (&low[range.clone()], &mid[range.clone()], &high[range]);
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = low[i] + mid[i] + high[i];
        }
    }
}
