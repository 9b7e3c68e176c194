//! Runtime state of one band: its settings, one envelope follower per
//! channel, and the gain computer they drive.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use trisect_core::EnvelopeFollower;

use crate::band_compressor::BandCompressor;
use crate::params::{Band, BandParams};

/// One band of the engine.
///
/// Lives for the lifetime of the engine; only numeric state changes per
/// block.
#[derive(Debug, Clone)]
pub struct BandProcessor {
    band: Band,
    params: BandParams,
    compressor: BandCompressor,
    envelopes: Vec<EnvelopeFollower>,
    /// Largest reduction across channels at the end of the last block (dB, >= 0).
    last_reduction_db: f32,
}

impl BandProcessor {
    /// Creates an unprepared band with the factory defaults for `band`.
    pub fn new(band: Band) -> Self {
        let params = BandParams::default_for(band);
        let mut compressor = BandCompressor::new();
        compressor.configure(&params);
        Self {
            band,
            params,
            compressor,
            envelopes: Vec::new(),
            last_reduction_db: 0.0,
        }
    }

    /// Which band this is.
    pub fn band(&self) -> Band {
        self.band
    }

    /// Currently applied settings.
    pub fn params(&self) -> &BandParams {
        &self.params
    }

    /// Gain computer.
    pub fn compressor(&self) -> &BandCompressor {
        &self.compressor
    }

    /// Allocates one envelope per channel and clears all levels.
    pub fn prepare(&mut self, sample_rate: f32, channels: usize, params: &BandParams) {
        self.params = *params;
        self.compressor.configure(params);
        self.envelopes.clear();
        self.envelopes.resize(
            channels,
            EnvelopeFollower::with_times(sample_rate, params.attack_ms, params.release_ms),
        );
        self.last_reduction_db = 0.0;
    }

    /// Applies a new snapshot.
    ///
    /// Envelope coefficients are recomputed only if attack or release
    /// changed, and accumulated levels are kept.
    pub fn update(&mut self, params: &BandParams) {
        if params.attack_ms != self.params.attack_ms || params.release_ms != self.params.release_ms
        {
            for env in &mut self.envelopes {
                env.set_times(params.attack_ms, params.release_ms);
            }
        }
        self.compressor.configure(params);
        self.params = *params;
    }

    /// Compresses one channel of the main band in place, detecting from the
    /// matching detection band.
    ///
    /// `main` and `detection` must have the same length.
    pub fn process_channel(&mut self, channel: usize, main: &mut [f32], detection: &[f32]) {
        debug_assert_eq!(main.len(), detection.len());
        let Some(env) = self.envelopes.get_mut(channel) else {
            return;
        };

        let mut reduction_db = 0.0;
        for (x, &d) in main.iter_mut().zip(detection.iter()) {
            let (gain, reduction) = self.compressor.gain_for_envelope(env.process(d));
            *x *= gain;
            reduction_db = reduction;
        }

        if channel == 0 || reduction_db > self.last_reduction_db {
            self.last_reduction_db = reduction_db;
        }
    }

    /// Gain reduction at the end of the last block, as non-positive dB.
    pub fn gain_reduction_db(&self) -> f32 {
        -self.last_reduction_db
    }

    /// Envelope level of one channel.
    pub fn envelope(&self, channel: usize) -> Option<f32> {
        self.envelopes.get(channel).map(EnvelopeFollower::level)
    }

    /// Clears all envelope levels and metering.
    pub fn reset(&mut self) {
        for env in &mut self.envelopes {
            env.reset();
        }
        self.last_reduction_db = 0.0;
    }
}
