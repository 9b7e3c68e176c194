//! Three-band sidechain compressor.
//!
//! # Signal Flow
//!
//! ```text
//!              ┌─ low ──► × gain(low env)  ─┐
//! main ──split─┼─ mid ──► × gain(mid env)  ─┼─► Σ ─► main (in place)
//!              └─ high ─► × gain(high env) ─┘
//!                              ▲
//! detect ─split─ low/mid/high ─┘   (sidechain bus, or main when unavailable)
//! ```
//!
//! The main path and the detection path each own a [`BandSplitter`]; both
//! read the same [`SplitCoefficients`], so self-keyed detection sees exactly
//! the bands being compressed.
//!
//! # Lifecycle
//!
//! ```text
//! Unconfigured ──prepare──► Configured ──process_block──► Processing
//!                               ▲                              │
//!                               └────────── reset ─────────────┘
//! ```
//!
//! All allocation happens in [`MultibandEngine::prepare`]. The block path
//! never allocates, locks or fails on numeric input.

use crate::band_processor::BandProcessor;
use crate::band_splitter::{BandSplitter, SplitCoefficients};
use crate::buffer::BandBuffers;
use crate::error::EngineError;
use crate::params::{Band, EngineParams, SidechainMode};

/// Processing configuration fixed between two `prepare` calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block `process_block` will be given.
    pub max_block_size: usize,
    /// Main channel count.
    pub channels: usize,
    /// Sidechain channel count: 0 (no bus), 1 (mono key for every channel)
    /// or equal to `channels`.
    pub sidechain_channels: usize,
}

impl ProcessSpec {
    /// Configuration without a sidechain bus.
    pub fn new(sample_rate: f32, max_block_size: usize, channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            channels,
            sidechain_channels: 0,
        }
    }

    /// Sets the sidechain channel count.
    pub fn with_sidechain(mut self, sidechain_channels: usize) -> Self {
        self.sidechain_channels = sidechain_channels;
        self
    }

    /// Checks the configuration without touching any engine.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(self.sample_rate));
        }
        if self.max_block_size == 0 {
            return Err(EngineError::InvalidBlockSize);
        }
        if self.channels == 0 {
            return Err(EngineError::NoChannels);
        }
        match self.sidechain_channels {
            0 | 1 => Ok(()),
            n if n == self.channels => Ok(()),
            n => Err(EngineError::UnsupportedSidechainLayout {
                channels: self.channels,
                sidechain_channels: n,
            }),
        }
    }
}

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No successful `prepare` yet.
    Unconfigured,
    /// Prepared (or reset), no block processed since.
    Configured,
    /// At least one block processed since the last prepare or reset.
    Processing,
}

/// Three-band sidechain compression engine.
///
/// # Example
///
/// ```rust
/// use trisect_engine::{EngineParams, MultibandEngine, ProcessSpec};
///
/// let mut engine = MultibandEngine::new();
/// engine.prepare(ProcessSpec::new(48000.0, 256, 2).with_sidechain(1)).unwrap();
///
/// let mut left = vec![0.25f32; 256];
/// let mut right = vec![0.25f32; 256];
/// let kick = vec![0.9f32; 256];
///
/// let mut main = [left.as_mut_slice(), right.as_mut_slice()];
/// let sidechain = [kick.as_slice()];
/// engine
///     .process_block(&mut main, Some(&sidechain[..]), &EngineParams::default())
///     .unwrap();
///
/// assert!(engine.sidechain_engaged());
/// ```
#[derive(Debug, Clone)]
pub struct MultibandEngine {
    state: EngineState,
    spec: ProcessSpec,
    params: EngineParams,
    coeffs: SplitCoefficients,
    main_splitter: BandSplitter,
    detect_splitter: BandSplitter,
    main_bands: BandBuffers,
    detect_bands: BandBuffers,
    bands: [BandProcessor; 3],
    sidechain_engaged: bool,
}

impl MultibandEngine {
    /// Creates an unconfigured engine holding the default parameters.
    pub fn new() -> Self {
        let params = EngineParams::default();
        Self {
            state: EngineState::Unconfigured,
            spec: ProcessSpec::new(48000.0, 0, 0),
            coeffs: SplitCoefficients::new(
                48000.0,
                params.crossover_low_hz,
                params.crossover_high_hz,
            ),
            params,
            main_splitter: BandSplitter::new(0),
            detect_splitter: BandSplitter::new(0),
            main_bands: BandBuffers::default(),
            detect_bands: BandBuffers::default(),
            bands: Band::ALL.map(BandProcessor::new),
            sidechain_engaged: false,
        }
    }

    /// Establishes a processing configuration.
    ///
    /// Validates `spec`, then allocates filters, envelopes and scratch
    /// buffers and clears all state. On error the engine keeps its previous
    /// configuration and state.
    pub fn prepare(&mut self, spec: ProcessSpec) -> Result<(), EngineError> {
        if let Err(err) = spec.validate() {
            #[cfg(feature = "tracing")]
            tracing::warn!("engine_prepare: rejected {spec:?}: {err}");
            return Err(err);
        }

        self.spec = spec;
        self.coeffs.prepare(spec.sample_rate);
        self.coeffs
            .set_cutoffs(self.params.crossover_low_hz, self.params.crossover_high_hz);

        self.main_splitter.resize(spec.channels);
        self.detect_splitter.resize(spec.channels);
        self.main_bands.resize(spec.channels, spec.max_block_size);
        self.detect_bands.resize(spec.channels, spec.max_block_size);

        for (band, params) in self.bands.iter_mut().zip(self.params.bands.iter()) {
            band.prepare(spec.sample_rate, spec.channels, params);
        }

        self.sidechain_engaged = false;
        self.state = EngineState::Configured;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "engine_prepare: {} Hz, {} samples max, {} ch, {} sidechain ch",
            spec.sample_rate,
            spec.max_block_size,
            spec.channels,
            spec.sidechain_channels
        );
        Ok(())
    }

    /// Zeroes all filter and envelope state without reallocating.
    ///
    /// Meant for stream restarts. No effect on an unconfigured engine.
    pub fn reset(&mut self) {
        if self.state == EngineState::Unconfigured {
            return;
        }
        self.main_splitter.reset();
        self.detect_splitter.reset();
        for band in &mut self.bands {
            band.reset();
        }
        self.sidechain_engaged = false;
        self.state = EngineState::Configured;

        #[cfg(feature = "tracing")]
        tracing::debug!("engine_reset");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Active configuration, if prepared.
    pub fn spec(&self) -> Option<&ProcessSpec> {
        (self.state != EngineState::Unconfigured).then_some(&self.spec)
    }

    /// Parameters applied by the last processed (non-bypassed) block.
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Processing latency. The engine has no look-ahead.
    pub fn latency_samples(&self) -> usize {
        0
    }

    /// Gain reduction of `band` at the end of the last block, in dB (<= 0).
    ///
    /// Largest reduction across channels.
    pub fn gain_reduction_db(&self, band: Band) -> f32 {
        self.bands[band.index()].gain_reduction_db()
    }

    /// Whether the last processed block detected from the sidechain bus.
    pub fn sidechain_engaged(&self) -> bool {
        self.sidechain_engaged
    }

    /// Envelope level of one band and channel.
    pub fn envelope(&self, band: Band, channel: usize) -> Option<f32> {
        self.bands[band.index()].envelope(channel)
    }

    /// Processes one block in place.
    ///
    /// `main` holds one slice per channel, all of the same length (at most
    /// the prepared maximum). `sidechain`, when given, holds the sidechain
    /// bus channels; it is used only if external detection is selected and
    /// its shape matches the prepared layout, otherwise detection falls back
    /// to the main signal.
    ///
    /// With `params.bypass` set the buffer is left untouched and no state
    /// changes.
    pub fn process_block<M, S>(
        &mut self,
        main: &mut [M],
        sidechain: Option<&[S]>,
        params: &EngineParams,
    ) -> Result<(), EngineError>
    where
        M: AsMut<[f32]>,
        S: AsRef<[f32]>,
    {
        if self.state == EngineState::Unconfigured {
            return Err(EngineError::NotPrepared);
        }
        if main.len() != self.spec.channels {
            return Err(EngineError::ChannelMismatch {
                expected: self.spec.channels,
                actual: main.len(),
            });
        }
        let n = main[0].as_mut().len();
        for (channel, buf) in main.iter_mut().enumerate().skip(1) {
            let len = buf.as_mut().len();
            if len != n {
                return Err(EngineError::RaggedBuffer {
                    channel,
                    len,
                    expected: n,
                });
            }
        }
        if n > self.spec.max_block_size {
            return Err(EngineError::BlockTooLarge {
                len: n,
                max: self.spec.max_block_size,
            });
        }

        if params.bypass {
            return Ok(());
        }

        let params = params.clamped();
        self.coeffs
            .set_cutoffs(params.crossover_low_hz, params.crossover_high_hz);

        let external = match sidechain {
            Some(sc) if params.sidechain_mode == SidechainMode::External => {
                self.sidechain_usable(sc, n).then_some(sc)
            }
            _ => None,
        };
        self.sidechain_engaged = external.is_some();

        let channels = self.spec.channels;
        for ch in 0..channels {
            let input = main[ch].as_mut();
            self.main_splitter.split(
                ch,
                &self.coeffs,
                input,
                self.main_bands.split_slices(ch, n),
            );

            let source = match external {
                Some(sc) => &sc[ch.min(sc.len() - 1)].as_ref()[..n],
                None => &*input,
            };
            self.detect_splitter.split(
                ch,
                &self.coeffs,
                source,
                self.detect_bands.split_slices(ch, n),
            );
        }

        for (band, band_params) in self.bands.iter_mut().zip(params.bands.iter()) {
            band.update(band_params);
        }

        for band in &mut self.bands {
            let which = band.band();
            for ch in 0..channels {
                let detection = self.detect_bands.band(which, ch, n);
                let target = self.main_bands.band_mut(which, ch, n);
                band.process_channel(ch, target, detection);
            }
        }

        for (ch, out) in main.iter_mut().enumerate() {
            self.main_bands.sum_into(ch, out.as_mut());
        }

        self.params = params;
        self.state = EngineState::Processing;
        Ok(())
    }

    fn sidechain_usable<S: AsRef<[f32]>>(&self, sidechain: &[S], n: usize) -> bool {
        self.spec.sidechain_channels > 0
            && sidechain.len() == self.spec.sidechain_channels
            && sidechain.iter().all(|c| c.as_ref().len() >= n)
    }
}

impl Default for MultibandEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BandParams;

    const SR: f32 = 48000.0;
    const NO_SC: Option<&[&[f32]]> = None;

    fn sine(freq: f32, amp: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| amp * libm::sinf(core::f32::consts::TAU * freq * i as f32 / SR))
            .collect()
    }

    fn prepared(channels: usize, sidechain: usize) -> MultibandEngine {
        let mut engine = MultibandEngine::new();
        engine
            .prepare(ProcessSpec::new(SR, 1024, channels).with_sidechain(sidechain))
            .unwrap();
        engine
    }

    #[test]
    fn test_spec_validation() {
        assert!(ProcessSpec::new(SR, 512, 2).validate().is_ok());
        assert!(ProcessSpec::new(SR, 512, 2).with_sidechain(1).validate().is_ok());
        assert!(ProcessSpec::new(SR, 512, 2).with_sidechain(2).validate().is_ok());
        assert_eq!(
            ProcessSpec::new(SR, 512, 2).with_sidechain(3).validate(),
            Err(EngineError::UnsupportedSidechainLayout {
                channels: 2,
                sidechain_channels: 3
            })
        );
        assert_eq!(
            ProcessSpec::new(0.0, 512, 2).validate(),
            Err(EngineError::InvalidSampleRate(0.0))
        );
        assert_eq!(
            ProcessSpec::new(SR, 0, 2).validate(),
            Err(EngineError::InvalidBlockSize)
        );
        assert_eq!(
            ProcessSpec::new(SR, 512, 0).validate(),
            Err(EngineError::NoChannels)
        );
    }

    #[test]
    fn test_state_machine() {
        let mut engine = MultibandEngine::new();
        assert_eq!(engine.state(), EngineState::Unconfigured);
        assert!(engine.spec().is_none());

        let mut buf = vec![0.0f32; 64];
        let err = engine.process_block(&mut [buf.as_mut_slice()], NO_SC, &EngineParams::default());
        assert_eq!(err, Err(EngineError::NotPrepared));

        engine.prepare(ProcessSpec::new(SR, 64, 1)).unwrap();
        assert_eq!(engine.state(), EngineState::Configured);

        engine
            .process_block(&mut [buf.as_mut_slice()], NO_SC, &EngineParams::default())
            .unwrap();
        assert_eq!(engine.state(), EngineState::Processing);

        engine.reset();
        assert_eq!(engine.state(), EngineState::Configured);
    }

    #[test]
    fn test_failed_prepare_keeps_configuration() {
        let mut engine = prepared(2, 0);
        let bad = ProcessSpec::new(SR, 1024, 2).with_sidechain(5);
        assert!(engine.prepare(bad).is_err());
        assert_eq!(engine.state(), EngineState::Configured);
        assert_eq!(engine.spec().map(|s| s.channels), Some(2));
    }

    #[test]
    fn test_contract_errors() {
        let mut engine = prepared(2, 0);
        let params = EngineParams::default();

        let mut a = vec![0.0f32; 2048];
        let mut b = vec![0.0f32; 2048];
        assert_eq!(
            engine.process_block(&mut [a.as_mut_slice(), b.as_mut_slice()], NO_SC, &params),
            Err(EngineError::BlockTooLarge { len: 2048, max: 1024 })
        );

        assert_eq!(
            engine.process_block(&mut [&mut a[..16]], NO_SC, &params),
            Err(EngineError::ChannelMismatch { expected: 2, actual: 1 })
        );

        assert_eq!(
            engine.process_block(&mut [&mut a[..16], &mut b[..8]], NO_SC, &params),
            Err(EngineError::RaggedBuffer { channel: 1, len: 8, expected: 16 })
        );
    }

    #[test]
    fn test_bypass_is_bit_exact() {
        let mut engine = prepared(1, 0);
        let input = sine(440.0, 0.9, 512);
        let mut buf = input.clone();
        let params = EngineParams {
            bypass: true,
            ..EngineParams::default()
        };

        engine.process_block(&mut [buf.as_mut_slice()], NO_SC, &params).unwrap();
        assert_eq!(buf, input);
        assert_eq!(engine.state(), EngineState::Configured);
        assert_eq!(engine.envelope(Band::Low, 0), Some(0.0));
    }

    #[test]
    fn test_unity_settings_reconstruct_input() {
        let mut engine = prepared(1, 0);
        let params = EngineParams {
            bands: [BandParams::unity(); 3],
            ..EngineParams::default()
        };
        let input = sine(1000.0, 0.5, 1024);
        let mut buf = input.clone();
        engine.process_block(&mut [buf.as_mut_slice()], NO_SC, &params).unwrap();

        for (y, x) in buf.iter().zip(input.iter()) {
            assert!((y - x).abs() <= 1e-5 * x.abs().max(1.0), "{y} vs {x}");
        }
    }

    #[test]
    fn test_mono_sidechain_broadcasts() {
        let mut engine = prepared(2, 1);
        let params = EngineParams::default();
        let mut left = sine(200.0, 0.1, 1024);
        let mut right = left.clone();
        let key = vec![0.9f32; 1024];

        engine
            .process_block(
                &mut [left.as_mut_slice(), right.as_mut_slice()],
                Some(&[key.as_slice()][..]),
                &params,
            )
            .unwrap();

        assert!(engine.sidechain_engaged());
        assert_eq!(left, right);
        assert!(engine.gain_reduction_db(Band::Low) < -1.0);
    }

    #[test]
    fn test_mismatched_sidechain_falls_back() {
        let mut engine = prepared(2, 2);
        let mut left = sine(200.0, 0.1, 256);
        let mut right = left.clone();
        let key = vec![0.9f32; 256];

        // Three channels where two were prepared
        engine
            .process_block(
                &mut [left.as_mut_slice(), right.as_mut_slice()],
                Some(&[key.as_slice(), key.as_slice(), key.as_slice()][..]),
                &EngineParams::default(),
            )
            .unwrap();
        assert!(!engine.sidechain_engaged());

        // Too short
        engine
            .process_block(
                &mut [left.as_mut_slice(), right.as_mut_slice()],
                Some(&[&key[..10], &key[..10]][..]),
                &EngineParams::default(),
            )
            .unwrap();
        assert!(!engine.sidechain_engaged());
    }

    #[test]
    fn test_self_mode_ignores_sidechain() {
        let mut engine = prepared(1, 1);
        let mut buf = sine(200.0, 0.1, 256);
        let key = vec![0.9f32; 256];
        let params = EngineParams {
            sidechain_mode: SidechainMode::SelfKey,
            ..EngineParams::default()
        };
        engine
            .process_block(&mut [buf.as_mut_slice()], Some(&[key.as_slice()][..]), &params)
            .unwrap();
        assert!(!engine.sidechain_engaged());
    }

    #[test]
    fn test_out_of_range_params_are_clamped() {
        let mut engine = prepared(1, 0);
        let mut params = EngineParams::default();
        params.crossover_low_hz = 1.0;
        params.band_mut(Band::Mid).ratio = 0.0;

        let mut buf = sine(300.0, 0.5, 512);
        engine.process_block(&mut [buf.as_mut_slice()], NO_SC, &params).unwrap();
        assert!(buf.iter().all(|x| x.is_finite()));
        assert_eq!(engine.params().crossover_low_hz, 60.0);
        assert_eq!(engine.params().band(Band::Mid).ratio, 1.0);
    }

    #[test]
    fn test_latency_is_zero() {
        assert_eq!(prepared(2, 0).latency_samples(), 0);
    }
}
