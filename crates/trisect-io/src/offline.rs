//! Offline block driver.
//!
//! Runs a [`MultibandEngine`] over whole in-memory files in blocks of the
//! prepared maximum size, the way a host would call it in real time.

use crate::{Error, Result, WavSpec, common_length};
use trisect_engine::{EngineParams, MultibandEngine, ProcessSpec};

/// Drives a [`MultibandEngine`] over planar buffers.
#[derive(Debug)]
pub struct OfflineProcessor {
    engine: MultibandEngine,
    spec: ProcessSpec,
}

impl OfflineProcessor {
    /// Creates and prepares an engine for `spec`.
    pub fn new(spec: ProcessSpec) -> Result<Self> {
        let mut engine = MultibandEngine::new();
        engine.prepare(spec)?;
        Ok(Self { engine, spec })
    }

    /// Processing configuration.
    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }

    /// The underlying engine, for metering.
    pub fn engine(&self) -> &MultibandEngine {
        &self.engine
    }

    /// Processes `main` in place.
    ///
    /// `sidechain` channels are zero-padded or truncated to the length of
    /// `main`. `on_block(done, total)` is called after every block with the
    /// number of frames processed so far.
    pub fn process<F>(
        &mut self,
        main: &mut [Vec<f32>],
        sidechain: Option<&[Vec<f32>]>,
        params: &EngineParams,
        mut on_block: F,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        let total = common_length(main)?;
        let sidechain: Option<Vec<Vec<f32>>> =
            sidechain.map(|channels| channels.iter().map(|c| fit_length(c, total)).collect());

        let block = self.spec.max_block_size;
        let mut start = 0;
        while start < total {
            let end = (start + block).min(total);
            let mut chunk: Vec<&mut [f32]> = main.iter_mut().map(|c| &mut c[start..end]).collect();
            let keys: Option<Vec<&[f32]>> = sidechain
                .as_ref()
                .map(|channels| channels.iter().map(|c| &c[start..end]).collect());

            self.engine
                .process_block(chunk.as_mut_slice(), keys.as_deref(), params)?;

            start = end;
            on_block(start, total);
        }

        tracing::debug!(
            "offline_process: {total} frames, {} ch, sidechain {}",
            main.len(),
            if self.engine.sidechain_engaged() {
                "engaged"
            } else {
                "not engaged"
            }
        );
        Ok(())
    }
}

/// Copies `samples`, zero-padded or truncated to `len`.
pub fn fit_length(samples: &[f32], len: usize) -> Vec<f32> {
    let mut fitted = samples[..samples.len().min(len)].to_vec();
    fitted.resize(len, 0.0);
    fitted
}

/// Fails when the sidechain file does not share the main file's sample rate.
pub fn check_sample_rates(main: &WavSpec, sidechain: &WavSpec) -> Result<()> {
    if main.sample_rate == sidechain.sample_rate {
        Ok(())
    } else {
        Err(Error::SampleRateMismatch {
            main: main.sample_rate,
            sidechain: sidechain.sample_rate,
        })
    }
}
