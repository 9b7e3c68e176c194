//! File I/O layer for the trisect engine.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for planar multichannel audio
//! - **Offline processing**: [`OfflineProcessor`] for running the engine over
//!   whole files, optionally keyed by a second (sidechain) file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trisect_engine::{EngineParams, ProcessSpec};
//! use trisect_io::{OfflineProcessor, read_wav, write_wav};
//!
//! let (mut channels, spec) = read_wav("mix.wav")?;
//! let (kick, _) = read_wav("kick.wav")?;
//!
//! let mut processor = OfflineProcessor::new(
//!     ProcessSpec::new(spec.sample_rate as f32, 512, channels.len()).with_sidechain(kick.len()),
//! )?;
//! processor.process(&mut channels, Some(&kick), &EngineParams::default(), |_, _| {})?;
//!
//! write_wav("ducked.wav", &channels, spec)?;
//! ```

mod offline;
mod wav;

pub use offline::{OfflineProcessor, check_sample_rates, fit_length};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

use trisect_engine::EngineError;

/// Error types for file I/O and offline processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Engine configuration or buffer contract error.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Main and sidechain files disagree on sample rate.
    #[error("Sample rate mismatch: main is {main} Hz, sidechain is {sidechain} Hz")]
    SampleRateMismatch {
        /// Main file sample rate.
        main: u32,
        /// Sidechain file sample rate.
        sidechain: u32,
    },

    /// Bit depth other than 16, 24 or 32.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// Channel buffers passed to a writer or processor differ in length.
    #[error("Channel {channel} has {len} samples, expected {expected}")]
    RaggedChannels {
        /// Offending channel index.
        channel: usize,
        /// Its length.
        len: usize,
        /// Length of channel 0.
        expected: usize,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for file I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Checks that all channels have the same length and returns it.
pub(crate) fn common_length(channels: &[Vec<f32>]) -> Result<usize> {
    let expected = channels.first().map_or(0, Vec::len);
    for (channel, samples) in channels.iter().enumerate().skip(1) {
        if samples.len() != expected {
            return Err(Error::RaggedChannels {
                channel,
                len: samples.len(),
                expected,
            });
        }
    }
    Ok(expected)
}
