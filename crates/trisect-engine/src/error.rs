//! Error types for engine configuration and block-call contract violations.
//!
//! Numeric input never produces an error; only structural problems detected
//! at `prepare` time or cheap shape checks at the top of `process_block` do.

use thiserror::Error;

/// Errors reported by [`MultibandEngine`](crate::MultibandEngine).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineError {
    /// Sample rate is zero, negative or not finite.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// Maximum block size is zero.
    #[error("block size must be greater than zero")]
    InvalidBlockSize,

    /// Main channel count is zero.
    #[error("channel count must be greater than zero")]
    NoChannels,

    /// Sidechain channel count is neither 0, 1, nor the main channel count.
    #[error("unsupported sidechain layout: {sidechain_channels} sidechain channel(s) for {channels} main channel(s)")]
    UnsupportedSidechainLayout {
        /// Main channel count.
        channels: usize,
        /// Requested sidechain channel count.
        sidechain_channels: usize,
    },

    /// `process_block` was called before a successful `prepare`.
    #[error("engine is not prepared")]
    NotPrepared,

    /// Block is longer than the prepared maximum.
    #[error("block of {len} samples exceeds prepared maximum of {max}")]
    BlockTooLarge {
        /// Length of the offending block.
        len: usize,
        /// Prepared maximum block size.
        max: usize,
    },

    /// Main buffer channel count differs from the prepared layout.
    #[error("expected {expected} main channel(s), got {actual}")]
    ChannelMismatch {
        /// Prepared channel count.
        expected: usize,
        /// Channel count of the buffer passed in.
        actual: usize,
    },

    /// Main buffer channels have different lengths.
    #[error("main channel {channel} has {len} samples, expected {expected}")]
    RaggedBuffer {
        /// Offending channel index.
        channel: usize,
        /// Its length.
        len: usize,
        /// Length of channel 0.
        expected: usize,
    },
}
