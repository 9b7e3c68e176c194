//! Trisect Engine - three-band sidechain compression
//!
//! This crate assembles the trisect-core primitives into the processing
//! engine:
//!
//! - [`MultibandEngine`] - Splits, compresses per band and recombines
//! - [`BandSplitter`] - Low / mid / high split whose bands sum to the input
//! - [`BandCompressor`] - Hard-knee gain computer of one band
//! - [`EngineParams`] - Plain parameter snapshot read once per block
//! - [`SharedParams`] - Lock-free parameter store for cross-thread updates
//!
//! ## Example
//!
//! ```rust
//! use trisect_engine::{Band, EngineParams, MultibandEngine, ProcessSpec, SharedParams};
//!
//! let shared = SharedParams::new();
//! shared.set_by_id("thLo", -30.0);
//!
//! let mut engine = MultibandEngine::new();
//! engine.prepare(ProcessSpec::new(44100.0, 128, 1))?;
//!
//! let mut block = vec![0.5f32; 128];
//! let no_sidechain: Option<&[&[f32]]> = None;
//! engine.process_block(&mut [block.as_mut_slice()], no_sidechain, &shared.snapshot())?;
//!
//! assert!(engine.gain_reduction_db(Band::Low) <= 0.0);
//! # Ok::<(), trisect_engine::EngineError>(())
//! ```
//!
//! # no_std Support
//!
//! With `default-features = false` the crate builds on `core` + `alloc`.
//! Allocation happens only in `prepare`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod band_compressor;
pub mod band_processor;
pub mod band_splitter;
pub mod buffer;
pub mod engine;
pub mod error;
pub mod params;
pub mod shared;

// Re-export main types at crate root
pub use band_compressor::{BandCompressor, DETECTOR_EPSILON, MIN_RATIO};
pub use band_processor::BandProcessor;
pub use band_splitter::{BandSlices, BandSplitter, SplitCoefficients};
pub use buffer::BandBuffers;
pub use engine::{EngineState, MultibandEngine, ProcessSpec};
pub use error::EngineError;
pub use params::{Band, BandParams, EngineParams, PARAM_COUNT, SidechainMode};
pub use shared::SharedParams;
