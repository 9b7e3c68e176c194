//! Trisect Core - DSP primitives for multiband dynamics
//!
//! This crate provides the building blocks the trisect engine is assembled
//! from, designed for real-time processing with zero allocation in the audio
//! path.
//!
//! # Core Abstractions
//!
//! ## Filters
//!
//! - [`BiquadCoefficients`] / [`BiquadState`] - Second-order sections with
//!   shareable coefficients and per-channel state
//! - [`CrossoverCoefficients`] / [`CrossoverFilter`] - Linkwitz-Riley 24 dB/oct
//!   low-pass and high-pass halves that sum to an allpass
//!
//! ## Dynamics
//!
//! - [`EnvelopeFollower`] - Peak detector with separate attack and release
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`ParamDescriptor`] - Name, range, default, unit and scale of one parameter
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`ms_to_coefficient`],
//!   [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! trisect-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use trisect_core::{CrossoverCoefficients, CrossoverFilter, EnvelopeFollower};
//!
//! let coeffs = CrossoverCoefficients::new(48000.0, 120.0);
//! let mut low = CrossoverFilter::lowpass();
//! let mut env = EnvelopeFollower::with_times(48000.0, 10.0, 120.0);
//!
//! let mut block = [0.5f32; 64];
//! low.process_block(&coeffs, &mut block);
//! for &sample in &block {
//!     env.process(sample);
//! }
//! assert!(env.level() > 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod crossover;
pub mod envelope;
pub mod math;
pub mod param_info;

pub use biquad::{BUTTERWORTH_Q, BiquadCoefficients, BiquadState};
pub use crossover::{
    CrossoverCoefficients, CrossoverFilter, CrossoverKind, MAX_CUTOFF_RATIO, MIN_CUTOFF_HZ,
};
pub use envelope::EnvelopeFollower;
pub use math::{
    TIME_CONSTANT_EPSILON, db_to_linear, finite_or_zero, flush_denormal, hz_to_omega,
    linear_to_db, ms_to_coefficient, ms_to_samples,
};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
