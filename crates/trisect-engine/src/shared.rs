//! Wait-free parameter transfer between a control thread and the audio thread.
//!
//! Each parameter is stored as an `AtomicU32` holding the f32 bit pattern.
//! Writers clamp to the descriptor range and store with `Release`; the audio
//! thread calls [`SharedParams::snapshot`] once per block, one `Acquire` load
//! per field. Fields are individually atomic; a snapshot taken while a writer
//! is halfway through [`SharedParams::store`] may mix old and new values.

use core::sync::atomic::{AtomicU32, Ordering};

use trisect_core::ParameterInfo;

use crate::params::{EngineParams, PARAM_COUNT};

/// Lock-free parameter store shared between threads.
///
/// Wrap in an `Arc` to hand one end to the UI or automation source and the
/// other to the audio callback.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use trisect_engine::{Band, SharedParams};
///
/// let shared = Arc::new(SharedParams::new());
/// let writer = Arc::clone(&shared);
///
/// std::thread::spawn(move || {
///     writer.set_by_id("thHi", -36.0);
/// })
/// .join()
/// .unwrap();
///
/// let snapshot = shared.snapshot();
/// assert_eq!(snapshot.band(Band::High).threshold_db, -36.0);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; PARAM_COUNT],
}

impl SharedParams {
    /// Creates a store holding the default parameters.
    pub fn new() -> Self {
        Self::from_params(&EngineParams::default())
    }

    /// Creates a store holding `params`.
    pub fn from_params(params: &EngineParams) -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(params.get_param(i).to_bits())),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Reads one parameter.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Writes one parameter, clamped to its descriptor range.
    ///
    /// Out-of-range indices are ignored.
    pub fn set(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self.values.get(index).zip(EngineParams::descriptor(index)) {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
        }
    }

    /// Writes one parameter by stable string ID.
    ///
    /// Returns `false` if the ID is unknown.
    pub fn set_by_id(&self, string_id: &str, value: f32) -> bool {
        match EngineParams::index_of(string_id) {
            Some(index) => {
                self.set(index, value);
                true
            }
            None => false,
        }
    }

    /// Writes every field of `params`.
    pub fn store(&self, params: &EngineParams) {
        for index in 0..PARAM_COUNT {
            self.set(index, params.get_param(index));
        }
    }

    /// Reads all fields into a plain snapshot.
    ///
    /// Never blocks or allocates; safe to call from the audio thread.
    pub fn snapshot(&self) -> EngineParams {
        let mut params = EngineParams::default();
        for (index, atomic) in self.values.iter().enumerate() {
            params.set_param(index, f32::from_bits(atomic.load(Ordering::Acquire)));
        }
        params
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}
