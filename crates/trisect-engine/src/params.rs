//! Parameter snapshot for the multiband engine.
//!
//! [`EngineParams`] is a plain `Copy` struct holding every value the engine
//! reads per block. It is the whole persistable state: presets, the command
//! line and the atomic store in [`shared`](crate::shared) all go through it.
//!
//! ## Parameter Indices (`ParameterInfo`)
//!
//! | Index | ID | Range | Default |
//! |-------|----|-------|---------|
//! | 0 | `globalBypass` | 0/1 | 0 |
//! | 1 | `sidechainMode` | 0 = self, 1 = external | 1 |
//! | 2 | `xLowHz` | 60.0–400.0 Hz | 120.0 |
//! | 3 | `xHighHz` | 1000.0–8000.0 Hz | 3000.0 |
//! | 4–8 | `thLo` `raLo` `atLo` `reLo` `mkLo` | see below | -24, 4, 10, 120, 0 |
//! | 9–13 | `thMi` `raMi` `atMi` `reMi` `mkMi` | see below | -24, 4, 10, 120, 0 |
//! | 14–18 | `thHi` `raHi` `atHi` `reHi` `mkHi` | see below | -24, 4, 6, 80, 0 |
//!
//! Per band: threshold -60.0–0.0 dB, ratio 1.0–20.0, attack 0.1–200.0 ms,
//! release 5.0–1000.0 ms, makeup -24.0–24.0 dB.

use trisect_core::{ParamDescriptor, ParamId, ParamScale, ParameterInfo};

/// Number of engine parameters.
pub const PARAM_COUNT: usize = 19;

/// Index of the first per-band parameter.
const BAND_PARAM_BASE: usize = 4;

/// Parameters per band (threshold, ratio, attack, release, makeup).
const PARAMS_PER_BAND: usize = 5;

/// One of the three frequency bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Below the low crossover.
    Low,
    /// Between the two crossovers.
    Mid,
    /// Above the high crossover.
    High,
}

impl Band {
    /// All bands, low to high.
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    /// Zero-based position (low = 0).
    pub const fn index(self) -> usize {
        match self {
            Band::Low => 0,
            Band::Mid => 1,
            Band::High => 2,
        }
    }

    /// Band at the given position.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Band::Low),
            1 => Some(Band::Mid),
            2 => Some(Band::High),
            _ => None,
        }
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        }
    }
}

/// Where the band detectors take their signal from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidechainMode {
    /// Detect from the main signal itself.
    SelfKey,
    /// Detect from the sidechain input, falling back to the main signal
    /// when no usable sidechain is present.
    #[default]
    External,
}

impl SidechainMode {
    /// Decodes a parameter value (> 0.5 selects external).
    pub fn from_value(value: f32) -> Self {
        if value > 0.5 {
            SidechainMode::External
        } else {
            SidechainMode::SelfKey
        }
    }

    /// Encodes as a parameter value.
    pub fn as_value(self) -> f32 {
        match self {
            SidechainMode::SelfKey => 0.0,
            SidechainMode::External => 1.0,
        }
    }
}

/// Dynamics settings of one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParams {
    /// Threshold in dB.
    pub threshold_db: f32,
    /// Compression ratio (n:1).
    pub ratio: f32,
    /// Envelope attack in ms.
    pub attack_ms: f32,
    /// Envelope release in ms.
    pub release_ms: f32,
    /// Makeup gain in dB.
    pub makeup_db: f32,
}

impl BandParams {
    /// Factory defaults for the given band.
    pub const fn default_for(band: Band) -> Self {
        let (attack_ms, release_ms) = match band {
            Band::Low | Band::Mid => (10.0, 120.0),
            Band::High => (6.0, 80.0),
        };
        Self {
            threshold_db: -24.0,
            ratio: 4.0,
            attack_ms,
            release_ms,
            makeup_db: 0.0,
        }
    }

    /// Settings that never change the signal: ratio 1 at a 0 dB threshold
    /// with no makeup.
    pub const fn unity() -> Self {
        Self {
            threshold_db: 0.0,
            ratio: 1.0,
            attack_ms: 10.0,
            release_ms: 120.0,
            makeup_db: 0.0,
        }
    }
}

/// Complete parameter snapshot read by the engine once per block.
///
/// # Example
///
/// ```rust
/// use trisect_core::ParameterInfo;
/// use trisect_engine::{Band, EngineParams};
///
/// let mut params = EngineParams::default();
/// let idx = params.find_param_by_string_id("thLo").unwrap();
/// params.set_param(idx, -30.0);
/// assert_eq!(params.band(Band::Low).threshold_db, -30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Global bypass: the block passes through untouched.
    pub bypass: bool,
    /// Detection source.
    pub sidechain_mode: SidechainMode,
    /// Low/mid crossover in Hz.
    pub crossover_low_hz: f32,
    /// Mid/high crossover in Hz.
    pub crossover_high_hz: f32,
    /// Per-band settings indexed by [`Band::index`].
    pub bands: [BandParams; 3],
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            bypass: false,
            sidechain_mode: SidechainMode::External,
            crossover_low_hz: 120.0,
            crossover_high_hz: 3000.0,
            bands: [
                BandParams::default_for(Band::Low),
                BandParams::default_for(Band::Mid),
                BandParams::default_for(Band::High),
            ],
        }
    }
}

impl EngineParams {
    /// Settings of one band.
    pub fn band(&self, band: Band) -> &BandParams {
        &self.bands[band.index()]
    }

    /// Mutable settings of one band.
    pub fn band_mut(&mut self, band: Band) -> &mut BandParams {
        &mut self.bands[band.index()]
    }

    /// Returns a copy with every field clamped to its descriptor range.
    ///
    /// Allocation-free; the engine runs this on each snapshot it receives.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for index in 0..PARAM_COUNT {
            out.set_param(index, self.get_param(index));
        }
        out
    }

    /// Descriptor for the parameter at `index`.
    pub fn descriptor(index: usize) -> Option<ParamDescriptor> {
        PARAM_DESCRIPTORS.get(index).copied()
    }

    /// All descriptors, in index order.
    pub fn descriptors() -> &'static [ParamDescriptor; PARAM_COUNT] {
        &PARAM_DESCRIPTORS
    }

    /// Index of the parameter with the given stable string ID.
    pub fn index_of(string_id: &str) -> Option<usize> {
        PARAM_DESCRIPTORS.iter().position(|d| d.string_id == string_id)
    }
}

impl ParameterInfo for EngineParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        Self::descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => {
                if self.bypass {
                    1.0
                } else {
                    0.0
                }
            }
            1 => self.sidechain_mode.as_value(),
            2 => self.crossover_low_hz,
            3 => self.crossover_high_hz,
            BAND_PARAM_BASE..PARAM_COUNT => {
                let offset = index - BAND_PARAM_BASE;
                let band = &self.bands[offset / PARAMS_PER_BAND];
                match offset % PARAMS_PER_BAND {
                    0 => band.threshold_db,
                    1 => band.ratio,
                    2 => band.attack_ms,
                    3 => band.release_ms,
                    _ => band.makeup_db,
                }
            }
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = Self::descriptor(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            0 => self.bypass = value > 0.5,
            1 => self.sidechain_mode = SidechainMode::from_value(value),
            2 => self.crossover_low_hz = value,
            3 => self.crossover_high_hz = value,
            _ => {
                let offset = index - BAND_PARAM_BASE;
                let band = &mut self.bands[offset / PARAMS_PER_BAND];
                match offset % PARAMS_PER_BAND {
                    0 => band.threshold_db = value,
                    1 => band.ratio = value,
                    2 => band.attack_ms = value,
                    3 => band.release_ms = value,
                    _ => band.makeup_db = value,
                }
            }
        }
    }
}

const SKEW: ParamScale = ParamScale::Power(2.0);

macro_rules! band_descriptors {
    ($base:expr, $group:literal, $label:literal, $suffix:literal,
     $th:literal, $ra:literal, $at:literal, $re:literal, $mk:literal,
     $attack:expr, $release:expr) => {
        [
            ParamDescriptor::gain_db(concat!($label, " Threshold"), concat!("Thr ", $suffix), -60.0, 0.0, -24.0)
                .with_id(ParamId($base), $th)
                .with_group($group),
            ParamDescriptor::ratio(concat!($label, " Ratio"), concat!("Rat ", $suffix), 1.0, 20.0, 4.0)
                .with_id(ParamId($base + 1), $ra)
                .with_group($group),
            ParamDescriptor::time_ms(concat!($label, " Attack"), concat!("Atk ", $suffix), 0.1, 200.0, $attack)
                .with_id(ParamId($base + 2), $at)
                .with_scale(SKEW)
                .with_group($group),
            ParamDescriptor::time_ms(concat!($label, " Release"), concat!("Rel ", $suffix), 5.0, 1000.0, $release)
                .with_id(ParamId($base + 3), $re)
                .with_scale(SKEW)
                .with_group($group),
            ParamDescriptor::gain_db(concat!($label, " Makeup"), concat!("Mkp ", $suffix), -24.0, 24.0, 0.0)
                .with_id(ParamId($base + 4), $mk)
                .with_group($group),
        ]
    };
}

const LOW_DESCRIPTORS: [ParamDescriptor; PARAMS_PER_BAND] = band_descriptors!(
    4, "low", "Low", "Lo", "thLo", "raLo", "atLo", "reLo", "mkLo", 10.0, 120.0
);
const MID_DESCRIPTORS: [ParamDescriptor; PARAMS_PER_BAND] = band_descriptors!(
    9, "mid", "Mid", "Mi", "thMi", "raMi", "atMi", "reMi", "mkMi", 10.0, 120.0
);
const HIGH_DESCRIPTORS: [ParamDescriptor; PARAMS_PER_BAND] = band_descriptors!(
    14, "high", "High", "Hi", "thHi", "raHi", "atHi", "reHi", "mkHi", 6.0, 80.0
);

static PARAM_DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::toggle("Bypass", "Bypass", false).with_id(ParamId(0), "globalBypass"),
    ParamDescriptor::toggle("Sidechain", "SC", true).with_id(ParamId(1), "sidechainMode"),
    ParamDescriptor::frequency_hz("Crossover Low", "X Lo", 60.0, 400.0, 120.0)
        .with_id(ParamId(2), "xLowHz")
        .with_scale(SKEW),
    ParamDescriptor::frequency_hz("Crossover High", "X Hi", 1000.0, 8000.0, 3000.0)
        .with_id(ParamId(3), "xHighHz")
        .with_scale(SKEW),
    LOW_DESCRIPTORS[0],
    LOW_DESCRIPTORS[1],
    LOW_DESCRIPTORS[2],
    LOW_DESCRIPTORS[3],
    LOW_DESCRIPTORS[4],
    MID_DESCRIPTORS[0],
    MID_DESCRIPTORS[1],
    MID_DESCRIPTORS[2],
    MID_DESCRIPTORS[3],
    MID_DESCRIPTORS[4],
    HIGH_DESCRIPTORS[0],
    HIGH_DESCRIPTORS[1],
    HIGH_DESCRIPTORS[2],
    HIGH_DESCRIPTORS[3],
    HIGH_DESCRIPTORS[4],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_descriptors() {
        let params = EngineParams::default();
        for (i, desc) in EngineParams::descriptors().iter().enumerate() {
            assert_eq!(
                params.get_param(i),
                desc.default,
                "default mismatch for {}",
                desc.string_id
            );
        }
    }

    #[test]
    fn test_ids_are_unique_and_sequential() {
        for (i, desc) in EngineParams::descriptors().iter().enumerate() {
            assert_eq!(desc.id, ParamId(i as u32));
            assert!(!desc.string_id.is_empty());
            assert_eq!(EngineParams::index_of(desc.string_id), Some(i));
        }
    }

    #[test]
    fn test_band_defaults() {
        let params = EngineParams::default();
        assert_eq!(params.band(Band::Low).attack_ms, 10.0);
        assert_eq!(params.band(Band::Mid).release_ms, 120.0);
        assert_eq!(params.band(Band::High).attack_ms, 6.0);
        assert_eq!(params.band(Band::High).release_ms, 80.0);
        assert_eq!(params.sidechain_mode, SidechainMode::External);
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut params = EngineParams::default();
        let idx = EngineParams::index_of("reMi").unwrap();
        params.set_param(idx, 333.0);
        assert_eq!(params.band(Band::Mid).release_ms, 333.0);
        assert_eq!(params.get_param(idx), 333.0);

        params.set_param(0, 1.0);
        assert!(params.bypass);
        params.set_param(1, 0.0);
        assert_eq!(params.sidechain_mode, SidechainMode::SelfKey);
    }

    #[test]
    fn test_set_param_clamps() {
        let mut params = EngineParams::default();
        params.set_param(2, 10.0);
        assert_eq!(params.crossover_low_hz, 60.0);
        params.set_param(EngineParams::index_of("raHi").unwrap(), 100.0);
        assert_eq!(params.band(Band::High).ratio, 20.0);

        // Out of range index ignored
        params.set_param(PARAM_COUNT, 5.0);
        assert_eq!(params.get_param(PARAM_COUNT), 0.0);
    }

    #[test]
    fn test_clamped() {
        let mut params = EngineParams::default();
        params.crossover_high_hz = 20000.0;
        params.band_mut(Band::Low).makeup_db = f32::NAN;
        params.band_mut(Band::Mid).threshold_db = 12.0;

        let c = params.clamped();
        assert_eq!(c.crossover_high_hz, 8000.0);
        assert_eq!(c.band(Band::Low).makeup_db, 0.0);
        assert_eq!(c.band(Band::Mid).threshold_db, 0.0);
    }

    #[test]
    fn test_skewed_ranges() {
        for id in ["xLowHz", "xHighHz", "atLo", "reLo", "atMi", "reMi", "atHi", "reHi"] {
            let desc = EngineParams::descriptor(EngineParams::index_of(id).unwrap()).unwrap();
            assert_eq!(desc.scale, ParamScale::Power(2.0), "{id} should be skewed");
        }
    }

    #[test]
    fn test_band_index_round_trip() {
        for band in Band::ALL {
            assert_eq!(Band::from_index(band.index()), Some(band));
        }
        assert_eq!(Band::from_index(3), None);
    }
}
