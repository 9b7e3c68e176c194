//! Factory presets bundled with the trisect library.
//!
//! Always available without external files; they double as starting points
//! for user presets (`trisect presets export`).

use std::path::Path;

use crate::{ConfigError, Preset};

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "gentle_glue",
    "kick_duck_bass",
    "de_ess",
    "drum_bus",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("gentle_glue", GENTLE_GLUE_PRESET),
    ("kick_duck_bass", KICK_DUCK_BASS_PRESET),
    ("de_ess", DE_ESS_PRESET),
    ("drum_bus", DRUM_BUS_PRESET),
];

/// Initialization preset - engine defaults.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Default settings: external key, 120 Hz / 3 kHz split, -24 dB at 4:1"
"#;

/// Gentle glue - low ratios on every band, keyed by the signal itself.
const GENTLE_GLUE_PRESET: &str = r#"
name = "Gentle Glue"
description = "Self-keyed 2:1 on all bands for mix-bus cohesion"

[params]
sidechainMode = 0
thLo = -18
raLo = 2
atLo = 20
reLo = 200
mkLo = 1
thMi = -18
raMi = 2
atMi = 20
reMi = 200
mkMi = 1
thHi = -18
raHi = 2
atHi = 10
reHi = 150
mkHi = 1
"#;

/// Kick ducks bass - low band hard, mid residual lightly, high untouched.
const KICK_DUCK_BASS_PRESET: &str = r#"
name = "Kick Duck Bass"
description = "External kick ducks the lows hard and the mids lightly, highs untouched"

[params]
sidechainMode = 1
xLowHz = 150
thLo = -36
raLo = 8
atLo = 1
reLo = 120
thMi = -30
raMi = 3
atMi = 1
reMi = 120
thHi = 0
raHi = 1
"#;

/// De-esser - fast compression of the high band only.
const DE_ESS_PRESET: &str = r#"
name = "De-Ess"
description = "Self-keyed fast high band compression above 5 kHz"

[params]
sidechainMode = 0
xHighHz = 5000
thLo = 0
raLo = 1
thMi = 0
raMi = 1
thHi = -30
raHi = 6
atHi = 0.5
reHi = 60
"#;

/// Drum bus - punchy three-band control with a little makeup.
const DRUM_BUS_PRESET: &str = r#"
name = "Drum Bus"
description = "Self-keyed punch: slow low attack, fast highs, light makeup"

[params]
sidechainMode = 0
xLowHz = 100
xHighHz = 4000
thLo = -20
raLo = 4
atLo = 15
reLo = 150
mkLo = 2
thMi = -22
raMi = 3
atMi = 8
reMi = 100
mkMi = 2
thHi = -26
raHi = 3
atHi = 3
reHi = 60
mkHi = 1
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name (case-insensitive).
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == name_lower)
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// List internal names of all factory presets.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// Check whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

/// Resolve a factory preset name or a path to a preset file.
///
/// Factory names win over files of the same name.
pub fn resolve_preset(name_or_path: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name_or_path) {
        return Ok(preset);
    }
    if Path::new(name_or_path).is_file() {
        return Preset::load(name_or_path);
    }
    Err(ConfigError::PresetNotFound(name_or_path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;
    use trisect_engine::{Band, EngineParams, SidechainMode};

    #[test]
    fn test_factory_presets_load() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());

        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Init"));
        assert!(names.contains(&"Kick Duck Bass"));
        assert!(names.contains(&"De-Ess"));
    }

    #[test]
    fn test_all_factory_presets_valid() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let preset = Preset::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory preset '{name}' should parse: {e}"));
            assert!(preset.description.is_some(), "preset '{name}' needs a description");
            assert!(
                validate_preset(&preset).is_ok(),
                "factory preset '{name}' has invalid params"
            );
        }
    }

    #[test]
    fn test_get_factory_preset() {
        // By internal name
        let preset = get_factory_preset("drum_bus").expect("drum_bus should exist");
        assert_eq!(preset.name, "Drum Bus");

        // By display name, case insensitive
        let preset = get_factory_preset("gentle glue").expect("Gentle Glue should exist");
        assert_eq!(preset.name, "Gentle Glue");

        assert!(get_factory_preset("nonexistent").is_none());
        assert!(is_factory_preset("DE_ESS"));
    }

    #[test]
    fn test_init_is_engine_default() {
        let init = get_factory_preset("init").unwrap();
        assert_eq!(init.to_engine_params().unwrap(), EngineParams::default());
    }

    #[test]
    fn test_kick_duck_bass_structure() {
        let params = get_factory_preset("kick_duck_bass")
            .unwrap()
            .to_engine_params()
            .unwrap();
        assert_eq!(params.sidechain_mode, SidechainMode::External);
        assert_eq!(params.band(Band::Low).ratio, 8.0);
        assert_eq!(params.band(Band::Mid).ratio, 3.0);
        assert_eq!(params.band(Band::High).threshold_db, 0.0);
    }

    #[test]
    fn test_resolve_preset() {
        assert_eq!(resolve_preset("de_ess").unwrap().name, "De-Ess");

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mine.toml");
        Preset::new("Mine").with_param("thLo", -12.0).save(&path).unwrap();
        let resolved = resolve_preset(path.to_str().unwrap()).unwrap();
        assert_eq!(resolved.name, "Mine");

        assert!(matches!(
            resolve_preset("no_such_preset"),
            Err(ConfigError::PresetNotFound(_))
        ));
    }
}
