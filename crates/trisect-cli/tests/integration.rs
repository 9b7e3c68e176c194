//! Integration tests for trisect-cli.
//!
//! Tests cover the CLI binary invocation and end-to-end file processing
//! workflows.

use std::process::Command;
use tempfile::TempDir;
use trisect_io::{WavSpec, read_wav, write_wav};

/// Helper to get the path to the `trisect` binary built by cargo.
fn trisect_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_trisect"))
}

fn sine(freq: f32, amplitude: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / 48000.0).sin())
        .collect()
}

fn write_mono(dir: &TempDir, name: &str, samples: Vec<f32>) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let spec = WavSpec {
        channels: 1,
        sample_rate: 48000,
        bits_per_sample: 32,
    };
    write_wav(&path, &[samples], spec).unwrap();
    path
}

// ---------------------------------------------------------------------------
// `trisect params`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_all_ids() {
    let output = trisect_bin()
        .arg("params")
        .output()
        .expect("failed to run trisect params");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in [
        "globalBypass",
        "sidechainMode",
        "xLowHz",
        "xHighHz",
        "thLo",
        "raMi",
        "atHi",
        "reLo",
        "mkHi",
    ] {
        assert!(stdout.contains(id), "params listing should contain '{id}'");
    }
}

#[test]
fn cli_params_json_is_parseable() {
    let output = trisect_bin()
        .args(["params", "--json"])
        .output()
        .expect("failed to run trisect params --json");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 19);
    assert_eq!(rows[2]["id"], "xLowHz");
    assert_eq!(rows[2]["min"], 60.0);
    assert_eq!(rows[2]["skew"], 2.0);
}

// ---------------------------------------------------------------------------
// `trisect presets`
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_and_show() {
    let output = trisect_bin().args(["presets", "list"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["init", "gentle_glue", "kick_duck_bass", "de_ess", "drum_bus"] {
        assert!(stdout.contains(name), "missing preset '{name}'");
    }

    let output = trisect_bin()
        .args(["presets", "show", "de_ess"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("De-Ess"));
}

#[test]
fn cli_presets_export_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bus.toml");

    let output = trisect_bin()
        .args(["presets", "export", "drum_bus"])
        .arg(&path)
        .arg("--full")
        .output()
        .unwrap();
    assert!(output.status.success());

    let preset = trisect_config::Preset::load(&path).unwrap();
    assert_eq!(preset.name, "Drum Bus");
    assert_eq!(preset.params.len(), 19);
}

#[test]
fn cli_unknown_preset_fails() {
    let output = trisect_bin()
        .args(["presets", "show", "no_such_preset"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `trisect process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_with_sidechain_ducks_bass() {
    let dir = TempDir::new().unwrap();
    let input = write_mono(&dir, "bass.wav", sine(70.0, 0.3, 48000));
    let key = write_mono(&dir, "kick.wav", sine(55.0, 1.0, 24000));
    let out = dir.path().join("out.wav");

    let output = trisect_bin()
        .arg("process")
        .arg(&input)
        .arg(&out)
        .arg("--sidechain")
        .arg(&key)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gain reduction"));

    let (processed, spec) = read_wav(&out).unwrap();
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(processed[0].len(), 48000);

    // Ducked while the key plays, released once it stops
    let peak = |s: &[f32]| s.iter().fold(0.0f32, |m, x| m.max(x.abs()));
    assert!(peak(&processed[0][12000..24000]) < 0.2);
    assert!(peak(&processed[0][40000..48000]) > 0.25);
}

#[test]
fn cli_process_bypass_is_identity() {
    let dir = TempDir::new().unwrap();
    let original = sine(300.0, 0.9, 4096);
    let input = write_mono(&dir, "in.wav", original.clone());
    let out = dir.path().join("out.wav");

    let output = trisect_bin()
        .arg("process")
        .arg(&input)
        .arg(&out)
        .arg("--bypass")
        .output()
        .unwrap();
    assert!(output.status.success());

    let (processed, _) = read_wav(&out).unwrap();
    assert_eq!(processed[0], original);
}

#[test]
fn cli_process_rejects_bad_param() {
    let dir = TempDir::new().unwrap();
    let input = write_mono(&dir, "in.wav", vec![0.0; 128]);
    let out = dir.path().join("out.wav");

    let output = trisect_bin()
        .arg("process")
        .arg(&input)
        .arg(&out)
        .args(["--param", "thLo=12"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}

#[test]
fn cli_process_rejects_sample_rate_mismatch() {
    let dir = TempDir::new().unwrap();
    let input = write_mono(&dir, "in.wav", vec![0.0; 128]);
    let key = dir.path().join("key.wav");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
    };
    write_wav(&key, &[vec![0.0; 128]], spec).unwrap();

    let output = trisect_bin()
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .arg("--sidechain")
        .arg(&key)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Sample rate mismatch"));
}

// ---------------------------------------------------------------------------
// `trisect generate` / `trisect info`
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_then_info() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tone.wav");

    let output = trisect_bin()
        .args(["generate", "sine"])
        .arg(&path)
        .args(["--duration", "0.5", "--channels", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = trisect_bin().arg("info").arg(&path).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Channels:    2"));
    assert!(stdout.contains("24000 frames"));
}

#[test]
fn cli_generate_pulse() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kick.wav");

    let output = trisect_bin()
        .args(["generate", "pulse"])
        .arg(&path)
        .args(["--bpm", "60", "--duration", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let (samples, _) = read_wav(&path).unwrap();
    assert_eq!(samples[0].len(), 96000);
}
