//! Shared CLI helpers used across multiple commands.

use trisect_config::parse_param_assignment;

/// Parse an `id=value` assignment for clap's `value_parser`.
pub fn parse_param(s: &str) -> Result<(usize, f32), String> {
    parse_param_assignment(s).map_err(|e| e.to_string())
}

/// RMS over all channels.
pub fn rms(channels: &[Vec<f32>]) -> f32 {
    let count: usize = channels.iter().map(Vec::len).sum();
    if count == 0 {
        return 0.0;
    }
    let sum: f32 = channels.iter().flatten().map(|s| s * s).sum();
    (sum / count as f32).sqrt()
}

/// Absolute peak over all channels.
pub fn peak(channels: &[Vec<f32>]) -> f32 {
    channels
        .iter()
        .flatten()
        .map(|s| s.abs())
        .fold(0.0, f32::max)
}

/// Formats a linear level in dB, with silence shown as `-inf`.
pub fn format_db(linear: f32) -> String {
    if linear <= 0.0 {
        "-inf dB".to_string()
    } else {
        format!("{:.1} dB", trisect_core::linear_to_db(linear))
    }
}
