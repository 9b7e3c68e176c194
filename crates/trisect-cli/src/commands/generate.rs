//! Test signal generation command.
//!
//! `sine` makes a steady program signal; `pulse` makes a kick-like burst
//! train to use as a sidechain key.

use clap::{Args, Subcommand};
use std::f32::consts::PI;
use std::path::PathBuf;
use trisect_io::{WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,

        /// Channel count (the same tone on every channel)
        #[arg(long, default_value = "1")]
        channels: u16,
    },

    /// Generate a train of decaying sine bursts (kick drum stand-in)
    Pulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Pulses per minute
        #[arg(long, default_value = "120.0")]
        bpm: f32,

        /// Burst frequency in Hz
        #[arg(long, default_value = "55.0")]
        freq: f32,

        /// Burst decay time constant in milliseconds
        #[arg(long, default_value = "80.0")]
        decay_ms: f32,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Peak amplitude (0-1)
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Sine {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
            channels,
        } => {
            anyhow::ensure!(channels > 0, "channel count must be at least 1");
            println!("Generating sine tone...");
            println!("  {} Hz for {:.2}s, {} ch", freq, duration, channels);

            let samples = sine(freq, amplitude, duration, sample_rate);
            let planar = vec![samples; channels as usize];
            let spec = WavSpec {
                channels,
                sample_rate,
                bits_per_sample: 32,
            };

            write_wav(&output, &planar, spec)?;
            println!("Wrote {} frames to {}", planar[0].len(), output.display());
        }

        GenerateCommand::Pulse {
            output,
            bpm,
            freq,
            decay_ms,
            duration,
            sample_rate,
            amplitude,
        } => {
            anyhow::ensure!(bpm > 0.0, "bpm must be positive");
            println!("Generating pulse train...");
            println!("  {} bpm, {} Hz bursts for {:.2}s", bpm, freq, duration);

            let samples = pulse_train(bpm, freq, decay_ms, amplitude, duration, sample_rate);
            let spec = WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 32,
            };

            write_wav(&output, std::slice::from_ref(&samples), spec)?;
            println!("Wrote {} frames to {}", samples.len(), output.display());
        }
    }

    Ok(())
}

fn num_samples(duration: f32, sample_rate: u32) -> usize {
    (duration.max(0.0) * sample_rate as f32) as usize
}

fn sine(freq: f32, amplitude: f32, duration: f32, sample_rate: u32) -> Vec<f32> {
    (0..num_samples(duration, sample_rate))
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * PI * freq * t).sin() * amplitude
        })
        .collect()
}

fn pulse_train(
    bpm: f32,
    freq: f32,
    decay_ms: f32,
    amplitude: f32,
    duration: f32,
    sample_rate: u32,
) -> Vec<f32> {
    let sr = sample_rate as f32;
    let period = ((60.0 / bpm) * sr).max(1.0) as usize;
    let decay_samples = (decay_ms.max(0.1) * 0.001 * sr).max(1.0);

    (0..num_samples(duration, sample_rate))
        .map(|i| {
            let n = (i % period) as f32;
            let envelope = (-n / decay_samples).exp();
            (2.0 * PI * freq * n / sr).sin() * envelope * amplitude
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_length_and_peak() {
        let samples = sine(1000.0, 0.5, 0.1, 48000);
        assert_eq!(samples.len(), 4800);
        let peak = samples.iter().fold(0.0f32, |m, x| m.max(x.abs()));
        assert!((peak - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_pulse_train_restarts_each_beat() {
        // 120 bpm at 48 kHz: one pulse every 24000 samples
        let samples = pulse_train(120.0, 55.0, 50.0, 1.0, 1.0, 48000);
        assert_eq!(samples.len(), 48000);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[24000], 0.0);

        // Energy concentrates at the start of each beat
        let head: f32 = samples[..2400].iter().map(|x| x * x).sum();
        let tail: f32 = samples[21600..24000].iter().map(|x| x * x).sum();
        assert!(head > 100.0 * tail);
    }
}
