//! File-based compression command.

use crate::commands::common::{format_db, parse_param, peak, rms};
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use trisect_config::resolve_preset;
use trisect_core::ParameterInfo;
use trisect_engine::{Band, EngineParams, ProcessSpec, SidechainMode};
use trisect_io::{OfflineProcessor, WavSpec, check_sample_rates, read_wav, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Sidechain (key) WAV file: mono, or one channel per input channel
    #[arg(short, long, value_name = "FILE")]
    sidechain: Option<PathBuf>,

    /// Factory preset name or preset file path
    #[arg(short, long, value_name = "NAME|PATH")]
    preset: Option<String>,

    /// Parameter override, applied after the preset (e.g., "thLo=-30")
    #[arg(long, value_parser = parse_param, number_of_values = 1)]
    param: Vec<(usize, f32)>,

    /// Detect from the input itself even if a sidechain file is given
    #[arg(long)]
    self_sidechain: bool,

    /// Pass the input through untouched
    #[arg(long)]
    bypass: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Unsupported bit depth: '{s}' (expected 16, 24 or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (mut channels, spec) =
        read_wav(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let frames = channels.first().map_or(0, Vec::len);
    println!(
        "  {} ch, {} frames, {} Hz, {:.2}s",
        channels.len(),
        frames,
        spec.sample_rate,
        frames as f32 / spec.sample_rate as f32
    );

    let sidechain = match &args.sidechain {
        Some(path) => {
            let (key, key_spec) =
                read_wav(path).with_context(|| format!("reading {}", path.display()))?;
            check_sample_rates(&spec, &key_spec)?;
            println!("  sidechain: {} ({} ch)", path.display(), key.len());
            Some(key)
        }
        None => None,
    };

    let mut params = match &args.preset {
        Some(name) => {
            let preset = resolve_preset(name)?;
            println!("Loading preset: {}", preset.name);
            preset.to_engine_params()?
        }
        None => EngineParams::default(),
    };
    for &(index, value) in &args.param {
        params.set_param(index, value);
    }
    if args.self_sidechain {
        params.sidechain_mode = SidechainMode::SelfKey;
    }
    if args.bypass {
        params.bypass = true;
    }

    let process_spec = ProcessSpec::new(spec.sample_rate as f32, args.block_size, channels.len())
        .with_sidechain(sidechain.as_ref().map_or(0, Vec::len));
    let mut processor = OfflineProcessor::new(process_spec).context("configuring engine")?;
    tracing::debug!(
        block_size = args.block_size,
        sidechain_channels = sidechain.as_ref().map_or(0, Vec::len),
        mode = ?params.sidechain_mode,
        "engine configured"
    );

    let input_rms = rms(&channels);
    let input_peak = peak(&channels);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    processor.process(&mut channels, sidechain.as_deref(), &params, |done, _| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {}, Peak {}",
        format_db(input_rms),
        format_db(input_peak)
    );
    println!(
        "  Output: RMS {}, Peak {}",
        format_db(rms(&channels)),
        format_db(peak(&channels))
    );
    let engine = processor.engine();
    println!(
        "  Detection: {}",
        if engine.sidechain_engaged() {
            "sidechain"
        } else {
            "self"
        }
    );
    for band in Band::ALL {
        println!(
            "  {:4} gain reduction: {:.1} dB",
            band.name(),
            engine.gain_reduction_db(band)
        );
    }

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &channels, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}
