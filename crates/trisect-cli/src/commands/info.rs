//! Display WAV file metadata.

use crate::commands::common::{format_db, peak, rms};
use clap::Args;
use trisect_io::{WavFormat, read_wav, read_wav_info};

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,

    /// Also read the samples and print per-channel RMS and peak
    #[arg(long)]
    pub levels: bool,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    if args.levels {
        let (channels, _) = read_wav(&args.file)?;
        println!("Levels:");
        for (index, channel) in channels.iter().enumerate() {
            let single = std::slice::from_ref(channel);
            println!(
                "  ch {index}: RMS {}, Peak {}",
                format_db(rms(single)),
                format_db(peak(single))
            );
        }
    }

    Ok(())
}
