//! Preset management commands.
//!
//! Provides commands to list, show and export presets.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use trisect_config::{Preset, factory_preset_names, factory_presets, resolve_preset};
use trisect_core::ParameterInfo;
use trisect_engine::EngineParams;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show the resolved settings of a preset
    Show {
        /// Factory preset name or path
        name: String,
    },

    /// Write a preset to a TOML file for editing
    Export {
        /// Factory preset name or path
        name: String,

        /// Destination file
        path: PathBuf,

        /// Write every parameter, not only the ones the preset sets
        #[arg(long)]
        full: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export { name, path, full } => export_preset(&name, &path, full),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for (id, preset) in factory_preset_names().iter().zip(factory_presets()) {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:16} - {}", id, desc);
    }
    println!();
    println!("Use 'trisect presets show <name>' for settings.");
    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    let params = preset.to_engine_params()?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    // Values the preset sets are marked; the rest are defaults
    for (index, desc) in EngineParams::descriptors().iter().enumerate() {
        let marker = if preset.params.contains_key(desc.string_id) {
            "*"
        } else {
            " "
        };
        println!(
            "  {marker} {:14} {:>8}{}",
            desc.string_id,
            params.get_param(index),
            desc.unit.suffix()
        );
    }

    Ok(())
}

fn export_preset(name: &str, path: &Path, full: bool) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    let preset = if full {
        let mut expanded = Preset::from_engine_params(&preset.name, &preset.to_engine_params()?);
        expanded.description = preset.description;
        expanded
    } else {
        preset
    };

    preset.save(path)?;
    println!("Exported preset '{}' to {}", preset.name, path.display());
    Ok(())
}
