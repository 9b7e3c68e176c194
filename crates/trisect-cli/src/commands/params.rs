//! Parameter listing command.

use clap::Args;
use serde::Serialize;
use trisect_core::{ParamDescriptor, ParamScale};
use trisect_engine::EngineParams;

#[derive(Args)]
pub struct ParamsArgs {
    /// Print the descriptor list as JSON
    #[arg(long)]
    json: bool,
}

/// One descriptor, flattened for JSON output.
#[derive(Serialize)]
struct ParamRow {
    index: usize,
    id: &'static str,
    name: &'static str,
    group: &'static str,
    unit: &'static str,
    min: f32,
    max: f32,
    default: f32,
    stepped: bool,
    skew: Option<f32>,
}

impl ParamRow {
    fn new(index: usize, desc: &ParamDescriptor) -> Self {
        Self {
            index,
            id: desc.string_id,
            name: desc.name,
            group: desc.group,
            unit: desc.unit.suffix().trim(),
            min: desc.min,
            max: desc.max,
            default: desc.default,
            stepped: desc.is_stepped(),
            skew: match desc.scale {
                ParamScale::Power(exponent) => Some(exponent),
                ParamScale::Linear => None,
            },
        }
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let rows: Vec<ParamRow> = EngineParams::descriptors()
        .iter()
        .enumerate()
        .map(|(index, desc)| ParamRow::new(index, desc))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Engine Parameters");
    println!("=================");
    println!();
    println!(
        "  {:>2}  {:14}  {:20}  {:>8}  {:>8}  {:>8}  {}",
        "#", "ID", "Name", "Min", "Max", "Default", "Unit"
    );
    for row in &rows {
        println!(
            "  {:>2}  {:14}  {:20}  {:>8}  {:>8}  {:>8}  {}",
            row.index, row.id, row.name, row.min, row.max, row.default, row.unit
        );
    }
    println!();
    println!("Override with: trisect process in.wav out.wav --param thLo=-30");

    Ok(())
}
