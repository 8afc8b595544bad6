//! Sweep command - run every preset law combination and save the results.

use std::path::PathBuf;

use colored::Colorize;
use verity::{Resolver, Sweep};

use super::{build_engine, dataset_config, run_options};
use crate::cli::{AxisChoice, EngineChoice, EngineParams, PresetChoice, SizeArgs};

/// Sweep layout picked on the command line.
pub struct SweepPlan {
    pub engines: Vec<EngineChoice>,
    pub presets: PresetChoice,
    pub index: Option<usize>,
    pub extension: Option<AxisChoice>,
    pub name: String,
    pub output_dir: PathBuf,
    pub start: usize,
    pub stop: Option<usize>,
    pub save_interval: usize,
}

/// Build the sweep and the path of its record.
fn build_sweep(
    size: &SizeArgs,
    params: &EngineParams,
    plan: &SweepPlan,
) -> verity::Result<(Sweep, PathBuf)> {
    let config = dataset_config(size);
    let mut sweep = match plan.presets {
        PresetChoice::Standard => Sweep::presets(config),
        PresetChoice::Extended => Sweep::extended(config),
    };
    if let Some(index) = plan.index {
        sweep = sweep.pin_spread(index)?;
    }
    if let Some(axis) = plan.extension {
        sweep = sweep.with_extension(axis.0);
    }
    sweep.start_index = plan.start;
    sweep.stop_index = plan.stop;
    sweep.save_interval = plan.save_interval;
    sweep.options = run_options(params);

    let path = plan
        .output_dir
        .join(format!("{}.json", sweep.output_stem(&plan.name)));
    Ok((sweep, path))
}

pub fn run(
    size: SizeArgs,
    params: EngineParams,
    plan: SweepPlan,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engines: Vec<Box<dyn Resolver>> = plan
        .engines
        .iter()
        .filter_map(|choice| build_engine(choice, &params))
        .collect();
    if engines.is_empty() {
        return Err("No engine to sweep (the optimal engine is always scored)".into());
    }

    let (sweep, output) = build_sweep(&size, &params, &plan)?;
    let start = plan.start;

    let total = sweep.combinations().len();
    let end = plan.stop.map_or(total, |s| s.min(total));
    println!(
        "{} combinations {}..{} of {} -> {}",
        "Sweeping".cyan().bold(),
        start,
        end,
        total,
        output.display().to_string().white()
    );

    let record = sweep.run(&engines, Some(output.as_path()), |index, total| {
        if index >= start && (verbose || (index + 1) % 10 == 0) {
            eprintln!("  [{}/{}]", index + 1, total);
        }
    })?;

    println!(
        "{} {} experiments saved to {}",
        "Done:".green().bold(),
        record.experiments.len(),
        output.display()
    );

    Ok(())
}
