//! Generate command - write a synthetic claim set and its ground truth.

use std::path::PathBuf;

use colored::Colorize;
use verity::Dataset;

use super::dataset_config;
use crate::cli::{LawArgs, SizeArgs};

pub fn run(
    size: SizeArgs,
    laws: LawArgs,
    claims_path: PathBuf,
    truth_path: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = Dataset::generate(
        dataset_config(&size),
        &laws.coverage_law.0,
        &laws.truth_law.0,
        &laws.distinct_law.0,
        &laws.spread_law.0,
    )?;
    let claims = dataset.claims();

    claims.write_csv(&claims_path)?;
    dataset.truth().write_csv(&truth_path)?;

    println!(
        "{} {} sources x {} items (seed {})",
        "Generated".green().bold(),
        size.sources,
        size.items,
        dataset.seed().to_string().white().bold()
    );
    println!("  Claims: {} -> {}", claims.len(), claims_path.display());
    println!(
        "  Truth:  {} items -> {}",
        dataset.truth().len(),
        truth_path.display()
    );

    if verbose {
        println!();
        println!("{}", "Laws:".yellow().bold());
        println!("  Coverage: {}", laws.coverage_law);
        println!("  Truth:    {}", laws.truth_law);
        println!("  Distinct: {}", laws.distinct_law);
        println!("  Spread:   {}", laws.spread_law);
        println!(
            "  Items with several false values: {}",
            dataset.splits().len()
        );
    }

    Ok(())
}
