//! Run command - one experiment over every engine.

use colored::Colorize;
use verity::{DistributionSet, Experiment};

use super::{all_engines, dataset_config, run_options};
use crate::cli::{EngineParams, LawArgs, SizeArgs};

pub fn run(
    size: SizeArgs,
    laws: LawArgs,
    params: EngineParams,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engines = all_engines(&params);
    let distributions = DistributionSet {
        coverage: laws.coverage_law.0.clone(),
        truth: laws.truth_law.0.clone(),
        distinct: laws.distinct_law.0.clone(),
        spread: laws.spread_law.0.clone(),
    };

    let record = Experiment::new(&engines)
        .with_options(run_options(&params))
        .run(&dataset_config(&size), &distributions, 0)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!(
        "{} {} sources x {} items, {} claims (seed {})",
        "Experiment:".cyan().bold(),
        size.sources,
        size.items,
        record.n_claims,
        record.seed
    );
    if verbose {
        println!(
            "  Laws: coverage {}, truth {}, distinct {}, spread {}",
            laws.coverage_law, laws.truth_law, laws.distinct_law, laws.spread_law
        );
    }
    println!();
    println!(
        "  {:<16} {:>10} {:>10} {:>10}  {}",
        "Engine".bold(),
        "Accuracy".bold(),
        "Matches".bold(),
        "Time (s)".bold(),
        "Iterations".bold()
    );
    println!(
        "  {:<16} {:>10.4} {:>10} {:>10}  {}",
        "Optimal".green(),
        record.optimal.accuracy,
        record.optimal.matches,
        "-",
        "-"
    );
    for (name, result) in &record.results {
        let iterations = match result.convergence {
            Some(c) if c.converged => c.iterations.to_string().normal(),
            Some(c) => format!("{} (cap)", c.iterations).red(),
            None => "-".normal(),
        };
        println!(
            "  {:<16} {:>10.4} {:>10} {:>10.3}  {}",
            name,
            result.scores.accuracy,
            result.scores.matches,
            result.time,
            iterations
        );
    }

    Ok(())
}
