//! Resolve command - run one engine over a claims file.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use colored::Colorize;
use verity::{ClaimSet, GroundTruth, Optimal, Resolution, Resolver, VerityError, score};

use super::{build_engine, run_options};
use crate::cli::{EngineChoice, EngineParams};

/// Items printed in the human-readable preview.
const PREVIEW_ITEMS: usize = 10;

/// Write the resolved table as pretty JSON.
fn save_resolution(path: &Path, resolution: &Resolution) -> verity::Result<()> {
    let file = File::create(path).map_err(|source| VerityError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), resolution)?;
    Ok(())
}

pub fn run(
    file: PathBuf,
    engine: EngineChoice,
    params: EngineParams,
    truth_path: Option<PathBuf>,
    output: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let claims = ClaimSet::read_csv(&file)?;
    let truth = truth_path.as_ref().map(GroundTruth::read_csv).transpose()?;

    let resolver: Box<dyn Resolver> = match build_engine(&engine, &params) {
        Some(resolver) => resolver,
        None => match &truth {
            Some(truth) => Box::new(Optimal::new(truth.clone())),
            None => return Err("The optimal engine needs --truth".into()),
        },
    };

    let resolution = resolver.run(&claims, &run_options(&params))?;
    let scores = truth
        .as_ref()
        .map(|truth| score(&resolution, truth))
        .transpose()?;

    if let Some(path) = &output {
        save_resolution(path, &resolution)?;
    }

    if json_output {
        let report = serde_json::json!({
            "engine": resolver.describe(),
            "n_claims": claims.len(),
            "n_items": resolution.items().len(),
            "convergence": resolution.convergence(),
            "scores": scores,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} claims, {} items, {} sources)",
        "Resolved with".cyan().bold(),
        resolver.name().white().bold(),
        claims.len(),
        resolution.items().len(),
        claims.sources().len()
    );

    if let Some(convergence) = resolution.convergence() {
        let status = if convergence.converged {
            "converged".green()
        } else {
            "not converged".red()
        };
        println!(
            "  {} after {} iterations (error {:.3e})",
            status, convergence.iterations, convergence.error
        );
    }

    if let Some(s) = scores {
        println!(
            "  Accuracy: {} ({} matches)",
            format!("{:.4}", s.accuracy).white().bold(),
            s.matches
        );
    }

    let shown = if verbose {
        resolution.items().len()
    } else {
        PREVIEW_ITEMS.min(resolution.items().len())
    };
    if shown > 0 {
        println!();
        println!("{}", "Resolved values:".yellow().bold());
        for (column, item) in resolution.items().iter().take(shown).enumerate() {
            let values: Vec<String> = resolution
                .rows()
                .iter()
                .map(|row| row.values[column].to_string())
                .collect();
            println!("  item {:>6}: {}", item, values.join(", "));
        }
        if shown < resolution.items().len() {
            println!(
                "  {} more (use --verbose or --output)",
                (resolution.items().len() - shown).to_string().dimmed()
            );
        }
    }

    if let Some(path) = output {
        println!();
        println!("Saved resolution to {}", path.display().to_string().white());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use verity::{Claim, Majority, RunOptions};

    fn resolution() -> Resolution {
        let claims = ClaimSet::from_claims([Claim {
            source: 0,
            item: 0,
            value: 7,
        }])
        .unwrap();
        Majority.run(&claims, &RunOptions::default()).unwrap()
    }

    #[test]
    fn test_save_resolution_writes_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resolution.json");
        save_resolution(&path, &resolution()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Majority"));
    }

    #[test]
    fn test_save_resolution_names_the_missing_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("resolution.json");
        let err = save_resolution(&path, &resolution()).unwrap_err();
        assert!(err.to_string().contains("missing"));
        match err {
            VerityError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
