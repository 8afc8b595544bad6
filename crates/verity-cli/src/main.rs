//! Verity CLI - synthetic truth-discovery benchmarks.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the verbosity flag
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate {
            size,
            laws,
            claims,
            truth,
        } => commands::generate::run(size, laws, claims, truth, cli.verbose),

        Commands::Resolve {
            file,
            engine,
            params,
            truth,
            output,
            json,
        } => commands::resolve::run(file, engine, params, truth, output, json, cli.verbose),

        Commands::Run {
            size,
            laws,
            params,
            json,
        } => commands::run::run(size, laws, params, json, cli.verbose),

        Commands::Sweep {
            size,
            params,
            engines,
            presets,
            index,
            extension,
            name,
            output_dir,
            start,
            stop,
            save_interval,
        } => commands::sweep::run(
            size,
            params,
            commands::sweep::SweepPlan {
                engines,
                presets,
                index,
                extension,
                name,
                output_dir,
                start,
                stop,
                save_interval,
            },
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
