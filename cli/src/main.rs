//! fsgen CLI - load a problem index and export it for the solver.
//!
//! Command-line flags win over the config file. `FSGEN_DEBUG` stands in for
//! `--debug`.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::BoolishValueParser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fsgen_config::ExportConfig;
use fsgen_core::{GroundingsOutcome, generate, load_index};

/// Export an indexed planning problem to the solver's input format.
#[derive(Debug, Parser)]
#[command(name = "fsgen", version)]
struct Cli {
    /// Problem index serialized as JSON.
    index: PathBuf,

    /// TOML export configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output root, overriding the config file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the `data/debug/` views.
    #[arg(long, env = "FSGEN_DEBUG", value_parser = BoolishValueParser::new())]
    debug: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<ExportConfig> {
    let mut config = match &cli.config {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExportConfig::default(),
    };

    if let Some(output) = &cli.output {
        config.output_root.clone_from(output);
    }
    if cli.debug {
        config.debug = true;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let index = load_index(&cli.index)?;

    let report = generate(&index, &config)
        .with_context(|| format!("exporting {}", cli.index.display()))?;

    for path in &report.written {
        tracing::debug!(path = %path.display(), "Written");
    }
    match report.groundings {
        GroundingsOutcome::Written { groundings, .. } => {
            tracing::info!(groundings, "Groundings exported");
        }
        GroundingsOutcome::Absent {
            removed_stale: true,
        } => tracing::info!("Removed stale groundings file"),
        GroundingsOutcome::Absent { .. } => {}
    }
    for failure in &report.debug_failures {
        eprintln!("warning: debug output {failure}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
