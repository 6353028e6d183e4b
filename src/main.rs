#![forbid(unsafe_code)]
//! # Review Insights CLI
//!
//! Command-line front end for the `review_insights` crate. One subcommand
//! runs the full analysis pipeline over a review CSV; the other renders the
//! summary report from tables a previous run wrote.
//!
//! ## Example
//! ```bash
//! cargo run --release -- run --config config/config.json
//! cargo run --release -- report --config config/config.json
//! ```
//!
//! See `--help` for all available options.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::{error, info};
use review_insights::{PipelineError, load_config, run_pipeline, write_outputs, write_report};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline and write the output tables
    Run {
        /// Path to the JSON configuration document
        #[arg(long, default_value = "config/config.json")]
        config: PathBuf,
    },
    /// Render the summary report from already-written output tables
    Report {
        /// Path to the JSON configuration document
        #[arg(long, default_value = "config/config.json")]
        config: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { config } => run(&config),
        Command::Report { config } => report(&config),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(config_path: &Path) -> Result<(), PipelineError> {
    let config = load_config(config_path)?;
    let output = run_pipeline(&config)?;
    write_outputs(&config.output_dir, &output.counts, &output.top_ngrams)?;
    info!(
        "dropped {} too-short, {} unresolved, {} duplicate texts",
        output.drops.too_short, output.drops.unresolved, output.drops.duplicates
    );
    println!(
        "Analyzed {} buckets; tables written to {}",
        output.counts.len(),
        config.output_dir.display()
    );
    Ok(())
}

fn report(config_path: &Path) -> Result<(), PipelineError> {
    let config = load_config(config_path)?;
    let path = write_report(&config)?;
    println!("Report written to {}", path.display());
    Ok(())
}
