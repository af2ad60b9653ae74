//! knitout - builds validated knitout programs.
//!
//! Runs one of the bundled sample programs through the validating writer
//! and writes the resulting document to a file or standard output.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use knitout_core::{Sink, TracingSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "knitout")]
#[command(about = "Validating knitout program builder")]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, env = "KNITOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Output file (overrides the configured output; stdout if neither is set)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the final writer state as JSON on stderr
    #[arg(long)]
    state: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Stockinette swatch on the front bed
    Swatch {
        /// Number of needles
        #[arg(short, long, default_value_t = 10)]
        width: u32,

        /// Number of row pairs
        #[arg(short = 'H', long, default_value_t = 10)]
        height: u32,

        /// Carrier to knit with
        #[arg(short, long, default_value = "6")]
        carrier: String,
    },

    /// The accepted ways of writing carrier lists
    Carriers,

    /// Every opcode once, including calls the writer refuses
    Tour,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // An explicitly named config file must load; otherwise fall back to defaults
    let config = match cli.config {
        Some(ref path) => {
            let config = Config::load_from(path).map_err(|e| {
                tracing::error!("Failed to load config: {}", e);
                e
            })?;
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        None => match Config::load() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("{}; using default configuration", e);
                Config::default()
            }
        },
    };

    if let Some(ref path) = cli.save_config {
        config.save(path)?;
        eprintln!("{} config to {}", "Saved".green(), path.display().to_string().cyan());
        return Ok(());
    }

    let command = cli.command.unwrap_or(Commands::Swatch {
        width: 10,
        height: 10,
        carrier: "6".to_string(),
    });

    let program = match commands::execute(&command, &config, TracingSink) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{} [{}]: {}", "Error".red(), e.error_code(), e);
            std::process::exit(1);
        }
    };

    for e in &program.rejected {
        eprintln!("{} [{}]: {}", "Refused".yellow(), e.error_code(), e);
    }

    let sink = match cli.output {
        Some(path) => Sink::File(path),
        None => config.output.sink(),
    };
    if let Err(e) = program.writer.write(&sink) {
        eprintln!("{} [{}]: {}", "Error".red(), e.error_code(), e);
        std::process::exit(1);
    }

    if let Sink::File(ref path) = sink {
        eprintln!(
            "{} {} operations to {}",
            "Wrote".green(),
            program.writer.operations().len(),
            path.display().to_string().cyan()
        );
    }

    if cli.state {
        let state = serde_json::to_string_pretty(&program.writer.snapshot())?;
        eprintln!("{}", state);
    }

    Ok(())
}
