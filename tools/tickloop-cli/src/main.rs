//! Tickloop CLI - demo runner for the fixed timestep loop
//!
//! # Commands
//!
//! - `tickloop run` - Run the bouncing-ball demo and log frame pacing stats
//! - `tickloop config` - Print the default loop configuration as TOML
//!
//! # Usage
//!
//! ```bash
//! # 5 seconds at 60 Hz with a 20ms render cost (overruns every frame)
//! tickloop run --seconds 5 --frame-ms 20
//!
//! # Load settings from a file, override the tick rate
//! tickloop config > loop.toml
//! tickloop run --config loop.toml --tick-rate 120
//! ```
//!
//! Set `RUST_LOG=debug` to see every published stats window.

mod config;
mod demo;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Tickloop CLI - demo runner for the fixed timestep loop
#[derive(Parser)]
#[command(name = "tickloop")]
#[command(about = "Demo runner for the tickloop fixed timestep loop")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bouncing-ball demo
    Run(run::RunArgs),

    /// Print the loop configuration as TOML
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Config(args) => config::execute(args),
    }
}
