//! Config command - print the loop configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tickloop_core::LoopConfig;

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Validate and print this file instead of the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute the config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => LoopConfig::load(path)?,
        None => LoopConfig::default(),
    };
    let text = toml::to_string(&config).context("Failed to serialize loop config")?;
    print!("{text}");
    Ok(())
}
