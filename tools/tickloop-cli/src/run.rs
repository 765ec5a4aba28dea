//! Run command - drive the demo states through the loop

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tickloop_core::{LoopConfig, Runtime, options, state_ref};

use crate::demo::{Bouncer, Warmup};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Path to a loop.toml file (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Simulation rate in Hz (overrides the config file)
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Simulated seconds to run before stopping
    #[arg(long, default_value = "3")]
    pub seconds: f64,

    /// Artificial render cost per frame in milliseconds
    #[arg(long, default_value = "5")]
    pub frame_ms: u64,

    /// Frames rendered by the warmup state before switching to the demo
    #[arg(long, default_value = "10")]
    pub warmup_frames: u64,

    /// Keep the step synced to this refresh rate, re-applied every frame
    #[arg(long)]
    pub sync_hz: Option<u32>,
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => LoopConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => LoopConfig::default(),
    };
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate = tick_rate;
    }

    let mut runtime = Runtime::with_config(config).context("Invalid loop configuration")?;
    if let Some(hz) = args.sync_hz {
        runtime.configure(options::tick_rate(hz));
    }

    let simulated = Duration::try_from_secs_f64(args.seconds)
        .context("--seconds must be a non-negative number")?;
    let frame_cost = Duration::from_millis(args.frame_ms);

    let bouncer = state_ref(Bouncer::new(simulated, frame_cost));
    let warmup = state_ref(Warmup::new(args.warmup_frames, frame_cost, bouncer));

    tracing::info!(
        "Running demo: {:?} simulated, {:?} render cost, step {:?}",
        simulated,
        frame_cost,
        runtime.step()
    );
    runtime.run(warmup)?;

    let stats = runtime.stats();
    tracing::info!(
        "Finished: {} frames, {} updates, last window {:.2} ms/frame ({:.1} fps), {} overruns",
        runtime.frame_count(),
        runtime.update_count(),
        stats.frametime_ms(),
        stats.fps(),
        stats.overruns
    );
    Ok(())
}
