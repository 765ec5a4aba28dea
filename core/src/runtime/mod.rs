//! Loop orchestration
//!
//! Owns the current/pending state slots and drives the fixed timestep loop.
//! Transitions requested with [`Runtime::goto`] or [`Runtime::stop`] are
//! stored in the pending slot and only take effect at the next frame
//! boundary, never in the middle of a callback.

use std::rc::Rc;
use std::time::Duration;

use crate::clock::{Clock, MonotonicClock};
use crate::error::LoopError;
use crate::options::{LoopOption, OptionQueue};
use crate::state::StateRef;
use crate::stats::{FrameStats, StatsWindow};
use crate::timing::FixedStep;

mod config;
mod frame;


pub use config::LoopConfig;

/// Main loop controller
///
/// Single-threaded by construction: states are shared through `Rc`, so the
/// runtime cannot be sent to another thread while it holds one.
pub struct Runtime {
    config: LoopConfig,
    clock: Box<dyn Clock>,
    timing: FixedStep,
    stats: StatsWindow,
    options: OptionQueue,
    /// State executing the current frame; `Some` for the whole run
    current: Option<StateRef>,
    /// State for the next frame; `None` requests a stop
    pending: Option<StateRef>,
    /// Clock reading at the end of the previous frame
    last_measurement: Duration,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Create a runtime with the default configuration and the system clock
    pub fn new() -> Self {
        Self::build(LoopConfig::default(), FixedStep::default())
    }

    /// Create a runtime from a validated configuration
    pub fn with_config(config: LoopConfig) -> Result<Self, LoopError> {
        config.validate()?;
        let timing =
            FixedStep::new(config.step()?).with_max_catchup_steps(config.max_catchup_steps);
        Ok(Self::build(config, timing))
    }

    fn build(config: LoopConfig, timing: FixedStep) -> Self {
        let stats = StatsWindow::new(config.stats_interval(), config.overrun_threshold());
        Self {
            config,
            clock: Box::new(MonotonicClock::new()),
            timing,
            stats,
            options: OptionQueue::default(),
            current: None,
            pending: None,
            last_measurement: Duration::ZERO,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Configuration the runtime was built with
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Whether a loop is running, i.e. when called from inside [`run`](Self::run)
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Switch to `state` at the next frame. The last call in a frame wins.
    pub fn goto(&mut self, state: StateRef) {
        self.pending = Some(state);
    }

    /// Stop the loop once the current frame is finished
    pub fn stop(&mut self) {
        self.pending = None;
    }

    /// Time between two consecutive updates
    pub fn step(&self) -> Duration {
        self.timing.step()
    }

    /// Time between the frame being rendered and the previous one (clamped)
    pub fn delta(&self) -> Duration {
        self.timing.delta()
    }

    /// Time elapsed since the last update, for extrapolating the state in `render`
    pub fn lag(&self) -> Duration {
        self.timing.lag()
    }

    /// `lag / step`, between 0 and 1 during `render`
    pub fn alpha(&self) -> f32 {
        self.timing.alpha()
    }

    /// Frames measured in the current run
    pub fn frame_count(&self) -> u64 {
        self.timing.frame_count()
    }

    /// Updates run in the current run, not counting the priming update
    pub fn update_count(&self) -> u64 {
        self.timing.update_count()
    }

    /// Average frametime (ns) and overrun count of the last measurement window
    pub fn stats(&self) -> FrameStats {
        self.stats.stats()
    }

    /// Register an option, applied at the top of every frame from now on
    pub fn configure(&mut self, option: LoopOption) {
        self.options.push(option);
    }

    /// Register several options, in order
    pub fn configure_all(&mut self, options: impl IntoIterator<Item = LoopOption>) {
        self.options.extend(options);
    }

    /// Remove every registered option
    pub fn clear_options(&mut self) {
        self.options.clear();
    }

    /// Number of registered options
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Run the loop, starting with `start`.
    ///
    /// Blocks until a state calls [`stop`](Self::stop) or an option fails.
    /// Fails immediately with [`LoopError::AlreadyRunning`] if a loop is
    /// already running on this runtime.
    pub fn run(&mut self, start: StateRef) -> Result<(), LoopError> {
        if self.is_running() {
            tracing::warn!("run called while the loop is already running");
            return Err(LoopError::AlreadyRunning);
        }

        tracing::info!("Starting loop (step {:?})", self.timing.step());
        self.current = Some(Rc::clone(&start));
        {
            let mut state = start.borrow_mut();
            state.enter(self);
            state.react(self);
            state.update(self);
        }
        self.pending = Some(start);

        self.timing.reset();
        self.stats.reset();
        self.last_measurement = self.clock.now();

        while let Some(next) = self.pending.clone() {
            self.promote(Rc::clone(&next));
            if let Err(err) = self.execute_frame(&next) {
                return Err(self.abort(err));
            }
        }

        if let Some(last) = self.current.clone() {
            last.borrow_mut().leave(self);
        }
        self.current = None;
        self.pending = None;
        tracing::info!(
            "Loop stopped after {} frames, {} updates",
            self.timing.frame_count(),
            self.timing.update_count()
        );
        Ok(())
    }

    /// Make the pending state current
    fn promote(&mut self, next: StateRef) {
        let switched = self
            .current
            .as_ref()
            .is_none_or(|current| !Rc::ptr_eq(current, &next));
        if switched {
            tracing::debug!("Switching state at frame {}", self.timing.frame_count());
        }
        self.current = Some(next);
    }

    /// End a run that failed mid-frame
    fn abort(&mut self, err: LoopError) -> LoopError {
        tracing::error!("Loop aborted: {}", err);
        if self.config.leave_on_error
            && let Some(current) = self.current.clone()
        {
            current.borrow_mut().leave(self);
        }
        self.current = None;
        self.pending = None;
        err
    }
}
