//! Fixed timestep accumulator
//!
//! Every rendered frame feeds its measured wall-clock duration into the
//! accumulator ("lag"). The loop then drains the lag one fixed step at a time,
//! running one simulation update per step. Whatever is left (always less than
//! one step) is the interpolation lag that renderers use to smooth motion
//! between two simulation states.
//!
//! A single slow frame must not queue an unbounded burst of catch-up updates
//! (the "spiral of death"), so the measured delta is clamped to
//! `max_catchup_steps` steps before it is accumulated. Time beyond the clamp
//! is dropped from the simulation's point of view.

use std::time::Duration;

use crate::error::LoopError;

/// Default simulation rate in Hz
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Default number of steps a single frame may contribute to the lag
pub const DEFAULT_MAX_CATCHUP_STEPS: u32 = 4;

/// Step duration for a tick rate (`1s / tick_rate`)
pub fn step_for_tick_rate(tick_rate: u32) -> Result<Duration, LoopError> {
    if tick_rate == 0 {
        return Err(LoopError::InvalidTickRate(tick_rate));
    }
    Ok(Duration::from_secs(1) / tick_rate)
}

/// Fixed step timing state
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    /// Duration of one simulation update
    step: Duration,
    /// Clamp for a single measured frame, in steps
    max_catchup_steps: u32,
    /// Most recent measured frame duration, after clamping
    delta: Duration,
    /// Accumulated time not yet consumed by an update
    lag: Duration,
    /// Frames measured since the last reset
    frame_count: u64,
    /// Steps consumed since the last reset
    update_count: u64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(Duration::from_secs(1) / DEFAULT_TICK_RATE)
    }
}

impl FixedStep {
    /// Create timing state with the given step.
    ///
    /// A zero step is replaced by the default 60 Hz step; use
    /// [`set_step`](Self::set_step) for validated changes.
    pub fn new(step: Duration) -> Self {
        let step = if step.is_zero() {
            Duration::from_secs(1) / DEFAULT_TICK_RATE
        } else {
            step
        };
        Self {
            step,
            max_catchup_steps: DEFAULT_MAX_CATCHUP_STEPS,
            delta: Duration::ZERO,
            lag: Duration::ZERO,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Set how many steps a single frame may contribute (minimum 1)
    pub fn with_max_catchup_steps(mut self, steps: u32) -> Self {
        self.max_catchup_steps = steps.max(1);
        self
    }

    /// Duration of one simulation update
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Change the step duration.
    ///
    /// The current lag is kept and drained with the new step, so the
    /// `lag < step` invariant holds again after the next drain.
    pub fn set_step(&mut self, step: Duration) -> Result<(), LoopError> {
        if step.is_zero() {
            return Err(LoopError::InvalidStep(step));
        }
        if step != self.step {
            tracing::debug!("Time step changed from {:?} to {:?}", self.step, step);
        }
        self.step = step;
        Ok(())
    }

    /// Steps a single frame may contribute to the lag
    pub fn max_catchup_steps(&self) -> u32 {
        self.max_catchup_steps
    }

    /// Largest delta a frame can produce
    pub fn max_delta(&self) -> Duration {
        self.step.saturating_mul(self.max_catchup_steps)
    }

    /// Most recent measured frame duration (clamped)
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time accumulated but not yet consumed by an update
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Interpolation factor between the last two simulation states (`lag / step`)
    pub fn alpha(&self) -> f32 {
        (self.lag.as_secs_f64() / self.step.as_secs_f64()) as f32
    }

    /// Frames measured since the last reset
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Updates run since the last reset
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Record the wall-clock duration of the frame that was just rendered
    pub fn on_frame_measured(&mut self, elapsed: Duration) {
        let max_delta = self.max_delta();
        self.delta = if elapsed > max_delta {
            tracing::warn!(
                "Frame took {:?}, clamped to {:?} to avoid catch-up burst",
                elapsed,
                max_delta
            );
            max_delta
        } else {
            elapsed
        };
        self.lag += self.delta;
        self.frame_count += 1;
    }

    /// Whether at least one update is due (`lag >= step`)
    pub fn has_due_update(&self) -> bool {
        self.lag >= self.step
    }

    /// Number of updates the current lag accounts for
    pub fn due_updates(&self) -> u32 {
        (self.lag.as_nanos() / self.step.as_nanos()) as u32
    }

    /// Consume one step from the lag if an update is due.
    ///
    /// Returns `true` when a step was consumed and the caller should run one
    /// update. `lag == step` still counts as due.
    pub fn try_consume_step(&mut self) -> bool {
        if !self.has_due_update() {
            return false;
        }
        self.lag -= self.step;
        self.update_count += 1;
        true
    }

    /// Clear delta, lag and counters. The step is kept.
    pub fn reset(&mut self) {
        self.delta = Duration::ZERO;
        self.lag = Duration::ZERO;
        self.frame_count = 0;
        self.update_count = 0;
    }
}
