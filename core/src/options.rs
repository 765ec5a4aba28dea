//! Per-frame configuration queue
//!
//! Options are fallible setup actions registered with
//! [`Runtime::configure`](crate::Runtime::configure). The queue is applied at
//! the top of every frame, before any state callback, in registration order.
//! Options are never removed after running: every option runs again on every
//! frame, which lets an option track something that changes (e.g. the display
//! refresh rate). One-shot options must guard their own idempotence.
//!
//! The first failing option aborts the frame and the run; its error is
//! returned from [`Runtime::run`](crate::Runtime::run) unchanged.

use std::fmt;
use std::time::Duration;

use crate::error::LoopError;
use crate::timing::{FixedStep, step_for_tick_rate};

/// Loop parameters an option is allowed to change
pub struct Settings<'a> {
    timing: &'a mut FixedStep,
}

impl<'a> Settings<'a> {
    pub(crate) fn new(timing: &'a mut FixedStep) -> Self {
        Self { timing }
    }

    /// Current fixed step
    pub fn step(&self) -> Duration {
        self.timing.step()
    }

    /// Change the fixed step. Zero is rejected.
    pub fn set_step(&mut self, step: Duration) -> Result<(), LoopError> {
        self.timing.set_step(step)
    }

    /// Change the fixed step to `1s / tick_rate`
    pub fn set_tick_rate(&mut self, tick_rate: u32) -> Result<(), LoopError> {
        self.timing.set_step(step_for_tick_rate(tick_rate)?)
    }
}

/// A configuration option
pub type LoopOption = Box<dyn FnMut(&mut Settings<'_>) -> anyhow::Result<()>>;

/// Box a closure as a [`LoopOption`]
pub fn option<F>(f: F) -> LoopOption
where
    F: FnMut(&mut Settings<'_>) -> anyhow::Result<()> + 'static,
{
    Box::new(f)
}

/// Option setting the fixed time step
pub fn time_step(step: Duration) -> LoopOption {
    option(move |settings| {
        settings.set_step(step)?;
        Ok(())
    })
}

/// Option setting the fixed time step from a tick rate in Hz
pub fn tick_rate(tick_rate: u32) -> LoopOption {
    option(move |settings| {
        settings.set_tick_rate(tick_rate)?;
        Ok(())
    })
}

/// Ordered list of options applied once per frame
#[derive(Default)]
pub struct OptionQueue {
    options: Vec<LoopOption>,
}

impl fmt::Debug for OptionQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionQueue")
            .field("len", &self.options.len())
            .finish()
    }
}

impl OptionQueue {
    /// Append one option
    pub fn push(&mut self, option: LoopOption) {
        self.options.push(option);
    }

    /// Number of registered options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether no option is registered
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Remove every option
    pub fn clear(&mut self) {
        self.options.clear();
    }

    /// Run every option in order, stopping at the first error
    pub fn apply(&mut self, timing: &mut FixedStep) -> anyhow::Result<()> {
        let mut settings = Settings::new(timing);
        for option in &mut self.options {
            option(&mut settings)?;
        }
        Ok(())
    }
}

impl Extend<LoopOption> for OptionQueue {
    fn extend<I: IntoIterator<Item = LoopOption>>(&mut self, iter: I) {
        self.options.extend(iter);
    }
}
