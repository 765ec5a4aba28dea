//! Tickloop Core - fixed timestep application loop
//!
//! This crate drives a pluggable state machine through a deterministic
//! sequence of lifecycle callbacks while keeping the simulation rate
//! independent from the render rate.
//!
//! # Architecture
//!
//! - [`Runtime`] - Loop controller: run/stop, deferred state transitions
//! - [`State`] - Trait implemented by application states (enter, react, update, render, leave)
//! - [`FixedStep`] - Fixed timestep accumulator with spiral-of-death clamp
//! - [`StatsWindow`] - Rolling frametime and overrun measurement
//! - [`options`] - Per-frame configuration queue
//!
//! # Example
//!
//! ```rust,no_run
//! use tickloop_core::{Runtime, State};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! struct Countdown(u32);
//!
//! impl State for Countdown {
//!     fn update(&mut self, runtime: &mut Runtime) {
//!         self.0 = self.0.saturating_sub(1);
//!         if self.0 == 0 {
//!             runtime.stop();
//!         }
//!     }
//!
//!     fn render(&mut self, _runtime: &mut Runtime) {}
//! }
//!
//! let mut runtime = Runtime::new();
//! runtime.run(Rc::new(RefCell::new(Countdown(120)))).unwrap();
//! ```

pub mod clock;
pub mod error;
pub mod options;
pub mod runtime;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub mod timing;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::LoopError;
pub use options::{LoopOption, Settings};
pub use runtime::{LoopConfig, Runtime};
pub use state::{State, StateRef, state_ref};
pub use stats::{DebugStat, FrameStats, StatsWindow};
pub use timing::FixedStep;
