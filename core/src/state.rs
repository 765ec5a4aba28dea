//! Application state trait
//!
//! A state is driven by the [`Runtime`] through five callbacks. Each callback
//! receives the runtime so the state can request a transition
//! ([`Runtime::goto`]), stop the loop ([`Runtime::stop`]) or read timing
//! information for interpolation ([`Runtime::lag`], [`Runtime::alpha`]).
//!
//! Per frame the order is always: optional `react`, zero or more
//! `react`/`update` pairs, then exactly one `render`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::Runtime;

/// A state of the loop.
///
/// `enter` is called once when the state starts a run, `leave` once when the
/// run ends while it is current. Switching states with [`Runtime::goto`] does
/// not call either; states that need setup on switch do it in the callback
/// that requested the switch.
pub trait State {
    /// Called once before the loop starts, followed by one `react` and one `update`
    fn enter(&mut self, _runtime: &mut Runtime) {}

    /// Called once when the loop stops with this state current
    fn leave(&mut self, _runtime: &mut Runtime) {}

    /// Process input. Called before every update, and once more on frames with
    /// no update due.
    fn react(&mut self, _runtime: &mut Runtime) {}

    /// Advance the simulation by one fixed step ([`Runtime::step`])
    fn update(&mut self, runtime: &mut Runtime);

    /// Draw one frame. Use [`Runtime::alpha`] to interpolate between updates.
    fn render(&mut self, runtime: &mut Runtime);
}

/// Shared handle to a state.
///
/// The runtime only keeps clones of the handle; the caller keeps its own to
/// inspect the state after the run.
pub type StateRef = Rc<RefCell<dyn State>>;

/// Wrap a state in a [`StateRef`]
pub fn state_ref<S: State + 'static>(state: S) -> StateRef {
    Rc::new(RefCell::new(state))
}
