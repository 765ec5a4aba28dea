//! Shared test utilities for unit tests

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::runtime::{LoopConfig, Runtime};
use crate::state::State;

// ============================================================================
// Call Journal
// ============================================================================

/// A state callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Enter,
    Leave,
    React,
    Update,
    Render,
}

/// Ordered record of callbacks across all states of a test
pub type Journal = Rc<RefCell<Vec<(&'static str, Call)>>>;

/// Callbacks made by `name`, in order
pub fn calls_of(journal: &Journal, name: &str) -> Vec<Call> {
    journal
        .borrow()
        .iter()
        .filter(|(who, _)| *who == name)
        .map(|(_, call)| *call)
        .collect()
}

/// Split a call sequence into frames, each ending with `Render`.
///
/// `Enter` and `Leave` are dropped, as are calls after the last render.
pub fn split_frames(calls: &[Call]) -> Vec<Vec<Call>> {
    let mut frames = Vec::new();
    let mut frame = Vec::new();
    for call in calls {
        match call {
            Call::Enter | Call::Leave => {}
            Call::Render => {
                frame.push(Call::Render);
                frames.push(std::mem::take(&mut frame));
            }
            other => frame.push(*other),
        }
    }
    frames
}

/// Frames of the state a run started with, after checking the priming calls
pub fn frames(calls: &[Call]) -> Vec<Vec<Call>> {
    assert_eq!(
        calls[..3],
        [Call::Enter, Call::React, Call::Update],
        "run did not prime the initial state"
    );
    split_frames(&calls[3..])
}

/// Count of `call` in a frame
pub fn count(frame: &[Call], call: Call) -> usize {
    frame.iter().filter(|c| **c == call).count()
}

// ============================================================================
// Scripted State
// ============================================================================

/// Hook run from a callback with the runtime and the number of frames rendered
/// so far by this state (including the current one for render hooks)
pub type Hook = Box<dyn FnMut(&mut Runtime, u64)>;

/// State that journals every callback and advances a manual clock in `render`
/// to simulate render cost.
pub struct ScriptedState {
    name: &'static str,
    journal: Journal,
    clock: ManualClock,
    frame_times: Vec<Duration>,
    renders: u64,
    stop_after: Option<u64>,
    on_enter: Option<Hook>,
    on_render: Option<Hook>,
}

impl ScriptedState {
    pub fn new(name: &'static str, journal: &Journal, clock: &ManualClock) -> Self {
        Self {
            name,
            journal: Rc::clone(journal),
            clock: clock.clone(),
            frame_times: vec![Duration::from_millis(16)],
            renders: 0,
            stop_after: None,
            on_enter: None,
            on_render: None,
        }
    }

    /// Duration of each rendered frame; the last entry repeats
    pub fn frame_times(mut self, times: &[Duration]) -> Self {
        self.frame_times = times.to_vec();
        self
    }

    /// Constant frame duration
    pub fn frame_time(self, time: Duration) -> Self {
        self.frame_times(&[time])
    }

    /// Call `stop` at the end of the n-th rendered frame
    pub fn stop_after(mut self, frames: u64) -> Self {
        self.stop_after = Some(frames);
        self
    }

    pub fn on_enter(mut self, hook: impl FnMut(&mut Runtime, u64) + 'static) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_render(mut self, hook: impl FnMut(&mut Runtime, u64) + 'static) -> Self {
        self.on_render = Some(Box::new(hook));
        self
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    fn log(&self, call: Call) {
        self.journal.borrow_mut().push((self.name, call));
    }
}

impl State for ScriptedState {
    fn enter(&mut self, runtime: &mut Runtime) {
        self.log(Call::Enter);
        if let Some(hook) = self.on_enter.as_mut() {
            hook(runtime, self.renders);
        }
    }

    fn leave(&mut self, _runtime: &mut Runtime) {
        self.log(Call::Leave);
    }

    fn react(&mut self, _runtime: &mut Runtime) {
        self.log(Call::React);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.log(Call::Update);
    }

    fn render(&mut self, runtime: &mut Runtime) {
        self.log(Call::Render);
        let index = (self.renders as usize).min(self.frame_times.len() - 1);
        self.clock.advance(self.frame_times[index]);
        self.renders += 1;

        if let Some(hook) = self.on_render.as_mut() {
            hook(runtime, self.renders);
        }
        if self.stop_after == Some(self.renders) {
            runtime.stop();
        }
    }
}

/// Runtime on a manual clock with the given step
pub fn manual_runtime(step: Duration) -> (Runtime, ManualClock) {
    let clock = ManualClock::new();
    let mut runtime = Runtime::with_config(LoopConfig::default())
        .expect("default config is valid")
        .with_clock(clock.clone());
    runtime.configure(crate::options::time_step(step));
    (runtime, clock)
}

/// Shared handle to a scripted state, keeping the concrete type for inspection
pub fn shared(state: ScriptedState) -> Rc<RefCell<ScriptedState>> {
    Rc::new(RefCell::new(state))
}
