//! Single frame execution with fixed timestep

use crate::error::LoopError;
use crate::state::StateRef;

use super::Runtime;

impl Runtime {
    /// Execute one iteration of the loop for `state`.
    ///
    /// Options first, then a catch-up `react` if no update is due, then one
    /// `react`/`update` pair per step of accumulated lag, then one `render`.
    /// The frame's wall-clock duration is measured after `render` and fed to
    /// the stats and the timestep accumulator.
    pub(super) fn execute_frame(&mut self, state: &StateRef) -> Result<(), LoopError> {
        self.options.apply(&mut self.timing)?;

        let mut updates = 0u32;
        {
            let mut state = state.borrow_mut();
            if !self.timing.has_due_update() {
                state.react(self);
            }
            while self.timing.try_consume_step() {
                state.react(self);
                state.update(self);
                updates += 1;
            }
            state.render(self);
        }

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_measurement);
        self.last_measurement = now;

        // Stats see the raw frame duration, the accumulator the clamped one
        self.stats.record(elapsed);
        self.timing.on_frame_measured(elapsed);

        tracing::trace!(
            frame = self.timing.frame_count(),
            updates,
            elapsed_us = elapsed.as_micros() as u64,
            "Frame done"
        );
        Ok(())
    }
}
