//! Demo states
//!
//! `Warmup` renders a few frames and hands over to `Bouncer`, a ball moving
//! back and forth in a unit box. The ball is simulated at the fixed step and
//! drawn at the interpolated position `pos + vel * lag`.

use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tickloop_core::{FrameStats, Runtime, State, StateRef};

/// Renders `frames` frames, then switches to the next state
pub struct Warmup {
    frames: u64,
    rendered: u64,
    frame_cost: Duration,
    next: StateRef,
}

impl Warmup {
    pub fn new(frames: u64, frame_cost: Duration, next: StateRef) -> Self {
        Self {
            frames,
            rendered: 0,
            frame_cost,
            next,
        }
    }
}

impl State for Warmup {
    fn enter(&mut self, _runtime: &mut Runtime) {
        tracing::info!("Warming up for {} frames", self.frames);
    }

    fn update(&mut self, _runtime: &mut Runtime) {}

    fn render(&mut self, runtime: &mut Runtime) {
        thread::sleep(self.frame_cost);
        self.rendered += 1;
        if self.rendered >= self.frames {
            runtime.goto(Rc::clone(&self.next));
        }
    }
}

/// Ball bouncing between 0 and 1
pub struct Bouncer {
    position: f64,
    velocity: f64,
    simulated: Duration,
    duration: Duration,
    frame_cost: Duration,
    last_stats: FrameStats,
}

impl Bouncer {
    /// Ball speed in units per second
    const SPEED: f64 = 0.75;

    pub fn new(duration: Duration, frame_cost: Duration) -> Self {
        Self {
            position: 0.0,
            velocity: Self::SPEED,
            simulated: Duration::ZERO,
            duration,
            frame_cost,
            last_stats: FrameStats::default(),
        }
    }

    /// Advance the ball by `dt`, reflecting off both walls
    fn advance(&mut self, dt: Duration) {
        self.position += self.velocity * dt.as_secs_f64();
        if self.position > 1.0 {
            self.position = 2.0 - self.position;
            self.velocity = -self.velocity;
        } else if self.position < 0.0 {
            self.position = -self.position;
            self.velocity = -self.velocity;
        }
        self.simulated += dt;
    }

    /// Position extrapolated by `lag` past the last update, for drawing
    fn interpolated(&self, lag: Duration) -> f64 {
        (self.position + self.velocity * lag.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl State for Bouncer {
    fn leave(&mut self, _runtime: &mut Runtime) {
        tracing::info!(
            "Ball stopped at {:.3} after {:?} simulated",
            self.position,
            self.simulated
        );
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.advance(runtime.step());
        if self.simulated >= self.duration {
            runtime.stop();
        }
    }

    fn render(&mut self, runtime: &mut Runtime) {
        let drawn = self.interpolated(runtime.lag());
        tracing::trace!("Ball at {:.3} (alpha {:.2})", drawn, runtime.alpha());

        let stats = runtime.stats();
        if stats != self.last_stats {
            self.last_stats = stats;
            for row in stats.debug_stats() {
                tracing::debug!("{}: {}", row.name, row.value);
            }
        }

        thread::sleep(self.frame_cost);
    }
}
