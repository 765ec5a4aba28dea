//! Frame pacing statistics
//!
//! Frame durations are collected into a measurement window. When the window
//! has accumulated `interval` worth of time, its average frametime and overrun
//! count are published and the window starts over. Readers only ever see a
//! complete window, so a HUD showing these numbers refreshes at a steady rate
//! (4 Hz by default) regardless of the frame rate.

use std::time::Duration;

/// Default length of a measurement window
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_millis(250);

/// Default frame duration above which a frame counts as an overrun
/// (just over one 60 Hz frame)
pub const DEFAULT_OVERRUN_THRESHOLD: Duration = Duration::from_millis(17);

/// Statistics published from the last completed window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Average frame duration in nanoseconds
    pub frametime: f64,
    /// Frames longer than the overrun threshold
    pub overruns: u32,
}

impl FrameStats {
    /// Average frame duration in milliseconds
    pub fn frametime_ms(&self) -> f64 {
        self.frametime / 1_000_000.0
    }

    /// Frames per second implied by the average frametime (0 before the first window)
    pub fn fps(&self) -> f64 {
        if self.frametime > 0.0 {
            1_000_000_000.0 / self.frametime
        } else {
            0.0
        }
    }

    /// Rows for a debug overlay
    pub fn debug_stats(&self) -> Vec<DebugStat> {
        vec![
            DebugStat::new("Frametime", format!("{:.2} ms", self.frametime_ms())),
            DebugStat::new("FPS", format!("{:.1}", self.fps())),
            DebugStat::number("Overruns", self.overruns),
        ]
    }
}

/// A single named statistic for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugStat {
    /// Display name for the stat
    pub name: String,
    /// Current value as a formatted string
    pub value: String,
}

impl DebugStat {
    /// Create a new debug stat with a string value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a debug stat from a numeric value.
    pub fn number(name: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// Window under measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Window {
    frames: u32,
    time: Duration,
    overruns: u32,
}

/// Rolling frametime/overrun collector
#[derive(Debug, Clone)]
pub struct StatsWindow {
    interval: Duration,
    overrun_threshold: Duration,
    window: Window,
    published: FrameStats,
}

impl Default for StatsWindow {
    fn default() -> Self {
        Self::new(DEFAULT_STATS_INTERVAL, DEFAULT_OVERRUN_THRESHOLD)
    }
}

impl StatsWindow {
    /// Create a collector with a window length and overrun threshold
    pub fn new(interval: Duration, overrun_threshold: Duration) -> Self {
        Self {
            interval,
            overrun_threshold,
            window: Window::default(),
            published: FrameStats::default(),
        }
    }

    /// Length of a measurement window
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Frame duration above which a frame is an overrun
    pub fn overrun_threshold(&self) -> Duration {
        self.overrun_threshold
    }

    /// Record one frame.
    ///
    /// Returns `true` if this frame completed a window and new stats were
    /// published.
    pub fn record(&mut self, delta: Duration) -> bool {
        self.window.frames += 1;
        self.window.time += delta;
        if delta > self.overrun_threshold {
            self.window.overruns += 1;
        }

        if self.window.time < self.interval {
            return false;
        }

        self.published = FrameStats {
            frametime: self.window.time.as_nanos() as f64 / f64::from(self.window.frames),
            overruns: self.window.overruns,
        };
        self.window = Window::default();
        tracing::debug!(
            frametime_ms = self.published.frametime_ms(),
            overruns = self.published.overruns,
            "Frame stats published"
        );
        true
    }

    /// Stats of the last completed window
    pub fn stats(&self) -> FrameStats {
        self.published
    }

    /// Discard the current window and the published stats
    pub fn reset(&mut self) {
        self.window = Window::default();
        self.published = FrameStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_stats_zero_before_first_window() {
        let mut stats = StatsWindow::default();
        assert_eq!(stats.stats(), FrameStats::default());

        for _ in 0..5 {
            assert!(!stats.record(ms(16)));
        }
        assert_eq!(stats.stats(), FrameStats::default());
    }

    #[test]
    fn test_window_publishes_exactly_k_frames() {
        let mut stats = StatsWindow::default();

        // 9 frames of 25ms = 225ms, the 10th reaches 250ms
        for _ in 0..9 {
            assert!(!stats.record(ms(25)));
        }
        assert!(stats.record(ms(25)));

        let published = stats.stats();
        assert_eq!(published.frametime, 25_000_000.0);
        assert_eq!(published.overruns, 10);
        assert_eq!(stats.window, Window::default());
    }

    #[test]
    fn test_mixed_window_average_and_overruns() {
        let mut stats = StatsWindow::default();
        // 17ms is not an overrun, 18ms and 100ms are
        let deltas = [ms(10), ms(17), ms(18), ms(100), ms(105)];
        for delta in deltas {
            stats.record(delta);
        }

        let published = stats.stats();
        assert_eq!(published.frametime, 50_000_000.0);
        assert_eq!(published.overruns, 3);
    }

    #[test]
    fn test_published_values_hold_during_next_window() {
        let mut stats = StatsWindow::default();
        stats.record(ms(250));
        let first = stats.stats();

        stats.record(ms(5));
        stats.record(ms(5));
        assert_eq!(stats.stats(), first);

        stats.record(ms(240));
        assert_eq!(stats.stats().frametime, 250_000_000.0 / 3.0);
        assert_eq!(stats.stats().overruns, 1);
    }

    #[test]
    fn test_custom_interval_and_threshold() {
        let mut stats = StatsWindow::new(ms(100), ms(5));
        stats.record(ms(4));
        stats.record(ms(6));
        assert!(stats.record(ms(90)));

        assert_eq!(stats.stats().overruns, 2);
        assert_eq!(stats.interval(), ms(100));
        assert_eq!(stats.overrun_threshold(), ms(5));
    }

    #[test]
    fn test_reset_clears_published() {
        let mut stats = StatsWindow::default();
        stats.record(ms(300));
        stats.record(ms(10));
        stats.reset();

        assert_eq!(stats.stats(), FrameStats::default());
        assert_eq!(stats.window, Window::default());
    }

    #[test]
    fn test_fps_and_debug_rows() {
        let stats = FrameStats {
            frametime: 20_000_000.0,
            overruns: 2,
        };
        assert_eq!(stats.frametime_ms(), 20.0);
        assert_eq!(stats.fps(), 50.0);
        assert_eq!(FrameStats::default().fps(), 0.0);

        let rows = stats.debug_stats();
        assert_eq!(rows[0], DebugStat::new("Frametime", "20.00 ms"));
        assert_eq!(rows[1], DebugStat::new("FPS", "50.0"));
        assert_eq!(rows[2], DebugStat::number("Overruns", 2));
    }
}
