use std::time::Duration;

use serde::Serialize;

/// Rolling frame statistics, refreshed once every `delay_ms` of frame time.
///
/// Between refreshes the published values hold the previous window's averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    /// Average frame time over the last window, in milliseconds.
    pub ms: f64,
    pub fps: f64,
    /// Average GPU render pass time over the last window, in milliseconds.
    pub render_pass_ms: f64,
    pub delay_ms: f64,
    total_ms: f64,
    total_render_pass_ms: f64,
    frame_count: u32,
}

impl Default for PerformanceStats {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl PerformanceStats {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            ms: 0.0,
            fps: 0.0,
            render_pass_ms: 0.0,
            delay_ms,
            total_ms: 0.0,
            total_render_pass_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Records one render pass duration for the current window.
    pub fn add_render_pass_ms(&mut self, ms: f64) {
        self.total_render_pass_ms += ms;
    }

    /// Accounts one frame. Returns `true` when the window closed and the
    /// published averages changed.
    pub fn update(&mut self, dt: Duration) -> bool {
        self.frame_count += 1;
        self.total_ms += dt.as_secs_f64() * 1000.0;
        if self.total_ms < self.delay_ms {
            return false;
        }

        let frames = f64::from(self.frame_count);
        self.ms = self.total_ms / frames;
        self.fps = if self.ms > 0.0 { 1000.0 / self.ms } else { 0.0 };
        self.render_pass_ms = self.total_render_pass_ms / frames;

        self.total_ms = 0.0;
        self.total_render_pass_ms = 0.0;
        self.frame_count = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_values_until_window_closes() {
        let mut stats = PerformanceStats::default();
        for _ in 0..59 {
            assert!(!stats.update(Duration::from_millis(16)));
        }
        assert_eq!(stats.ms, 0.0);
        assert_eq!(stats.fps, 0.0);
    }

    #[test]
    fn averages_over_window() {
        let mut stats = PerformanceStats::new(100.0);
        for _ in 0..4 {
            stats.add_render_pass_ms(2.0);
            stats.update(Duration::from_millis(20));
        }
        stats.add_render_pass_ms(4.0);
        assert!(stats.update(Duration::from_millis(20)));

        assert!((stats.ms - 20.0).abs() < 1e-9);
        assert!((stats.fps - 50.0).abs() < 1e-9);
        assert!((stats.render_pass_ms - 2.4).abs() < 1e-9);
    }

    #[test]
    fn window_restarts_after_publish() {
        let mut stats = PerformanceStats::new(10.0);
        assert!(stats.update(Duration::from_millis(10)));
        assert!(!stats.update(Duration::from_millis(5)));
        assert!(stats.update(Duration::from_millis(15)));
        assert!((stats.ms - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_delay_publishes_every_frame_without_dividing_by_zero() {
        let mut stats = PerformanceStats::new(0.0);
        assert!(stats.update(Duration::ZERO));
        assert_eq!(stats.fps, 0.0);
    }
}
