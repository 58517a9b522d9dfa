use std::time::{Duration, Instant};

/// Measures the time elapsed between consecutive frames.
///
/// The first tick has no predecessor and reports `Duration::ZERO`.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit timestamp. Timestamps older
    /// than the previous one yield zero rather than panicking.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), Duration::ZERO);
    }

    #[test]
    fn reports_time_since_previous_tick() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        assert_eq!(clock.tick_at(t0 + Duration::from_millis(16)), Duration::from_millis(16));
        assert_eq!(clock.tick_at(t0 + Duration::from_millis(50)), Duration::from_millis(34));
    }

    #[test]
    fn backwards_time_saturates() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0 + Duration::from_millis(10));
        assert_eq!(clock.tick_at(t0), Duration::ZERO);
    }

    #[test]
    fn reset_forgets_previous_frame() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.reset();
        assert_eq!(clock.tick_at(t0 + Duration::from_secs(1)), Duration::ZERO);
    }
}
