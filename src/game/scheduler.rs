/// Decides when the next simulation tick is due, from a monotonic
/// millisecond clock supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct TickScheduler {
    interval_ms: u64,
    speedup_factor: f64,
    /// Unset until the game starts moving
    next_move_ms: Option<u64>,
}

impl TickScheduler {
    pub fn new(interval_ms: u64, speedup_factor: f64) -> Self {
        Self {
            interval_ms,
            speedup_factor: speedup_factor.max(1.0),
            next_move_ms: None,
        }
    }

    /// Schedule the first tick for `now`; no effect once started
    pub fn start(&mut self, now_ms: u64) {
        if self.next_move_ms.is_none() {
            self.next_move_ms = Some(now_ms);
        }
    }

    pub fn stop(&mut self) {
        self.next_move_ms = None;
    }

    pub fn is_started(&self) -> bool {
        self.next_move_ms.is_some()
    }

    /// Interval in effect, shortened while the boost is on
    pub fn effective_interval_ms(&self, boost: bool) -> u64 {
        if boost {
            (self.interval_ms as f64 / self.speedup_factor).round() as u64
        } else {
            self.interval_ms
        }
    }

    /// Returns true when a tick is due at `now`, and schedules the next one
    ///
    /// Lateness is subtracted from the following interval so the cadence does
    /// not drift, but the next tick is never scheduled in the past.
    pub fn poll(&mut self, now_ms: u64, boost: bool) -> bool {
        let Some(next) = self.next_move_ms else {
            return false;
        };
        if now_ms <= next {
            return false;
        }

        let late_by = now_ms - next;
        let interval = self.effective_interval_ms(boost);
        self.next_move_ms = Some(now_ms + interval.saturating_sub(late_by));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_until_started() {
        let mut scheduler = TickScheduler::new(100, 3.0);
        assert!(!scheduler.poll(1_000, false));
        assert!(!scheduler.is_started());

        scheduler.start(1_000);
        assert!(scheduler.is_started());
        assert!(!scheduler.poll(1_000, false));
        assert!(scheduler.poll(1_001, false));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut scheduler = TickScheduler::new(100, 3.0);
        scheduler.start(0);
        scheduler.start(500);
        assert!(scheduler.poll(1, false));
    }

    #[test]
    fn test_lateness_is_absorbed() {
        let mut scheduler = TickScheduler::new(100, 3.0);
        scheduler.start(0);

        // 30 ms late: next tick 70 ms later, not 100
        assert!(scheduler.poll(30, false));
        assert!(!scheduler.poll(100, false));
        assert!(scheduler.poll(101, false));
    }

    #[test]
    fn test_very_late_tick_does_not_schedule_in_past() {
        let mut scheduler = TickScheduler::new(100, 3.0);
        scheduler.start(0);
        assert!(scheduler.poll(1_000, false));
        assert!(!scheduler.poll(1_000, false));
        assert!(scheduler.poll(1_001, false));
    }

    #[test]
    fn test_boost_shortens_interval() {
        let mut scheduler = TickScheduler::new(300, 3.0);
        assert_eq!(scheduler.effective_interval_ms(true), 100);
        assert_eq!(scheduler.effective_interval_ms(false), 300);

        scheduler.start(0);
        assert!(scheduler.poll(1, true));
        assert!(!scheduler.poll(100, true));
        assert!(scheduler.poll(101, true));
    }

    #[test]
    fn test_stop() {
        let mut scheduler = TickScheduler::new(10, 1.0);
        scheduler.start(0);
        scheduler.stop();
        assert!(!scheduler.poll(100, false));
    }
}
