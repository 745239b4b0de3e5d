use std::time::{Duration, Instant};

/// Input poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Seconds between countdown refreshes
pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Cadence for recomputing countdowns.
///
/// The event loop asks `due` on every tick and calls `mark` after refreshing.
/// Once cancelled it never fires again.
#[derive(Debug, Clone)]
pub struct RefreshTicker {
    interval: Duration,
    last: Option<Instant>,
    cancelled: bool,
}

impl Default for RefreshTicker {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_REFRESH_SECS))
    }
}

impl RefreshTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when a refresh should run at `now`. The first poll is always due.
    pub fn due(&self, now: Instant) -> bool {
        if self.cancelled {
            return false;
        }
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Poll and mark in one step
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }

    /// Time left until the next refresh, None once cancelled
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(match self.last {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
        })
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_default_refresh_is_one_minute() {
        assert_eq!(RefreshTicker::default().interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_first_poll_fires_then_waits_for_interval() {
        let start = Instant::now();
        let mut ticker = RefreshTicker::new(Duration::from_secs(60));

        assert!(ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_secs(1)));
        assert!(!ticker.poll(start + Duration::from_secs(59)));
        assert_eq!(
            ticker.remaining(start + Duration::from_secs(59)),
            Some(Duration::from_secs(1))
        );
        assert!(ticker.poll(start + Duration::from_secs(60)));
        assert!(!ticker.poll(start + Duration::from_secs(90)));
        assert!(ticker.poll(start + Duration::from_secs(125)));
    }

    #[test]
    fn test_cancelled_ticker_never_fires() {
        let start = Instant::now();
        let mut ticker = RefreshTicker::new(Duration::from_secs(1));
        ticker.cancel();

        assert!(ticker.is_cancelled());
        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_secs(10)));
        assert_eq!(ticker.remaining(start), None);
    }
}
