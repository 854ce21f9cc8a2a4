use std::time::{Duration, Instant};

/// Cancellable repeating schedule, polled by the front-end loop.
///
/// Disarmed tickers never fire. Re-arming always restarts the period from
/// the given instant.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker { period, next_due: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Cancels the current schedule and starts a new one at `period`.
    pub fn reschedule(&mut self, period: Duration, now: Instant) {
        self.period = period;
        self.arm(now);
    }

    /// Fires at most once per call. A ticker that fell more than a period
    /// behind skips the missed firings instead of bursting.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }

    /// How long until the next firing. `None` when disarmed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
