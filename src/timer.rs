use std::time::{Duration, Instant};

/// A single periodic deadline. Arming always replaces the pending one, so at
/// most one tick is ever scheduled.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    /// Starts disarmed.
    pub fn new(interval: Duration) -> Self {
        Ticker { interval, deadline: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the next tick, zero if it is overdue.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consumes the deadline if it has passed. The caller re-arms or cancels.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
