use std::time::{Duration, Instant};

/// Fixed-rate timer driving the snake.
///
/// A `Ticker` exists only while a game is running: it is created when the
/// game starts and dropped as soon as the game stops, which cancels any tick
/// that was still due.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    /// Start a timer whose first tick is due one `period` from now
    pub(crate) fn start(period: Duration) -> Ticker {
        Ticker {
            period,
            next: Instant::now() + period,
        }
    }

    /// Return how long until the next tick is due
    pub(crate) fn remaining(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    /// If a tick is due, schedule the following one and return `true`.
    ///
    /// Ticks missed while the caller was busy are not replayed; the schedule
    /// restarts from the current instant instead.
    pub(crate) fn fire(&mut self) -> bool {
        let now = Instant::now();
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
