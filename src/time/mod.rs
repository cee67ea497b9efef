//! Wall-clock budget for a single search

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    /// Start the clock now. A limit of 0 ms never expires.
    pub fn start(limit_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            limit: (limit_ms > 0).then(|| Duration::from_millis(limit_ms)),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn expired(&self) -> bool {
        match self.limit {
            Some(limit) => self.elapsed() >= limit,
            None => false,
        }
    }
}
