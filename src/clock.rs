use std::time::Instant;

/// Source of time for the rate limiter.
/// `now` returns monotonic nanoseconds since an arbitrary origin, which lets
/// tests drive window resets without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

// Monotonic clock measured from the moment it was created
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}
