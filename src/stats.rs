use dashmap::DashMap;

/// How a single fetch attempt was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Successful,
    Failed,
    Throttled,
}

// Per-user outcome counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStats {
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub throttled_requests: u64,
    pub successful_time_elapsed: f64,
    pub failed_time_elapsed: f64,
}

impl UserStats {
    pub fn total_requests(&self) -> u64 {
        self.successful_requests + self.failed_requests
    }

    pub fn total_time_elapsed(&self) -> f64 {
        self.successful_time_elapsed + self.failed_time_elapsed
    }

    /// Mean seconds per fetch, `None` when nothing was fetched yet.
    pub fn average_request_time(&self) -> Option<f64> {
        match self.total_requests() {
            0 => None,
            total => Some(self.total_time_elapsed() / total as f64),
        }
    }

    fn apply(&mut self, outcome: Outcome, elapsed: f64) {
        match outcome {
            Outcome::Successful => {
                self.successful_requests += 1;
                self.successful_time_elapsed += elapsed;
            }
            Outcome::Failed => {
                self.failed_requests += 1;
                self.failed_time_elapsed += elapsed;
            }
            Outcome::Throttled => self.throttled_requests += 1,
        }
    }

    fn merge(&mut self, other: &UserStats) {
        self.successful_requests += other.successful_requests;
        self.failed_requests += other.failed_requests;
        self.throttled_requests += other.throttled_requests;
        self.successful_time_elapsed += other.successful_time_elapsed;
        self.failed_time_elapsed += other.failed_time_elapsed;
    }
}

// user name -> outcome counters, entries live for the whole process
#[derive(Debug, Default)]
pub struct StatsStore {
    users: DashMap<String, UserStats>,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one classified outcome. `elapsed` is ignored for throttles.
    pub fn record(&self, user: &str, outcome: Outcome, elapsed: f64) {
        self.users
            .entry(user.to_string())
            .or_default()
            .apply(outcome, elapsed.max(0.0));
    }

    pub fn user(&self, user: &str) -> Option<UserStats> {
        self.users.get(user).map(|entry| entry.value().clone())
    }

    pub fn aggregate(&self) -> UserStats {
        let mut total = UserStats::default();
        for entry in self.users.iter() {
            total.merge(entry.value());
        }
        total
    }
}
