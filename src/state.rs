use std::sync::Arc;
use crate::clock::{Clock, MonotonicClock};
use crate::config::GatewayConfig;
use crate::error::StartupError;
use crate::rate_limit::RateLimiter;
use crate::stats::StatsStore;

// app's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub limiter: RateLimiter,
    pub stats: StatsStore,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self, StartupError> {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    // Same as `new` but the limiter's windows follow `clock`
    pub fn with_clock(config: &GatewayConfig, clock: Arc<dyn Clock>) -> Result<Self, StartupError> {
        // bounds every outbound fetch, body read included
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            client,
            limiter: RateLimiter::new(config.limit, config.rate_window, clock),
            stats: StatsStore::new(),
        })
    }
}
