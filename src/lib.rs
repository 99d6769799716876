//! Metered HTTP gateway.
//!
//! Fetches caller-supplied URLs on behalf of named users, limits each user to
//! a number of successful fetches per rolling window and keeps per-user and
//! aggregate outcome statistics.

pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod server;
pub mod state;
pub mod stats;
pub mod sweeper;

pub use clock::{Clock, MonotonicClock};
pub use config::{Args, GatewayConfig};
pub use error::{GatewayError, StartupError};
pub use rate_limit::{CounterSnapshot, RateLimiter};
pub use state::AppState;
pub use stats::{Outcome, StatsStore, UserStats};
