mod fetch;
mod health;
mod metrics;
mod stats;

pub use fetch::fetch_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use stats::{all_stats_handler, user_stats_handler};
