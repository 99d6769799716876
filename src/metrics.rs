use lazy_static::lazy_static;
use prometheus::{IntCounterVec, register_int_counter_vec};
use crate::stats::Outcome;

// Route templates used as the `endpoint` label
pub const FETCH_ENDPOINT: &str = "/user/{name}/url/{*address}";
pub const USER_STATS_ENDPOINT: &str = "/user/{name}/stats";
pub const ALL_STATS_ENDPOINT: &str = "/stats";

lazy_static! {
    pub static ref SUCCESS_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "success_requests_count",
        "Number of succeeded requests per endpoint",
        &["endpoint"]
    )
    .unwrap();
    pub static ref FAILED_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "failed_requests_count",
        "Number of failed requests per endpoint",
        &["endpoint"]
    )
    .unwrap();
}

// Throttles are reported as failures, there is no third family
pub fn record_outcome(endpoint: &str, outcome: Outcome) {
    match outcome {
        Outcome::Successful => SUCCESS_REQUESTS.with_label_values(&[endpoint]).inc(),
        Outcome::Failed | Outcome::Throttled => {
            FAILED_REQUESTS.with_label_values(&[endpoint]).inc()
        }
    }
}
