use serde::{Deserialize, Serialize};
use crate::stats::UserStats;

// Body of a successful fetch
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ElapsedTimeResponse {
    pub elapsed_time: f64,
}

// Body of both stats endpoints, `user_name` is empty for the aggregate
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    pub user_name: String,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub total_requests: u64,
    pub total_time_elapsed: f64,
    // null when no fetch was recorded
    pub average_request_time: Option<f64>,
    pub throttled_requests: u64,
}

impl UserStatsResponse {
    pub fn new(user_name: impl Into<String>, stats: &UserStats) -> Self {
        Self {
            user_name: user_name.into(),
            successful_requests: stats.successful_requests,
            failed_requests: stats.failed_requests,
            total_requests: stats.total_requests(),
            total_time_elapsed: stats.total_time_elapsed(),
            average_request_time: stats.average_request_time(),
            throttled_requests: stats.throttled_requests,
        }
    }
}
