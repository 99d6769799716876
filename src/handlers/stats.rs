use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use crate::error::GatewayError;
use crate::metrics::{ALL_STATS_ENDPOINT, USER_STATS_ENDPOINT, record_outcome};
use crate::models::UserStatsResponse;
use crate::state::AppState;
use crate::stats::Outcome;

// GET /user/{name}/stats
pub async fn user_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<UserStatsResponse>, GatewayError> {
    match state.stats.user(&name) {
        Some(stats) => {
            record_outcome(USER_STATS_ENDPOINT, Outcome::Successful);
            Ok(Json(UserStatsResponse::new(name, &stats)))
        }
        None => {
            record_outcome(USER_STATS_ENDPOINT, Outcome::Failed);
            Err(GatewayError::UserNotFound(name))
        }
    }
}

// GET /stats
pub async fn all_stats_handler(State(state): State<Arc<AppState>>) -> Json<UserStatsResponse> {
    record_outcome(ALL_STATS_ENDPOINT, Outcome::Successful);
    Json(UserStatsResponse::new("", &state.stats.aggregate()))
}
