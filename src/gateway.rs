use std::time::Instant;
use url::Url;
use crate::error::GatewayError;
use crate::metrics::{FETCH_ENDPOINT, record_outcome};
use crate::state::AppState;
use crate::stats::Outcome;

/// Parses a caller-supplied target. Only absolute http(s) URLs with a host
/// are fetchable.
pub fn parse_target(raw: &str) -> Result<Url, GatewayError> {
    let invalid = |reason: String| GatewayError::InvalidTarget {
        target: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

/// Classifies a target that could not even be decoded from the request path.
pub fn reject_target(
    state: &AppState,
    user: &str,
    raw_target: &str,
    reason: String,
) -> GatewayError {
    tracing::debug!(user, reason = %reason, "rejecting undecodable target");
    classify(state, user, Outcome::Failed, 0.0);
    GatewayError::InvalidTarget {
        target: raw_target.to_string(),
        reason,
    }
}

// One stats mutation and one metrics increment per classified attempt
fn classify(state: &AppState, user: &str, outcome: Outcome, elapsed: f64) {
    state.stats.record(user, outcome, elapsed);
    record_outcome(FETCH_ENDPOINT, outcome);
}

/// Fetches `raw_target` on behalf of `user` and returns the elapsed seconds.
///
/// Only a fully read response counts as success and consumes quota; any
/// upstream status code is a success as long as the body could be read.
pub async fn fetch(state: &AppState, user: &str, raw_target: &str) -> Result<f64, GatewayError> {
    let target = match parse_target(raw_target) {
        Ok(target) => target,
        Err(e) => {
            tracing::debug!(user, error = %e, "rejecting target");
            classify(state, user, Outcome::Failed, 0.0);
            return Err(e);
        }
    };

    if !state.limiter.allow(user) {
        tracing::debug!(user, limit = state.limiter.limit(), "throttled");
        classify(state, user, Outcome::Throttled, 0.0);
        return Err(GatewayError::RateLimitExceeded(user.to_string()));
    }

    let start = Instant::now();

    let response = match state.client.get(target.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            let elapsed = start.elapsed().as_secs_f64();
            tracing::warn!(user, target = %target, error = %e, "upstream unavailable");
            classify(state, user, Outcome::Failed, elapsed);
            return Err(GatewayError::UpstreamUnavailable(e));
        }
    };

    let status = response.status();
    if let Err(e) = response.bytes().await {
        let elapsed = start.elapsed().as_secs_f64();
        tracing::warn!(user, target = %target, error = %e, "failed to read upstream body");
        classify(state, user, Outcome::Failed, elapsed);
        return Err(GatewayError::ResponseUnreadable(e));
    }

    let elapsed = start.elapsed().as_secs_f64();
    classify(state, user, Outcome::Successful, elapsed);
    state.limiter.consume(user);

    tracing::info!(user, target = %target, %status, elapsed, "fetched");
    Ok(elapsed)
}
