use std::sync::Arc;
use tokio::time::{Duration, interval};
use crate::state::AppState;

// Applies due window resets and evicts idle counters - runs every `sweep_interval`
pub async fn window_sweeper(
    state: Arc<AppState>,
    sweep_interval: Duration,
    idle_eviction: Option<Duration>,
) {
    let mut interval = interval(sweep_interval);

    tracing::info!(?sweep_interval, ?idle_eviction, "window sweeper started");

    loop {
        interval.tick().await;

        let reset = state.limiter.sweep();
        let evicted = idle_eviction
            .map(|idle_for| state.limiter.evict_idle(idle_for))
            .unwrap_or(0);

        if reset > 0 || evicted > 0 {
            tracing::debug!(
                reset,
                evicted,
                tracked = state.limiter.tracked_users(),
                "swept rate windows"
            );
        }
    }
}
