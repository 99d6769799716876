use axum::{Router, routing::get};
use std::sync::Arc;
use crate::config::GatewayConfig;
use crate::error::StartupError;
use crate::handlers::{
    all_stats_handler, fetch_handler, health_handler, metrics_handler, user_stats_handler,
};
use crate::metrics::{ALL_STATS_ENDPOINT, FETCH_ENDPOINT, USER_STATS_ENDPOINT};
use crate::state::AppState;
use crate::sweeper::window_sweeper;

// creating the router with routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(FETCH_ENDPOINT, get(fetch_handler))
        .route(USER_STATS_ENDPOINT, get(user_stats_handler))
        .route(ALL_STATS_ENDPOINT, get(all_stats_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Builds the shared state, starts the sweeper and serves until the listener fails.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    let state = Arc::new(AppState::new(&config)?);

    tokio::spawn(window_sweeper(
        Arc::clone(&state),
        config.sweep_interval,
        config.idle_eviction,
    ));

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Gateway running on http://localhost:{}", config.port);
    tracing::info!(
        "Rate limit: {} successful fetches per {} seconds",
        config.limit,
        config.rate_window.as_secs()
    );
    tracing::info!("Fetch timeout: {} seconds", config.fetch_timeout.as_secs());

    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
