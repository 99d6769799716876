// tests/gateway/sweeper_tests.rs

use metered_gateway::sweeper::window_sweeper;
use metered_gateway::{AppState, GatewayConfig};
use std::sync::Arc;
use std::time::Duration;

use crate::TestClock;

// Sweeper on paused tokio time, limiter windows on the test clock
fn sweeping_state(limit: u32) -> (Arc<AppState>, TestClock) {
    let clock = TestClock::new();
    let config = GatewayConfig {
        limit,
        ..GatewayConfig::default()
    };
    let state = Arc::new(
        AppState::with_clock(&config, Arc::new(clock.clone())).expect("failed to build state"),
    );
    tokio::spawn(window_sweeper(
        Arc::clone(&state),
        Duration::from_secs(1),
        Some(Duration::from_secs(600)),
    ));
    (state, clock)
}

#[tokio::test(start_paused = true)]
async fn sweeper_resets_and_then_evicts_idle_counters() {
    let (state, clock) = sweeping_state(1);
    assert!(state.limiter.allow("alice"));
    state.limiter.consume("alice");
    assert!(!state.limiter.allow("alice"));

    // window over: the sweeper clears it, the counter is not idle long enough to go
    clock.advance_secs(61);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(state.limiter.tracked_users(), 1);

    clock.advance_secs(600);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(state.limiter.tracked_users(), 0);

    assert!(state.limiter.allow("alice"));
}

#[tokio::test(start_paused = true)]
async fn sweeper_keeps_counters_with_pending_windows() {
    let (state, clock) = sweeping_state(5);
    assert!(state.limiter.allow("bob"));

    clock.advance_secs(30);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(state.limiter.tracked_users(), 1);
}
