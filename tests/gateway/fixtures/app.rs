// tests/gateway/fixtures/app.rs

// dependencies
use metered_gateway::{AppState, GatewayConfig, server};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::test_clock::TestClock;

// A gateway served on an ephemeral port with a manually driven clock
pub struct TestApp {
    pub address: String,
    pub state: Arc<AppState>,
    pub clock: TestClock,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("gateway request failed")
    }

    pub async fn fetch(&self, user: &str, target: &str) -> reqwest::Response {
        self.get(&format!("/user/{}/url/{}", user, target)).await
    }

    pub async fn user_stats(&self, user: &str) -> Value {
        let response = self.get(&format!("/user/{}/stats", user)).await;
        assert_eq!(response.status(), 200);
        response.json().await.expect("stats body is json")
    }

    pub async fn all_stats(&self) -> Value {
        let response = self.get("/stats").await;
        assert_eq!(response.status(), 200);
        response.json().await.expect("stats body is json")
    }
}

pub async fn spawn_app(limit: u32) -> TestApp {
    spawn_app_with(GatewayConfig {
        limit,
        ..GatewayConfig::default()
    })
    .await
}

pub async fn spawn_app_with(config: GatewayConfig) -> TestApp {
    let clock = TestClock::new();
    let state = Arc::new(
        AppState::with_clock(&config, Arc::new(clock.clone())).expect("failed to build state"),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let port = listener.local_addr().unwrap().port();

    let app = server::router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        state,
        clock,
        client: reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap(),
    }
}
