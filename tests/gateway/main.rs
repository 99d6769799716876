// tests/gateway/main.rs

// test modules
mod fixtures;
mod sweeper_tests;

// Re-export common test utilities
pub use fixtures::app::{spawn_app, spawn_app_with};
pub use fixtures::test_clock::TestClock;
pub use fixtures::upstream::{ok_upstream, refused_target, truncating_upstream};
