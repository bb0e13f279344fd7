// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod analytics;
pub mod app;
pub mod config;
pub mod league;
pub mod protocol;
pub mod refresh;
pub mod sleeper;
pub mod tui;
