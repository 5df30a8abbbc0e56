#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod presentation;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use config::{GameConfig, LogFormat};
pub use error::AppError;
pub use errors::domain::DomainError;
pub use services::table::GameTable;
pub use services::table_runner::{spawn_table, TableHandle, DEFAULT_ROLL_DELAY};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
