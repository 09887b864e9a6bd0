//! HTTP request handlers.
//!
//! - [`logs`] - List logs
//! - [`health`] - Health, liveness and readiness endpoints

pub mod health;
pub mod logs;

// Re-export handlers for convenience
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use logs::list_logs_handler;
