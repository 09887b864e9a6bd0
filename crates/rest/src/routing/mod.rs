//! Route configuration for the Log API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod logs_routes;

pub use logs_routes::{LOGS_PATH, create_routes};
