//! Common test utilities for Log API testing.
//!
//! - [`harness`] - Test server over a recording search client
//! - [`assertions`] - HTTP response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod harness;
