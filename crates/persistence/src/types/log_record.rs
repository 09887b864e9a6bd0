//! Flattened log record returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single log entry as returned by a listing.
///
/// Field values are passed through from the backend unchanged; the timestamp
/// in particular keeps whatever encoding the index stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Backend-native timestamp.
    pub timestamp: Value,
    /// The log message.
    pub message: Value,
    /// Dimension key/value mapping.
    pub dimensions: Value,
}

impl LogRecord {
    /// Creates a record from its three parts.
    pub fn new(timestamp: Value, message: Value, dimensions: Value) -> Self {
        Self {
            timestamp,
            message,
            dimensions,
        }
    }
}
