//! Flattens Elasticsearch hits into [`LogRecord`]s.

use serde_json::Value;
use thiserror::Error;

use crate::types::LogRecord;

use super::config::SearchSettings;

/// A search response did not have the shape the settings describe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A key along a dotted path is absent.
    #[error("search response is missing '{segment}' while resolving '{path}'")]
    MissingField {
        /// The full dotted path.
        path: String,
        /// The first segment that could not be found.
        segment: String,
    },

    /// A value exists but has the wrong JSON type.
    #[error("search response field '{path}' is not {expected}")]
    UnexpectedType {
        /// The full dotted path.
        path: String,
        /// What the value should have been.
        expected: &'static str,
    },
}

/// Converts raw search responses into log records.
#[derive(Debug, Clone)]
pub struct ResultTransformer {
    timestamp_field: String,
    message_field: String,
    dimensions_field: String,
}

impl ResultTransformer {
    /// Creates a transformer reading the fields named in `settings`.
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            timestamp_field: settings.timestamp_field.clone(),
            message_field: settings.message_field.clone(),
            dimensions_field: settings.dimensions_field.clone(),
        }
    }

    /// Transforms a full search response body.
    ///
    /// Fails on the first hit missing any configured field; no partial
    /// result is returned.
    pub fn transform(&self, response: &Value) -> Result<Vec<LogRecord>, TransformError> {
        let hits = resolve(response, "hits.hits")?
            .as_array()
            .ok_or_else(|| TransformError::UnexpectedType {
                path: "hits.hits".to_string(),
                expected: "an array",
            })?;

        hits.iter().map(|hit| self.transform_hit(hit)).collect()
    }

    fn transform_hit(&self, hit: &Value) -> Result<LogRecord, TransformError> {
        let source = resolve(hit, "_source")?;

        Ok(LogRecord::new(
            resolve(source, &self.timestamp_field)?.clone(),
            resolve(source, &self.message_field)?.clone(),
            resolve(source, &self.dimensions_field)?.clone(),
        ))
    }
}

/// Walks a dotted path through nested objects.
fn resolve<'a>(value: &'a Value, path: &str) -> Result<&'a Value, TransformError> {
    path.split('.').try_fold(value, |current, segment| {
        current
            .get(segment)
            .ok_or_else(|| TransformError::MissingField {
                path: path.to_string(),
                segment: segment.to_string(),
            })
    })
}
