//! Core types for the log query path.
//!
//! This module provides the typed query and result model shared by the HTTP
//! layer and the repository backends:
//!
//! - [`Dimension`] - A dimension filter with optional alternative values
//! - [`SortField`], [`SortDirection`], [`SortSpec`] - Sort directives
//! - [`TimeRange`] - Inclusive epoch-second bounds
//! - [`ListLogsQuery`] - The validated listing query
//! - [`LogRecord`] - A flattened log entry
//!
//! # Examples
//!
//! ```
//! use kestrel_persistence::tenant::TenantId;
//! use kestrel_persistence::types::{Dimension, ListLogsQuery, TimeRange};
//!
//! let range = TimeRange::new(Some(1483246800), Some(1483362000)).unwrap();
//! let query = ListLogsQuery::new(TenantId::new("acme"))
//!     .with_dimensions(vec![Dimension::any("hostname")])
//!     .with_time_range(range);
//!
//! assert_eq!(query.limit, 10);
//! assert!(TimeRange::new(Some(2), Some(1)).is_err());
//! ```

mod dimension;
mod list_logs;
mod log_record;
mod sort;

pub use dimension::{
    Dimension, MAX_DIMENSION_LENGTH, validate_dimension_key, validate_dimension_value,
};
pub use list_logs::{DEFAULT_LIMIT, ListLogsQuery, TimeRange};
pub use log_record::LogRecord;
pub use sort::{SortDirection, SortField, SortSpec};
