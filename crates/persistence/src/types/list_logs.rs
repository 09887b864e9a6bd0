//! The validated log listing query.

use serde::{Deserialize, Serialize};

use super::dimension::Dimension;
use super::sort::SortSpec;
use crate::error::{ValidationError, ValidationResult};
use crate::tenant::TenantId;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u64 = 10;

/// An inclusive time range in epoch seconds.
///
/// Either bound may be open. When both are present the start never lies after
/// the end; deserialization enforces this through [`TimeRange::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimeRangeBounds")]
pub struct TimeRange {
    start: Option<i64>,
    end: Option<i64>,
}

/// Unchecked wire form of [`TimeRange`].
#[derive(Deserialize)]
struct TimeRangeBounds {
    #[serde(default)]
    start: Option<i64>,
    #[serde(default)]
    end: Option<i64>,
}

impl TryFrom<TimeRangeBounds> for TimeRange {
    type Error = ValidationError;

    fn try_from(bounds: TimeRangeBounds) -> Result<Self, Self::Error> {
        TimeRange::new(bounds.start, bounds.end)
    }
}

impl TimeRange {
    /// Creates a range, rejecting a start that lies after the end.
    pub fn new(start: Option<i64>, end: Option<i64>) -> ValidationResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ValidationError::InvalidTimeRange {
                    message: "start_time must be before end_time".to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// An unbounded range.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> Option<i64> {
        self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Returns `true` if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// A fully validated log listing query.
///
/// Built by the HTTP layer from raw query parameters and consumed by a
/// [`LogsRepository`](crate::core::LogsRepository).
///
/// # Examples
///
/// ```
/// use kestrel_persistence::tenant::TenantId;
/// use kestrel_persistence::types::{
///     Dimension, ListLogsQuery, SortDirection, SortField, SortSpec, TimeRange,
/// };
///
/// let query = ListLogsQuery::new(TenantId::new("abc123"))
///     .with_dimensions(vec![Dimension::with_values("level", ["error", "warn"])])
///     .with_time_range(TimeRange::new(Some(1483246800), None).unwrap())
///     .with_limit(50)
///     .with_offset(10)
///     .with_sort_by(vec![SortSpec::new(SortField::Timestamp, SortDirection::Desc)]);
///
/// assert_eq!(query.limit, 50);
/// assert_eq!(query.offset, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLogsQuery {
    /// The tenant whose logs are listed.
    pub tenant_id: TenantId,
    /// Dimension filters, or `None` for no dimension filtering.
    pub dimensions: Option<Vec<Dimension>>,
    /// Time range filter.
    pub time_range: TimeRange,
    /// Number of matching logs to skip.
    pub offset: Option<u64>,
    /// Maximum number of logs to return.
    pub limit: u64,
    /// Sort directives, in priority order.
    pub sort_by: Option<Vec<SortSpec>>,
}

impl ListLogsQuery {
    /// Creates a query for the tenant with default pagination and no filters.
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            dimensions: None,
            time_range: TimeRange::unbounded(),
            offset: None,
            limit: DEFAULT_LIMIT,
            sort_by: None,
        }
    }

    /// Sets the dimension filters. An empty list clears them.
    pub fn with_dimensions(mut self, dimensions: Vec<Dimension>) -> Self {
        self.dimensions = if dimensions.is_empty() {
            None
        } else {
            Some(dimensions)
        };
        self
    }

    /// Sets the time range.
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the sort directives. An empty list clears them.
    pub fn with_sort_by(mut self, sort_by: Vec<SortSpec>) -> Self {
        self.sort_by = if sort_by.is_empty() {
            None
        } else {
            Some(sort_by)
        };
        self
    }
}
