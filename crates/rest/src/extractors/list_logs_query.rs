//! Normalization of raw listing parameters into a [`ListLogsQuery`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use kestrel_persistence::error::{ValidationError, ValidationResult};
use kestrel_persistence::tenant::{RolePolicy, TenantContext};
use kestrel_persistence::types::{DEFAULT_LIMIT, ListLogsQuery, SortDirection, TimeRange};
use tracing::debug;

use super::dimensions::parse_dimensions;
use super::query_params::QueryParams;
use super::sort_by::parse_sort_by;
use crate::error::RestResult;

/// Query parameters understood by the listing resource.
pub const KNOWN_PARAMETERS: &[&str] = &[
    "tenant_id",
    "start_time",
    "end_time",
    "dimensions",
    "limit",
    "offset",
    "sort_by",
];

/// Settings that shape how raw parameters become a query.
#[derive(Debug, Clone)]
pub struct ListLogsOptions {
    /// Decides whose logs a caller may list.
    pub policy: RolePolicy,
    /// Reject parameters outside [`KNOWN_PARAMETERS`].
    pub strict: bool,
    /// Direction for `sort_by` segments that name only a field.
    pub default_sort_direction: Option<SortDirection>,
    /// Limit used when none is given.
    pub default_limit: u64,
    /// Largest limit honored; larger values are clamped.
    pub max_limit: Option<u64>,
}

impl Default for ListLogsOptions {
    fn default() -> Self {
        Self {
            policy: RolePolicy::default(),
            strict: true,
            default_sort_direction: Some(SortDirection::Desc),
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

/// Builds a validated listing query from raw parameters.
///
/// Runs entirely before any backend call. The caller must already be
/// authorized; this only resolves which tenant the query is scoped to.
pub fn build_list_logs_query(
    params: &QueryParams,
    caller: &TenantContext,
    options: &ListLogsOptions,
) -> RestResult<ListLogsQuery> {
    for name in params.names() {
        if !KNOWN_PARAMETERS.contains(&name) {
            if options.strict {
                return Err(ValidationError::UnknownParameter {
                    parameter: name.to_string(),
                }
                .into());
            }
            debug!(parameter = %name, "Ignoring unknown query parameter");
        }
    }

    let tenant_id = options
        .policy
        .resolve_tenant(caller, params.get_first("tenant_id"))?;

    let start = params
        .get_first("start_time")
        .map(|v| parse_timestamp("start_time", v))
        .transpose()?;
    let end = params
        .get_first("end_time")
        .map(|v| parse_timestamp("end_time", v))
        .transpose()?;
    let time_range = TimeRange::new(start, end)?;

    let limit = match params.get_first("limit") {
        Some(v) => {
            let limit = parse_integer("limit", v)?;
            if limit < 1 {
                return Err(
                    ValidationError::invalid_parameter("limit", v, "must be at least 1").into(),
                );
            }
            limit as u64
        }
        None => options.default_limit,
    };
    let limit = match options.max_limit {
        Some(max) => limit.min(max),
        None => limit,
    };

    let offset = params
        .get_first("offset")
        .map(|v| {
            let offset = parse_integer("offset", v)?;
            if offset < 0 {
                return Err(ValidationError::invalid_parameter(
                    "offset",
                    v,
                    "must not be negative",
                ));
            }
            Ok(offset as u64)
        })
        .transpose()?;

    let dimensions = parse_dimensions(&params.get_all("dimensions"))?;
    let sort_by = parse_sort_by(&params.get_all("sort_by"), options.default_sort_direction)?;

    let mut query = ListLogsQuery::new(tenant_id)
        .with_time_range(time_range)
        .with_limit(limit);
    if let Some(offset) = offset {
        query = query.with_offset(offset);
    }
    if let Some(dimensions) = dimensions {
        query = query.with_dimensions(dimensions);
    }
    if let Some(sort_by) = sort_by {
        query = query.with_sort_by(sort_by);
    }

    Ok(query)
}

/// Offset-qualified ISO 8601 forms beyond strict RFC 3339.
///
/// `%#z` accepts `Z`, `+HH`, `+HHMM` and `+HH:MM`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
    "%Y%m%dT%H%M%#z",
];

/// Date-time forms without an offset, taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// Parses an ISO 8601 timestamp into UTC epoch seconds.
///
/// Accepts extended and basic notation, with seconds or only minutes, and
/// any offset (`Z`, `+HH`, `+HHMM`, `+HH:MM`). A date-time without offset is
/// taken as UTC and a bare date as midnight UTC. Sub-second precision is
/// truncated.
pub fn parse_timestamp(parameter: &str, value: &str) -> ValidationResult<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc).timestamp());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.with_timezone(&Utc).timestamp());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().timestamp());
        }
    }

    for format in ["%Y-%m-%d", "%Y%m%d"] {
        if let Some(midnight) = NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(midnight.and_utc().timestamp());
        }
    }

    Err(ValidationError::invalid_parameter(
        parameter,
        value,
        "is not a valid ISO 8601 timestamp",
    ))
}

/// Parses an integer, accepting and truncating decimal notation.
pub fn parse_integer(parameter: &str, value: &str) -> ValidationResult<i64> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
        _ => Err(ValidationError::invalid_parameter(
            parameter,
            value,
            "must be an integer",
        )),
    }
}
