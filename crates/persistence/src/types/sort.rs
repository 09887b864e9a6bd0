//! Sort specification types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// The log timestamp.
    Timestamp,
}

impl SortField {
    /// Every sortable field, in the order it is reported to callers.
    pub const ALL: &'static [SortField] = &[SortField::Timestamp];

    /// Returns the API name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Timestamp => "timestamp",
        }
    }

    /// Looks up a field by its API name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    /// Returns the allow-list as `a,b,c`, for error messages.
    pub fn allowed_names() -> String {
        Self::ALL
            .iter()
            .map(SortField::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
///
/// The API names match the Elasticsearch `order` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the API name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    /// Parses `asc` or `desc`. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("sort_by value {} must be 'asc' or 'desc'", other)),
        }
    }
}

/// A single sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// The field to sort by.
    pub field: SortField,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort directive.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_lookup() {
        assert_eq!(SortField::from_name("timestamp"), Some(SortField::Timestamp));
        assert_eq!(SortField::from_name("Timestamp"), None);
        assert_eq!(SortField::from_name("badger"), None);
        assert_eq!(SortField::allowed_names(), "timestamp");
    }

    #[test]
    fn test_sort_direction_is_case_sensitive() {
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("DESC".parse::<SortDirection>().is_err());
        assert!("badger".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_sort_spec_serializes_lowercase() {
        let spec = SortSpec::new(SortField::Timestamp, SortDirection::Desc);
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(json, serde_json::json!({"field": "timestamp", "direction": "desc"}));
    }
}
