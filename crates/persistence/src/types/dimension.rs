//! Dimension filter types and validation.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Maximum length, in characters, of a dimension key or value.
pub const MAX_DIMENSION_LENGTH: usize = 255;

/// A dimension filter: a tenant-defined key and the values it may take.
///
/// `values` of `None` matches any log that carries the dimension, whatever its
/// value. Multiple values are alternatives (OR semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// The dimension key.
    pub name: String,
    /// Accepted values, or `None` for any value.
    pub values: Option<Vec<String>>,
}

impl Dimension {
    /// Creates a dimension filter.
    pub fn new(name: impl Into<String>, values: Option<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a presence-only filter that matches any value.
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Creates a filter matching any of the given values.
    pub fn with_values<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(name, Some(values.into_iter().map(Into::into).collect()))
    }
}

fn restricted_chars_re() -> &'static Regex {
    static RESTRICTED_RE: OnceLock<Regex> = OnceLock::new();
    RESTRICTED_RE
        .get_or_init(|| Regex::new(r#"[<>={}(),'"\\;&]"#).expect("valid restricted-chars regex"))
}

/// Validates a dimension key.
pub fn validate_dimension_key(key: &str) -> ValidationResult<()> {
    let len = key.chars().count();
    if len == 0 || len > MAX_DIMENSION_LENGTH {
        return Err(ValidationError::dimension(format!(
            "Dimension key {} must be 255 characters or less",
            key
        )));
    }
    if restricted_chars_re().is_match(key) {
        return Err(ValidationError::dimension(format!(
            "Dimension key {} may not contain: > < = {{ }} ( ) , ' \" \\ ; &",
            key
        )));
    }
    Ok(())
}

/// Validates a single value of the dimension `key`.
pub fn validate_dimension_value(key: &str, value: &str) -> ValidationResult<()> {
    let len = value.chars().count();
    if len == 0 || len > MAX_DIMENSION_LENGTH {
        return Err(ValidationError::dimension(format!(
            "Dimension value {} for key {} must be 255 characters or less",
            value, key
        )));
    }
    if restricted_chars_re().is_match(value) {
        return Err(ValidationError::dimension(format!(
            "Dimension value {} for key {} may not contain: > < = {{ }} ( ) , ' \" \\ ; &",
            value, key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Dimension::any("host").values, None);
        assert_eq!(
            Dimension::with_values("level", ["error", "warn"]).values,
            Some(vec!["error".to_string(), "warn".to_string()])
        );
    }

    #[test]
    fn test_valid_key_and_value() {
        assert!(validate_dimension_key("hostname").is_ok());
        assert!(validate_dimension_key("service.name").is_ok());
        assert!(validate_dimension_value("hostname", "web-01 eu").is_ok());
    }

    #[test]
    fn test_key_length_limits() {
        assert!(validate_dimension_key("").is_err());
        assert!(validate_dimension_key(&"k".repeat(255)).is_ok());
        assert!(validate_dimension_key(&"k".repeat(256)).is_err());
    }

    #[test]
    fn test_restricted_characters() {
        for bad in ["a>b", "a<b", "a=b", "a{b", "a}b", "a(b", "a)b", "a'b", "a\"b", "a\\b", "a;b", "a&b"] {
            assert!(validate_dimension_key(bad).is_err(), "{bad} should be rejected");
            assert!(validate_dimension_value("k", bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_value_error_names_key() {
        let err = validate_dimension_value("service", "a;b").unwrap_err();
        assert!(err.to_string().contains("for key service"));
    }
}
