//! Parser for the `dimensions` query parameter.
//!
//! Syntax: `name[:value[|value...]][,name...]`, possibly spread over several
//! occurrences of the parameter.

use kestrel_persistence::error::{ValidationError, ValidationResult};
use kestrel_persistence::types::{Dimension, validate_dimension_key, validate_dimension_value};

/// Parses every occurrence of `dimensions` into filters.
///
/// Returns `Ok(None)` when nothing but empty fragments was supplied.
///
/// # Example
///
/// ```rust
/// use kestrel_rest::extractors::parse_dimensions;
///
/// let dims = parse_dimensions(&["hostname:web-01|web-02,service"]).unwrap().unwrap();
/// assert_eq!(dims[0].values.as_deref(), Some(&["web-01".to_string(), "web-02".to_string()][..]));
/// assert_eq!(dims[1].values, None);
/// ```
pub fn parse_dimensions(raw: &[&str]) -> ValidationResult<Option<Vec<Dimension>>> {
    let mut dimensions = Vec::new();

    for spec in raw.iter().flat_map(|value| value.split(',')) {
        if spec.is_empty() {
            continue;
        }

        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() > 2 {
            return Err(ValidationError::dimension("Dimensions are malformed"));
        }

        let name = parts[0];
        if name.is_empty() {
            continue;
        }

        if name.starts_with('_') {
            return Err(ValidationError::dimension(format!(
                "Dimension key {} may not start with '_'",
                name
            )));
        }
        validate_dimension_key(name)?;

        let values = match parts.get(1) {
            Some(value) if !value.is_empty() => {
                let values: Vec<String> = value.split('|').map(String::from).collect();
                for v in &values {
                    validate_dimension_value(name, v)?;
                }
                Some(values)
            }
            _ => None,
        };

        dimensions.push(Dimension::new(name, values));
    }

    Ok(if dimensions.is_empty() {
        None
    } else {
        Some(dimensions)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dims: &[Dimension]) -> Vec<&str> {
        dims.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_single_value() {
        let dims = parse_dimensions(&["level:error"]).unwrap().unwrap();
        assert_eq!(dims, vec![Dimension::with_values("level", ["error"])]);
    }

    #[test]
    fn test_alternatives() {
        let dims = parse_dimensions(&["level:error|warn"]).unwrap().unwrap();
        assert_eq!(dims, vec![Dimension::with_values("level", ["error", "warn"])]);
    }

    #[test]
    fn test_name_only_and_empty_value() {
        let dims = parse_dimensions(&["hostname,service:"]).unwrap().unwrap();
        assert_eq!(dims, vec![Dimension::any("hostname"), Dimension::any("service")]);
    }

    #[test]
    fn test_multiple_occurrences_flattened_in_order() {
        let dims = parse_dimensions(&["a:1,b:2", "c:3"]).unwrap().unwrap();
        assert_eq!(names(&dims), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicates_kept() {
        let dims = parse_dimensions(&["a:1", "a:2"]).unwrap().unwrap();
        assert_eq!(dims.len(), 2);
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(parse_dimensions(&[]).unwrap(), None);
        assert_eq!(parse_dimensions(&[""]).unwrap(), None);
        assert_eq!(parse_dimensions(&[","]).unwrap(), None);
        assert_eq!(parse_dimensions(&[":value"]).unwrap(), None);
    }

    #[test]
    fn test_too_many_colons() {
        let err = parse_dimensions(&["a:b:c"]).unwrap_err();
        assert_eq!(err.to_string(), "Dimensions are malformed");
    }

    #[test]
    fn test_leading_underscore() {
        let err = parse_dimensions(&["_hidden:1"]).unwrap_err();
        assert_eq!(err.to_string(), "Dimension key _hidden may not start with '_'");
    }

    #[test]
    fn test_restricted_characters() {
        assert!(parse_dimensions(&["na=me:1"]).is_err());
        assert!(parse_dimensions(&["name:va;lue"]).is_err());
    }

    #[test]
    fn test_empty_alternative_rejected() {
        assert!(parse_dimensions(&["level:error|"]).is_err());
    }

    #[test]
    fn test_overlong_key() {
        let key = "k".repeat(256);
        assert!(parse_dimensions(&[key.as_str()]).is_err());
    }
}
