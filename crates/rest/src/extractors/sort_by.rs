//! Parser for the `sort_by` query parameter.
//!
//! Syntax: `field [asc|desc][,field [asc|desc]...]`.

use kestrel_persistence::error::{ValidationError, ValidationResult};
use kestrel_persistence::types::{SortDirection, SortField, SortSpec};

/// Parses every occurrence of `sort_by` into sort directives.
///
/// A segment without a direction takes `default_direction`; when that is
/// `None` the segment is rejected.
///
/// # Example
///
/// ```rust
/// use kestrel_persistence::types::SortDirection;
/// use kestrel_rest::extractors::parse_sort_by;
///
/// let specs = parse_sort_by(&["timestamp"], Some(SortDirection::Desc)).unwrap().unwrap();
/// assert_eq!(specs[0].direction, SortDirection::Desc);
/// ```
pub fn parse_sort_by(
    raw: &[&str],
    default_direction: Option<SortDirection>,
) -> ValidationResult<Option<Vec<SortSpec>>> {
    let mut specs = Vec::new();

    for segment in raw.iter().flat_map(|value| value.split(',')) {
        let tokens: Vec<&str> = segment.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() > 2 {
            return Err(ValidationError::sort_by(format!(
                "Invalid sort_by {}",
                segment
            )));
        }

        let field = SortField::from_name(tokens[0]).ok_or_else(|| {
            ValidationError::sort_by(format!(
                "sort_by field {} must be one of [{}]",
                tokens[0],
                SortField::allowed_names()
            ))
        })?;

        let direction = match tokens.get(1) {
            Some(d) => d.parse::<SortDirection>().map_err(ValidationError::sort_by)?,
            None => default_direction.ok_or_else(|| {
                ValidationError::sort_by(format!(
                    "sort_by field {} requires a direction",
                    tokens[0]
                ))
            })?,
        };

        specs.push(SortSpec::new(field, direction));
    }

    Ok(if specs.is_empty() { None } else { Some(specs) })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESC: Option<SortDirection> = Some(SortDirection::Desc);

    #[test]
    fn test_explicit_direction() {
        let specs = parse_sort_by(&["timestamp asc"], DESC).unwrap().unwrap();
        assert_eq!(
            specs,
            vec![SortSpec::new(SortField::Timestamp, SortDirection::Asc)]
        );
    }

    #[test]
    fn test_default_direction() {
        let specs = parse_sort_by(&["timestamp"], DESC).unwrap().unwrap();
        assert_eq!(specs[0].direction, SortDirection::Desc);
    }

    #[test]
    fn test_direction_required_without_default() {
        let err = parse_sort_by(&["timestamp"], None).unwrap_err();
        assert_eq!(err.to_string(), "sort_by field timestamp requires a direction");
    }

    #[test]
    fn test_order_preserved() {
        let specs = parse_sort_by(&["timestamp desc, timestamp asc"], DESC)
            .unwrap()
            .unwrap();
        let dirs: Vec<_> = specs.iter().map(|s| s.direction).collect();
        assert_eq!(dirs, vec![SortDirection::Desc, SortDirection::Asc]);
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(parse_sort_by(&[], DESC).unwrap(), None);
        assert_eq!(parse_sort_by(&[""], DESC).unwrap(), None);
        assert_eq!(parse_sort_by(&[", "], DESC).unwrap(), None);
    }

    #[test]
    fn test_unknown_field() {
        let err = parse_sort_by(&["message asc"], DESC).unwrap_err();
        assert_eq!(
            err.to_string(),
            "sort_by field message must be one of [timestamp]"
        );
    }

    #[test]
    fn test_bad_direction_is_case_sensitive() {
        let err = parse_sort_by(&["timestamp DESC"], DESC).unwrap_err();
        assert_eq!(err.to_string(), "sort_by value DESC must be 'asc' or 'desc'");
    }

    #[test]
    fn test_too_many_tokens() {
        let err = parse_sort_by(&["timestamp asc now"], DESC).unwrap_err();
        assert_eq!(err.to_string(), "Invalid sort_by timestamp asc now");
    }
}
