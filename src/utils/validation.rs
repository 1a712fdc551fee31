use crate::utils::error::{AssistError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(AssistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AssistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AssistError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AssistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so check containment instead of exclusion.
    if !(value >= min && value <= max) {
        return Err(AssistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Fails on the first id that appears twice.
pub fn validate_unique_ids<'a, I>(field_name: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AssistError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.to_string(),
                reason: "Duplicate id".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("catalog.path", "data/catalog.toml").is_ok());
        assert!(validate_path("catalog.path", "   ").is_err());
        assert!(validate_path("catalog.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("rating", 4.8, 0.0, 5.0).is_ok());
        assert!(validate_range("rating", 5.1, 0.0, 5.0).is_err());
        assert!(validate_range("rating", f64::NAN, 0.0, 5.0).is_err());
        assert!(validate_range("thinking_delay_ms", 1500u64, 0, 10_000).is_ok());
    }

    #[test]
    fn test_validate_unique_ids() {
        assert!(validate_unique_ids("categories.id", ["plastic", "paper"]).is_ok());

        let err = validate_unique_ids("categories.id", ["plastic", "paper", "plastic"]).unwrap_err();
        match err {
            AssistError::InvalidConfigValueError { value, .. } => assert_eq!(value, "plastic"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("x", &present).unwrap(), 3);
        assert!(validate_required_field("x", &missing).is_err());
    }
}
