use crate::error::AppError;

/// Trims `raw` and rejects blank or over-long values.
pub fn required_text(field: &str, raw: &str, max_len: usize) -> Result<String, AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

/// Like `required_text`, but blank input becomes `None`.
pub fn optional_text(field: &str, raw: Option<&str>, max_len: usize) -> Result<Option<String>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, max_len).map(Some),
    }
}

pub fn non_negative(field: &str, value: Option<f64>) -> Result<Option<f64>, AppError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::Validation(format!(
            "{field} must be a non-negative number"
        ))),
        other => Ok(other),
    }
}

pub fn quantity(value: i32) -> Result<i32, AppError> {
    if value < 1 {
        return Err(AppError::Validation("quantity must be at least 1 gram".into()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("name", "  Lunch ", 64).unwrap(), "Lunch");
        assert!(required_text("name", "   ", 64).is_err());
        assert!(required_text("name", "abcdef", 5).is_err());
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text("phone", None, 10).unwrap(), None);
        assert_eq!(optional_text("phone", Some("  "), 10).unwrap(), None);
        assert_eq!(
            optional_text("phone", Some(" 555 "), 10).unwrap(),
            Some("555".to_string())
        );
    }

    #[test]
    fn macros_must_be_finite_and_non_negative() {
        assert_eq!(non_negative("fat", None).unwrap(), None);
        assert_eq!(non_negative("fat", Some(0.0)).unwrap(), Some(0.0));
        assert!(non_negative("fat", Some(-0.1)).is_err());
        assert!(non_negative("fat", Some(f64::NAN)).is_err());
        assert!(non_negative("fat", Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn quantity_is_at_least_one_gram() {
        assert_eq!(quantity(1).unwrap(), 1);
        assert!(quantity(0).is_err());
        assert!(quantity(-5).is_err());
    }
}
