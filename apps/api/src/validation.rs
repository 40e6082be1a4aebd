//! Request field validation shared by the record handlers.

use crate::errors::AppError;

/// Trims `value` and fails when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trimmed text, or `None` when absent or blank.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Loose shape check: one `@` with something on both sides and a dot in the domain.
pub fn require_email(value: &str) -> Result<String, AppError> {
    let email = require_text("email", value)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation(format!("'{email}' is not a valid email")));
    }
    Ok(email)
}

/// Attendance is a percentage in `0..=100`.
pub fn require_attendance(value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::Validation(format!(
            "attendance must be a percentage between 0 and 100, got {value}"
        )));
    }
    Ok(value)
}
