use crate::error::ApiError;

/// Present and not blank, trimmed.
pub fn required_text(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{field} is required"))),
    }
}

pub fn required_amount(field: &str, value: Option<f64>) -> Result<f64, ApiError> {
    value.ok_or_else(|| ApiError::validation(format!("{field} is required")))
}

pub fn non_negative(field: &str, value: f64) -> Result<f64, ApiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ApiError::validation(format!("{field} must not be negative")))
    }
}
