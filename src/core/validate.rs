//! Request-level validation helpers used by the managers.

use crate::error::ApiError;

/// Reject empty or whitespace-only values, returning the trimmed string.
pub fn non_empty(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        tracing::warn!(field, "validation failed: empty value");
        return Err(ApiError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Minimal shape check for an email address. Full RFC validation belongs to
/// the Graph API, which rejects unknown addresses anyway.
pub fn email(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = non_empty(value, field)?;
    let valid = matches!(
        trimmed.split_once('@'),
        Some((local, domain)) if !local.is_empty() && domain.contains('.')
    );
    if !valid {
        tracing::warn!(field, "validation failed: not an email address");
        return Err(ApiError::Validation(format!(
            "{field} is not a valid email address: {trimmed}"
        )));
    }
    Ok(trimmed)
}
