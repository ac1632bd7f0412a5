//! Request validation shared by the services.

use std::collections::HashSet;

use sheetbase_core::{ValidationError, ID_COLUMN, MAX_ROW_LIMIT};

/// Reject empty or whitespace-only names.
pub fn require_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::malformed(field, "must not be empty"));
    }
    Ok(())
}

/// Column names must be non-empty, unique, and must not shadow `id`.
pub fn validate_headers(headers: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(headers.len());
    for header in headers {
        if header.trim().is_empty() {
            return Err(ValidationError::malformed(
                "column_headers",
                "column names must not be empty",
            ));
        }
        if header.eq_ignore_ascii_case(ID_COLUMN) {
            return Err(ValidationError::malformed(
                "column_headers",
                format!("'{}' is reserved for the row identifier", header),
            ));
        }
        if !seen.insert(header.as_str()) {
            return Err(ValidationError::malformed(
                "column_headers",
                format!("duplicate column '{}'", header),
            ));
        }
    }
    Ok(())
}

/// Resolve the row limit of a read, applying `default` when absent.
pub fn resolve_limit(requested: Option<usize>, default: usize) -> Result<usize, ValidationError> {
    let limit = requested.unwrap_or(default);
    if !(1..=MAX_ROW_LIMIT).contains(&limit) {
        return Err(ValidationError::InvalidRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_ROW_LIMIT,
        });
    }
    Ok(limit)
}
