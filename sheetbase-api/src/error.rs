//! Error Types for SHEETBASE API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//! - Conversions from the core error taxonomy
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sheetbase_core::{RegistryError, SheetbaseError, StoreError, TableError, ValidationError};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request body or path is not usable as given
    MalformedRequest,

    /// Field value is out of valid range
    InvalidRange,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// No collection is registered under the title
    CollectionNotFound,

    /// The collection has no table with the requested name
    TableNotFound,

    /// The registry points at a collection the remote store does not know
    RemoteCollectionNotFound,

    // ========================================================================
    // Conflict Errors (409)
    // ========================================================================
    /// A collection with the title is already registered
    CollectionAlreadyExists,

    /// A table with the name already exists in the collection
    TableAlreadyExists,

    /// The table has no header row, so objects cannot be keyed or numbered
    TableHeaderMissing,

    // ========================================================================
    // Upstream Errors (502, 504)
    // ========================================================================
    /// The remote store refused to create a collection or table
    CreateFailed,

    /// The remote store refused to append a row
    AppendFailed,

    /// The remote store rejected the configured credentials
    UpstreamUnauthorized,

    /// The remote store could not be reached or answered unexpectedly
    UpstreamError,

    /// Remote operation timed out
    Timeout,

    // ========================================================================
    // Server Errors (500)
    // ========================================================================
    /// The title registry could not be read or written
    RegistryError,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::MalformedRequest | ErrorCode::InvalidRange => StatusCode::BAD_REQUEST,

            ErrorCode::CollectionNotFound
            | ErrorCode::TableNotFound
            | ErrorCode::RemoteCollectionNotFound => StatusCode::NOT_FOUND,

            ErrorCode::CollectionAlreadyExists
            | ErrorCode::TableAlreadyExists
            | ErrorCode::TableHeaderMissing => StatusCode::CONFLICT,

            ErrorCode::CreateFailed
            | ErrorCode::AppendFailed
            | ErrorCode::UpstreamUnauthorized
            | ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,

            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,

            ErrorCode::RegistryError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::MalformedRequest => "Malformed request",
            ErrorCode::InvalidRange => "Value is out of valid range",
            ErrorCode::CollectionNotFound => "Collection not found",
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::RemoteCollectionNotFound => "Collection not found in remote store",
            ErrorCode::CollectionAlreadyExists => "Collection already exists",
            ErrorCode::TableAlreadyExists => "Table already exists",
            ErrorCode::TableHeaderMissing => "Table has no header row",
            ErrorCode::CreateFailed => "Remote create failed",
            ErrorCode::AppendFailed => "Remote append failed",
            ErrorCode::UpstreamUnauthorized => "Remote store rejected credentials",
            ErrorCode::UpstreamError => "Remote store error",
            ErrorCode::Timeout => "Operation timed out",
            ErrorCode::RegistryError => "Title registry unavailable",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedRequest, message)
    }

    pub fn invalid_range(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidRange,
            format!("Field '{}' must be between {} and {}", field, min, max),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    pub fn collection_not_found(title: &str) -> Self {
        Self::new(
            ErrorCode::CollectionNotFound,
            format!("No collection registered under title '{}'", title),
        )
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM CORE ERRORS
// ============================================================================

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::NotFound { title } => ApiError::collection_not_found(title),
            RegistryError::Conflict { .. } => {
                ApiError::new(ErrorCode::CollectionAlreadyExists, err.to_string())
            }
            RegistryError::Corrupt { .. } | RegistryError::Io { .. } => {
                // Keep file paths out of responses
                tracing::error!(error = %err, "Title registry failure");
                ApiError::from_code(ErrorCode::RegistryError)
            }
        }
    }
}

impl From<TableError> for ApiError {
    fn from(err: TableError) -> Self {
        let code = match err {
            TableError::TableNotFound { .. } => ErrorCode::TableNotFound,
            TableError::TableConflict { .. } => ErrorCode::TableAlreadyExists,
            TableError::MissingHeader { .. } => ErrorCode::TableHeaderMissing,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let code = match err {
            StoreError::CollectionNotFound { .. } => ErrorCode::RemoteCollectionNotFound,
            StoreError::CreateFailed { .. } => ErrorCode::CreateFailed,
            StoreError::AppendFailed { .. } => ErrorCode::AppendFailed,
            StoreError::Conflict { .. } => ErrorCode::TableAlreadyExists,
            StoreError::Unauthorized { .. } => ErrorCode::UpstreamUnauthorized,
            StoreError::Timeout { .. } => ErrorCode::Timeout,
            StoreError::Transport { .. } | StoreError::InvalidResponse { .. } => {
                ErrorCode::UpstreamError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::MalformedRequest { field, .. } => {
                ApiError::malformed_request(err.to_string())
                    .with_details(serde_json::json!({ "field": field }))
            }
            ValidationError::InvalidRange { field, min, max } => {
                ApiError::invalid_range(field, min, max)
            }
        }
    }
}

impl From<SheetbaseError> for ApiError {
    fn from(err: SheetbaseError) -> Self {
        match err {
            SheetbaseError::Registry(e) => e.into(),
            SheetbaseError::Table(e) => e.into(),
            SheetbaseError::Store(e) => e.into(),
            SheetbaseError::Validation(e) => e.into(),
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::MalformedRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidRange.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::CollectionNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::TableNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::CollectionAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::TableHeaderMissing.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::AppendFailed.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorCode::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ErrorCode::RegistryError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_registry_errors_map_to_codes() {
        let not_found: ApiError = RegistryError::NotFound {
            title: "Contacts".into(),
        }
        .into();
        assert_eq!(not_found.code, ErrorCode::CollectionNotFound);
        assert!(not_found.message.contains("Contacts"));

        let conflict: ApiError = RegistryError::Conflict {
            title: "Contacts".into(),
        }
        .into();
        assert_eq!(conflict.code, ErrorCode::CollectionAlreadyExists);

        let corrupt: ApiError = RegistryError::Corrupt {
            path: "/srv/data/spreadsheetIDs.json".into(),
            reason: "expected value".into(),
        }
        .into();
        assert_eq!(corrupt.code, ErrorCode::RegistryError);
        assert!(!corrupt.message.contains("/srv/data"));
    }

    #[test]
    fn test_table_errors_map_to_codes() {
        let missing_header: ApiError = TableError::MissingHeader {
            collection: "Contacts".into(),
            table: "Sheet1".into(),
        }
        .into();
        assert_eq!(missing_header.code, ErrorCode::TableHeaderMissing);
        assert!(missing_header.message.contains("Sheet1"));
        assert!(missing_header.message.contains("no header row"));

        let conflict: ApiError = TableError::TableConflict {
            collection: "Contacts".into(),
            table: "People".into(),
        }
        .into();
        assert_eq!(conflict.code, ErrorCode::TableAlreadyExists);
    }

    #[test]
    fn test_store_errors_map_to_codes() {
        let cases = [
            (
                StoreError::CollectionNotFound {
                    collection_id: "x".into(),
                },
                ErrorCode::RemoteCollectionNotFound,
            ),
            (StoreError::CreateFailed { reason: "r".into() }, ErrorCode::CreateFailed),
            (StoreError::AppendFailed { reason: "r".into() }, ErrorCode::AppendFailed),
            (StoreError::Conflict { reason: "r".into() }, ErrorCode::TableAlreadyExists),
            (StoreError::Unauthorized { reason: "r".into() }, ErrorCode::UpstreamUnauthorized),
            (StoreError::Timeout { operation: "get".into() }, ErrorCode::Timeout),
            (StoreError::Transport { reason: "r".into() }, ErrorCode::UpstreamError),
            (StoreError::InvalidResponse { reason: "r".into() }, ErrorCode::UpstreamError),
        ];
        for (err, code) in cases {
            assert_eq!(ApiError::from(err).code, code);
        }
    }

    #[test]
    fn test_validation_errors_carry_field() {
        let err: ApiError = ValidationError::malformed("column_headers", "duplicate").into();
        assert_eq!(err.code, ErrorCode::MalformedRequest);
        assert_eq!(err.details, Some(serde_json::json!({ "field": "column_headers" })));

        let err: ApiError = ValidationError::InvalidRange {
            field: "limit".into(),
            min: 1,
            max: 1000,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidRange);
        assert!(err.message.contains("1000"));
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::from_code(ErrorCode::TableNotFound);
        let json = serde_json::to_string(&err)?;
        assert!(json.contains("TABLE_NOT_FOUND"));
        assert!(!json.contains("details"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::internal_error("boom");
        let display = format!("{}", err);
        assert!(display.contains("InternalError"));
        assert!(display.contains("boom"));
    }
}
