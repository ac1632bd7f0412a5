//! Error types for SHEETBASE operations

use thiserror::Error;

/// Title registry errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No collection registered under title '{title}'")]
    NotFound { title: String },

    #[error("Title '{title}' is already registered")]
    Conflict { title: String },

    #[error("Registry file {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Registry I/O failed for {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Table lookup errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Unable to find table '{table}' in collection '{collection}'")]
    TableNotFound { collection: String, table: String },

    #[error("Table '{table}' already exists in collection '{collection}'")]
    TableConflict { collection: String, table: String },

    #[error("Table '{table}' in collection '{collection}' has no header row")]
    MissingHeader { collection: String, table: String },
}

/// Remote grid store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Remote collection {collection_id} not found")]
    CollectionNotFound { collection_id: String },

    #[error("Create failed: {reason}")]
    CreateFailed { reason: String },

    #[error("Append failed: {reason}")]
    AppendFailed { reason: String },

    #[error("Remote conflict: {reason}")]
    Conflict { reason: String },

    #[error("Remote store rejected credentials: {reason}")]
    Unauthorized { reason: String },

    #[error("Remote operation '{operation}' timed out")]
    Timeout { operation: String },

    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Invalid response from remote store: {reason}")]
    InvalidResponse { reason: String },
}

/// Request validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed request field '{field}': {reason}")]
    MalformedRequest { field: String, reason: String },

    #[error("Field '{field}' must be between {min} and {max}")]
    InvalidRange { field: String, min: usize, max: usize },
}

impl ValidationError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Master error type for all SHEETBASE errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SheetbaseError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for SHEETBASE operations.
pub type SheetbaseResult<T> = Result<T, SheetbaseError>;

// =============================================================================
// TESTS
// =============================================================================
