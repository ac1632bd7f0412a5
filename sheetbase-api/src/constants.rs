//! Constants for SHEETBASE API
//!
//! Centralized defaults for configuration and the remote client.

// ============================================================================
// SERVER
// ============================================================================

/// Default bind host
pub const DEFAULT_BIND_HOST: &str = "127.0.0.1";

/// Default bind port
pub const DEFAULT_PORT: u16 = 3333;

/// Default location of the title registry file
pub const DEFAULT_REGISTRY_PATH: &str = "data/spreadsheetIDs.json";

// ============================================================================
// REMOTE STORE
// ============================================================================

/// Google Sheets v4 REST base URL
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Default timeout applied to every remote call (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// CORS
// ============================================================================

/// Default CORS max age in seconds (24 hours)
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 86400;

// ============================================================================
// LOGGING
// ============================================================================

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "sheetbase_api=debug,tower_http=debug,info";

// ============================================================================
// HEADERS
// ============================================================================

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";
