//! SHEETBASE API - REST Layer
//!
//! Exposes remote spreadsheets as a row-oriented data store over HTTP:
//! collections are registered by title in a local registry file, tables carry
//! a header row, and objects are appended as rows with positional
//! identifiers.
//!
//! The remote store is reached through the [`sheetbase_storage::GridStore`]
//! trait; [`remote::SheetsClient`] talks to the spreadsheet service and
//! [`sheetbase_storage::MockGridStore`] keeps everything in memory.

pub mod config;
pub mod constants;
pub mod error;
pub mod extractors;
pub mod macros;
pub mod openapi;
pub mod remote;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::{AccessToken, ApiConfig, Backend, ConfigError, LogFormat};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use remote::{InstrumentedStore, SheetsClient};
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
