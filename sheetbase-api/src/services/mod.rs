//! Services
//!
//! Domain logic behind the HTTP handlers. Services take their dependencies
//! explicitly and return [`sheetbase_core::SheetbaseResult`]; handlers turn
//! failures into `ApiError`s.

pub mod collection_service;
pub mod object_service;
pub mod table_service;
pub mod validation;

pub use collection_service::{
    create_collection, describe_collection, list_collections, resolve_collection,
};
pub use object_service::{append_object, AppendedRow};
pub use table_service::{create_table, list_tables, read_rows};
pub use validation::{require_name, resolve_limit, validate_headers};
