//! Custom extractors.

pub mod body;

pub use body::{ApiJson, ApiQuery};
