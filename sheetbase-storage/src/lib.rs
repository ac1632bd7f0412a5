//! SHEETBASE Storage
//!
//! Everything that touches durable or remote state:
//! - [`TitleRegistry`]: the title -> collection id file, guarded by a writer lock
//! - [`GridStore`]: the remote grid capability the API calls through
//! - [`MockGridStore`]: in-memory `GridStore` for tests and local development
//! - [`AppendLocks`]: per-table mutexes that serialise identifier assignment

pub mod locks;
pub mod mock;
pub mod registry;
pub mod store;

pub use locks::AppendLocks;
pub use mock::MockGridStore;
pub use registry::{RegistryTxn, TitleRegistry, REGISTRY_FILE_MODE};
pub use store::GridStore;
