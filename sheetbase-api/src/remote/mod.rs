//! Remote grid store adapters.

pub mod instrumented;
pub mod sheets;
pub mod wire;

pub use instrumented::InstrumentedStore;
pub use sheets::SheetsClient;
