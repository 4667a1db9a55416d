//! Snapshot persistence: format, storage backends, and the save service.

mod service;
mod snapshot;
mod store;

pub use service::SaveService;
pub use snapshot::{SaveSnapshot, SNAPSHOT_VERSION};
pub use store::{FileSaveStore, MemorySaveStore, SaveStore};
