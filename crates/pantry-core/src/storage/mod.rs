//! Recipe persistence: the backend trait, both engines, and the manager.

mod json_file;
mod manager;
mod sqlite;
mod traits;

pub use json_file::JsonFileStore;
pub use manager::{StorageConfig, StorageManager, DEFAULT_FALLBACK_QUOTA_BYTES};
pub use sqlite::SqliteStore;
pub use traits::{BackendKind, StorageBackend};
