//! Command handlers.

mod misc;
mod recipes;
mod transfer;

pub use misc::handle_completions;
pub use recipes::{
    handle_add, handle_categories, handle_clear, handle_delete, handle_list, handle_show,
};
pub use transfer::{handle_export, handle_import};

use pantry_core::StorageManager;

use crate::cli::Cli;
use crate::config;

/// Open the storage manager for this invocation.
pub fn open_manager(cli: &Cli) -> anyhow::Result<StorageManager> {
    let storage_config = config::resolve_storage(cli.data_dir.as_deref())?;
    let manager = StorageManager::open(&storage_config)
        .map_err(|e| anyhow::anyhow!("Cannot open recipe storage ({}): {}", e.code(), e))?;
    tracing::debug!(backend = %manager.backend_kind(), "storage ready");
    Ok(manager)
}
