//! Storage backend trait definition.
//!
//! The [`StorageBackend`] trait is the minimal keyed-store contract both
//! engines implement: put, get, get_all, delete, clear. Everything richer
//! (update-requires-existing, category filtering, timestamp stamping) lives
//! in [`crate::storage::StorageManager`] so callers never see which engine
//! is underneath.

use uuid::Uuid;

use crate::error::StorageError;
use crate::model::Recipe;

/// Which engine a manager ended up on. Exposed for logging and diagnostics
/// only; no storage behavior may branch on it outside the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Primary engine: file-backed SQLite.
    Sqlite,
    /// Fallback engine: a single JSON document with a byte quota.
    JsonFile,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::JsonFile => write!(f, "json-file"),
        }
    }
}

/// Keyed recipe store.
///
/// All implementations must ensure:
/// - `put` upserts by recipe id as one atomic unit
/// - `delete` is idempotent (removing an absent id succeeds)
/// - a write rejected for lack of space maps to
///   [`StorageError::QuotaExceeded`], any other backend failure to
///   [`StorageError::TransactionFailed`]
pub trait StorageBackend: Send {
    /// Which engine this is.
    fn kind(&self) -> BackendKind;

    /// Insert or replace the record stored under `recipe.id`.
    fn put(&mut self, recipe: &Recipe) -> Result<(), StorageError>;

    /// Returns `Ok(Some(recipe))` if found, `Ok(None)` if not found.
    fn get(&self, id: &Uuid) -> Result<Option<Recipe>, StorageError>;

    /// Every stored recipe, in backend-appropriate order.
    fn get_all(&self) -> Result<Vec<Recipe>, StorageError>;

    /// Remove the record under `id`, if any.
    fn delete(&mut self, id: &Uuid) -> Result<(), StorageError>;

    /// Wipe the entire store.
    fn clear(&mut self) -> Result<(), StorageError>;
}
