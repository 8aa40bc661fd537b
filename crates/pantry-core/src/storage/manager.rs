//! The storage manager: recipe operations over whichever engine opened.
//!
//! Backend selection happens exactly once, inside [`StorageManager::open`]:
//! the primary SQLite engine is attempted first and a failure falls through,
//! permanently, to the JSON-file fallback. The chosen backend is immutable
//! for the manager's lifetime, so the original primary is never retried once
//! the fallback has been engaged.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::error::StorageError;
use crate::model::Recipe;
use crate::storage::json_file::JsonFileStore;
use crate::storage::sqlite::SqliteStore;
use crate::storage::traits::{BackendKind, StorageBackend};

/// Default byte quota for the JSON-file fallback document.
pub const DEFAULT_FALLBACK_QUOTA_BYTES: u64 = 10 * 1024 * 1024;

const DB_FILENAME: &str = "recipes.db";
const FALLBACK_FILENAME: &str = "recipes.json";

/// Where and how the manager stores its data.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the database (primary) and document (fallback).
    pub data_dir: PathBuf,

    /// Byte quota for the fallback document.
    pub fallback_max_bytes: u64,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            fallback_max_bytes: DEFAULT_FALLBACK_QUOTA_BYTES,
        }
    }

    pub fn with_fallback_quota(mut self, max_bytes: u64) -> Self {
        self.fallback_max_bytes = max_bytes;
        self
    }
}

/// Durable keyed storage for [`Recipe`] aggregates.
pub struct StorageManager {
    backend: Box<dyn StorageBackend>,
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager").finish_non_exhaustive()
    }
}

impl StorageManager {
    /// Open the store, preferring SQLite and falling back to the JSON-file
    /// engine.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DbNotAvailable`] only when neither engine is
    /// usable.
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir).map_err(|e| {
            StorageError::DbNotAvailable(format!(
                "cannot create data directory {}: {}",
                config.data_dir.display(),
                e
            ))
        })?;

        let primary_err = match SqliteStore::open(&config.data_dir.join(DB_FILENAME)) {
            Ok(store) => {
                return Ok(Self {
                    backend: Box::new(store),
                })
            }
            Err(err) => err,
        };

        tracing::warn!(
            error = %primary_err,
            "primary storage unavailable, falling back to json file store"
        );

        match JsonFileStore::open(
            &config.data_dir.join(FALLBACK_FILENAME),
            config.fallback_max_bytes,
        ) {
            Ok(store) => Ok(Self {
                backend: Box::new(store),
            }),
            Err(fallback_err) => Err(StorageError::DbNotAvailable(format!(
                "primary: {}; fallback: {}",
                primary_err, fallback_err
            ))),
        }
    }

    /// Which engine this manager ended up on. Diagnostics only.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Upsert `recipe` by id, stamping `updated_at`, and return the id.
    ///
    /// # Errors
    ///
    /// [`StorageError::InvalidData`] if the aggregate fails validation,
    /// [`StorageError::QuotaExceeded`] if the backend is out of space,
    /// [`StorageError::TransactionFailed`] for other backend failures.
    pub fn save_recipe(&mut self, recipe: &mut Recipe) -> Result<Uuid, StorageError> {
        recipe
            .validate()
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;
        recipe.updated_at = Utc::now();
        self.backend.put(recipe)?;
        Ok(recipe.id)
    }

    /// Returns `Ok(None)` for an unknown id; never an error.
    pub fn get_recipe(&self, id: &Uuid) -> Result<Option<Recipe>, StorageError> {
        self.backend.get(id)
    }

    /// Every stored recipe, in backend-appropriate order.
    pub fn get_all_recipes(&self) -> Result<Vec<Recipe>, StorageError> {
        self.backend.get_all()
    }

    /// Replace the record under `id`.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] if no record exists under `id`; otherwise
    /// behaves as [`Self::save_recipe`] with `recipe.id` forced to `id`.
    pub fn update_recipe(&mut self, id: &Uuid, recipe: &mut Recipe) -> Result<Uuid, StorageError> {
        if self.backend.get(id)?.is_none() {
            return Err(StorageError::NotFound(*id));
        }
        recipe.id = *id;
        self.save_recipe(recipe)
    }

    /// Idempotent removal; deleting an absent id succeeds.
    pub fn delete_recipe(&mut self, id: &Uuid) -> Result<(), StorageError> {
        self.backend.delete(id)
    }

    /// Equality filter over `category`.
    pub fn get_recipes_by_category(&self, category: &str) -> Result<Vec<Recipe>, StorageError> {
        let recipes = self.backend.get_all()?;
        Ok(recipes
            .into_iter()
            .filter(|r| r.category.as_deref() == Some(category))
            .collect())
    }

    /// Wipe the entire recipe store.
    pub fn clear_all_recipes(&mut self) -> Result<(), StorageError> {
        self.backend.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_prefers_sqlite() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::open(&StorageConfig::new(dir.path())).unwrap();
        assert_eq!(manager.backend_kind(), BackendKind::Sqlite);
    }

    #[test]
    fn test_open_falls_back_when_primary_unusable() {
        let dir = tempdir().unwrap();
        // A directory squatting on the database path makes SQLite unopenable.
        fs::create_dir_all(dir.path().join(DB_FILENAME)).unwrap();

        let manager = StorageManager::open(&StorageConfig::new(dir.path())).unwrap();
        assert_eq!(manager.backend_kind(), BackendKind::JsonFile);
    }

    #[test]
    fn test_open_fails_when_both_engines_unusable() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(DB_FILENAME)).unwrap();
        fs::write(dir.path().join(FALLBACK_FILENAME), "not json").unwrap();

        let err = StorageManager::open(&StorageConfig::new(dir.path())).unwrap_err();
        assert_eq!(err.code(), "DB_NOT_AVAILABLE");
    }

    #[test]
    fn test_save_rejects_invalid_aggregate() {
        let dir = tempdir().unwrap();
        let mut manager = StorageManager::open(&StorageConfig::new(dir.path())).unwrap();

        let mut recipe = Recipe::new("ok").unwrap();
        recipe.name = "  ".to_string();
        let err = manager.save_recipe(&mut recipe).unwrap_err();
        assert_eq!(err.code(), "INVALID_DATA");
    }
}
