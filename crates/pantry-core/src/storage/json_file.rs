//! Fallback storage engine: a single JSON document with a byte quota.
//!
//! Engaged when SQLite cannot be opened. Recipes are held in memory in
//! insertion order and the whole document is rewritten atomically (temp file
//! plus rename) on every mutation. The configurable quota stands in for the
//! storage limit of the key-value store this engine replaces; a write that
//! would exceed it is rejected before anything touches disk.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::error::StorageError;
use crate::model::Recipe;
use crate::storage::traits::{BackendKind, StorageBackend};

/// JSON-document recipe store.
pub struct JsonFileStore {
    path: PathBuf,
    max_bytes: u64,
    recipes: Vec<Recipe>,
}

impl JsonFileStore {
    /// Open (or create) the store backed by the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DbNotAvailable`] if an existing document
    /// cannot be read or decoded.
    pub fn open(path: &Path, max_bytes: u64) -> Result<Self, StorageError> {
        let recipes = if path.exists() {
            let raw = fs::read_to_string(path)
                .map_err(|e| StorageError::DbNotAvailable(format!("{}: {}", path.display(), e)))?;
            if raw.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    StorageError::DbNotAvailable(format!(
                        "corrupt store document {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            Vec::new()
        };

        tracing::info!(path = %path.display(), recipes = recipes.len(), "opened json recipe store");

        Ok(Self {
            path: path.to_path_buf(),
            max_bytes,
            recipes,
        })
    }

    /// Serialize `recipes`, enforce the quota, and swap the document in
    /// atomically. The in-memory state is only committed by the caller once
    /// this succeeds.
    fn persist(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(recipes)
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))?;

        if payload.len() as u64 > self.max_bytes {
            return Err(StorageError::QuotaExceeded(format!(
                "store document would grow to {} bytes (quota {})",
                payload.len(),
                self.max_bytes
            )));
        }

        let parent = self.path.parent().ok_or_else(|| {
            StorageError::TransactionFailed(format!("invalid store path {}", self.path.display()))
        })?;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| StorageError::TransactionFailed(format!("system time error: {}", e)))?
            .as_nanos();
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StorageError::TransactionFailed(format!(
                    "invalid store filename {}",
                    self.path.display()
                ))
            })?;
        let temp_path = parent.join(format!("{}.{}.tmp", filename, nanos));

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|e| StorageError::TransactionFailed(format!("temp file create: {}", e)))?;
        file.write_all(&payload)
            .map_err(|e| StorageError::TransactionFailed(format!("temp file write: {}", e)))?;
        file.sync_all()
            .map_err(|e| StorageError::TransactionFailed(format!("temp file sync: {}", e)))?;
        drop(file);

        crate::fs::rename_with_fallback(&temp_path, &self.path)
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}

impl StorageBackend for JsonFileStore {
    fn kind(&self) -> BackendKind {
        BackendKind::JsonFile
    }

    fn put(&mut self, recipe: &Recipe) -> Result<(), StorageError> {
        let mut candidate = self.recipes.clone();
        match candidate.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe.clone(),
            None => candidate.push(recipe.clone()),
        }
        self.persist(&candidate)?;
        self.recipes = candidate;
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Recipe>, StorageError> {
        Ok(self.recipes.iter().find(|r| r.id == *id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Recipe>, StorageError> {
        Ok(self.recipes.clone())
    }

    fn delete(&mut self, id: &Uuid) -> Result<(), StorageError> {
        let candidate: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|r| r.id != *id)
            .cloned()
            .collect();
        if candidate.len() == self.recipes.len() {
            return Ok(());
        }
        self.persist(&candidate)?;
        self.recipes = candidate;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.persist(&[])?;
        self.recipes.clear();
        Ok(())
    }
}
