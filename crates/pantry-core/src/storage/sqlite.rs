//! Primary storage engine: file-backed SQLite.
//!
//! One row per recipe. The aggregate is stored as a JSON payload column;
//! `name`, `category` and the timestamps are broken out for indexing and
//! listing without decoding every payload.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::StorageError;
use crate::model::Recipe;
use crate::storage::traits::{BackendKind, StorageBackend};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT,
    payload_json TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_recipes_category ON recipes(category);
"#;

/// File-backed SQLite recipe store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DbNotAvailable`] if the file cannot be opened
    /// or the schema cannot be installed; the caller decides whether a
    /// fallback engine takes over.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)
            .map_err(|e| StorageError::DbNotAvailable(format!("{}: {}", path.display(), e)))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| StorageError::DbNotAvailable(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| StorageError::DbNotAvailable(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StorageError::DbNotAvailable(e.to_string()))?;

        tracing::info!(path = %path.display(), "opened sqlite recipe store");

        Ok(Self { conn })
    }

    fn decode(payload: &str) -> Result<Recipe, StorageError> {
        serde_json::from_str(payload)
            .map_err(|e| StorageError::InvalidData(format!("corrupt recipe payload: {}", e)))
    }
}

/// Classify a SQLite failure: out-of-space conditions are quota errors,
/// everything else is a generic transaction failure.
fn map_backend_err(err: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if matches!(
            code.code,
            rusqlite::ErrorCode::DiskFull | rusqlite::ErrorCode::SystemIoFailure
        ) {
            return StorageError::QuotaExceeded(err.to_string());
        }
    }
    StorageError::TransactionFailed(err.to_string())
}

impl StorageBackend for SqliteStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn put(&mut self, recipe: &Recipe) -> Result<(), StorageError> {
        let payload = serde_json::to_string(recipe)
            .map_err(|e| StorageError::InvalidData(format!("unserializable recipe: {}", e)))?;

        self.conn
            .execute(
                r#"
                INSERT INTO recipes (id, name, category, payload_json, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    category = excluded.category,
                    payload_json = excluded.payload_json,
                    created_at = excluded.created_at,
                    updated_at = excluded.updated_at
                "#,
                (
                    recipe.id.to_string(),
                    &recipe.name,
                    recipe.category.as_deref(),
                    payload,
                    recipe.created_at.to_rfc3339(),
                    recipe.updated_at.to_rfc3339(),
                ),
            )
            .map_err(map_backend_err)?;

        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Recipe>, StorageError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload_json FROM recipes WHERE id = ?",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(map_backend_err)?;

        match payload {
            Some(payload) => Ok(Some(Self::decode(&payload)?)),
            None => Ok(None),
        }
    }

    fn get_all(&self) -> Result<Vec<Recipe>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload_json FROM recipes ORDER BY created_at DESC")
            .map_err(map_backend_err)?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(map_backend_err)?;

        let mut recipes = Vec::new();
        for payload in rows {
            recipes.push(Self::decode(&payload.map_err(map_backend_err)?)?);
        }
        Ok(recipes)
    }

    fn delete(&mut self, id: &Uuid) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM recipes WHERE id = ?", [id.to_string()])
            .map_err(map_backend_err)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM recipes", [])
            .map_err(map_backend_err)?;
        Ok(())
    }
}
