//! # Pantry Core
//!
//! Core library for Pantry - a local-first personal recipe manager.
//!
//! This crate provides the domain model, storage abstractions, and the XML
//! interchange codec independent of any user interface.
//!
//! ## Architecture
//!
//! - **model**: the `Recipe` aggregate and its owned value objects
//! - **storage**: backend trait, SQLite and JSON-file engines, manager
//! - **xml**: dual-schema export/import with per-recipe failure isolation
//! - **media**: media file intake into embedded data-URI payloads
//! - **error**: one typed error family per concern

pub mod error;
pub mod fs;
pub mod media;
pub mod model;
pub mod storage;
pub mod xml;

pub use error::{ExportError, ImportError, MediaError, StorageError, ValidationError};
pub use model::{Ingredient, MediaFile, Recipe, Sequence};
pub use storage::{BackendKind, StorageConfig, StorageManager};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
