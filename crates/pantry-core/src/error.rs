//! Error types for pantry core operations.
//!
//! One typed error family per concern: storage, import, export, media.
//! Each family carries a stable `code()` string so callers can branch on the
//! failure class without matching message text. Entity construction failures
//! use [`ValidationError`] and are surfaced directly, never wrapped into one
//! of the operation families.

use thiserror::Error;
use uuid::Uuid;

/// Entity construction violation. Raised synchronously by the `model`
/// constructors and by [`crate::model::Recipe::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty after trimming.
    #[error("{entity} {field} must not be blank")]
    BlankField {
        entity: &'static str,
        field: &'static str,
    },

    /// Ingredient quantity was negative, NaN, or infinite.
    #[error("ingredient quantity must be a finite, non-negative number")]
    InvalidQuantity,
}

/// Failures of the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected a write because of its storage limit.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Neither the primary nor the fallback backend could be opened.
    #[error("no usable storage backend: {0}")]
    DbNotAvailable(String),

    /// Any other backend failure during a storage operation.
    #[error("storage transaction failed: {0}")]
    TransactionFailed(String),

    /// An update targeted an id with no stored record.
    #[error("recipe {0} not found")]
    NotFound(Uuid),

    /// The value handed to the storage layer is not a valid recipe.
    #[error("invalid recipe data: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Stable machine-checkable code for this failure class.
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::QuotaExceeded(_) => "QUOTA_EXCEEDED",
            StorageError::DbNotAvailable(_) => "DB_NOT_AVAILABLE",
            StorageError::TransactionFailed(_) => "TRANSACTION_FAILED",
            StorageError::NotFound(_) => "NOT_FOUND",
            StorageError::InvalidData(_) => "INVALID_DATA",
        }
    }
}

/// Failures of the XML import path.
///
/// Per-recipe parse failures inside a batch are collected into the import
/// report rather than propagated; only document-level problems abort an
/// import as a whole.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input file failed pre-parse validation (extension, size bounds).
    #[error("invalid import file: {0}")]
    InvalidFile(String),

    /// The document is not well-formed XML. Carries the parser diagnostic.
    #[error("invalid XML: {0}")]
    InvalidXml(String),

    /// The document is well-formed but has no recognizable recipe structure.
    #[error("invalid document structure: {0}")]
    InvalidStructure(String),

    /// A single recipe element is missing mandatory data.
    #[error("invalid recipe data: {0}")]
    InvalidRecipeData(String),

    /// A media element could not be accepted.
    #[error("media error: {0}")]
    Media(String),

    /// Catch-all for reading or decoding the input.
    #[error("import parsing failed: {0}")]
    ParsingFailed(String),
}

impl ImportError {
    /// Stable machine-checkable code for this failure class.
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::InvalidFile(_) => "INVALID_FILE",
            ImportError::InvalidXml(_) => "INVALID_XML",
            ImportError::InvalidStructure(_) => "INVALID_STRUCTURE",
            ImportError::InvalidRecipeData(_) => "INVALID_RECIPE_DATA",
            ImportError::Media(_) => "MEDIA_ERROR",
            ImportError::ParsingFailed(_) => "PARSING_FAILED",
        }
    }
}

/// Failures of the XML export path.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Document generation failed.
    #[error("export generation failed: {0}")]
    GenerationFailed(String),

    /// The generated document could not be written to its destination.
    #[error("export write failed: {0}")]
    WriteFailed(String),

    /// The recipes handed to the exporter are unusable (e.g. an empty set).
    #[error("invalid export data: {0}")]
    InvalidData(String),
}

impl ExportError {
    /// Stable machine-checkable code for this failure class.
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::GenerationFailed(_) => "GENERATION_FAILED",
            ExportError::WriteFailed(_) => "WRITE_FAILED",
            ExportError::InvalidData(_) => "INVALID_DATA",
        }
    }
}

/// Failures while taking a media file into a recipe.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The source file exceeds the media size ceiling.
    #[error("media file too large ({size} bytes, max {max})")]
    FileTooLarge { size: u64, max: u64 },

    /// The file extension maps to no accepted image/video format.
    #[error("unsupported media format: {0}")]
    InvalidFormat(String),

    /// The source file could not be read.
    #[error("failed to read media file: {0}")]
    ReadFailed(String),
}

impl MediaError {
    /// Stable machine-checkable code for this failure class.
    pub fn code(&self) -> &'static str {
        match self {
            MediaError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            MediaError::InvalidFormat(_) => "INVALID_FORMAT",
            MediaError::ReadFailed(_) => "READ_FAILED",
        }
    }
}
