//! Media file intake: from a file on disk to an embedded [`MediaFile`].
//!
//! Payloads are stored as base64 data-URIs so they can be embedded directly
//! in XML exports and rendered without touching the filesystem again.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::MediaError;
use crate::model::MediaFile;

/// Ceiling on the size of an embedded media payload.
pub const MAX_MEDIA_BYTES: u64 = 10 * 1024 * 1024;

/// Which media collection a file is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn mime_for_extension(self, extension: &str) -> Option<&'static str> {
        match self {
            MediaKind::Image => match extension {
                "png" => Some("image/png"),
                "jpg" | "jpeg" => Some("image/jpeg"),
                "gif" => Some("image/gif"),
                "webp" => Some("image/webp"),
                _ => None,
            },
            MediaKind::Video => match extension {
                "mp4" => Some("video/mp4"),
                "webm" => Some("video/webm"),
                "mov" => Some("video/quicktime"),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Read a media file from disk into a validated [`MediaFile`].
///
/// # Errors
///
/// [`MediaError::InvalidFormat`] for an unrecognized extension,
/// [`MediaError::ReadFailed`] if the file cannot be read,
/// [`MediaError::FileTooLarge`] above [`MAX_MEDIA_BYTES`].
pub fn load_media_file(path: &Path, kind: MediaKind) -> Result<MediaFile, MediaError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let mime = kind.mime_for_extension(&extension).ok_or_else(|| {
        MediaError::InvalidFormat(format!(
            "no {} format known for extension {:?}",
            kind, extension
        ))
    })?;

    let bytes = std::fs::read(path)
        .map_err(|e| MediaError::ReadFailed(format!("{}: {}", path.display(), e)))?;
    let size = bytes.len() as u64;
    if size > MAX_MEDIA_BYTES {
        return Err(MediaError::FileTooLarge {
            size,
            max: MAX_MEDIA_BYTES,
        });
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("media")
        .to_string();
    let data = format!("data:{};base64,{}", mime, STANDARD.encode(&bytes));

    MediaFile::new(name, mime, data, size).map_err(|e| MediaError::InvalidFormat(e.to_string()))
}
