//! Per-file metadata extraction.
//!
//! The extension picks a [`ContainerFormat`]; the container is decoded with
//! lofty and its tags normalized into a [`FileRecord`]. Missing tags become
//! `"Unknown"` and a missing duration becomes 0. Only a container that fails
//! to decode makes the whole extraction fail.

mod format;

pub use format::{ContainerFormat, RawTags};

use crate::model::{FileRecord, UNKNOWN};
use lofty::error::LoftyError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("Error processing file {}: {cause}", .path.display())]
pub struct ExtractionError {
    pub path: PathBuf,
    pub cause: ExtractionCause,
}

#[derive(Debug, Error)]
pub enum ExtractionCause {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] LoftyError),
}

/// Build a [`FileRecord`] for `path`.
pub fn extract(path: &Path) -> Result<FileRecord, ExtractionError> {
    let fail = |cause: ExtractionCause| ExtractionError {
        path: path.to_path_buf(),
        cause,
    };

    let size_bytes = fs::metadata(path).map_err(|e| fail(e.into()))?.len();
    let extension = extension_of(path);
    let format = ContainerFormat::from_extension(&extension);
    let tags = format.read_tags(path).map_err(|e| fail(e.into()))?;

    debug!("Retrieved metadata for file: {}", path.display());

    Ok(FileRecord {
        path: path.to_string_lossy().into_owned(),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size_bytes,
        extension,
        artist: tags.artist.unwrap_or_else(|| UNKNOWN.to_string()),
        album: tags.album.unwrap_or_else(|| UNKNOWN.to_string()),
        title: tags.title.unwrap_or_else(|| UNKNOWN.to_string()),
        // Truncated, never rounded up.
        duration_seconds: tags.duration.as_secs(),
    })
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
