// SPDX-License-Identifier: MPL-2.0
//! Upload intake: turns a picked or dropped path into a validated image file.

use image_rs::ImageFormat;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Errors raised while accepting a file for colorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// The file is not a raster image format we can decode.
    NotAnImage(String),
    /// The file could not be read.
    Io(String),
}

impl IntakeError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            IntakeError::NotAnImage(_) => "error-intake-not-image",
            IntakeError::Io(_) => "error-intake-io",
        }
    }
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::NotAnImage(name) => write!(f, "Not an image: {name}"),
            IntakeError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for IntakeError {}

/// A user-selected image file, read fully into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File name shown in the UI and sent to the service.
    pub name: String,
    /// MIME type derived from the detected image format.
    pub mime: &'static str,
    pub bytes: Arc<Vec<u8>>,
}

impl SourceFile {
    /// Reads `path` and validates that it holds an image.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Io`] when the file cannot be read and
    /// [`IntakeError::NotAnImage`] when neither its content nor its
    /// extension identify a decodable image format.
    pub fn load(path: &Path) -> Result<Self, IntakeError> {
        let bytes = std::fs::read(path).map_err(|e| IntakeError::Io(e.to_string()))?;
        Self::from_bytes(path.to_path_buf(), bytes)
    }

    /// Validates bytes that were already read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NotAnImage`] for non-image content.
    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>) -> Result<Self, IntakeError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let format = detect_format(&path, &bytes)
            .ok_or_else(|| IntakeError::NotAnImage(name.clone()))?;

        Ok(Self {
            path,
            name,
            mime: format.to_mime_type(),
            bytes: Arc::new(bytes),
        })
    }
}

/// Sniffs the format from content, falling back to the file extension.
fn detect_format(path: &Path, bytes: &[u8]) -> Option<ImageFormat> {
    image_rs::guess_format(bytes)
        .ok()
        .or_else(|| ImageFormat::from_path(path).ok())
        .filter(|format| format.reading_enabled())
}
