// SPDX-License-Identifier: MPL-2.0
//! Export of the processed image with the current filters baked in.
//!
//! The export is captured as an [`ExportRequest`] at the moment the user
//! clicks export, then rendered to PNG on a blocking worker. Identical
//! requests always produce byte-identical files.

use crate::domain::editing::FilterChain;
use crate::media::filter::apply_to_image;
use image_rs::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Prefix added to the exported file name.
pub const EXPORT_PREFIX: &str = "colorized-";

/// Name used when the source file name is unknown.
const FALLBACK_NAME: &str = "image";

/// Errors that can occur while exporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// No processed image is available yet.
    NothingToExport,
    /// The image could not be rendered into a pixel buffer.
    Render(String),
    /// PNG encoding failed.
    Encode(String),
    /// Writing the file failed.
    Io(String),
}

impl ExportError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ExportError::NothingToExport => "error-export-nothing",
            ExportError::Render(_) => "error-export-render",
            ExportError::Encode(_) => "error-export-encode",
            ExportError::Io(_) => "error-export-io",
        }
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::NothingToExport => write!(f, "Nothing to export"),
            ExportError::Render(msg) => write!(f, "Render failed: {msg}"),
            ExportError::Encode(msg) => write!(f, "Encoding failed: {msg}"),
            ExportError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Everything needed to produce one exported file.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub image: Arc<DynamicImage>,
    pub chain: FilterChain,
    /// Suggested file name, e.g. `colorized-cat.jpg.png`.
    pub file_name: String,
}

/// Builds the suggested export name from the uploaded file name.
#[must_use]
pub fn file_name_for(original: Option<&str>) -> String {
    let name = original
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_NAME);
    format!("{EXPORT_PREFIX}{name}.png")
}

/// Applies `chain` to `image` at native resolution and encodes a PNG.
///
/// # Errors
///
/// Returns [`ExportError::Render`] for an empty image and
/// [`ExportError::Encode`] if PNG encoding fails.
pub fn render_png(image: &DynamicImage, chain: &FilterChain) -> Result<Vec<u8>, ExportError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::Render(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    let rgba = apply_to_image(image, chain);
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Renders `request` and writes it to `path` on a blocking worker.
///
/// # Errors
///
/// Propagates rendering errors and returns [`ExportError::Io`] when the
/// file cannot be written.
pub async fn export_to_path(request: ExportRequest, path: PathBuf) -> Result<PathBuf, ExportError> {
    tokio::task::spawn_blocking(move || write_export(&request, &path).map(|()| path))
        .await
        .map_err(|e| ExportError::Render(e.to_string()))?
}

fn write_export(request: &ExportRequest, path: &Path) -> Result<(), ExportError> {
    let bytes = render_png(&request.image, &request.chain)?;
    std::fs::write(path, bytes).map_err(|e| ExportError::Io(e.to_string()))
}
