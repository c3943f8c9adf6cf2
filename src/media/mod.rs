// SPDX-License-Identifier: MPL-2.0
//! Image handling: intake, decoding, preview filtering and export.

pub mod export;
pub mod filter;
pub mod image;
pub mod image_transform;
pub mod resource;
pub mod source;

// Re-export commonly used types
pub use export::{ExportError, ExportRequest};
pub use extensions::IMAGE_EXTENSIONS;
pub use image::ImageData;
pub use resource::{ImageResource, ResourceTracker};
pub use source::{IntakeError, SourceFile};

/// Supported file extensions
pub mod extensions {
    /// Image file extensions accepted by the open dialog
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico",
    ];

    /// Extensions offered by the export dialog
    pub const EXPORT_EXTENSIONS: &[&str] = &["png"];
}
