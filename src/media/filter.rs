// SPDX-License-Identifier: MPL-2.0
//! Applies a [`FilterChain`] to decoded images.
//!
//! The preview and the exporter both go through this module, so the pixels
//! written to disk are produced by the same code path the user sees.

use crate::domain::editing::FilterChain;
use crate::media::ImageData;
use image_rs::{DynamicImage, RgbaImage};

/// Returns a filtered copy of a preview image.
///
/// An identity chain returns a cheap clone that shares the pixel storage.
#[must_use]
pub fn apply_to_preview(preview: &ImageData, chain: &FilterChain) -> ImageData {
    if chain.is_identity() {
        return preview.clone();
    }
    let mut pixels = preview.rgba_bytes().to_vec();
    chain.apply_rgba(&mut pixels);
    ImageData::from_rgba(preview.width, preview.height, pixels)
}

/// Bakes the chain into a full-resolution RGBA8 copy of `image`.
#[must_use]
pub fn apply_to_image(image: &DynamicImage, chain: &FilterChain) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    chain.apply_rgba(&mut rgba);
    rgba
}
