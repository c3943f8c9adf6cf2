// SPDX-License-Identifier: MPL-2.0
//! Decoded RGBA pixels paired with the Iced handle used to draw them.

use iced::widget::image;
use image_rs::{DynamicImage, GenericImageView};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
    /// RGBA bytes kept alongside the handle so filters can be re-applied.
    /// Stored in Arc to avoid expensive cloning.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    ///
    /// The pixels are stored in an Arc for shared ownership, and a copy is
    /// made for the Handle.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            handle,
            width,
            height,
            rgba_bytes,
        }
    }

    /// Converts a decoded image into displayable data.
    #[must_use]
    pub fn from_dynamic(dynamic: &DynamicImage) -> Self {
        let (width, height) = dynamic.dimensions();
        Self::from_rgba(width, height, dynamic.to_rgba8().into_vec())
    }

    /// Returns a reference to the RGBA bytes.
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgb, RgbImage};

    #[test]
    fn from_dynamic_expands_to_rgba() {
        let rgb = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let data = ImageData::from_dynamic(&DynamicImage::ImageRgb8(rgb));

        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(data.rgba_bytes().len(), 3 * 2 * 4);
        assert_eq!(&data.rgba_bytes()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn clones_share_pixel_storage() {
        let data = ImageData::from_rgba(1, 1, vec![1, 2, 3, 4]);
        let copy = data.clone();
        assert!(std::ptr::eq(data.rgba_bytes(), copy.rgba_bytes()));
    }
}
