// SPDX-License-Identifier: MPL-2.0
//! Resizing helpers used to build on-screen previews.

use image_rs::{imageops::FilterType, DynamicImage, GenericImageView};

/// Computes dimensions that fit inside a `max_edge` square, keeping the
/// aspect ratio. Images already small enough keep their size.
///
/// Both dimensions are guaranteed to be at least 1 pixel.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let max_edge = max_edge.max(1);
    let longest = width.max(height);
    if longest <= max_edge {
        return (width.max(1), height.max(1));
    }

    let factor = max_edge as f32 / longest as f32;
    let new_width = (width as f32 * factor).round().max(1.0) as u32;
    let new_height = (height as f32 * factor).round().max(1.0) as u32;
    (new_width.min(max_edge), new_height.min(max_edge))
}

/// Returns a copy of `image` whose longest edge is at most `max_edge`.
pub fn downscale_for_preview(image: &DynamicImage, max_edge: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (target_width, target_height) = fit_within(width, height, max_edge);
    if (target_width, target_height) == (width, height) {
        return image.clone();
    }
    image.resize_exact(target_width, target_height, FilterType::Triangle)
}
