// SPDX-License-Identifier: MPL-2.0
//! Locally addressable image resources with scoped lifetime.
//!
//! Every [`ImageResource`] holds a lease on a [`ResourceTracker`]. The lease
//! is released when the resource is dropped, so the tracker's live count
//! always equals the number of resources still held somewhere.

use crate::error::Result;
use crate::media::image_transform::downscale_for_preview;
use crate::media::ImageData;
use image_rs::{DynamicImage, GenericImageView};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts live image resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceTracker {
    live: Arc<AtomicUsize>,
}

impl ResourceTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resources acquired and not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Lease {
        self.live.fetch_add(1, Ordering::SeqCst);
        Lease {
            live: Arc::clone(&self.live),
        }
    }
}

/// Drop guard returned by [`ResourceTracker::acquire`].
#[derive(Debug)]
struct Lease {
    live: Arc<AtomicUsize>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A decoded image ready for display and export.
#[derive(Debug)]
pub struct ImageResource {
    bytes: Arc<Vec<u8>>,
    image: Arc<DynamicImage>,
    preview: ImageData,
    width: u32,
    height: u32,
    _lease: Lease,
}

impl ImageResource {
    /// Decodes `bytes` and builds a preview no larger than `preview_max`.
    ///
    /// The tracker is only charged once decoding succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Image`] if the bytes are not a
    /// decodable image.
    pub fn decode(tracker: &ResourceTracker, bytes: Arc<Vec<u8>>, preview_max: u32) -> Result<Self> {
        let image = image_rs::load_from_memory(&bytes)?;
        let (width, height) = image.dimensions();
        let preview = ImageData::from_dynamic(&downscale_for_preview(&image, preview_max));

        Ok(Self {
            bytes,
            image: Arc::new(image),
            preview,
            width,
            height,
            _lease: tracker.acquire(),
        })
    }

    /// Encoded bytes as received.
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    /// Full-resolution decoded image.
    pub fn image(&self) -> &Arc<DynamicImage> {
        &self.image
    }

    /// Downscaled copy used on screen.
    pub fn preview(&self) -> &ImageData {
        &self.preview
    }

    /// Native dimensions of the full image.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
