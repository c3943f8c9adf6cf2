// SPDX-License-Identifier: MPL-2.0
//! Colorization session state.
//!
//! A [`Session`] holds at most one uploaded file, its original and processed
//! image resources, the in-flight request generation and the current
//! [`Adjustments`]. It is a plain state machine: it never performs I/O, so
//! the application drives it from its update loop and tests drive it
//! directly.
//!
//! Requests are identified by a [`Generation`]. Starting a new upload or
//! resetting bumps the generation, and any completion carrying an older one
//! is reported as [`Completion::Stale`] and ignored.

use crate::domain::editing::{compose, AdjustmentKey, Adjustments, FilterChain};
use crate::error::Result;
use crate::media::export::{file_name_for, ExportRequest};
use crate::media::filter::apply_to_preview;
use crate::media::{ImageData, ImageResource, ResourceTracker, SourceFile};
use crate::service::{ColorizeError, UploadPayload};
use std::sync::Arc;

/// Identifies one colorize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// What the caller must send after [`Session::begin`].
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub generation: Generation,
    pub payload: UploadPayload,
}

/// Outcome of feeding a service response into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The processed image is now available.
    Applied,
    /// The request failed; no processed image is set.
    Failed(ColorizeError),
    /// The response belongs to a request that was superseded or cancelled.
    Stale,
}

#[derive(Debug)]
pub struct Session {
    tracker: ResourceTracker,
    preview_max: u32,
    source: Option<SourceFile>,
    original: Option<ImageResource>,
    processed: Option<ImageResource>,
    /// Processed preview with the current filter chain applied.
    filtered_preview: Option<ImageData>,
    in_flight: Option<Generation>,
    last_generation: u64,
    adjustments: Adjustments,
}

impl Session {
    #[must_use]
    pub fn new(tracker: ResourceTracker, preview_max: u32) -> Self {
        Self {
            tracker,
            preview_max,
            source: None,
            original: None,
            processed: None,
            filtered_preview: None,
            in_flight: None,
            last_generation: 0,
            adjustments: Adjustments::default(),
        }
    }

    /// Accepts `source` as the current file and prepares a colorize request.
    ///
    /// Any previous file, resources and in-flight request are replaced.
    /// Adjustments are kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Image`] if the file cannot be decoded
    /// for preview; the session is left untouched in that case.
    pub fn begin(&mut self, source: SourceFile) -> Result<UploadTicket> {
        let original =
            ImageResource::decode(&self.tracker, Arc::clone(&source.bytes), self.preview_max)?;

        self.release_resources();
        let generation = self.next_generation();
        let payload = UploadPayload::from(&source);

        self.source = Some(source);
        self.original = Some(original);
        self.in_flight = Some(generation);

        Ok(UploadTicket {
            generation,
            payload,
        })
    }

    /// Applies the result of the request identified by `generation`.
    pub fn complete(
        &mut self,
        generation: Generation,
        result: std::result::Result<Arc<Vec<u8>>, ColorizeError>,
    ) -> Completion {
        if self.in_flight != Some(generation) {
            return Completion::Stale;
        }
        self.in_flight = None;

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(err) => return Completion::Failed(err),
        };

        match ImageResource::decode(&self.tracker, bytes, self.preview_max) {
            Ok(processed) => {
                self.filtered_preview = Some(apply_to_preview(
                    processed.preview(),
                    &compose(&self.adjustments),
                ));
                self.processed = Some(processed);
                Completion::Applied
            }
            Err(err) => Completion::Failed(ColorizeError::from(err)),
        }
    }

    /// Returns the session to empty, cancelling any request.
    ///
    /// Returns `false` if the session was already empty.
    pub fn reset(&mut self) -> bool {
        if self.is_empty() && self.in_flight.is_none() && self.adjustments.is_default() {
            return false;
        }
        self.release_resources();
        self.source = None;
        self.in_flight = None;
        // Invalidate anything still running.
        self.next_generation();
        self.adjustments.reset();
        true
    }

    /// Sets one adjustment and refreshes the filtered preview.
    pub fn set_adjustment(&mut self, key: AdjustmentKey, value: i32) {
        let before = self.adjustments;
        self.adjustments.set(key, value);
        if self.adjustments != before {
            self.refresh_preview();
        }
    }

    /// Restores the adjustments only, keeping the images.
    pub fn reset_adjustments(&mut self) {
        if !self.adjustments.is_default() {
            self.adjustments.reset();
            self.refresh_preview();
        }
    }

    /// Captures what the exporter needs, or `None` when there is nothing to
    /// export yet.
    #[must_use]
    pub fn export_request(&self) -> Option<ExportRequest> {
        if !self.can_export() {
            return None;
        }
        let processed = self.processed.as_ref()?;
        Some(ExportRequest {
            image: Arc::clone(processed.image()),
            chain: self.filter_chain(),
            file_name: file_name_for(self.source.as_ref().map(|s| s.name.as_str())),
        })
    }

    #[must_use]
    pub fn can_export(&self) -> bool {
        self.processed.is_some() && self.in_flight.is_none()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight
    }

    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    /// The filter chain for the current adjustments.
    #[must_use]
    pub fn filter_chain(&self) -> FilterChain {
        compose(&self.adjustments)
    }

    pub fn source(&self) -> Option<&SourceFile> {
        self.source.as_ref()
    }

    pub fn original(&self) -> Option<&ImageResource> {
        self.original.as_ref()
    }

    pub fn processed(&self) -> Option<&ImageResource> {
        self.processed.as_ref()
    }

    /// Processed preview with filters applied, ready to draw.
    pub fn filtered_preview(&self) -> Option<&ImageData> {
        self.filtered_preview.as_ref()
    }

    pub fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }

    fn next_generation(&mut self) -> Generation {
        self.last_generation += 1;
        Generation(self.last_generation)
    }

    fn release_resources(&mut self) {
        self.filtered_preview = None;
        self.processed = None;
        self.original = None;
    }

    fn refresh_preview(&mut self) {
        let chain = compose(&self.adjustments);
        self.filtered_preview = self
            .processed
            .as_ref()
            .map(|processed| apply_to_preview(processed.preview(), &chain));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn png(color: [u8; 4]) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::from_pixel(4, 3, Rgba(color))
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    fn source(name: &str) -> SourceFile {
        SourceFile::from_bytes(PathBuf::from(name), png([20, 20, 20, 255])).expect("source")
    }

    fn session() -> Session {
        Session::new(ResourceTracker::new(), 64)
    }

    #[test]
    fn begin_populates_original_and_marks_in_flight() {
        let mut session = session();
        let ticket = session.begin(source("cat.png")).expect("begin");

        assert_eq!(ticket.payload.file_name, "cat.png");
        assert_eq!(session.in_flight(), Some(ticket.generation));
        assert!(session.original().is_some());
        assert!(session.processed().is_none());
        assert!(!session.can_export());
        assert_eq!(session.tracker().live(), 1);
    }

    #[test]
    fn successful_completion_enables_export() {
        let mut session = session();
        let ticket = session.begin(source("cat.png")).expect("begin");

        let outcome = session.complete(ticket.generation, Ok(Arc::new(png([200, 100, 50, 255]))));

        assert_eq!(outcome, Completion::Applied);
        assert!(session.can_export());
        assert!(session.filtered_preview().is_some());
        assert_eq!(session.tracker().live(), 2);
        let request = session.export_request().expect("export request");
        assert_eq!(request.file_name, "colorized-cat.png.png");
    }

    #[test]
    fn failed_completion_keeps_export_disabled() {
        let mut session = session();
        let ticket = session.begin(source("dog.png")).expect("begin");

        let outcome = session.complete(ticket.generation, Err(ColorizeError::Status(500)));

        assert_eq!(outcome, Completion::Failed(ColorizeError::Status(500)));
        assert!(session.processed().is_none());
        assert!(!session.can_export());
        assert!(session.export_request().is_none());
        assert!(!session.is_processing());
    }

    #[test]
    fn undecodable_payload_is_a_failure() {
        let mut session = session();
        let ticket = session.begin(source("dog.png")).expect("begin");

        let outcome = session.complete(ticket.generation, Ok(Arc::new(b"<html>".to_vec())));

        assert!(matches!(
            outcome,
            Completion::Failed(ColorizeError::InvalidPayload(_))
        ));
        assert!(session.processed().is_none());
        assert_eq!(session.tracker().live(), 1);
    }

    #[test]
    fn older_generation_is_stale() {
        let mut session = session();
        let first = session.begin(source("a.png")).expect("begin");
        let second = session.begin(source("b.png")).expect("begin");

        let stale = session.complete(first.generation, Ok(Arc::new(png([1, 1, 1, 255]))));
        assert_eq!(stale, Completion::Stale);
        assert!(session.processed().is_none());
        assert_eq!(session.in_flight(), Some(second.generation));

        let fresh = session.complete(second.generation, Ok(Arc::new(png([2, 2, 2, 255]))));
        assert_eq!(fresh, Completion::Applied);
        assert_eq!(session.source().map(|s| s.name.as_str()), Some("b.png"));
    }

    #[test]
    fn replacing_a_session_releases_previous_resources() {
        let mut session = session();
        let first = session.begin(source("a.png")).expect("begin");
        session.complete(first.generation, Ok(Arc::new(png([1, 1, 1, 255]))));
        assert_eq!(session.tracker().live(), 2);

        session.begin(source("b.png")).expect("begin");
        assert_eq!(session.tracker().live(), 1);
    }

    #[test]
    fn completion_after_reset_is_stale() {
        let mut session = session();
        let ticket = session.begin(source("a.png")).expect("begin");
        assert!(session.reset());

        let outcome = session.complete(ticket.generation, Ok(Arc::new(png([1, 1, 1, 255]))));
        assert_eq!(outcome, Completion::Stale);
        assert_eq!(session.tracker().live(), 0);
    }

    #[test]
    fn reset_releases_everything_and_restores_defaults() {
        let mut session = session();
        let ticket = session.begin(source("a.png")).expect("begin");
        session.complete(ticket.generation, Ok(Arc::new(png([9, 9, 9, 255]))));
        session.set_adjustment(AdjustmentKey::Hue, 90);

        assert!(session.reset());

        assert!(session.is_empty());
        assert!(session.original().is_none());
        assert!(session.processed().is_none());
        assert_eq!(*session.adjustments(), Adjustments::default());
        assert_eq!(session.tracker().live(), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = session();
        assert!(!session.reset());

        session.begin(source("a.png")).expect("begin");
        assert!(session.reset());
        assert!(!session.reset());
        assert_eq!(session.tracker().live(), 0);
    }

    #[test]
    fn adjustments_survive_a_new_upload() {
        let mut session = session();
        session.set_adjustment(AdjustmentKey::Sepia, 30);
        session.begin(source("a.png")).expect("begin");
        assert_eq!(session.adjustments().sepia(), 30);
    }

    #[test]
    fn adjustments_refresh_filtered_preview() {
        let mut session = session();
        let ticket = session.begin(source("a.png")).expect("begin");
        session.complete(ticket.generation, Ok(Arc::new(png([200, 100, 50, 255]))));
        let before = session.filtered_preview().expect("preview").rgba_bytes().to_vec();

        session.set_adjustment(AdjustmentKey::Brightness, 50);
        let after = session.filtered_preview().expect("preview").rgba_bytes().to_vec();
        assert_ne!(before, after);

        session.reset_adjustments();
        let restored = session.filtered_preview().expect("preview").rgba_bytes().to_vec();
        assert_eq!(before, restored);
    }

    #[test]
    fn export_request_uses_current_adjustments() {
        let mut session = session();
        let ticket = session.begin(source("cat.jpg")).expect("begin");
        session.complete(ticket.generation, Ok(Arc::new(png([9, 9, 9, 255]))));
        session.set_adjustment(AdjustmentKey::Hue, 180);

        let request = session.export_request().expect("request");
        assert!(request.chain.to_string().contains("hue-rotate(180deg)"));
        assert_eq!(request.file_name, "colorized-cat.jpg.png");
    }

    #[test]
    fn undecodable_source_leaves_session_untouched() {
        let mut session = session();
        let bogus = SourceFile::from_bytes(PathBuf::from("fake.jpg"), b"not an image".to_vec())
            .expect("extension fallback accepts");

        assert!(session.begin(bogus).is_err());
        assert!(session.is_empty());
        assert!(!session.is_processing());
        assert_eq!(session.tracker().live(), 0);
    }
}
