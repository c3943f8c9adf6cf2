// SPDX-License-Identifier: MPL-2.0
//! Remote colorization service.
//!
//! The backend exposes three endpoints:
//! - `POST /colorize`: multipart field `file`, answers with the colorized image
//! - `POST /upload`: multipart field `uploaded_file`, answers `{"filename": ...}`
//! - `GET /health`: answers `{"status": ..., "model_loaded": bool}`
//!
//! There is no retry or backoff. Cancellation is handled by the caller
//! aborting the task that awaits the request.

mod client;
mod error;

pub use client::{
    ColorizeClient, HealthStatus, ServiceHealth, UploadPayload, UploadReceipt, COLORIZE_FIELD,
    GENERIC_MIME, UPLOAD_FIELD,
};
pub use error::ColorizeError;
