// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::media::{ExportError, ExportRequest, IntakeError, SourceFile};
use crate::service::{ColorizeError, HealthStatus, UploadPayload, UploadReceipt};
use crate::session::Generation;
use crate::ui::comparison;
use crate::ui::navbar;
use crate::ui::notifications;
use crate::ui::sidebar;
use crate::ui::upload_zone;
use crate::ui::uploader;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    UploadZone(upload_zone::Message),
    Comparison(comparison::Message),
    Sidebar(sidebar::Message),
    Uploader(uploader::Message),
    Notification(notifications::NotificationMessage),
    Tick(Instant), // Spinner animation and notification auto-dismiss
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// The picked or dropped file was read and validated.
    SourceLoaded(Result<SourceFile, IntakeError>),
    /// The colorize request tagged with `generation` finished.
    ColorizeCompleted {
        generation: Generation,
        result: Result<Arc<Vec<u8>>, ColorizeError>,
    },
    /// Result from the export save dialog, with the request captured on click.
    ExportDialogResult {
        path: Option<PathBuf>,
        request: ExportRequest,
    },
    ExportCompleted(Result<PathBuf, ExportError>),
    HealthChecked(Result<HealthStatus, ColorizeError>),
    /// Result from the uploader screen's file dialog.
    UploaderFilePicked(Option<PathBuf>),
    /// The uploader's file was read; the request is sent next.
    UploaderFileRead(Result<UploadPayload, IntakeError>),
    UploadFinished(Result<UploadReceipt, ColorizeError>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `pl`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to colorize on startup.
    pub file_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `COLORIZER_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Service base URL for this run, overriding `[service] endpoint`.
    pub endpoint: Option<String>,
}
