// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handlers receive an [`UpdateContext`] borrowing the parts of `App` they
//! may touch. Async work (file reads, dialogs, HTTP, export) is returned as
//! a [`Task`] whose output comes back as another [`Message`].

use super::{persistence, Message, Screen};
use crate::i18n::fluent::I18n;
use crate::media::export::export_to_path;
use crate::media::extensions::{EXPORT_EXTENSIONS, IMAGE_EXTENSIONS};
use crate::media::{ExportError, ExportRequest, IntakeError, SourceFile};
use crate::service::{
    ColorizeClient, ColorizeError, HealthStatus, ServiceHealth, UploadPayload, UploadReceipt,
};
use crate::session::{Completion, Generation, Session};
use crate::ui::comparison::{self, Event as ComparisonEvent};
use crate::ui::navbar::{self, Event as NavbarEvent};
use crate::ui::notifications::{self, Notification};
use crate::ui::sidebar;
use crate::ui::theming::ThemeMode;
use crate::ui::upload_zone::{self, Event as UploadZoneEvent};
use crate::ui::uploader::{self, Event as UploaderEvent};
use crate::ui::widgets::animated_spinner;
use iced::{task, Task};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Prefix shared by the i18n keys of service errors.
const SERVICE_ERROR_PREFIX: &str = "error-service-";

/// Mutable view of the application state handed to message handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub screen: &'a mut Screen,
    pub theme_mode: &'a mut ThemeMode,
    pub session: &'a mut Session,
    pub comparison: &'a mut comparison::State,
    pub upload_zone: &'a mut upload_zone::State,
    pub uploader: &'a mut uploader::State,
    pub client: Option<&'a ColorizeClient>,
    pub health: &'a mut ServiceHealth,
    /// Abort handle of the running colorize task.
    pub colorize_handle: &'a mut Option<task::Handle>,
    /// A picked or dropped file is being read.
    pub intake_pending: &'a mut bool,
    pub spinner_rotation: &'a mut f32,
    pub notifications: &'a mut notifications::Manager,
}

// =============================================================================
// Navbar
// =============================================================================

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    match navbar::update(message) {
        NavbarEvent::SwitchScreen(screen) => {
            *ctx.screen = screen;
            Task::none()
        }
        NavbarEvent::CycleTheme => {
            *ctx.theme_mode = ctx.theme_mode.next();
            persistence::persist_theme_mode(*ctx.theme_mode)
        }
        NavbarEvent::CycleLanguage => {
            let next = ctx.i18n.next_locale();
            persistence::apply_language_change(ctx.i18n, next)
        }
        NavbarEvent::CheckHealth => handle_check_health(ctx),
    }
}

/// Queries `GET /health` and marks the service as being checked.
pub fn handle_check_health(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(client) = ctx.client.cloned() else {
        *ctx.health = ServiceHealth::Offline;
        return Task::none();
    };

    *ctx.health = ServiceHealth::Checking;
    Task::perform(
        async move { client.health().await },
        Message::HealthChecked,
    )
}

pub fn handle_health_checked(
    ctx: &mut UpdateContext<'_>,
    result: Result<HealthStatus, ColorizeError>,
) -> Task<Message> {
    match &result {
        Ok(status) => log::info!(
            "Service status: {} (model loaded: {})",
            status.status,
            status.model_loaded
        ),
        Err(err) => log::warn!("Health check failed: {err}"),
    }
    *ctx.health = ServiceHealth::from_result(&result);
    Task::none()
}

// =============================================================================
// Intake
// =============================================================================

pub fn handle_upload_zone_message(
    ctx: &mut UpdateContext<'_>,
    message: upload_zone::Message,
) -> Task<Message> {
    match ctx.upload_zone.update(message) {
        UploadZoneEvent::None => Task::none(),
        UploadZoneEvent::OpenPicker if intake_blocked(ctx) => Task::none(),
        UploadZoneEvent::OpenPicker => pick_image(Message::OpenFileDialogResult),
    }
}

/// Handles a file dropped anywhere on the window.
///
/// On the uploader screen the file becomes the uploader's selection;
/// otherwise it starts a colorization.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    ctx.upload_zone.update(upload_zone::Message::FilesLeft);

    if *ctx.screen == Screen::Uploader {
        if !ctx.uploader.select_dropped(path.clone(), Instant::now()) {
            log::debug!("Ignoring dropped {} on the uploader", path.display());
        }
        return Task::none();
    }
    start_intake(ctx, path)
}

pub fn handle_open_file_dialog_result(
    ctx: &mut UpdateContext<'_>,
    path: Option<PathBuf>,
) -> Task<Message> {
    match path {
        Some(path) => start_intake(ctx, path),
        // User cancelled the dialog
        None => Task::none(),
    }
}

/// Reads `path` in the background unless another file is already on its way.
pub fn start_intake(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if intake_blocked(ctx) {
        log::debug!("Ignoring {}: an upload is already in progress", path.display());
        return Task::none();
    }

    *ctx.intake_pending = true;
    Task::perform(async move { SourceFile::load(&path) }, Message::SourceLoaded)
}

pub fn handle_source_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<SourceFile, IntakeError>,
) -> Task<Message> {
    *ctx.intake_pending = false;

    match result {
        Ok(source) => begin_colorize(ctx, source),
        Err(err @ IntakeError::NotAnImage(_)) => {
            log::info!("Rejected upload: {err}");
            Task::none()
        }
        Err(err) => {
            log::error!("Failed to read upload: {err}");
            ctx.notifications.push(Notification::error(err.i18n_key()));
            Task::none()
        }
    }
}

fn intake_blocked(ctx: &UpdateContext<'_>) -> bool {
    *ctx.intake_pending || ctx.session.is_processing()
}

// =============================================================================
// Colorization
// =============================================================================

/// Makes `source` the current file and sends it to the service.
fn begin_colorize(ctx: &mut UpdateContext<'_>, source: SourceFile) -> Task<Message> {
    let Some(client) = ctx.client.cloned() else {
        ctx.notifications
            .push(Notification::error("error-service-transport"));
        return Task::none();
    };

    let name = source.name.clone();
    let ticket = match ctx.session.begin(source) {
        Ok(ticket) => ticket,
        Err(err) => {
            log::error!("Cannot decode {name}: {err}");
            ctx.notifications.push(Notification::error(err.i18n_key()));
            return Task::none();
        }
    };

    abort_colorize(ctx);
    ctx.notifications.dismiss_with_prefix(SERVICE_ERROR_PREFIX);
    ctx.comparison.reset();
    *ctx.spinner_rotation = 0.0;

    log::info!(
        "Colorizing {name} ({} bytes) via {}",
        ticket.payload.bytes.len(),
        client.base_url()
    );

    let generation = ticket.generation;
    let payload = ticket.payload;
    let (task, handle) = Task::perform(
        async move { client.colorize(payload).await },
        move |result| Message::ColorizeCompleted { generation, result },
    )
    .abortable();

    *ctx.colorize_handle = Some(handle);
    task
}

pub fn handle_colorize_completed(
    ctx: &mut UpdateContext<'_>,
    generation: Generation,
    result: Result<Arc<Vec<u8>>, ColorizeError>,
) -> Task<Message> {
    if ctx.session.in_flight() == Some(generation) {
        *ctx.colorize_handle = None;
    }

    match ctx.session.complete(generation, result) {
        Completion::Applied => {
            if let Some((width, height)) = ctx.session.processed().map(|p| p.dimensions()) {
                log::info!("Colorized image received ({width}x{height})");
            }
        }
        Completion::Failed(err) => {
            log::error!("Colorization failed: {err}");
            ctx.notifications.push(Notification::error(err.i18n_key()));
        }
        Completion::Stale => {
            log::debug!("Discarding stale colorize response {generation:?}");
        }
    }
    Task::none()
}

pub fn handle_comparison_message(
    ctx: &mut UpdateContext<'_>,
    message: comparison::Message,
) -> Task<Message> {
    match ctx.comparison.update(message) {
        ComparisonEvent::None => Task::none(),
        ComparisonEvent::Reset => handle_reset(ctx),
    }
}

/// Cancels any request and returns to the upload zone.
pub fn handle_reset(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    abort_colorize(ctx);
    if ctx.session.reset() {
        log::info!("Session reset");
    }
    ctx.comparison.reset();
    Task::none()
}

fn abort_colorize(ctx: &mut UpdateContext<'_>) {
    if let Some(handle) = ctx.colorize_handle.take() {
        handle.abort();
    }
}

// =============================================================================
// Adjustments and export
// =============================================================================

pub fn handle_sidebar_message(ctx: &mut UpdateContext<'_>, message: sidebar::Message) -> Task<Message> {
    match message {
        sidebar::Message::Adjust(key, value) => {
            ctx.session.set_adjustment(key, value);
            Task::none()
        }
        sidebar::Message::ResetAdjustments => {
            ctx.session.reset_adjustments();
            Task::none()
        }
        sidebar::Message::Export => match ctx.session.export_request() {
            Some(request) => open_export_dialog(request),
            None => {
                let err = ExportError::NothingToExport;
                log::warn!("Export rejected: {err}");
                ctx.notifications.push(Notification::error(err.i18n_key()));
                Task::none()
            }
        },
    }
}

/// Opens the save dialog pre-filled with the export file name.
fn open_export_dialog(request: ExportRequest) -> Task<Message> {
    Task::perform(
        async move {
            let path = rfd::AsyncFileDialog::new()
                .set_file_name(&request.file_name)
                .add_filter("PNG", EXPORT_EXTENSIONS)
                .save_file()
                .await
                .map(|h| h.path().to_path_buf());
            (path, request)
        },
        |(path, request)| Message::ExportDialogResult { path, request },
    )
}

pub fn handle_export_dialog_result(path: Option<PathBuf>, request: ExportRequest) -> Task<Message> {
    let Some(path) = path else {
        // User cancelled the dialog
        return Task::none();
    };

    log::info!("Exporting {} to {}", request.file_name, path.display());
    Task::perform(export_to_path(request, path), Message::ExportCompleted)
}

pub fn handle_export_completed(
    ctx: &mut UpdateContext<'_>,
    result: Result<PathBuf, ExportError>,
) -> Task<Message> {
    match result {
        Ok(path) => {
            log::info!("Exported {}", path.display());
            ctx.notifications.push(
                Notification::success("notification-export-success")
                    .with_arg("path", path.display().to_string()),
            );
        }
        Err(err) => {
            log::error!("Export failed: {err}");
            ctx.notifications.push(Notification::error(err.i18n_key()));
        }
    }
    Task::none()
}

// =============================================================================
// Uploader screen
// =============================================================================

pub fn handle_uploader_message(
    ctx: &mut UpdateContext<'_>,
    message: uploader::Message,
) -> Task<Message> {
    match ctx.uploader.update(message) {
        UploaderEvent::None => Task::none(),
        UploaderEvent::OpenPicker => pick_any_file(Message::UploaderFilePicked),
        UploaderEvent::Send(path) => Task::perform(
            async move { UploadPayload::read(&path) },
            Message::UploaderFileRead,
        ),
    }
}

/// Sends the uploader's file as read from disk, whatever its type.
pub fn handle_uploader_file_read(
    ctx: &mut UpdateContext<'_>,
    result: Result<UploadPayload, IntakeError>,
) -> Task<Message> {
    let payload = match result {
        Ok(payload) => payload,
        Err(err) => {
            log::error!("Failed to read file for upload: {err}");
            ctx.uploader.fail(err.i18n_key());
            return Task::none();
        }
    };

    let Some(client) = ctx.client.cloned() else {
        ctx.uploader
            .finish(Err(ColorizeError::Transport("no HTTP client".into())));
        return Task::none();
    };

    log::info!("Uploading {} ({} bytes)", payload.file_name, payload.bytes.len());
    Task::perform(
        async move { client.upload(payload).await },
        Message::UploadFinished,
    )
}

pub fn handle_upload_finished(
    ctx: &mut UpdateContext<'_>,
    result: Result<UploadReceipt, ColorizeError>,
) -> Task<Message> {
    if let Ok(receipt) = &result {
        log::info!("Service stored upload as {}", receipt.filename);
    }
    ctx.uploader.finish(result);
    Task::none()
}

// =============================================================================
// Misc
// =============================================================================

/// Advances the spinner and expires notifications.
pub fn handle_tick(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.notifications.tick();
    if ctx.session.is_processing() {
        *ctx.spinner_rotation = animated_spinner::advance(*ctx.spinner_rotation);
    }
    Task::none()
}

/// Opens the image picker; the chosen path is wrapped by `on_result`.
fn pick_image(on_result: fn(Option<PathBuf>) -> Message) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        on_result,
    )
}

/// Opens an unfiltered file picker for the uploader screen.
fn pick_any_file(on_result: fn(Option<PathBuf>) -> Message) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        on_result,
    )
}
