// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the colorizer and
//! uploader screens.
//!
//! The `App` struct wires together the session, the service client,
//! localization and notifications, and translates messages into side
//! effects like HTTP requests, dialogs or config persistence.

pub mod config;
mod message;
pub mod paths;
mod persistence;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::i18n::fluent::I18n;
use crate::media::ResourceTracker;
use crate::service::{ColorizeClient, ServiceHealth};
use crate::session::Session;
use crate::ui::comparison;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use crate::ui::upload_zone;
use crate::ui::uploader;
use iced::{task, window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    theme_mode: ThemeMode,
    session: Session,
    comparison: comparison::State,
    upload_zone: upload_zone::State,
    uploader: uploader::State,
    /// `None` when the HTTP client could not be built.
    client: Option<ColorizeClient>,
    /// Service base URL shown in the navbar.
    endpoint: String,
    health: ServiceHealth,
    colorize_handle: Option<task::Handle>,
    intake_pending: bool,
    spinner_rotation: f32,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("endpoint", &self.endpoint)
            .field("has_image", &!self.session.is_empty())
            .field("processing", &self.session.is_processing())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 520;
pub const MIN_WINDOW_WIDTH: u32 = 760;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Picks the `--endpoint` override when it is non-blank.
fn resolve_endpoint(cli: Option<&str>, config: &config::Config) -> String {
    cli.map(str::trim)
        .filter(|url| !url.is_empty())
        .map(String::from)
        .unwrap_or_else(|| config.service.endpoint())
}

impl App {
    /// Initializes application state, checks the service and optionally
    /// starts colorizing the file given on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let endpoint = resolve_endpoint(flags.endpoint.as_deref(), &config);

        let mut notifications = notifications::Manager::new();
        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }

        let client = match ColorizeClient::new(&endpoint, config.service.request_timeout()) {
            Ok(client) => Some(client),
            Err(err) => {
                log::error!("Cannot create HTTP client: {err}");
                notifications.push(Notification::error(err.i18n_key()));
                None
            }
        };
        log::info!("Using colorization service at {endpoint}");

        let mut app = App {
            i18n,
            screen: Screen::default(),
            theme_mode: config.general.theme_mode,
            session: Session::new(
                ResourceTracker::new(),
                config.display.preview_max_dimension(),
            ),
            comparison: comparison::State::default(),
            upload_zone: upload_zone::State::default(),
            uploader: uploader::State::default(),
            client,
            endpoint,
            health: ServiceHealth::Unknown,
            colorize_handle: None,
            intake_pending: false,
            spinner_rotation: 0.0,
            notifications,
        };

        let mut tasks = Vec::new();
        let mut ctx = app.update_context();
        if config.service.check_health_on_startup() {
            tasks.push(update::handle_check_health(&mut ctx));
        }
        if let Some(path) = flags.file_path {
            tasks.push(update::start_intake(&mut ctx, PathBuf::from(path)));
        }

        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.session.source() {
            Some(source) => format!("{} - {app_name}", source.name),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(
            self.session.is_processing(),
            self.notifications.has_notifications(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            i18n: &mut self.i18n,
            screen: &mut self.screen,
            theme_mode: &mut self.theme_mode,
            session: &mut self.session,
            comparison: &mut self.comparison,
            upload_zone: &mut self.upload_zone,
            uploader: &mut self.uploader,
            client: self.client.as_ref(),
            health: &mut self.health,
            colorize_handle: &mut self.colorize_handle,
            intake_pending: &mut self.intake_pending,
            spinner_rotation: &mut self.spinner_rotation,
            notifications: &mut self.notifications,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();

        match message {
            Message::Navbar(navbar_message) => {
                update::handle_navbar_message(&mut ctx, navbar_message)
            }
            Message::UploadZone(zone_message) => {
                update::handle_upload_zone_message(&mut ctx, zone_message)
            }
            Message::Comparison(comparison_message) => {
                update::handle_comparison_message(&mut ctx, comparison_message)
            }
            Message::Sidebar(sidebar_message) => {
                update::handle_sidebar_message(&mut ctx, sidebar_message)
            }
            Message::Uploader(uploader_message) => {
                update::handle_uploader_message(&mut ctx, uploader_message)
            }
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_instant) => update::handle_tick(&mut ctx),
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::OpenFileDialogResult(path) => {
                update::handle_open_file_dialog_result(&mut ctx, path)
            }
            Message::SourceLoaded(result) => update::handle_source_loaded(&mut ctx, result),
            Message::ColorizeCompleted { generation, result } => {
                update::handle_colorize_completed(&mut ctx, generation, result)
            }
            Message::ExportDialogResult { path, request } => {
                update::handle_export_dialog_result(path, request)
            }
            Message::ExportCompleted(result) => update::handle_export_completed(&mut ctx, result),
            Message::HealthChecked(result) => update::handle_health_checked(&mut ctx, result),
            Message::UploaderFilePicked(path) => {
                ctx.uploader.select(path);
                Task::none()
            }
            Message::UploaderFileRead(result) => {
                update::handle_uploader_file_read(&mut ctx, result)
            }
            Message::UploadFinished(result) => update::handle_upload_finished(&mut ctx, result),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            theme_mode: self.theme_mode,
            health: self.health,
            endpoint: &self.endpoint,
            session: &self.session,
            comparison: &self.comparison,
            upload_zone: &self.upload_zone,
            uploader: &self.uploader,
            intake_pending: self.intake_pending,
            spinner_rotation: self.spinner_rotation,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::{compose, AdjustmentKey, Adjustments};
    use crate::media::export::ExportRequest;
    use crate::media::{ExportError, IntakeError, SourceFile};
    use crate::service::{ColorizeError, HealthStatus, UploadPayload, UploadReceipt};
    use crate::ui::{navbar, sidebar, uploader as uploader_ui};
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::{Arc, Mutex, OnceLock};
    use tempfile::tempdir;

    fn config_env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn with_temp_config_dir<F>(test: F)
    where
        F: FnOnce(&std::path::Path),
    {
        let _guard = config_env_lock().lock().expect("failed to lock mutex");
        let temp_dir = tempdir().expect("failed to create temp dir");
        let previous = std::env::var(paths::ENV_CONFIG_DIR).ok();
        std::env::set_var(paths::ENV_CONFIG_DIR, temp_dir.path());

        test(temp_dir.path());

        if let Some(value) = previous {
            std::env::set_var(paths::ENV_CONFIG_DIR, value);
        } else {
            std::env::remove_var(paths::ENV_CONFIG_DIR);
        }
    }

    /// App without startup tasks: no health check, no file.
    fn quiet_app() -> App {
        let (mut app, _task) = App::new(Flags {
            endpoint: Some("http://127.0.0.1:9".into()),
            ..Flags::default()
        });
        app.health = ServiceHealth::Unknown;
        app
    }

    fn png_bytes(color: [u8; 4]) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::from_pixel(4, 3, Rgba(color))
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    fn source(name: &str) -> SourceFile {
        SourceFile::from_bytes(PathBuf::from(name), png_bytes([90, 90, 90, 255]))
            .expect("png source")
    }

    /// Loads `name` into the app and returns the in-flight generation.
    fn load(app: &mut App, name: &str) -> crate::session::Generation {
        app.intake_pending = true;
        let _ = app.update(Message::SourceLoaded(Ok(source(name))));
        app.session.in_flight().expect("request in flight")
    }

    #[test]
    fn new_starts_on_empty_colorizer() {
        with_temp_config_dir(|_| {
            let app = quiet_app();
            assert_eq!(app.screen, Screen::Colorizer);
            assert!(app.session.is_empty());
            assert_eq!(app.endpoint, "http://127.0.0.1:9");
            assert!(app.client.is_some());
        });
    }

    #[test]
    fn endpoint_override_wins_over_config() {
        let config = config::Config::default();
        assert_eq!(
            resolve_endpoint(Some(" http://gpu:8000 "), &config),
            "http://gpu:8000"
        );
        assert_eq!(resolve_endpoint(Some("  "), &config), config.service.endpoint());
        assert_eq!(resolve_endpoint(None, &config), config.service.endpoint());
    }

    #[test]
    fn title_shows_file_name_when_loaded() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let app_name = app.i18n.tr("window-title");
            assert_eq!(app.title(), app_name);

            load(&mut app, "cat.jpg");
            assert_eq!(app.title(), format!("cat.jpg - {app_name}"));
        });
    }

    #[test]
    fn loaded_source_starts_request() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            load(&mut app, "cat.jpg");

            assert!(!app.intake_pending);
            assert!(app.session.is_processing());
            assert!(app.colorize_handle.is_some());
            assert!(app.session.original().is_some());
        });
    }

    #[test]
    fn drops_are_ignored_while_processing() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let generation = load(&mut app, "cat.jpg");

            let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/dog.png")));
            assert!(!app.intake_pending);
            assert_eq!(app.session.in_flight(), Some(generation));
        });
    }

    #[test]
    fn successful_response_enables_export() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let generation = load(&mut app, "cat.jpg");

            let _ = app.update(Message::ColorizeCompleted {
                generation,
                result: Ok(Arc::new(png_bytes([200, 40, 40, 255]))),
            });

            assert!(app.session.can_export());
            assert!(app.colorize_handle.is_none());
            assert_eq!(app.notifications.visible_count(), 0);
        });
    }

    #[test]
    fn service_error_shows_toast_and_keeps_export_disabled() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let generation = load(&mut app, "dog.png");

            let _ = app.update(Message::ColorizeCompleted {
                generation,
                result: Err(ColorizeError::Status(500)),
            });

            assert!(!app.session.can_export());
            assert!(app.session.processed().is_none());
            let toast = app.notifications.visible().next().expect("toast");
            assert_eq!(toast.message_key(), "error-service-status");
        });
    }

    #[test]
    fn new_upload_clears_previous_service_errors() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let generation = load(&mut app, "dog.png");
            let _ = app.update(Message::ColorizeCompleted {
                generation,
                result: Err(ColorizeError::Timeout),
            });
            assert_eq!(app.notifications.visible_count(), 1);

            load(&mut app, "cat.jpg");
            assert_eq!(app.notifications.visible_count(), 0);
        });
    }

    #[test]
    fn cancel_resets_session() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let generation = load(&mut app, "cat.jpg");
            let _ = app.update(Message::Sidebar(sidebar::Message::Adjust(
                AdjustmentKey::Hue,
                180,
            )));

            let _ = app.update(Message::Comparison(comparison::Message::Reset));
            assert!(app.session.is_empty());
            assert!(app.colorize_handle.is_none());
            assert!(app.session.adjustments().is_default());
            assert_eq!(app.session.tracker().live(), 0);

            // The aborted request may still report back; it must be ignored.
            let _ = app.update(Message::ColorizeCompleted {
                generation,
                result: Ok(Arc::new(png_bytes([1, 2, 3, 255]))),
            });
            assert!(app.session.is_empty());
        });
    }

    #[test]
    fn rejected_file_shows_nothing() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            app.intake_pending = true;
            let _ = app.update(Message::SourceLoaded(Err(IntakeError::NotAnImage(
                "notes.txt".into(),
            ))));

            assert!(!app.intake_pending);
            assert!(app.session.is_empty());
            assert_eq!(app.notifications.visible_count(), 0);
        });
    }

    #[test]
    fn unreadable_file_shows_error() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::SourceLoaded(Err(IntakeError::Io("denied".into()))));
            let toast = app.notifications.visible().next().expect("toast");
            assert_eq!(toast.message_key(), "error-intake-io");
        });
    }

    #[test]
    fn export_results_are_reported() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::ExportCompleted(Ok(PathBuf::from(
                "/tmp/colorized-cat.jpg.png",
            ))));
            let toast = app.notifications.visible().next().expect("toast");
            assert_eq!(toast.message_key(), "notification-export-success");
            assert_eq!(
                toast.message_args(),
                &[(
                    "path".to_string(),
                    "/tmp/colorized-cat.jpg.png".to_string()
                )]
            );

            let _ = app.update(Message::ExportCompleted(Err(ExportError::Io("full".into()))));
            let toast = app.notifications.visible().next().expect("toast");
            assert_eq!(toast.message_key(), "error-export-io");
        });
    }

    #[test]
    fn export_without_result_is_rejected() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::Sidebar(sidebar::Message::Export));

            let toast = app.notifications.visible().next().expect("toast");
            assert_eq!(toast.message_key(), "error-export-nothing");
        });
    }

    #[test]
    fn cancelled_export_dialog_does_nothing() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let request = ExportRequest {
                image: Arc::new(image_rs::DynamicImage::new_rgba8(1, 1)),
                chain: compose(&Adjustments::default()),
                file_name: "colorized-image.png".into(),
            };
            let _ = app.update(Message::ExportDialogResult {
                path: None,
                request,
            });
            assert_eq!(app.notifications.visible_count(), 0);
        });
    }

    #[test]
    fn health_result_updates_navbar_state() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::Navbar(navbar::Message::CheckHealth));
            assert_eq!(app.health, ServiceHealth::Checking);

            let _ = app.update(Message::HealthChecked(Ok(HealthStatus {
                status: "ok".into(),
                model_loaded: true,
            })));
            assert_eq!(app.health, ServiceHealth::Online);

            let _ = app.update(Message::HealthChecked(Err(ColorizeError::Timeout)));
            assert_eq!(app.health, ServiceHealth::Offline);
        });
    }

    #[test]
    fn navbar_switches_screen_and_theme() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::Navbar(navbar::Message::ShowUploader));
            assert_eq!(app.screen, Screen::Uploader);

            let before = app.theme_mode;
            let _ = app.update(Message::Navbar(navbar::Message::CycleTheme));
            assert_eq!(app.theme_mode, before.next());

            let locale = app.i18n.current_locale().clone();
            let _ = app.update(Message::Navbar(navbar::Message::CycleLanguage));
            assert_ne!(app.i18n.current_locale(), &locale);
        });
    }

    #[test]
    fn drop_on_uploader_screen_selects_file() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            app.screen = Screen::Uploader;
            let _ = app.update(Message::FileDropped(PathBuf::from("/photos/a.png")));

            assert_eq!(
                app.uploader.selected(),
                Some(std::path::Path::new("/photos/a.png"))
            );
            assert!(app.session.is_empty());
            assert!(!app.intake_pending);
        });
    }

    #[test]
    fn uploader_flow_reports_stored_name() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::UploaderFilePicked(Some(PathBuf::from("a.png"))));
            let _ = app.update(Message::Uploader(uploader_ui::Message::Send));
            assert_eq!(app.uploader.status(), &uploader_ui::Status::Sending);

            let _ = app.update(Message::UploadFinished(Ok(UploadReceipt {
                filename: "stored-a.png".into(),
            })));
            assert_eq!(
                app.uploader.status(),
                &uploader_ui::Status::Stored("stored-a.png".into())
            );
        });
    }

    #[test]
    fn uploader_sends_files_of_any_type() {
        with_temp_config_dir(|dir| {
            let mut app = quiet_app();
            let path = dir.join("report.pdf");
            std::fs::write(&path, b"%PDF-1.4 data").expect("write pdf");

            let _ = app.update(Message::UploaderFilePicked(Some(path.clone())));
            let _ = app.update(Message::Uploader(uploader_ui::Message::Send));

            let payload = UploadPayload::read(&path).expect("pdf is readable");
            let _ = app.update(Message::UploaderFileRead(Ok(payload)));
            assert_eq!(app.uploader.status(), &uploader_ui::Status::Sending);
            assert!(app.session.is_empty());
        });
    }

    #[test]
    fn uploader_reports_unreadable_file() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::UploaderFileRead(Err(IntakeError::Io(
                "permission denied".into(),
            ))));
            assert_eq!(
                app.uploader.status(),
                &uploader_ui::Status::Failed("error-intake-io")
            );
        });
    }

    #[test]
    fn multi_file_drop_on_uploader_keeps_first_file() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            app.screen = Screen::Uploader;
            let _ = app.update(Message::FileDropped(PathBuf::from("/docs/first.pdf")));
            let _ = app.update(Message::FileDropped(PathBuf::from("/docs/second.pdf")));

            assert_eq!(
                app.uploader.selected(),
                Some(std::path::Path::new("/docs/first.pdf"))
            );
        });
    }

    #[test]
    fn tick_spins_only_while_processing() {
        with_temp_config_dir(|_| {
            let mut app = quiet_app();
            let _ = app.update(Message::Tick(std::time::Instant::now()));
            assert_eq!(app.spinner_rotation, 0.0);

            load(&mut app, "cat.jpg");
            let _ = app.update(Message::Tick(std::time::Instant::now()));
            assert!(app.spinner_rotation > 0.0);
        });
    }
}
