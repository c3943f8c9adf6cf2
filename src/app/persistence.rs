// SPDX-License-Identifier: MPL-2.0
//! Configuration persistence logic.
//!
//! Theme and language choices made in the navbar are written back to
//! `settings.toml`. Everything else in the file is left as loaded.

use super::config;
use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::theming::ThemeMode;
use iced::Task;
use unic_langid::LanguageIdentifier;

/// Persists the theme mode to disk.
///
/// Guarded during tests to keep isolation: unit tests exercise the logic by
/// calling the update handlers directly.
pub fn persist_theme_mode(theme_mode: ThemeMode) -> Task<Message> {
    if cfg!(test) {
        return Task::none();
    }

    let (mut cfg, _) = config::load();
    cfg.general.theme_mode = theme_mode;

    if let Err(error) = config::save(&cfg) {
        log::error!("Failed to save config: {error}");
    }

    Task::none()
}

/// Applies the newly selected locale and persists it to config.
pub fn apply_language_change(i18n: &mut I18n, locale: LanguageIdentifier) -> Task<Message> {
    i18n.set_locale(locale.clone());

    if cfg!(test) {
        return Task::none();
    }

    let (mut cfg, _) = config::load();
    cfg.general.language = Some(locale.to_string());

    if let Err(error) = config::save(&cfg) {
        log::error!("Failed to save config: {error}");
    }

    Task::none()
}
