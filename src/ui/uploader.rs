// SPDX-License-Identifier: MPL-2.0
//! Standalone uploader screen.
//!
//! Sends a single file to the service's `/upload` endpoint and shows the
//! name the service stored it under. Independent of the colorizer
//! session.

use crate::i18n::fluent::I18n;
use crate::service::{ColorizeError, UploadReceipt};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column, Row};
use iced::{alignment::Horizontal, Element, Length, Theme};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Drop events closer together than this belong to one multi-file drop.
const DROP_BURST: Duration = Duration::from_millis(250);

/// Progress of the current upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Sending,
    /// Name returned by the service.
    Stored(String),
    /// i18n key of the failure.
    Failed(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct State {
    selected: Option<PathBuf>,
    status: Status,
    last_drop: Option<Instant>,
}

#[derive(Debug, Clone)]
pub enum Message {
    ChooseFile,
    Send,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    OpenPicker,
    Send(PathBuf),
}

impl State {
    #[must_use]
    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ChooseFile if self.status != Status::Sending => Event::OpenPicker,
            Message::Send if self.status != Status::Sending => match &self.selected {
                Some(path) => {
                    self.status = Status::Sending;
                    Event::Send(path.clone())
                }
                None => Event::None,
            },
            Message::ChooseFile | Message::Send => Event::None,
        }
    }

    /// Stores the picked file; `None` (dialog cancelled) keeps the previous one.
    pub fn select(&mut self, path: Option<PathBuf>) {
        if let Some(path) = path {
            self.selected = Some(path);
            self.status = Status::Idle;
        }
    }

    /// Selects a file dropped on the window.
    ///
    /// Only the first file of a multi-file drop is taken, and nothing is
    /// taken while a request is running. Returns whether `path` was selected.
    pub fn select_dropped(&mut self, path: PathBuf, now: Instant) -> bool {
        let in_burst = self
            .last_drop
            .is_some_and(|last| now.saturating_duration_since(last) < DROP_BURST);
        self.last_drop = Some(now);

        if in_burst || self.status == Status::Sending {
            return false;
        }
        self.select(Some(path));
        true
    }

    /// Records the outcome of the upload request.
    pub fn finish(&mut self, result: Result<UploadReceipt, ColorizeError>) {
        self.status = match result {
            Ok(receipt) => Status::Stored(receipt.filename),
            Err(err) => {
                log::error!("Upload failed: {err}");
                Status::Failed(err.i18n_key())
            }
        };
    }

    /// Marks the upload as failed before any request was sent.
    pub fn fail(&mut self, key: &'static str) {
        self.status = Status::Failed(key);
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let sending = state.status == Status::Sending;

    let selected_label = match state.selected() {
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        None => ctx.i18n.tr("uploader-no-file"),
    };

    let choose = button(text(ctx.i18n.tr("uploader-choose-file")).size(typography::BODY));
    let choose = if sending {
        choose.style(styles::button::disabled())
    } else {
        choose
            .on_press(Message::ChooseFile)
            .style(styles::button::unselected)
    };

    let send = button(text(ctx.i18n.tr("uploader-send")).size(typography::BODY));
    let send = if sending || state.selected.is_none() {
        send.style(styles::button::disabled())
    } else {
        send.on_press(Message::Send).style(styles::button::primary)
    };

    let mut card = Column::new()
        .spacing(spacing::MD)
        .push(text(ctx.i18n.tr("uploader-title")).size(typography::TITLE_LG))
        .push(text(ctx.i18n.tr("uploader-description")).size(typography::BODY))
        .push(
            Row::new()
                .spacing(spacing::SM)
                .push(choose)
                .push(text(selected_label).size(typography::BODY)),
        )
        .push(send);

    if let Some(line) = status_line(&state.status, ctx.i18n) {
        card = card.push(line);
    }

    container(
        container(card)
            .padding(spacing::LG)
            .width(Length::Fixed(sizing::SIDEBAR_WIDTH * 2.0))
            .style(styles::container::panel),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(spacing::XL)
    .align_x(Horizontal::Center)
    .into()
}

fn status_line<'a>(status: &Status, i18n: &I18n) -> Option<Element<'a, Message>> {
    let (content, color) = match status {
        Status::Idle => return None,
        Status::Sending => (i18n.tr("uploader-sending"), None),
        Status::Stored(name) => (
            i18n.tr_with_args("uploader-stored", &[("filename", name.as_str())]),
            Some(palette::SUCCESS_500),
        ),
        Status::Failed(key) => (i18n.tr(key), Some(palette::ERROR_500)),
    };

    Some(
        text(content)
            .size(typography::BODY)
            .style(move |_theme: &Theme| text::Style { color })
            .into(),
    )
}
