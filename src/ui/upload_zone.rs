// SPDX-License-Identifier: MPL-2.0
//! Drop target shown while no image is loaded.
//!
//! Files dropped anywhere on the window are routed here by the
//! application's event subscription; this module only tracks whether files
//! hover over the window and renders the zone with its "choose file"
//! button.

use crate::i18n::fluent::I18n;
use crate::media::IMAGE_EXTENSIONS;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    Element, Length, Theme,
};

/// Drag hover state of the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct State {
    hovered: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Files entered the window while being dragged.
    FilesHovered,
    /// Dragged files left the window or were dropped.
    FilesLeft,
    ChooseFile,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    OpenPicker,
}

impl State {
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::FilesHovered => {
                self.hovered = true;
                Event::None
            }
            Message::FilesLeft => {
                self.hovered = false;
                Event::None
            }
            Message::ChooseFile => Event::OpenPicker,
        }
    }
}

/// Contextual data needed to render the upload zone.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// A file is being read or a request is starting; the button is disabled.
    pub busy: bool,
}

pub fn view<'a>(state: &State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let headline_key = if state.hovered {
        "upload-zone-drop-now"
    } else {
        "upload-zone-title"
    };

    let choose = button(Text::new(ctx.i18n.tr("upload-zone-choose-file")).size(typography::BODY_LG))
        .padding([spacing::XS, spacing::MD]);
    let choose = if ctx.busy {
        choose.style(styles::button::disabled())
    } else {
        choose
            .on_press(Message::ChooseFile)
            .style(styles::button::primary)
    };

    let extensions = IMAGE_EXTENSIONS.join(", ");
    let formats = ctx
        .i18n
        .tr_with_args("upload-zone-formats", &[("formats", extensions.as_str())]);

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(
            Text::new("⬆")
                .size(sizing::ICON_XL)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::PRIMARY_500),
                }),
        )
        .push(Text::new(ctx.i18n.tr(headline_key)).size(typography::TITLE_SM))
        .push(Text::new(ctx.i18n.tr("upload-zone-hint")).size(typography::BODY))
        .push(choose)
        .push(Text::new(formats).size(typography::CAPTION));

    let zone = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::UPLOAD_ZONE_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(styles::container::drop_zone(state.hovered));

    Container::new(zone)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::XXL)
        .align_y(Vertical::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_state_follows_window_events() {
        let mut state = State::default();
        assert!(!state.is_hovered());

        assert_eq!(state.update(Message::FilesHovered), Event::None);
        assert!(state.is_hovered());

        state.update(Message::FilesLeft);
        assert!(!state.is_hovered());
    }

    #[test]
    fn choose_file_opens_picker() {
        let mut state = State::default();
        assert_eq!(state.update(Message::ChooseFile), Event::OpenPicker);
    }
}
