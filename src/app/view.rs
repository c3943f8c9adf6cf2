// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The navbar sits on top of the active screen and toast notifications are
//! stacked over everything.

use super::{Message, Screen};
use crate::i18n::fluent::I18n;
use crate::service::ServiceHealth;
use crate::session::Session;
use crate::ui::comparison;
use crate::ui::navbar::{self, ViewContext as NavbarViewContext};
use crate::ui::notifications::{self, Toast};
use crate::ui::sidebar;
use crate::ui::theming::ThemeMode;
use crate::ui::upload_zone;
use crate::ui::uploader;
use iced::{
    widget::{Column, Container, Row, Stack},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub theme_mode: ThemeMode,
    pub health: ServiceHealth,
    pub endpoint: &'a str,
    pub session: &'a Session,
    pub comparison: &'a comparison::State,
    pub upload_zone: &'a upload_zone::State,
    pub uploader: &'a uploader::State,
    pub intake_pending: bool,
    pub spinner_rotation: f32,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let navbar_view = navbar::view(NavbarViewContext {
        i18n: ctx.i18n,
        screen: ctx.screen,
        theme_mode: ctx.theme_mode,
        health: ctx.health,
        endpoint: ctx.endpoint,
    })
    .map(Message::Navbar);

    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Colorizer => view_colorizer(&ctx),
        Screen::Uploader => uploader::view(ctx.uploader, uploader::ViewContext { i18n: ctx.i18n })
            .map(Message::Uploader),
    };

    let column = Column::new().push(navbar_view).push(
        Container::new(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(column)
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .into()
}

/// Upload zone while the session is empty, comparison and sidebar otherwise.
fn view_colorizer<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let session = ctx.session;

    let Some(original) = session.original() else {
        return upload_zone::view(
            ctx.upload_zone,
            upload_zone::ViewContext {
                i18n: ctx.i18n,
                busy: ctx.intake_pending,
            },
        )
        .map(Message::UploadZone);
    };

    let comparison_view = comparison::view(
        ctx.comparison,
        comparison::ViewContext {
            i18n: ctx.i18n,
            original: original.preview(),
            processed: session.filtered_preview(),
            processing: session.is_processing(),
            spinner_rotation: ctx.spinner_rotation,
        },
    )
    .map(Message::Comparison);

    let sidebar_view = sidebar::view(sidebar::ViewContext {
        i18n: ctx.i18n,
        adjustments: session.adjustments(),
        can_export: session.can_export(),
        file_name: session.source().map(|source| source.name.as_str()),
        dimensions: Some(original.dimensions()),
    })
    .map(Message::Sidebar);

    Row::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(comparison_view)
        .push(sidebar_view)
        .into()
}
