// SPDX-License-Identifier: MPL-2.0
//! Navigation bar shown at the top of every screen.
//!
//! Holds the application title, the switch between the colorizer and the
//! uploader screens, the colorization service status with a re-check
//! button, and the theme and language toggles.

use crate::app::Screen;
use crate::i18n::fluent::I18n;
use crate::service::ServiceHealth;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, Container, Row, Space, Text},
    Color, Element, Length,
};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub theme_mode: ThemeMode,
    pub health: ServiceHealth,
    /// Base URL of the colorization service, shown next to the status.
    pub endpoint: &'a str,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    ShowColorizer,
    ShowUploader,
    CycleTheme,
    CycleLanguage,
    CheckHealth,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SwitchScreen(Screen),
    CycleTheme,
    CycleLanguage,
    CheckHealth,
}

/// Process a navbar message and return the corresponding event.
#[must_use]
pub fn update(message: Message) -> Event {
    match message {
        Message::ShowColorizer => Event::SwitchScreen(Screen::Colorizer),
        Message::ShowUploader => Event::SwitchScreen(Screen::Uploader),
        Message::CycleTheme => Event::CycleTheme,
        Message::CycleLanguage => Event::CycleLanguage,
        Message::CheckHealth => Event::CheckHealth,
    }
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("window-title")).size(typography::TITLE_MD);

    let colorizer_tab = screen_button(
        ctx.i18n.tr("navbar-colorizer"),
        ctx.screen == Screen::Colorizer,
        Message::ShowColorizer,
    );
    let uploader_tab = screen_button(
        ctx.i18n.tr("navbar-uploader"),
        ctx.screen == Screen::Uploader,
        Message::ShowUploader,
    );

    let row = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .align_y(Vertical::Center)
        .push(title)
        .push(Space::new().width(spacing::MD))
        .push(colorizer_tab)
        .push(uploader_tab)
        .push(Space::new().width(Length::Fill))
        .push(health_badge(&ctx))
        .push(check_button(&ctx))
        .push(
            button(Text::new(ctx.i18n.tr(ctx.theme_mode.i18n_key())).size(typography::BODY_SM))
                .on_press(Message::CycleTheme)
                .style(styles::button::unselected),
        )
        .push(
            button(Text::new(ctx.i18n.current_locale().to_string()).size(typography::BODY_SM))
                .on_press(Message::CycleLanguage)
                .style(styles::button::unselected),
        );

    Container::new(row)
        .width(Length::Fill)
        .align_x(Horizontal::Left)
        .style(styles::container::navbar)
        .into()
}

fn screen_button<'a>(label: String, active: bool, message: Message) -> Element<'a, Message> {
    let style = if active {
        styles::button::selected
    } else {
        styles::button::unselected
    };
    button(Text::new(label).size(typography::BODY))
        .on_press(message)
        .style(style)
        .into()
}

fn health_badge<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let color = health_color(ctx.health);
    let label = ctx
        .i18n
        .tr_with_args(ctx.health.i18n_key(), &[("endpoint", ctx.endpoint)]);

    Container::new(Text::new(label).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::status_badge(color))
        .into()
}

fn check_button<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let label = Text::new(ctx.i18n.tr("navbar-check-service")).size(typography::BODY_SM);
    if ctx.health == ServiceHealth::Checking {
        button(label).style(styles::button::disabled()).into()
    } else {
        button(label)
            .on_press(Message::CheckHealth)
            .style(styles::button::unselected)
            .into()
    }
}

fn health_color(health: ServiceHealth) -> Color {
    match health {
        ServiceHealth::Online => palette::SUCCESS_500,
        ServiceHealth::ModelNotLoaded => palette::WARNING_500,
        ServiceHealth::Offline => palette::ERROR_500,
        ServiceHealth::Unknown | ServiceHealth::Checking => palette::GRAY_400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_switch_screens() {
        assert_eq!(
            update(Message::ShowUploader),
            Event::SwitchScreen(Screen::Uploader)
        );
        assert_eq!(
            update(Message::ShowColorizer),
            Event::SwitchScreen(Screen::Colorizer)
        );
    }

    #[test]
    fn actions_are_forwarded() {
        assert_eq!(update(Message::CycleTheme), Event::CycleTheme);
        assert_eq!(update(Message::CycleLanguage), Event::CycleLanguage);
        assert_eq!(update(Message::CheckHealth), Event::CheckHealth);
    }

    #[test]
    fn health_states_have_distinct_colors() {
        assert_ne!(
            health_color(ServiceHealth::Online),
            health_color(ServiceHealth::Offline)
        );
        assert_ne!(
            health_color(ServiceHealth::Online),
            health_color(ServiceHealth::ModelNotLoaded)
        );
    }
}
