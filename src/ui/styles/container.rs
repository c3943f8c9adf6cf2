// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for the sidebar and the uploader card.
///
/// The color is derived from the active Iced `Theme` background, with a slight
/// opacity, so panels stay readable in both light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Navbar strip at the top of the window.
pub fn navbar(theme: &Theme) -> container::Style {
    let weak = theme.extended_palette().background.weak;
    container::Style {
        background: Some(Background::Color(weak.color)),
        text_color: Some(weak.text),
        ..Default::default()
    }
}

/// Dashed-looking outline of the upload drop zone; highlighted while files
/// hover over the window.
pub fn drop_zone(hovered: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let base = theme.extended_palette().background.base.color;
        let (outline, fill_alpha) = if hovered {
            (palette::PRIMARY_500, opacity::OVERLAY_SUBTLE)
        } else {
            (palette::GRAY_400, opacity::TRANSPARENT)
        };

        container::Style {
            background: Some(Background::Color(if hovered {
                Color {
                    a: fill_alpha,
                    ..palette::PRIMARY_400
                }
            } else {
                base
            })),
            border: Border {
                color: outline,
                width: border::WIDTH_MD,
                radius: radius::LG.into(),
            },
            ..Default::default()
        }
    }
}

/// Small pill showing the service status in the navbar.
pub fn status_badge(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..color
        })),
        text_color: Some(color),
        border: Border {
            color,
            width: border::WIDTH_SM,
            radius: radius::FULL.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_zone_highlights_on_hover() {
        let idle = drop_zone(false)(&Theme::Dark);
        let hovered = drop_zone(true)(&Theme::Dark);
        assert_eq!(hovered.border.color, palette::PRIMARY_500);
        assert_ne!(idle.border.color, hovered.border.color);
    }

    #[test]
    fn status_badge_uses_given_color() {
        let style = status_badge(palette::SUCCESS_500)(&Theme::Light);
        assert_eq!(style.border.color, palette::SUCCESS_500);
        assert_eq!(style.text_color, Some(palette::SUCCESS_500));
    }
}
