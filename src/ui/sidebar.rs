// SPDX-License-Identifier: MPL-2.0
//! Adjustment sidebar next to the comparison view.
//!
//! One slider per entry of [`SLIDERS`], a button restoring the neutral
//! values, and the export button.

use crate::domain::editing::{AdjustmentKey, Adjustments, SliderSpec, SLIDERS};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, rule, slider, text, Column, Row, Space};
use iced::{Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    Adjust(AdjustmentKey, i32),
    ResetAdjustments,
    Export,
}

/// Contextual data needed to render the sidebar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub adjustments: &'a Adjustments,
    /// Whether a colorized image exists and no request is running.
    pub can_export: bool,
    /// Display name of the uploaded file.
    pub file_name: Option<&'a str>,
    /// Native size of the original image.
    pub dimensions: Option<(u32, u32)>,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(text(ctx.i18n.tr("sidebar-title")).size(typography::TITLE_SM));

    if let Some(name) = ctx.file_name {
        column = column.push(text(name.to_string()).size(typography::BODY_SM));
    }
    if let Some((width, height)) = ctx.dimensions {
        let (width, height) = (width.to_string(), height.to_string());
        column = column.push(
            text(ctx.i18n.tr_with_args(
                "sidebar-dimensions",
                &[("width", width.as_str()), ("height", height.as_str())],
            ))
            .size(typography::CAPTION),
        );
    }

    column = column.push(rule::horizontal(1));

    for spec in SLIDERS {
        column = column.push(slider_row(&spec, ctx.adjustments.get(spec.key), ctx.i18n));
    }

    let reset = button(text(ctx.i18n.tr("sidebar-reset-adjustments")).size(typography::BODY))
        .padding(spacing::XS)
        .width(Length::Fill);
    let reset = if ctx.adjustments.is_default() {
        reset.style(styles::button::disabled())
    } else {
        reset
            .on_press(Message::ResetAdjustments)
            .style(styles::button::unselected)
    };

    let export = button(text(ctx.i18n.tr("sidebar-export")).size(typography::BODY_LG))
        .padding(spacing::SM)
        .width(Length::Fill);
    let export = if ctx.can_export {
        export.on_press(Message::Export).style(styles::button::primary)
    } else {
        export.style(styles::button::disabled())
    };

    column = column
        .push(reset)
        .push(Space::new().height(Length::Fill))
        .push(export);

    container(column)
        .padding(spacing::MD)
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(styles::container::panel)
        .into()
}

fn slider_row<'a>(spec: &SliderSpec, value: i32, i18n: &I18n) -> Element<'a, Message> {
    let key = spec.key;
    let header = Row::new()
        .push(text(i18n.tr(spec.label_key)).size(typography::BODY_SM))
        .push(Space::new().width(Length::Fill))
        .push(text(format_value(value, spec.unit)).size(typography::CAPTION));

    Column::new()
        .spacing(spacing::XXS)
        .push(header)
        .push(slider(spec.min..=spec.max, value, move |v| Message::Adjust(key, v)).step(1))
        .into()
}

/// Slider value with its unit, e.g. `180°` or `100%`.
fn format_value(value: i32, unit: &str) -> String {
    format!("{value}{unit}")
}
