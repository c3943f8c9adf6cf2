// SPDX-License-Identifier: MPL-2.0
//! Before/after comparison of the original and the colorized image.
//!
//! Each image is fitted with its own "contain" geometry, so a colorized
//! result with a different aspect ratio is letterboxed instead of
//! stretched. The original is drawn everywhere and the filtered colorized preview is
//! drawn clipped to the right of a vertical divider. Pressing anywhere in
//! the view and dragging moves the divider.
//!
//! While a request is in flight only the original is shown, under an
//! opaque overlay with a spinner and a cancel button.

use crate::app::config::DEFAULT_DIVIDER_POSITION;
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::widget::{button, image, opaque, Action, Column, Container, Row, Space, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    mouse, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme,
};

/// Presentation state owned by the comparison view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    divider: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            divider: DEFAULT_DIVIDER_POSITION,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// New divider position as a fraction of the view width.
    DividerMoved(f32),
    /// Close button or cancel button on the busy overlay.
    Reset,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Reset,
}

impl State {
    #[must_use]
    pub fn divider(&self) -> f32 {
        self.divider
    }

    /// Puts the divider back in the middle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::DividerMoved(fraction) => {
                self.divider = fraction.clamp(0.0, 1.0);
                Event::None
            }
            Message::Reset => Event::Reset,
        }
    }
}

/// Contextual data needed to render the comparison.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub original: &'a ImageData,
    /// Colorized preview with the current filters applied.
    pub processed: Option<&'a ImageData>,
    pub processing: bool,
    pub spinner_rotation: f32,
}

pub fn view<'a>(state: &State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    // The busy overlay hides the colorized side even if an older result exists.
    let processed = if ctx.processing { None } else { ctx.processed };

    let split = Canvas::new(SplitView {
        original: Layer::from(ctx.original),
        processed: processed.map(Layer::from),
        divider: state.divider,
    })
    .width(Length::Fill)
    .height(Length::Fill);

    let mut labels = Row::new()
        .padding(spacing::SM)
        .push(label(ctx.i18n.tr("comparison-original-label")))
        .push(Space::new().width(Length::Fill));
    if processed.is_some() {
        labels = labels.push(label(ctx.i18n.tr("comparison-colorized-label")));
    }

    let close = button(Text::new("✕").size(typography::BODY))
        .on_press(Message::Reset)
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::overlay(
            palette::WHITE,
            opacity::OVERLAY_MEDIUM,
            opacity::OVERLAY_STRONG,
        ));

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(split)
        .push(
            Container::new(labels)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(Vertical::Bottom),
        )
        .push(
            Container::new(close)
                .width(Length::Fill)
                .padding(spacing::SM)
                .align_x(Horizontal::Right),
        );

    if ctx.processing {
        stack = stack.push(busy_overlay(ctx.i18n, ctx.spinner_rotation));
    }

    stack.into()
}

fn label<'a>(content: String) -> Element<'a, Message> {
    Container::new(Text::new(content).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::overlay::indicator(radius::SM))
        .into()
}

fn busy_overlay<'a>(i18n: &'a I18n, rotation: f32) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(Horizontal::Center)
        .push(AnimatedSpinner::new(palette::WHITE, rotation).into_element())
        .push(Text::new(i18n.tr("comparison-processing")).size(typography::BODY_LG))
        .push(
            button(Text::new(i18n.tr("comparison-cancel")).size(typography::BODY))
                .on_press(Message::Reset)
                .style(styles::button::unselected),
        );

    opaque(
        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .style(styles::overlay::busy_backdrop),
    )
}

// =============================================================================
// Canvas
// =============================================================================

#[derive(Debug, Clone)]
struct Layer {
    handle: image::Handle,
    width: u32,
    height: u32,
}

impl From<&ImageData> for Layer {
    fn from(data: &ImageData) -> Self {
        Self {
            handle: data.handle.clone(),
            width: data.width,
            height: data.height,
        }
    }
}

struct SplitView {
    original: Layer,
    processed: Option<Layer>,
    divider: f32,
}

#[derive(Debug, Default)]
struct DragState {
    dragging: bool,
}

impl canvas::Program<Message> for SplitView {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                state.dragging = true;
                Some(
                    Action::publish(Message::DividerMoved(divider_fraction(
                        position.x,
                        bounds.width,
                    )))
                    .and_capture(),
                )
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) if state.dragging => {
                let position = cursor.position()?;
                Some(
                    Action::publish(Message::DividerMoved(divider_fraction(
                        position.x - bounds.x,
                        bounds.width,
                    )))
                    .and_capture(),
                )
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if state.dragging =>
            {
                state.dragging = false;
                Some(Action::capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let layout = SplitLayout::compute(
            &self.original,
            self.processed.as_ref(),
            self.divider,
            bounds.size(),
        );

        frame.draw_image(
            layout.original,
            canvas::Image::new(self.original.handle.clone()),
        );

        if let (Some(processed), Some(clipped)) = (&self.processed, layout.processed) {
            frame.with_clip(clipped.region, |clip_frame| {
                clip_frame.draw_image(
                    clipped.target,
                    canvas::Image::new(processed.handle.clone()),
                );
            });

            draw_divider(&mut frame, layout.split_x, bounds.height);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.processed.is_some() && (state.dragging || cursor.is_over(bounds)) {
            mouse::Interaction::ResizingHorizontally
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Where each layer lands inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitLayout {
    original: Rectangle,
    processed: Option<ClippedLayer>,
    split_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ClippedLayer {
    /// Visible part of the canvas, right of the divider.
    region: Rectangle,
    /// Image rectangle relative to the region origin, as clip frames draw.
    target: Rectangle,
}

impl SplitLayout {
    fn compute(original: &Layer, processed: Option<&Layer>, divider: f32, bounds: Size) -> Self {
        let split_x = bounds.width * divider;
        let processed = processed.map(|layer| {
            let fitted = contain_rect(layer.width, layer.height, bounds);
            ClippedLayer {
                region: Rectangle {
                    x: split_x,
                    y: 0.0,
                    width: (bounds.width - split_x).max(0.0),
                    height: bounds.height,
                },
                target: Rectangle {
                    x: fitted.x - split_x,
                    ..fitted
                },
            }
        });

        Self {
            original: contain_rect(original.width, original.height, bounds),
            processed,
            split_x,
        }
    }
}

fn draw_divider(frame: &mut Frame, x: f32, height: f32) {
    let line = Path::line(Point::new(x, 0.0), Point::new(x, height));
    frame.stroke(
        &line,
        Stroke::default()
            .with_width(sizing::DIVIDER_WIDTH)
            .with_color(palette::WHITE),
    );

    let grip = Path::circle(Point::new(x, height / 2.0), sizing::DIVIDER_GRIP / 2.0);
    frame.fill(
        &grip,
        Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::BLACK
        },
    );
    frame.stroke(
        &grip,
        Stroke::default()
            .with_width(sizing::DIVIDER_WIDTH)
            .with_color(palette::WHITE),
    );
}

/// Largest rectangle with the image's aspect ratio that fits `bounds`,
/// centered.
fn contain_rect(width: u32, height: u32, bounds: Size) -> Rectangle {
    if width == 0 || height == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return Rectangle::new(Point::ORIGIN, Size::ZERO);
    }

    let scale = (bounds.width / width as f32).min(bounds.height / height as f32);
    let size = Size::new(width as f32 * scale, height as f32 * scale);
    Rectangle::new(
        Point::new(
            (bounds.width - size.width) / 2.0,
            (bounds.height - size.height) / 2.0,
        ),
        size,
    )
}

/// Converts a horizontal offset inside the view into a divider fraction.
fn divider_fraction(x: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return DEFAULT_DIVIDER_POSITION;
    }
    (x / width).clamp(0.0, 1.0)
}
