// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window file drag events are routed to the upload zone and the intake
//! handler on every screen; the colorizer ignores them while busy.

use super::Message;
use crate::ui::upload_zone;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval of the animation and auto-dismiss tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Routes window file drag and drop events.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Window(window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path))
        }
        event::Event::Window(window::Event::FileHovered(_)) => {
            Some(Message::UploadZone(upload_zone::Message::FilesHovered))
        }
        event::Event::Window(window::Event::FilesHoveredLeft) => {
            Some(Message::UploadZone(upload_zone::Message::FilesLeft))
        }
        _ => None,
    })
}

/// Creates a periodic tick subscription for the busy spinner and
/// notification auto-dismiss.
pub fn create_tick_subscription(is_processing: bool, has_notifications: bool) -> Subscription<Message> {
    if is_processing || has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
