// SPDX-License-Identifier: MPL-2.0
//! `iced_colorizer` is a desktop front end for a remote image colorization
//! service, built with the Iced GUI framework.
//!
//! Users drop or pick a photo, the service returns a colorized version, and
//! the application shows both side by side with a draggable divider. Five
//! filters (hue, sepia, saturation, brightness, contrast) adjust the result
//! live, and the adjusted image can be exported as PNG.

pub mod app;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod media;
pub mod service;
pub mod session;
pub mod ui;
