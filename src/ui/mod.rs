// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! one exposes a `Message`, an optional `State` whose `update` returns an
//! `Event` for the application, and a `view` taking a `ViewContext`.
//!
//! # Screens
//!
//! - [`upload_zone`] - Drop target and file picker shown while no image is loaded
//! - [`comparison`] - Before/after split view with draggable divider
//! - [`sidebar`] - Filter sliders and export button
//! - [`uploader`] - Standalone upload to the service's `/upload` endpoint
//!
//! # Shared Infrastructure
//!
//! - [`navbar`] - Title, screen switch, service status, theme and language toggles
//! - [`notifications`] - Toast notification system for user feedback
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod comparison;
pub mod design_tokens;
pub mod navbar;
pub mod notifications;
pub mod sidebar;
pub mod styles;
pub mod theming;
pub mod upload_zone;
pub mod uploader;
pub mod widgets;
