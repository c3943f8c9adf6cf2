// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Translation files embedded into the binary
//! - Runtime language switching
//! - Fallback to `en-US` when no preferred locale is available

pub mod fluent;
