// SPDX-License-Identifier: MPL-2.0
//! Shared styles for every UI component.

pub mod button;
pub mod container;
pub mod overlay;

pub use button::{overlay as button_overlay, primary as button_primary};
