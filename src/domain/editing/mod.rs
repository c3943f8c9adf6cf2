// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for the filter adjustments:
//! - [`Adjustments`]: The five bounded filter parameters
//! - [`SLIDERS`]: Static slider table driving the adjustment panel
//! - [`FilterChain`]: Ordered filter operations composed from [`Adjustments`]

pub mod adjustments;
pub mod filter;
pub mod newtypes;

pub use adjustments::{Adjustments, SliderSpec, SLIDERS};
pub use filter::{compose, FilterChain, FilterOp};
pub use newtypes::{AdjustmentBounds, AdjustmentKey};
