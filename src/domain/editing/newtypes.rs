// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides the value bounds for the five filter adjustments
//! and the key type used to address them.

// =============================================================================
// Adjustment Bounds
// =============================================================================

/// Hue rotation bounds in degrees (0 to 360).
pub mod hue_bounds {
    /// Minimum hue rotation.
    pub const MIN: i32 = 0;
    /// Maximum hue rotation.
    pub const MAX: i32 = 360;
    /// Default (neutral) hue rotation.
    pub const DEFAULT: i32 = 0;
}

/// Sepia amount bounds in percent (0 to 100).
pub mod sepia_bounds {
    /// Minimum sepia amount.
    pub const MIN: i32 = 0;
    /// Maximum sepia amount.
    pub const MAX: i32 = 100;
    /// Default (neutral) sepia amount.
    pub const DEFAULT: i32 = 0;
}

/// Saturation bounds in percent (0 to 200).
pub mod saturation_bounds {
    /// Minimum saturation (grayscale).
    pub const MIN: i32 = 0;
    /// Maximum saturation.
    pub const MAX: i32 = 200;
    /// Default (neutral) saturation.
    pub const DEFAULT: i32 = 100;
}

/// Brightness bounds in percent (50 to 150).
pub mod brightness_bounds {
    /// Minimum brightness.
    pub const MIN: i32 = 50;
    /// Maximum brightness.
    pub const MAX: i32 = 150;
    /// Default (neutral) brightness.
    pub const DEFAULT: i32 = 100;
}

/// Contrast bounds in percent (50 to 150).
pub mod contrast_bounds {
    /// Minimum contrast.
    pub const MIN: i32 = 50;
    /// Maximum contrast.
    pub const MAX: i32 = 150;
    /// Default (neutral) contrast.
    pub const DEFAULT: i32 = 100;
}

// =============================================================================
// AdjustmentBounds
// =============================================================================

/// Inclusive value range and neutral value of one adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentBounds {
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl AdjustmentBounds {
    /// Clamps `value` into the range.
    #[must_use]
    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Returns whether `value` lies inside the range.
    #[must_use]
    pub fn contains(self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// =============================================================================
// AdjustmentKey
// =============================================================================

/// Identifies one of the five adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentKey {
    Hue,
    Sepia,
    Saturation,
    Brightness,
    Contrast,
}

impl AdjustmentKey {
    /// Returns the value bounds for this adjustment.
    #[must_use]
    pub fn bounds(self) -> AdjustmentBounds {
        match self {
            AdjustmentKey::Hue => AdjustmentBounds {
                min: hue_bounds::MIN,
                max: hue_bounds::MAX,
                default: hue_bounds::DEFAULT,
            },
            AdjustmentKey::Sepia => AdjustmentBounds {
                min: sepia_bounds::MIN,
                max: sepia_bounds::MAX,
                default: sepia_bounds::DEFAULT,
            },
            AdjustmentKey::Saturation => AdjustmentBounds {
                min: saturation_bounds::MIN,
                max: saturation_bounds::MAX,
                default: saturation_bounds::DEFAULT,
            },
            AdjustmentKey::Brightness => AdjustmentBounds {
                min: brightness_bounds::MIN,
                max: brightness_bounds::MAX,
                default: brightness_bounds::DEFAULT,
            },
            AdjustmentKey::Contrast => AdjustmentBounds {
                min: contrast_bounds::MIN,
                max: contrast_bounds::MAX,
                default: contrast_bounds::DEFAULT,
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
