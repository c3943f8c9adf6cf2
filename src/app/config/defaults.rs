// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Service**: Colorization endpoint and request timeout
//! - **Display**: Preview resolution

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Default base URL of the colorization service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default timeout for a colorize request (in seconds).
/// Model inference on CPU can take a while for large photos.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Default longest edge of on-screen previews (in pixels).
pub const DEFAULT_PREVIEW_MAX_DIMENSION: u32 = 1600;

/// Minimum preview edge (in pixels).
pub const MIN_PREVIEW_MAX_DIMENSION: u32 = 256;

/// Maximum preview edge (in pixels).
pub const MAX_PREVIEW_MAX_DIMENSION: u32 = 8192;

/// Default position of the comparison divider (fraction of the width).
pub const DEFAULT_DIVIDER_POSITION: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_lie_inside_their_ranges() {
        assert!((MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS)
            .contains(&DEFAULT_REQUEST_TIMEOUT_SECS));
        assert!((MIN_PREVIEW_MAX_DIMENSION..=MAX_PREVIEW_MAX_DIMENSION)
            .contains(&DEFAULT_PREVIEW_MAX_DIMENSION));
        assert!((0.0..=1.0).contains(&DEFAULT_DIVIDER_POSITION));
    }
}
