// SPDX-License-Identifier: MPL-2.0
//! Filter composition shared by the live preview and the export pipeline.
//!
//! [`compose`] is the only place where [`Adjustments`] turn into filter
//! operations. The resulting [`FilterChain`] renders as a CSS filter
//! string through `Display` and applies the same operations to RGBA pixels
//! through [`FilterChain::apply_rgba`], so what the preview shows is what
//! the export writes.
//!
//! The color math follows the CSS Filter Effects shorthand definitions
//! (`hue-rotate`, `sepia`, `saturate`, `brightness`, `contrast`), evaluated
//! in sRGB space. Each operation reads the clamped output of the previous
//! one, which is why the order is fixed.

use super::adjustments::Adjustments;
use std::fmt;

/// One filter function with its integer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Hue rotation in degrees.
    HueRotate(i32),
    /// Sepia amount in percent.
    Sepia(i32),
    /// Saturation in percent.
    Saturate(i32),
    /// Brightness in percent.
    Brightness(i32),
    /// Contrast in percent.
    Contrast(i32),
}

impl FilterOp {
    /// Returns true if the operation leaves every pixel unchanged.
    #[must_use]
    pub fn is_identity(self) -> bool {
        match self {
            FilterOp::HueRotate(degrees) => degrees.rem_euclid(360) == 0,
            FilterOp::Sepia(percent) => percent == 0,
            FilterOp::Saturate(percent)
            | FilterOp::Brightness(percent)
            | FilterOp::Contrast(percent) => percent == 100,
        }
    }

    fn step(self) -> Step {
        match self {
            FilterOp::HueRotate(degrees) => {
                let (sin, cos) = (degrees as f32).to_radians().sin_cos();
                Step::Matrix([
                    [
                        0.213 + cos * 0.787 - sin * 0.213,
                        0.715 - cos * 0.715 - sin * 0.715,
                        0.072 - cos * 0.072 + sin * 0.928,
                    ],
                    [
                        0.213 - cos * 0.213 + sin * 0.143,
                        0.715 + cos * 0.285 + sin * 0.140,
                        0.072 - cos * 0.072 - sin * 0.283,
                    ],
                    [
                        0.213 - cos * 0.213 - sin * 0.787,
                        0.715 - cos * 0.715 + sin * 0.715,
                        0.072 + cos * 0.928 + sin * 0.072,
                    ],
                ])
            }
            FilterOp::Sepia(percent) => {
                let inv = 1.0 - (percent as f32 / 100.0).clamp(0.0, 1.0);
                Step::Matrix([
                    [0.393 + 0.607 * inv, 0.769 - 0.769 * inv, 0.189 - 0.189 * inv],
                    [0.349 - 0.349 * inv, 0.686 + 0.314 * inv, 0.168 - 0.168 * inv],
                    [0.272 - 0.272 * inv, 0.534 - 0.534 * inv, 0.131 + 0.869 * inv],
                ])
            }
            FilterOp::Saturate(percent) => {
                let s = (percent as f32 / 100.0).max(0.0);
                Step::Matrix([
                    [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
                ])
            }
            FilterOp::Brightness(percent) => Step::Linear {
                slope: (percent as f32 / 100.0).max(0.0),
                intercept: 0.0,
            },
            FilterOp::Contrast(percent) => {
                let c = (percent as f32 / 100.0).max(0.0);
                Step::Linear {
                    slope: c,
                    intercept: 0.5 - 0.5 * c,
                }
            }
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::HueRotate(degrees) => write!(f, "hue-rotate({degrees}deg)"),
            FilterOp::Sepia(percent) => write!(f, "sepia({percent}%)"),
            FilterOp::Saturate(percent) => write!(f, "saturate({percent}%)"),
            FilterOp::Brightness(percent) => write!(f, "brightness({percent}%)"),
            FilterOp::Contrast(percent) => write!(f, "contrast({percent}%)"),
        }
    }
}

/// Precomputed per-pixel transfer of one operation.
#[derive(Debug, Clone, Copy)]
enum Step {
    Matrix([[f32; 3]; 3]),
    Linear { slope: f32, intercept: f32 },
}

impl Step {
    fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match self {
            Step::Matrix(m) => [
                m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
                m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
                m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
            ],
            Step::Linear { slope, intercept } => [
                rgb[0] * slope + intercept,
                rgb[1] * slope + intercept,
                rgb[2] * slope + intercept,
            ],
        };
        out.map(|v| v.clamp(0.0, 1.0))
    }
}

/// Ordered filter operations: hue-rotate, sepia, saturate, brightness,
/// contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterChain {
    ops: [FilterOp; 5],
}

/// Builds the filter chain for a set of adjustments.
#[must_use]
pub fn compose(adjustments: &Adjustments) -> FilterChain {
    FilterChain {
        ops: [
            FilterOp::HueRotate(adjustments.hue()),
            FilterOp::Sepia(adjustments.sepia()),
            FilterOp::Saturate(adjustments.saturation()),
            FilterOp::Brightness(adjustments.brightness()),
            FilterOp::Contrast(adjustments.contrast()),
        ],
    }
}

impl FilterChain {
    #[must_use]
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// Returns true if applying the chain would not change any pixel.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| op.is_identity())
    }

    /// Applies the chain in place to tightly packed RGBA8 pixels.
    ///
    /// Alpha is left untouched. Identity operations are skipped so an
    /// identity chain is an exact no-op.
    pub fn apply_rgba(&self, pixels: &mut [u8]) {
        let steps: Vec<Step> = self
            .ops
            .iter()
            .filter(|op| !op.is_identity())
            .map(|op| op.step())
            .collect();
        if steps.is_empty() {
            return;
        }

        for px in pixels.chunks_exact_mut(4) {
            let mut rgb = [
                f32::from(px[0]) / 255.0,
                f32::from(px[1]) / 255.0,
                f32::from(px[2]) / 255.0,
            ];
            for step in &steps {
                rgb = step.apply(rgb);
            }
            // Values are clamped to [0, 1] by every step.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            for (channel, value) in px.iter_mut().zip(rgb) {
                *channel = (value * 255.0).round() as u8;
            }
        }
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}
