// SPDX-License-Identifier: MPL-2.0
//! The five-parameter filter configuration and its slider table.

use super::newtypes::{
    brightness_bounds, contrast_bounds, hue_bounds, saturation_bounds, sepia_bounds,
    AdjustmentKey,
};

/// Visual filter configuration applied to the processed image.
///
/// Every field is guaranteed to lie inside the range returned by
/// [`AdjustmentKey::bounds`]; setters clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustments {
    hue: i32,
    sepia: i32,
    saturation: i32,
    brightness: i32,
    contrast: i32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            hue: hue_bounds::DEFAULT,
            sepia: sepia_bounds::DEFAULT,
            saturation: saturation_bounds::DEFAULT,
            brightness: brightness_bounds::DEFAULT,
            contrast: contrast_bounds::DEFAULT,
        }
    }
}

impl Adjustments {
    /// Hue rotation in degrees.
    #[must_use]
    pub fn hue(&self) -> i32 {
        self.hue
    }

    /// Sepia amount in percent.
    #[must_use]
    pub fn sepia(&self) -> i32 {
        self.sepia
    }

    /// Saturation in percent.
    #[must_use]
    pub fn saturation(&self) -> i32 {
        self.saturation
    }

    /// Brightness in percent.
    #[must_use]
    pub fn brightness(&self) -> i32 {
        self.brightness
    }

    /// Contrast in percent.
    #[must_use]
    pub fn contrast(&self) -> i32 {
        self.contrast
    }

    #[must_use]
    pub fn get(&self, key: AdjustmentKey) -> i32 {
        match key {
            AdjustmentKey::Hue => self.hue,
            AdjustmentKey::Sepia => self.sepia,
            AdjustmentKey::Saturation => self.saturation,
            AdjustmentKey::Brightness => self.brightness,
            AdjustmentKey::Contrast => self.contrast,
        }
    }

    /// Sets one adjustment, clamping the value to its range.
    pub fn set(&mut self, key: AdjustmentKey, value: i32) {
        let value = key.bounds().clamp(value);
        match key {
            AdjustmentKey::Hue => self.hue = value,
            AdjustmentKey::Sepia => self.sepia = value,
            AdjustmentKey::Saturation => self.saturation = value,
            AdjustmentKey::Brightness => self.brightness = value,
            AdjustmentKey::Contrast => self.contrast = value,
        }
    }

    /// Builder-style variant of [`Adjustments::set`].
    #[must_use]
    pub fn with(mut self, key: AdjustmentKey, value: i32) -> Self {
        self.set(key, value);
        self
    }

    /// Returns true if every value is at its neutral default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Restores every value to its neutral default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Static description of one adjustment slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSpec {
    pub key: AdjustmentKey,
    /// Fluent key of the slider label.
    pub label_key: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
    /// Unit appended to the displayed value.
    pub unit: &'static str,
}

/// Sliders in display order.
pub const SLIDERS: [SliderSpec; 5] = [
    SliderSpec {
        key: AdjustmentKey::Hue,
        label_key: "adjustment-hue-label",
        min: hue_bounds::MIN,
        max: hue_bounds::MAX,
        default: hue_bounds::DEFAULT,
        unit: "°",
    },
    SliderSpec {
        key: AdjustmentKey::Sepia,
        label_key: "adjustment-sepia-label",
        min: sepia_bounds::MIN,
        max: sepia_bounds::MAX,
        default: sepia_bounds::DEFAULT,
        unit: "%",
    },
    SliderSpec {
        key: AdjustmentKey::Saturation,
        label_key: "adjustment-saturation-label",
        min: saturation_bounds::MIN,
        max: saturation_bounds::MAX,
        default: saturation_bounds::DEFAULT,
        unit: "%",
    },
    SliderSpec {
        key: AdjustmentKey::Brightness,
        label_key: "adjustment-brightness-label",
        min: brightness_bounds::MIN,
        max: brightness_bounds::MAX,
        default: brightness_bounds::DEFAULT,
        unit: "%",
    },
    SliderSpec {
        key: AdjustmentKey::Contrast,
        label_key: "adjustment-contrast-label",
        min: contrast_bounds::MIN,
        max: contrast_bounds::MAX,
        default: contrast_bounds::DEFAULT,
        unit: "%",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity_filter() {
        let adjustments = Adjustments::default();
        assert_eq!(adjustments.hue(), 0);
        assert_eq!(adjustments.sepia(), 0);
        assert_eq!(adjustments.saturation(), 100);
        assert_eq!(adjustments.brightness(), 100);
        assert_eq!(adjustments.contrast(), 100);
        assert!(adjustments.is_default());
    }

    #[test]
    fn set_clamps_to_declared_range() {
        let mut adjustments = Adjustments::default();
        adjustments.set(AdjustmentKey::Hue, 720);
        adjustments.set(AdjustmentKey::Brightness, 10);
        adjustments.set(AdjustmentKey::Saturation, -5);

        assert_eq!(adjustments.hue(), 360);
        assert_eq!(adjustments.brightness(), 50);
        assert_eq!(adjustments.saturation(), 0);
    }

    #[test]
    fn reset_restores_defaults_from_any_state() {
        let mut adjustments = Adjustments::default()
            .with(AdjustmentKey::Hue, 200)
            .with(AdjustmentKey::Sepia, 80)
            .with(AdjustmentKey::Saturation, 10)
            .with(AdjustmentKey::Brightness, 140)
            .with(AdjustmentKey::Contrast, 60);
        assert!(!adjustments.is_default());

        adjustments.reset();

        assert_eq!(adjustments, Adjustments::default());
    }

    #[test]
    fn get_reads_back_what_set_wrote() {
        let mut adjustments = Adjustments::default();
        for spec in SLIDERS {
            adjustments.set(spec.key, spec.max);
            assert_eq!(adjustments.get(spec.key), spec.max);
        }
    }

    #[test]
    fn slider_table_matches_bounds_and_order() {
        let keys: Vec<AdjustmentKey> = SLIDERS.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                AdjustmentKey::Hue,
                AdjustmentKey::Sepia,
                AdjustmentKey::Saturation,
                AdjustmentKey::Brightness,
                AdjustmentKey::Contrast,
            ]
        );

        let defaults = Adjustments::default();
        for spec in SLIDERS {
            let bounds = spec.key.bounds();
            assert_eq!((spec.min, spec.max), (bounds.min, bounds.max));
            assert_eq!(spec.default, defaults.get(spec.key));
        }
    }
}
