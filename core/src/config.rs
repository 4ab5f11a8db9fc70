use serde::{Deserialize, Serialize};

use crate::*;

/// Tuning knobs of the scratch reveal engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScratchConfig {
    /// Erased fraction at which the result is committed as revealed.
    pub threshold_fraction: f64,
    /// Coverage is sampled on every n-th pointer move of a stroke.
    pub throttle_every: u32,
    /// Smallest brush radius, in CSS pixels.
    pub min_brush_radius_px: f64,
    /// Brush radius relative to the shorter side of the container.
    pub brush_radius_factor: f64,
}

impl ScratchConfig {
    pub const DEFAULT: Self = Self::new_unchecked(0.5, 10, 18.0, 0.05);

    pub const fn new_unchecked(
        threshold_fraction: f64,
        throttle_every: u32,
        min_brush_radius_px: f64,
        brush_radius_factor: f64,
    ) -> Self {
        Self {
            threshold_fraction,
            throttle_every,
            min_brush_radius_px,
            brush_radius_factor,
        }
    }

    pub fn new(
        threshold_fraction: f64,
        throttle_every: u32,
        min_brush_radius_px: f64,
        brush_radius_factor: f64,
    ) -> Self {
        let threshold_fraction = if threshold_fraction.is_nan() {
            Self::DEFAULT.threshold_fraction
        } else {
            threshold_fraction.clamp(f64::MIN_POSITIVE, 1.0)
        };
        let non_negative = |value: f64, fallback: f64| {
            if value.is_finite() {
                value.max(0.0)
            } else {
                fallback
            }
        };
        Self::new_unchecked(
            threshold_fraction,
            throttle_every.max(1),
            non_negative(min_brush_radius_px, Self::DEFAULT.min_brush_radius_px),
            non_negative(brush_radius_factor, Self::DEFAULT.brush_radius_factor),
        )
    }

    /// Re-applies the constructor's clamping, for values that came from outside.
    pub fn sanitized(self) -> Self {
        Self::new(
            self.threshold_fraction,
            self.throttle_every,
            self.min_brush_radius_px,
            self.brush_radius_factor,
        )
    }

    /// Brush radius in CSS pixels for a container of the given size.
    pub fn brush_radius(&self, container: &ContainerBox) -> f64 {
        self.min_brush_radius_px
            .max(self.brush_radius_factor * container.min_side())
    }
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
