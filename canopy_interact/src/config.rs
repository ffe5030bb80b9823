// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use canopy_view::{DEFAULT_BORDER, DEFAULT_MIN_INDICATOR, ViewError, ZoomLimits};
use kurbo::Size;

/// Tunables of a [`crate::ViewEngine`].
///
/// The defaults reproduce the classic tree-viewer feel: a 1.25× wheel step,
/// a 200ms redraw debounce, a 10% margin when framing a node, and a 5px
/// minimum minimap indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Zoom-in factor per wheel tick; zooming out uses its reciprocal.
    ///
    /// Must be finite and greater than one.
    pub zoom_step: f64,
    /// Bounds on each zoom factor. Zooms that would leave them are ignored.
    pub zoom_limits: ZoomLimits,
    /// Quiet period after the last zoom before the authoritative redraw.
    pub debounce_delay: Duration,
    /// Margin used when framing a node, as a fraction of its size per side.
    pub box_border: f64,
    /// Minimum displayed size of the minimap indicator, in minimap pixels.
    pub min_indicator_size: Size,
    /// Redraw on every drag movement instead of once when the drag ends.
    pub continuous_drag: bool,
    /// Fraction of the screen moved per keyboard pan step.
    pub pan_step: f64,
    /// Initial side-panel split, in percent of the screen width.
    pub initial_split: f64,
}

impl EngineConfig {
    /// Checks every setting against its valid domain.
    pub fn validate(&self) -> Result<(), ViewError> {
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(ViewError::InvalidConfig {
                setting: "zoom_step",
            });
        }
        self.zoom_limits.validate()?;
        if !(self.box_border.is_finite() && self.box_border >= 0.0) {
            return Err(ViewError::InvalidConfig {
                setting: "box_border",
            });
        }
        let min = self.min_indicator_size;
        if !(min.is_finite() && min.width >= 0.0 && min.height >= 0.0) {
            return Err(ViewError::InvalidConfig {
                setting: "min_indicator_size",
            });
        }
        if !(self.pan_step.is_finite() && self.pan_step > 0.0) {
            return Err(ViewError::InvalidConfig {
                setting: "pan_step",
            });
        }
        if !(1.0..=99.0).contains(&self.initial_split) {
            return Err(ViewError::InvalidConfig {
                setting: "initial_split",
            });
        }
        Ok(())
    }

    /// Multiplicative zoom change for one step in or out.
    #[must_use]
    pub fn zoom_factor(&self, zoom_in: bool) -> f64 {
        if zoom_in {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.25,
            zoom_limits: ZoomLimits::default(),
            debounce_delay: Duration::from_millis(200),
            box_border: DEFAULT_BORDER,
            min_indicator_size: DEFAULT_MIN_INDICATOR,
            continuous_drag: false,
            pan_step: 0.1,
            initial_split: 80.0,
        }
    }
}
