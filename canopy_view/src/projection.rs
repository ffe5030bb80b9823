// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::error::ViewError;

/// How tree space is laid out on screen.
///
/// This enum is consulted by [`crate::screen_to_tree`], [`crate::fit_box`],
/// [`crate::fit_tree`] and the minimap helpers, so that callers never have to
/// branch on the active projection themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// Axis-aligned layout (a classic dendrogram).
    ///
    /// `top_left` is the tree-space point at the screen's top-left corner.
    #[default]
    Rectangular,
    /// Polar layout: nodes occupy annular sectors around the tree-space origin.
    ///
    /// `top_left` is still the tree-space point at the screen's top-left
    /// corner, so the origin sits at `-top_left * zoom` on screen. Zoom is
    /// always isotropic in this mode.
    Circular,
}

impl Projection {
    /// Returns `true` for [`Projection::Circular`].
    #[must_use]
    pub fn is_circular(self) -> bool {
        matches!(self, Self::Circular)
    }
}

/// The visible slice of a circular layout, in degrees.
///
/// Both bounds lie in `[-180, 180]` and `min < max`. The default is the full
/// circle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleWindow {
    min: f64,
    max: f64,
}

impl AngleWindow {
    /// The full circle, `[-180, 180]`.
    pub const FULL: Self = Self {
        min: -180.0,
        max: 180.0,
    };

    /// Creates a window from its bounds in degrees.
    pub fn new(min: f64, max: f64) -> Result<Self, ViewError> {
        if !(min.is_finite() && max.is_finite()) || min < -180.0 || max > 180.0 || min >= max {
            return Err(ViewError::InvalidAngleWindow { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound, in degrees.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound, in degrees.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Angular span, in degrees.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if this window covers the whole circle.
    #[must_use]
    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Scales the window about `angle` by `factor`, clipping to `[-180, 180]`.
    ///
    /// A factor below one narrows the window, above one widens it. Returns
    /// `None` if the result would be empty or non-finite.
    #[must_use]
    pub fn scaled_about(&self, angle: f64, factor: f64) -> Option<Self> {
        let min = (angle + factor * (self.min - angle)).max(-180.0);
        let max = (angle + factor * (self.max - angle)).min(180.0);
        Self::new(min, max).ok()
    }
}

impl Default for AngleWindow {
    fn default() -> Self {
        Self::FULL
    }
}

/// Inclusive bounds on each zoom factor.
///
/// The default range `[1e-6, 1e6]` keeps both `zoom` and `1 / zoom` well
/// inside `f64` precision for any tree the renderer can lay out.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomLimits {
    /// Smallest allowed zoom (screen pixels per tree unit).
    pub min: f64,
    /// Largest allowed zoom (screen pixels per tree unit).
    pub max: f64,
}

impl ZoomLimits {
    /// Creates a new range, normalizing the order of its bounds.
    pub fn new(a: f64, b: f64) -> Result<Self, ViewError> {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let limits = Self { min, max };
        limits.validate()?;
        Ok(limits)
    }

    /// Checks that both bounds are finite and strictly positive.
    pub fn validate(&self) -> Result<(), ViewError> {
        if self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
        {
            Ok(())
        } else {
            Err(ViewError::InvalidConfig {
                setting: "zoom_limits",
            })
        }
    }

    /// Returns `true` if `zoom` is finite, strictly positive and in range.
    #[must_use]
    pub fn contains(&self, zoom: f64) -> bool {
        zoom.is_finite() && zoom > 0.0 && zoom >= self.min && zoom <= self.max
    }

    /// Validates a single zoom factor against this range.
    pub fn check(&self, zoom: f64) -> Result<f64, ViewError> {
        if self.contains(zoom) {
            Ok(zoom)
        } else {
            Err(ViewError::ZoomOutOfRange {
                zoom,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 1e-6, max: 1e6 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window_narrows_around_zero() {
        let w = AngleWindow::FULL.scaled_about(0.0, 0.8).unwrap();
        assert!((w.min() + 144.0).abs() < 1e-12);
        assert!((w.max() - 144.0).abs() < 1e-12);
    }

    #[test]
    fn widening_is_clipped_to_full_circle() {
        let w = AngleWindow::new(-100.0, 100.0).unwrap();
        let wide = w.scaled_about(50.0, 2.0).unwrap();
        assert_eq!(wide.min(), -180.0);
        assert_eq!(wide.max(), 150.0);
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(AngleWindow::new(10.0, -10.0).is_err());
        assert!(AngleWindow::new(0.0, 0.0).is_err());
        assert!(AngleWindow::new(-200.0, 0.0).is_err());
        assert!(AngleWindow::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn zoom_limits_normalize_and_check() {
        let limits = ZoomLimits::new(100.0, 0.01).unwrap();
        assert_eq!(limits.min, 0.01);
        assert_eq!(limits.max, 100.0);
        assert!(limits.contains(1.0));
        assert!(!limits.contains(1000.0));
        assert!(!limits.contains(f64::INFINITY));
        assert!(limits.check(0.0).is_err());
        assert!(ZoomLimits::new(0.0, 1.0).is_err());
    }
}
