// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::error::ViewError;
use crate::geometry::{self, TreeCoord};
use crate::projection::{AngleWindow, Projection, ZoomLimits};

/// Where the user currently is within tree space.
///
/// `ViewportState` records the tree-space point at the screen's top-left
/// corner, an independent zoom factor per axis (screen pixels per tree unit),
/// the active [`Projection`] and, for circular layouts, the visible
/// [`AngleWindow`] and the radial offset skipped before drawing.
///
/// All setters validate their input and leave the state untouched on error,
/// so the following always hold:
/// - both zoom factors are finite, strictly positive and inside
///   [`ViewportState::zoom_limits`];
/// - in [`Projection::Circular`] mode the two zoom factors are equal;
/// - the screen size is finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    top_left: Point,
    zoom: Vec2,
    projection: Projection,
    angle_window: AngleWindow,
    radial_offset: f64,
    screen: Size,
    zoom_limits: ZoomLimits,
}

impl ViewportState {
    /// Creates a rectangular viewport with unit zoom and the tree origin at
    /// the screen's top-left corner.
    ///
    /// A degenerate `screen` is replaced by a 1×1 screen; use
    /// [`ViewportState::set_screen_size`] to check sizes explicitly.
    #[must_use]
    pub fn new(screen: Size) -> Self {
        let screen = if is_valid_size(screen) {
            screen
        } else {
            Size::new(1.0, 1.0)
        };
        Self {
            top_left: Point::ZERO,
            zoom: Vec2::new(1.0, 1.0),
            projection: Projection::Rectangular,
            angle_window: AngleWindow::FULL,
            radial_offset: 0.0,
            screen,
            zoom_limits: ZoomLimits::default(),
        }
    }

    /// Builds a viewport from explicit values, for example ones decoded from
    /// a shared URL. The values are taken as-is apart from validation.
    pub fn from_parts(
        screen: Size,
        projection: Projection,
        top_left: Point,
        zoom: Vec2,
    ) -> Result<Self, ViewError> {
        let mut vp = Self::new(Size::new(1.0, 1.0));
        vp.set_screen_size(screen)?;
        vp.projection = projection;
        vp.set_view(top_left, zoom)?;
        Ok(vp)
    }

    /// Tree-space point at the screen's top-left corner.
    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    /// Per-axis zoom, in screen pixels per tree unit.
    #[must_use]
    pub fn zoom(&self) -> Vec2 {
        self.zoom
    }

    /// The active projection.
    #[must_use]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Visible angular slice (circular layouts only).
    #[must_use]
    pub fn angle_window(&self) -> AngleWindow {
        self.angle_window
    }

    /// Inner radius skipped before drawing (circular layouts only).
    #[must_use]
    pub fn radial_offset(&self) -> f64 {
        self.radial_offset
    }

    /// Screen size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// Bounds applied to every zoom factor.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.zoom_limits
    }

    /// Moves the viewport so that `top_left` sits at the screen's corner.
    pub fn set_top_left(&mut self, top_left: Point) -> Result<(), ViewError> {
        if !top_left.is_finite() {
            return Err(ViewError::NonFinite);
        }
        self.top_left = top_left;
        Ok(())
    }

    /// Sets both zoom factors.
    ///
    /// In circular mode the smaller factor is used for both axes.
    pub fn set_zoom(&mut self, zoom: Vec2) -> Result<(), ViewError> {
        self.zoom = self.checked_zoom(zoom)?;
        Ok(())
    }

    /// Sets position and zoom together; on error neither changes.
    pub fn set_view(&mut self, top_left: Point, zoom: Vec2) -> Result<(), ViewError> {
        if !top_left.is_finite() {
            return Err(ViewError::NonFinite);
        }
        let zoom = self.checked_zoom(zoom)?;
        self.top_left = top_left;
        self.zoom = zoom;
        Ok(())
    }

    /// Translates the viewport by `delta` tree units.
    pub fn pan_by(&mut self, delta: Vec2) -> Result<(), ViewError> {
        self.set_top_left(self.top_left + delta)
    }

    /// Switches projection.
    ///
    /// Switching to circular collapses the zoom to its smaller factor. The
    /// caller is expected to refit the view afterwards (see [`crate::fit_tree`]).
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        if projection.is_circular() {
            let z = self.zoom.x.min(self.zoom.y);
            self.zoom = Vec2::new(z, z);
        }
    }

    /// Sets the visible angular slice.
    pub fn set_angle_window(&mut self, window: AngleWindow) {
        self.angle_window = window;
    }

    /// Sets the inner radius skipped before drawing.
    pub fn set_radial_offset(&mut self, radial_offset: f64) -> Result<(), ViewError> {
        if !radial_offset.is_finite() {
            return Err(ViewError::NonFinite);
        }
        if radial_offset < 0.0 {
            return Err(ViewError::InvalidConfig {
                setting: "radial_offset",
            });
        }
        self.radial_offset = radial_offset;
        Ok(())
    }

    /// Sets the screen size; zoom and position are kept.
    pub fn set_screen_size(&mut self, screen: Size) -> Result<(), ViewError> {
        if !is_valid_size(screen) {
            return Err(ViewError::DegenerateScreen);
        }
        self.screen = screen;
        Ok(())
    }

    /// Replaces the zoom limits, clamping the current zoom into them.
    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) -> Result<(), ViewError> {
        limits.validate()?;
        self.zoom_limits = limits;
        self.zoom = Vec2::new(
            self.zoom.x.clamp(limits.min, limits.max),
            self.zoom.y.clamp(limits.min, limits.max),
        );
        Ok(())
    }

    /// Tree-space coordinate under a screen point (see [`geometry::screen_to_tree`]).
    #[must_use]
    pub fn screen_to_tree(&self, point: Point) -> TreeCoord {
        geometry::screen_to_tree(point, self)
    }

    /// Cartesian tree-space point under a screen point, in either projection.
    #[must_use]
    pub fn screen_to_tree_point(&self, point: Point) -> Point {
        geometry::screen_to_tree_point(point, self.top_left, self.zoom)
    }

    /// Screen position of a Cartesian tree-space point.
    #[must_use]
    pub fn tree_to_screen_point(&self, point: Point) -> Point {
        geometry::tree_to_screen_point(point, self.top_left, self.zoom)
    }

    /// Size of the visible region in tree units (`screen / zoom`).
    #[must_use]
    pub fn tree_extent(&self) -> Size {
        Size::new(self.screen.width / self.zoom.x, self.screen.height / self.zoom.y)
    }

    /// The visible tree-space rectangle.
    #[must_use]
    pub fn visible_tree_rect(&self) -> Rect {
        Rect::from_origin_size(self.top_left, self.tree_extent())
    }

    /// Tree-space point at the center of the screen.
    #[must_use]
    pub fn center(&self) -> Point {
        self.visible_tree_rect().center()
    }

    fn checked_zoom(&self, zoom: Vec2) -> Result<Vec2, ViewError> {
        let zoom = if self.projection.is_circular() {
            let z = zoom.x.min(zoom.y);
            Vec2::new(z, z)
        } else {
            zoom
        };
        self.zoom_limits.check(zoom.x)?;
        self.zoom_limits.check(zoom.y)?;
        Ok(zoom)
    }
}

pub(crate) fn is_valid_size(size: Size) -> bool {
    size.is_finite() && size.width > 0.0 && size.height > 0.0
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::ViewportState;
    use crate::{Projection, ViewError, ZoomLimits};

    #[test]
    fn rejected_zoom_leaves_state_untouched() {
        let mut vp = ViewportState::new(Size::new(800.0, 600.0));
        let before = vp;
        assert!(vp.set_zoom(Vec2::new(0.0, 1.0)).is_err());
        assert!(vp.set_zoom(Vec2::new(1.0, f64::INFINITY)).is_err());
        assert!(vp.set_view(Point::new(f64::NAN, 0.0), Vec2::new(2.0, 2.0)).is_err());
        assert!(matches!(
            vp.set_zoom(Vec2::new(1e7, 1.0)),
            Err(ViewError::ZoomOutOfRange { .. })
        ));
        assert_eq!(vp, before);
    }

    #[test]
    fn circular_zoom_is_isotropic() {
        let mut vp = ViewportState::new(Size::new(800.0, 600.0));
        vp.set_zoom(Vec2::new(3.0, 2.0)).unwrap();
        vp.set_projection(Projection::Circular);
        assert_eq!(vp.zoom(), Vec2::new(2.0, 2.0));

        vp.set_zoom(Vec2::new(5.0, 4.0)).unwrap();
        assert_eq!(vp.zoom(), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn visible_rect_matches_screen_over_zoom() {
        let vp = ViewportState::from_parts(
            Size::new(800.0, 600.0),
            Projection::Rectangular,
            Point::new(10.0, 20.0),
            Vec2::new(2.0, 4.0),
        )
        .unwrap();
        let r = vp.visible_tree_rect();
        assert_eq!(r.origin(), Point::new(10.0, 20.0));
        assert_eq!(r.size(), Size::new(400.0, 150.0));
        assert_eq!(vp.center(), Point::new(210.0, 95.0));
    }

    #[test]
    fn zoom_limits_clamp_current_zoom() {
        let mut vp = ViewportState::new(Size::new(100.0, 100.0));
        vp.set_zoom(Vec2::new(50.0, 0.5)).unwrap();
        vp.set_zoom_limits(ZoomLimits::new(1.0, 10.0).unwrap()).unwrap();
        assert_eq!(vp.zoom(), Vec2::new(10.0, 1.0));
    }

    #[test]
    fn degenerate_screen_is_rejected() {
        let mut vp = ViewportState::new(Size::new(100.0, 100.0));
        assert_eq!(
            vp.set_screen_size(Size::new(0.0, 10.0)),
            Err(ViewError::DegenerateScreen)
        );
        assert_eq!(vp.screen_size(), Size::new(100.0, 100.0));
    }

    #[test]
    fn negative_radial_offset_is_out_of_range() {
        let mut vp = ViewportState::new(Size::new(100.0, 100.0));
        assert_eq!(
            vp.set_radial_offset(-1.0),
            Err(ViewError::InvalidConfig {
                setting: "radial_offset"
            })
        );
        assert_eq!(vp.set_radial_offset(f64::NAN), Err(ViewError::NonFinite));
        assert_eq!(vp.radial_offset(), 0.0);
        vp.set_radial_offset(12.5).unwrap();
        assert_eq!(vp.radial_offset(), 12.5);
    }
}
