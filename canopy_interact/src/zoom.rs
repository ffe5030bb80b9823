// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored zoom math and the local preview of pending zooms.

use canopy_view::{AngleWindow, ViewportState, screen_angle};
use kurbo::{Affine, Point, Vec2};

bitflags::bitflags! {
    /// Axes a zoom gesture applies to.
    ///
    /// Wheel handlers conventionally exclude X while Ctrl is held and Y while
    /// Alt is held (see [`Axes::from_modifiers`]). In circular layouts, a
    /// gesture with exactly one axis excluded becomes an angular zoom.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        /// Horizontal axis.
        const X = 0b01;
        /// Vertical axis.
        const Y = 0b10;
    }
}

impl Axes {
    /// Both axes.
    pub const BOTH: Self = Self::all();

    /// Axes selected by the wheel modifier convention.
    #[must_use]
    pub fn from_modifiers(ctrl: bool, alt: bool) -> Self {
        let mut axes = Self::BOTH;
        axes.set(Self::X, !ctrl);
        axes.set(Self::Y, !alt);
        axes
    }
}

/// Position and zoom after zooming by `factor` about the screen point `anchor`.
///
/// Each requested axis is scaled independently and `top_left` moves by the
/// unique amount that keeps the tree point under `anchor` fixed on screen.
/// Returns `None`, without touching anything, if any new zoom factor would
/// leave the viewport's limits.
#[must_use]
pub fn zoom_about(
    state: &ViewportState,
    anchor: Point,
    factor: f64,
    axes: Axes,
) -> Option<(Point, Vec2)> {
    let limits = state.zoom_limits();
    let mut top_left = state.top_left();
    let mut zoom = state.zoom();
    if axes.contains(Axes::X) {
        let new = factor * zoom.x;
        if !limits.contains(new) {
            return None;
        }
        top_left.x += (1.0 / zoom.x - 1.0 / new) * anchor.x;
        zoom.x = new;
    }
    if axes.contains(Axes::Y) {
        let new = factor * zoom.y;
        if !limits.contains(new) {
            return None;
        }
        top_left.y += (1.0 / zoom.y - 1.0 / new) * anchor.y;
        zoom.y = new;
    }
    top_left.is_finite().then_some((top_left, zoom))
}

/// Angle window after an angular zoom by `factor` about the screen point `anchor`.
///
/// Returns `None` if the window would be empty or would not change.
#[must_use]
pub fn angular_zoom(state: &ViewportState, anchor: Point, factor: f64) -> Option<AngleWindow> {
    let angle = screen_angle(anchor, state);
    let current = state.angle_window();
    current
        .scaled_about(angle, factor)
        .filter(|window| *window != current)
}

/// Cumulative zoom applied since the last authoritative redraw.
///
/// Rendered content can be scaled by [`ZoomPreview::transform`] to show the
/// new viewport instantly while the real redraw is debounced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPreview {
    factor: Vec2,
    anchor: Point,
}

impl ZoomPreview {
    /// No pending zoom.
    pub const IDENTITY: Self = Self {
        factor: Vec2::new(1.0, 1.0),
        anchor: Point::ZERO,
    };

    /// The cumulative per-axis factor.
    #[must_use]
    pub fn factor(&self) -> Vec2 {
        self.factor
    }

    /// Screen point of the most recent zoom.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns `true` if no zoom is pending.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.factor == Vec2::new(1.0, 1.0)
    }

    /// Folds one more zoom step into the preview.
    pub fn accumulate(&mut self, factor: f64, axes: Axes, anchor: Point) {
        if axes.contains(Axes::X) {
            self.factor.x *= factor;
        }
        if axes.contains(Axes::Y) {
            self.factor.y *= factor;
        }
        self.anchor = anchor;
    }

    /// Local transform approximating the pending zoom on rendered content.
    ///
    /// Scales by the cumulative factor `q` after translating by
    /// `(1 / q - 1) * anchor`, which leaves `anchor` fixed.
    #[must_use]
    pub fn transform(&self) -> Affine {
        let q = self.factor;
        let a = self.anchor;
        Affine::scale_non_uniform(q.x, q.y)
            * Affine::translate(Vec2::new((1.0 / q.x - 1.0) * a.x, (1.0 / q.y - 1.0) * a.y))
    }
}

impl Default for ZoomPreview {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use canopy_view::{Projection, ViewportState};
    use kurbo::{Point, Size, Vec2};

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn screen() -> ViewportState {
        ViewportState::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn zoom_in_at_center_matches_worked_example() {
        let vp = screen();
        let (tl, zoom) = zoom_about(&vp, Point::new(400.0, 300.0), 1.25, Axes::BOTH).unwrap();
        assert!(approx(zoom.x, 1.25) && approx(zoom.y, 1.25));
        assert!(approx(tl.x, 80.0));
        assert!(approx(tl.y, 60.0));
    }

    #[test]
    fn anchor_stays_fixed() {
        let mut vp = screen();
        vp.set_view(Point::new(-13.0, 7.5), Vec2::new(0.3, 42.0)).unwrap();
        let anchor = Point::new(123.0, 456.0);
        let before = vp.screen_to_tree_point(anchor);
        for factor in [1.25, 0.8, 1.25, 1.25] {
            let (tl, zoom) = zoom_about(&vp, anchor, factor, Axes::BOTH).unwrap();
            vp.set_view(tl, zoom).unwrap();
            let after = vp.screen_to_tree_point(anchor);
            assert!((after.x - before.x).abs() < 1e-9);
            assert!((after.y - before.y).abs() < 1e-9);
        }
    }

    #[test]
    fn single_axis_leaves_other_untouched() {
        let vp = screen();
        let (tl, zoom) = zoom_about(&vp, Point::new(100.0, 100.0), 0.8, Axes::Y).unwrap();
        assert_eq!(zoom.x, 1.0);
        assert_eq!(tl.x, 0.0);
        assert!(approx(zoom.y, 0.8));
    }

    #[test]
    fn out_of_range_zoom_is_refused() {
        let mut vp = screen();
        vp.set_zoom(Vec2::new(9e5, 1.0)).unwrap();
        assert_eq!(zoom_about(&vp, Point::ZERO, 1.25, Axes::BOTH), None);
        // Y alone is fine.
        assert!(zoom_about(&vp, Point::ZERO, 1.25, Axes::Y).is_some());
    }

    #[test]
    fn angular_zoom_narrows_full_circle() {
        let mut vp = screen();
        vp.set_projection(Projection::Circular);
        vp.set_top_left(Point::new(-400.0, -300.0)).unwrap();
        // A point right of the center sits at angle 0.
        let w = angular_zoom(&vp, Point::new(700.0, 300.0), 0.8).unwrap();
        assert!(approx(w.min(), -144.0));
        assert!(approx(w.max(), 144.0));
        // Widening the full circle is a no-op.
        assert_eq!(angular_zoom(&vp, Point::new(700.0, 300.0), 1.25), None);
    }

    #[test]
    fn preview_keeps_anchor_fixed() {
        let mut preview = ZoomPreview::IDENTITY;
        assert!(preview.is_identity());
        let anchor = Point::new(400.0, 300.0);
        preview.accumulate(1.25, Axes::BOTH, anchor);
        preview.accumulate(1.25, Axes::X, anchor);
        assert!(approx(preview.factor().x, 1.5625));
        assert!(approx(preview.factor().y, 1.25));
        let moved = preview.transform() * anchor;
        assert!(approx(moved.x, anchor.x) && approx(moved.y, anchor.y));
        let origin = preview.transform() * Point::ZERO;
        assert!(approx(origin.x, 400.0 * (1.0 - 1.5625)));
    }

    #[test]
    fn modifiers_exclude_axes() {
        assert_eq!(Axes::from_modifiers(false, false), Axes::BOTH);
        assert_eq!(Axes::from_modifiers(true, false), Axes::Y);
        assert_eq!(Axes::from_modifiers(false, true), Axes::X);
        assert!(Axes::from_modifiers(true, true).is_empty());
    }
}
