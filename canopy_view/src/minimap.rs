// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimap scale and the indicator rectangle marking the main view.
//!
//! The minimap is a fully zoomed-out rendering of the whole tree. All the
//! helpers here work in minimap pixel space, with `(0, 0)` at the minimap's
//! inner top-left corner.

use kurbo::{Point, Rect, Size, Vec2};

use crate::error::ViewError;
use crate::projection::Projection;
use crate::viewport::{ViewportState, is_valid_size};

/// Default minimum indicator size, in minimap pixels.
pub const DEFAULT_MIN_INDICATOR: Size = Size::new(5.0, 5.0);

/// The indicator rectangle drawn over the minimap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorGeometry {
    /// Top-left corner, in minimap pixels.
    pub position: Point,
    /// Displayed size, in minimap pixels.
    pub size: Size,
}

impl IndicatorGeometry {
    /// The indicator as a rectangle in minimap pixels.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// Scale of a minimap showing a tree of `tree_size` in `minimap_size` pixels.
///
/// Rectangular minimaps stretch the tree to fill both axes. Circular minimaps
/// use one isotropic scale so that the outermost radius fits the smaller
/// minimap side.
pub fn minimap_zoom(
    tree_size: Size,
    minimap_size: Size,
    projection: Projection,
    radial_offset: f64,
) -> Result<Vec2, ViewError> {
    if !is_valid_size(minimap_size) {
        return Err(ViewError::DegenerateScreen);
    }
    match projection {
        Projection::Rectangular => {
            if !is_valid_size(tree_size) {
                return Err(ViewError::DegenerateBox);
            }
            Ok(Vec2::new(
                minimap_size.width / tree_size.width,
                minimap_size.height / tree_size.height,
            ))
        }
        Projection::Circular => {
            let outer = radial_offset + tree_size.width;
            if !outer.is_finite() || outer <= 0.0 {
                return Err(ViewError::DegenerateBox);
            }
            let z = minimap_size.width.min(minimap_size.height) / outer / 2.0;
            Ok(Vec2::new(z, z))
        }
    }
}

/// Minimap pixel position of the tree-space origin.
///
/// Circular tree space is centered on the origin, so the origin sits at the
/// minimap's middle; rectangular trees start at the minimap's corner.
#[must_use]
pub fn minimap_origin(minimap_size: Size, projection: Projection) -> Point {
    match projection {
        Projection::Rectangular => Point::ZERO,
        Projection::Circular => Point::new(minimap_size.width / 2.0, minimap_size.height / 2.0),
    }
}

/// Computes where the main-view indicator is drawn on the minimap.
///
/// The true viewport is scaled into minimap pixels and rounded. The displayed
/// position is clipped to the minimap, the size is shrunk by however much the
/// true position falls before the minimap's start, and both dimensions are
/// kept at least `min_size` (capped to the minimap itself) so the indicator
/// stays visible and draggable. The result always lies inside
/// `[0, width] × [0, height]`.
#[must_use]
pub fn indicator_geometry(
    viewport: &ViewportState,
    minimap_zoom: Vec2,
    minimap_size: Size,
    min_size: Size,
) -> IndicatorGeometry {
    let screen = viewport.screen_size();
    let zoom = viewport.zoom();
    let origin = minimap_origin(minimap_size, viewport.projection());

    let (x, w) = clip_axis(
        (minimap_zoom.x * viewport.top_left().x).round() + origin.x,
        (minimap_zoom.x / zoom.x * screen.width).round(),
        minimap_size.width,
        min_size.width,
    );
    let (y, h) = clip_axis(
        (minimap_zoom.y * viewport.top_left().y).round() + origin.y,
        (minimap_zoom.y / zoom.y * screen.height).round(),
        minimap_size.height,
        min_size.height,
    );

    IndicatorGeometry {
        position: Point::new(x, y),
        size: Size::new(w, h),
    }
}

fn clip_axis(start: f64, len: f64, extent: f64, min_len: f64) -> (f64, f64) {
    let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
    let min_len = min_len.clamp(0.0, extent);
    let start = if start.is_nan() { 0.0 } else { start };
    let len = if len.is_nan() { extent } else { len };

    let mut pos = start.clamp(0.0, extent);
    let mut size = len.max(min_len) + start.min(0.0);
    size = size.min(extent - pos).max(min_len);
    pos = pos.min(extent - size).max(0.0);
    (pos, size)
}

/// Top-left of the main view after clicking `point` on the minimap.
///
/// The view is moved so that an indicator of `indicator_size` becomes
/// centered on the clicked point.
#[must_use]
pub fn top_left_for_minimap_point(
    point: Point,
    indicator_size: Size,
    minimap_zoom: Vec2,
    minimap_size: Size,
    projection: Projection,
) -> Point {
    let origin = minimap_origin(minimap_size, projection);
    Point::new(
        (point.x - indicator_size.width / 2.0 - origin.x) / minimap_zoom.x,
        (point.y - indicator_size.height / 2.0 - origin.y) / minimap_zoom.y,
    )
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::*;

    fn viewport(top_left: Point, zoom: Vec2) -> ViewportState {
        ViewportState::from_parts(
            Size::new(800.0, 600.0),
            Projection::Rectangular,
            top_left,
            zoom,
        )
        .unwrap()
    }

    #[test]
    fn indicator_scales_view_into_minimap() {
        let vp = viewport(Point::new(100.0, 50.0), Vec2::new(4.0, 4.0));
        let g = indicator_geometry(
            &vp,
            Vec2::new(0.1, 0.2),
            Size::new(100.0, 200.0),
            DEFAULT_MIN_INDICATOR,
        );
        assert_eq!(g.position, Point::new(10.0, 10.0));
        assert_eq!(g.size, Size::new(20.0, 30.0));
    }

    #[test]
    fn indicator_before_start_is_shrunk() {
        let vp = viewport(Point::new(-100.0, 0.0), Vec2::new(1.0, 1.0));
        let g = indicator_geometry(
            &vp,
            Vec2::new(0.1, 0.1),
            Size::new(100.0, 100.0),
            DEFAULT_MIN_INDICATOR,
        );
        // True span is [-10, 70): displayed as [0, 70).
        assert_eq!(g.position.x, 0.0);
        assert_eq!(g.size.width, 70.0);
    }

    #[test]
    fn tiny_view_keeps_minimum_size() {
        let vp = viewport(Point::new(500.0, 500.0), Vec2::new(1e4, 1e4));
        let g = indicator_geometry(
            &vp,
            Vec2::new(0.1, 0.1),
            Size::new(100.0, 100.0),
            DEFAULT_MIN_INDICATOR,
        );
        assert_eq!(g.size, Size::new(5.0, 5.0));
        assert_eq!(g.position, Point::new(50.0, 50.0));
    }

    #[test]
    fn indicator_past_the_end_stays_inside() {
        let vp = viewport(Point::new(5000.0, 5000.0), Vec2::new(1.0, 1.0));
        let g = indicator_geometry(
            &vp,
            Vec2::new(0.1, 0.1),
            Size::new(100.0, 100.0),
            DEFAULT_MIN_INDICATOR,
        );
        assert_eq!(g.size, Size::new(5.0, 5.0));
        assert_eq!(g.position, Point::new(95.0, 95.0));
    }

    #[test]
    fn containment_holds_over_a_sweep() {
        let minimap = Size::new(80.0, 240.0);
        let mz = Vec2::new(0.08, 0.12);
        for i in -20..20 {
            for j in [1e-3, 0.05, 0.5, 1.0, 7.0, 300.0] {
                let tl = Point::new(f64::from(i) * 97.0, f64::from(-i) * 131.0);
                let vp = viewport(tl, Vec2::new(j, j * 0.5));
                let g = indicator_geometry(&vp, mz, minimap, DEFAULT_MIN_INDICATOR);
                assert!(g.position.x >= 0.0 && g.position.y >= 0.0);
                assert!(g.position.x + g.size.width <= minimap.width);
                assert!(g.position.y + g.size.height <= minimap.height);
                assert!(g.size.width >= 5.0 && g.size.height >= 5.0);
            }
        }
    }

    #[test]
    fn circular_containment_holds_over_a_sweep() {
        let minimap = Size::new(120.0, 90.0);
        let mz = minimap_zoom(
            Size::new(300.0, 40.0),
            minimap,
            Projection::Circular,
            25.0,
        )
        .unwrap();
        for i in -20..20 {
            for z in [1e-3, 0.05, 0.5, 1.0, 7.0, 300.0] {
                let tl = Point::new(f64::from(i) * 37.0, f64::from(-i) * 53.0);
                let mut vp = ViewportState::from_parts(
                    Size::new(800.0, 600.0),
                    Projection::Circular,
                    tl,
                    Vec2::new(z, z),
                )
                .unwrap();
                vp.set_radial_offset(25.0).unwrap();
                let g = indicator_geometry(&vp, mz, minimap, DEFAULT_MIN_INDICATOR);
                assert!(g.position.x >= 0.0 && g.position.y >= 0.0);
                assert!(g.position.x + g.size.width <= minimap.width);
                assert!(g.position.y + g.size.height <= minimap.height);
                assert!(g.size.width >= 5.0 && g.size.height >= 5.0);
            }
        }
    }

    #[test]
    fn circular_indicator_is_centered() {
        let vp = ViewportState::from_parts(
            Size::new(800.0, 800.0),
            Projection::Circular,
            Point::new(-400.0, -400.0),
            Vec2::new(1.0, 1.0),
        )
        .unwrap();
        let mz = minimap_zoom(
            Size::new(400.0, 10.0),
            Size::new(100.0, 100.0),
            Projection::Circular,
            0.0,
        )
        .unwrap();
        assert_eq!(mz, Vec2::new(0.125, 0.125));
        let g = indicator_geometry(&vp, mz, Size::new(100.0, 100.0), DEFAULT_MIN_INDICATOR);
        assert_eq!(g.position, Point::new(0.0, 0.0));
        assert_eq!(g.size, Size::new(100.0, 100.0));
    }

    #[test]
    fn minimap_click_recenters_indicator() {
        let mz = Vec2::new(0.1, 0.1);
        let tl = top_left_for_minimap_point(
            Point::new(50.0, 40.0),
            Size::new(20.0, 10.0),
            mz,
            Size::new(100.0, 100.0),
            Projection::Rectangular,
        );
        assert!((tl.x - 400.0).abs() < 1e-9);
        assert!((tl.y - 350.0).abs() < 1e-9);
    }

    #[test]
    fn rectangular_minimap_zoom_stretches() {
        let mz = minimap_zoom(
            Size::new(200.0, 1000.0),
            Size::new(100.0, 250.0),
            Projection::Rectangular,
            0.0,
        )
        .unwrap();
        assert_eq!(mz, Vec2::new(0.5, 0.25));
        let degenerate = minimap_zoom(
            Size::ZERO,
            Size::new(1.0, 1.0),
            Projection::Rectangular,
            0.0,
        );
        assert!(degenerate.is_err());
    }
}
