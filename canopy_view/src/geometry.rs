// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between screen pixels and tree-space coordinates.
//!
//! Everything here is a pure function of its arguments.

use kurbo::{Point, Vec2};

use crate::projection::Projection;
use crate::viewport::ViewportState;

/// A tree-space position in polar form.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolarPoint {
    /// Distance from the tree-space origin.
    pub radius: f64,
    /// Angle from the positive x axis, in degrees, in `(-180, 180]`.
    pub angle: f64,
}

/// A tree-space coordinate as reported for the active projection.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeCoord {
    /// Rectangular layouts report plain `(x, y)`.
    Cartesian(Point),
    /// Circular layouts report `(radius, angle)`.
    Polar(PolarPoint),
}

impl TreeCoord {
    /// The two components in reporting order: `(x, y)` or `(radius, angle)`.
    #[must_use]
    pub fn components(self) -> (f64, f64) {
        match self {
            Self::Cartesian(p) => (p.x, p.y),
            Self::Polar(p) => (p.radius, p.angle),
        }
    }
}

/// Maps a screen point to the Cartesian tree-space point under it.
///
/// This is the same affine map in both projections:
/// `top_left + point / zoom`, per axis.
#[must_use]
pub fn screen_to_tree_point(point: Point, top_left: Point, zoom: Vec2) -> Point {
    Point::new(top_left.x + point.x / zoom.x, top_left.y + point.y / zoom.y)
}

/// Inverse of [`screen_to_tree_point`].
#[must_use]
pub fn tree_to_screen_point(point: Point, top_left: Point, zoom: Vec2) -> Point {
    Point::new((point.x - top_left.x) * zoom.x, (point.y - top_left.y) * zoom.y)
}

/// Converts a Cartesian tree-space point to polar form (angle in degrees).
#[must_use]
pub fn to_polar(point: Point) -> PolarPoint {
    let v = point.to_vec2();
    PolarPoint {
        radius: v.hypot(),
        angle: v.atan2().to_degrees(),
    }
}

/// Converts a polar position (angle in radians) to a Cartesian tree-space point.
///
/// Radians match the units of the sector boxes emitted by the renderer.
#[must_use]
pub fn from_polar(radius: f64, angle_rad: f64) -> Point {
    (Vec2::from_angle(angle_rad) * radius).to_point()
}

/// Returns the tree-space coordinate under `point` for the given viewport.
///
/// Rectangular viewports report `(x, y)`; circular viewports convert the same
/// Cartesian point into `(radius, angle)`.
#[must_use]
pub fn screen_to_tree(point: Point, viewport: &ViewportState) -> TreeCoord {
    let p = screen_to_tree_point(point, viewport.top_left(), viewport.zoom());
    match viewport.projection() {
        Projection::Rectangular => TreeCoord::Cartesian(p),
        Projection::Circular => TreeCoord::Polar(to_polar(p)),
    }
}

/// Returns the polar angle (degrees) of the tree-space point under `point`.
///
/// Meaningful for any projection; used by angular zoom in circular mode.
#[must_use]
pub fn screen_angle(point: Point, viewport: &ViewportState) -> f64 {
    to_polar(screen_to_tree_point(point, viewport.top_left(), viewport.zoom())).angle
}
