// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framing a node's box, and fitting the whole tree to the screen.

use kurbo::{Point, Rect, Size, Vec2};

use crate::error::ViewError;
use crate::geometry::from_polar;
use crate::projection::{AngleWindow, Projection};
use crate::viewport::{ViewportState, is_valid_size};

/// Default margin around a framed box, as a fraction of its size per side.
pub const DEFAULT_BORDER: f64 = 0.10;

/// A node's bounding region, as emitted by the renderer.
///
/// The four numbers are interpreted according to the viewport's projection,
/// so callers can pass boxes through without knowing which one is active:
/// - rectangular: `(x, y)` is the top-left corner and `(dx, dy)` the size;
/// - circular: `x` is the inner radius, `y` the start angle in radians,
///   `dx` the radial thickness and `dy` the angular span in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeBox {
    /// Left edge, or inner radius.
    pub x: f64,
    /// Top edge, or start angle (radians).
    pub y: f64,
    /// Width, or radial thickness.
    pub dx: f64,
    /// Height, or angular span (radians).
    pub dy: f64,
}

impl NodeBox {
    /// Creates a box from its four raw components.
    #[must_use]
    pub const fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }

    /// Rectangular box from a tree-space rectangle.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Circular box: annular sector from radius `r`, angle `a` (radians).
    #[must_use]
    pub const fn sector(r: f64, a: f64, dr: f64, da: f64) -> Self {
        Self::new(r, a, dr, da)
    }

    /// Interprets the box as a rectangle.
    #[must_use]
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.dx, self.y + self.dy)
    }

    /// Cartesian corners of the box read as an annular sector.
    #[must_use]
    pub fn sector_corners(&self) -> [Point; 4] {
        let (r, a, dr, da) = (self.x, self.y, self.dx, self.dy);
        [
            from_polar(r, a),
            from_polar(r, a + da),
            from_polar(r + dr, a),
            from_polar(r + dr, a + da),
        ]
    }

    /// Axis-aligned bounding rectangle of the sector's four corners.
    #[must_use]
    pub fn sector_bounds(&self) -> Rect {
        let [p0, p1, p2, p3] = self.sector_corners();
        let x0 = p0.x.min(p1.x).min(p2.x).min(p3.x);
        let y0 = p0.y.min(p1.y).min(p2.y).min(p3.y);
        let x1 = p0.x.max(p1.x).max(p2.x).max(p3.x);
        let y1 = p0.y.max(p1.y).max(p2.y).max(p3.y);
        Rect::new(x0, y0, x1, y1)
    }

    /// The region framed by [`fit_box`] for the given projection.
    #[must_use]
    pub fn bounds(&self, projection: Projection) -> Rect {
        match projection {
            Projection::Rectangular => self.as_rect(),
            Projection::Circular => self.sector_bounds(),
        }
    }
}

/// Position and zoom computed by the fitting helpers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    /// Tree-space point to place at the screen's top-left corner.
    pub top_left: Point,
    /// Per-axis zoom.
    pub zoom: Vec2,
}

impl Framing {
    /// Writes this framing into `viewport`; on error the viewport is unchanged.
    pub fn apply(&self, viewport: &mut ViewportState) -> Result<(), ViewError> {
        viewport.set_view(self.top_left, self.zoom)
    }
}

/// Computes the viewport that frames `node` with a `border` margin.
///
/// - Rectangular: each axis is fitted independently, so the box fills the
///   screen minus the margin on all four sides and its aspect ratio is not
///   preserved.
/// - Circular: the Cartesian bounding rectangle of the sector's corners is
///   fitted with a single isotropic zoom chosen by the binding dimension, and
///   the rectangle is centered on both axes.
///
/// The result is validated against the viewport's zoom limits but not
/// applied; see [`zoom_into_box`].
pub fn fit_box(
    viewport: &ViewportState,
    node: &NodeBox,
    border: f64,
) -> Result<Framing, ViewError> {
    if !border.is_finite() || border < 0.0 {
        return Err(ViewError::InvalidConfig { setting: "border" });
    }
    let screen = viewport.screen_size();
    let bounds = node.bounds(viewport.projection());
    let (w, h) = (bounds.width(), bounds.height());
    if !(w.is_finite() && h.is_finite() && bounds.x0.is_finite() && bounds.y0.is_finite())
        || w <= 0.0
        || h <= 0.0
    {
        return Err(ViewError::DegenerateBox);
    }
    let grow = 1.0 + 2.0 * border;

    let framing = match viewport.projection() {
        Projection::Rectangular => Framing {
            top_left: Point::new(bounds.x0 - border * w, bounds.y0 - border * h),
            zoom: Vec2::new(screen.width / (w * grow), screen.height / (h * grow)),
        },
        Projection::Circular => {
            let zx = screen.width / w;
            let zy = screen.height / h;
            let z = zx.min(zy) / grow;
            let center = bounds.center();
            Framing {
                top_left: Point::new(
                    center.x - screen.width / z / 2.0,
                    center.y - screen.height / z / 2.0,
                ),
                zoom: Vec2::new(z, z),
            }
        }
    };

    let limits = viewport.zoom_limits();
    limits.check(framing.zoom.x)?;
    limits.check(framing.zoom.y)?;
    Ok(framing)
}

/// Frames `node` in `viewport` (see [`fit_box`]) and applies the result.
pub fn zoom_into_box(
    viewport: &mut ViewportState,
    node: &NodeBox,
    border: f64,
) -> Result<(), ViewError> {
    fit_box(viewport, node, border)?.apply(viewport)
}

/// Computes the "fit to screen" view for a whole tree of size `tree_size`.
///
/// - Rectangular: the tree takes 60% of the screen width and 90% of its
///   height, with a small leading margin (10% left, 5% top).
/// - Circular: the outermost radius (`radial_offset + tree width`) fits the
///   smaller screen dimension and the tree origin sits at the screen center.
pub fn fit_tree(viewport: &ViewportState, tree_size: Size) -> Result<Framing, ViewError> {
    let screen = viewport.screen_size();
    let framing = match viewport.projection() {
        Projection::Rectangular => {
            if !is_valid_size(tree_size) {
                return Err(ViewError::DegenerateBox);
            }
            let zoom = Vec2::new(
                0.6 * screen.width / tree_size.width,
                0.9 * screen.height / tree_size.height,
            );
            Framing {
                top_left: Point::new(
                    -0.10 * screen.width / zoom.x,
                    -0.05 * screen.height / zoom.y,
                ),
                zoom,
            }
        }
        Projection::Circular => {
            let outer = viewport.radial_offset() + tree_size.width;
            if !outer.is_finite() || outer <= 0.0 {
                return Err(ViewError::DegenerateBox);
            }
            let z = screen.width.min(screen.height) / outer / 2.0;
            Framing {
                top_left: Point::new(-screen.width / z / 2.0, -screen.height / z / 2.0),
                zoom: Vec2::new(z, z),
            }
        }
    };
    let limits = viewport.zoom_limits();
    limits.check(framing.zoom.x)?;
    limits.check(framing.zoom.y)?;
    Ok(framing)
}

/// Resets `viewport` to show the whole tree (see [`fit_tree`]).
///
/// Circular viewports also get their angle window reset to the full circle.
pub fn reset_to_tree(viewport: &mut ViewportState, tree_size: Size) -> Result<(), ViewError> {
    fit_tree(viewport, tree_size)?.apply(viewport)?;
    if viewport.projection().is_circular() {
        viewport.set_angle_window(AngleWindow::FULL);
    }
    Ok(())
}
