// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_view --heading-base-level=0

//! Canopy View: viewport primitives for large hierarchical tree viewers.
//!
//! A tree server lays nodes out in *tree space* and renders any requested
//! rectangular window of it. This crate models which window is on screen and
//! the math around it:
//! - [`ViewportState`]: top-left tree coordinate, per-axis zoom, projection,
//!   and (for circular layouts) the visible angle window and radial offset.
//! - Coordinate conversion between screen pixels and tree space under the
//!   rectangular and circular projections ([`screen_to_tree`]).
//! - Box fitting: framing a node's rectangle or annular sector with a margin
//!   ([`fit_box`], [`zoom_into_box`]) and fitting the whole tree ([`fit_tree`]).
//! - Minimap math: the minimap's scale ([`minimap_zoom`]) and the clipped,
//!   minimum-sized indicator marking the main view ([`indicator_geometry`]).
//! - Shareable view links via [`ViewQuery`].
//!
//! It does **not** own timers, gestures, or a renderer. The
//! `canopy_interact` crate builds the pan/zoom/drag engine on top of these
//! primitives.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use canopy_view::{NodeBox, TreeCoord, ViewportState, zoom_into_box};
//!
//! let mut view = ViewportState::new(Size::new(800.0, 600.0));
//!
//! // Frame a node with a 10% margin on every side.
//! zoom_into_box(&mut view, &NodeBox::new(10.0, 20.0, 100.0, 50.0), 0.1).unwrap();
//! assert_eq!(view.top_left(), Point::new(0.0, 15.0));
//!
//! // The screen center now shows the middle of the node.
//! let TreeCoord::Cartesian(p) = view.screen_to_tree(Point::new(400.0, 300.0)) else {
//!     unreachable!()
//! };
//! assert!((p.x - 60.0).abs() < 1e-9 && (p.y - 45.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is anisotropic in rectangular layouts and isotropic in circular
//!   ones; [`ViewportState`] enforces the latter itself.
//! - Every setter validates first and mutates second, so a rejected call
//!   never leaves a half-updated viewport.
//! - Angles of the visible window are in degrees; sector boxes use radians,
//!   matching what the renderer emits.

mod error;
mod fit;
mod geometry;
mod minimap;
mod projection;
mod query;
mod viewport;

pub use error::ViewError;
pub use fit::{DEFAULT_BORDER, Framing, NodeBox, fit_box, fit_tree, reset_to_tree, zoom_into_box};
pub use geometry::{
    PolarPoint, TreeCoord, from_polar, screen_angle, screen_to_tree, screen_to_tree_point,
    to_polar, tree_to_screen_point,
};
pub use minimap::{
    DEFAULT_MIN_INDICATOR, IndicatorGeometry, indicator_geometry, minimap_origin, minimap_zoom,
    top_left_for_minimap_point,
};
pub use projection::{AngleWindow, Projection, ZoomLimits};
pub use query::ViewQuery;
pub use viewport::ViewportState;
