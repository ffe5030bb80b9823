// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shareable view encoding: the `x`, `y`, `w`, `h` query-string parameters.
//!
//! `x`/`y` carry the top-left tree coordinate and `w`/`h` the visible tree
//! extent, so a link reproduces the same region on any screen size.

use core::fmt;

use kurbo::{Point, Size, Vec2};

use crate::error::ViewError;
use crate::fit::fit_tree;
use crate::projection::Projection;
use crate::viewport::ViewportState;

/// A (possibly partial) view decoded from, or encoded to, a query string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewQuery {
    /// Top-left tree x.
    pub x: Option<f64>,
    /// Top-left tree y.
    pub y: Option<f64>,
    /// Visible tree width.
    pub w: Option<f64>,
    /// Visible tree height.
    pub h: Option<f64>,
}

impl ViewQuery {
    /// Encodes the visible region of `viewport`.
    #[must_use]
    pub fn from_viewport(viewport: &ViewportState) -> Self {
        let tl = viewport.top_left();
        let extent = viewport.tree_extent();
        Self {
            x: Some(tl.x),
            y: Some(tl.y),
            w: Some(extent.width),
            h: Some(extent.height),
        }
    }

    /// Parses `x`, `y`, `w` and `h` out of a query string.
    ///
    /// A leading `?` is accepted. Other parameters (tree name, drawer, and so
    /// on) are ignored. A later occurrence of a key overrides an earlier one.
    pub fn parse(query: &str) -> Result<Self, ViewError> {
        let mut out = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let (slot, key) = match key {
                "x" => (&mut out.x, "x"),
                "y" => (&mut out.y, "y"),
                "w" => (&mut out.w, "w"),
                "h" => (&mut out.h, "h"),
                _ => continue,
            };
            let parsed = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(ViewError::InvalidQueryValue { key })?;
            *slot = Some(parsed);
        }
        if out.w.is_some_and(|w| w <= 0.0) {
            return Err(ViewError::InvalidQueryValue { key: "w" });
        }
        if out.h.is_some_and(|h| h <= 0.0) {
            return Err(ViewError::InvalidQueryValue { key: "h" });
        }
        Ok(out)
    }

    /// Returns `true` if no view parameter is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.w.is_none() && self.h.is_none()
    }

    /// Builds a viewport showing this view on `screen`.
    ///
    /// `w`/`h` become `zoom = screen / extent`. In circular mode a single
    /// given zoom is used for both axes and two given zooms collapse to the
    /// smaller one. Anything still missing comes from fitting the whole tree.
    pub fn resolve(
        &self,
        screen: Size,
        projection: Projection,
        radial_offset: f64,
        tree_size: Size,
    ) -> Result<ViewportState, ViewError> {
        let mut vp = ViewportState::new(screen);
        vp.set_screen_size(screen)?;
        vp.set_projection(projection);
        vp.set_radial_offset(radial_offset)?;

        let mut zx = self.w.map(|w| screen.width / w);
        let mut zy = self.h.map(|h| screen.height / h);
        if projection.is_circular() {
            match (zx, zy) {
                (Some(a), Some(b)) => {
                    let z = a.min(b);
                    zx = Some(z);
                    zy = Some(z);
                }
                (Some(a), None) => zy = Some(a),
                (None, Some(b)) => zx = Some(b),
                (None, None) => {}
            }
        }

        let needs_fit = zx.is_none() || zy.is_none() || self.x.is_none() || self.y.is_none();
        let fitted = if needs_fit {
            Some(fit_tree(&vp, tree_size)?)
        } else {
            None
        };
        let zoom = Vec2::new(
            zx.or(fitted.map(|f| f.zoom.x)).unwrap_or(1.0),
            zy.or(fitted.map(|f| f.zoom.y)).unwrap_or(1.0),
        );
        vp.set_zoom(zoom)?;

        // Missing coordinates are positioned for the zoom actually in use.
        let zoom = vp.zoom();
        let x = self.x.unwrap_or_else(|| match projection {
            Projection::Rectangular => -0.10 * screen.width / zoom.x,
            Projection::Circular => -screen.width / zoom.x / 2.0,
        });
        let y = self.y.unwrap_or_else(|| match projection {
            Projection::Rectangular => -0.05 * screen.height / zoom.y,
            Projection::Circular => -screen.height / zoom.y / 2.0,
        });
        vp.set_top_left(Point::new(x, y))?;
        Ok(vp)
    }
}

impl fmt::Display for ViewQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for (key, value) in [("x", self.x), ("y", self.y), ("w", self.w), ("h", self.h)] {
            if let Some(value) = value {
                write!(f, "{sep}{key}={value}")?;
                sep = "&";
            }
        }
        Ok(())
    }
}
