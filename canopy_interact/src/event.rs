// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_view::{AngleWindow, Projection, ViewportState};
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Parameters of an authoritative redraw, in tree-space units.
///
/// `generation` identifies the viewport the request was made for; pass the
/// request back to [`crate::ViewEngine::is_current`] when the response
/// arrives to find out whether the view has moved on since.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RedrawRequest {
    /// Viewport generation this request was issued for.
    pub generation: u64,
    /// Active projection.
    pub projection: Projection,
    /// Tree-space point at the screen's top-left corner.
    pub top_left: Point,
    /// Per-axis zoom (screen pixels per tree unit).
    pub zoom: Vec2,
    /// Visible angular slice, circular layouts only.
    pub angle_window: Option<AngleWindow>,
    /// Inner radius skipped before drawing, circular layouts only.
    pub radial_offset: Option<f64>,
    /// Screen size in pixels.
    pub screen: Size,
}

impl RedrawRequest {
    pub(crate) fn new(generation: u64, state: &ViewportState) -> Self {
        let circular = state.projection().is_circular();
        Self {
            generation,
            projection: state.projection(),
            top_left: state.top_left(),
            zoom: state.zoom(),
            angle_window: circular.then(|| state.angle_window()),
            radial_offset: circular.then(|| state.radial_offset()),
            screen: state.screen_size(),
        }
    }

    /// Tree-space rectangle covered by this request.
    #[must_use]
    pub fn visible_tree_rect(&self) -> Rect {
        Rect::from_origin_size(
            self.top_left,
            Size::new(
                self.screen.width / self.zoom.x,
                self.screen.height / self.zoom.y,
            ),
        )
    }
}

/// Notifications queued by [`crate::ViewEngine`] for the host.
///
/// Drain them with [`crate::ViewEngine::drain_events`] after feeding input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    /// The viewport changed; coordinate readouts and the minimap indicator
    /// should be refreshed from the engine.
    StateChanged,
    /// Replace the local transform on already-rendered content with this one.
    ///
    /// It approximates the new viewport until the authoritative redraw lands.
    Preview(Affine),
    /// Drop any local transform on rendered content.
    ClearPreview,
    /// Fetch and draw the primitives for this viewport.
    Redraw(RedrawRequest),
    /// The minimap's own content is out of date and must be fetched again.
    MinimapStale,
    /// The side-panel split moved to this percentage.
    SplitChanged(f64),
}
