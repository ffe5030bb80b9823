// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag sessions and the per-target scale policy.
//!
//! The same pointer movement means different things depending on what was
//! grabbed:
//! - [`DragTarget::MainView`]: the tree follows the pointer, so the viewport
//!   moves the opposite way, scaled by `1 / zoom`.
//! - [`DragTarget::MinimapIndicator`]: the indicator is a miniature proxy of
//!   the main view, so the viewport moves the same way, scaled by
//!   `1 / minimap_zoom`.
//! - [`DragTarget::SidePanelSplitter`]: only the split percentage changes.

use kurbo::{Point, Vec2};

/// What a drag gesture grabbed. Decided once, when the drag starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The rendered tree.
    MainView,
    /// The rectangle marking the main view on the minimap.
    MinimapIndicator,
    /// The divider between the tree and the aligned side panel.
    SidePanelSplitter,
}

/// State of a drag gesture, alive while a pointer button is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    target: DragTarget,
    origin: Point,
    last: Point,
    moved: bool,
    preview_from: Point,
}

impl DragSession {
    pub(crate) fn new(target: DragTarget, origin: Point) -> Self {
        Self {
            target,
            origin,
            last: origin,
            moved: false,
            preview_from: origin,
        }
    }

    /// The grabbed element.
    #[must_use]
    pub fn target(&self) -> DragTarget {
        self.target
    }

    /// Screen point where the drag began.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Latest pointer position seen by the session.
    #[must_use]
    pub fn last(&self) -> Point {
        self.last
    }

    /// Whether any non-zero movement has been applied.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Pointer offset from the drag origin.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last - self.origin
    }

    /// Pointer travel not yet covered by an authoritative redraw.
    pub(crate) fn unrendered_offset(&self) -> Vec2 {
        self.last - self.preview_from
    }

    /// Marks everything up to the latest pointer position as rendered.
    pub(crate) fn rebase(&mut self) {
        self.preview_from = self.last;
    }

    pub(crate) fn record(&mut self, point: Point, movement: Vec2) {
        self.last = point;
        if movement != Vec2::ZERO {
            self.moved = true;
        }
    }
}

/// Tree-space translation of `top_left` for a pointer `movement`.
///
/// Returns `None` for targets that do not move the viewport.
pub(crate) fn pan_delta(
    target: DragTarget,
    movement: Vec2,
    zoom: Vec2,
    minimap_zoom: Vec2,
) -> Option<Vec2> {
    match target {
        DragTarget::MainView => Some(Vec2::new(-movement.x / zoom.x, -movement.y / zoom.y)),
        DragTarget::MinimapIndicator => Some(Vec2::new(
            movement.x / minimap_zoom.x,
            movement.y / minimap_zoom.y,
        )),
        DragTarget::SidePanelSplitter => None,
    }
}

/// Screen translation that approximates the drag on already-rendered content.
pub(crate) fn preview_offset(
    target: DragTarget,
    offset: Vec2,
    zoom: Vec2,
    minimap_zoom: Vec2,
) -> Vec2 {
    match target {
        DragTarget::MinimapIndicator => Vec2::new(
            -offset.x * zoom.x / minimap_zoom.x,
            -offset.y * zoom.y / minimap_zoom.y,
        ),
        DragTarget::MainView | DragTarget::SidePanelSplitter => offset,
    }
}

/// Side-panel split (percent) after a horizontal movement, clipped to `[1, 99]`.
pub(crate) fn split_after(split: f64, movement_x: f64, screen_width: f64) -> f64 {
    (split + 100.0 * movement_x / screen_width).clamp(1.0, 99.0)
}
