// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction engine.
//!
//! [`ViewEngine`] owns the [`ViewportState`] and turns gestures into viewport
//! updates. It never calls out: every consequence of an input is queued as a
//! [`ViewEvent`] and handed to the host by [`ViewEngine::drain_events`].
//!
//! Zoom gestures are previewed locally and debounced: each wheel tick updates
//! the state at once, emits a [`ViewEvent::Preview`] scaling the rendered
//! content, and pushes the authoritative redraw back by the configured delay.
//! The host reports the passage of time through [`ViewEngine::poll`], usually
//! from its frame loop or a one-shot timer set to [`ViewEngine::next_deadline`].

use core::time::Duration;
use std::vec::Drain;

use canopy_timing::Debouncer;
use canopy_view::{
    IndicatorGeometry, NodeBox, Projection, TreeCoord, ViewError, ViewportState, fit_box,
    indicator_geometry, minimap_zoom, reset_to_tree, top_left_for_minimap_point,
};
use kurbo::{Affine, Point, Size, Vec2};

use crate::config::EngineConfig;
use crate::drag::{self, DragSession, DragTarget};
use crate::event::{RedrawRequest, ViewEvent};
use crate::refresh::Refresh;
use crate::zoom::{Axes, ZoomPreview, angular_zoom, zoom_about};

/// Direction of a keyboard pan step. The view moves this way over the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct MinimapView {
    size: Size,
    zoom: Vec2,
    visible: bool,
}

/// Local transform standing in for not-yet-redrawn viewport changes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Preview {
    zoom: ZoomPreview,
    pan: Vec2,
}

impl Preview {
    fn is_identity(&self) -> bool {
        self.zoom.is_identity() && self.pan == Vec2::ZERO
    }

    fn transform(&self) -> Affine {
        Affine::translate(self.pan) * self.zoom.transform()
    }
}

/// Pan/zoom/drag engine for a tree viewer.
///
/// Owns the viewport, the minimap indicator, the debounce timer and the
/// active drag session. Inputs are plain method calls carrying screen points
/// and the host's monotonic time; outputs are [`ViewEvent`]s.
///
/// ```rust
/// use core::time::Duration;
/// use kurbo::{Point, Size};
/// use canopy_interact::{Axes, EngineConfig, ViewEngine, ViewEvent};
/// use canopy_view::Projection;
///
/// let mut engine = ViewEngine::new(
///     EngineConfig::default(),
///     Size::new(800.0, 600.0),
///     Size::new(100.0, 50.0),
///     Projection::Rectangular,
/// )
/// .unwrap();
/// engine.drain_events().for_each(drop);
///
/// // A burst of wheel ticks only previews...
/// let t0 = Duration::ZERO;
/// for _ in 0..3 {
///     engine.zoom_around(Point::new(400.0, 300.0), true, Axes::BOTH, t0);
/// }
/// assert!(!engine.drain_events().any(|e| matches!(e, ViewEvent::Redraw(_))));
///
/// // ...and one redraw follows once the burst has settled.
/// engine.poll(t0 + Duration::from_millis(200));
/// assert!(engine.drain_events().any(|e| matches!(e, ViewEvent::Redraw(_))));
/// ```
#[derive(Debug)]
pub struct ViewEngine {
    config: EngineConfig,
    state: ViewportState,
    tree_size: Size,
    minimap: Option<MinimapView>,
    indicator: Option<IndicatorGeometry>,
    preview: Preview,
    timer: Debouncer<Refresh>,
    drag: Option<DragSession>,
    split: f64,
    generation: u64,
    pointer: Option<Point>,
    events: Vec<ViewEvent>,
}

impl ViewEngine {
    /// Creates an engine showing the whole tree (see [`canopy_view::fit_tree`]).
    ///
    /// Queues an initial [`ViewEvent::Redraw`].
    pub fn new(
        config: EngineConfig,
        screen: Size,
        tree_size: Size,
        projection: Projection,
    ) -> Result<Self, ViewError> {
        config.validate()?;
        let mut state = ViewportState::new(Size::new(1.0, 1.0));
        state.set_screen_size(screen)?;
        state.set_zoom_limits(config.zoom_limits)?;
        state.set_projection(projection);
        reset_to_tree(&mut state, tree_size)?;
        let mut engine = Self::with_state(config, state, tree_size);
        engine.issue_redraw(Refresh::TREE);
        Ok(engine)
    }

    /// Creates an engine resuming an existing viewport, for example one
    /// restored from a shared link (see [`canopy_view::ViewQuery`]).
    ///
    /// The viewport is adopted as-is; it must satisfy the configured zoom
    /// limits. Queues an initial [`ViewEvent::Redraw`].
    pub fn from_view(
        config: EngineConfig,
        state: ViewportState,
        tree_size: Size,
    ) -> Result<Self, ViewError> {
        config.validate()?;
        let zoom = state.zoom();
        config.zoom_limits.check(zoom.x)?;
        config.zoom_limits.check(zoom.y)?;
        let mut state = state;
        state.set_zoom_limits(config.zoom_limits)?;
        let mut engine = Self::with_state(config, state, tree_size);
        engine.issue_redraw(Refresh::TREE);
        Ok(engine)
    }

    fn with_state(config: EngineConfig, state: ViewportState, tree_size: Size) -> Self {
        Self {
            config,
            state,
            tree_size,
            minimap: None,
            indicator: None,
            preview: Preview::default(),
            timer: Debouncer::new(config.debounce_delay),
            drag: None,
            split: config.initial_split,
            generation: 0,
            pointer: None,
            events: Vec::new(),
        }
    }

    /// The current viewport.
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Total size of the tree being shown.
    #[must_use]
    pub fn tree_size(&self) -> Size {
        self.tree_size
    }

    /// Side-panel split, in percent of the screen width.
    #[must_use]
    pub fn split(&self) -> f64 {
        self.split
    }

    /// Where the minimap indicator is drawn, if the minimap is shown.
    #[must_use]
    pub fn indicator(&self) -> Option<IndicatorGeometry> {
        self.indicator
    }

    /// Scale of the minimap, once its size is known.
    #[must_use]
    pub fn minimap_zoom(&self) -> Option<Vec2> {
        self.minimap.map(|m| m.zoom)
    }

    /// Whether the minimap is shown.
    #[must_use]
    pub fn minimap_visible(&self) -> bool {
        self.minimap.is_some_and(|m| m.visible)
    }

    /// The active drag gesture, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Local transform currently applied to rendered content.
    #[must_use]
    pub fn preview_transform(&self) -> Affine {
        self.preview.transform()
    }

    /// Cumulative zoom factor not yet covered by an authoritative redraw.
    #[must_use]
    pub fn pending_factor(&self) -> Vec2 {
        self.preview.zoom.factor()
    }

    /// When the pending redraw is due, if one is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// Whether the pending redraw also has to fetch the minimap again.
    #[must_use]
    pub fn pending_minimap_refresh(&self) -> bool {
        self.timer.pending_payload().is_some_and(|r| r.minimap)
    }

    /// Counter bumped by every viewport change.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tree coordinate under the last reported pointer position.
    #[must_use]
    pub fn pointer_position(&self) -> Option<TreeCoord> {
        self.pointer.map(|p| self.state.screen_to_tree(p))
    }

    /// Records the pointer position and returns the tree coordinate under it.
    pub fn pointer_moved(&mut self, point: Point) -> TreeCoord {
        self.pointer = Some(point);
        self.state.screen_to_tree(point)
    }

    /// Zooms one step in or out about `point`, restricted to `axes`.
    ///
    /// In circular layouts a two-axis gesture zooms isotropically and a
    /// one-axis gesture re-slices the visible angle window instead. Returns
    /// `false`, changing nothing, if the gesture has no effect or would take
    /// the zoom outside its limits.
    pub fn zoom_around(&mut self, point: Point, zoom_in: bool, axes: Axes, now: Duration) -> bool {
        let factor = self.config.zoom_factor(zoom_in);
        if axes.is_empty() {
            return false;
        }
        if self.state.projection().is_circular() && axes != Axes::BOTH {
            return self.zoom_angle(point, factor, now);
        }

        let Some((top_left, zoom)) = zoom_about(&self.state, point, factor, axes) else {
            log::debug!(
                "zoom by {factor} at {point:?} rejected: outside {:?}",
                self.state.zoom_limits()
            );
            return false;
        };
        if self.state.set_view(top_left, zoom).is_err() {
            return false;
        }
        log::trace!("zoom by {factor} at {point:?} -> {zoom:?}");
        self.preview.zoom.accumulate(factor, axes, point);
        self.events.push(ViewEvent::Preview(self.preview.transform()));
        self.commit();
        self.schedule(Refresh::TREE, now);
        true
    }

    fn zoom_angle(&mut self, point: Point, factor: f64, now: Duration) -> bool {
        let Some(window) = angular_zoom(&self.state, point, factor) else {
            return false;
        };
        log::trace!("angular zoom by {factor} at {point:?} -> {window:?}");
        self.state.set_angle_window(window);
        self.commit();
        self.schedule(Refresh::TREE_AND_MINIMAP, now);
        true
    }

    /// Zooms one step about the screen center, on both axes.
    pub fn zoom_step(&mut self, zoom_in: bool, now: Duration) -> bool {
        let screen = self.state.screen_size();
        let center = Point::new(screen.width / 2.0, screen.height / 2.0);
        self.zoom_around(center, zoom_in, Axes::BOTH, now)
    }

    /// Starts a drag gesture on `target` at `point`.
    ///
    /// Dragging the view or the indicator flushes any pending debounced
    /// redraw first, so the drag preview starts from identity. Dragging the
    /// indicator needs a minimap (see [`ViewEngine::set_minimap_size`]) and is
    /// ignored otherwise.
    pub fn drag_start(&mut self, point: Point, target: DragTarget) {
        if target == DragTarget::MinimapIndicator && self.minimap.is_none() {
            log::debug!("indicator drag ignored: no minimap");
            return;
        }
        self.drag = None;
        if target != DragTarget::SidePanelSplitter
            && let Some(owed) = self.timer.cancel()
        {
            self.issue_redraw(owed);
        }
        log::trace!("drag start on {target:?} at {point:?}");
        self.drag = Some(DragSession::new(target, point));
    }

    /// Continues the active drag. `movement` is the pointer delta since the
    /// previous event.
    pub fn drag_move(&mut self, point: Point, movement: Vec2) {
        let Some(mut session) = self.drag else {
            return;
        };
        session.record(point, movement);
        let target = session.target();

        if target == DragTarget::SidePanelSplitter {
            self.drag = Some(session);
            let split = drag::split_after(self.split, movement.x, self.state.screen_size().width);
            if split != self.split {
                self.split = split;
                self.events.push(ViewEvent::SplitChanged(split));
            }
            return;
        }

        let minimap_zoom = self.minimap.map_or(Vec2::new(1.0, 1.0), |m| m.zoom);
        if movement != Vec2::ZERO {
            let Some(delta) = drag::pan_delta(target, movement, self.state.zoom(), minimap_zoom)
            else {
                self.drag = Some(session);
                return;
            };
            if self.state.pan_by(delta).is_err() {
                self.drag = Some(session);
                return;
            }
            self.commit();
        }

        if self.config.continuous_drag {
            self.drag = Some(session);
            if movement != Vec2::ZERO {
                self.issue_redraw(Refresh::TREE);
            }
            return;
        }

        self.preview.pan = drag::preview_offset(
            target,
            session.unrendered_offset(),
            self.state.zoom(),
            minimap_zoom,
        );
        self.drag = Some(session);
        self.events.push(ViewEvent::Preview(self.preview.transform()));
    }

    /// Ends the active drag.
    ///
    /// Issues the authoritative redraw if the drag moved the view and was not
    /// already redrawn continuously. A drag with no net movement redraws
    /// nothing.
    pub fn drag_stop(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        log::trace!("drag stop on {:?}", session.target());
        if session.target() != DragTarget::SidePanelSplitter
            && session.moved()
            && !self.config.continuous_drag
        {
            self.issue_redraw(Refresh::TREE);
        }
    }

    /// Fires the debounced redraw if it is due at `now`.
    ///
    /// Returns `true` if a redraw was issued.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.timer.poll(now) {
            Some(refresh) => {
                self.issue_redraw(refresh);
                true
            }
            None => false,
        }
    }

    /// Frames `node` with the configured margin and redraws at once.
    pub fn zoom_into_box(&mut self, node: &NodeBox) -> Result<(), ViewError> {
        self.zoom_into_box_with_border(node, self.config.box_border)
    }

    /// Frames `node` with a margin of `border` and redraws at once.
    pub fn zoom_into_box_with_border(
        &mut self,
        node: &NodeBox,
        border: f64,
    ) -> Result<(), ViewError> {
        let framing = fit_box(&self.state, node, border)?;
        let mut next = self.state;
        framing.apply(&mut next)?;
        log::debug!("framing {node:?} -> {framing:?}");
        self.apply_now(next, Refresh::TREE);
        Ok(())
    }

    /// Shows the whole tree again and redraws at once.
    pub fn reset_view(&mut self) -> Result<(), ViewError> {
        let mut next = self.state;
        reset_to_tree(&mut next, self.tree_size)?;
        log::debug!("view reset to {:?} at {:?}", next.top_left(), next.zoom());
        self.apply_now(next, Refresh::TREE);
        Ok(())
    }

    /// Pans by a screen-space delta, as if the tree were dragged by it.
    pub fn pan_by_screen(&mut self, delta: Vec2) -> Result<(), ViewError> {
        let zoom = self.state.zoom();
        let mut next = self.state;
        next.pan_by(Vec2::new(-delta.x / zoom.x, -delta.y / zoom.y))?;
        self.apply_now(next, Refresh::TREE);
        Ok(())
    }

    /// Moves the view by one keyboard step.
    pub fn pan_step(&mut self, direction: PanDirection) -> Result<(), ViewError> {
        let screen = self.state.screen_size();
        let step = Vec2::new(
            self.config.pan_step * screen.width,
            self.config.pan_step * screen.height,
        );
        let delta = match direction {
            PanDirection::Left => Vec2::new(step.x, 0.0),
            PanDirection::Right => Vec2::new(-step.x, 0.0),
            PanDirection::Up => Vec2::new(0.0, step.y),
            PanDirection::Down => Vec2::new(0.0, -step.y),
        };
        self.pan_by_screen(delta)
    }

    /// Recenters the main view on a point clicked in the minimap.
    ///
    /// Returns `false` if there is no visible minimap.
    pub fn move_minimap_view(&mut self, point: Point) -> bool {
        let (Some(minimap), Some(indicator)) = (self.minimap, self.indicator) else {
            return false;
        };
        let top_left = top_left_for_minimap_point(
            point,
            indicator.size,
            minimap.zoom,
            minimap.size,
            self.state.projection(),
        );
        let mut next = self.state;
        if next.set_top_left(top_left).is_err() {
            return false;
        }
        self.apply_now(next, Refresh::TREE);
        true
    }

    /// Sets the main view's screen size, keeping position and zoom.
    pub fn set_screen_size(&mut self, screen: Size) -> Result<(), ViewError> {
        let mut next = self.state;
        next.set_screen_size(screen)?;
        self.apply_now(next, Refresh::TREE);
        Ok(())
    }

    /// Sets the inner radius skipped before drawing a circular layout.
    pub fn set_radial_offset(&mut self, radial_offset: f64) -> Result<(), ViewError> {
        let mut next = self.state;
        next.set_radial_offset(radial_offset)?;
        let minimap = self.minimap_for(&next, self.tree_size)?;
        self.minimap = minimap;
        self.apply_now(next, Refresh::TREE_AND_MINIMAP);
        Ok(())
    }

    /// Switches projection and shows the whole tree in it.
    pub fn set_projection(&mut self, projection: Projection) -> Result<(), ViewError> {
        let mut next = self.state;
        next.set_projection(projection);
        reset_to_tree(&mut next, self.tree_size)?;
        let minimap = self.minimap_for(&next, self.tree_size)?;
        log::debug!("projection switched to {projection:?}");
        self.minimap = minimap;
        self.apply_now(next, Refresh::TREE_AND_MINIMAP);
        Ok(())
    }

    /// Switches to a tree of a different size and shows the whole of it.
    pub fn set_tree_size(&mut self, tree_size: Size) -> Result<(), ViewError> {
        let mut next = self.state;
        reset_to_tree(&mut next, tree_size)?;
        let minimap = self.minimap_for(&next, tree_size)?;
        log::debug!("tree size changed to {tree_size:?}");
        self.tree_size = tree_size;
        self.minimap = minimap;
        self.apply_now(next, Refresh::TREE_AND_MINIMAP);
        Ok(())
    }

    /// Sets the minimap's size in pixels, showing it if it was not known yet.
    pub fn set_minimap_size(&mut self, size: Size) -> Result<(), ViewError> {
        let zoom = minimap_zoom(
            self.tree_size,
            size,
            self.state.projection(),
            self.state.radial_offset(),
        )?;
        let visible = self.minimap.is_none_or(|m| m.visible);
        self.minimap = Some(MinimapView {
            size,
            zoom,
            visible,
        });
        self.update_indicator();
        self.events.push(ViewEvent::MinimapStale);
        Ok(())
    }

    /// Shows or hides the minimap. Hidden minimaps have no indicator.
    pub fn set_minimap_visible(&mut self, visible: bool) {
        let Some(minimap) = self.minimap.as_mut() else {
            return;
        };
        if minimap.visible == visible {
            return;
        }
        minimap.visible = visible;
        self.update_indicator();
        if visible {
            self.events.push(ViewEvent::MinimapStale);
        }
    }

    /// Changes the delay before a debounced redraw fires.
    ///
    /// A redraw already scheduled keeps its deadline.
    pub fn set_debounce_delay(&mut self, delay: Duration) {
        self.config.debounce_delay = delay;
        self.timer.set_delay(delay);
    }

    /// Switches between redrawing on every drag movement and once per drag.
    pub fn set_continuous_drag(&mut self, continuous: bool) {
        self.config.continuous_drag = continuous;
    }

    /// Parameters for drawing the current viewport.
    #[must_use]
    pub fn redraw_request(&self) -> RedrawRequest {
        RedrawRequest::new(self.generation, &self.state)
    }

    /// Issues an authoritative redraw now, superseding any pending one.
    pub fn request_redraw(&mut self) {
        let owed = self.timer.cancel();
        self.issue_redraw(Refresh::TREE.merge(owed));
    }

    /// Returns `true` if `request` still describes the current viewport.
    #[must_use]
    pub fn is_current(&self, request: &RedrawRequest) -> bool {
        request.generation == self.generation
    }

    /// Reports that the response to `request` arrived.
    ///
    /// Returns whether it is still current. A stale response may still be
    /// drawn for the viewport it was requested for, but must not be taken as
    /// the current view.
    pub fn finish_redraw(&mut self, request: &RedrawRequest) -> bool {
        let current = self.is_current(request);
        if !current {
            log::debug!(
                "redraw for generation {} is stale (now {})",
                request.generation,
                self.generation
            );
        }
        current
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Drain<'_, ViewEvent> {
        self.events.drain(..)
    }

    fn minimap_for(
        &self,
        state: &ViewportState,
        tree_size: Size,
    ) -> Result<Option<MinimapView>, ViewError> {
        let Some(minimap) = self.minimap else {
            return Ok(None);
        };
        let zoom = minimap_zoom(
            tree_size,
            minimap.size,
            state.projection(),
            state.radial_offset(),
        )?;
        Ok(Some(MinimapView { zoom, ..minimap }))
    }

    fn apply_now(&mut self, next: ViewportState, refresh: Refresh) {
        let owed = self.timer.cancel();
        self.state = next;
        self.commit();
        self.issue_redraw(refresh.merge(owed));
    }

    fn schedule(&mut self, refresh: Refresh, now: Duration) {
        let pending = self.timer.cancel();
        let (id, _) = self.timer.schedule(now, refresh.merge(pending));
        log::trace!("redraw {} due at {:?}", id.get(), self.timer.deadline());
    }

    fn commit(&mut self) {
        self.generation += 1;
        self.update_indicator();
        self.events.push(ViewEvent::StateChanged);
    }

    fn update_indicator(&mut self) {
        self.indicator = self.minimap.filter(|m| m.visible).map(|m| {
            indicator_geometry(&self.state, m.zoom, m.size, self.config.min_indicator_size)
        });
    }

    fn issue_redraw(&mut self, refresh: Refresh) {
        if !self.preview.is_identity() {
            self.preview = Preview::default();
            self.events.push(ViewEvent::ClearPreview);
        }
        if let Some(session) = self.drag.as_mut() {
            session.rebase();
        }
        if refresh.minimap {
            self.events.push(ViewEvent::MinimapStale);
        }
        let request = self.redraw_request();
        log::debug!(
            "redraw {} at {:?}, zoom {:?}",
            request.generation,
            request.top_left,
            request.zoom
        );
        self.events.push(ViewEvent::Redraw(request));
    }
}
