// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_interact --heading-base-level=0

//! Canopy Interact: the pan, zoom and drag engine of a tree viewer.
//!
//! [`ViewEngine`] owns a [`canopy_view::ViewportState`] and keeps it in step
//! with user gestures:
//!
//! - **Zoom**: [`ViewEngine::zoom_around`] keeps the tree point under the
//!   cursor fixed, per axis. Circular layouts zoom isotropically, or re-slice
//!   their visible angle window when only one [`Axes`] flag is set.
//! - **Drag**: [`ViewEngine::drag_start`], [`ViewEngine::drag_move`] and
//!   [`ViewEngine::drag_stop`] apply a per-[`DragTarget`] scale policy. The
//!   main view pans against the pointer, the minimap indicator with it, and
//!   the side-panel splitter only moves a percentage.
//! - **Minimap**: the indicator marking the main view is recomputed after
//!   every viewport change ([`ViewEngine::indicator`]).
//! - **Preview and debounce**: rendered content gets a cheap local transform
//!   at once ([`ViewEvent::Preview`]) while the authoritative redraw
//!   ([`ViewEvent::Redraw`]) waits for a burst of wheel ticks to settle.
//! - **Staleness**: each [`RedrawRequest`] carries the viewport generation it
//!   was made for; [`ViewEngine::is_current`] tells whether a late response
//!   still matches the view.
//!
//! The engine is single-threaded and host-driven. It never reads a clock,
//! spawns tasks, or calls back; the host passes its monotonic time in, polls
//! the engine, and drains queued [`ViewEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use canopy_interact::{DragTarget, EngineConfig, ViewEngine, ViewEvent};
//! use canopy_view::Projection;
//!
//! let mut engine = ViewEngine::new(
//!     EngineConfig::default(),
//!     Size::new(800.0, 600.0),
//!     Size::new(100.0, 50.0),
//!     Projection::Rectangular,
//! )
//! .unwrap();
//! engine.drain_events().for_each(drop);
//!
//! let start = engine.state().top_left();
//! engine.drag_start(Point::new(100.0, 100.0), DragTarget::MainView);
//! engine.drag_move(Point::new(148.0, 100.0), Vec2::new(48.0, 0.0));
//! engine.drag_stop();
//!
//! // The tree followed the pointer, so the view moved left.
//! assert!(engine.state().top_left().x < start.x);
//! // One authoritative redraw, issued when the drag ended.
//! let redraws = engine
//!     .drain_events()
//!     .filter(|e| matches!(e, ViewEvent::Redraw(_)))
//!     .count();
//! assert_eq!(redraws, 1);
//! ```

mod config;
mod drag;
mod engine;
mod event;
mod refresh;
mod zoom;

pub use config::EngineConfig;
pub use drag::{DragSession, DragTarget};
pub use engine::{PanDirection, ViewEngine};
pub use event::{RedrawRequest, ViewEvent};
pub use zoom::{Axes, ZoomPreview, angular_zoom, zoom_about};
