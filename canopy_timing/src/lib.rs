// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_timing --heading-base-level=0

//! Canopy Timing: host-agnostic debounce primitives.
//!
//! Interactive viewers receive input in bursts (a mouse wheel can emit dozens
//! of events per second) while the expensive work they trigger should run
//! once, shortly after the burst ends. [`Debouncer`] is a single-slot timer
//! that makes "cancel the pending task and schedule a new one" the only way
//! to schedule, so at most one task can ever be outstanding.
//!
//! The crate never reads a clock and never spawns anything. Hosts feed it a
//! monotonic `now` and poll it from whatever event loop they run.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use canopy_timing::Debouncer;
//!
//! let mut redraw = Debouncer::new(Duration::from_millis(200));
//!
//! // Three wheel ticks in quick succession.
//! redraw.schedule(Duration::from_millis(0), "tick 1");
//! redraw.schedule(Duration::from_millis(40), "tick 2");
//! redraw.schedule(Duration::from_millis(80), "tick 3");
//!
//! // Only the last one fires, 200ms after it was scheduled.
//! assert_eq!(redraw.poll(Duration::from_millis(250)), None);
//! assert_eq!(redraw.poll(Duration::from_millis(280)), Some("tick 3"));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod debounce;

pub use debounce::{Debouncer, TaskId};
