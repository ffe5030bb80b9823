// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

/// Identifies one scheduled task of a [`Debouncer`].
///
/// Ids increase monotonically, so a host can tell whether a task it kept a
/// handle to was superseded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// The raw sequence number.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending<T> {
    id: TaskId,
    deadline: Duration,
    payload: T,
}

/// A single-slot, cancel-and-replace timer.
///
/// Scheduling a task while another one is pending cancels the old task, so
/// at most one task exists at any time and bursts of events collapse into a
/// single firing after the last one (last-event-wins, never queued).
///
/// The debouncer does not read any clock. Hosts pass a monotonically
/// increasing `now` (time since some fixed origin) to [`Debouncer::schedule`]
/// and [`Debouncer::poll`], and call `poll` from their event loop, ideally at
/// [`Debouncer::deadline`].
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
    next_id: u64,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer firing `delay` after the last schedule.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_id: 0,
        }
    }

    /// The delay between the last schedule and the firing.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay used by future schedules.
    ///
    /// An already pending task keeps its deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedules `payload` to fire at `now + delay`.
    ///
    /// Any pending task is cancelled and its payload returned.
    pub fn schedule(&mut self, now: Duration, payload: T) -> (TaskId, Option<T>) {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let replaced = self.pending.replace(Pending {
            id,
            deadline: now.saturating_add(self.delay),
            payload,
        });
        (id, replaced.map(|p| p.payload))
    }

    /// Cancels the pending task, returning its payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Returns `true` while a task is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Id of the pending task, if any.
    #[must_use]
    pub fn pending_id(&self) -> Option<TaskId> {
        self.pending.as_ref().map(|p| p.id)
    }

    /// Payload of the pending task, if any.
    #[must_use]
    pub fn pending_payload(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.payload)
    }

    /// When the pending task is due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Fires the pending task if it is due at `now`.
    ///
    /// Returns the payload exactly once; the debouncer is idle afterwards.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }
}
