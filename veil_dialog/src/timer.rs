// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot deadline timer.
//!
//! A dialog has at most one pending animation completion. Arming the slot
//! supersedes whatever was pending, so a stale completion can never fire
//! after a newer transition started.

use core::time::Duration;

/// Identifies one arming of a [`TimerSlot`]. Never reused within a slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct Pending<T> {
    handle: TimerHandle,
    deadline: Duration,
    payload: T,
}

/// Holds at most one pending deadline with a payload.
#[derive(Clone, Debug)]
pub struct TimerSlot<T> {
    pending: Option<Pending<T>>,
    next: u64,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerSlot<T> {
    /// An empty slot.
    pub fn new() -> Self {
        Self {
            pending: None,
            next: 0,
        }
    }

    /// Arm the slot. Returns the new handle and the payload it superseded.
    pub fn arm(&mut self, deadline: Duration, payload: T) -> (TimerHandle, Option<T>) {
        let handle = TimerHandle(self.next);
        self.next += 1;
        let superseded = self
            .pending
            .replace(Pending {
                handle,
                deadline,
                payload,
            })
            .map(|p| p.payload);
        (handle, superseded)
    }

    /// Disarm the slot, returning the pending payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Whether something is pending.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// The handle of the pending arming.
    pub fn handle(&self) -> Option<TimerHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }

    /// Take the payload if its deadline is at or before `now`.
    pub fn take_due(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref()?.deadline <= now {
            self.cancel()
        } else {
            None
        }
    }
}
