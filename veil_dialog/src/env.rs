// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host runtime a dialog relies on: a clock, the reduced-motion
//! preference, and a local spawner for lifecycle hooks.

use core::cell::Cell;
use core::fmt;
use core::time::Duration;
use std::rc::Rc;

use futures::task::LocalSpawn;
use web_time::Instant;

/// Clock and user preferences, queried synchronously.
pub trait Environment {
    /// Monotonic time since an arbitrary, fixed origin.
    fn now(&self) -> Duration;

    /// Whether the user asked for non-essential motion to be suppressed.
    fn prefers_reduced_motion(&self) -> bool;
}

/// Real clock (`web_time::Instant`, so it also works on the web) with a
/// settable reduced-motion preference.
///
/// Browser bindings typically update the preference from a
/// `(prefers-reduced-motion: reduce)` media query listener.
#[derive(Debug)]
pub struct SystemEnvironment {
    origin: Instant,
    reduced_motion: Cell<bool>,
}

impl SystemEnvironment {
    /// Start the clock now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            reduced_motion: Cell::new(false),
        }
    }

    /// Update the reduced-motion preference.
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for SystemEnvironment {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }
}

/// A clock that only moves when told to. Used by tests and by hosts that
/// drive time from their own frame loop.
#[derive(Debug, Default)]
pub struct ManualEnvironment {
    now: Cell<Duration>,
    reduced_motion: Cell<bool>,
}

impl ManualEnvironment {
    /// Time zero, motion allowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Update the reduced-motion preference.
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }
}

impl Environment for ManualEnvironment {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }
}

/// Everything a dialog borrows from its host: an [`Environment`] and a
/// spawner that runs lifecycle hooks to completion.
///
/// Cheap to clone; one runtime is usually shared by every dialog on a page.
#[derive(Clone)]
pub struct Runtime {
    pub(crate) env: Rc<dyn Environment>,
    pub(crate) spawner: Rc<dyn LocalSpawn>,
}

impl Runtime {
    /// Bundle an environment with a local spawner
    /// (for example `futures::executor::LocalPool::spawner()`).
    pub fn new(env: Rc<dyn Environment>, spawner: impl LocalSpawn + 'static) -> Self {
        Self {
            env,
            spawner: Rc::new(spawner),
        }
    }

    /// The host environment.
    pub fn env(&self) -> &dyn Environment {
        &*self.env
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("now", &self.env.now())
            .field("reduced_motion", &self.env.prefers_reduced_motion())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let env = ManualEnvironment::new();
        assert_eq!(env.now(), Duration::ZERO);
        env.advance(Duration::from_millis(40));
        env.advance(Duration::from_millis(2));
        assert_eq!(env.now(), Duration::from_millis(42));
        assert!(!env.prefers_reduced_motion());
        env.set_reduced_motion(true);
        assert!(env.prefers_reduced_motion());
    }

    #[test]
    fn system_clock_is_monotonic() {
        let env = SystemEnvironment::new();
        let a = env.now();
        let b = env.now();
        assert!(b >= a);
    }
}
