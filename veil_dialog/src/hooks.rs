// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle hooks.
//!
//! Hooks are registered per [`HookPhase`] and invoked in registration order
//! when the dialog settles into `Shown` or `Hidden`. They run concurrently; a
//! failing hook is logged and does not affect its siblings.

use core::fmt;
use core::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, join_all};

use crate::error::HookError;
use crate::machine::HookPhase;

/// The future a hook returns.
pub type HookFuture = LocalBoxFuture<'static, Result<(), HookError>>;

/// A registered hook. Identity (for [`HookRegistry::remove`]) is the `Rc` pointer.
pub type Hook = Rc<dyn Fn() -> HookFuture>;

/// Wrap an async closure as a [`Hook`].
///
/// ```
/// use veil_dialog::{HookError, hook};
///
/// let ok = hook(|| async { Ok(()) });
/// let failing = hook(|| async { Err(HookError::new("analytics offline")) });
/// # let _ = (ok, failing);
/// ```
pub fn hook<F, Fut>(f: F) -> Hook
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<(), HookError>> + 'static,
{
    Rc::new(move || f().boxed_local())
}

/// What happened when one phase's hooks ran.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HookReport {
    /// Hooks invoked.
    pub invoked: usize,
    /// Hooks that returned an error.
    pub failed: usize,
}

/// Ordered hook lists for both phases.
#[derive(Default)]
pub struct HookRegistry {
    show: Vec<Hook>,
    hide: Vec<Hook>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("show", &self.show.len())
            .field("hide", &self.hide.len())
            .finish()
    }
}

impl HookRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, phase: HookPhase) -> &Vec<Hook> {
        match phase {
            HookPhase::Show => &self.show,
            HookPhase::Hide => &self.hide,
        }
    }

    fn list_mut(&mut self, phase: HookPhase) -> &mut Vec<Hook> {
        match phase {
            HookPhase::Show => &mut self.show,
            HookPhase::Hide => &mut self.hide,
        }
    }

    /// Append a hook. The same hook may be added more than once.
    pub fn add(&mut self, phase: HookPhase, hook: Hook) {
        self.list_mut(phase).push(hook);
    }

    /// Remove the first registration of `hook` (by pointer identity).
    /// Returns false if it was not registered.
    pub fn remove(&mut self, phase: HookPhase, hook: &Hook) -> bool {
        let list = self.list_mut(phase);
        match list.iter().position(|h| Rc::ptr_eq(h, hook)) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of registrations for `phase`.
    pub fn len(&self, phase: HookPhase) -> usize {
        self.list(phase).len()
    }

    /// True if neither phase has hooks.
    pub fn is_empty(&self) -> bool {
        self.show.is_empty() && self.hide.is_empty()
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.show.clear();
        self.hide.clear();
    }

    /// Invoke every hook for `phase` now, in registration order, and return
    /// a future that resolves once all of them have completed.
    ///
    /// Registrations made after this call are not part of the run.
    pub fn invoke(&self, phase: HookPhase) -> LocalBoxFuture<'static, HookReport> {
        let runs: Vec<_> = self
            .list(phase)
            .iter()
            .enumerate()
            .map(|(index, hook)| {
                let fut = hook();
                async move {
                    match fut.await {
                        Ok(()) => true,
                        Err(error) => {
                            tracing::warn!(?phase, index, %error, "dialog hook failed");
                            false
                        }
                    }
                }
            })
            .collect();
        let invoked = runs.len();
        async move {
            let outcomes = join_all(runs).await;
            HookReport {
                invoked,
                failed: outcomes.iter().filter(|ok| !**ok).count(),
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    fn recording(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Hook {
        let log = log.clone();
        hook(move || {
            log.borrow_mut().push(name);
            async { Ok(()) }
        })
    }

    #[test]
    fn invoked_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = HookRegistry::new();
        registry.add(HookPhase::Show, recording(&log, "a"));
        registry.add(HookPhase::Show, recording(&log, "b"));
        registry.add(HookPhase::Hide, recording(&log, "hide"));

        let run = registry.invoke(HookPhase::Show);
        assert_eq!(*log.borrow(), ["a", "b"]);
        assert_eq!(
            block_on(run),
            HookReport {
                invoked: 2,
                failed: 0
            }
        );
    }

    #[test]
    fn remove_takes_first_match_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let twice = recording(&log, "twice");
        let mut registry = HookRegistry::new();
        registry.add(HookPhase::Hide, twice.clone());
        registry.add(HookPhase::Hide, twice.clone());
        assert!(registry.remove(HookPhase::Hide, &twice));
        assert_eq!(registry.len(HookPhase::Hide), 1);
        assert!(!registry.remove(HookPhase::Show, &twice));
        assert!(registry.remove(HookPhase::Hide, &twice));
        assert!(!registry.remove(HookPhase::Hide, &twice));
        assert!(registry.is_empty());
    }

    #[test]
    fn failures_are_isolated() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = HookRegistry::new();
        registry.add(
            HookPhase::Show,
            hook(|| async { Err(HookError::new("boom")) }),
        );
        registry.add(HookPhase::Show, recording(&log, "after"));
        let report = block_on(registry.invoke(HookPhase::Show));
        assert_eq!(report.failed, 1);
        assert_eq!(report.invoked, 2);
        assert_eq!(*log.borrow(), ["after"]);
    }

    #[test]
    fn resolves_only_after_every_hook() {
        let (tx, rx) = oneshot::channel::<()>();
        let rx = RefCell::new(Some(rx));
        let mut registry = HookRegistry::new();
        registry.add(
            HookPhase::Show,
            hook(move || {
                let rx = rx.borrow_mut().take();
                async move {
                    match rx {
                        Some(rx) => rx.await.map_err(|_| HookError::new("sender dropped")),
                        None => Ok(()),
                    }
                }
            }),
        );
        let mut run = registry.invoke(HookPhase::Show);
        assert!((&mut run).now_or_never().is_none());
        tx.send(()).unwrap();
        assert_eq!(run.now_or_never().map(|r| r.failed), Some(0));
    }
}
