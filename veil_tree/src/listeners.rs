// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry and capture → target → bubble routing.
//!
//! The registry only records *who listens where*; it does not own handlers.
//! Owners keep the returned [`ListenerId`] and, when the host routes an event
//! with [`Document::route`](crate::Document::route), run their own handler for
//! every [`Dispatch`] whose listener they own.
//!
//! ## Ordering
//!
//! For a target with root→target path `[html, body, div, button]`:
//!
//! - Capture: document, then `html` … `div` (capturing listeners only).
//! - Target: every listener on `button`, in registration order.
//! - Bubble: `div` … `html`, then document (non-capturing listeners only).
//!
//! Within one node and phase, listeners run in registration order.

use alloc::vec::Vec;

use crate::ElementId;

/// Identifier of a registered listener. Never reused within a document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The document itself (outermost node of every propagation path).
    Document,
    /// A specific element.
    Element(ElementId),
}

/// The kind of event a listener is interested in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer activation.
    Click,
    /// Key press.
    KeyDown,
    /// Focus landing (bubbles).
    FocusIn,
}

/// Propagation phase of a [`Dispatch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root → target, capturing listeners.
    Capture,
    /// Listeners on the target itself.
    Target,
    /// Target → root, non-capturing listeners.
    Bubble,
}

/// One step of a routed event: run the handler of `listener` at `current`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    /// The listener to invoke.
    pub listener: ListenerId,
    /// The node the listener is attached to.
    pub current: ListenerTarget,
    /// The propagation phase.
    pub phase: Phase,
}

#[derive(Clone, Debug)]
struct Entry {
    id: ListenerId,
    target: ListenerTarget,
    kind: EventKind,
    capture: bool,
}

/// Registration-ordered listener table.
#[derive(Clone, Debug, Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<Entry>,
    next: u64,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, target: ListenerTarget, kind: EventKind, capture: bool) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.entries.push(Entry {
            id,
            target,
            kind,
            capture,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn count_on(&self, target: ListenerTarget) -> usize {
        self.entries.iter().filter(|e| e.target == target).count()
    }

    pub(crate) fn remove_element(&mut self, id: ElementId) {
        self.entries
            .retain(|e| e.target != ListenerTarget::Element(id));
    }

    /// Build the dispatch sequence for `kind` along a root→target `path`.
    pub(crate) fn route(&self, kind: EventKind, path: &[ElementId]) -> Vec<Dispatch> {
        let mut out = Vec::new();
        let Some((&target, ancestors)) = path.split_last() else {
            // No target: only document listeners, treated as the target phase.
            self.push_matching(&mut out, ListenerTarget::Document, kind, None, Phase::Target);
            return out;
        };

        self.push_matching(&mut out, ListenerTarget::Document, kind, Some(true), Phase::Capture);
        for &node in ancestors {
            self.push_matching(&mut out, ListenerTarget::Element(node), kind, Some(true), Phase::Capture);
        }
        self.push_matching(&mut out, ListenerTarget::Element(target), kind, None, Phase::Target);
        for &node in ancestors.iter().rev() {
            self.push_matching(&mut out, ListenerTarget::Element(node), kind, Some(false), Phase::Bubble);
        }
        self.push_matching(&mut out, ListenerTarget::Document, kind, Some(false), Phase::Bubble);
        out
    }

    fn push_matching(
        &self,
        out: &mut Vec<Dispatch>,
        current: ListenerTarget,
        kind: EventKind,
        capture: Option<bool>,
        phase: Phase,
    ) {
        out.extend(
            self.entries
                .iter()
                .filter(|e| {
                    e.target == current && e.kind == kind && capture.is_none_or(|c| c == e.capture)
                })
                .map(|e| Dispatch {
                    listener: e.id,
                    current,
                    phase,
                }),
        );
    }
}
