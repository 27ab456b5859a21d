// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener bookkeeping.
//!
//! Every listener a dialog registers on the document is owned by one of two
//! subscriptions. Acquiring a subscription is the only way listeners get
//! added and releasing it is the only way they get removed, so attachment
//! cannot leak or double up.
//!
//! - [`GlobalSubscription`]: document keydown (bubble) and focusin (capture).
//!   Held from the start of a show until the matching hide completes.
//! - [`ControlSubscription`]: click and keydown on the root (delegation for
//!   toggles and the close button), click on the overlay, and any external
//!   openers. Held from mount until destroy.

use smallvec::SmallVec;
use veil_tree::{Document, ElementId, EventKind, ListenerId, ListenerTarget};

use crate::markup::Parts;

/// What a dialog does when one of its listeners fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Handler {
    /// Escape and Tab handling.
    DocumentKeyDown,
    /// Focus guard.
    DocumentFocusIn,
    /// Toggle/close activation delegated from the root or an opener.
    ControlClick,
    /// Keyboard activation of a toggle/close control.
    ControlKeyDown,
    /// Backdrop dismissal.
    OverlayClick,
}

#[derive(Debug)]
pub(crate) struct GlobalSubscription {
    keydown: ListenerId,
    focusin: ListenerId,
}

impl GlobalSubscription {
    pub(crate) fn acquire(doc: &mut Document) -> Self {
        let keydown = doc.add_listener(ListenerTarget::Document, EventKind::KeyDown, false);
        let focusin = doc.add_listener(ListenerTarget::Document, EventKind::FocusIn, true);
        tracing::trace!(?keydown, ?focusin, "global dialog listeners attached");
        Self { keydown, focusin }
    }

    pub(crate) fn release(self, doc: &mut Document) {
        doc.remove_listener(self.keydown);
        doc.remove_listener(self.focusin);
        tracing::trace!("global dialog listeners detached");
    }

    pub(crate) fn handler(&self, id: ListenerId) -> Option<Handler> {
        if id == self.keydown {
            Some(Handler::DocumentKeyDown)
        } else if id == self.focusin {
            Some(Handler::DocumentFocusIn)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub(crate) struct ControlSubscription {
    entries: SmallVec<[(ListenerId, Handler); 4]>,
    openers: SmallVec<[ElementId; 2]>,
}

impl ControlSubscription {
    pub(crate) fn acquire(doc: &mut Document, parts: &Parts) -> Self {
        let mut sub = Self {
            entries: SmallVec::new(),
            openers: SmallVec::new(),
        };
        sub.listen(doc, parts.root, EventKind::Click, Handler::ControlClick);
        sub.listen(doc, parts.root, EventKind::KeyDown, Handler::ControlKeyDown);
        if let Some(overlay) = parts.overlay {
            sub.listen(doc, overlay, EventKind::Click, Handler::OverlayClick);
        }
        sub
    }

    fn listen(&mut self, doc: &mut Document, el: ElementId, kind: EventKind, handler: Handler) {
        let id = doc.add_listener(ListenerTarget::Element(el), kind, false);
        self.entries.push((id, handler));
    }

    /// Listen for activation on an element outside the root.
    /// Returns false if it was already registered.
    pub(crate) fn add_opener(&mut self, doc: &mut Document, opener: ElementId) -> bool {
        if self.openers.contains(&opener) {
            return false;
        }
        self.openers.push(opener);
        self.listen(doc, opener, EventKind::Click, Handler::ControlClick);
        self.listen(doc, opener, EventKind::KeyDown, Handler::ControlKeyDown);
        true
    }

    pub(crate) fn openers(&self) -> &[ElementId] {
        &self.openers
    }

    pub(crate) fn release(self, doc: &mut Document) {
        for (id, _) in self.entries {
            doc.remove_listener(id);
        }
    }

    pub(crate) fn handler(&self, id: ListenerId) -> Option<Handler> {
        self.entries
            .iter()
            .find_map(|&(entry, handler)| (entry == id).then_some(handler))
    }
}
