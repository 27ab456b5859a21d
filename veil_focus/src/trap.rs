// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus trap strategies.
//!
//! ## Boundary cycle
//!
//! [`cycle_tab`] runs on Tab keydown. It scans the dialog content and, when
//! focus sits on the last element (Tab) or the first element (Shift+Tab),
//! moves focus to the opposite end and reports that the host's default Tab
//! action must be suppressed. Anywhere in the middle it does nothing and lets
//! the host move focus.
//!
//! ## Sentinel redirect
//!
//! [`FocusGuard`] runs whenever focus lands somewhere. Dialog content may be
//! bracketed by two zero-size, tab-reachable [`Sentinels`]; reaching the
//! leading one means Shift+Tab walked off the start, reaching the trailing one
//! means Tab walked off the end. Focus anywhere outside the guarded scope
//! (checked by ancestry, not geometry) is pulled back to the dialog's
//! [initial focus target](initial_focus_target).
//!
//! Sentinels are invisible, so the scanner never reports them as content.

use veil_tree::{Document, ElementId};

use crate::scan::focusable_elements;

/// Result of [`cycle_tab`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TabOutcome {
    /// Focus was moved to the given element; suppress the default Tab action.
    Wrapped(ElementId),
    /// Nothing to do; the host should perform its default Tab action.
    Pass,
}

impl TabOutcome {
    /// Returns true if the host must not perform its default Tab action.
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::Wrapped(_))
    }
}

/// Wrap Tab (`backward == false`) or Shift+Tab at the boundaries of the
/// focusable content of `container`.
///
/// With no focusable content, focus is parked on `container` itself and the
/// default action is suppressed. When focus is on the container itself, or
/// outside it, Tab enters at the first element and Shift+Tab at the last.
/// Any other element inside the container passes, even if it is not a tab
/// stop.
pub fn cycle_tab(doc: &mut Document, container: ElementId, backward: bool) -> TabOutcome {
    let list = focusable_elements(doc, container);
    let (Some(&first), Some(&last)) = (list.first(), list.last()) else {
        doc.focus(container);
        return TabOutcome::Wrapped(container);
    };
    let active = doc.active_element();
    let target = match active.and_then(|a| list.iter().position(|&id| id == a)) {
        Some(0) if backward => last,
        Some(i) if !backward && i == list.len() - 1 => first,
        Some(_) => return TabOutcome::Pass,
        None if active.is_some_and(|a| a != container && doc.contains(container, a)) => {
            return TabOutcome::Pass;
        }
        None if backward => last,
        None => first,
    };
    if doc.focus(target) {
        TabOutcome::Wrapped(target)
    } else {
        TabOutcome::Pass
    }
}

/// The element a dialog focuses when it opens or pulls focus back in:
/// the first `[autofocus]` descendant that can take focus, else the first
/// scanned focusable element, else `container` itself.
pub fn initial_focus_target(doc: &Document, container: ElementId) -> ElementId {
    doc.find_first(container, |d, id| {
        d.has_attribute(id, "autofocus") && d.can_focus(id)
    })
    .or_else(|| focusable_elements(doc, container).first().copied())
    .unwrap_or(container)
}

/// Boundary sentinels bracketing a dialog's content.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sentinels {
    /// Placed before the content; reached by Shift+Tab off the first element.
    pub leading: ElementId,
    /// Placed after the content; reached by Tab off the last element.
    pub trailing: ElementId,
}

/// Where focus must go after it landed on an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Focus is legitimately inside the dialog.
    Stay,
    /// Focus must move to this element.
    To(ElementId),
}

/// Sentinel-redirect trap for one dialog.
///
/// - `scope`: the subtree focus may legitimately rest in (sentinels included).
/// - `container`: the dialog container whose content is scanned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusGuard {
    /// Subtree focus may rest in.
    pub scope: ElementId,
    /// Dialog container; scanned for content and used as the last-resort target.
    pub container: ElementId,
    /// Optional boundary sentinels.
    pub sentinels: Option<Sentinels>,
}

impl FocusGuard {
    /// Decide where focus landing on `focused` must go. Pure; see [`apply`](Self::apply).
    pub fn redirect_for(&self, doc: &Document, focused: ElementId) -> Redirect {
        if let Some(s) = self.sentinels {
            if focused == s.leading || focused == s.trailing {
                let list = focusable_elements(doc, self.container);
                let edge = if focused == s.leading {
                    list.last()
                } else {
                    list.first()
                };
                return Redirect::To(edge.copied().unwrap_or(self.container));
            }
        }
        if doc.contains(self.scope, focused) {
            Redirect::Stay
        } else {
            Redirect::To(initial_focus_target(doc, self.container))
        }
    }

    /// Redirect focus that landed on `focused`, returning the element focused instead.
    pub fn apply(&self, doc: &mut Document, focused: ElementId) -> Option<ElementId> {
        match self.redirect_for(doc, focused) {
            Redirect::Stay => None,
            Redirect::To(target) => doc.focus(target).then_some(target),
        }
    }
}
