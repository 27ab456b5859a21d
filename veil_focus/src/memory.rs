// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus memory: remember who had focus before a dialog opened.
//!
//! ## Usage
//! 1) Call [`FocusMemory::capture`] at the instant a show begins.
//! 2) Call [`FocusMemory::restore`] at the instant a hide completes.
//!
//! The stored handle is a weak reference: if the element was destroyed,
//! detached, hidden, or disabled in the meantime, `restore` is a no-op.
//!
//! ## Minimal example
//! ```
//! use kurbo::Rect;
//! use veil_focus::FocusMemory;
//! use veil_tree::{Document, Layout, Tag};
//!
//! let mut doc = Document::new();
//! let opener = doc.append(doc.body(), Tag::Button).unwrap();
//! doc.set_layout(opener, Layout::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! doc.focus(opener);
//!
//! let mut memory = FocusMemory::new();
//! memory.capture(&doc);
//! doc.blur();
//! assert_eq!(memory.restore(&mut doc), Some(opener));
//! assert_eq!(doc.active_element(), Some(opener));
//! assert!(memory.previous().is_none());
//! ```

use veil_tree::{Document, ElementId};

/// Remembers the element focused before a dialog opened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusMemory {
    previous: Option<ElementId>,
}

impl FocusMemory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// The remembered element, if any.
    pub fn previous(&self) -> Option<ElementId> {
        self.previous
    }

    /// Record the currently focused element (or nothing, if focus is on the body).
    pub fn capture(&mut self, doc: &Document) {
        self.previous = doc.active_element();
    }

    /// Hand focus back to the remembered element and forget it.
    ///
    /// Returns the element that received focus, or `None` when nothing was
    /// remembered or the element can no longer take focus.
    pub fn restore(&mut self, doc: &mut Document) -> Option<ElementId> {
        let previous = self.previous.take()?;
        doc.focus(previous).then_some(previous)
    }

    /// Forget the remembered element without touching focus.
    pub fn clear(&mut self) {
        self.previous = None;
    }
}
