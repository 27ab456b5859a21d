// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veil Focus: focus primitives for modal dialogs.
//!
//! ## Overview
//!
//! - [`scan`]: the focusable-set scanner. Produces the ordered, visible subset
//!   of focusable descendants of a root, computed fresh on every call.
//! - [`trap`]: two cooperating trap strategies.
//!   [`trap::cycle_tab`] wraps Tab/Shift+Tab at the ends of the scanned list;
//!   [`trap::FocusGuard`] redirects focus that lands on boundary sentinels or
//!   outside the dialog subtree.
//! - [`memory`]: [`FocusMemory`] remembers the element focused before a dialog
//!   opened and hands focus back when it closes.
//!
//! All functions operate on a [`veil_tree::Document`]; none of them cache
//! anything, since the tree may change between calls.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use veil_focus::scan::focusable_elements;
//! use veil_focus::trap::{cycle_tab, TabOutcome};
//! use veil_tree::{Document, Layout, Tag};
//!
//! let mut doc = Document::new();
//! let dialog = doc.append(doc.body(), Tag::Div).unwrap();
//! let input = doc.append(dialog, Tag::Input).unwrap();
//! let button = doc.append(dialog, Tag::Button).unwrap();
//! for id in [input, button] {
//!     doc.set_layout(id, Layout::from_rect(Rect::new(0.0, 0.0, 40.0, 20.0)));
//! }
//!
//! assert_eq!(focusable_elements(&doc, dialog), vec![input, button]);
//!
//! doc.focus(button);
//! assert_eq!(cycle_tab(&mut doc, dialog, false), TabOutcome::Wrapped(input));
//! assert_eq!(doc.active_element(), Some(input));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod memory;
pub mod scan;
pub mod trap;

pub use memory::FocusMemory;
