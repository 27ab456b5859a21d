// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veil Tree: a host-agnostic element tree for headless dialog and focus logic.
//!
//! ## Overview
//!
//! The dialog engine in `veil_dialog` never talks to a browser directly.
//! Instead it reads and mutates this small model of a page:
//!
//! - [`Document`]: generational arena of elements with a document element and a body.
//! - [`ElementId`]: copyable, generational handle; stale handles never alias a live element.
//! - [`Tag`]: the element kind, enough to evaluate focus capability.
//! - [`Layout`]: the host-computed border box plus client rectangles of an element.
//! - [`Event`], [`Key`], [`Modifiers`]: input delivered by the host.
//! - [`ListenerId`], [`ListenerTarget`], [`Dispatch`]: a listener registry with
//!   capture → target → bubble routing, mirroring how a browser delivers events.
//!
//! A browser binding mirrors its DOM into this model; tests build documents by hand.
//!
//! ## Rendering model
//!
//! Layout is supplied by the host via [`Document::set_layout`]. An element is
//! *rendered* when it is connected to the document and neither it nor any
//! ancestor carries the `hidden` attribute. Unrendered elements report a zero
//! [`Document::offset_size`] and no [`Document::client_rects`], which is what
//! focus scanning observes for content inside a closed dialog.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use veil_tree::{Document, Layout, Tag};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let button = doc.append(body, Tag::Button).unwrap();
//! doc.set_layout(button, Layout::from_rect(Rect::new(0.0, 0.0, 80.0, 24.0)));
//!
//! assert!(doc.focus(button));
//! assert_eq!(doc.active_element(), Some(button));
//!
//! doc.set_attribute(body, "hidden", "");
//! assert!(!doc.is_rendered(button));
//! assert_eq!(doc.offset_size(button), kurbo::Size::ZERO);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod event;
mod listeners;
mod types;

pub use document::{Descendants, Document, Element};
pub use error::TreeError;
pub use event::{Event, Key, Modifiers};
pub use listeners::{Dispatch, EventKind, ListenerId, ListenerTarget, Phase};
pub use types::{ElementId, Layout, Tag};
