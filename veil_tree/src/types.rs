// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, tags, and layout boxes.

use alloc::string::String;
use kurbo::{Rect, Size};
use smallvec::SmallVec;

/// Identifier for an element in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable across mutations but becomes
/// invalid when the element is destroyed. It consists of a slot index and a
/// generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On destroy, the slot is freed; any existing `ElementId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Holding an `ElementId` is therefore a weak reference: it never keeps an
/// element alive and never aliases a different live element. Use
/// [`Document::is_alive`](crate::Document::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The kind of an element.
///
/// Only the distinctions that matter for focus capability, headings and
/// dialog chrome get their own variant; everything else is [`Tag::Custom`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<a>`
    A,
    /// `<area>`
    Area,
    /// `<audio>`
    Audio,
    /// `<body>`
    Body,
    /// `<button>`
    Button,
    /// `<div>`
    Div,
    /// `<h1>`..`<h6>`, by level.
    Heading(u8),
    /// `<html>`
    Html,
    /// `<iframe>`
    Iframe,
    /// `<input>`
    Input,
    /// `<p>`
    Paragraph,
    /// `<select>`
    Select,
    /// `<span>`
    Span,
    /// `<summary>`
    Summary,
    /// `<textarea>`
    Textarea,
    /// `<video>`
    Video,
    /// Any other element, by lowercase name (custom elements included).
    Custom(String),
}

impl Tag {
    /// Parse a tag name, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "a" => Self::A,
            "area" => Self::Area,
            "audio" => Self::Audio,
            "body" => Self::Body,
            "button" => Self::Button,
            "div" => Self::Div,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "html" => Self::Html,
            "iframe" => Self::Iframe,
            "input" => Self::Input,
            "p" => Self::Paragraph,
            "select" => Self::Select,
            "span" => Self::Span,
            "summary" => Self::Summary,
            "textarea" => Self::Textarea,
            "video" => Self::Video,
            _ => Self::Custom(lower),
        }
    }

    /// Returns true for `<h1>`..`<h6>`.
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading(_))
    }

    /// Returns true for elements whose `disabled` attribute removes them from interaction.
    pub fn is_form_control(&self) -> bool {
        matches!(
            self,
            Self::Button | Self::Input | Self::Select | Self::Textarea
        )
    }
}

/// Host-computed geometry of an element.
///
/// `bounds` plays the role of the offset box (its width/height are the
/// rendered size) and `client_rects` the per-fragment boxes an inline element
/// produces. Both are reported only while the element is rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Border box in document coordinates.
    pub bounds: Rect,
    /// Client rectangles (one per line box for inline content).
    pub client_rects: SmallVec<[Rect; 1]>,
}

impl Layout {
    /// A block box: `bounds` is `rect` and the single client rect is `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        let mut client_rects = SmallVec::new();
        client_rects.push(rect);
        Self {
            bounds: rect,
            client_rects,
        }
    }

    /// The rendered size of the border box.
    pub fn size(&self) -> Size {
        self.bounds.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_parse_case_insensitively() {
        assert_eq!(Tag::from_name("BUTTON"), Tag::Button);
        assert_eq!(Tag::from_name("h3"), Tag::Heading(3));
        assert_eq!(
            Tag::from_name("Veil-Dialog"),
            Tag::Custom(String::from("veil-dialog"))
        );
        assert!(Tag::Heading(2).is_heading());
        assert!(Tag::Textarea.is_form_control());
        assert!(!Tag::A.is_form_control());
    }

    #[test]
    fn block_layout_has_one_client_rect() {
        let layout = Layout::from_rect(Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(layout.client_rects.len(), 1);
        assert_eq!(layout.size(), Size::new(10.0, 5.0));
        assert!(Layout::default().client_rects.is_empty());
    }
}
