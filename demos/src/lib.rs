// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the demos: a toy host that lays out every element as a
//! stacked block and prints what the page looks like.

use kurbo::Rect;
use veil_dialog::markup::CLASS_FOCUS_TRAP;
use veil_tree::{Document, ElementId, Layout, Tag};

/// Height of one stacked block.
const ROW: f64 = 28.0;

/// Stack every element under the body vertically. Focus sentinels stay
/// zero-sized, the way a stylesheet would keep them.
pub fn stack_layout(doc: &mut Document) {
    let body = doc.body();
    let ids: Vec<_> = doc.descendants(body).collect();
    let mut y = 0.0;
    for id in ids {
        if doc.has_class(id, CLASS_FOCUS_TRAP) {
            continue;
        }
        doc.set_layout(id, Layout::from_rect(Rect::new(0.0, y, 320.0, y + ROW)));
        y += ROW;
    }
}

/// A short human-readable name for an element.
pub fn describe(doc: &Document, id: ElementId) -> String {
    let tag = match doc.tag(id) {
        Some(Tag::Custom(name)) => name.clone(),
        Some(tag) => format!("{tag:?}").to_lowercase(),
        None => return "<gone>".into(),
    };
    let label = doc
        .attribute(id, "aria-label")
        .map(str::to_owned)
        .unwrap_or_else(|| doc.text_content(id));
    let label = label.trim();
    if label.is_empty() {
        tag
    } else {
        format!("{tag} \"{label}\"")
    }
}

/// Print the focused element.
pub fn print_focus(doc: &Document) {
    match doc.active_element() {
        Some(id) => println!("  focus: {}", describe(doc, id)),
        None => println!("  focus: <body>"),
    }
}

/// Move focus like a browser does on Tab, honoring a prevented default.
pub fn browser_tab(doc: &mut Document, prevented: bool, backward: bool) -> Option<ElementId> {
    if prevented {
        return None;
    }
    let next = doc.sequential_focus_target(doc.active_element(), backward)?;
    doc.focus(next).then_some(next)
}
