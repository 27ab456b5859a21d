// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focusable-set scanner.
//!
//! A descendant is returned when it matches the capability predicate
//! ([`is_focus_candidate`]) and is visible ([`is_visible`]). Results are in
//! document (depth-first pre-order) order.
//!
//! The capability predicate matches:
//!
//! - `a[href]`, `area[href]`
//! - `input` that is neither `type="hidden"` nor a radio button, when not disabled
//! - `input[type="radio"]` when checked and not disabled
//! - `select`, `textarea`, `button` when not disabled
//! - `iframe`, `summary`, `audio[controls]`, `video[controls]`
//! - anything with `contenteditable` or a `tabindex`
//!
//! Every candidate is dropped when its `tabindex` is negative.

use alloc::vec::Vec;

use veil_tree::{Document, ElementId, Tag};

/// Returns true if `id` matches the focus capability predicate.
pub fn is_focus_candidate(doc: &Document, id: ElementId) -> bool {
    let Some(element) = doc.element(id) else {
        return false;
    };
    if element
        .attribute("tabindex")
        .is_some_and(|t| t.trim_start().starts_with('-'))
    {
        return false;
    }
    if element.attribute("tabindex").is_some() || element.attribute("contenteditable").is_some() {
        return true;
    }
    let enabled = element.attribute("disabled").is_none();
    match element.tag() {
        Tag::A | Tag::Area => element.attribute("href").is_some(),
        Tag::Input => match element.attribute("type") {
            Some(t) if t.eq_ignore_ascii_case("hidden") => false,
            Some(t) if t.eq_ignore_ascii_case("radio") => {
                enabled && element.attribute("checked").is_some()
            }
            _ => enabled,
        },
        Tag::Select | Tag::Textarea | Tag::Button => enabled,
        Tag::Iframe | Tag::Summary => true,
        Tag::Audio | Tag::Video => element.attribute("controls").is_some(),
        _ => false,
    }
}

/// Returns true if `id` has a non-zero rendered width or height, or at least
/// one client rectangle.
pub fn is_visible(doc: &Document, id: ElementId) -> bool {
    let size = doc.offset_size(id);
    size.width > 0.0 || size.height > 0.0 || !doc.client_rects(id).is_empty()
}

/// Scan `root` with the default predicate, returning a fresh list.
pub fn focusable_elements(doc: &Document, root: ElementId) -> Vec<ElementId> {
    let mut out = Vec::new();
    scan_into(doc, root, is_focus_candidate, &mut out);
    out
}

/// Scan `root` with a custom capability predicate.
///
/// The `out` buffer is cleared and reused. Visibility filtering is always
/// applied on top of `predicate`, and `root` itself is never included.
pub fn scan_into(
    doc: &Document,
    root: ElementId,
    mut predicate: impl FnMut(&Document, ElementId) -> bool,
    out: &mut Vec<ElementId>,
) {
    out.clear();
    out.extend(
        doc.descendants(root)
            .filter(|&id| predicate(doc, id) && is_visible(doc, id)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Rect;
    use veil_tree::Layout;

    fn boxed(doc: &mut Document, parent: ElementId, tag: Tag, attrs: &[(&str, &str)]) -> ElementId {
        let id = doc.append(parent, tag).unwrap();
        for (k, v) in attrs {
            doc.set_attribute(id, k, v);
        }
        doc.set_layout(id, Layout::from_rect(Rect::new(0.0, 0.0, 40.0, 16.0)));
        id
    }

    #[test]
    fn native_controls_in_document_order() {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), Tag::Div).unwrap();
        let group = boxed(&mut doc, root, Tag::Div, &[]);
        let link = boxed(&mut doc, group, Tag::A, &[("href", "#top")]);
        let text = boxed(&mut doc, root, Tag::Input, &[]);
        let area = boxed(&mut doc, root, Tag::Textarea, &[]);
        let summary = boxed(&mut doc, root, Tag::Summary, &[]);
        assert_eq!(focusable_elements(&doc, root), vec![link, text, area, summary]);
    }

    #[test]
    fn disabled_hidden_and_negative_tabindex_are_excluded() {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), Tag::Div).unwrap();
        boxed(&mut doc, root, Tag::Button, &[("disabled", "")]);
        boxed(&mut doc, root, Tag::Input, &[("type", "hidden")]);
        boxed(&mut doc, root, Tag::Button, &[("tabindex", "-1")]);
        boxed(&mut doc, root, Tag::A, &[]);
        boxed(&mut doc, root, Tag::Video, &[]);
        let editable = boxed(&mut doc, root, Tag::Div, &[("contenteditable", "true")]);
        let tabbable = boxed(&mut doc, root, Tag::Span, &[("tabindex", "0")]);
        assert_eq!(focusable_elements(&doc, root), vec![editable, tabbable]);
    }

    #[test]
    fn only_checked_radios_are_candidates() {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), Tag::Div).unwrap();
        let radio = [("type", "radio"), ("name", "size")];
        boxed(&mut doc, root, Tag::Input, &radio);
        let checked = boxed(&mut doc, root, Tag::Input, &[radio[0], radio[1], ("checked", "")]);
        boxed(&mut doc, root, Tag::Input, &radio);
        assert_eq!(focusable_elements(&doc, root), vec![checked]);
    }

    #[test]
    fn zero_size_without_rects_is_invisible() {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), Tag::Div).unwrap();
        let collapsed = doc.append(root, Tag::Button).unwrap();
        let inline = doc.append(root, Tag::Button).unwrap();
        doc.set_layout(
            inline,
            Layout {
                bounds: Rect::ZERO,
                client_rects: [Rect::new(0.0, 0.0, 0.0, 12.0)].into_iter().collect(),
            },
        );
        assert!(!is_visible(&doc, collapsed));
        assert!(is_visible(&doc, inline));
        assert_eq!(focusable_elements(&doc, root), vec![inline]);
    }

    #[test]
    fn hidden_subtree_scans_empty() {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), Tag::Div).unwrap();
        boxed(&mut doc, root, Tag::Button, &[]);
        doc.set_attribute(root, "hidden", "");
        assert!(focusable_elements(&doc, root).is_empty());
    }

    #[test]
    fn custom_predicate_reuses_buffer() {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), Tag::Div).unwrap();
        let button = boxed(&mut doc, root, Tag::Button, &[]);
        boxed(&mut doc, root, Tag::Input, &[]);
        let mut out = vec![root];
        scan_into(&doc, root, |d, id| d.tag(id) == Some(&Tag::Button), &mut out);
        assert_eq!(out, vec![button]);
    }
}
