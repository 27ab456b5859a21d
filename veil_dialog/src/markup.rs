// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup the engine reads and writes.
//!
//! ## Wrapped chrome
//!
//! ```text
//! root
//! ├── (slot="button" opener, untouched)
//! └── div.veil-dialog__scroll [hidden]
//!     ├── span.veil-dialog__focus-trap   tabindex=0 aria-hidden=true
//!     ├── div.veil-dialog__overlay
//!     │   └── div.veil-dialog__dialog   role=dialog aria-modal=true tabindex=-1 aria-label=…
//!     │       ├── button.veil-dialog__close   data-dialog-hide title/aria-label=<close label>
//!     │       └── (slot="modal" content, moved here)
//!     └── span.veil-dialog__focus-trap   tabindex=0 aria-hidden=true
//! ```
//!
//! The host styles the classes and lays out the new elements like any other
//! part of the page. Sentinels are meant to stay zero-sized.

use veil_focus::trap::Sentinels;
use veil_tree::{Document, ElementId, Tag, TreeError};

use crate::config::MountMode;
use crate::error::ConfigError;

/// Marks an element that toggles the dialog when activated.
pub const DATA_TOGGLE: &str = "data-dialog-toggle";
/// Marks an element that opens the dialog when activated.
pub const DATA_SHOW: &str = "data-dialog-show";
/// Marks an element that closes the dialog when activated.
pub const DATA_HIDE: &str = "data-dialog-hide";
/// Presentation flag present while the show animation runs.
pub const FLAG_SHOWING: &str = "data-veil-show";
/// Presentation flag present while the hide animation runs.
pub const FLAG_HIDING: &str = "data-veil-hide";

/// `slot` value of the content region in wrapped mode.
pub const SLOT_CONTENT: &str = "modal";
/// `slot` value of an opener placed inside the root; acts as a toggle.
pub const SLOT_OPENER: &str = "button";

/// Class of the scroll wrapper.
pub const CLASS_SCROLL: &str = "veil-dialog__scroll";
/// Class of the backdrop overlay.
pub const CLASS_OVERLAY: &str = "veil-dialog__overlay";
/// Class of the dialog container.
pub const CLASS_DIALOG: &str = "veil-dialog__dialog";
/// Class of the close button.
pub const CLASS_CLOSE: &str = "veil-dialog__close";
/// Class of the two focus sentinels.
pub const CLASS_FOCUS_TRAP: &str = "veil-dialog__focus-trap";

/// Accessible name used when the content has no heading.
pub const FALLBACK_LABEL: &str = "modal";

/// The elements a mounted dialog works with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Parts {
    pub(crate) root: ElementId,
    /// Carries `hidden` and the presentation flags.
    pub(crate) presentation: ElementId,
    /// Where focus may rest while open (sentinels included).
    pub(crate) scope: ElementId,
    pub(crate) container: ElementId,
    pub(crate) overlay: Option<ElementId>,
    pub(crate) close: Option<ElementId>,
    pub(crate) sentinels: Option<Sentinels>,
    pub(crate) content: Option<ElementId>,
}

/// Collapse runs of whitespace and trim.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accessible name for a dialog: the text of the first heading under
/// `search_root`, or [`FALLBACK_LABEL`].
pub fn dialog_label(doc: &Document, search_root: ElementId) -> String {
    doc.find_first(search_root, |d, id| d.tag(id).is_some_and(Tag::is_heading))
        .map(|heading| normalize_whitespace(&doc.text_content(heading)))
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| FALLBACK_LABEL.into())
}

/// Set `title` and `aria-label` on the close button.
pub(crate) fn apply_close_label(doc: &mut Document, close: ElementId, label: &str) {
    doc.set_attribute(close, "title", label);
    doc.set_attribute(close, "aria-label", label);
}

/// Prepare the markup under `root` for `mode`.
///
/// Returns the parts plus any non-fatal configuration problems.
pub(crate) fn build(
    doc: &mut Document,
    root: ElementId,
    mode: MountMode,
    close_label: &str,
) -> Result<(Parts, Vec<ConfigError>), TreeError> {
    match mode {
        MountMode::InPlace => Ok((build_in_place(doc, root), Vec::new())),
        MountMode::Wrapped => build_wrapped(doc, root, close_label),
    }
}

fn build_in_place(doc: &mut Document, root: ElementId) -> Parts {
    doc.set_attribute(root, "hidden", "");
    doc.set_attribute(root, "role", "dialog");
    doc.set_attribute(root, "aria-modal", "true");
    if !doc.has_attribute(root, "tabindex") {
        doc.set_attribute(root, "tabindex", "-1");
    }
    if !doc.has_attribute(root, "aria-label") && !doc.has_attribute(root, "aria-labelledby") {
        let label = dialog_label(doc, root);
        doc.set_attribute(root, "aria-label", &label);
    }
    Parts {
        root,
        presentation: root,
        scope: root,
        container: root,
        overlay: None,
        close: None,
        sentinels: None,
        content: Some(root),
    }
}

fn sentinel(doc: &mut Document, parent: ElementId) -> Result<ElementId, TreeError> {
    let span = doc.append(parent, Tag::Span)?;
    doc.add_class(span, CLASS_FOCUS_TRAP);
    doc.set_attribute(span, "tabindex", "0");
    doc.set_attribute(span, "aria-hidden", "true");
    Ok(span)
}

fn build_wrapped(
    doc: &mut Document,
    root: ElementId,
    close_label: &str,
) -> Result<(Parts, Vec<ConfigError>), TreeError> {
    let mut problems = Vec::new();
    let content = doc.find_first(root, |d, id| d.attribute(id, "slot") == Some(SLOT_CONTENT));
    if content.is_none() {
        tracing::error!(
            ?root,
            "required [slot=\"modal\"] content region not found; the dialog will be empty"
        );
        problems.push(ConfigError::MissingContent { root });
    }
    let label = dialog_label(doc, root);

    let scroll = doc.append(root, Tag::Div)?;
    doc.add_class(scroll, CLASS_SCROLL);
    doc.set_attribute(scroll, "hidden", "");

    let leading = sentinel(doc, scroll)?;

    let overlay = doc.append(scroll, Tag::Div)?;
    doc.add_class(overlay, CLASS_OVERLAY);

    let container = doc.append(overlay, Tag::Div)?;
    doc.add_class(container, CLASS_DIALOG);
    doc.set_attribute(container, "role", "dialog");
    doc.set_attribute(container, "aria-modal", "true");
    doc.set_attribute(container, "tabindex", "-1");
    doc.set_attribute(container, "aria-label", &label);

    let close = doc.append(container, Tag::Button)?;
    doc.add_class(close, CLASS_CLOSE);
    doc.set_attribute(close, "type", "button");
    doc.set_attribute(close, DATA_HIDE, "");
    doc.set_text(close, "\u{00d7}");
    apply_close_label(doc, close, close_label);

    if let Some(content) = content {
        doc.append_child(container, content)?;
    }

    let trailing = sentinel(doc, scroll)?;

    let parts = Parts {
        root,
        presentation: scroll,
        scope: scroll,
        container,
        overlay: Some(overlay),
        close: Some(close),
        sentinels: Some(Sentinels { leading, trailing }),
        content,
    };
    Ok((parts, problems))
}

/// Page scroll lock applied to the document element.
pub(crate) fn lock_page_scroll(doc: &mut Document) {
    let html = doc.document_element();
    let gutter = doc.scrollbar_width();
    doc.set_style(html, "overflow", "hidden");
    if gutter > 0.0 {
        doc.set_style(html, "padding-right", &format!("{gutter}px"));
    }
}

/// Undo [`lock_page_scroll`].
pub(crate) fn unlock_page_scroll(doc: &mut Document) {
    let html = doc.document_element();
    doc.remove_style(html, "overflow");
    doc.remove_style(html, "padding-right");
}
