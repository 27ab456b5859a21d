// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dialog configuration.
//!
//! Two layers:
//! - [`DialogConfig`]: the reflected attributes on the dialog root
//!   (`active`, `animated`, `static`, `close`), re-read whenever the host
//!   reports an attribute change.
//! - [`DialogOptions`]: construction-time options that never change after mount.

use core::time::Duration;

use smallvec::SmallVec;
use veil_tree::{Document, ElementId};

/// Root attribute: `"true"` while the dialog is (becoming) visible.
pub const ATTR_ACTIVE: &str = "active";
/// Root attribute: `"false"` disables show/hide animation.
pub const ATTR_ANIMATED: &str = "animated";
/// Root attribute: `"true"` disables Escape and backdrop dismissal.
pub const ATTR_STATIC: &str = "static";
/// Root attribute: accessible label of the close button.
pub const ATTR_CLOSE: &str = "close";

/// Close button label used when the `close` attribute is absent or empty.
pub const DEFAULT_CLOSE_LABEL: &str = "Close";

/// Default show/hide animation length.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Snapshot of the reflected root attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogConfig {
    /// `active="true"`.
    pub active: bool,
    /// Anything but `animated="false"`.
    pub animated: bool,
    /// `static="true"`.
    pub is_static: bool,
    /// Close button label.
    pub close_label: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            active: false,
            animated: true,
            is_static: false,
            close_label: DEFAULT_CLOSE_LABEL.into(),
        }
    }
}

/// One field that differs between two [`DialogConfig`] snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigChange {
    /// `active` flipped.
    Active(bool),
    /// `animated` flipped.
    Animated(bool),
    /// `static` flipped.
    Static(bool),
    /// The close label changed.
    CloseLabel(String),
}

impl DialogConfig {
    /// Read the reflected attributes from `root`.
    pub fn from_element(doc: &Document, root: ElementId) -> Self {
        let close_label = doc
            .attribute(root, ATTR_CLOSE)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_CLOSE_LABEL);
        Self {
            active: doc.attribute(root, ATTR_ACTIVE) == Some("true"),
            animated: doc.attribute(root, ATTR_ANIMATED) != Some("false"),
            is_static: doc.attribute(root, ATTR_STATIC) == Some("true"),
            close_label: close_label.into(),
        }
    }

    /// The fields of `newer` that differ from `self`, in a fixed order
    /// (`active` last, so label updates land before a show starts).
    pub fn changes_to(&self, newer: &Self) -> SmallVec<[ConfigChange; 4]> {
        let mut changes = SmallVec::new();
        if self.animated != newer.animated {
            changes.push(ConfigChange::Animated(newer.animated));
        }
        if self.is_static != newer.is_static {
            changes.push(ConfigChange::Static(newer.is_static));
        }
        if self.close_label != newer.close_label {
            changes.push(ConfigChange::CloseLabel(newer.close_label.clone()));
        }
        if self.active != newer.active {
            changes.push(ConfigChange::Active(newer.active));
        }
        changes
    }
}

/// How the dialog relates to the markup it is mounted on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MountMode {
    /// The root element is the dialog container. Focus is trapped by
    /// cycling Tab at the boundaries.
    #[default]
    InPlace,
    /// The engine builds scroll, overlay, and container chrome under the
    /// root and moves the `slot="modal"` content into it. Focus is trapped
    /// by sentinel elements on either side of the overlay.
    Wrapped,
}

/// Construction-time options.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogOptions {
    /// Markup strategy.
    pub mode: MountMode,
    /// Length of the show/hide animation when motion is allowed.
    pub animation_duration: Duration,
    /// Lock page scrolling while a wrapped dialog is open.
    pub lock_scroll: bool,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            mode: MountMode::InPlace,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            lock_scroll: true,
        }
    }
}

impl DialogOptions {
    /// Options for a wrapped dialog.
    pub fn wrapped() -> Self {
        Self {
            mode: MountMode::Wrapped,
            ..Self::default()
        }
    }

    /// Replace the animation duration.
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Enable or disable the page scroll lock.
    #[must_use]
    pub fn with_lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_tree::Tag;

    fn root_with(attrs: &[(&str, &str)]) -> (Document, ElementId) {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), Tag::Div).unwrap();
        for (k, v) in attrs {
            doc.set_attribute(root, k, v);
        }
        (doc, root)
    }

    #[test]
    fn bare_root_reads_defaults() {
        let (doc, root) = root_with(&[]);
        assert_eq!(DialogConfig::from_element(&doc, root), DialogConfig::default());
    }

    #[test]
    fn only_exact_values_flip_flags() {
        let (doc, root) = root_with(&[("active", "yes"), ("animated", "0"), ("static", "")]);
        let config = DialogConfig::from_element(&doc, root);
        assert!(!config.active);
        assert!(config.animated);
        assert!(!config.is_static);

        let (doc, root) = root_with(&[("active", "true"), ("animated", "false"), ("static", "true")]);
        let config = DialogConfig::from_element(&doc, root);
        assert!(config.active);
        assert!(!config.animated);
        assert!(config.is_static);
    }

    #[test]
    fn blank_close_label_falls_back() {
        let (doc, root) = root_with(&[("close", "   ")]);
        assert_eq!(DialogConfig::from_element(&doc, root).close_label, "Close");
        let (doc, root) = root_with(&[("close", "Fermer")]);
        assert_eq!(DialogConfig::from_element(&doc, root).close_label, "Fermer");
    }

    #[test]
    fn changes_put_active_last() {
        let old = DialogConfig::default();
        let new = DialogConfig {
            active: true,
            close_label: "Dismiss".into(),
            ..DialogConfig::default()
        };
        let changes = old.changes_to(&new);
        assert_eq!(
            changes.as_slice(),
            &[
                ConfigChange::CloseLabel("Dismiss".into()),
                ConfigChange::Active(true)
            ]
        );
        assert!(new.changes_to(&new).is_empty());
    }

    #[test]
    fn option_builders() {
        let options = DialogOptions::wrapped()
            .with_animation_duration(Duration::from_millis(100))
            .with_lock_scroll(false);
        assert_eq!(options.mode, MountMode::Wrapped);
        assert_eq!(options.animation_duration, Duration::from_millis(100));
        assert!(!options.lock_scroll);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_deserialize_with_defaults() {
        let options: DialogOptions = serde_json::from_str(r#"{ "mode": "wrapped" }"#).unwrap();
        assert_eq!(options, DialogOptions::wrapped());
    }
}
