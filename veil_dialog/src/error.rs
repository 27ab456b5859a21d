// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use veil_tree::{ElementId, TreeError};

/// Hard failure while mounting a dialog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// The root handle does not refer to a live element.
    #[error("dialog root {0:?} is not alive")]
    StaleRoot(ElementId),
    /// Building the dialog chrome failed.
    #[error("failed to build dialog markup: {0}")]
    Tree(#[from] TreeError),
}

/// Non-fatal configuration problem found while mounting.
///
/// The dialog still mounts; these are logged and kept in
/// [`Dialog::diagnostics`](crate::Dialog::diagnostics).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Wrapped dialogs need a descendant marked `slot="modal"` to host content.
    #[error("required [slot=\"modal\"] content region not found inside dialog root {root:?}")]
    MissingContent {
        /// The dialog root that was searched.
        root: ElementId,
    },
}

/// Failure reported by a lifecycle hook.
///
/// Hook failures are isolated: they are logged and never affect sibling hooks
/// or the transition that invoked them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
