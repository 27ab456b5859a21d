// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ElementId;

/// Errors returned by structural mutations of a [`Document`](crate::Document).
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle refers to an element that was destroyed (or never existed).
    #[error("element {0:?} is not alive")]
    StaleElement(ElementId),
    /// The mutation would make an element its own ancestor.
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The prospective parent.
        parent: ElementId,
        /// The element being moved.
        child: ElementId,
    },
    /// The document element cannot be detached or destroyed.
    #[error("the document element cannot be removed")]
    DocumentElement,
}
