// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events delivered by the host.

use crate::{ElementId, EventKind};

bitflags::bitflags! {
    /// Modifier keys held during a keyboard event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// A logical key, as far as dialog handling cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// A printable character other than space.
    Character(char),
    /// Anything else.
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key`-style name to a [`Key`], case-insensitively.
    pub fn from_name(name: &str) -> Self {
        if name == " " {
            return Self::Space;
        }
        if name.eq_ignore_ascii_case("tab") {
            Self::Tab
        } else if name.eq_ignore_ascii_case("escape") || name.eq_ignore_ascii_case("esc") {
            Self::Escape
        } else if name.eq_ignore_ascii_case("enter") {
            Self::Enter
        } else if name.eq_ignore_ascii_case("space") || name.eq_ignore_ascii_case("spacebar") {
            Self::Space
        } else {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Self::Character(c),
                _ => Self::Other,
            }
        }
    }
}

/// An input event, already targeted by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Pointer activation (or synthesized click) on `target`.
    Click {
        /// The element the pointer landed on.
        target: ElementId,
    },
    /// A key press. `target` is the focused element, or `None` for the body.
    KeyDown {
        /// The focused element receiving the key.
        target: Option<ElementId>,
        /// The key pressed.
        key: Key,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// Focus landed on `target`.
    FocusIn {
        /// The newly focused element.
        target: ElementId,
    },
}

impl Event {
    /// A click on `target`.
    pub fn click(target: ElementId) -> Self {
        Self::Click { target }
    }

    /// A key press without modifiers.
    pub fn key_down(target: Option<ElementId>, key: Key) -> Self {
        Self::KeyDown {
            target,
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A Tab (or Shift+Tab) press.
    pub fn tab(target: Option<ElementId>, shift: bool) -> Self {
        Self::KeyDown {
            target,
            key: Key::Tab,
            modifiers: if shift {
                Modifiers::SHIFT
            } else {
                Modifiers::empty()
            },
        }
    }

    /// Focus landing on `target`.
    pub fn focus_in(target: ElementId) -> Self {
        Self::FocusIn { target }
    }

    /// The listener kind this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::FocusIn { .. } => EventKind::FocusIn,
        }
    }

    /// The event target, if any.
    pub fn target(&self) -> Option<ElementId> {
        match *self {
            Self::Click { target } | Self::FocusIn { target } => Some(target),
            Self::KeyDown { target, .. } => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_are_case_insensitive() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("ESC"), Key::Escape);
        assert_eq!(Key::from_name("tab"), Key::Tab);
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("Spacebar"), Key::Space);
        assert_eq!(Key::from_name("q"), Key::Character('q'));
        assert_eq!(Key::from_name("ArrowDown"), Key::Other);
    }

    #[test]
    fn shift_tab_carries_shift() {
        let Event::KeyDown { modifiers, key, .. } = Event::tab(None, true) else {
            panic!("expected a key event");
        };
        assert_eq!(key, Key::Tab);
        assert!(modifiers.contains(Modifiers::SHIFT));
        assert_eq!(Event::tab(None, false).kind(), EventKind::KeyDown);
    }
}
