// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility state machine.
//!
//! ```text
//!   Hidden --Show--> Showing --Settle--> Shown --Hide--> Hiding --Settle--> Hidden
//! ```
//!
//! Every other (state, trigger) pair is rejected; the dialog treats a rejected
//! request as ignored.

/// Where a dialog is in its show/hide cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Not displayed. Global listeners are detached.
    #[default]
    Hidden,
    /// Displayed, show animation in flight.
    Showing,
    /// Displayed and settled.
    Shown,
    /// Displayed, hide animation in flight.
    Hiding,
}

/// Input to the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A show request.
    Show,
    /// A hide request.
    Hide,
    /// The in-flight animation finished (or was skipped).
    Settle,
}

impl Visibility {
    /// The state reached by applying `trigger`, or `None` if the transition
    /// is not allowed.
    pub fn next(self, trigger: Trigger) -> Option<Self> {
        match (self, trigger) {
            (Self::Hidden, Trigger::Show) => Some(Self::Showing),
            (Self::Showing, Trigger::Settle) => Some(Self::Shown),
            (Self::Shown, Trigger::Hide) => Some(Self::Hiding),
            (Self::Hiding, Trigger::Settle) => Some(Self::Hidden),
            _ => None,
        }
    }

    /// Displayed in any form (`Showing`, `Shown`, or `Hiding`).
    pub fn is_displayed(self) -> bool {
        self != Self::Hidden
    }

    /// Headed towards or at `Shown`.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Showing | Self::Shown)
    }

    /// An animation is in flight.
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Showing | Self::Hiding)
    }
}

/// Which half of the cycle a hook or pending completion belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// Runs when the dialog reaches `Shown`.
    Show,
    /// Runs when the dialog reaches `Hidden`.
    Hide,
}

impl HookPhase {
    /// The trigger that starts this phase.
    pub fn trigger(self) -> Trigger {
        match self {
            Self::Show => Trigger::Show,
            Self::Hide => Trigger::Hide,
        }
    }

    /// The in-flight state of this phase.
    pub fn in_flight(self) -> Visibility {
        match self {
            Self::Show => Visibility::Showing,
            Self::Hide => Visibility::Hiding,
        }
    }

    /// The settled state of this phase.
    pub fn settled(self) -> Visibility {
        match self {
            Self::Show => Visibility::Shown,
            Self::Hide => Visibility::Hidden,
        }
    }
}
