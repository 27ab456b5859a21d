// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The future returned by `show` and `hide`.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::channel::oneshot;

/// How a show or hide request ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionOutcome {
    /// The dialog settled in the requested state and every hook for that
    /// phase has completed.
    Completed,
    /// The request was not honored: the dialog was already there, was
    /// moving the other way, or was destroyed.
    Ignored,
    /// The dialog was destroyed (or hook execution could not be scheduled)
    /// before the transition finished.
    Abandoned,
}

#[derive(Debug)]
enum State {
    Ready(TransitionOutcome),
    Waiting(oneshot::Receiver<()>),
}

/// Resolves when a show or hide request has run its course.
///
/// Dropping it does not cancel anything; the transition proceeds regardless.
#[derive(Debug)]
#[must_use = "dropping a transition discards its outcome"]
pub struct Transition {
    state: State,
}

impl Transition {
    pub(crate) fn ready(outcome: TransitionOutcome) -> Self {
        Self {
            state: State::Ready(outcome),
        }
    }

    pub(crate) fn waiting(rx: oneshot::Receiver<()>) -> Self {
        Self {
            state: State::Waiting(rx),
        }
    }

    /// True if the request was turned away immediately.
    pub fn is_ignored(&self) -> bool {
        matches!(self.state, State::Ready(TransitionOutcome::Ignored))
    }
}

impl Future for Transition {
    type Output = TransitionOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            State::Ready(outcome) => Poll::Ready(*outcome),
            State::Waiting(rx) => Pin::new(rx).poll(cx).map(|res| match res {
                Ok(()) => TransitionOutcome::Completed,
                Err(oneshot::Canceled) => TransitionOutcome::Abandoned,
            }),
        }
    }
}
