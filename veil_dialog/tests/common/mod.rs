// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared host harness for the integration tests.
//!
//! `Host` plays the browser: it owns the document, lays out elements, runs
//! the hook executor, moves the clock, and performs default actions
//! (sequential focus navigation on Tab) unless a dialog prevented them.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::executor::LocalPool;
use kurbo::Rect;
use tracing::Level;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use veil_dialog::markup::CLASS_FOCUS_TRAP;
use veil_dialog::{Dialog, DialogOptions, EventResponse, ManualEnvironment, Runtime, Transition, TransitionOutcome};
use veil_tree::{Document, ElementId, Event, Key, Layout, Tag};

pub const ANIMATION: Duration = Duration::from_millis(250);

pub struct Host {
    pub doc: Document,
    pub env: Rc<ManualEnvironment>,
    pub pool: LocalPool,
}

impl Host {
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            env: Rc::new(ManualEnvironment::new()),
            pool: LocalPool::new(),
        }
    }

    pub fn runtime(&self) -> Runtime {
        Runtime::new(self.env.clone(), self.pool.spawner())
    }

    /// Append a laid-out element.
    pub fn add(&mut self, parent: ElementId, tag: Tag) -> ElementId {
        let id = self.doc.append(parent, tag).unwrap();
        self.doc
            .set_layout(id, Layout::from_rect(Rect::new(0.0, 0.0, 120.0, 24.0)));
        id
    }

    /// Give every element created by the engine a box, except the zero-size
    /// focus sentinels.
    pub fn layout(&mut self) {
        let body = self.doc.body();
        let ids: Vec<_> = self.doc.descendants(body).collect();
        for id in ids {
            let no_box = self.doc.element(id).unwrap().layout() == &Layout::default();
            if no_box && !self.doc.has_class(id, CLASS_FOCUS_TRAP) {
                self.doc
                    .set_layout(id, Layout::from_rect(Rect::new(0.0, 0.0, 400.0, 300.0)));
            }
        }
    }

    pub fn mount(&mut self, root: ElementId, options: DialogOptions) -> Dialog {
        let runtime = self.runtime();
        let dialog = Dialog::mount(&mut self.doc, root, options, runtime).unwrap();
        self.layout();
        dialog
    }

    pub fn dispatch(&mut self, dialog: &mut Dialog, event: Event) -> EventResponse {
        let response = dialog.handle_event(&mut self.doc, &event);
        self.pool.run_until_stalled();
        response
    }

    pub fn click(&mut self, dialog: &mut Dialog, target: ElementId) -> EventResponse {
        self.dispatch(dialog, Event::click(target))
    }

    pub fn key(&mut self, dialog: &mut Dialog, key: Key) -> EventResponse {
        let target = self.doc.active_element();
        self.dispatch(dialog, Event::key_down(target, key))
    }

    /// Press Tab like a browser: keydown first, then (unless prevented) move
    /// to the next tab stop and report the focusin.
    pub fn press_tab(&mut self, dialog: &mut Dialog, backward: bool) {
        let target = self.doc.active_element();
        let response = self.dispatch(dialog, Event::tab(target, backward));
        if response.default_prevented {
            return;
        }
        let from = self.doc.active_element();
        if let Some(next) = self.doc.sequential_focus_target(from, backward) {
            if self.doc.focus(next) {
                self.dispatch(dialog, Event::focus_in(next));
            }
        }
    }

    /// Move the clock, fire due completions, and run hooks.
    pub fn advance(&mut self, dialog: &mut Dialog, by: Duration) -> bool {
        self.env.advance(by);
        let settled = dialog.tick(&mut self.doc);
        self.pool.run_until_stalled();
        settled
    }

    /// Run hooks and report the outcome if the transition has resolved.
    pub fn poll(&mut self, transition: &mut Transition) -> Option<TransitionOutcome> {
        self.pool.run_until_stalled();
        transition.now_or_never()
    }

    pub fn active(&self) -> Option<ElementId> {
        self.doc.active_element()
    }
}

/// A page with an in-place dialog between two outside controls.
pub struct InPlacePage {
    pub host: Host,
    pub before: ElementId,
    pub root: ElementId,
    pub controls: Vec<ElementId>,
    pub after: ElementId,
}

pub fn in_place_page(count: usize) -> InPlacePage {
    let mut host = Host::new();
    let body = host.doc.body();
    let before = host.add(body, Tag::Button);
    let root = host.add(body, Tag::Div);
    let heading = host.add(root, Tag::Heading(2));
    host.doc.set_text(heading, "Confirm");
    let controls = (0..count).map(|_| host.add(root, Tag::Button)).collect();
    let after = host.add(body, Tag::Input);
    InPlacePage {
        host,
        before,
        root,
        controls,
        after,
    }
}

/// A page with a wrapped dialog: an inner opener and a content region
/// holding a heading, an input, and a button.
pub struct WrappedPage {
    pub host: Host,
    pub before: ElementId,
    pub root: ElementId,
    pub opener: ElementId,
    pub content: ElementId,
    pub input: ElementId,
    pub ok: ElementId,
    pub after: ElementId,
}

pub fn wrapped_page() -> WrappedPage {
    let mut host = Host::new();
    let body = host.doc.body();
    let before = host.add(body, Tag::Button);
    let root = host.add(body, Tag::Custom("veil-dialog".into()));
    let opener = host.add(root, Tag::Button);
    host.doc.set_attribute(opener, "slot", "button");
    let content = host.add(root, Tag::Div);
    host.doc.set_attribute(content, "slot", "modal");
    let heading = host.add(content, Tag::Heading(2));
    host.doc.set_text(heading, "Subscribe");
    let input = host.add(content, Tag::Input);
    let ok = host.add(content, Tag::Button);
    let after = host.add(body, Tag::Input);
    WrappedPage {
        host,
        before,
        root,
        opener,
        content,
        input,
        ok,
        after,
    }
}

/// Captures the level of every event emitted while installed.
#[derive(Clone, Default)]
pub struct LevelCapture {
    pub events: Arc<Mutex<Vec<(Level, String)>>>,
}

struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for LevelCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), message));
    }
}

impl LevelCapture {
    /// Run `f` with this capture installed as the thread's subscriber.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn count(&self, level: Level) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}
