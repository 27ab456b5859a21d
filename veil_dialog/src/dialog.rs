// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dialog engine.

use core::mem;
use core::time::Duration;

use futures::channel::oneshot;
use futures::task::LocalSpawnExt;
use veil_focus::FocusMemory;
use veil_focus::trap::{FocusGuard, Sentinels, cycle_tab, initial_focus_target};
use veil_tree::{Document, ElementId, Event, Key, Modifiers};

use crate::broker::{ControlSubscription, GlobalSubscription, Handler};
use crate::config::{ATTR_ACTIVE, ConfigChange, DialogConfig, DialogOptions, MountMode};
use crate::env::Runtime;
use crate::error::{ConfigError, MountError};
use crate::hooks::{Hook, HookRegistry};
use crate::machine::{HookPhase, Visibility};
use crate::markup::{self, Parts};
use crate::timer::TimerSlot;
use crate::transition::{Transition, TransitionOutcome};

/// A dismissal the user did not ask for with a control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImplicitClose {
    /// The Escape key.
    Escape,
    /// A click on the backdrop overlay itself.
    Backdrop,
}

/// What the dialog did with an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The host must suppress the event's default action.
    pub default_prevented: bool,
    /// Focus was moved to this element by the focus trap.
    pub redirected_to: Option<ElementId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ControlRole {
    Toggle,
    Show,
    Hide,
}

impl ControlRole {
    fn of(doc: &Document, el: ElementId) -> Option<Self> {
        if doc.has_attribute(el, markup::DATA_HIDE) {
            Some(Self::Hide)
        } else if doc.has_attribute(el, markup::DATA_SHOW) {
            Some(Self::Show)
        } else if doc.has_attribute(el, markup::DATA_TOGGLE)
            || doc.attribute(el, "slot") == Some(markup::SLOT_OPENER)
        {
            Some(Self::Toggle)
        } else {
            None
        }
    }
}

fn presentation_flag(phase: HookPhase) -> &'static str {
    match phase {
        HookPhase::Show => markup::FLAG_SHOWING,
        HookPhase::Hide => markup::FLAG_HIDING,
    }
}

/// An accessible modal dialog mounted on a [`Document`].
///
/// The dialog never owns the document. Every operation that touches the page
/// takes it as an argument, and the host feeds events in through
/// [`handle_event`](Self::handle_event) and time through [`tick`](Self::tick).
#[derive(Debug)]
pub struct Dialog {
    parts: Parts,
    options: DialogOptions,
    config: DialogConfig,
    runtime: Runtime,
    state: Visibility,
    memory: FocusMemory,
    hooks: HookRegistry,
    timer: TimerSlot<HookPhase>,
    waiters: Vec<oneshot::Sender<()>>,
    global: Option<GlobalSubscription>,
    controls: Option<ControlSubscription>,
    diagnostics: Vec<ConfigError>,
    scroll_locked: bool,
    destroyed: bool,
}

impl Dialog {
    /// Mount a dialog on `root`.
    ///
    /// Reads the reflected attributes, prepares the markup for
    /// `options.mode`, and registers the control listeners. A root that
    /// already says `active="true"` starts showing immediately.
    ///
    /// Configuration problems (such as a wrapped dialog without content) are
    /// logged and kept in [`diagnostics`](Self::diagnostics); only a stale
    /// root or a tree failure is an error.
    pub fn mount(
        doc: &mut Document,
        root: ElementId,
        options: DialogOptions,
        runtime: Runtime,
    ) -> Result<Self, MountError> {
        if !doc.is_alive(root) {
            return Err(MountError::StaleRoot(root));
        }
        let config = DialogConfig::from_element(doc, root);
        let (parts, diagnostics) = markup::build(doc, root, options.mode, &config.close_label)?;
        let controls = ControlSubscription::acquire(doc, &parts);
        let start_active = config.active;
        let mut dialog = Self {
            parts,
            options,
            config,
            runtime,
            state: Visibility::Hidden,
            memory: FocusMemory::new(),
            hooks: HookRegistry::new(),
            timer: TimerSlot::new(),
            waiters: Vec::new(),
            global: None,
            controls: Some(controls),
            diagnostics,
            scroll_locked: false,
            destroyed: false,
        };
        tracing::debug!(?root, mode = ?dialog.options.mode, "dialog mounted");
        if start_active {
            drop(dialog.show(doc));
        } else {
            dialog.reflect_active(doc);
        }
        Ok(dialog)
    }

    /// Current visibility.
    pub fn state(&self) -> Visibility {
        self.state
    }

    /// `Showing` or `Shown`.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// True once [`destroy`](Self::destroy) ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The reflected attribute snapshot.
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Construction-time options.
    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    /// The element the dialog was mounted on.
    pub fn root(&self) -> ElementId {
        self.parts.root
    }

    /// The element carrying `role="dialog"`.
    pub fn container(&self) -> ElementId {
        self.parts.container
    }

    /// The backdrop overlay (wrapped mode).
    pub fn overlay(&self) -> Option<ElementId> {
        self.parts.overlay
    }

    /// The generated close button (wrapped mode).
    pub fn close_button(&self) -> Option<ElementId> {
        self.parts.close
    }

    /// The focus sentinels (wrapped mode).
    pub fn sentinels(&self) -> Option<Sentinels> {
        self.parts.sentinels
    }

    /// The author content region: the `slot="modal"` element in wrapped
    /// mode, the root itself in place.
    pub fn content(&self) -> Option<ElementId> {
        self.parts.content
    }

    /// The element that carries `hidden` and the animation flags.
    pub fn presentation(&self) -> ElementId {
        self.parts.presentation
    }

    /// Non-fatal problems found at mount.
    pub fn diagnostics(&self) -> &[ConfigError] {
        &self.diagnostics
    }

    /// The element focus will return to when the dialog hides.
    pub fn previously_focused(&self) -> Option<ElementId> {
        self.memory.previous()
    }

    /// When the pending animation completes; the host should call
    /// [`tick`](Self::tick) at or after this time.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// Whether the document-level keydown/focusin listeners are attached.
    pub fn has_global_listeners(&self) -> bool {
        self.global.is_some()
    }

    /// Number of hooks registered for `phase`.
    pub fn hook_count(&self, phase: HookPhase) -> usize {
        self.hooks.len(phase)
    }

    /// Register a lifecycle hook.
    pub fn on(&mut self, phase: HookPhase, hook: Hook) {
        self.hooks.add(phase, hook);
    }

    /// Remove the first registration of `hook`. Returns false if absent.
    pub fn off(&mut self, phase: HookPhase, hook: &Hook) -> bool {
        self.hooks.remove(phase, hook)
    }

    /// Whether an implicit dismissal would be honored right now.
    ///
    /// Static dialogs never close implicitly, and neither does a dialog that
    /// has not finished showing.
    pub fn allows_implicit_close(&self, kind: ImplicitClose) -> bool {
        let allowed = !self.destroyed && !self.config.is_static && self.state == Visibility::Shown;
        tracing::trace!(?kind, allowed, "implicit close");
        allowed
    }

    /// Start showing.
    ///
    /// Resolves to [`TransitionOutcome::Completed`] once the dialog is `Shown`
    /// and every show hook has finished. A second show while one is in
    /// flight joins it. A show while already shown, while hiding, or after
    /// destroy is [`Ignored`](TransitionOutcome::Ignored).
    pub fn show(&mut self, doc: &mut Document) -> Transition {
        self.request(doc, HookPhase::Show)
    }

    /// Start hiding. The mirror image of [`show`](Self::show).
    pub fn hide(&mut self, doc: &mut Document) -> Transition {
        self.request(doc, HookPhase::Hide)
    }

    fn request(&mut self, doc: &mut Document, phase: HookPhase) -> Transition {
        if self.destroyed {
            tracing::trace!(?phase, "request on destroyed dialog ignored");
            return Transition::ready(TransitionOutcome::Ignored);
        }
        if self.state.next(phase.trigger()).is_some() {
            let transition = self.enqueue();
            match phase {
                HookPhase::Show => self.begin_show(doc),
                HookPhase::Hide => self.begin_hide(doc),
            }
            transition
        } else if self.state == phase.in_flight() {
            tracing::trace!(?phase, "request joined in-flight transition");
            self.enqueue()
        } else {
            tracing::trace!(?phase, state = ?self.state, "request ignored");
            Transition::ready(TransitionOutcome::Ignored)
        }
    }

    fn enqueue(&mut self) -> Transition {
        let (tx, rx) = oneshot::channel();
        self.waiters.push(tx);
        Transition::waiting(rx)
    }

    fn begin_show(&mut self, doc: &mut Document) {
        self.state = Visibility::Showing;
        tracing::debug!(root = ?self.parts.root, "dialog showing");
        self.memory.capture(doc);
        self.reflect_active(doc);
        doc.remove_attribute(self.parts.presentation, "hidden");
        if self.options.mode == MountMode::Wrapped && self.options.lock_scroll {
            markup::lock_page_scroll(doc);
            self.scroll_locked = true;
        }
        if self.global.is_none() {
            self.global = Some(GlobalSubscription::acquire(doc));
        }
        let target = initial_focus_target(doc, self.parts.container);
        doc.focus(target);
        self.start_animation(doc, HookPhase::Show);
    }

    fn begin_hide(&mut self, doc: &mut Document) {
        self.state = Visibility::Hiding;
        tracing::debug!(root = ?self.parts.root, "dialog hiding");
        self.reflect_active(doc);
        self.start_animation(doc, HookPhase::Hide);
    }

    fn motion_allowed(&self) -> bool {
        self.config.animated
            && !self.options.animation_duration.is_zero()
            && !self.runtime.env.prefers_reduced_motion()
    }

    fn start_animation(&mut self, doc: &mut Document, phase: HookPhase) {
        if !self.motion_allowed() {
            self.settle(doc, phase);
            return;
        }
        doc.set_attribute(self.parts.presentation, presentation_flag(phase), "");
        let deadline = self
            .runtime
            .env
            .now()
            .saturating_add(self.options.animation_duration);
        if let (_, Some(stale)) = self.timer.arm(deadline, phase) {
            tracing::trace!(?stale, "superseded pending completion");
        }
    }

    /// Fire the pending animation completion if it is due.
    ///
    /// Returns true if the dialog settled.
    pub fn tick(&mut self, doc: &mut Document) -> bool {
        match self.timer.take_due(self.runtime.env.now()) {
            Some(phase) => {
                self.settle(doc, phase);
                true
            }
            None => false,
        }
    }

    fn settle(&mut self, doc: &mut Document, phase: HookPhase) {
        self.timer.cancel();
        doc.remove_attribute(self.parts.presentation, presentation_flag(phase));
        if phase == HookPhase::Hide {
            doc.set_attribute(self.parts.presentation, "hidden", "");
            if mem::take(&mut self.scroll_locked) {
                markup::unlock_page_scroll(doc);
            }
            if let Some(global) = self.global.take() {
                global.release(doc);
            }
            if self.memory.restore(doc).is_none()
                && doc
                    .active_element()
                    .is_some_and(|active| doc.contains(self.parts.root, active))
            {
                doc.blur();
            }
        }
        self.state = phase.settled();
        tracing::debug!(root = ?self.parts.root, state = ?self.state, "dialog settled");
        self.run_hooks(phase);
    }

    fn run_hooks(&mut self, phase: HookPhase) {
        let hooks = self.hooks.invoke(phase);
        let waiters = mem::take(&mut self.waiters);
        let root = self.parts.root;
        let task = async move {
            let report = hooks.await;
            tracing::debug!(
                ?root,
                ?phase,
                invoked = report.invoked,
                failed = report.failed,
                "dialog hooks finished"
            );
            for waiter in waiters {
                // The caller may have dropped its transition.
                waiter.send(()).ok();
            }
        };
        if let Err(error) = self.runtime.spawner.spawn_local(task) {
            tracing::warn!(%error, ?phase, "could not schedule dialog hooks");
        }
    }

    fn reflect_active(&mut self, doc: &mut Document) {
        let open = self.state.is_open();
        self.config.active = open;
        doc.set_attribute(self.parts.root, ATTR_ACTIVE, if open { "true" } else { "false" });
    }

    /// Re-read the reflected attributes after the host changed them.
    ///
    /// A flipped `active` shows or hides; a new `close` label is applied to
    /// the close button. When the request is not honored, `active` is
    /// rewritten to match the actual state.
    pub fn attribute_changed(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        let newer = DialogConfig::from_element(doc, self.parts.root);
        let changes = self.config.changes_to(&newer);
        self.config = newer;
        for change in changes {
            tracing::trace!(?change, "dialog attribute changed");
            match change {
                ConfigChange::Active(true) => drop(self.show(doc)),
                ConfigChange::Active(false) => drop(self.hide(doc)),
                ConfigChange::CloseLabel(label) => {
                    if let Some(close) = self.parts.close {
                        markup::apply_close_label(doc, close, &label);
                    }
                }
                ConfigChange::Animated(_) | ConfigChange::Static(_) => {}
            }
        }
        self.reflect_active(doc);
    }

    /// Make an element outside the root toggle this dialog.
    ///
    /// Returns false if the element is stale, inside the root (already
    /// covered), already attached, or the dialog is destroyed.
    pub fn attach_opener(&mut self, doc: &mut Document, opener: ElementId) -> bool {
        if self.destroyed || !doc.is_alive(opener) || doc.contains(self.parts.root, opener) {
            return false;
        }
        self.controls
            .as_mut()
            .is_some_and(|controls| controls.add_opener(doc, opener))
    }

    fn guard(&self) -> FocusGuard {
        FocusGuard {
            scope: self.parts.scope,
            container: self.parts.container,
            sentinels: self.parts.sentinels,
        }
    }

    fn handler_for(&self, listener: veil_tree::ListenerId) -> Option<Handler> {
        self.global
            .as_ref()
            .and_then(|g| g.handler(listener))
            .or_else(|| self.controls.as_ref().and_then(|c| c.handler(listener)))
    }

    /// Deliver an input event.
    ///
    /// The event is routed through the document's listeners; this dialog
    /// runs the handlers it owns in propagation order. Listeners removed by
    /// an earlier handler in the same dispatch are skipped.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> EventResponse {
        let mut response = EventResponse::default();
        if self.destroyed {
            return response;
        }
        for dispatch in doc.route(event.kind(), event.target()) {
            let Some(handler) = self.handler_for(dispatch.listener) else {
                continue;
            };
            match handler {
                Handler::DocumentKeyDown => self.on_document_key(doc, event, &mut response),
                Handler::DocumentFocusIn => {
                    if let Event::FocusIn { target } = *event {
                        if let Some(to) = self.guard().apply(doc, target) {
                            response.redirected_to = Some(to);
                        }
                    }
                }
                Handler::ControlClick | Handler::ControlKeyDown => {
                    self.on_control(doc, event, &mut response);
                }
                Handler::OverlayClick => {
                    if event.target() == self.parts.overlay
                        && self.allows_implicit_close(ImplicitClose::Backdrop)
                    {
                        drop(self.hide(doc));
                    }
                }
            }
        }
        response
    }

    fn on_document_key(&mut self, doc: &mut Document, event: &Event, response: &mut EventResponse) {
        let Event::KeyDown { key, modifiers, .. } = *event else {
            return;
        };
        match key {
            Key::Escape => {
                if self.allows_implicit_close(ImplicitClose::Escape) {
                    drop(self.hide(doc));
                }
            }
            Key::Tab => self.on_tab(doc, modifiers.contains(Modifiers::SHIFT), response),
            _ => {}
        }
    }

    fn on_tab(&mut self, doc: &mut Document, backward: bool, response: &mut EventResponse) {
        if !self.state.is_open() {
            return;
        }
        if self.parts.sentinels.is_none() {
            if cycle_tab(doc, self.parts.container, backward).prevents_default() {
                response.default_prevented = true;
            }
            return;
        }
        // Sentinel mode: let the browser move focus, but pull it back in
        // first if it somehow escaped.
        let landed = doc.active_element().unwrap_or_else(|| doc.body());
        if let Some(to) = self.guard().apply(doc, landed) {
            response.redirected_to = Some(to);
        }
    }

    fn control_at(&self, doc: &Document, target: ElementId) -> Option<(ElementId, ControlRole)> {
        let root = self.parts.root;
        let openers = self.controls.as_ref().map(|c| c.openers()).unwrap_or_default();
        let marked = doc
            .closest(target, |d, el| ControlRole::of(d, el).is_some())
            .filter(|&el| doc.contains(root, el) || openers.contains(&el));
        if let Some(el) = marked {
            return ControlRole::of(doc, el).map(|role| (el, role));
        }
        openers
            .iter()
            .copied()
            .find(|&opener| doc.contains(opener, target))
            .map(|opener| (opener, ControlRole::Toggle))
    }

    fn on_control(&mut self, doc: &mut Document, event: &Event, response: &mut EventResponse) {
        let (target, key) = match *event {
            Event::Click { target } => (target, None),
            Event::KeyDown {
                target: Some(target),
                key,
                ..
            } => (target, Some(key)),
            _ => return,
        };
        if key.is_some_and(|k| !matches!(k, Key::Enter | Key::Space)) {
            return;
        }
        let Some((control, role)) = self.control_at(doc, target) else {
            return;
        };
        if doc.has_attribute(control, "disabled") {
            tracing::trace!(?control, "disabled control ignored");
            return;
        }
        response.default_prevented = true;
        let transition = match role {
            ControlRole::Toggle if self.state.is_open() => self.hide(doc),
            ControlRole::Toggle | ControlRole::Show => self.show(doc),
            ControlRole::Hide => self.hide(doc),
        };
        drop(transition);
    }

    /// Tear down: detach every listener, cancel the pending completion,
    /// unlock page scroll, and drop all hooks.
    ///
    /// Transitions still pending resolve to
    /// [`Abandoned`](TransitionOutcome::Abandoned); later requests are
    /// ignored. Markup is left in place.
    pub fn destroy(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Some(global) = self.global.take() {
            global.release(doc);
        }
        if let Some(controls) = self.controls.take() {
            controls.release(doc);
        }
        if let Some(phase) = self.timer.cancel() {
            tracing::trace!(?phase, "pending completion cancelled");
        }
        if mem::take(&mut self.scroll_locked) {
            markup::unlock_page_scroll(doc);
        }
        self.hooks.clear();
        self.waiters.clear();
        self.memory.clear();
        tracing::debug!(root = ?self.parts.root, "dialog destroyed");
    }
}
