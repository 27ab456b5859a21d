// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veil Dialog: an accessible modal dialog engine.
//!
//! A [`Dialog`] is mounted on an element of a [`veil_tree::Document`] and
//! drives it through `Hidden → Showing → Shown → Hiding → Hidden`. While it is
//! open, keyboard focus is trapped inside, Escape and backdrop clicks close
//! it (unless it is static), and the element focused before it opened gets
//! focus back when it closes.
//!
//! The engine is sans-IO. The host owns the document and
//! - lays out elements (see [`veil_tree::Layout`]),
//! - feeds input through [`Dialog::handle_event`] and honors
//!   [`EventResponse::default_prevented`],
//! - calls [`Dialog::tick`] once [`Dialog::next_deadline`] has passed,
//! - runs the executor behind the [`Runtime`] spawner so hooks complete.
//!
//! ## Mount modes
//! - [`MountMode::InPlace`]: the root is the dialog. Tab is cycled at the
//!   boundaries.
//! - [`MountMode::Wrapped`]: the engine builds overlay chrome around the
//!   `slot="modal"` content. Sentinels on either side bounce focus back in.
//!   See [`markup`] for the generated structure.
//!
//! ## Controls
//! Inside the root, elements marked [`markup::DATA_TOGGLE`],
//! [`markup::DATA_SHOW`] or [`markup::DATA_HIDE`] act on click and on
//! Enter/Space. [`Dialog::attach_opener`] wires up elements elsewhere.
//!
//! ## Minimal example
//! ```
//! use std::rc::Rc;
//!
//! use futures::executor::LocalPool;
//! use kurbo::Rect;
//! use veil_dialog::{Dialog, DialogOptions, ManualEnvironment, Runtime, TransitionOutcome, Visibility};
//! use veil_tree::{Document, Event, Key, Layout, Tag};
//!
//! let mut doc = Document::new();
//! let opener = doc.append(doc.body(), Tag::Button).unwrap();
//! let root = doc.append(doc.body(), Tag::Div).unwrap();
//! let ok = doc.append(root, Tag::Button).unwrap();
//! for id in [opener, root, ok] {
//!     doc.set_layout(id, Layout::from_rect(Rect::new(0.0, 0.0, 80.0, 24.0)));
//! }
//! doc.focus(opener);
//!
//! let mut pool = LocalPool::new();
//! let env = Rc::new(ManualEnvironment::new());
//! env.set_reduced_motion(true);
//! let runtime = Runtime::new(env, pool.spawner());
//! let mut dialog = Dialog::mount(&mut doc, root, DialogOptions::default(), runtime).unwrap();
//!
//! let shown = dialog.show(&mut doc);
//! assert_eq!(pool.run_until(shown), TransitionOutcome::Completed);
//! assert_eq!(doc.active_element(), Some(ok));
//!
//! dialog.handle_event(&mut doc, &Event::key_down(Some(ok), Key::Escape));
//! assert_eq!(dialog.state(), Visibility::Hidden);
//! assert_eq!(doc.active_element(), Some(opener));
//! ```

mod broker;
pub mod config;
mod dialog;
mod env;
mod error;
mod hooks;
mod machine;
pub mod markup;
mod timer;
mod transition;

pub use config::{DialogConfig, DialogOptions, MountMode};
pub use dialog::{Dialog, EventResponse, ImplicitClose};
pub use env::{Environment, ManualEnvironment, Runtime, SystemEnvironment};
pub use error::{ConfigError, HookError, MountError};
pub use hooks::{Hook, HookFuture, HookRegistry, HookReport, hook};
pub use machine::{HookPhase, Trigger, Visibility};
pub use timer::{TimerHandle, TimerSlot};
pub use transition::{Transition, TransitionOutcome};
