// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-place dialog basics.
//!
//! Mount a confirmation dialog on an existing element, open it from an
//! external button, Tab around inside it, and close it with Escape. The
//! animation runs on the real clock, so the demo sleeps until each deadline.
//!
//! Run:
//! - `cargo run -p veil_demos --example in_place_basics`
//! - `RUST_LOG=veil_dialog=trace cargo run -p veil_demos --example in_place_basics`

use std::rc::Rc;
use std::thread;

use futures::executor::LocalPool;
use tracing_subscriber::EnvFilter;
use veil_demos::{browser_tab, describe, print_focus, stack_layout};
use veil_dialog::{Dialog, DialogOptions, Environment, HookPhase, Runtime, SystemEnvironment, hook};
use veil_tree::{Document, Event, Key, Tag};

fn settle(dialog: &mut Dialog, doc: &mut Document, env: &SystemEnvironment, pool: &mut LocalPool) {
    while let Some(deadline) = dialog.next_deadline() {
        thread::sleep(deadline.saturating_sub(env.now()));
        dialog.tick(doc);
    }
    pool.run_until_stalled();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("veil_dialog=debug")),
        )
        .init();

    let mut doc = Document::new();
    let body = doc.body();
    let delete = doc.append(body, Tag::Button).unwrap();
    doc.set_text(delete, "Delete file");

    let root = doc.append(body, Tag::Div).unwrap();
    let heading = doc.append(root, Tag::Heading(2)).unwrap();
    doc.set_text(heading, "Delete report.pdf?");
    let cancel = doc.append(root, Tag::Button).unwrap();
    doc.set_text(cancel, "Cancel");
    doc.set_attribute(cancel, "data-dialog-hide", "");
    let confirm = doc.append(root, Tag::Button).unwrap();
    doc.set_text(confirm, "Delete");
    stack_layout(&mut doc);

    let mut pool = LocalPool::new();
    let env = Rc::new(SystemEnvironment::new());
    let runtime = Runtime::new(env.clone(), pool.spawner());
    let mut dialog = Dialog::mount(&mut doc, root, DialogOptions::default(), runtime).unwrap();
    dialog.attach_opener(&mut doc, delete);
    dialog.on(
        HookPhase::Show,
        hook(|| async {
            println!("  (show hook) dialog is on screen");
            Ok(())
        }),
    );
    println!("mounted: {}", describe(&doc, dialog.container()));

    doc.focus(delete);
    println!("click \"Delete file\"");
    let response = dialog.handle_event(&mut doc, &Event::click(delete));
    println!("  default prevented: {}", response.default_prevented);
    settle(&mut dialog, &mut doc, &env, &mut pool);
    print_focus(&doc);

    for _ in 0..3 {
        println!("Tab");
        let tab = Event::tab(doc.active_element(), false);
        let response = dialog.handle_event(&mut doc, &tab);
        browser_tab(&mut doc, response.default_prevented, false);
        print_focus(&doc);
    }

    println!("Escape");
    let escape = Event::key_down(doc.active_element(), Key::Escape);
    dialog.handle_event(&mut doc, &escape);
    settle(&mut dialog, &mut doc, &env, &mut pool);
    println!("  state: {:?}", dialog.state());
    print_focus(&doc);

    dialog.destroy(&mut doc);
    println!("destroyed; listeners left: {}", doc.listener_count());
}
