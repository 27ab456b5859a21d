// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrapped dialog basics.
//!
//! Options come from JSON. The engine builds overlay chrome around the
//! `slot="modal"` content; focus is kept inside by sentinels, the backdrop
//! closes the dialog, and the page scroll is locked while it is open.
//!
//! Run:
//! - `cargo run -p veil_demos --example wrapped_basics`

use std::rc::Rc;

use futures::executor::LocalPool;
use veil_demos::{browser_tab, describe, print_focus, stack_layout};
use veil_dialog::{Dialog, DialogOptions, ManualEnvironment, Runtime, TransitionOutcome};
use veil_focus::scan::focusable_elements;
use veil_tree::{Document, Event, Tag};

const OPTIONS: &str = r#"{ "mode": "wrapped", "animation_duration": { "secs": 0, "nanos": 180000000 } }"#;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut doc = Document::new();
    doc.set_viewport(1280.0, 1265.0);
    let body = doc.body();
    let root = doc.append(body, Tag::Custom("veil-dialog".into())).unwrap();
    doc.set_attribute(root, "close", "Dismiss");
    let opener = doc.append(root, Tag::Button).unwrap();
    doc.set_attribute(opener, "slot", "button");
    doc.set_text(opener, "Newsletter");
    let content = doc.append(root, Tag::Div).unwrap();
    doc.set_attribute(content, "slot", "modal");
    let heading = doc.append(content, Tag::Heading(2)).unwrap();
    doc.set_text(heading, "Subscribe");
    let email = doc.append(content, Tag::Input).unwrap();
    doc.set_attribute(email, "autofocus", "");
    let sign_up = doc.append(content, Tag::Button).unwrap();
    doc.set_text(sign_up, "Sign up");

    let options: DialogOptions = serde_json::from_str(OPTIONS).unwrap();
    let mut pool = LocalPool::new();
    let env = Rc::new(ManualEnvironment::new());
    let runtime = Runtime::new(env.clone(), pool.spawner());
    let mut dialog = Dialog::mount(&mut doc, root, options, runtime).unwrap();
    stack_layout(&mut doc);
    println!("mounted: {}", describe(&doc, dialog.container()));
    tracing::info!(
        tab_stops = focusable_elements(&doc, dialog.container()).len(),
        duration = ?dialog.options().animation_duration,
        "wrapped dialog ready"
    );

    println!("click \"Newsletter\"");
    dialog.handle_event(&mut doc, &Event::click(opener));
    let html = doc.document_element();
    println!(
        "  state: {:?}, page overflow: {:?}, padding: {:?}",
        dialog.state(),
        doc.style(html, "overflow"),
        doc.style(html, "padding-right")
    );
    env.advance(options_duration(&dialog));
    dialog.tick(&mut doc);
    pool.run_until_stalled();
    println!("  state: {:?}", dialog.state());
    print_focus(&doc);

    for _ in 0..3 {
        println!("Tab");
        let tab = Event::tab(doc.active_element(), false);
        let response = dialog.handle_event(&mut doc, &tab);
        if let Some(landed) = browser_tab(&mut doc, response.default_prevented, false) {
            dialog.handle_event(&mut doc, &Event::focus_in(landed));
        }
        print_focus(&doc);
    }

    println!("click backdrop");
    let overlay = dialog.overlay().unwrap();
    dialog.handle_event(&mut doc, &Event::click(overlay));
    let mut hidden = dialog.hide(&mut doc);
    env.advance(options_duration(&dialog));
    dialog.tick(&mut doc);
    let outcome: TransitionOutcome = pool.run_until(&mut hidden);
    println!("  state: {:?} (second hide joined the first: {outcome:?})", dialog.state());
    println!("  page overflow: {:?}", doc.style(html, "overflow"));
    print_focus(&doc);
}

fn options_duration(dialog: &Dialog) -> std::time::Duration {
    dialog.options().animation_duration
}
