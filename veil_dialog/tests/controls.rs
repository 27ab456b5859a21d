// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Openers, close controls, Escape, and backdrop dismissal.

mod common;

use common::{ANIMATION, in_place_page, wrapped_page};
use veil_dialog::markup::DATA_HIDE;
use veil_dialog::{Dialog, DialogOptions, EventResponse, ImplicitClose, Visibility};
use veil_tree::{Event, Key, Tag};

#[test]
fn external_opener_toggles() {
    let mut page = in_place_page(1);
    page.host.env.set_reduced_motion(true);
    let mut dialog = page.host.mount(page.root, DialogOptions::default());
    let host = &mut page.host;
    assert!(dialog.attach_opener(&mut host.doc, page.before));
    assert!(!dialog.attach_opener(&mut host.doc, page.before));
    assert!(!dialog.attach_opener(&mut host.doc, page.controls[0]));

    let response = host.click(&mut dialog, page.before);
    assert!(response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Shown);

    let response = host.click(&mut dialog, page.before);
    assert!(response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Hidden);
}

#[test]
fn activation_keys_only() {
    let mut page = in_place_page(1);
    page.host.env.set_reduced_motion(true);
    let mut dialog = page.host.mount(page.root, DialogOptions::default());
    let host = &mut page.host;
    dialog.attach_opener(&mut host.doc, page.before);

    let response = host.dispatch(&mut dialog, Event::key_down(Some(page.before), Key::Character('x')));
    assert!(!response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Hidden);

    let response = host.dispatch(&mut dialog, Event::key_down(Some(page.before), Key::Enter));
    assert!(response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Shown);

    drop(dialog.hide(&mut host.doc));
    let response = host.dispatch(&mut dialog, Event::key_down(Some(page.before), Key::Space));
    assert!(response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Shown);
}

#[test]
fn disabled_controls_are_inert() {
    let mut page = in_place_page(1);
    page.host.env.set_reduced_motion(true);
    let mut dialog = page.host.mount(page.root, DialogOptions::default());
    let host = &mut page.host;
    dialog.attach_opener(&mut host.doc, page.before);
    host.doc.set_attribute(page.before, "disabled", "");
    let response = host.click(&mut dialog, page.before);
    assert!(!response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Hidden);
}

#[test]
fn clicks_inside_a_control_count() {
    let mut page = in_place_page(1);
    page.host.env.set_reduced_motion(true);
    let host = &mut page.host;
    let closer = host.add(page.root, Tag::Button);
    host.doc.set_attribute(closer, DATA_HIDE, "");
    let icon = host.add(closer, Tag::Span);
    let mut dialog = host.mount(page.root, DialogOptions::default());
    drop(dialog.show(&mut host.doc));

    let response = host.click(&mut dialog, icon);
    assert!(response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Hidden);
}

#[test]
fn unmarked_clicks_do_nothing() {
    let mut page = in_place_page(2);
    page.host.env.set_reduced_motion(true);
    let mut dialog = page.host.mount(page.root, DialogOptions::default());
    let host = &mut page.host;
    drop(dialog.show(&mut host.doc));
    let response = host.click(&mut dialog, page.controls[1]);
    assert!(!response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Shown);
}

#[test]
fn escape_closes_unless_static() {
    let mut page = in_place_page(1);
    page.host.env.set_reduced_motion(true);
    let mut dialog = page.host.mount(page.root, DialogOptions::default());
    let host = &mut page.host;
    drop(dialog.show(&mut host.doc));
    host.key(&mut dialog, Key::Escape);
    assert_eq!(dialog.state(), Visibility::Hidden);

    host.doc.set_attribute(page.root, "static", "true");
    dialog.attribute_changed(&mut host.doc);
    drop(dialog.show(&mut host.doc));
    assert!(!dialog.allows_implicit_close(ImplicitClose::Escape));
    host.key(&mut dialog, Key::Escape);
    assert_eq!(dialog.state(), Visibility::Shown);

    drop(dialog.hide(&mut host.doc));
    assert_eq!(dialog.state(), Visibility::Hidden);
}

#[test]
fn escape_waits_for_show_to_finish() {
    let mut page = in_place_page(1);
    let mut dialog = page.host.mount(page.root, DialogOptions::default());
    let host = &mut page.host;
    drop(dialog.show(&mut host.doc));
    host.key(&mut dialog, Key::Escape);
    assert_eq!(dialog.state(), Visibility::Showing);
    host.advance(&mut dialog, ANIMATION);
    host.key(&mut dialog, Key::Escape);
    assert_eq!(dialog.state(), Visibility::Hiding);
    host.advance(&mut dialog, ANIMATION);
    assert_eq!(dialog.state(), Visibility::Hidden);
}

fn shown_wrapped() -> (common::WrappedPage, Dialog) {
    let mut page = wrapped_page();
    page.host.env.set_reduced_motion(true);
    let mut dialog = page.host.mount(page.root, DialogOptions::wrapped());
    drop(dialog.show(&mut page.host.doc));
    (page, dialog)
}

#[test]
fn backdrop_click_closes() {
    let (mut page, mut dialog) = shown_wrapped();
    let overlay = dialog.overlay().unwrap();
    let container = dialog.container();
    let host = &mut page.host;

    host.click(&mut dialog, container);
    assert_eq!(dialog.state(), Visibility::Shown);
    host.click(&mut dialog, page.input);
    assert_eq!(dialog.state(), Visibility::Shown);

    let response = host.click(&mut dialog, overlay);
    assert!(!response.default_prevented);
    assert_eq!(dialog.state(), Visibility::Hidden);
}

#[test]
fn static_dialog_ignores_backdrop() {
    let mut page = wrapped_page();
    page.host.env.set_reduced_motion(true);
    page.host.doc.set_attribute(page.root, "static", "true");
    let mut dialog = page.host.mount(page.root, DialogOptions::wrapped());
    let host = &mut page.host;
    drop(dialog.show(&mut host.doc));
    let overlay = dialog.overlay().unwrap();
    host.click(&mut dialog, overlay);
    host.key(&mut dialog, Key::Escape);
    assert_eq!(dialog.state(), Visibility::Shown);

    let close = dialog.close_button().unwrap();
    host.click(&mut dialog, close);
    assert_eq!(dialog.state(), Visibility::Hidden);
}

#[test]
fn backdrop_ignored_while_animating() {
    let mut page = wrapped_page();
    let mut dialog = page.host.mount(page.root, DialogOptions::wrapped());
    let host = &mut page.host;
    drop(dialog.show(&mut host.doc));
    let overlay = dialog.overlay().unwrap();
    host.click(&mut dialog, overlay);
    assert_eq!(dialog.state(), Visibility::Showing);
}

#[test]
fn close_button_follows_close_attribute() {
    let (mut page, mut dialog) = shown_wrapped();
    let host = &mut page.host;
    let close = dialog.close_button().unwrap();
    assert_eq!(host.doc.attribute(close, "aria-label"), Some("Close"));
    assert_eq!(host.doc.attribute(close, "title"), Some("Close"));

    host.doc.set_attribute(page.root, "close", "Fermer");
    dialog.attribute_changed(&mut host.doc);
    assert_eq!(host.doc.attribute(close, "aria-label"), Some("Fermer"));
    assert_eq!(host.doc.attribute(close, "title"), Some("Fermer"));
    assert_eq!(dialog.state(), Visibility::Shown);
}

#[test]
fn wrapped_markup_is_labelled() {
    let (page, dialog) = shown_wrapped();
    let doc = &page.host.doc;
    let container = dialog.container();
    assert_eq!(doc.attribute(container, "role"), Some("dialog"));
    assert_eq!(doc.attribute(container, "aria-modal"), Some("true"));
    assert_eq!(doc.attribute(container, "aria-label"), Some("Subscribe"));
    assert_eq!(dialog.content(), Some(page.content));
    assert!(doc.contains(container, page.content));
}

#[test]
fn show_only_opener_never_closes() {
    let mut page = in_place_page(1);
    page.host.env.set_reduced_motion(true);
    let mut dialog = page.host.mount(page.root, DialogOptions::default());
    let host = &mut page.host;
    host.doc.set_attribute(page.after, "data-dialog-show", "");
    dialog.attach_opener(&mut host.doc, page.after);
    host.click(&mut dialog, page.after);
    assert_eq!(dialog.state(), Visibility::Shown);
    host.click(&mut dialog, page.after);
    assert_eq!(dialog.state(), Visibility::Shown);
}

#[test]
fn destroyed_dialog_ignores_input() {
    let (mut page, mut dialog) = shown_wrapped();
    let host = &mut page.host;
    dialog.destroy(&mut host.doc);
    assert_eq!(host.doc.listener_count(), 0);
    let overlay = dialog.overlay().unwrap();
    let response = host.click(&mut dialog, overlay);
    assert_eq!(response, EventResponse::default());
    host.key(&mut dialog, Key::Escape);
    assert_eq!(dialog.state(), Visibility::Shown);
    assert!(!dialog.attach_opener(&mut host.doc, page.before));
}
