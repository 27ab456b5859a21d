// Copyright 2025 the Veil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element arena: structure, attributes, layout, focus, and listeners.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Rect, Size};

use crate::listeners::ListenerRegistry;
use crate::{
    Dispatch, ElementId, EventKind, Layout, ListenerId, ListenerTarget, Tag, TreeError,
};

/// A single element: tag, attributes, inline style, text, layout and links.
#[derive(Clone, Debug)]
pub struct Element {
    tag: Tag,
    attributes: HashMap<String, String>,
    style: HashMap<String, String>,
    text: String,
    layout: Layout,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: HashMap::new(),
            style: HashMap::new(),
            text: String::new(),
            layout: Layout::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// The element kind.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The element's own text (not including descendants).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Host-computed layout, regardless of whether the element is rendered.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// A page of elements with a document element (`<html>`) and a body.
///
/// Structural mutations ([`append_child`](Self::append_child),
/// [`detach`](Self::detach), [`destroy`](Self::destroy)) return a
/// [`TreeError`] on misuse. Attribute, style, text and layout setters quietly
/// ignore stale handles, the way writes to a garbage element are unobservable.
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: ElementId,
    body: ElementId,
    active: Option<ElementId>,
    listeners: ListenerRegistry,
    viewport_width: f64,
    client_width: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing `<html><body></body></html>`.
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: ElementId::new(0, 1),
            body: ElementId::new(0, 1),
            active: None,
            listeners: ListenerRegistry::default(),
            viewport_width: 0.0,
            client_width: 0.0,
        };
        let root = doc.create_element(Tag::Html);
        let body = doc.create_element(Tag::Body);
        doc.link(root, body);
        doc.root = root;
        doc.body = body;
        doc
    }

    /// The document element.
    pub fn document_element(&self) -> ElementId {
        self.root
    }

    /// The body element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: Tag) -> ElementId {
        let element = Some(Element::new(tag));
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.element = element;
            ElementId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "documents never approach u32::MAX elements"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                element,
            });
            ElementId::new(idx, 1)
        }
    }

    /// Create an element and append it to `parent`.
    pub fn append(&mut self, parent: ElementId, tag: Tag) -> Result<ElementId, TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::StaleElement(parent));
        }
        let child = self.create_element(tag);
        self.link(parent, child);
        Ok(child)
    }

    /// Move `child` (and its subtree) to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), TreeError> {
        for id in [parent, child] {
            if !self.is_alive(id) {
                return Err(TreeError::StaleElement(id));
            }
        }
        if self.contains(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        self.unlink(child);
        self.link(parent, child);
        Ok(())
    }

    /// Remove `id` from its parent. The subtree stays alive but disconnected.
    ///
    /// If focus was inside the subtree it is dropped, as a browser does.
    pub fn detach(&mut self, id: ElementId) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleElement(id));
        }
        if id == self.root {
            return Err(TreeError::DocumentElement);
        }
        self.unlink(id);
        if self.active.is_some_and(|a| self.contains(id, a)) {
            self.active = None;
        }
        Ok(())
    }

    /// Detach and free `id` and its whole subtree, invalidating their handles
    /// and dropping every listener attached to them.
    pub fn destroy(&mut self, id: ElementId) -> Result<(), TreeError> {
        self.detach(id)?;
        let mut doomed: Vec<ElementId> = self.descendants(id).collect();
        doomed.push(id);
        for dead in doomed {
            self.listeners.remove_element(dead);
            let slot = &mut self.slots[dead.idx()];
            slot.element = None;
            self.free.push(dead.0);
        }
        Ok(())
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.slots
            .get(id.idx())
            .is_some_and(|s| s.generation == id.1 && s.element.is_some())
    }

    /// Returns true if `id` is alive and its ancestor chain reaches the document element.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.is_alive(id) && self.ancestors_inclusive(id).last() == Some(self.root)
    }

    /// Borrow an element.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.1)
            .and_then(|s| s.element.as_ref())
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.1)
            .and_then(|s| s.element.as_mut())
    }

    /// The element kind.
    pub fn tag(&self, id: ElementId) -> Option<&Tag> {
        self.element(id).map(Element::tag)
    }

    /// Parent of `id`, if attached.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|e| e.parent)
    }

    /// Children of `id` in order; empty for stale handles.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.is_alive(ancestor) && self.ancestors_inclusive(node).any(|a| a == ancestor)
    }

    /// `id`, its parent, grandparent, and so on.
    pub fn ancestors_inclusive(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let start = self.is_alive(id).then_some(id);
        core::iter::successors(start, |&cur| self.parent(cur))
    }

    /// Depth-first pre-order traversal of the descendants of `id` (excluding `id`).
    pub fn descendants(&self, id: ElementId) -> Descendants<'_> {
        let mut stack = Vec::new();
        stack.extend(self.children(id).iter().rev().copied());
        Descendants { doc: self, stack }
    }

    /// The nearest inclusive ancestor of `id` satisfying `pred`.
    pub fn closest(
        &self,
        id: ElementId,
        mut pred: impl FnMut(&Self, ElementId) -> bool,
    ) -> Option<ElementId> {
        self.ancestors_inclusive(id).find(|&a| pred(self, a))
    }

    /// The first descendant of `root` (document order) satisfying `pred`.
    pub fn find_first(
        &self,
        root: ElementId,
        mut pred: impl FnMut(&Self, ElementId) -> bool,
    ) -> Option<ElementId> {
        self.descendants(root).find(|&d| pred(self, d))
    }

    /// Attribute value by name.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    /// Returns true if the attribute is present (with any value).
    pub fn has_attribute(&self, id: ElementId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attributes.insert(name.into(), value.into());
        }
    }

    /// Remove an attribute. Returns true if it was present.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> bool {
        self.element_mut(id)
            .is_some_and(|e| e.attributes.remove(name).is_some())
    }

    /// Returns true if the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Add `class` to the `class` attribute if missing.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let mut list = String::from(self.attribute(id, "class").unwrap_or_default());
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(class);
        self.set_attribute(id, "class", &list);
    }

    /// Inline style property.
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.style.insert(property.into(), value.into());
        }
    }

    /// Remove an inline style property.
    pub fn remove_style(&mut self, id: ElementId, property: &str) {
        if let Some(e) = self.element_mut(id) {
            e.style.remove(property);
        }
    }

    /// Replace the element's own text.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(e) = self.element_mut(id) {
            e.text = text.into();
        }
    }

    /// Concatenated text of `id` and its descendants in document order.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        if let Some(e) = self.element(id) {
            out.push_str(&e.text);
        }
        for d in self.descendants(id) {
            if let Some(e) = self.element(d) {
                out.push_str(&e.text);
            }
        }
        out
    }

    /// Record host-computed layout for `id`.
    pub fn set_layout(&mut self, id: ElementId, layout: Layout) {
        if let Some(e) = self.element_mut(id) {
            e.layout = layout;
        }
    }

    /// Returns true if `id` is connected and no inclusive ancestor is `hidden`.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        self.is_connected(id)
            && self
                .ancestors_inclusive(id)
                .all(|a| !self.has_attribute(a, "hidden"))
    }

    /// Rendered border-box size; zero when not rendered.
    pub fn offset_size(&self, id: ElementId) -> Size {
        match self.element(id) {
            Some(e) if self.is_rendered(id) => e.layout.size(),
            _ => Size::ZERO,
        }
    }

    /// Rendered client rectangles; empty when not rendered.
    pub fn client_rects(&self, id: ElementId) -> &[Rect] {
        match self.element(id) {
            Some(e) if self.is_rendered(id) => &e.layout.client_rects,
            _ => &[],
        }
    }

    /// Record the viewport's outer width and the document's client width.
    ///
    /// The difference is the width of the page scrollbar.
    pub fn set_viewport(&mut self, viewport_width: f64, client_width: f64) {
        self.viewport_width = viewport_width;
        self.client_width = client_width;
    }

    /// Width taken by the page's vertical scrollbar (never negative).
    pub fn scrollbar_width(&self) -> f64 {
        (self.viewport_width - self.client_width).max(0.0)
    }

    /// The focused element, if any.
    pub fn active_element(&self) -> Option<ElementId> {
        self.active.filter(|&a| self.is_connected(a))
    }

    /// Returns true if the element kind and attributes allow it to take focus.
    ///
    /// This is the host's notion of focusability (programmatic focus included),
    /// which is wider than what sequential Tab navigation visits.
    pub fn is_focus_capable(&self, id: ElementId) -> bool {
        let Some(e) = self.element(id) else {
            return false;
        };
        if e.tag.is_form_control() && e.attributes.contains_key("disabled") {
            return false;
        }
        if e.attributes.contains_key("tabindex") || e.attributes.contains_key("contenteditable") {
            return true;
        }
        match e.tag {
            Tag::A | Tag::Area => e.attributes.contains_key("href"),
            Tag::Input => e.attribute("type") != Some("hidden"),
            Tag::Button | Tag::Select | Tag::Textarea | Tag::Iframe | Tag::Summary => true,
            Tag::Audio | Tag::Video => e.attributes.contains_key("controls"),
            _ => false,
        }
    }

    /// Returns true if [`focus`](Self::focus) would succeed right now.
    pub fn can_focus(&self, id: ElementId) -> bool {
        self.is_focus_capable(id) && self.is_rendered(id)
    }

    /// Focus `id`. Returns false (and leaves focus unchanged) if it cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.can_focus(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Drop focus back to the body.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Returns true if sequential (Tab) navigation visits `id`.
    pub fn is_tab_reachable(&self, id: ElementId) -> bool {
        if !self.can_focus(id) {
            return false;
        }
        if self
            .attribute(id, "tabindex")
            .is_some_and(|t| t.trim_start().starts_with('-'))
        {
            return false;
        }
        // Only the checked radio of a group is a tab stop.
        let is_radio = self.tag(id) == Some(&Tag::Input) && self.attribute(id, "type") == Some("radio");
        !is_radio || self.has_attribute(id, "checked")
    }

    /// Where the host's default Tab action would move focus from `from`.
    ///
    /// Tab stops are visited in document order (positive `tabindex` values are
    /// treated like zero) and navigation wraps around the document.
    pub fn sequential_focus_target(&self, from: Option<ElementId>, backward: bool) -> Option<ElementId> {
        let order: Vec<ElementId> = core::iter::once(self.root)
            .chain(self.descendants(self.root))
            .collect();
        let stops: Vec<usize> = order
            .iter()
            .enumerate()
            .filter(|&(_, &id)| self.is_tab_reachable(id))
            .map(|(i, _)| i)
            .collect();
        let (&first, &last) = (stops.first()?, stops.last()?);
        let Some(pos) = from.and_then(|f| order.iter().position(|&id| id == f)) else {
            return Some(order[if backward { last } else { first }]);
        };
        let next = if backward {
            stops.iter().rev().find(|&&i| i < pos).copied().unwrap_or(last)
        } else {
            stops.iter().find(|&&i| i > pos).copied().unwrap_or(first)
        };
        Some(order[next])
    }

    /// Register a listener. The caller owns the handler behind the returned id.
    pub fn add_listener(&mut self, target: ListenerTarget, kind: EventKind, capture: bool) -> ListenerId {
        self.listeners.add(target, kind, capture)
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Returns true if the listener is registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners attached at `target`.
    pub fn listener_count_on(&self, target: ListenerTarget) -> usize {
        self.listeners.count_on(target)
    }

    /// Compute the capture → target → bubble dispatch sequence for an event
    /// of `kind` aimed at `target` (`None` targets the body).
    pub fn route(&self, kind: EventKind, target: Option<ElementId>) -> Vec<Dispatch> {
        let target = target.filter(|&t| self.is_alive(t)).unwrap_or(self.body);
        let mut path: Vec<ElementId> = self.ancestors_inclusive(target).collect();
        path.reverse();
        self.listeners.route(kind, &path)
    }

    fn link(&mut self, parent: ElementId, child: ElementId) {
        if let Some(c) = self.element_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.element_mut(parent) {
            p.children.push(child);
        }
    }

    fn unlink(&mut self, child: ElementId) {
        let Some(parent) = self.element_mut(child).and_then(|c| c.parent.take()) else {
            return;
        };
        if let Some(p) = self.element_mut(parent) {
            p.children.retain(|&c| c != child);
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.stack.pop()?;
        // Push children in reverse so the natural left-to-right order pops first.
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
