//! In-memory elements
//!
//! [`MemoryElement`] and [`MemoryForm`] implement the element traits without a
//! real UI toolkit. They back the test suite and suit embedders that feed
//! events from their own event loop.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::element::{Element, ElementRef, Event, EventHooks, EventKind, FormElement, Hook};

/// Tags treated as input-capable by [`MemoryForm::input_elements`].
pub const INPUT_TAGS: &[&str] = &["input", "textarea", "select"];

/// A single in-memory control.
pub struct MemoryElement {
    tag: String,
    attributes: RefCell<BTreeMap<String, String>>,
    value: RefCell<String>,
    hooks: RefCell<EventHooks>,
}

impl MemoryElement {
    /// An `input` element with no attributes and an empty value.
    pub fn new() -> Self {
        Self::with_tag("input")
    }

    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: RefCell::new(BTreeMap::new()),
            value: RefCell::new(String::new()),
            hooks: RefCell::new(EventHooks::new()),
        }
    }

    /// An `input` element carrying a `name` attribute.
    pub fn named(name: &str) -> Self {
        Self::new().with_attribute("name", name)
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        *self.value.borrow_mut() = value.to_string();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_input_capable(&self) -> bool {
        INPUT_TAGS.iter().any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow_mut().remove(name)
    }

    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.attributes.borrow().clone()
    }

    /// A boolean state attribute such as `valid` or `pristine`.
    ///
    /// `None` when the attribute is missing or not `"true"`/`"false"`.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.attributes.borrow().get(name).map(String::as_str) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }

    pub fn hook_count(&self, kind: EventKind) -> usize {
        self.hooks.borrow().count(kind)
    }

    /// Runs the listener chain for `kind`.
    pub fn dispatch(&self, kind: EventKind) {
        let chain = self.hooks.borrow().chain_for(kind);
        chain.dispatch(&Event::new(kind));
    }

    pub fn focus(&self) {
        self.dispatch(EventKind::Focus);
    }

    pub fn blur(&self) {
        self.dispatch(EventKind::Blur);
    }

    /// Replaces the value and dispatches an input event, as a user edit would.
    pub fn input(&self, text: &str) {
        self.set_value(text);
        self.dispatch(EventKind::Input);
    }
}

impl Default for MemoryElement {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryElement")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes.borrow())
            .field("value", &self.value.borrow())
            .finish()
    }
}

impl Element for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    fn chain_hook(&self, kind: EventKind, hook: Hook) {
        self.hooks.borrow_mut().chain(kind, hook);
    }
}

/// An in-memory form container.
#[derive(Debug)]
pub struct MemoryForm {
    element: MemoryElement,
    children: RefCell<Vec<Rc<MemoryElement>>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self {
            element: MemoryElement::with_tag("form"),
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn with_child(self, child: Rc<MemoryElement>) -> Self {
        self.append(child);
        self
    }

    pub fn append(&self, child: Rc<MemoryElement>) {
        self.children.borrow_mut().push(child);
    }

    /// The container element itself, for attribute and hook inspection.
    pub fn element(&self) -> &MemoryElement {
        &self.element
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.element.flag(name)
    }

    pub fn dispatch(&self, kind: EventKind) {
        self.element.dispatch(kind);
    }

    /// Dispatches a reset event.
    pub fn reset(&self) {
        self.dispatch(EventKind::Reset);
    }
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for MemoryForm {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.element.set_attribute(name, value);
    }

    fn value(&self) -> String {
        self.element.value()
    }

    fn set_value(&self, value: &str) {
        self.element.set_value(value);
    }

    fn chain_hook(&self, kind: EventKind, hook: Hook) {
        self.element.chain_hook(kind, hook);
    }
}

impl FormElement for MemoryForm {
    fn input_elements(&self) -> Vec<ElementRef> {
        self.children
            .borrow()
            .iter()
            .filter(|child| child.is_input_capable())
            .map(|child| Rc::clone(child) as ElementRef)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_input_sets_value_then_dispatches() {
        let element = Rc::new(MemoryElement::named("q"));
        let seen = Rc::new(RefCell::new(String::new()));
        let seen_in_hook = Rc::clone(&seen);
        let observed = Rc::clone(&element);
        element.chain_hook(
            EventKind::Input,
            Rc::new(move |_: &Event| *seen_in_hook.borrow_mut() = observed.value()),
        );

        element.input("hello");

        assert_eq!(element.value(), "hello");
        assert_eq!(*seen.borrow(), "hello");
    }

    #[test]
    fn test_set_value_does_not_dispatch() {
        let element = MemoryElement::named("q");
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        element.chain_hook(
            EventKind::Input,
            Rc::new(move |_: &Event| counter.set(counter.get() + 1)),
        );

        element.set_value("quiet");

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_hooks_may_chain_during_dispatch() {
        let element = Rc::new(MemoryElement::named("q"));
        let inner = Rc::clone(&element);
        element.chain_hook(
            EventKind::Focus,
            Rc::new(move |_: &Event| inner.chain_hook(EventKind::Focus, Rc::new(|_: &Event| {}))),
        );

        element.focus();

        assert_eq!(element.hook_count(EventKind::Focus), 2);
    }

    #[test]
    fn test_form_lists_only_input_capable_children() {
        let form = MemoryForm::new()
            .with_child(Rc::new(MemoryElement::named("a")))
            .with_child(Rc::new(MemoryElement::with_tag("button")))
            .with_child(Rc::new(MemoryElement::with_tag("textarea").with_attribute("name", "b")));

        let names: Vec<_> = form
            .input_elements()
            .iter()
            .filter_map(|el| el.attribute("name"))
            .collect();

        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_flag_parsing() {
        let element = MemoryElement::new()
            .with_attribute("valid", "true")
            .with_attribute("dirty", "false")
            .with_attribute("touched", "yes");

        assert_eq!(element.flag("valid"), Some(true));
        assert_eq!(element.flag("dirty"), Some(false));
        assert_eq!(element.flag("touched"), None);
        assert_eq!(element.flag("pristine"), None);
    }
}
