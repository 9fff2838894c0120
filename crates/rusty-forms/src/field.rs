//! A single input field: rules, content snapshot and state flags
//!
//! A [`Field`] evaluates its rules whenever its content changes and publishes
//! its [`StateFlags`] to its element's attributes and to its owner's
//! [`StateSink`] after every state transition.
//!
//! `dirty` and `touched` move only on input, focus and blur events. Setting
//! content programmatically re-evaluates `valid` and nothing else.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use rusty_forms_validation::FieldRules;
use tracing::{debug, trace};

use crate::config::{AttributeNames, StateConfig};
use crate::element::{Element, ElementRef, Event, EventKind};
use crate::error::{Result, StateError};
use crate::sink::StateSink;
use crate::state::StateFlags;

struct FieldInner {
    name: String,
    rules: FieldRules,
    original_content: String,
    state: Cell<StateFlags>,
    element: ElementRef,
    sink: Rc<dyn StateSink>,
}

/// Handle to a field. Clones share the same field.
#[derive(Clone)]
pub struct Field {
    inner: Rc<FieldInner>,
}

impl Field {
    /// Builds a field from `element` using the default attribute names.
    pub fn new(element: ElementRef, sink: Rc<dyn StateSink>) -> Result<Self> {
        Self::with_config(element, sink, &StateConfig::default())
    }

    pub fn with_config(
        element: ElementRef,
        sink: Rc<dyn StateSink>,
        config: &StateConfig,
    ) -> Result<Self> {
        let (name, rules) = Self::resolve(element.as_ref(), &config.attributes)?;
        Ok(Self::build(element, name, rules, sink))
    }

    /// Reads the name and rule set without touching the element.
    pub(crate) fn resolve(
        element: &dyn Element,
        names: &AttributeNames,
    ) -> Result<(String, FieldRules)> {
        let name = names.read_name(element).ok_or(StateError::MissingName)?;
        let rules = names
            .read_rules(element)
            .map_err(|source| StateError::InvalidPattern {
                field: name.clone(),
                source,
            })?;
        Ok((name, rules))
    }

    /// Snapshots content, publishes the initial state, then chains hooks.
    pub(crate) fn build(
        element: ElementRef,
        name: String,
        rules: FieldRules,
        sink: Rc<dyn StateSink>,
    ) -> Self {
        let original_content = element.value();
        let field = Field {
            inner: Rc::new(FieldInner {
                name,
                rules,
                original_content,
                state: Cell::new(StateFlags::default()),
                element,
                sink,
            }),
        };

        field.init_state();
        field.install_hooks();

        debug!(
            field = %field.name(),
            constraints = field.inner.rules.constraints().len(),
            valid = field.is_valid(),
            "field constructed"
        );
        field
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn rules(&self) -> &FieldRules {
        &self.inner.rules
    }

    pub fn original_content(&self) -> &str {
        &self.inner.original_content
    }

    pub fn element(&self) -> ElementRef {
        Rc::clone(&self.inner.element)
    }

    pub fn content(&self) -> String {
        self.inner.element.value()
    }

    /// Writes the element value and re-validates. `dirty` and `touched` are
    /// left alone.
    pub fn set_content(&self, content: &str) {
        self.inner.element.set_value(content);
        self.validate();
    }

    pub fn state(&self) -> StateFlags {
        self.inner.state.get()
    }

    pub fn is_valid(&self) -> bool {
        self.state().valid
    }

    pub fn is_dirty(&self) -> bool {
        self.state().dirty
    }

    pub fn is_touched(&self) -> bool {
        self.state().touched
    }

    pub fn is_pristine(&self) -> bool {
        self.state().pristine()
    }

    /// Re-evaluates every rule against the current content.
    ///
    /// Publishes only if `valid` changed. Returns the new `valid`.
    pub fn validate(&self) -> bool {
        if self.revalidate() {
            self.publish();
        }
        self.is_valid()
    }

    pub fn on_input(&self) {
        let dirty = self.content() != self.inner.original_content;
        self.update(|state| state.dirty = dirty);
        self.revalidate();
        self.publish();
    }

    pub fn on_focus(&self) {
        self.update(|state| state.touched = true);
        self.publish();
    }

    /// Blur clears `touched`; it does not latch.
    pub fn on_blur(&self) {
        self.update(|state| state.touched = false);
        self.publish();
    }

    /// Restores the original content and starts the state over.
    pub fn reset(&self) {
        debug!(field = %self.name(), "field reset");
        self.init_state();
    }

    fn init_state(&self) {
        self.inner.element.set_value(&self.inner.original_content);
        self.inner.state.set(StateFlags::default());
        self.revalidate();
        self.publish();
    }

    /// Recomputes `valid` without publishing. Returns whether it changed.
    fn revalidate(&self) -> bool {
        let content = self.content();
        let valid = self.inner.rules.evaluate(&content);

        if !valid && tracing::enabled!(tracing::Level::TRACE) {
            let failed: Vec<String> = self
                .inner
                .rules
                .failures(&content)
                .iter()
                .map(ToString::to_string)
                .collect();
            trace!(field = %self.name(), ?failed, "constraints failed");
        }

        let previous = self.inner.state.get();
        self.update(|state| state.valid = valid);
        previous.valid != valid
    }

    fn update(&self, change: impl FnOnce(&mut StateFlags)) {
        let mut state = self.inner.state.get();
        change(&mut state);
        self.inner.state.set(state);
    }

    fn publish(&self) {
        let state = self.state();
        state.write_to(&*self.inner.element);
        trace!(
            field = %self.name(),
            valid = state.valid,
            dirty = state.dirty,
            touched = state.touched,
            "field state published"
        );
        self.inner.sink.state_changed(state);
    }

    fn handle(&self, kind: EventKind) {
        match kind {
            EventKind::Focus => self.on_focus(),
            EventKind::Blur => self.on_blur(),
            EventKind::Input => self.on_input(),
            EventKind::Reset => {}
        }
    }

    /// Chains focus, blur and input handlers ahead of any existing listeners.
    /// The handlers hold a weak reference and do nothing once the field is gone.
    fn install_hooks(&self) {
        for kind in [EventKind::Focus, EventKind::Blur, EventKind::Input] {
            let weak = Rc::downgrade(&self.inner);
            self.inner.element.chain_hook(
                kind,
                Rc::new(move |event: &Event| {
                    if let Some(inner) = weak.upgrade() {
                        Field { inner }.handle(event.kind);
                    }
                }),
            );
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.inner.name)
            .field("rules", &self.inner.rules)
            .field("original_content", &self.inner.original_content)
            .field("state", &self.inner.state.get())
            .finish()
    }
}
