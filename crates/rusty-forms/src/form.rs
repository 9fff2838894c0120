//! A form: a named set of fields and their aggregate state
//!
//! The form listens to every field through a [`StateSink`]. Each notification
//! triggers a full rescan of all fields under the aggregation laws (AND over
//! `valid`, OR over `dirty` and `touched`) and republishes the aggregate onto
//! the form element. There is no incremental bookkeeping.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::StateConfig;
use crate::element::{ElementRef, Event, EventKind, FormElementRef};
use crate::error::{Result, StateError};
use crate::field::Field;
use crate::sink::StateSink;
use crate::state::StateFlags;

struct FormInner {
    element: FormElementRef,
    /// Registration order.
    fields: Vec<Field>,
    index: HashMap<String, usize>,
    state: Cell<StateFlags>,
}

impl FormInner {
    fn field_changed(&self, changed: StateFlags) {
        let state = StateFlags::aggregate(self.fields.iter().map(Field::state));
        self.state.set(state);
        state.write_to(&*self.element);
        trace!(
            ?changed,
            valid = state.valid,
            dirty = state.dirty,
            touched = state.touched,
            "form state recomputed"
        );
    }

    fn reset(&self) {
        debug!(fields = self.fields.len(), "form reset");
        for field in &self.fields {
            field.reset();
        }
    }
}

/// The sink handed to every field. Weak, so fields never keep their form alive.
struct FormSink(Weak<FormInner>);

impl StateSink for FormSink {
    fn state_changed(&self, state: StateFlags) {
        if let Some(form) = self.0.upgrade() {
            form.field_changed(state);
        }
    }
}

/// Handle to a form. Clones share the same form.
#[derive(Clone)]
pub struct Form {
    inner: Rc<FormInner>,
}

impl Form {
    pub fn new(element: FormElementRef) -> Result<Self> {
        Self::with_config(element, &StateConfig::default())
    }

    /// Discovers the input elements of `element` and builds a field for each.
    ///
    /// Names and rules of every element are checked first; a missing or
    /// repeated name, or a bad pattern, fails before any field is built or any
    /// hook attached.
    pub fn with_config(element: FormElementRef, config: &StateConfig) -> Result<Self> {
        let inputs = element.input_elements();

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(inputs.len());
        for input in inputs {
            let (name, rules) = Field::resolve(input.as_ref(), &config.attributes)?;
            if !seen.insert(name.clone()) {
                return Err(StateError::DuplicateFieldName { name });
            }
            resolved.push((input, name, rules));
        }

        if resolved.is_empty() {
            warn!("form has no input fields");
        }

        let inner = Rc::new_cyclic(|weak: &Weak<FormInner>| {
            let sink: Rc<dyn StateSink> = Rc::new(FormSink(weak.clone()));
            let mut fields = Vec::with_capacity(resolved.len());
            let mut index = HashMap::with_capacity(resolved.len());

            for (input, name, rules) in resolved {
                index.insert(name.clone(), fields.len());
                fields.push(Field::build(input, name, rules, Rc::clone(&sink)));
            }

            FormInner {
                element,
                fields,
                index,
                state: Cell::new(StateFlags::aggregate(Vec::new())),
            }
        });

        // Fields published while the form was still being built; settle the
        // aggregate now that every field is registered.
        inner.field_changed(inner.state.get());

        let form = Form { inner };
        form.install_reset_hook();

        debug!(
            fields = form.len(),
            valid = form.is_valid(),
            "form constructed"
        );
        Ok(form)
    }

    /// Recomputes the aggregate from every field and republishes it.
    pub fn field_changed(&self, state: StateFlags) {
        self.inner.field_changed(state);
    }

    /// Resets every field in registration order.
    ///
    /// The aggregate follows from the fields' own notifications.
    pub fn reset(&self) {
        self.inner.reset();
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

    pub fn element(&self) -> FormElementRef {
        Rc::clone(&self.inner.element)
    }

    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    /// Fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.inner.fields.iter()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields().map(Field::name).collect()
    }

    pub fn input_field(&self, name: &str) -> Result<&Field> {
        self.inner
            .index
            .get(name)
            .map(|&position| &self.inner.fields[position])
            .ok_or_else(|| StateError::unknown_field(name))
    }

    pub fn content_of(&self, name: &str) -> Result<String> {
        self.input_field(name).map(Field::content)
    }

    pub fn dom_element(&self, name: &str) -> Result<ElementRef> {
        self.input_field(name).map(Field::element)
    }

    /// Current content of every field, keyed by name.
    pub fn form_data(&self) -> FormData {
        FormData(
            self.fields()
                .map(|field| (field.name().to_string(), field.content()))
                .collect(),
        )
    }

    fn install_reset_hook(&self) {
        let weak = Rc::downgrade(&self.inner);
        self.inner.element.chain_hook(
            EventKind::Reset,
            Rc::new(move |_: &Event| {
                if let Some(inner) = weak.upgrade() {
                    inner.reset();
                }
            }),
        );
    }
}

impl StateSink for Form {
    fn state_changed(&self, state: StateFlags) {
        self.field_changed(state);
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.inner.fields)
            .field("state", &self.inner.state.get())
            .finish()
    }
}

/// Snapshot of field contents by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// The snapshot as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::memory::{MemoryElement, MemoryForm};
    use pretty_assertions::assert_eq;

    fn form_of(children: Vec<Rc<MemoryElement>>) -> (Rc<MemoryForm>, Result<Form>) {
        let container = Rc::new(
            children
                .into_iter()
                .fold(MemoryForm::new(), MemoryForm::with_child),
        );
        let form = Form::new(Rc::clone(&container) as FormElementRef);
        (container, form)
    }

    #[test]
    fn test_empty_form_is_vacuously_valid() {
        let (container, form) = form_of(Vec::new());
        let form = form.unwrap();

        assert!(form.is_empty());
        assert_eq!(form.state(), StateFlags::new(true, false, false));
        assert_eq!(container.flag("valid"), Some(true));
        assert_eq!(container.flag("pristine"), Some(true));
        assert!(form.form_data().is_empty());
    }

    #[test]
    fn test_construction_settles_aggregate() {
        let a = Rc::new(MemoryElement::named("a").with_value("filled"));
        let b = Rc::new(MemoryElement::named("b").with_attribute("required", ""));
        let (container, form) = form_of(vec![a, b]);
        let form = form.unwrap();

        assert!(!form.is_valid());
        assert!(form.is_pristine());
        assert_eq!(container.flag("valid"), Some(false));
        assert_eq!(form.field_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_last_field_counts_at_construction() {
        let ok = Rc::new(MemoryElement::named("ok"));
        let bad = Rc::new(MemoryElement::named("bad").with_attribute("required", ""));
        let (_container, form) = form_of(vec![ok, bad]);

        assert!(!form.unwrap().is_valid());
    }

    #[test]
    fn test_duplicate_names_fail_before_any_hook() {
        let first = Rc::new(MemoryElement::named("dup"));
        let second = Rc::new(MemoryElement::named("dup"));
        let (container, form) = form_of(vec![Rc::clone(&first), Rc::clone(&second)]);

        let err = form.unwrap_err();
        assert!(matches!(err, StateError::DuplicateFieldName { ref name } if name == "dup"));
        assert_eq!(first.hook_count(EventKind::Input), 0);
        assert_eq!(second.hook_count(EventKind::Input), 0);
        assert_eq!(first.flag("valid"), None);
        assert_eq!(container.element().hook_count(EventKind::Reset), 0);
    }

    #[test]
    fn test_missing_name_fails_construction() {
        let named = Rc::new(MemoryElement::named("a"));
        let anonymous = Rc::new(MemoryElement::new());
        let (_container, form) = form_of(vec![Rc::clone(&named), anonymous]);

        assert!(matches!(form.unwrap_err(), StateError::MissingName));
        assert_eq!(named.hook_count(EventKind::Focus), 0);
    }

    #[test]
    fn test_lookups() {
        let a = Rc::new(MemoryElement::named("a").with_value("alpha"));
        let (_container, form) = form_of(vec![Rc::clone(&a)]);
        let form = form.unwrap();

        assert_eq!(form.input_field("a").unwrap().name(), "a");
        assert_eq!(form.content_of("a").unwrap(), "alpha");
        assert_eq!(form.dom_element("a").unwrap().value(), "alpha");

        let err = form.content_of("zzz").unwrap_err();
        assert!(matches!(err, StateError::UnknownField { ref name } if name == "zzz"));
        assert!(!err.is_construction_error());
        assert!(form.input_field("zzz").is_err());
        assert!(form.dom_element("zzz").is_err());
    }

    #[test]
    fn test_form_data_round_trip() {
        let a = Rc::new(MemoryElement::named("a").with_value("one"));
        let b = Rc::new(MemoryElement::named("b").with_value("two"));
        let (_container, form) = form_of(vec![a, Rc::clone(&b)]);
        let form = form.unwrap();

        let data = form.form_data();
        assert_eq!(data.get("a"), Some("one"));
        assert_eq!(data.get("b"), Some("two"));
        assert_eq!(data.to_json().unwrap(), r#"{"a":"one","b":"two"}"#);

        b.input("three");
        assert_eq!(form.form_data().get("b"), Some("three"));
        assert_eq!(data.get("b"), Some("two"));
    }

    #[test]
    fn test_field_changed_is_idempotent() {
        let a = Rc::new(MemoryElement::named("a").with_attribute("required", ""));
        let (_container, form) = form_of(vec![Rc::clone(&a)]);
        let form = form.unwrap();
        a.input("x");
        let settled = form.state();

        form.field_changed(StateFlags::new(false, false, false));
        form.field_changed(StateFlags::new(true, true, true));

        assert_eq!(form.state(), settled);
    }

    #[test]
    fn test_reset_event_cascades() {
        let a = Rc::new(MemoryElement::named("a"));
        let b = Rc::new(MemoryElement::named("b").with_value("keep"));
        let (container, form) = form_of(vec![Rc::clone(&a), Rc::clone(&b)]);
        let form = form.unwrap();

        a.focus();
        a.input("changed");
        b.input("edited");
        assert!(form.is_dirty());
        assert!(form.is_touched());

        container.reset();

        assert_eq!(form.state(), StateFlags::new(true, false, false));
        assert_eq!(a.value(), "");
        assert_eq!(b.value(), "keep");
        assert_eq!(container.flag("pristine"), Some(true));
    }

    #[test]
    fn test_form_hooks_go_quiet_after_drop() {
        let a = Rc::new(MemoryElement::named("a"));
        let (container, form) = form_of(vec![Rc::clone(&a)]);
        drop(form.unwrap());

        a.focus();
        container.reset();

        assert_eq!(container.flag("touched"), Some(false));
    }
}
