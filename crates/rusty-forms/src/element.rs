//! Capability interface for the UI elements the engine drives
//!
//! The engine never touches a concrete widget toolkit. It reads and writes
//! attributes and values, and attaches hooks to per-event listener lists,
//! through the traits below. [`crate::memory`] provides an in-memory
//! implementation.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Events the engine listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Blur,
    Input,
    Reset,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Focus => write!(f, "focus"),
            EventKind::Blur => write!(f, "blur"),
            EventKind::Input => write!(f, "input"),
            EventKind::Reset => write!(f, "reset"),
        }
    }
}

/// The value every listener in a chain receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self { kind }
    }
}

/// A listener attached to an element.
pub type Hook = Rc<dyn Fn(&Event)>;

/// Ordered listeners for one event kind.
///
/// [`HookChain::chain`] puts the new hook ahead of every hook already present,
/// so the most recently chained behavior runs first and earlier listeners
/// follow in their existing order. Nothing is ever dropped.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Hook>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&mut self, hook: Hook) {
        self.hooks.insert(0, hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs every hook in chain order.
    ///
    /// Element implementations should clone the chain out of any `RefCell`
    /// before dispatching, since hooks may chain further hooks or touch the
    /// element.
    pub fn dispatch(&self, event: &Event) {
        for hook in &self.hooks {
            hook(event);
        }
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain")
            .field("len", &self.hooks.len())
            .finish()
    }
}

/// One [`HookChain`] per event kind.
#[derive(Debug, Clone, Default)]
pub struct EventHooks {
    chains: HashMap<EventKind, HookChain>,
}

impl EventHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&mut self, kind: EventKind, hook: Hook) {
        self.chains.entry(kind).or_default().chain(hook);
    }

    /// A copy of the chain for `kind`, safe to dispatch without holding a borrow.
    pub fn chain_for(&self, kind: EventKind) -> HookChain {
        self.chains.get(&kind).cloned().unwrap_or_default()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.chains.get(&kind).map_or(0, HookChain::len)
    }
}

/// A single UI control: attribute access, value access and event hooks.
///
/// All methods take `&self`; implementations use interior mutability.
pub trait Element {
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn value(&self) -> String;

    /// Sets the value programmatically. Must not dispatch an input event.
    fn set_value(&self, value: &str);

    /// Attaches `hook` to the listener list for `kind` via [`HookChain::chain`].
    fn chain_hook(&self, kind: EventKind, hook: Hook);
}

/// A container that owns input-capable descendants.
pub trait FormElement: Element {
    /// Every input-capable descendant, in document order.
    fn input_elements(&self) -> Vec<ElementRef>;
}

pub type ElementRef = Rc<dyn Element>;
pub type FormElementRef = Rc<dyn FormElement>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, label: &'static str) -> Hook {
        let log = Rc::clone(log);
        Rc::new(move |event: &Event| log.borrow_mut().push(format!("{label}:{}", event.kind)))
    }

    #[test]
    fn test_newest_hook_runs_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = HookChain::new();
        chain.chain(recorder(&log, "caller"));
        chain.chain(recorder(&log, "engine"));

        chain.dispatch(&Event::new(EventKind::Input));

        assert_eq!(*log.borrow(), vec!["engine:input", "caller:input"]);
    }

    #[test]
    fn test_chaining_never_drops_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = HookChain::new();
        chain.chain(recorder(&log, "a"));
        chain.chain(recorder(&log, "b"));
        chain.chain(recorder(&log, "c"));
        assert_eq!(chain.len(), 3);

        chain.dispatch(&Event::new(EventKind::Blur));

        assert_eq!(*log.borrow(), vec!["c:blur", "b:blur", "a:blur"]);
    }

    #[test]
    fn test_event_hooks_keep_kinds_apart() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = EventHooks::new();
        hooks.chain(EventKind::Focus, recorder(&log, "f"));
        hooks.chain(EventKind::Blur, recorder(&log, "b"));

        assert_eq!(hooks.count(EventKind::Focus), 1);
        assert_eq!(hooks.count(EventKind::Input), 0);

        hooks.chain_for(EventKind::Focus).dispatch(&Event::new(EventKind::Focus));
        hooks.chain_for(EventKind::Input).dispatch(&Event::new(EventKind::Input));

        assert_eq!(*log.borrow(), vec!["f:focus"]);
    }
}
