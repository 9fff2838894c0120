//! # rusty-forms
//!
//! State tracking for forms and their fields: `valid`, `dirty`, `touched` and
//! the derived `pristine`, propagated bottom-up from fields to the form.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use rusty_forms::memory::{MemoryElement, MemoryForm};
//! use rusty_forms::{Form, FormElementRef};
//!
//! let email = Rc::new(
//!     MemoryElement::named("email")
//!         .with_attribute("required", "")
//!         .with_attribute("type", "email"),
//! );
//! let container = Rc::new(MemoryForm::new().with_child(Rc::clone(&email)));
//!
//! let form = Form::new(container.clone() as FormElementRef).unwrap();
//! assert!(!form.is_valid());
//!
//! email.focus();
//! email.input("user@example.com");
//! assert!(form.is_valid());
//! assert!(form.is_dirty());
//! assert_eq!(container.flag("pristine"), Some(false));
//!
//! form.reset();
//! assert!(form.is_pristine());
//! ```
//!
//! ## Architecture
//!
//! - [`Element`] / [`FormElement`] - capability traits over the UI toolkit
//! - [`Field`] - one control's rules, content snapshot and state
//! - [`Form`] - named set of fields and their aggregate state
//! - [`StateSink`] - how fields notify their owner
//! - [`StateConfig`] - which attributes declare names and rules
//! - [`memory`] - in-memory elements
//!
//! Rule evaluation lives in `rusty-forms-validation`, re-exported as
//! [`validation`].

#![doc(html_root_url = "https://docs.rs/rusty-forms/0.1.0")]

pub mod config;
pub mod element;
pub mod error;
pub mod field;
pub mod form;
pub mod memory;
pub mod sink;
pub mod state;

pub use rusty_forms_validation as validation;

pub use config::{AttributeNames, StateConfig};
pub use element::{
    Element, ElementRef, Event, EventHooks, EventKind, FormElement, FormElementRef, Hook,
    HookChain,
};
pub use error::{Result, StateError};
pub use field::Field;
pub use form::{Form, FormData};
pub use sink::{NoopSink, StateSink};
pub use state::StateFlags;
