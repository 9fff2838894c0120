//! Rusty-Forms-Validation Core
//!
//! Declarative field rules and the pure constraint checks behind them.
//! Every check answers a yes/no question about a piece of content; no
//! messages are produced. The state engine in `rusty-forms` folds these
//! answers into a field's `valid` flag.

pub mod email;
pub mod error;
pub mod numeric;
pub mod pattern;
pub mod rules;
pub mod string;

// Re-export all validators
pub use email::*;
pub use error::RuleError;
pub use numeric::*;
pub use pattern::Pattern;
pub use rules::{Constraint, FieldRules};
pub use string::*;
