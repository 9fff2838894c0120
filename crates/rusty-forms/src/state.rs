//! Tri-state flags shared by fields and forms

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Attribute names written onto elements on every publish.
pub const VALID_ATTR: &str = "valid";
pub const DIRTY_ATTR: &str = "dirty";
pub const TOUCHED_ATTR: &str = "touched";
pub const PRISTINE_ATTR: &str = "pristine";

/// `valid`, `dirty` and `touched` for a field or a whole form.
///
/// `pristine` is always derived and never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateFlags {
    pub valid: bool,
    pub dirty: bool,
    pub touched: bool,
}

impl StateFlags {
    pub const fn new(valid: bool, dirty: bool, touched: bool) -> Self {
        Self {
            valid,
            dirty,
            touched,
        }
    }

    pub const fn pristine(&self) -> bool {
        !self.dirty && !self.touched
    }

    /// Combines per-field states under the aggregation laws:
    /// AND over `valid`, OR over `dirty` and `touched`.
    ///
    /// An empty iterator yields `{valid: true, dirty: false, touched: false}`.
    pub fn aggregate<I>(states: I) -> Self
    where
        I: IntoIterator<Item = StateFlags>,
    {
        states.into_iter().fold(
            StateFlags::new(true, false, false),
            |acc, state| StateFlags {
                valid: acc.valid && state.valid,
                dirty: acc.dirty || state.dirty,
                touched: acc.touched || state.touched,
            },
        )
    }

    /// Writes the four observable attributes as `"true"` / `"false"`.
    pub fn write_to<E: Element + ?Sized>(&self, element: &E) {
        element.set_attribute(VALID_ATTR, bool_attr(self.valid));
        element.set_attribute(DIRTY_ATTR, bool_attr(self.dirty));
        element.set_attribute(TOUCHED_ATTR, bool_attr(self.touched));
        element.set_attribute(PRISTINE_ATTR, bool_attr(self.pristine()));
    }
}

fn bool_attr(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}
