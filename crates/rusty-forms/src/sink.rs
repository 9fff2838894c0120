//! Field-to-owner notification

use crate::state::StateFlags;

/// Receives a field's state every time the field publishes.
///
/// The state arrives by value, so the receiver never observes a field halfway
/// through a transition.
pub trait StateSink {
    fn state_changed(&self, state: StateFlags);
}

impl<F> StateSink for F
where
    F: Fn(StateFlags),
{
    fn state_changed(&self, state: StateFlags) {
        self(state)
    }
}

/// A sink that ignores every notification, for fields without an owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl StateSink for NoopSink {
    fn state_changed(&self, _state: StateFlags) {}
}
