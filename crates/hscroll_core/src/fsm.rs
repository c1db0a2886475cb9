//! Event-driven state enums
//!
//! Small state machines are plain `Copy` enums that map an event id to their
//! next state. Unhandled events leave the state unchanged.
//!
//! ```ignore
//! use hscroll_core::{event_types, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Gate { Open, Closed }
//!
//! impl StateTransitions for Gate {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Gate::Open, event_types::UNMOUNT) => Some(Gate::Closed),
//!             (Gate::Closed, event_types::MOUNT) => Some(Gate::Open),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::hash::Hash;

use crate::events::EventType;

/// Trait for state enums driven by event ids
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Feed `event` to `state`, updating it in place.
///
/// Returns true when a transition happened.
pub fn apply<S: StateTransitions>(state: &mut S, event: EventType) -> bool {
    match state.on_event(event) {
        Some(next) => {
            tracing::trace!(from = ?*state, to = ?next, event, "state transition");
            *state = next;
            true
        }
        None => false,
    }
}
