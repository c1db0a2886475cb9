//! Layout phase of the scroll container
//!
//! Two independent state enums, combined in [`LayoutPhase`]:
//!
//! - [`LayoutState`]: whether a layout has been requested and not yet run
//! - [`FirstLayoutState`]: whether the one-time restoration of the first
//!   layout after attach is still pending

use hscroll_core::fsm::apply;
use hscroll_core::{event_types, EventType, StateTransitions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutState {
    /// A layout pass is owed
    #[default]
    Dirty,
    Clean,
}

impl StateTransitions for LayoutState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (LayoutState::Clean, LAYOUT_REQUEST) => Some(LayoutState::Dirty),
            (LayoutState::Dirty, LAYOUT_COMPLETE) => Some(LayoutState::Clean),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FirstLayoutState {
    #[default]
    Pending,
    Settled,
}

impl StateTransitions for FirstLayoutState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (FirstLayoutState::Settled, MOUNT | UNMOUNT) => Some(FirstLayoutState::Pending),
            (FirstLayoutState::Pending, FIRST_LAYOUT_CONSUMED) => Some(FirstLayoutState::Settled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutPhase {
    pub layout: LayoutState,
    pub first_layout: FirstLayoutState,
}

impl LayoutPhase {
    /// Route an event to both machines
    pub fn dispatch(&mut self, event: EventType) {
        apply(&mut self.layout, event);
        apply(&mut self.first_layout, event);
    }

    pub fn is_dirty(&self) -> bool {
        self.layout == LayoutState::Dirty
    }

    pub fn is_first_layout(&self) -> bool {
        self.first_layout == FirstLayoutState::Pending
    }
}
