//! Input and lifecycle events
//!
//! Events are identified by plain `u32` ids so state enums can react to them
//! through [`crate::StateTransitions`] without depending on payload types.

use serde::{Deserialize, Serialize};

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;

    // Layout pass events
    pub const LAYOUT_REQUEST: EventType = 90;
    pub const LAYOUT_COMPLETE: EventType = 91;
    /// The one-time restoration of the first layout after mount has run
    pub const FIRST_LAYOUT_CONSUMED: EventType = 92;
}

/// Phase of a touch gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl TouchPhase {
    /// Down and move start or continue a scroll gesture
    pub fn starts_or_continues_gesture(self) -> bool {
        matches!(self, TouchPhase::Down | TouchPhase::Move)
    }
}

/// A single touch sample in container-local coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Up, x, y)
    }

    pub fn cancel() -> Self {
        Self::new(TouchPhase::Cancel, 0.0, 0.0)
    }
}
