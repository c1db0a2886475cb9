//! Touch handling
//!
//! Touches pass through a [`TouchGate`] before reaching the default
//! [`DragScroller`]. While scrolling is disabled the gate drops interception
//! entirely and drops down/move samples; up and cancel still reach the
//! scroller so a drag in progress is closed.

use hscroll_core::{TouchEvent, TouchPhase};

use crate::host::ScrollHost;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TouchGate {
    enabled: bool,
}

impl TouchGate {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn admits_intercept(&self) -> bool {
        self.enabled
    }

    pub fn admits_touch(&self, phase: TouchPhase) -> bool {
        self.enabled || !phase.starts_or_continues_gesture()
    }
}

impl Default for TouchGate {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Turns horizontal drags into scrolls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragScroller {
    touch_slop: i32,
    last_x: i32,
    dragging: bool,
}

impl DragScroller {
    pub fn new(touch_slop: i32) -> Self {
        Self {
            touch_slop: touch_slop.max(0),
            last_x: 0,
            dragging: false,
        }
    }

    /// Watch a touch headed for a descendant.
    ///
    /// Returns true once the gesture has moved far enough to become a drag,
    /// at which point the container takes it over.
    pub fn intercept(&mut self, event: &TouchEvent) -> bool {
        let x = event.x as i32;
        match event.phase {
            TouchPhase::Down => {
                self.last_x = x;
            }
            TouchPhase::Move => {
                if !self.dragging && (x - self.last_x).abs() > self.touch_slop {
                    tracing::trace!(x, last_x = self.last_x, "drag intercepted");
                    self.dragging = true;
                    self.last_x = x;
                }
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                self.dragging = false;
            }
        }
        self.dragging
    }

    /// Handle a touch delivered to the container itself
    pub fn handle<H: ScrollHost>(&mut self, host: &mut H, event: &TouchEvent) -> bool {
        let x = event.x as i32;
        match event.phase {
            TouchPhase::Down => {
                if host.child().is_none() {
                    return false;
                }
                self.last_x = x;
            }
            TouchPhase::Move => {
                let mut delta = self.last_x - x;
                if !self.dragging && delta.abs() > self.touch_slop {
                    self.dragging = true;
                    delta -= self.touch_slop * delta.signum();
                }
                if self.dragging {
                    self.last_x = x;
                    host.scroll_by(delta, 0);
                }
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                self.dragging = false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_enabled_admits_everything() {
        let gate = TouchGate::default();
        assert!(gate.admits_intercept());
        assert!(gate.admits_touch(TouchPhase::Down));
        assert!(gate.admits_touch(TouchPhase::Move));
    }

    #[test]
    fn test_gate_disabled() {
        let gate = TouchGate::new(false);
        assert!(!gate.admits_intercept());
        assert!(!gate.admits_touch(TouchPhase::Down));
        assert!(!gate.admits_touch(TouchPhase::Move));
        assert!(gate.admits_touch(TouchPhase::Up));
        assert!(gate.admits_touch(TouchPhase::Cancel));
    }

    #[test]
    fn test_intercept_after_slop() {
        let mut drag = DragScroller::new(8);
        assert!(!drag.intercept(&TouchEvent::down(100.0, 0.0)));
        assert!(!drag.intercept(&TouchEvent::moved(95.0, 0.0)));
        assert!(drag.intercept(&TouchEvent::moved(80.0, 0.0)));
        assert!(!drag.intercept(&TouchEvent::up(80.0, 0.0)));
    }
}
