//! The view capability the scroll engine drives
//!
//! The engine never owns views. It reads and writes geometry through a
//! [`ScrollHost`], which is implemented once for the in-repo view tree (see
//! [`crate::container`]) and by mocks in tests.

use std::fmt::Debug;

use hscroll_core::{EdgeInsets, LayoutDirection, MeasureSpec, MeasuredDimension, Rect, Size};

use crate::params::LayoutParams;

pub trait ScrollHost {
    /// Handle to a view in the host's tree
    type Node: Copy + Eq + Debug;

    /// The single content child, if any
    fn child(&self) -> Option<Self::Node>;

    /// Resolve relative child parameters against the container's specs
    fn adjust_children_params(&mut self, width: MeasureSpec, height: MeasureSpec);

    /// Undo [`ScrollHost::adjust_children_params`]
    fn restore_children_params(&mut self);

    fn child_params(&self, child: Self::Node) -> LayoutParams;

    /// Measure `child` with the specs offered by the container.
    ///
    /// The child's own parameters are applied on top of the offered specs.
    fn measure_child(&mut self, child: Self::Node, width: MeasureSpec, height: MeasureSpec);

    fn child_measured_size(&self, child: Self::Node) -> Size;

    /// Frame of `child` in content coordinates from the last layout
    fn child_frame(&self, child: Self::Node) -> Rect;

    /// Place `child` inside the given box, honoring its margins and alignment
    fn layout_child(&mut self, child: Self::Node, left: i32, top: i32, right: i32, bottom: i32);

    fn padding(&self) -> EdgeInsets;

    fn set_padding(&mut self, padding: EdgeInsets);

    fn suggested_minimum_size(&self) -> Size;

    fn set_measured_dimension(&mut self, width: MeasuredDimension, height: MeasuredDimension);

    /// Current width of the container
    fn width(&self) -> i32;

    /// Current scroll offset as `(x, y)`
    fn scroll_offset(&self) -> (i32, i32);

    /// Move the viewport.
    ///
    /// Does nothing without a child. Otherwise `x` is clamped into
    /// `[0, max(0, child_width - (width - padding.left - padding.right))]`.
    /// Fires no events.
    fn scroll_to(&mut self, x: i32, y: i32);

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.scroll_offset();
        self.scroll_to(x + dx, y + dy);
    }

    fn layout_direction(&self) -> LayoutDirection;

    /// Whether `node` is currently attached somewhere below the container
    fn is_descendant(&self, node: Self::Node) -> bool;

    /// Bounds of a descendant in the container's content coordinates
    fn descendant_rect(&self, node: Self::Node) -> Option<Rect>;

    /// Ask the host to schedule a new measure and layout pass
    fn request_layout(&mut self);

    /// Opaque state of the view itself, persisted with the scroll offset
    fn save_super_state(&self) -> Vec<u8> {
        Vec::new()
    }

    fn restore_super_state(&mut self, _state: &[u8]) {}
}

/// Highest `x` offset [`ScrollHost::scroll_to`] accepts for a child of `child_width`
pub fn max_scroll_x(child_width: i32, width: i32, padding: EdgeInsets) -> i32 {
    (child_width - (width - padding.left - padding.right)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll_x() {
        assert_eq!(max_scroll_x(1000, 300, EdgeInsets::ZERO), 700);
        assert_eq!(max_scroll_x(1000, 300, EdgeInsets::new(10, 0, 30, 0)), 740);
        assert_eq!(max_scroll_x(200, 300, EdgeInsets::ZERO), 0);
    }
}
