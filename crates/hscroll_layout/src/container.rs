//! Scroll container over a [`ViewTree`]
//!
//! [`ScrollContainer`] owns a view tree, the container view inside it and a
//! [`HorizontalScrollView`] engine. The tree is exposed to the engine through
//! a short-lived [`ScrollHost`] adapter.
//!
//! ```rust,ignore
//! let mut container = ScrollContainer::new(ScrollViewConfig::default());
//! let content = container.tree_mut().create_content(style)?;
//! container.set_child(content)?;
//! container.attach();
//! container.layout_pass(300, 200);
//! ```

use hscroll_core::{
    EdgeInsets, LayoutDirection, MeasureSpec, MeasuredDimension, Rect, Size, TouchEvent,
};

use crate::config::ScrollViewConfig;
use crate::error::Result;
use crate::host::{max_scroll_x, ScrollHost};
use crate::params::{check_layout_params, generate_layout_params, IncomingParams, LayoutParams};
use crate::saved_state::ScrollSavedState;
use crate::scroll_view::HorizontalScrollView;
use crate::tree::{ViewId, ViewTree};

/// [`ScrollHost`] view of one container inside a tree
struct TreeHost<'a> {
    tree: &'a mut ViewTree,
    view: ViewId,
}

impl ScrollHost for TreeHost<'_> {
    type Node = ViewId;

    fn child(&self) -> Option<ViewId> {
        self.tree.children(self.view).first().copied()
    }

    fn adjust_children_params(&mut self, width: MeasureSpec, height: MeasureSpec) {
        let children: Vec<ViewId> = self.tree.children(self.view).to_vec();
        for child in children {
            if let Some(params) = self.tree.params_mut(child) {
                params.adjust(width, height);
            }
        }
    }

    fn restore_children_params(&mut self) {
        let children: Vec<ViewId> = self.tree.children(self.view).to_vec();
        for child in children {
            if let Some(params) = self.tree.params_mut(child) {
                params.restore();
            }
        }
    }

    fn child_params(&self, child: ViewId) -> LayoutParams {
        self.tree.params(child).cloned().unwrap_or_default()
    }

    fn measure_child(&mut self, child: ViewId, width: MeasureSpec, height: MeasureSpec) {
        let (width, height) = self.child_params(child).measure_specs(width, height);
        if let Err(err) = self.tree.measure(child, width, height) {
            tracing::warn!(?child, %err, "failed to measure scroll child");
        }
    }

    fn child_measured_size(&self, child: ViewId) -> Size {
        self.tree.measured_size(child)
    }

    fn child_frame(&self, child: ViewId) -> Rect {
        self.tree.frame(child)
    }

    fn layout_child(&mut self, child: ViewId, left: i32, top: i32, right: i32, bottom: i32) {
        let measured = self.tree.measured_size(child);
        let frame = self
            .child_params(child)
            .child_frame(measured, left, top, right, bottom);
        if let Err(err) = self.tree.layout(child, frame) {
            tracing::warn!(?child, %err, "failed to lay out scroll child");
        }
    }

    fn padding(&self) -> EdgeInsets {
        self.tree.padding(self.view)
    }

    fn set_padding(&mut self, padding: EdgeInsets) {
        self.tree.set_padding(self.view, padding);
    }

    fn suggested_minimum_size(&self) -> Size {
        self.tree.min_size(self.view)
    }

    fn set_measured_dimension(&mut self, width: MeasuredDimension, height: MeasuredDimension) {
        self.tree
            .set_measured_size(self.view, Size::new(width.size, height.size));
    }

    fn width(&self) -> i32 {
        self.tree.frame(self.view).width()
    }

    fn scroll_offset(&self) -> (i32, i32) {
        self.tree.scroll(self.view)
    }

    fn scroll_to(&mut self, x: i32, y: i32) {
        let Some(child) = self.child() else {
            return;
        };
        let frame = self.tree.frame(self.view);
        let child_frame = self.tree.frame(child);
        let padding = self.padding();

        let max_x = max_scroll_x(child_frame.width(), frame.width(), padding);
        let max_y = (child_frame.height() - (frame.height() - padding.vertical())).max(0);
        self.tree
            .set_scroll(self.view, x.clamp(0, max_x), y.clamp(0, max_y));
    }

    fn layout_direction(&self) -> LayoutDirection {
        self.tree.direction(self.view)
    }

    fn is_descendant(&self, node: ViewId) -> bool {
        self.tree.is_descendant_of(node, self.view)
    }

    fn descendant_rect(&self, node: ViewId) -> Option<Rect> {
        self.tree.rect_in_ancestor(node, self.view)
    }

    fn request_layout(&mut self) {
        self.tree.request_layout(self.view);
    }
}

/// A horizontal scroll view with its own view tree
pub struct ScrollContainer {
    tree: ViewTree,
    view: ViewId,
    engine: HorizontalScrollView<ViewId>,
}

macro_rules! host {
    ($self:ident) => {
        &mut TreeHost {
            tree: &mut $self.tree,
            view: $self.view,
        }
    };
}

impl ScrollContainer {
    pub fn new(config: ScrollViewConfig) -> Self {
        let mut tree = ViewTree::new();
        let view = tree.create_container(config.suggested_minimum_size());
        Self {
            tree,
            view,
            engine: HorizontalScrollView::new(config),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(Self::new(ScrollViewConfig::from_toml_str(source)?))
    }

    /// The container's own view
    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Direct tree access. Call [`ScrollContainer::request_layout`] after
    /// changing anything the container depends on, or use
    /// [`ScrollContainer::update_content`].
    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn engine(&self) -> &HorizontalScrollView<ViewId> {
        &self.engine
    }

    pub fn child(&self) -> Option<ViewId> {
        self.tree.children(self.view).first().copied()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Make `child` the container's content, replacing any previous child
    pub fn set_child(&mut self, child: ViewId) -> Result<()> {
        match self.child() {
            Some(previous) if previous == child => {}
            Some(previous) => {
                self.tree.remove_child(self.view, previous)?;
                self.tree.add_child(self.view, child)?;
            }
            None => self.tree.add_child(self.view, child)?,
        }
        self.request_layout();
        Ok(())
    }

    /// Set the child along with parameters of any supported kind
    pub fn set_child_with_params(
        &mut self,
        child: ViewId,
        params: impl Into<IncomingParams>,
    ) -> Result<()> {
        let params = params.into();
        if !check_layout_params(&params) {
            tracing::debug!(?child, "converting foreign layout params");
        }
        self.tree.set_params(child, generate_layout_params(params))?;
        self.set_child(child)
    }

    /// Detach the current child, if any, returning it
    pub fn clear_child(&mut self) -> Result<Option<ViewId>> {
        let Some(child) = self.child() else {
            return Ok(None);
        };
        self.tree.remove_child(self.view, child)?;
        self.request_layout();
        Ok(Some(child))
    }

    /// Mutate the content and request a layout
    pub fn update_content<R>(&mut self, update: impl FnOnce(&mut ViewTree) -> R) -> R {
        let result = update(&mut self.tree);
        self.request_layout();
        result
    }

    pub fn attach(&mut self) {
        self.tree.set_attached(self.view, true);
        self.engine.on_attached();
    }

    pub fn detach(&mut self) {
        self.tree.set_attached(self.view, false);
        self.engine.on_detached();
    }

    pub fn is_attached(&self) -> bool {
        self.tree.is_attached(self.view)
    }

    pub fn request_layout(&mut self) {
        self.engine.request_layout(host!(self));
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.engine.is_layout_dirty()
    }

    // =========================================================================
    // Measure & Layout
    // =========================================================================

    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        self.engine.measure(host!(self), width, height);
        self.tree.measured_size(self.view)
    }

    pub fn layout(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        self.tree
            .set_frame(self.view, Rect::new(left, top, right, bottom));
        self.engine.layout(host!(self), left, top, right, bottom);
        self.tree.take_layout_request(self.view);
    }

    /// Measure with exact specs and lay out at the origin
    pub fn layout_pass(&mut self, width: i32, height: i32) {
        self.measure(MeasureSpec::exact(width), MeasureSpec::exact(height));
        self.layout(0, 0, width, height);
    }

    pub fn measured_size(&self) -> Size {
        self.tree.measured_size(self.view)
    }

    pub fn padding(&self) -> EdgeInsets {
        self.tree.padding(self.view)
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if self.tree.direction(self.view) != direction {
            self.tree.set_direction(self.view, direction);
            self.request_layout();
        }
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.tree.direction(self.view)
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_to(&mut self, x: i32) {
        let y = self.tree.scroll(self.view).1;
        let host = host!(self);
        host.scroll_to(x, y);
    }

    pub fn scroll_by(&mut self, dx: i32) {
        let host = host!(self);
        host.scroll_by(dx, 0);
    }

    pub fn scroll_x(&self) -> i32 {
        self.tree.scroll(self.view).0
    }

    pub fn scrollable_length(&self) -> i32 {
        self.engine.scrollable_length()
    }

    pub fn scroll_enabled(&self) -> bool {
        self.engine.scroll_enabled()
    }

    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.engine.set_scroll_enabled(enabled);
    }

    // =========================================================================
    // Input, focus & state
    // =========================================================================

    /// Whether the container takes over a gesture headed for its content
    pub fn intercept_touch_event(&mut self, event: &TouchEvent) -> bool {
        self.engine.on_intercept_touch_event(event)
    }

    /// Deliver a touch to the container itself
    pub fn dispatch_touch_event(&mut self, event: &TouchEvent) -> bool {
        self.engine.on_touch_event(host!(self), event)
    }

    pub fn request_child_focus(&mut self, focused: ViewId) {
        self.engine.request_child_focus(host!(self), focused);
    }

    pub fn save_state(&self) -> ScrollSavedState {
        ScrollSavedState::capture(self.scroll_x(), self.layout_direction(), Vec::new())
    }

    pub fn restore_state(&mut self, state: ScrollSavedState) {
        self.engine.restore_state(host!(self), state);
    }
}

impl Default for ScrollContainer {
    fn default() -> Self {
        Self::new(ScrollViewConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(width: f32, height: f32) -> taffy::Style {
        taffy::Style {
            size: taffy::Size {
                width: taffy::Dimension::Length(width),
                height: taffy::Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_container() {
        let mut container = ScrollContainer::default();
        container.attach();
        container.layout_pass(300, 200);

        assert_eq!(container.measured_size(), Size::new(300, 200));
        assert_eq!(container.scrollable_length(), 0);
        container.scroll_by(100);
        assert_eq!(container.scroll_x(), 0);
    }

    #[test]
    fn test_set_child_replaces_previous() {
        let mut container = ScrollContainer::default();
        let first = container.tree_mut().create_content(fixed(10.0, 10.0)).unwrap();
        let second = container.tree_mut().create_content(fixed(20.0, 10.0)).unwrap();

        container.set_child(first).unwrap();
        container.set_child(second).unwrap();
        assert_eq!(container.child(), Some(second));
        assert_eq!(container.tree().parent(first), None);

        assert_eq!(container.clear_child().unwrap(), Some(second));
        assert_eq!(container.child(), None);
    }

    #[test]
    fn test_layout_clears_tree_request() {
        let mut container = ScrollContainer::default();
        let content = container.tree_mut().create_content(fixed(500.0, 100.0)).unwrap();
        container.set_child(content).unwrap();
        assert!(container.tree().is_layout_requested(container.view()));

        container.layout_pass(300, 100);
        assert!(!container.tree().is_layout_requested(container.view()));
        assert!(!container.is_layout_dirty());
        assert_eq!(container.scrollable_length(), 200);
    }

    #[test]
    fn test_save_state_through_shared_ref() {
        let mut container = ScrollContainer::default();
        let content = container.tree_mut().create_content(fixed(500.0, 100.0)).unwrap();
        container.set_child(content).unwrap();
        container.attach();
        container.layout_pass(300, 100);
        container.scroll_to(120);

        let shared = &container;
        assert_eq!(shared.save_state(), ScrollSavedState::new(Vec::new(), 120));

        container.set_layout_direction(LayoutDirection::Rtl);
        assert_eq!(container.save_state().offset_from_start, -120);
    }

    #[test]
    fn test_direction_change_requests_layout() {
        let mut container = ScrollContainer::default();
        container.layout_pass(300, 100);
        container.set_layout_direction(LayoutDirection::Rtl);
        assert!(container.is_layout_dirty());
        assert_eq!(container.layout_direction(), LayoutDirection::Rtl);
    }
}
