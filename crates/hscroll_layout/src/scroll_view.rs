//! Horizontal scroll engine
//!
//! [`HorizontalScrollView`] holds the scroll container's own state and runs
//! its measure and layout passes against a [`ScrollHost`]:
//!
//! - **Measure**: the single child is measured with an unconstrained width.
//!   Its margins become the container's padding and are counted once in the
//!   content size.
//! - **Layout**: the child is placed at the origin spanning at least the
//!   viewport, the scrollable length is recomputed, a focus request made
//!   while layout was stale is honored, and on the first layout after attach
//!   a persisted offset is restored relative to the content start.
//! - **Touch**: a gate drops scroll-initiating touches while scrolling is
//!   disabled, everything else goes to the drag scroller.
//!
//! ```rust,ignore
//! let mut view = HorizontalScrollView::new(ScrollViewConfig::default());
//! view.measure(&mut host, MeasureSpec::exact(300), MeasureSpec::exact(200));
//! view.layout(&mut host, 0, 0, 300, 200);
//! assert_eq!(view.scrollable_length(), 700);
//! ```

use std::fmt::Debug;

use hscroll_core::{event_types, resolve_size_and_state, MeasureSpec, Size, TouchEvent};

use crate::config::ScrollViewConfig;
use crate::focus::scroll_to_child;
use crate::host::{max_scroll_x, ScrollHost};
use crate::saved_state::ScrollSavedState;
use crate::state::LayoutPhase;
use crate::touch::{DragScroller, TouchGate};

/// State of a single-child horizontal scroll container
#[derive(Clone, Debug)]
pub struct HorizontalScrollView<N> {
    config: ScrollViewConfig,
    /// Desired size of the child including margins, from the last measure
    content_measured: Size,
    scrollable_length: i32,
    gate: TouchGate,
    drag: DragScroller,
    phase: LayoutPhase,
    /// Child that asked for focus while layout was stale
    pending_focus: Option<N>,
    /// Offset waiting for the first layout after attach
    saved_state: Option<ScrollSavedState>,
}

impl<N: Copy + Eq + Debug> HorizontalScrollView<N> {
    pub fn new(config: ScrollViewConfig) -> Self {
        Self {
            gate: TouchGate::new(config.scroll_enabled),
            drag: DragScroller::new(config.touch_slop),
            config,
            content_measured: Size::ZERO,
            scrollable_length: 0,
            phase: LayoutPhase::default(),
            pending_focus: None,
            saved_state: None,
        }
    }

    pub fn config(&self) -> &ScrollViewConfig {
        &self.config
    }

    /// How far the content extends past the viewport, never negative
    pub fn scrollable_length(&self) -> i32 {
        self.scrollable_length
    }

    pub fn scroll_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Takes effect on the next touch, no layout is requested
    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.gate.set_enabled(enabled);
    }

    pub fn content_measured_size(&self) -> Size {
        self.content_measured
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.phase.is_dirty()
    }

    pub fn is_first_layout(&self) -> bool {
        self.phase.is_first_layout()
    }

    pub fn pending_focus(&self) -> Option<N> {
        self.pending_focus
    }

    pub fn saved_state(&self) -> Option<&ScrollSavedState> {
        self.saved_state.as_ref()
    }

    // =========================================================================
    // Measure & Layout
    // =========================================================================

    pub fn measure<H>(&mut self, host: &mut H, width: MeasureSpec, height: MeasureSpec)
    where
        H: ScrollHost<Node = N>,
    {
        host.adjust_children_params(width, height);

        let content = match host.child() {
            None => {
                self.scrollable_length = 0;
                Size::ZERO
            }
            Some(child) => {
                host.measure_child(child, MeasureSpec::unspecified(), height);
                let params = host.child_params(child);
                let measured = host.child_measured_size(child);

                // Margins move to padding so the trailing edge is reachable.
                // They are already part of the desired size and are not added again.
                host.set_padding(params.margins);

                Size::new(params.desired_width(measured), params.desired_height(measured))
            }
        };

        let content = content.max(host.suggested_minimum_size());
        self.content_measured = content;

        let measured_width = resolve_size_and_state(content.width, width, false);
        let measured_height = resolve_size_and_state(content.height, height, false);
        tracing::trace!(
            ?content,
            width = measured_width.size,
            height = measured_height.size,
            "scroll view measured"
        );
        host.set_measured_dimension(measured_width, measured_height);
    }

    /// Lay out the child inside the container bounds `(left, top, right, bottom)`.
    ///
    /// The host's width must already reflect these bounds.
    pub fn layout<H>(&mut self, host: &mut H, left: i32, top: i32, right: i32, bottom: i32)
    where
        H: ScrollHost<Node = N>,
    {
        let width = right - left;
        let height = bottom - top;

        let mut child_width = 0;
        match host.child() {
            Some(child) => {
                child_width = host.child_measured_size(child).width;
                let content_width = self.content_measured.width;
                host.layout_child(child, 0, 0, content_width.max(width), height);
                self.scrollable_length = (content_width - width).max(0);
            }
            None => self.scrollable_length = 0,
        }

        self.phase.dispatch(event_types::LAYOUT_COMPLETE);

        if let Some(target) = self.pending_focus.take() {
            if host.is_descendant(target) {
                tracing::debug!(?target, "flushing deferred focus scroll");
                scroll_to_child(host, target, self.config.fading_edge_length);
            } else {
                tracing::debug!(?target, "dropping deferred focus, no longer a descendant");
            }
        }

        let (mut scroll_x, scroll_y) = host.scroll_offset();

        if self.phase.is_first_layout() {
            self.phase.dispatch(event_types::FIRST_LAYOUT_CONSUMED);

            let rtl = host.layout_direction().is_rtl();
            let scroll_range = max_scroll_x(child_width, width, host.padding());
            scroll_x = match self.saved_state.take() {
                Some(saved) if rtl => scroll_range - saved.offset_from_start,
                Some(saved) => saved.offset_from_start,
                None if rtl => scroll_range - scroll_x,
                None => scroll_x,
            };
            scroll_x = scroll_x.clamp(0, scroll_range);

            tracing::trace!(scroll_range, scroll_x, rtl, "first layout restoration");
        }

        // Re-commit even when unchanged so the host reclamps against the new geometry
        host.scroll_to(scroll_x, scroll_y);
        host.restore_children_params();

        tracing::trace!(
            width,
            height,
            scrollable_length = self.scrollable_length,
            "scroll view laid out"
        );
    }

    pub fn request_layout<H>(&mut self, host: &mut H)
    where
        H: ScrollHost<Node = N>,
    {
        self.phase.dispatch(event_types::LAYOUT_REQUEST);
        host.request_layout();
    }

    pub fn on_attached(&mut self) {
        tracing::debug!("scroll view attached");
        self.phase.dispatch(event_types::MOUNT);
    }

    pub fn on_detached(&mut self) {
        tracing::debug!("scroll view detached");
        self.phase.dispatch(event_types::UNMOUNT);
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// A descendant took focus. Scroll it into view now, or after the next
    /// layout if the current geometry is stale.
    pub fn request_child_focus<H>(&mut self, host: &mut H, focused: N)
    where
        H: ScrollHost<Node = N>,
    {
        if self.phase.is_dirty() {
            tracing::debug!(?focused, "layout dirty, deferring focus scroll");
            self.pending_focus = Some(focused);
        } else {
            scroll_to_child(host, focused, self.config.fading_edge_length);
        }
    }

    // =========================================================================
    // Persisted State
    // =========================================================================

    pub fn save_state<H>(&self, host: &H) -> ScrollSavedState
    where
        H: ScrollHost<Node = N>,
    {
        ScrollSavedState::capture(
            host.scroll_offset().0,
            host.layout_direction(),
            host.save_super_state(),
        )
    }

    /// Keep `state` for the next first layout and request a fresh layout
    pub fn restore_state<H>(&mut self, host: &mut H, state: ScrollSavedState)
    where
        H: ScrollHost<Node = N>,
    {
        tracing::debug!(offset_from_start = state.offset_from_start, "restoring scroll state");
        host.restore_super_state(&state.super_state);
        self.saved_state = Some(state);
        self.request_layout(host);
    }

    // =========================================================================
    // Touch
    // =========================================================================

    pub fn on_intercept_touch_event(&mut self, event: &TouchEvent) -> bool {
        if !self.gate.admits_intercept() {
            return false;
        }
        self.drag.intercept(event)
    }

    pub fn on_touch_event<H>(&mut self, host: &mut H, event: &TouchEvent) -> bool
    where
        H: ScrollHost<Node = N>,
    {
        if !self.gate.admits_touch(event.phase) {
            tracing::debug!(phase = ?event.phase, "scrolling disabled, touch ignored");
            return false;
        }
        self.drag.handle(host, event)
    }
}

impl<N: Copy + Eq + Debug> Default for HorizontalScrollView<N> {
    fn default() -> Self {
        Self::new(ScrollViewConfig::default())
    }
}
