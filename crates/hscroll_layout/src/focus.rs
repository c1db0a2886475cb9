//! Bringing a focused descendant into view

use hscroll_core::Rect;

use crate::host::ScrollHost;

/// What the container currently shows, in content coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealViewport {
    pub scroll_x: i32,
    pub width: i32,
    /// Right edge of the content child's frame
    pub content_right: i32,
    /// Width of the content child's frame
    pub content_width: i32,
}

/// Smallest horizontal scroll that puts `rect` on screen.
///
/// A rect wider than the viewport is aligned by its leading edge in the
/// direction of travel. `fading_edge` shrinks the screen on each side that is
/// not also the edge of the content.
pub fn reveal_delta(rect: Rect, viewport: RevealViewport, fading_edge: i32) -> i32 {
    if viewport.width <= 0 {
        return 0;
    }

    let mut screen_left = viewport.scroll_x;
    let mut screen_right = screen_left + viewport.width;

    if rect.left > 0 {
        screen_left += fading_edge;
    }
    if rect.right < viewport.content_width {
        screen_right -= fading_edge;
    }

    if rect.right > screen_right && rect.left > screen_left {
        let delta = if rect.width() > viewport.width {
            rect.left - screen_left
        } else {
            rect.right - screen_right
        };
        delta.min(viewport.content_right - screen_right)
    } else if rect.left < screen_left && rect.right < screen_right {
        let delta = if rect.width() > viewport.width {
            -(screen_right - rect.right)
        } else {
            -(screen_left - rect.left)
        };
        delta.max(-viewport.scroll_x)
    } else {
        0
    }
}

/// Scroll `host` so `node` is fully visible. Returns the applied delta.
pub fn scroll_to_child<H: ScrollHost>(host: &mut H, node: H::Node, fading_edge: i32) -> i32 {
    let Some(child) = host.child() else {
        return 0;
    };
    let Some(rect) = host.descendant_rect(node) else {
        return 0;
    };

    let frame = host.child_frame(child);
    let viewport = RevealViewport {
        scroll_x: host.scroll_offset().0,
        width: host.width(),
        content_right: frame.right,
        content_width: frame.width(),
    };

    let delta = reveal_delta(rect, viewport, fading_edge);
    tracing::trace!(?node, ?rect, delta, "reveal focused child");
    if delta != 0 {
        host.scroll_by(delta, 0);
    }
    delta
}
