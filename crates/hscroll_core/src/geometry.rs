//! Integer geometry shared by the measure and layout passes
//!
//! All values are device pixels. Rectangles use edge coordinates
//! (left/top/right/bottom) so frames can be handed to the host tree
//! without conversion.

use serde::{Deserialize, Serialize};

/// A width/height pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// An axis-aligned rectangle in edge coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle at `(x, y)` with the given size
    pub const fn from_origin_size(x: i32, y: i32, size: Size) -> Self {
        Self::new(x, y, x + size.width, y + size.height)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// True when the rectangle encloses no area
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Translate in place
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Translated copy
    pub fn offset_by(mut self, dx: i32, dy: i32) -> Self {
        self.offset(dx, dy);
        self
    }
}

/// Per-edge insets, used for both margins and padding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same inset on every edge
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right insets
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Horizontal layout direction of a view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Content starts at the left edge
    #[default]
    Ltr,
    /// Content starts at the right edge
    Rtl,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        matches!(self, LayoutDirection::Rtl)
    }
}
