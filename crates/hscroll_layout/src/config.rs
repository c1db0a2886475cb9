//! Scroll view configuration
//!
//! Loaded from TOML, every key optional:
//!
//! ```toml
//! scroll_enabled = true
//! touch_slop = 8
//! fading_edge_length = 0
//! min_width = 0
//! min_height = 0
//! ```

use serde::{Deserialize, Serialize};

use hscroll_core::Size;

use crate::error::Result;

/// Default distance a touch must travel before a drag starts
pub const DEFAULT_TOUCH_SLOP: i32 = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollViewConfig {
    /// Initial state of the touch gate
    pub scroll_enabled: bool,
    /// Pixels a touch must travel before it becomes a drag
    pub touch_slop: i32,
    /// Inset kept clear on scrolled edges when revealing a focused child
    pub fading_edge_length: i32,
    /// Suggested minimum width of the container
    pub min_width: i32,
    /// Suggested minimum height of the container
    pub min_height: i32,
}

impl Default for ScrollViewConfig {
    fn default() -> Self {
        Self {
            scroll_enabled: true,
            touch_slop: DEFAULT_TOUCH_SLOP,
            fading_edge_length: 0,
            min_width: 0,
            min_height: 0,
        }
    }
}

impl ScrollViewConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ScrollViewConfig = toml::from_str(source)?;
        Ok(config.sanitized())
    }

    pub fn scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    pub fn touch_slop(mut self, slop: i32) -> Self {
        self.touch_slop = slop.max(0);
        self
    }

    pub fn fading_edge_length(mut self, length: i32) -> Self {
        self.fading_edge_length = length.max(0);
        self
    }

    pub fn min_size(mut self, width: i32, height: i32) -> Self {
        self.min_width = width.max(0);
        self.min_height = height.max(0);
        self
    }

    pub fn suggested_minimum_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    fn sanitized(mut self) -> Self {
        self.touch_slop = self.touch_slop.max(0);
        self.fading_edge_length = self.fading_edge_length.max(0);
        self.min_width = self.min_width.max(0);
        self.min_height = self.min_height.max(0);
        self
    }
}
