//! hscroll Layout Engine
//!
//! A single-child horizontal scroll container. The engine
//! ([`HorizontalScrollView`]) runs measure and layout against any
//! [`ScrollHost`]; [`ScrollContainer`] pairs it with a Taffy-backed
//! [`ViewTree`].

pub mod config;
pub mod container;
pub mod error;
pub mod focus;
pub mod host;
pub mod params;
pub mod saved_state;
pub mod scroll_view;
pub mod state;
pub mod touch;
pub mod tree;

pub use config::ScrollViewConfig;
pub use container::ScrollContainer;
pub use error::{Error, Result};
pub use host::ScrollHost;
pub use params::{Alignment, Gravity, IncomingParams, LayoutParams};
pub use saved_state::ScrollSavedState;
pub use scroll_view::HorizontalScrollView;
pub use tree::{ViewId, ViewTree};

pub mod prelude {
    pub use crate::{
        Alignment, HorizontalScrollView, IncomingParams, LayoutParams, ScrollContainer,
        ScrollHost, ScrollSavedState, ScrollViewConfig, ViewId, ViewTree,
    };
    pub use hscroll_core::{
        Dimension, EdgeInsets, LayoutDirection, MeasureSpec, Rect, Size, TouchEvent, TouchPhase,
    };
}
