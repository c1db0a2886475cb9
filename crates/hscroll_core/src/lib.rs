//! hscroll Core
//!
//! This crate provides the primitives shared by the hscroll layout engine:
//!
//! - **Geometry**: integer rectangles, sizes, insets and layout direction
//! - **Measure Specs**: size constraints passed from parent to child
//! - **Events**: touch samples and lifecycle event ids
//! - **State Machines**: event-driven state enums
//!
//! # Example
//!
//! ```rust
//! use hscroll_core::{resolve_size_and_state, MeasureSpec};
//!
//! // A 1000px wide child offered at most 300px
//! let measured = resolve_size_and_state(1000, MeasureSpec::at_most(300), false);
//! assert_eq!(measured.size, 300);
//! assert!(measured.too_small);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod measure;

pub use events::{event_types, EventType, TouchEvent, TouchPhase};
pub use fsm::StateTransitions;
pub use geometry::{EdgeInsets, LayoutDirection, Rect, Size};
pub use measure::{
    child_measure_spec, resolve_size_and_state, Dimension, MeasureMode, MeasureSpec,
    MeasuredDimension,
};
