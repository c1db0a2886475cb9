//! Measure specs
//!
//! A parent hands each child one [`MeasureSpec`] per axis. The spec is a
//! size plus a mode that says how binding that size is:
//!
//! - [`MeasureMode::Exact`]: the child must be exactly this size
//! - [`MeasureMode::AtMost`]: the child may be as large as this size
//! - [`MeasureMode::Unspecified`]: no constraint, the child reports its natural size

use serde::{Deserialize, Serialize};

/// How binding a [`MeasureSpec`] size is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureMode {
    /// No constraint
    #[default]
    Unspecified,
    /// Upper bound
    AtMost,
    /// Exact size
    Exact,
}

/// A size constraint for one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub size: i32,
    pub mode: MeasureMode,
}

impl MeasureSpec {
    pub fn new(size: i32, mode: MeasureMode) -> Self {
        Self {
            size: size.max(0),
            mode,
        }
    }

    pub fn exact(size: i32) -> Self {
        Self::new(size, MeasureMode::Exact)
    }

    pub fn at_most(size: i32) -> Self {
        Self::new(size, MeasureMode::AtMost)
    }

    /// Unconstrained spec. The size is carried along but never binding.
    pub fn unspecified() -> Self {
        Self::new(0, MeasureMode::Unspecified)
    }

    pub fn is_unspecified(&self) -> bool {
        self.mode == MeasureMode::Unspecified
    }

    /// Resolve a content size against this spec, dropping the too-small flag
    pub fn resolve(&self, content: i32) -> i32 {
        resolve_size_and_state(content, *self, false).size
    }
}

/// Result of resolving a desired size against a spec
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MeasuredDimension {
    pub size: i32,
    /// Set when an at-most spec was smaller than the desired size
    pub too_small: bool,
}

impl MeasuredDimension {
    pub fn new(size: i32) -> Self {
        Self {
            size,
            too_small: false,
        }
    }
}

/// Reconcile a desired size with the parent's constraint.
///
/// Exact specs win outright, at-most specs cap the desired size and flag the
/// truncation, unspecified specs pass the desired size through. The
/// `child_too_small` flag is merged into the result for containers that want
/// to propagate their children's state; pass `false` to contribute none.
pub fn resolve_size_and_state(
    desired: i32,
    spec: MeasureSpec,
    child_too_small: bool,
) -> MeasuredDimension {
    let desired = desired.max(0);
    let (size, too_small) = match spec.mode {
        MeasureMode::AtMost if spec.size < desired => (spec.size, true),
        MeasureMode::AtMost | MeasureMode::Unspecified => (desired, false),
        MeasureMode::Exact => (spec.size, false),
    };

    MeasuredDimension {
        size,
        too_small: too_small || child_too_small,
    }
}

/// Requested size of a child along one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Fixed size in pixels
    Px(i32),
    /// As large as the parent allows
    MatchParent,
    /// As large as the content
    #[default]
    WrapContent,
    /// Fraction (0.0-1.0) of the parent's size, resolved before measuring
    Percent(f32),
}

/// Build the spec a child is measured with along one axis.
///
/// `margins` is the child's total margin on that axis and is taken out of the
/// space the parent offers.
pub fn child_measure_spec(parent: MeasureSpec, margins: i32, dimension: Dimension) -> MeasureSpec {
    let available = (parent.size - margins).max(0);

    match (dimension, parent.mode) {
        (Dimension::Px(px), MeasureMode::Unspecified) => MeasureSpec::exact(px),
        (Dimension::Px(px), _) => MeasureSpec::exact(px.min(available)),
        (_, MeasureMode::Unspecified) => MeasureSpec::unspecified(),
        (Dimension::MatchParent, MeasureMode::Exact) => MeasureSpec::exact(available),
        (Dimension::MatchParent, MeasureMode::AtMost)
        | (Dimension::WrapContent, _)
        | (Dimension::Percent(_), _) => MeasureSpec::at_most(available),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact_ignores_desired() {
        let dim = resolve_size_and_state(1000, MeasureSpec::exact(300), false);
        assert_eq!(dim, MeasuredDimension::new(300));
    }

    #[test]
    fn test_resolve_at_most_caps_and_flags() {
        let capped = resolve_size_and_state(1000, MeasureSpec::at_most(300), false);
        assert_eq!(capped.size, 300);
        assert!(capped.too_small);

        let fits = resolve_size_and_state(200, MeasureSpec::at_most(300), false);
        assert_eq!(fits, MeasuredDimension::new(200));
    }

    #[test]
    fn test_resolve_unspecified_passes_through() {
        let dim = resolve_size_and_state(1234, MeasureSpec::unspecified(), false);
        assert_eq!(dim, MeasuredDimension::new(1234));
    }

    #[test]
    fn test_resolve_merges_child_state() {
        let dim = resolve_size_and_state(10, MeasureSpec::exact(20), true);
        assert!(dim.too_small);
    }

    #[test]
    fn test_negative_sizes_clamp_to_zero() {
        assert_eq!(MeasureSpec::exact(-5).size, 0);
        assert_eq!(MeasureSpec::unspecified().resolve(-10), 0);
    }

    #[test]
    fn test_child_spec_fixed_size() {
        assert_eq!(
            child_measure_spec(MeasureSpec::exact(300), 20, Dimension::Px(500)),
            MeasureSpec::exact(280)
        );
        assert_eq!(
            child_measure_spec(MeasureSpec::unspecified(), 20, Dimension::Px(500)),
            MeasureSpec::exact(500)
        );
    }

    #[test]
    fn test_child_spec_match_parent() {
        assert_eq!(
            child_measure_spec(MeasureSpec::exact(300), 0, Dimension::MatchParent),
            MeasureSpec::exact(300)
        );
        assert_eq!(
            child_measure_spec(MeasureSpec::at_most(300), 10, Dimension::MatchParent),
            MeasureSpec::at_most(290)
        );
    }

    #[test]
    fn test_child_spec_wrap_content() {
        assert_eq!(
            child_measure_spec(MeasureSpec::exact(300), 0, Dimension::WrapContent),
            MeasureSpec::at_most(300)
        );
        assert_eq!(
            child_measure_spec(MeasureSpec::unspecified(), 40, Dimension::WrapContent),
            MeasureSpec::unspecified()
        );
    }
}
