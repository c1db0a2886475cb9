//! Child layout parameters
//!
//! [`LayoutParams`] is the parameter type the container understands: a
//! requested size per axis, margins and alignment. Parameters coming from
//! other containers arrive as [`IncomingParams`] and are converted, keeping
//! whatever they share with [`LayoutParams`].

use serde::{Deserialize, Serialize};

use hscroll_core::{child_measure_spec, Dimension, EdgeInsets, MeasureSpec, Rect, Size};

/// Placement of a child inside the box its parent gives it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Start,
    Center,
    End,
    /// Fill the box unless the size is fixed
    #[default]
    Stretch,
}

/// Layout parameters of a child view
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub width: Dimension,
    pub height: Dimension,
    pub margins: EdgeInsets,
    pub horizontal_alignment: Alignment,
    pub vertical_alignment: Alignment,
    /// Dimensions replaced by percent resolution, put back after layout
    #[serde(skip)]
    original: Option<(Dimension, Dimension)>,
}

impl LayoutParams {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn fixed(width: i32, height: i32) -> Self {
        Self::new(Dimension::Px(width), Dimension::Px(height))
    }

    pub fn with_margins(mut self, margins: EdgeInsets) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Measured width plus horizontal margins
    pub fn desired_width(&self, measured: Size) -> i32 {
        measured.width.saturating_add(self.margins.horizontal())
    }

    /// Measured height plus vertical margins
    pub fn desired_height(&self, measured: Size) -> i32 {
        measured.height.saturating_add(self.margins.vertical())
    }

    /// Specs to measure the child with, given the specs offered to it
    pub fn measure_specs(&self, width: MeasureSpec, height: MeasureSpec) -> (MeasureSpec, MeasureSpec) {
        (
            child_measure_spec(width, self.margins.horizontal(), self.width),
            child_measure_spec(height, self.margins.vertical(), self.height),
        )
    }

    /// Resolve percent dimensions against the parent's specs.
    ///
    /// Percentages under an unconstrained spec stay as they are and measure
    /// like wrap-content. Repeated calls before [`LayoutParams::restore`]
    /// resolve from the original dimensions again.
    pub fn adjust(&mut self, width: MeasureSpec, height: MeasureSpec) {
        let (original_width, original_height) = self.original.unwrap_or((self.width, self.height));
        let resolved_width = resolve_percent(original_width, width);
        let resolved_height = resolve_percent(original_height, height);

        if resolved_width != original_width || resolved_height != original_height {
            self.original = Some((original_width, original_height));
        } else {
            self.original = None;
        }
        self.width = resolved_width;
        self.height = resolved_height;
    }

    /// Undo [`LayoutParams::adjust`]
    pub fn restore(&mut self) {
        if let Some((width, height)) = self.original.take() {
            self.width = width;
            self.height = height;
        }
    }

    pub fn is_adjusted(&self) -> bool {
        self.original.is_some()
    }

    /// Frame of a child with `measured` size inside the box `(left, top, right, bottom)`
    pub fn child_frame(&self, measured: Size, left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        let (x, width) = place(
            self.horizontal_alignment,
            self.width,
            measured.width,
            left,
            right,
            self.margins.left,
            self.margins.right,
        );
        let (y, height) = place(
            self.vertical_alignment,
            self.height,
            measured.height,
            top,
            bottom,
            self.margins.top,
            self.margins.bottom,
        );

        Rect::from_origin_size(x, y, Size::new(width, height))
    }
}

fn resolve_percent(dimension: Dimension, spec: MeasureSpec) -> Dimension {
    match dimension {
        Dimension::Percent(fraction) if !spec.is_unspecified() => {
            Dimension::Px((spec.size as f32 * fraction).round() as i32)
        }
        other => other,
    }
}

fn place(
    alignment: Alignment,
    dimension: Dimension,
    measured: i32,
    start: i32,
    end: i32,
    margin_start: i32,
    margin_end: i32,
) -> (i32, i32) {
    let available = (end - start - margin_start - margin_end).max(0);

    match alignment {
        Alignment::Stretch if !matches!(dimension, Dimension::Px(_)) => {
            (start + margin_start, available)
        }
        Alignment::Start | Alignment::Stretch => (start + margin_start, measured),
        Alignment::Center => (
            start + (end - start - measured + margin_start - margin_end) / 2,
            measured,
        ),
        Alignment::End => (end - margin_end - measured, measured),
    }
}

/// Gravity carried by frame-style parameters, per axis when set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gravity {
    pub horizontal: Option<Alignment>,
    pub vertical: Option<Alignment>,
}

/// Parameters handed to the container by a caller that may not know its type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomingParams {
    Common(LayoutParams),
    Frame {
        width: Dimension,
        height: Dimension,
        margins: EdgeInsets,
        gravity: Gravity,
    },
    Margin {
        width: Dimension,
        height: Dimension,
        margins: EdgeInsets,
    },
    Plain {
        width: Dimension,
        height: Dimension,
    },
}

impl From<IncomingParams> for LayoutParams {
    fn from(params: IncomingParams) -> Self {
        match params {
            IncomingParams::Common(mut params) => {
                params.restore();
                params
            }
            IncomingParams::Frame {
                width,
                height,
                margins,
                gravity,
            } => LayoutParams::new(width, height)
                .with_margins(margins)
                .with_alignment(
                    gravity.horizontal.unwrap_or_default(),
                    gravity.vertical.unwrap_or_default(),
                ),
            IncomingParams::Margin {
                width,
                height,
                margins,
            } => LayoutParams::new(width, height).with_margins(margins),
            IncomingParams::Plain { width, height } => LayoutParams::new(width, height),
        }
    }
}

impl From<LayoutParams> for IncomingParams {
    fn from(params: LayoutParams) -> Self {
        IncomingParams::Common(params)
    }
}

/// Whether `params` can be used by the container without conversion
pub fn check_layout_params(params: &IncomingParams) -> bool {
    matches!(params, IncomingParams::Common(_))
}

/// Convert any incoming parameters into [`LayoutParams`]
pub fn generate_layout_params(params: IncomingParams) -> LayoutParams {
    params.into()
}

/// Parameters given to a child added without any
pub fn generate_default_layout_params() -> LayoutParams {
    LayoutParams::default()
}
