#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
//! Layout engine for plotwise charts.
//!
//! Charts are described by immutable option records ([`GraphOptions`]).
//! [`LayoutEngine`] turns those options, a canvas size and the series
//! names into a [`ChartLayout`]: non-overlapping pixel rectangles for the
//! banner, title, legend, axes, plot area and optional summary strip.

mod engine;
mod legend;
mod options;

pub use engine::{ChartLayout, LayoutEngine, Region};
pub use legend::{LegendGrid, LegendSlot};
pub use options::{
    AxisOptions, GraphOptions, GraphType, MainOptions, SummaryAlignment, SummaryBehavior,
    SummaryOptions, TextBoxOptions, ZoomMode, ZoomOptions, DEFAULT_MARGIN_PX,
    DEFAULT_MARKER_SIZE_PX, DEFAULT_TEXT_SIZE_PX,
};
