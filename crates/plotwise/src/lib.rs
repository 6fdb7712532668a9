//! Plotwise: interactive 2D and polar charts over chunked numeric series.
//!
//! The crate combines the storage and geometry of `plotwise-core` and the
//! region layout of `plotwise-layout` into a drawable, pannable chart:
//!
//! - [`TickSelector`] picks readable axis ticks for any range and width
//! - [`ViewportController`] turns pointer drags into pan and box-zoom
//! - [`LineSeries`] draws lines, markers and per-point styling
//! - [`Chart`] lays out, draws and routes input for a set of series
//!
//! # Example
//!
//! ```
//! use plotwise::{Chart, Color, GraphOptions, LineSeries, RecordingSurface};
//! use plotwise::{SeriesOptions, SeriesRegistry, SeriesStore, Size};
//!
//! let registry = SeriesRegistry::shared();
//! {
//!     let mut reg = registry.borrow_mut();
//!     let mut t = SeriesStore::new("t");
//!     t.push(vec![0.0, 1.0, 2.0]).unwrap();
//!     let mut v = SeriesStore::new("v").with_index_key("t");
//!     v.push(vec![3.0, 1.0, 4.0]).unwrap();
//!     reg.add(t);
//!     reg.add(v);
//! }
//!
//! let mut chart = Chart::new(GraphOptions::default(), registry);
//! chart.add_series(LineSeries::new("t", "v").with_options(SeriesOptions::line("v", Color::BLACK)));
//!
//! let mut surface = RecordingSurface::new();
//! chart.draw(&mut surface, Size::new(640.0, 480.0));
//! assert!(!surface.is_empty());
//! ```

#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::too_many_lines,
    clippy::too_many_arguments,
    clippy::needless_pass_by_value,
    clippy::trivially_copy_pass_by_ref,
    clippy::cast_lossless
)]

pub mod chart;
pub mod hover;
pub mod marker;
pub mod polar;
pub mod render;
pub mod series;
pub mod ticks;
pub mod viewport;

pub use plotwise_core::*;
pub use plotwise_layout::*;

pub use chart::{AxisTicks, Chart};
pub use hover::{HoverHit, HoverProbe, HOVER_RADIUS_PX};
pub use marker::MarkerShape;
pub use polar::{AngleUnit, PolarProjection, RadialOrigin};
pub use series::{
    AccelerationType, DrawContext, Drawable2D, LegendEntry, LineSeries, SeriesOptions,
};
pub use ticks::{format_tick_label, AxisBounds, Orientation, Tick, TickSelector};
pub use viewport::{
    AxisRange, Bounds, DragRegion, GestureState, Projection, ViewportController, ViewportOutcome,
    MIN_ZOOM_PX,
};
