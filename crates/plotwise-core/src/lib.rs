//! Core types and capabilities for the plotwise charting engine.
//!
//! This crate provides the pieces every other plotwise crate builds on:
//! - Pixel geometry: [`Point`], [`Size`], [`Rect`]
//! - Data storage: [`SeriesStore`] and the keyed [`SeriesRegistry`]
//! - Input: normalized [`PointerEvent`]s
//! - Output: the [`DrawingSurface`] and [`TextMeasurer`] capabilities, with
//!   [`RecordingSurface`] as an in-memory implementation
//! - Errors: [`ChartError`]

mod canvas;
mod color;
mod draw;
mod error;
mod event;
mod geometry;
mod registry;
mod series;
mod surface;

pub use canvas::RecordingSurface;
pub use color::{Color, ColorParseError};
pub use draw::{DrawCommand, LineDash, StrokeStyle, TextAlign, TextBaseline, TextStyle};
pub use error::{ChartError, Result};
pub use event::{Buttons, PointerEvent, PointerKind};
pub use geometry::{Point, Rect, Side, Size};
pub use registry::{SeriesRegistry, SharedRegistry};
pub use series::{ChunkPosition, SeriesStore};
pub use surface::{DrawingSurface, MonospaceMeasurer, TextMeasurer};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // GEOMETRY PROPERTIES
    // ==========================================================================

    mod geometry_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_carve_partitions_area(
                w in 0.0f32..2000.0,
                h in 0.0f32..2000.0,
                t in -50.0f32..3000.0,
                side_idx in 0usize..4,
            ) {
                let side = [Side::Top, Side::Bottom, Side::Left, Side::Right][side_idx];
                let r = Rect::new(3.0, 7.0, w, h);
                let (slice, rest) = r.carve(side, t);
                prop_assert!(slice.width >= 0.0 && slice.height >= 0.0);
                prop_assert!(rest.width >= 0.0 && rest.height >= 0.0);
                prop_assert!(!slice.overlaps(&rest));
                let total = slice.area() + rest.area();
                prop_assert!((total - r.area()).abs() <= r.area() * 1e-4 + 1e-2);
            }

            #[test]
            fn prop_from_corners_contains_both(
                ax in -500.0f32..500.0, ay in -500.0f32..500.0,
                bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ) {
                let a = Point::new(ax, ay);
                let b = Point::new(bx, by);
                let r = Rect::from_corners(a, b);
                prop_assert!(r.contains_point(&a));
                prop_assert!(r.contains_point(&b));
            }
        }
    }

    // ==========================================================================
    // REGISTRY + STORE
    // ==========================================================================

    mod storage_tests {
        use super::*;

        #[test]
        fn test_registry_streams_through_shared_handle() {
            let registry = SeriesRegistry::shared();
            registry.borrow_mut().add(SeriesStore::new("x"));
            for chunk in 0..4 {
                let base = f64::from(chunk) * 3.0;
                registry
                    .borrow_mut()
                    .require_mut("x")
                    .unwrap()
                    .stream(vec![base, base + 1.0, base + 2.0], 5)
                    .unwrap();
            }
            let reg = registry.borrow();
            let store = reg.get("x").unwrap();
            assert_eq!(store.len(), 5);
            assert_eq!(store.min(), Some(7.0));
            assert_eq!(store.max(), Some(11.0));
        }

        #[test]
        fn test_empty_push_reports_key() {
            let mut store = SeriesStore::new("pressure");
            let err = store.push(Vec::new()).unwrap_err();
            assert!(err.to_string().contains("pressure"));
        }
    }
}
