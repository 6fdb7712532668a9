//! Integration tests for plotwise-core.
//!
//! These exercise the public API the way a chart host does: registering
//! series, streaming data into them and recording draw calls.

use plotwise_core::{
    ChartError, Color, DrawCommand, DrawingSurface, PointerEvent, PointerKind, RecordingSurface,
    Rect, SeriesRegistry, SeriesStore, StrokeStyle, TextMeasurer,
};

// =============================================================================
// Series scenarios
// =============================================================================

#[test]
fn test_push_then_push_tracks_extremes() {
    let mut store = SeriesStore::new("s");
    store.push(vec![0.0, 1.0, 2.0, 3.0, 4.0]).expect("non-empty");
    store.push(vec![5.0, 6.0]).expect("non-empty");
    assert_eq!(store.min(), Some(0.0));
    assert_eq!(store.max(), Some(6.0));
    assert_eq!(store.len(), 7);
}

#[test]
fn test_stream_retains_most_recent_five() {
    let mut store = SeriesStore::new("s");
    store.push(vec![0.0, 1.0, 2.0, 3.0, 4.0]).expect("non-empty");
    store.push(vec![5.0, 6.0]).expect("non-empty");
    store.stream(vec![7.0, 8.0, 9.0], 5).expect("non-empty");
    assert_eq!(store.len(), 5);
    assert_eq!(store.iter().collect::<Vec<_>>(), vec![5.0, 6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn test_lookups_report_not_found() {
    let mut registry = SeriesRegistry::new();
    assert!(registry.get("nope").is_none());
    assert!(matches!(
        registry.require("nope"),
        Err(ChartError::SeriesNotFound { .. })
    ));

    let mut store = SeriesStore::new("a");
    store.push(vec![1.0, 2.0]).expect("non-empty");
    registry.add(store);
    let store = registry.require("a").expect("registered");
    assert_eq!(store.value_at(1), Some(2.0));
    assert_eq!(store.value_at(2), None);
}

#[test]
fn test_dependent_series_keeps_index_key() {
    let mut registry = SeriesRegistry::new();
    registry.add(SeriesStore::new("time"));
    registry.add(SeriesStore::new("volts").with_index_key("time"));
    let volts = registry.get("volts").expect("registered");
    assert_eq!(volts.index_key(), Some("time"));
    assert!(registry.contains(volts.index_key().unwrap_or_default()));
}

// =============================================================================
// Surface + events
// =============================================================================

#[test]
fn test_recording_surface_through_trait_object() {
    let mut surface = RecordingSurface::new();
    {
        let dyn_surface: &mut dyn DrawingSurface = &mut surface;
        let width = dyn_surface.measure_width("12345", 10.0);
        dyn_surface.stroke_rect(Rect::new(0.0, 0.0, width, 10.0), &StrokeStyle::default());
        dyn_surface.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::GRID);
    }
    match &surface.commands()[0] {
        DrawCommand::StrokeRect { rect, .. } => assert!((rect.width - 30.0).abs() < 1e-4),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(surface.command_count(), 2);
}

#[test]
fn test_pointer_events_serialize() {
    let event = PointerEvent::down(10.0, 20.0).with_modifier();
    let json = serde_json::to_string(&event).expect("serializable");
    assert!(json.contains("\"down\""));
    let back: PointerEvent = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back.kind, PointerKind::Down);
    assert!(back.modifier);
}
