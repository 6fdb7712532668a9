//! Pan/zoom viewport state.
//!
//! [`ViewportController`] turns normalized pointer events into committed
//! data bounds. It owns the active window, the full-data clamp extent and
//! the zoom history:
//!
//! - Primary press inside the plot or summary strip starts a drag.
//! - With the modifier held the drag pans, clamped to the data extent.
//! - Without it the drag sweeps a zoom box, committed on release.
//! - Leaving the surface mid-drag reverts to the bounds at press time.
//!
//! Every pixel mapping uses the scale of the most recent draw, so nothing
//! happens until [`ViewportController::observe_draw`] has been called with
//! a non-degenerate plot rectangle.

use crate::ticks::expand_span;
use plotwise_core::{Point, PointerEvent, PointerKind, Rect};
use plotwise_layout::ZoomMode;
use serde::{Deserialize, Serialize};

/// Drags narrower than this many pixels are treated as clicks.
pub const MIN_ZOOM_PX: f32 = 4.0;

/// Auto mode collapses to one axis when the other side is below this.
const AUTO_THIN_PX: f32 = 10.0;

/// ...and the zoomed side is beyond this.
const AUTO_LONG_PX: f32 = 100.0;

/// Closed interval on one data axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl AxisRange {
    /// Range between two values in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Whether `self` lies entirely inside `outer`.
    pub fn within(&self, outer: &Self) -> bool {
        self.min >= outer.min && self.max <= outer.max
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Same range widened to a non-zero span.
    pub fn expanded(&self) -> Self {
        let (min, max) = expand_span(self.min, self.max);
        Self { min, max }
    }

    /// Move by `delta`.
    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Slide into `outer` keeping the width.
    ///
    /// A window at least as wide as `outer` becomes `outer`.
    pub fn slide_within(&self, outer: &Self) -> Self {
        let width = self.span();
        if width >= outer.span() {
            return *outer;
        }
        if self.min < outer.min {
            Self {
                min: outer.min,
                max: (outer.min + width).min(outer.max),
            }
        } else if self.max > outer.max {
            Self {
                min: (outer.max - width).max(outer.min),
                max: outer.max,
            }
        } else {
            *self
        }
    }

    /// Overlap with `outer`, or `None` when nothing of width remains.
    pub fn intersect(&self, outer: &Self) -> Option<Self> {
        let min = self.min.max(outer.min);
        let max = self.max.min(outer.max);
        (max > min).then_some(Self { min, max })
    }
}

/// Visible window on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Horizontal data range
    pub x: AxisRange,
    /// Vertical data range
    pub y: AxisRange,
}

impl Bounds {
    /// Bounds from two ranges.
    pub const fn new(x: AxisRange, y: AxisRange) -> Self {
        Self { x, y }
    }

    /// Smallest bounds covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.x.union(&other.x), self.y.union(&other.y))
    }

    /// Both axes widened to non-zero spans.
    pub fn expanded(&self) -> Self {
        Self::new(self.x.expanded(), self.y.expanded())
    }

    /// Whether both axes lie inside `outer`.
    pub fn within(&self, outer: &Self) -> bool {
        self.x.within(&outer.x) && self.y.within(&outer.y)
    }
}

/// Linear pixel/data mapping for one drawn region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Region the bounds are drawn into
    pub rect: Rect,
    /// Data shown across `rect`
    pub bounds: Bounds,
}

impl Projection {
    /// Mapping of `bounds` onto `rect`, or `None` for an empty rectangle.
    pub fn new(rect: Rect, bounds: Bounds) -> Option<Self> {
        (rect.width > 0.0 && rect.height > 0.0).then_some(Self {
            rect,
            bounds: bounds.expanded(),
        })
    }

    /// Data units per horizontal pixel.
    pub fn scale_x(&self) -> f64 {
        self.bounds.x.span() / f64::from(self.rect.width)
    }

    /// Data units per vertical pixel.
    pub fn scale_y(&self) -> f64 {
        self.bounds.y.span() / f64::from(self.rect.height)
    }

    /// Data coordinates under a pixel; larger y is higher on screen.
    pub fn to_data(&self, p: Point) -> (f64, f64) {
        let x = self.bounds.x.min + f64::from(p.x - self.rect.x) * self.scale_x();
        let y = self.bounds.y.max - f64::from(p.y - self.rect.y) * self.scale_y();
        (x, y)
    }

    /// Pixel position of a data point.
    pub fn to_pixel(&self, x: f64, y: f64) -> Point {
        let px = f64::from(self.rect.x) + (x - self.bounds.x.min) / self.scale_x();
        let py = f64::from(self.rect.y) + (self.bounds.y.max - y) / self.scale_y();
        Point::new(px as f32, py as f32)
    }
}

/// Which drawn region a drag started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRegion {
    /// Main plot
    Plot,
    /// Summary strip
    Summary,
}

/// Pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No button held
    Idle,
    /// Primary button held since `anchor`
    Dragging {
        /// Press position
        anchor: Point,
        /// Latest position seen
        last: Point,
        /// Region the press landed in
        region: DragRegion,
        /// Committed bounds at press time
        origin: Option<Bounds>,
        /// Whether any pan step was applied
        panned: bool,
    },
}

/// What an event did to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportOutcome {
    /// Nothing changed
    None,
    /// Pointer moved with no button held
    Hover(Point),
    /// Zoom box being swept, in pixels
    Preview(Rect),
    /// Visible bounds moved by a pan
    Panned(Bounds),
    /// A zoom box was committed
    Zoomed(Bounds),
    /// A drag ended without committing; bounds reverted
    Cancelled,
}

/// Approves or rejects a change from the current bounds to the proposed ones.
pub type VetoHook = Box<dyn FnMut(Option<&Bounds>, &Bounds) -> bool>;

/// Observes committed bounds.
pub type NotifyHook = Box<dyn FnMut(&Bounds)>;

#[derive(Default)]
struct Hooks {
    pan_start: Option<VetoHook>,
    pan_end: Option<NotifyHook>,
    zoom_start: Option<VetoHook>,
    zoom_end: Option<NotifyHook>,
}

/// Owns the visible bounds, the clamp extent and the zoom stack.
pub struct ViewportController {
    mode: ZoomMode,
    current: Option<Bounds>,
    max_bounds: Option<Bounds>,
    zoom_stack: Vec<Bounds>,
    plot: Option<Projection>,
    summary: Option<Projection>,
    gesture: GestureState,
    hooks: Hooks,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ZoomMode::Auto)
    }
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("mode", &self.mode)
            .field("current", &self.current)
            .field("max_bounds", &self.max_bounds)
            .field("zoom_stack", &self.zoom_stack)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

impl ViewportController {
    /// Unrestricted viewport with an empty history.
    pub fn new(mode: ZoomMode) -> Self {
        Self {
            mode,
            current: None,
            max_bounds: None,
            zoom_stack: Vec::new(),
            plot: None,
            summary: None,
            gesture: GestureState::Idle,
            hooks: Hooks::default(),
        }
    }

    /// Change how zoom boxes map to axes.
    pub fn set_mode(&mut self, mode: ZoomMode) {
        self.mode = mode;
    }

    /// Committed window, or `None` when showing all data.
    pub const fn current_bounds(&self) -> Option<Bounds> {
        self.current
    }

    /// Clamp extent captured from the first draw.
    pub const fn max_bounds(&self) -> Option<Bounds> {
        self.max_bounds
    }

    /// Zoom history, oldest first.
    pub fn zoom_stack(&self) -> &[Bounds] {
        &self.zoom_stack
    }

    /// Whether any zoom or pan is on the stack.
    pub fn zoom_active(&self) -> bool {
        !self.zoom_stack.is_empty()
    }

    /// Gesture in progress.
    pub const fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Mapping used for the main plot in the last draw.
    pub const fn plot_projection(&self) -> Option<Projection> {
        self.plot
    }

    /// Mapping used for the summary strip in the last draw.
    pub const fn summary_projection(&self) -> Option<Projection> {
        self.summary
    }

    /// Register a veto consulted before each pan step.
    pub fn on_pan_start(&mut self, hook: impl FnMut(Option<&Bounds>, &Bounds) -> bool + 'static) {
        self.hooks.pan_start = Some(Box::new(hook));
    }

    /// Register a callback run after each pan step.
    pub fn on_pan_end(&mut self, hook: impl FnMut(&Bounds) + 'static) {
        self.hooks.pan_end = Some(Box::new(hook));
    }

    /// Register a veto consulted before a zoom box is committed.
    pub fn on_zoom_start(&mut self, hook: impl FnMut(Option<&Bounds>, &Bounds) -> bool + 'static) {
        self.hooks.zoom_start = Some(Box::new(hook));
    }

    /// Register a callback run after a zoom box is committed.
    pub fn on_zoom_end(&mut self, hook: impl FnMut(&Bounds) + 'static) {
        self.hooks.zoom_end = Some(Box::new(hook));
    }

    /// Record what was just drawn.
    ///
    /// `drawn` is the window mapped onto `plot`; `extent` is the full data
    /// extent, captured as the clamp boundary the first time one is seen.
    /// The summary strip always shows the clamp extent.
    pub fn observe_draw(
        &mut self,
        drawn: Bounds,
        extent: Option<Bounds>,
        plot: Rect,
        summary: Option<Rect>,
    ) {
        if self.max_bounds.is_none() {
            if let Some(extent) = extent {
                self.max_bounds = Some(extent.expanded());
            }
        }
        self.plot = Projection::new(plot, drawn);
        self.summary = match (summary, self.max_bounds) {
            (Some(rect), Some(max)) => Projection::new(rect, max),
            _ => None,
        };
    }

    /// Forget the clamp extent so the next draw recaptures it.
    pub fn clear_max_bounds(&mut self) {
        self.max_bounds = None;
    }

    /// Data coordinates under `position` in `region`.
    pub fn pixel_to_data(&self, region: DragRegion, position: Point) -> Option<(f64, f64)> {
        self.projection(region).map(|p| p.to_data(position))
    }

    fn projection(&self, region: DragRegion) -> Option<Projection> {
        match region {
            DragRegion::Plot => self.plot,
            DragRegion::Summary => self.summary,
        }
    }

    fn region_at(&self, position: Point) -> Option<DragRegion> {
        if self.plot.is_some_and(|p| p.rect.contains_point(&position)) {
            Some(DragRegion::Plot)
        } else if self.summary.is_some_and(|p| p.rect.contains_point(&position)) {
            Some(DragRegion::Summary)
        } else {
            None
        }
    }

    /// Feed one pointer event through the gesture state machine.
    pub fn handle_event(&mut self, event: &PointerEvent) -> ViewportOutcome {
        match (event.kind, self.gesture) {
            (PointerKind::Down, GestureState::Idle) if event.buttons.primary() => {
                let Some(region) = self.region_at(event.position) else {
                    return ViewportOutcome::None;
                };
                self.gesture = GestureState::Dragging {
                    anchor: event.position,
                    last: event.position,
                    region,
                    origin: self.current,
                    panned: false,
                };
                ViewportOutcome::None
            }
            (PointerKind::Move, GestureState::Idle) => ViewportOutcome::Hover(event.position),
            (PointerKind::Move, GestureState::Dragging { .. }) if !event.buttons.primary() => {
                self.cancel()
            }
            (PointerKind::Move, GestureState::Dragging { anchor, region, .. }) => {
                if event.modifier {
                    self.pan_step(event.position)
                } else {
                    self.gesture = self.with_last(event.position);
                    self.zoom_rect(region, anchor, event.position)
                        .map_or(ViewportOutcome::None, ViewportOutcome::Preview)
                }
            }
            (PointerKind::Up, GestureState::Dragging { anchor, region, origin, panned, .. }) => {
                self.gesture = GestureState::Idle;
                if panned || event.modifier {
                    self.commit_pan(origin)
                } else {
                    self.commit_zoom(region, anchor, event.position)
                }
            }
            (PointerKind::Leave, GestureState::Dragging { .. }) => self.cancel(),
            (PointerKind::Up | PointerKind::Leave, GestureState::Idle) => ViewportOutcome::None,
            (PointerKind::Down | PointerKind::Enter, _) => ViewportOutcome::None,
        }
    }

    fn with_last(&self, position: Point) -> GestureState {
        match self.gesture {
            GestureState::Dragging { anchor, region, origin, panned, .. } => GestureState::Dragging {
                anchor,
                last: position,
                region,
                origin,
                panned,
            },
            GestureState::Idle => GestureState::Idle,
        }
    }

    fn cancel(&mut self) -> ViewportOutcome {
        if let GestureState::Dragging { origin, panned, .. } = self.gesture {
            self.gesture = GestureState::Idle;
            if panned {
                self.current = origin;
            }
            log::debug!("drag cancelled, bounds restored to {origin:?}");
        }
        ViewportOutcome::Cancelled
    }

    /// The window a pan or zoom starts from.
    fn base_bounds(&self) -> Option<Bounds> {
        self.current.or_else(|| self.plot.map(|p| p.bounds))
    }

    fn pan_step(&mut self, position: Point) -> ViewportOutcome {
        let GestureState::Dragging { anchor, last, region, origin, panned } = self.gesture else {
            return ViewportOutcome::None;
        };
        self.gesture = GestureState::Dragging {
            anchor,
            last: position,
            region,
            origin,
            panned,
        };
        let (Some(projection), Some(base)) = (self.projection(region), self.base_bounds()) else {
            return ViewportOutcome::None;
        };

        // Plot drags move the data with the pointer; summary drags move the window.
        let sign = match region {
            DragRegion::Plot => 1.0,
            DragRegion::Summary => -1.0,
        };
        let dx = sign * projection.scale_x() * f64::from(last.x - position.x);
        let dy = sign * projection.scale_y() * f64::from(position.y - last.y);
        let mut proposed = Bounds::new(base.x.shifted(dx), base.y.shifted(dy));
        if let Some(max) = self.max_bounds {
            proposed = Bounds::new(proposed.x.slide_within(&max.x), proposed.y.slide_within(&max.y));
        }
        if proposed == base {
            return ViewportOutcome::None;
        }

        if let Some(veto) = self.hooks.pan_start.as_mut() {
            if !veto(self.current.as_ref(), &proposed) {
                log::debug!("pan to {proposed:?} vetoed");
                return ViewportOutcome::None;
            }
        }
        self.current = Some(proposed);
        self.gesture = GestureState::Dragging {
            anchor,
            last: position,
            region,
            origin,
            panned: true,
        };
        if let Some(notify) = self.hooks.pan_end.as_mut() {
            notify(&proposed);
        }
        ViewportOutcome::Panned(proposed)
    }

    fn commit_pan(&mut self, origin: Option<Bounds>) -> ViewportOutcome {
        let start = origin.or_else(|| self.plot.map(|p| p.bounds));
        match self.current {
            Some(bounds) if Some(bounds) == start => {
                self.current = origin;
                log::debug!("pan ended where it started, nothing pushed");
                ViewportOutcome::None
            }
            Some(bounds) => {
                self.zoom_stack.push(bounds);
                log::debug!("pan committed, stack depth {}", self.zoom_stack.len());
                ViewportOutcome::Panned(bounds)
            }
            None => ViewportOutcome::None,
        }
    }

    /// Which axes a drag from `anchor` to `position` zooms.
    fn zoom_axes(&self, anchor: Point, position: Point) -> (bool, bool) {
        let w = (position.x - anchor.x).abs();
        let h = (position.y - anchor.y).abs();
        match self.mode {
            ZoomMode::X => (true, false),
            ZoomMode::Y => (false, true),
            ZoomMode::Xy => (true, true),
            ZoomMode::Auto if w < AUTO_THIN_PX && h > AUTO_LONG_PX => (false, true),
            ZoomMode::Auto if h < AUTO_THIN_PX && w > AUTO_LONG_PX => (true, false),
            ZoomMode::Auto => (true, true),
        }
    }

    /// Zoom box in pixels after mode collapse, or `None` when the raw drag
    /// is below the click threshold on either axis.
    fn zoom_rect(&self, region: DragRegion, anchor: Point, position: Point) -> Option<Rect> {
        let rect = self.projection(region)?.rect;
        let swept = Rect::from_corners(anchor, position);
        if swept.width < MIN_ZOOM_PX || swept.height < MIN_ZOOM_PX {
            return None;
        }
        let (zoom_x, zoom_y) = self.zoom_axes(anchor, position);
        let (x, width) = if zoom_x { (swept.x, swept.width) } else { (rect.x, rect.width) };
        let (y, height) = if zoom_y { (swept.y, swept.height) } else { (rect.y, rect.height) };
        Some(Rect::new(x, y, width, height))
    }

    fn commit_zoom(&mut self, region: DragRegion, anchor: Point, position: Point) -> ViewportOutcome {
        let Some(rect) = self.zoom_rect(region, anchor, position) else {
            log::debug!("zoom drag from {anchor:?} to {position:?} too small, ignored");
            return ViewportOutcome::None;
        };
        let (Some(projection), Some(base)) = (self.projection(region), self.base_bounds()) else {
            return ViewportOutcome::None;
        };
        let (zoom_x, zoom_y) = self.zoom_axes(anchor, position);
        let (x0, y0) = projection.to_data(Point::new(rect.x, rect.y));
        let (x1, y1) = projection.to_data(Point::new(rect.right(), rect.bottom()));
        let mut proposed = Bounds::new(
            if zoom_x { AxisRange::new(x0, x1) } else { base.x },
            if zoom_y { AxisRange::new(y0, y1) } else { base.y },
        );
        if let Some(max) = self.max_bounds {
            let (Some(x), Some(y)) = (proposed.x.intersect(&max.x), proposed.y.intersect(&max.y))
            else {
                log::debug!("zoom {proposed:?} lies outside {max:?}, ignored");
                return ViewportOutcome::None;
            };
            proposed = Bounds::new(x, y);
        }

        if let Some(veto) = self.hooks.zoom_start.as_mut() {
            if !veto(self.current.as_ref(), &proposed) {
                log::debug!("zoom to {proposed:?} vetoed");
                return ViewportOutcome::None;
            }
        }
        self.zoom_stack.push(proposed);
        self.current = Some(proposed);
        log::debug!("zoom committed, stack depth {}", self.zoom_stack.len());
        if let Some(notify) = self.hooks.zoom_end.as_mut() {
            notify(&proposed);
        }
        ViewportOutcome::Zoomed(proposed)
    }

    /// Step back one level of zoom history.
    ///
    /// Returns the bounds now in effect; `None` means all data.
    pub fn zoom_out(&mut self) -> Option<Bounds> {
        self.zoom_stack.pop();
        match self.zoom_stack.last() {
            Some(top) => {
                self.current = Some(*top);
                log::debug!("zoom out, stack depth {}", self.zoom_stack.len());
            }
            None => self.zoom_reset(),
        }
        self.current
    }

    /// Drop all history and show all data.
    pub fn zoom_reset(&mut self) {
        self.zoom_stack.clear();
        self.current = None;
        self.gesture = GestureState::Idle;
        log::debug!("zoom reset");
    }

    /// Replace the visible window without touching the history.
    pub fn set_current_bounds(&mut self, bounds: Option<Bounds>) {
        self.current = bounds;
    }
}
