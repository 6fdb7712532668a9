//! Axis tick selection and label formatting.
//!
//! [`TickSelector`] picks the densest human-friendly step whose labels fit
//! the available pixels, then normalizes tick positions to `[0, 1]` along
//! the axis.
//!
//! # Example
//!
//! ```
//! use plotwise::{MonospaceMeasurer, Orientation, TickSelector};
//!
//! let measurer = MonospaceMeasurer::default();
//! let axis = TickSelector::new(&measurer).select(Orientation::Horizontal, 0.0, 100.0, 400.0);
//! assert!(axis.ticks.len() >= 2);
//! assert!(axis.ticks.iter().all(|t| (0.0..=1.0).contains(&t.position)));
//! ```

use plotwise_core::TextMeasurer;
use plotwise_layout::{DEFAULT_MARGIN_PX, DEFAULT_TEXT_SIZE_PX};
use serde::{Deserialize, Serialize};

/// Candidate steps as multiples of the range's power of ten, densest first.
pub const TICK_SCALES: [f64; 6] = [0.25, 0.5, 1.0, 2.0, 4.0, 5.0];

/// Span substituted for empty or inverted ranges.
pub const MIN_SPAN: f64 = 0.001;

/// Upper bound on generated values per candidate step.
const MAX_TICKS_PER_STEP: usize = 128;

/// Widest label before falling back to scientific notation.
const MAX_FIXED_DECIMALS: f64 = 8.0;

/// Direction an axis runs on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Values increase left to right
    Horizontal,
    /// Values increase bottom to top
    Vertical,
}

/// One labeled axis marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Normalized position along the axis, 0 at the top/left edge
    pub position: f64,
    /// Data value at the tick
    pub value: f64,
    /// Rendered label
    pub label: String,
}

/// Range of one axis with its ticks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisBounds {
    /// Lower data bound after degenerate expansion
    pub min: f64,
    /// Upper data bound after degenerate expansion
    pub max: f64,
    /// Chosen step, or `None` for the two-point boundary fallback
    pub step: Option<f64>,
    /// Ticks in ascending value order
    pub ticks: Vec<Tick>,
}

impl AxisBounds {
    /// Data span covered by the axis.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Order a pair and widen an empty span so it can be divided by.
///
/// Very large magnitudes are widened relative to their size so the upper
/// bound stays distinguishable from the lower one.
pub fn expand_span(a: f64, b: f64) -> (f64, f64) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi - lo > 0.0 {
        return (lo, hi);
    }
    let pad = MIN_SPAN.max(lo.abs() * 1e-12);
    (lo, lo + pad)
}

/// Chooses tick steps for an axis.
pub struct TickSelector<'a> {
    measurer: &'a dyn TextMeasurer,
    text_size_px: f32,
    margin_px: f32,
}

impl<'a> TickSelector<'a> {
    /// Selector with the default text size and margin.
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            measurer,
            text_size_px: DEFAULT_TEXT_SIZE_PX,
            margin_px: DEFAULT_MARGIN_PX,
        }
    }

    /// Use a different label size.
    pub fn with_text_size(mut self, text_size_px: f32) -> Self {
        self.text_size_px = text_size_px;
        self
    }

    /// Use a different gap between labels.
    pub fn with_margin(mut self, margin_px: f32) -> Self {
        self.margin_px = margin_px;
        self
    }

    /// Pixels a label occupies along the axis, including its margin.
    ///
    /// Vertical axes stack labels, so only the text height counts there.
    pub fn label_extent(&self, orientation: Orientation, label: &str) -> f32 {
        match orientation {
            Orientation::Horizontal => {
                self.measurer.measure_width(label, self.text_size_px) + self.margin_px
            }
            Orientation::Vertical => self.text_size_px + self.margin_px,
        }
    }

    /// Ticks for `[data_min, data_max]` drawn across `pixel_span` pixels.
    ///
    /// Non-finite bounds produce no ticks. When no candidate step fits, the
    /// result marks just the two ends of the range.
    pub fn select(
        &self,
        orientation: Orientation,
        data_min: f64,
        data_max: f64,
        pixel_span: f32,
    ) -> AxisBounds {
        if !data_min.is_finite() || !data_max.is_finite() {
            log::debug!("non-finite axis range [{data_min}, {data_max}], no ticks");
            return AxisBounds {
                min: data_min,
                max: data_max,
                step: None,
                ticks: Vec::new(),
            };
        }

        let (lo, hi) = expand_span(data_min, data_max);
        let range = hi - lo;
        let magnitude = 10f64.powf(range.log10().floor());
        if !range.is_finite() || !magnitude.is_finite() || magnitude <= 0.0 {
            return self.boundary(orientation, lo, hi, magnitude);
        }

        let budget = pixel_span - self.margin_px;
        let start = (lo / magnitude).floor() * magnitude;
        for scale in TICK_SCALES {
            let step = magnitude * scale;
            if let Some(ticks) = self.candidate(orientation, lo, hi, start, step, magnitude, budget) {
                return AxisBounds {
                    min: lo,
                    max: hi,
                    step: Some(step),
                    ticks,
                };
            }
        }

        log::trace!("no tick step fits {pixel_span}px for [{lo}, {hi}], marking ends only");
        self.boundary(orientation, lo, hi, magnitude)
    }

    /// Ticks for one step, or `None` when they overflow `budget` or there
    /// are none at all.
    #[allow(clippy::too_many_arguments)]
    fn candidate(
        &self,
        orientation: Orientation,
        lo: f64,
        hi: f64,
        start: f64,
        step: f64,
        magnitude: f64,
        budget: f32,
    ) -> Option<Vec<Tick>> {
        let range = hi - lo;
        let mut ticks: Vec<Tick> = Vec::new();
        let mut consumed = 0.0f32;
        let mut last_norm = f64::NEG_INFINITY;

        for i in 0..MAX_TICKS_PER_STEP {
            let value = start + i as f64 * step;
            if value > hi {
                break;
            }
            if value < lo {
                continue;
            }
            let norm = ((value - lo) / range).clamp(0.0, 1.0);
            if norm <= last_norm {
                continue;
            }
            last_norm = norm;

            let label = format_tick_label(value, magnitude);
            consumed += self.label_extent(orientation, &label);
            if consumed > budget {
                return None;
            }
            ticks.push(Tick {
                position: orient(orientation, norm),
                value,
                label,
            });
        }

        if ticks.is_empty() {
            None
        } else {
            Some(ticks)
        }
    }

    fn boundary(&self, orientation: Orientation, lo: f64, hi: f64, magnitude: f64) -> AxisBounds {
        AxisBounds {
            min: lo,
            max: hi,
            step: None,
            ticks: vec![
                Tick {
                    position: orient(orientation, 0.0),
                    value: lo,
                    label: format_tick_label(lo, magnitude),
                },
                Tick {
                    position: orient(orientation, 1.0),
                    value: hi,
                    label: format_tick_label(hi, magnitude),
                },
            ],
        }
    }
}

fn orient(orientation: Orientation, norm: f64) -> f64 {
    match orientation {
        Orientation::Horizontal => norm,
        Orientation::Vertical => 1.0 - norm,
    }
}

/// Format a tick value at a resolution tied to `magnitude`.
///
/// Two decimal places are kept below the magnitude's leading digit and
/// trailing zeros are dropped. Whole numbers ending in at least 4, 7, 10 or
/// 13 zeros are abbreviated with `k`, `M`, `B` or `T`. Values too large or
/// too finely resolved for a short fixed label use scientific notation.
pub fn format_tick_label(value: f64, magnitude: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = if magnitude.is_finite() && magnitude > 0.0 {
        magnitude
    } else {
        1.0
    };
    let decimals = (2.0 - magnitude.log10().floor()).max(0.0);
    if decimals > MAX_FIXED_DECIMALS || value.abs() >= 1e18 {
        return scientific(value);
    }

    let mut text = format!("{value:.prec$}", prec = decimals as usize);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    if text.contains('.') {
        text
    } else {
        abbreviate(&text)
    }
}

fn abbreviate(integer: &str) -> String {
    const SUFFIXES: [(usize, &str); 4] = [(12, "T"), (9, "B"), (6, "M"), (3, "k")];
    let zeros = integer.len() - integer.trim_end_matches('0').len();
    let digits = integer.trim_start_matches('-').len();
    for (drop, suffix) in SUFFIXES {
        if zeros > drop && digits > drop {
            return format!("{}{suffix}", &integer[..integer.len() - drop]);
        }
    }
    integer.to_string()
}

fn scientific(value: f64) -> String {
    let text = format!("{value:.3e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.trim_end_matches('0').trim_end_matches('.')
            } else {
                mantissa
            };
            format!("{mantissa}e{exponent}")
        }
        None => text,
    }
}
