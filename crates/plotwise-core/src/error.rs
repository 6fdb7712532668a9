//! Error types for series storage and chart configuration.

use crate::color::ColorParseError;
use thiserror::Error;

/// Result type for plotwise operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors surfaced to callers.
///
/// Numeric degeneracies (equal bounds, zero-area canvases, zero pixel span)
/// never appear here; they are resolved where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A zero-length chunk was pushed; its min/max would be undefined.
    #[error("cannot push an empty chunk to series '{key}'")]
    EmptyChunk {
        /// Key of the target series
        key: String,
    },

    /// No series is registered under the key.
    #[error("series '{key}' not found")]
    SeriesNotFound {
        /// The missing key
        key: String,
    },

    /// Global index outside `[0, len)`.
    #[error("index {index} out of range for series '{key}' of length {len}")]
    IndexOutOfRange {
        /// Key of the series
        key: String,
        /// Requested index
        index: usize,
        /// Live length of the series
        len: usize,
    },

    /// Paired x/y series whose chunk layout does not line up.
    #[error("series '{x}' and '{y}' have mismatched chunk counts")]
    MisalignedSeries {
        /// Independent-variable series key
        x: String,
        /// Dependent series key
        y: String,
    },

    /// A color string in an option record failed to parse.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),
}
