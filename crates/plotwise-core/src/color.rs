//! RGBA colors for chart chrome and series.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

/// Series colors handed out in order when a series has none configured.
const PALETTE: [&str; 8] = [
    "1f77b4", "ff7f0e", "2ca02c", "d62728", "9467bd", "8c564b", "e377c2", "17becf",
];

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgba_const(0.0, 0.0, 0.0, 1.0);
    /// Opaque white
    pub const WHITE: Self = Self::rgba_const(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::rgba_const(0.0, 0.0, 0.0, 0.0);
    /// Half-transparent mid gray used for grid lines and zoom boxes.
    pub const GRID: Self = Self::rgba_const(0.5, 0.5, 0.5, 0.5);

    const fn rgba_const(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color, clamping every component to `[0.0, 1.0]`.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        if !digits.is_ascii() {
            return Err(ColorParseError::InvalidHex(hex.to_string()));
        }

        let mut channels = [255u8; 4];
        for (slot, start) in channels.iter_mut().zip((0..digits.len()).step_by(2)) {
            *slot = u8::from_str_radix(&digits[start..start + 2], 16)
                .map_err(|_| ColorParseError::InvalidHex(hex.to_string()))?;
        }
        let [r, g, b, a] = channels;
        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#rrggbbaa`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// The `index`-th default series color, cycling.
    #[must_use]
    pub fn palette(index: usize) -> Self {
        Self::from_hex(PALETTE[index % PALETTE.len()]).unwrap_or(Self::BLACK)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Non-hex characters in the string
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
    /// Wrong number of hex digits
    #[error("invalid hex color length {0} (expected 6 or 8)")]
    InvalidLength(usize),
}
