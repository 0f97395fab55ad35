// SPDX-License-Identifier: MIT
//
// swatch color system — hex, 8-bit sRGB and HSL.
//
// Single-character variable names (r, g, b, h, s, l, c, x, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Palettes travel as flat `role -> "#rrggbb"` maps, so hex is the storage
// format. HSL is the editing space: harmony offsets rotate hue, bands pin
// lightness, mood jitter nudges all three. 8-bit sRGB sits between the two
// and is what luminance math reads.
//
// Conversion pipeline:
//
//   hex ↔ Rgb (u8 channels) ↔ Hsl (degrees, percent, percent)
//
// Every HSL → hex trip rounds to 8-bit channels, so a round trip is exact
// for hex → Rgb → hex and within ±1 unit per channel for HSL → hex → HSL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Failure to read a color value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Not exactly three hex byte-pairs (an optional leading `#` is allowed).
    #[error("invalid color format '{input}': expected 6 hex digits (RRGGBB), optional leading '#'")]
    InvalidFormat { input: String },
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color.
///
/// # Examples
///
/// ```
/// use swatch_color::color::Rgb;
///
/// let teal = Rgb::from_hex("#008080").unwrap();
/// assert_eq!(teal, Rgb::new(0, 128, 128));
/// assert_eq!(teal.to_hex(), "#008080");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `RRGGBB` or `#RRGGBB` string (either case).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidFormat`] for anything that is not exactly
    /// three hex byte-pairs. Short forms (`#fff`) and alpha are rejected.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidFormat { input: s.to_string() })
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to [0.0, 1.0].
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL space.
///
/// - `h`: hue in degrees, always in [0, 360)
/// - `s`: saturation in percent, [0, 100]
/// - `l`: lightness in percent, [0, 100]
///
/// The constructor wraps hue and clamps saturation and lightness, so every
/// `Hsl` value is legal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: clamp_percent(s),
            l: clamp_percent(l),
        }
    }

    /// Rotate the hue by `degrees` (negative rotates backwards).
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        Self::new(self.h + degrees, self.s, self.l)
    }

    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

// ─── Free conversions ────────────────────────────────────────────────────────

/// Parse hex into 8-bit channels.
///
/// # Errors
///
/// See [`Rgb::from_hex`].
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    Rgb::from_hex(hex)
}

/// Canonical `#rrggbb` form of a hex string.
///
/// # Errors
///
/// See [`Rgb::from_hex`].
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    Rgb::from_hex(hex).map(Rgb::to_hex)
}

/// Convert 8-bit sRGB to HSL.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = rgb.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta <= f64::EPSILON {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    #[allow(clippy::float_cmp)]
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Convert HSL (degrees, percent, percent) to 8-bit sRGB.
///
/// Hue wraps mod 360; saturation and lightness are clamped to [0, 100].
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = wrap_hue(h);
    let s = clamp_percent(s) / 100.0;
    let l = clamp_percent(l) / 100.0;

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(to_u8(r + m), to_u8(g + m), to_u8(b + m))
}

/// Convert HSL (degrees, percent, percent) straight to `#rrggbb`.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// Linearize one sRGB channel in [0.0, 1.0] (WCAG 2.x definition).
///
/// Uses the 0.03928 knee from the WCAG text rather than the IEC 0.04045;
/// the two agree on every 8-bit input.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Normalize a hue to [0, 360).
#[inline]
#[must_use]
pub fn wrap_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

/// Clamp a saturation or lightness value to [0, 100].
#[inline]
#[must_use]
pub fn clamp_percent(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// Shortest angular distance between two hues, in [0, 180].
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = wrap_hue(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}

// ─── Parsing helpers ─────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Some(Rgb::new(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
