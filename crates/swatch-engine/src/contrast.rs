//! WCAG contrast measurement, tier classification and text correction.
//!
//! - Normal text: AA at 4.5:1, AAA at 7:1
//! - Large text: AA at 3:1, AAA at 4.5:1
//!
//! Corrections only ever move the *text* color. Backgrounds belong to the
//! palette's character and are never auto-adjusted; a failing pair gets a
//! suggested replacement text color instead.

use serde::{Deserialize, Serialize};
use swatch_color::color::srgb_to_linear;
use swatch_color::{Hsl, Rgb};

use crate::config::CorrectionConfig;
use crate::error::PaletteResult;
use crate::palette::{Palette, RolePair, RoleSchema};

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Text size class, which selects the threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Normal,
    Large,
}

impl TextSize {
    /// `(aa, aaa)` minimum ratios.
    #[must_use]
    pub const fn thresholds(self) -> (f64, f64) {
        match self {
            Self::Normal => (4.5, 7.0),
            Self::Large => (3.0, 4.5),
        }
    }

    /// Minimum ratio for AA.
    #[must_use]
    pub const fn aa(self) -> f64 {
        self.thresholds().0
    }
}

/// WCAG compliance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContrastLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "FAIL")]
    Fail,
}

/// Outcome of measuring one text/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    /// Always >= 1.0.
    pub ratio: f64,
    pub level: ContrastLevel,
    /// `true` for AA and AAA.
    pub accessible: bool,
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// Relative luminance per WCAG 2.x, in [0.0, 1.0].
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.to_unit();
    let r_lin = srgb_to_linear(r);
    let g_lin = srgb_to_linear(g);
    let b_lin = srgb_to_linear(b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// WCAG contrast ratio in [1.0, 21.0], independent of argument order.
///
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Classify a ratio: at or above the high threshold is AAA, at or above
/// the low one is AA.
#[must_use]
pub fn classify(ratio: f64, size: TextSize) -> ContrastLevel {
    let (aa, aaa) = size.thresholds();
    if ratio >= aaa {
        ContrastLevel::Aaa
    } else if ratio >= aa {
        ContrastLevel::Aa
    } else {
        ContrastLevel::Fail
    }
}

#[must_use]
pub fn check_contrast(text: Rgb, background: Rgb, size: TextSize) -> ContrastResult {
    let ratio = contrast_ratio(text, background);
    let level = classify(ratio, size);
    ContrastResult {
        ratio,
        level,
        accessible: level != ContrastLevel::Fail,
    }
}

/// Black or white, whichever reads better on `background`.
#[must_use]
pub fn best_extreme(background: Rgb) -> Rgb {
    if contrast_ratio(Rgb::BLACK, background) >= contrast_ratio(Rgb::WHITE, background) {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

// ---------------------------------------------------------------------------
// Correction
// ---------------------------------------------------------------------------

/// Return `text` if it already meets AA on `background`, otherwise a
/// corrected text color that does.
///
/// Lightness moves toward the legible extreme (darker on light backgrounds,
/// lighter on dark ones) by `config.step` of the remaining distance per
/// iteration, hue and saturation untouched. If `config.max_iterations`
/// steps are not enough the result is pure black or white, whichever
/// contrasts more. That fallback always clears AA, since the better of the
/// two never drops below ~4.58:1.
#[must_use]
pub fn accessible_version(
    text: Rgb,
    background: Rgb,
    size: TextSize,
    config: &CorrectionConfig,
) -> Rgb {
    let target = size.aa();
    if contrast_ratio(text, background) >= target {
        return text;
    }

    let extreme = best_extreme(background);
    let darken = extreme == Rgb::BLACK;
    let mut hsl = text.to_hsl();

    for _ in 0..config.max_iterations {
        let l = if darken {
            hsl.l * (1.0 - config.step)
        } else {
            (100.0 - hsl.l).mul_add(config.step, hsl.l)
        };
        hsl = Hsl::new(hsl.h, hsl.s, l);
        let candidate = hsl.to_rgb();
        if contrast_ratio(candidate, background) >= target {
            return candidate;
        }
    }

    extreme
}

// ---------------------------------------------------------------------------
// Palette validation
// ---------------------------------------------------------------------------

/// One checked pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    pub pair: RolePair,
    pub result: ContrastResult,
    /// Corrected text color, present only when the pair fails.
    pub suggestion: Option<String>,
}

/// Every schema check for a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub schema: String,
    pub pairs: Vec<PairReport>,
    /// Pairs not evaluated because a role was absent from the palette.
    pub skipped: Vec<RolePair>,
}

impl ValidationReport {
    /// `true` when every evaluated pair reaches at least AA.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.pairs.iter().all(|p| p.result.accessible)
    }

    pub fn failures(&self) -> impl Iterator<Item = &PairReport> {
        self.pairs.iter().filter(|p| !p.result.accessible)
    }
}

/// Evaluate the schema's check table and suggest text fixes for failures.
///
/// # Errors
///
/// [`PaletteError::InvalidColorFormat`](crate::PaletteError::InvalidColorFormat)
/// when a checked role holds a malformed value.
pub fn validate_palette(
    palette: &Palette,
    schema: &RoleSchema,
    config: &CorrectionConfig,
) -> PaletteResult<ValidationReport> {
    let mut pairs = Vec::with_capacity(schema.checks.len());
    let mut skipped = Vec::new();

    for pair in &schema.checks {
        let (Some(text), Some(background)) =
            (palette.rgb(&pair.text)?, palette.rgb(&pair.background)?)
        else {
            skipped.push(pair.clone());
            continue;
        };

        let result = check_contrast(text, background, pair.size);
        let suggestion = (!result.accessible)
            .then(|| accessible_version(text, background, pair.size, config).to_hex());
        pairs.push(PairReport {
            pair: pair.clone(),
            result,
            suggestion,
        });
    }

    Ok(ValidationReport {
        schema: schema.name.clone(),
        pairs,
        skipped,
    })
}

/// The first gated pair below `threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct GateFailure<'a> {
    pub pair: &'a RolePair,
    /// `None` when one of the roles is absent.
    pub ratio: Option<f64>,
}

/// Check the schema's gated pairs pass/fail, without suggestions.
///
/// A gated role absent from the palette fails the gate.
///
/// # Errors
///
/// [`PaletteError::InvalidColorFormat`](crate::PaletteError::InvalidColorFormat)
/// when a gated role holds a malformed value.
pub fn gate_failure<'s>(
    palette: &Palette,
    schema: &'s RoleSchema,
    threshold: f64,
) -> PaletteResult<Option<GateFailure<'s>>> {
    for pair in &schema.gate {
        match (palette.rgb(&pair.text)?, palette.rgb(&pair.background)?) {
            (Some(text), Some(background)) => {
                let ratio = contrast_ratio(text, background);
                if ratio < threshold {
                    return Ok(Some(GateFailure { pair, ratio: Some(ratio) }));
                }
            }
            _ => return Ok(Some(GateFailure { pair, ratio: None })),
        }
    }
    Ok(None)
}

/// `true` when every gated pair reaches `threshold`.
///
/// # Errors
///
/// See [`gate_failure`].
pub fn passes_gate(palette: &Palette, schema: &RoleSchema, threshold: f64) -> PaletteResult<bool> {
    Ok(gate_failure(palette, schema, threshold)?.is_none())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
