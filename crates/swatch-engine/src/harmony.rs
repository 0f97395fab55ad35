//! Harmony families and palette derivation.
//!
//! A family turns one random base hue into a small hue set by fixed angular
//! offsets. Those hues feed the six core roles, each with a per-family
//! saturation range and a lightness chosen for the target band: background
//! roles sit inside the band, text sits at the legible extreme, and brand
//! colors sit at higher saturation near the middle of the lightness axis.
//! Every other role is derived from the core six.
//!
//! ```text
//! SchemeFamily + base hue ──► hue set ──► core six (HSL) ──► derived roles
//!                                             ▲
//! random family ──► PresetCatalog ────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swatch_color::{Hsl, Rgb};

use crate::contrast::{TextSize, best_extreme, contrast_ratio};
use crate::error::{PaletteError, PaletteResult};
use crate::palette::{Palette, RoleSchema, role};
use crate::presets::{PresetCatalog, Variant};
use crate::random::RandomSource;
use crate::search::{Candidate, SourceTag};

/// The six roles every palette derives from, in preset-table order.
pub const CORE_ROLES: [&str; 6] = [
    role::BACKGROUND,
    role::TEXT_PRIMARY,
    role::TEXT_SECONDARY,
    role::PRIMARY,
    role::SECONDARY,
    role::ACCENT,
];

// ---------------------------------------------------------------------------
// SchemeFamily
// ---------------------------------------------------------------------------

/// The rule used to relate a palette's hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeFamily {
    /// One hue; roles differ only in saturation and lightness.
    Monochromatic,
    /// Neighbors at +30 and +60 degrees.
    Analogous,
    /// The opposite hue at +180.
    Complementary,
    /// 120-degree spacing.
    Triadic,
    /// +90 and +180.
    Tetradic,
    /// A curated preset instead of a derivation.
    Random,
}

impl SchemeFamily {
    /// Lowercase name, as accepted by [`from_name`](Self::from_name).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Random => "random",
        }
    }

    /// Parse a family from its name (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`PaletteError::UnsupportedSchemeFamily`] for unknown names.
    pub fn from_name(name: &str) -> PaletteResult<Self> {
        let lower = name.trim().to_lowercase();
        Self::all()
            .iter()
            .find(|f| f.name() == lower)
            .copied()
            .ok_or_else(|| PaletteError::UnsupportedSchemeFamily { name: name.to_string() })
    }

    /// All families.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monochromatic,
            Self::Analogous,
            Self::Complementary,
            Self::Triadic,
            Self::Tetradic,
            Self::Random,
        ]
    }

    /// Hue offsets from the base, in degrees. Empty for single-hue families.
    #[must_use]
    pub const fn offsets(self) -> &'static [f64] {
        match self {
            Self::Monochromatic | Self::Random => &[],
            Self::Analogous => &[30.0, 60.0],
            Self::Complementary => &[180.0],
            Self::Triadic => &[120.0, 240.0],
            Self::Tetradic => &[90.0, 180.0],
        }
    }

    /// The base hue followed by each offset hue, all in [0, 360).
    #[must_use]
    pub fn hues(self, base: f64) -> Vec<f64> {
        let base = Hsl::new(base, 0.0, 0.0).h;
        std::iter::once(base)
            .chain(self.offsets().iter().map(|o| Hsl::new(base + o, 0.0, 0.0).h))
            .collect()
    }

    /// Saturation and lightness rules for the derivation. `None` for
    /// [`Random`](Self::Random), which draws a preset instead.
    const fn tone(self) -> Option<Tone> {
        let tone = match self {
            Self::Monochromatic => Tone {
                surface_s: (8.0, 20.0),
                primary_s: (55.0, 75.0),
                secondary_s: (25.0, 40.0),
                accent_s: (70.0, 90.0),
                secondary_dl: 14.0,
                accent_dl: -8.0,
            },
            Self::Analogous => Tone {
                surface_s: (10.0, 25.0),
                primary_s: (60.0, 80.0),
                secondary_s: (50.0, 70.0),
                accent_s: (55.0, 75.0),
                secondary_dl: 0.0,
                accent_dl: 4.0,
            },
            Self::Complementary => Tone {
                surface_s: (5.0, 15.0),
                primary_s: (65.0, 85.0),
                secondary_s: (60.0, 80.0),
                accent_s: (45.0, 65.0),
                secondary_dl: 0.0,
                accent_dl: 8.0,
            },
            Self::Triadic => Tone {
                surface_s: (8.0, 18.0),
                primary_s: (60.0, 80.0),
                secondary_s: (55.0, 75.0),
                accent_s: (55.0, 75.0),
                secondary_dl: 0.0,
                accent_dl: 0.0,
            },
            Self::Tetradic => Tone {
                surface_s: (5.0, 12.0),
                primary_s: (55.0, 75.0),
                secondary_s: (45.0, 65.0),
                accent_s: (50.0, 70.0),
                secondary_dl: 0.0,
                accent_dl: 6.0,
            },
            Self::Random => return None,
        };
        Some(tone)
    }
}

impl fmt::Display for SchemeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemeFamily {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Per-family saturation ranges and lightness offsets.
///
/// `*_dl` offsets are relative to the primary lightness and point toward
/// the background (positive) or away from it (negative).
#[derive(Debug, Clone, Copy)]
struct Tone {
    surface_s: (f64, f64),
    primary_s: (f64, f64),
    secondary_s: (f64, f64),
    accent_s: (f64, f64),
    secondary_dl: f64,
    accent_dl: f64,
}

// ---------------------------------------------------------------------------
// LightnessBand
// ---------------------------------------------------------------------------

/// Target HSL lightness range for background-like roles.
///
/// Always satisfies `0 <= min <= max <= 100`. In JSON a band is either a
/// token (`"dark"`) or a `{"min": .., "max": ..}` range; named bands are
/// written back as their token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BandRepr", into = "BandRepr")]
pub struct LightnessBand {
    min: f64,
    max: f64,
}

impl LightnessBand {
    pub const LIGHT: Self = Self { min: 85.0, max: 100.0 };
    pub const LIGHT_MIDTONE: Self = Self { min: 70.0, max: 84.0 };
    pub const MIDTONE: Self = Self { min: 45.0, max: 65.0 };
    pub const MIDTONE_DARK: Self = Self { min: 30.0, max: 44.0 };
    pub const DARK: Self = Self { min: 10.0, max: 25.0 };

    const NAMED: [(&'static str, Self); 5] = [
        ("light", Self::LIGHT),
        ("light-midtone", Self::LIGHT_MIDTONE),
        ("midtone", Self::MIDTONE),
        ("midtone-dark", Self::MIDTONE_DARK),
        ("dark", Self::DARK),
    ];

    /// A custom band.
    ///
    /// # Errors
    ///
    /// [`PaletteError::InvalidLightnessBand`] unless `0 <= min <= max <= 100`.
    pub fn new(min: f64, max: f64) -> PaletteResult<Self> {
        if (0.0..=100.0).contains(&min) && (0.0..=100.0).contains(&max) && min <= max {
            Ok(Self { min, max })
        } else {
            Err(PaletteError::InvalidLightnessBand { min, max })
        }
    }

    /// Parse a named band (`light`, `light-midtone`, `midtone`,
    /// `midtone-dark`, `dark`), case-insensitive.
    ///
    /// # Errors
    ///
    /// [`PaletteError::UnknownLightnessBand`] for other tokens.
    pub fn from_token(token: &str) -> PaletteResult<Self> {
        let lower = token.trim().to_lowercase();
        Self::NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, band)| *band)
            .ok_or_else(|| PaletteError::UnknownLightnessBand { name: token.to_string() })
    }

    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    /// The band's name if it is one of the named bands.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED.iter().find(|(_, band)| *band == self).map(|(name, _)| *name)
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn contains(self, l: f64) -> bool {
        (self.min..=self.max).contains(&l)
    }

    #[must_use]
    pub fn clamp(self, l: f64) -> f64 {
        l.clamp(self.min, self.max)
    }

    /// Light backgrounds take dark text.
    #[must_use]
    pub fn is_light(self) -> bool {
        self.midpoint() >= 50.0
    }

    /// The preset variant matching this band's polarity.
    #[must_use]
    pub fn variant(self) -> Variant {
        if self.is_light() { Variant::Light } else { Variant::Dark }
    }
}

impl FromStr for LightnessBand {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BandRepr {
    Token(String),
    Range { min: f64, max: f64 },
}

impl TryFrom<BandRepr> for LightnessBand {
    type Error = PaletteError;

    fn try_from(repr: BandRepr) -> Result<Self, Self::Error> {
        match repr {
            BandRepr::Token(token) => Self::from_token(&token),
            BandRepr::Range { min, max } => Self::new(min, max),
        }
    }
}

impl From<LightnessBand> for BandRepr {
    fn from(band: LightnessBand) -> Self {
        match band.name() {
            Some(name) => Self::Token(name.to_string()),
            None => Self::Range { min: band.min, max: band.max },
        }
    }
}

// ---------------------------------------------------------------------------
// Core roles
// ---------------------------------------------------------------------------

/// The six colors every palette derives from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Core {
    pub background: Hsl,
    pub text_primary: Hsl,
    pub text_secondary: Hsl,
    pub primary: Hsl,
    pub secondary: Hsl,
    pub accent: Hsl,
}

impl Core {
    /// Derive the core six for a family and band.
    fn harmonize<R: RandomSource>(
        family: SchemeFamily,
        tone: Tone,
        band: LightnessBand,
        rng: &mut R,
    ) -> Self {
        let base = rng.range(0.0, 360.0);
        let hues = family.hues(base);
        let light = band.is_light();
        let toward_bg: f64 = if light { 1.0 } else { -1.0 };

        tracing::trace!("{} base hue {:.1} -> {:?}", family, base, hues);

        let background = Hsl::new(
            base,
            range(rng, tone.surface_s),
            band.clamp(rng.range(band.min, band.max)),
        );

        let (text_primary_l, text_secondary_l) = if light {
            (
                rng.range(4.0, 12.0),
                (band.min - 50.0).clamp(14.0, 32.0) - rng.range(0.0, 4.0),
            )
        } else {
            (
                rng.range(93.0, 98.0),
                (band.max + 50.0).clamp(68.0, 82.0) + rng.range(0.0, 4.0),
            )
        };
        let text_primary = Hsl::new(base, rng.range(8.0, 18.0), text_primary_l);
        let text_secondary = Hsl::new(base, rng.range(6.0, 14.0), text_secondary_l);

        let primary_l = if light {
            rng.range(38.0, 50.0)
        } else {
            rng.range(56.0, 68.0)
        };
        let primary = Hsl::new(hues[0], range(rng, tone.primary_s), primary_l);
        let secondary = Hsl::new(
            hues[1 % hues.len()],
            range(rng, tone.secondary_s),
            toward_bg.mul_add(tone.secondary_dl, primary_l) + rng.jitter(3.0),
        );
        let accent = Hsl::new(
            hues[2 % hues.len()],
            range(rng, tone.accent_s),
            toward_bg.mul_add(tone.accent_dl, primary_l) + rng.jitter(3.0),
        );

        Self {
            background,
            text_primary,
            text_secondary,
            primary,
            secondary,
            accent,
        }
    }

    /// Move the primary's lightness away from the background, one point at
    /// a time, until the pair reaches `target`.
    ///
    /// The primary is left as drawn when even black or white falls short.
    fn separate_primary(&mut self, target: f64) {
        let background = self.background.to_rgb();
        let step = if best_extreme(background) == Rgb::BLACK { -1.0 } else { 1.0 };
        let mut primary = self.primary;
        for steps in 0..=100 {
            if contrast_ratio(background, primary.to_rgb()) >= target {
                if steps > 0 {
                    tracing::trace!(
                        "primary lightness {:.1} -> {:.1} to read on the background",
                        self.primary.l,
                        primary.l
                    );
                }
                self.primary = primary;
                return;
            }
            primary = primary.with_lightness(primary.l + step);
        }
    }

    /// Read the core six from a palette.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Config`] when a core role is absent,
    /// [`PaletteError::InvalidColorFormat`] when one is malformed.
    pub(crate) fn from_palette(palette: &Palette) -> PaletteResult<Self> {
        let read = |r: &str| -> PaletteResult<Hsl> {
            palette
                .rgb(r)?
                .map(Rgb::to_hsl)
                .ok_or_else(|| PaletteError::Config(format!("core role '{r}' is missing")))
        };
        Ok(Self {
            background: read(role::BACKGROUND)?,
            text_primary: read(role::TEXT_PRIMARY)?,
            text_secondary: read(role::TEXT_SECONDARY)?,
            primary: read(role::PRIMARY)?,
            secondary: read(role::SECONDARY)?,
            accent: read(role::ACCENT)?,
        })
    }

    /// Every known role, the core six first.
    ///
    /// `bounds` limits the lightness of surface roles; `light` selects which
    /// way surfaces, borders and hover states move.
    fn expand<R: RandomSource>(
        &self,
        light: bool,
        bounds: (f64, f64),
        rng: &mut R,
    ) -> Vec<(&'static str, String)> {
        // Direction from the background toward mid-lightness.
        let inward: f64 = if light { -1.0 } else { 1.0 };
        let fit = |l: f64| l.clamp(bounds.0, bounds.1);

        let bg = self.background;
        let surface = bg.with_lightness(fit(inward.mul_add(rng.range(3.0, 6.0), bg.l)));
        let surface_alt = bg.with_lightness(fit(inward.mul_add(rng.range(3.0, 6.0), surface.l)));
        let border = bg.with_lightness(inward.mul_add(rng.range(12.0, 18.0), bg.l));

        let ts = self.text_secondary;
        let text_muted = ts.with_lightness((bg.l - ts.l).mul_add(0.35, ts.l));

        let primary_hover = self.primary.with_lightness(inward.mul_add(8.0, self.primary.l));
        let brand = self.primary.with_saturation(self.primary.s + 10.0);
        let button_text = best_extreme(self.primary.to_rgb());

        let status_l = |rng: &mut R| {
            if light {
                rng.range(36.0, 44.0)
            } else {
                rng.range(60.0, 68.0)
            }
        };
        let success = Hsl::new(rng.range(130.0, 150.0), rng.range(55.0, 70.0), status_l(&mut *rng));
        let warning = Hsl::new(rng.range(35.0, 45.0), rng.range(80.0, 95.0), status_l(&mut *rng));
        let error = Hsl::new(rng.range(0.0, 8.0), rng.range(65.0, 80.0), status_l(&mut *rng));
        let info = Hsl::new(rng.range(200.0, 215.0), rng.range(60.0, 75.0), status_l(&mut *rng));

        vec![
            (role::BACKGROUND, bg.to_hex()),
            (role::TEXT_PRIMARY, self.text_primary.to_hex()),
            (role::TEXT_SECONDARY, ts.to_hex()),
            (role::PRIMARY, self.primary.to_hex()),
            (role::SECONDARY, self.secondary.to_hex()),
            (role::ACCENT, self.accent.to_hex()),
            (role::SURFACE, surface.to_hex()),
            (role::SURFACE_ALT, surface_alt.to_hex()),
            (role::BORDER, border.to_hex()),
            (role::TEXT_MUTED, text_muted.to_hex()),
            (role::PRIMARY_HOVER, primary_hover.to_hex()),
            (role::BRAND, brand.to_hex()),
            (role::BUTTON_TEXT, button_text.to_hex()),
            (role::SUCCESS, success.to_hex()),
            (role::WARNING, warning.to_hex()),
            (role::ERROR, error.to_hex()),
            (role::INFO, info.to_hex()),
        ]
    }
}

fn range<R: RandomSource>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    rng.range(lo, hi)
}

// ---------------------------------------------------------------------------
// HarmonyGenerator
// ---------------------------------------------------------------------------

/// Produces fresh palettes for a schema.
///
/// Output is the base palette with every schema role the generator knows
/// overwritten; roles outside the schema pass through untouched.
#[derive(Debug, Clone, Copy)]
pub struct HarmonyGenerator<'a> {
    schema: &'a RoleSchema,
    presets: &'a PresetCatalog,
    threshold: f64,
}

impl<'a> HarmonyGenerator<'a> {
    #[must_use]
    pub const fn new(schema: &'a RoleSchema, presets: &'a PresetCatalog) -> Self {
        Self { schema, presets, threshold: TextSize::Normal.aa() }
    }

    /// Contrast the primary must reach against the background when the
    /// schema gates background-on-primary. Defaults to normal-text AA.
    #[must_use]
    pub const fn with_gate_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Generate one palette.
    ///
    /// # Errors
    ///
    /// [`PaletteError::UnsupportedSchemeFamily`] when `family` is `random`
    /// and the catalog has no preset for the band's polarity.
    pub fn generate<R: RandomSource>(
        &self,
        family: SchemeFamily,
        band: LightnessBand,
        base: &Palette,
        rng: &mut R,
    ) -> PaletteResult<Candidate> {
        let Some(tone) = family.tone() else {
            return self.from_preset(band, base, rng);
        };

        let mut core = Core::harmonize(family, tone, band, rng);
        if self.gates_primary_on_background() {
            core.separate_primary(self.threshold);
        }
        let generated: Palette = core
            .expand(band.is_light(), (band.min, band.max), rng)
            .into_iter()
            .collect();
        Ok(Candidate {
            palette: self.overlay(base, &generated),
            source: SourceTag::Harmony { family },
        })
    }

    /// Presets keep their own background; only the band's polarity matters.
    fn from_preset<R: RandomSource>(
        &self,
        band: LightnessBand,
        base: &Palette,
        rng: &mut R,
    ) -> PaletteResult<Candidate> {
        let variant = band.variant();
        let Some(preset) = self.presets.pick(variant, rng) else {
            let polarity = if variant == Variant::Light { "light" } else { "dark" };
            return Err(PaletteError::UnsupportedSchemeFamily {
                name: format!("random (catalog has no {polarity} presets)"),
            });
        };

        tracing::trace!("random family picked preset '{}'", preset.name);

        let core = Core::from_palette(&preset.colors)?;
        let mut generated: Palette = core
            .expand(variant == Variant::Light, (0.0, 100.0), rng)
            .into_iter()
            .collect();
        // Roles the preset spells out win over derived ones.
        for (r, _) in preset.colors.iter() {
            if let Some(rgb) = preset.colors.rgb(r)? {
                generated.insert(r, rgb.to_hex());
            }
        }

        Ok(Candidate {
            palette: self.overlay(base, &generated),
            source: SourceTag::Preset { name: preset.name.clone() },
        })
    }

    fn gates_primary_on_background(&self) -> bool {
        self.schema.gate.iter().any(|pair| {
            matches!(
                (pair.text.as_str(), pair.background.as_str()),
                (role::BACKGROUND, role::PRIMARY) | (role::PRIMARY, role::BACKGROUND)
            )
        })
    }

    fn overlay(&self, base: &Palette, generated: &Palette) -> Palette {
        let mut out = base.clone();
        for (r, value) in generated.iter() {
            if self.schema.requires(r) {
                out.insert(r, value.to_string());
            }
        }
        out
    }

    /// Fill schema roles absent from `base` with freshly generated values.
    ///
    /// Roles already present are left alone.
    pub(crate) fn fill_missing<R: RandomSource>(
        &self,
        family: SchemeFamily,
        band: LightnessBand,
        base: &Palette,
        rng: &mut R,
    ) -> PaletteResult<Palette> {
        let missing = self.schema.missing_roles(base);
        if missing.is_empty() {
            return Ok(base.clone());
        }
        tracing::debug!("filling {} missing roles before variation", missing.len());

        let fresh = self.generate(family, band, &Palette::new(), rng)?.palette;
        let mut out = base.clone();
        for r in &missing {
            if let Some(value) = fresh.get(r) {
                out.insert(r, value.to_string());
            }
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;
    use crate::random::seeded;
    use swatch_color::color::hue_distance;

    fn hsl_of(palette: &Palette, r: &str) -> Hsl {
        palette.rgb(r).unwrap().unwrap().to_hsl()
    }

    fn generate(
        schema: &RoleSchema,
        family: SchemeFamily,
        band: LightnessBand,
        seed: u64,
    ) -> Candidate {
        let presets = PresetCatalog::builtin();
        let mut rng = seeded(seed);
        HarmonyGenerator::new(schema, &presets)
            .generate(family, band, &Palette::new(), &mut rng)
            .unwrap()
    }

    // ── SchemeFamily ────────────────────────────────────────────────

    #[test]
    fn family_names_round_trip() {
        for family in SchemeFamily::all() {
            assert_eq!(SchemeFamily::from_name(family.name()).unwrap(), *family);
        }
        assert_eq!("Triadic".parse::<SchemeFamily>().unwrap(), SchemeFamily::Triadic);
    }

    #[test]
    fn unknown_family_is_unsupported() {
        let err = SchemeFamily::from_name("pentagram").unwrap_err();
        assert!(matches!(
            err,
            PaletteError::UnsupportedSchemeFamily { ref name } if name == "pentagram"
        ));
    }

    #[test]
    fn hue_offsets_per_family() {
        assert_eq!(SchemeFamily::Monochromatic.hues(10.0), vec![10.0]);
        assert_eq!(SchemeFamily::Analogous.hues(10.0), vec![10.0, 40.0, 70.0]);
        assert_eq!(SchemeFamily::Complementary.hues(10.0), vec![10.0, 190.0]);
        assert_eq!(SchemeFamily::Triadic.hues(10.0), vec![10.0, 130.0, 250.0]);
        assert_eq!(SchemeFamily::Tetradic.hues(10.0), vec![10.0, 100.0, 190.0]);
    }

    #[test]
    fn hues_wrap() {
        for h in SchemeFamily::Triadic.hues(300.0) {
            assert!((0.0..360.0).contains(&h), "Hue out of range: {h}");
        }
        assert_eq!(SchemeFamily::Complementary.hues(-30.0), vec![330.0, 150.0]);
    }

    #[test]
    fn only_random_lacks_a_tone() {
        for family in SchemeFamily::all() {
            assert_eq!(family.tone().is_none(), *family == SchemeFamily::Random, "{family}");
        }
    }

    // ── LightnessBand ───────────────────────────────────────────────

    #[test]
    fn band_tokens() {
        assert_eq!(LightnessBand::from_token("light").unwrap(), LightnessBand::LIGHT);
        assert_eq!(
            LightnessBand::from_token("Midtone-Dark").unwrap(),
            LightnessBand::MIDTONE_DARK
        );
        assert_eq!(LightnessBand::DARK.name(), Some("dark"));
        assert!(matches!(
            LightnessBand::from_token("dim"),
            Err(PaletteError::UnknownLightnessBand { .. })
        ));
    }

    #[test]
    fn custom_band_validation() {
        let band = LightnessBand::new(20.0, 40.0).unwrap();
        assert_eq!(band.name(), None);
        assert!(LightnessBand::new(50.0, 40.0).is_err());
        assert!(LightnessBand::new(-1.0, 40.0).is_err());
        assert!(LightnessBand::new(10.0, 101.0).is_err());
        assert!(LightnessBand::new(f64::NAN, 40.0).is_err());
        assert!(LightnessBand::new(10.0, f64::NAN).is_err());
    }

    #[test]
    fn band_deserializes_from_token_or_range() {
        let named: LightnessBand = serde_json::from_str(r#""midtone-dark""#).unwrap();
        assert_eq!(named, LightnessBand::MIDTONE_DARK);
        let custom: LightnessBand = serde_json::from_str(r#"{"min": 20.0, "max": 40.0}"#).unwrap();
        assert_eq!((custom.min(), custom.max()), (20.0, 40.0));
        let same: LightnessBand = serde_json::from_str(r#"{"min": 10.0, "max": 25.0}"#).unwrap();
        assert_eq!(same, LightnessBand::DARK);
    }

    #[test]
    fn inverted_band_is_rejected_on_deserialize() {
        let err = serde_json::from_str::<LightnessBand>(r#"{"min": 60.0, "max": 40.0}"#)
            .unwrap_err()
            .to_string();
        let expected = PaletteError::InvalidLightnessBand { min: 60.0, max: 40.0 }.to_string();
        assert!(err.contains(&expected), "{err}");

        let err = serde_json::from_str::<LightnessBand>(r#"{"min": -5.0, "max": 40.0}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<LightnessBand>(r#""dim""#);
        assert!(err.is_err());
    }

    #[test]
    fn band_serializes_as_token_when_named() {
        assert_eq!(serde_json::to_string(&LightnessBand::LIGHT).unwrap(), r#""light""#);
        let custom = LightnessBand::new(20.0, 40.0).unwrap();
        let json = serde_json::to_value(custom).unwrap();
        assert_eq!(json["min"], 20.0);
        assert_eq!(json["max"], 40.0);
    }

    #[test]
    fn band_polarity() {
        assert!(LightnessBand::LIGHT.is_light());
        assert!(LightnessBand::LIGHT_MIDTONE.is_light());
        assert!(LightnessBand::MIDTONE.is_light());
        assert!(!LightnessBand::MIDTONE_DARK.is_light());
        assert!(!LightnessBand::DARK.is_light());
    }

    // ── Generation ──────────────────────────────────────────────────

    #[test]
    fn extended_output_is_complete() {
        let schema = RoleSchema::extended();
        for family in SchemeFamily::all() {
            for band in [LightnessBand::LIGHT, LightnessBand::MIDTONE, LightnessBand::DARK] {
                let candidate = generate(&schema, *family, band, 42);
                let missing = schema.missing_roles(&candidate.palette);
                assert!(missing.is_empty(), "{family} {band:?}: missing {missing:?}");
            }
        }
    }

    #[test]
    fn legacy_output_has_only_legacy_roles() {
        let schema = RoleSchema::legacy();
        let candidate = generate(&schema, SchemeFamily::Analogous, LightnessBand::LIGHT, 7);
        assert_eq!(candidate.palette.len(), 6);
        assert!(schema.is_complete(&candidate.palette));
    }

    #[test]
    fn background_roles_stay_in_band() {
        let schema = RoleSchema::extended();
        for seed in 1..40 {
            for band in [LightnessBand::LIGHT, LightnessBand::MIDTONE, LightnessBand::DARK] {
                let p = generate(&schema, SchemeFamily::Triadic, band, seed).palette;
                for r in [role::BACKGROUND, role::SURFACE, role::SURFACE_ALT] {
                    let l = hsl_of(&p, r).l;
                    // 8-bit rounding moves lightness by well under a point.
                    let (lo, hi) = (band.min() - 1.0, band.max() + 1.0);
                    assert!(l >= lo && l <= hi, "{r} {l} outside {band:?}");
                }
            }
        }
    }

    #[test]
    fn text_sits_at_legible_extreme() {
        let schema = RoleSchema::extended();
        let light = generate(&schema, SchemeFamily::Analogous, LightnessBand::LIGHT, 3).palette;
        assert!(hsl_of(&light, role::TEXT_PRIMARY).l < 15.0);
        let dark = generate(&schema, SchemeFamily::Analogous, LightnessBand::DARK, 3).palette;
        assert!(hsl_of(&dark, role::TEXT_PRIMARY).l > 90.0);
    }

    #[test]
    fn complementary_hues_are_opposite() {
        let schema = RoleSchema::extended();
        for seed in 1..100 {
            let family = SchemeFamily::Complementary;
            let p = generate(&schema, family, LightnessBand::LIGHT, seed).palette;
            let d = hue_distance(hsl_of(&p, role::PRIMARY).h, hsl_of(&p, role::SECONDARY).h);
            assert!((d - 180.0).abs() <= 1.0, "seed {seed}: hue distance {d}");
        }
    }

    #[test]
    fn triadic_hues_are_a_third_apart() {
        let schema = RoleSchema::extended();
        for seed in 1..50 {
            let p = generate(&schema, SchemeFamily::Triadic, LightnessBand::DARK, seed).palette;
            let primary = hsl_of(&p, role::PRIMARY).h;
            let d1 = hue_distance(primary, hsl_of(&p, role::SECONDARY).h);
            let d2 = hue_distance(primary, hsl_of(&p, role::ACCENT).h);
            assert!((d1 - 120.0).abs() <= 1.5, "seed {seed}: {d1}");
            assert!((d2 - 120.0).abs() <= 1.5, "seed {seed}: {d2}");
        }
    }

    #[test]
    fn monochromatic_keeps_one_hue() {
        let schema = RoleSchema::extended();
        for seed in 1..50 {
            let family = SchemeFamily::Monochromatic;
            let p = generate(&schema, family, LightnessBand::LIGHT, seed).palette;
            let primary = hsl_of(&p, role::PRIMARY).h;
            let secondary = hsl_of(&p, role::SECONDARY).h;
            assert!(hue_distance(primary, secondary) <= 2.0, "seed {seed}");
        }
    }

    #[test]
    fn legacy_primary_reads_on_every_band() {
        let schema = RoleSchema::legacy();
        for family in SchemeFamily::all().iter().filter(|f| f.tone().is_some()) {
            for (name, band) in LightnessBand::NAMED {
                for seed in 1..25 {
                    let p = generate(&schema, *family, band, seed).palette;
                    let bg = p.rgb(role::BACKGROUND).unwrap().unwrap();
                    let primary = p.rgb(role::PRIMARY).unwrap().unwrap();
                    let ratio = contrast_ratio(bg, primary);
                    assert!(ratio >= 4.5, "{family} {name} seed {seed}: {ratio:.2}");
                }
            }
        }
    }

    #[test]
    fn primary_is_untouched_without_the_background_pair() {
        let legacy = RoleSchema::legacy();
        let extended = RoleSchema::extended();
        let band = LightnessBand::MIDTONE;
        let mut moved = 0;
        for seed in 1..40 {
            let a = generate(&legacy, SchemeFamily::Analogous, band, seed).palette;
            let b = generate(&extended, SchemeFamily::Analogous, band, seed).palette;
            assert_eq!(a.get(role::BACKGROUND), b.get(role::BACKGROUND));
            if a.get(role::PRIMARY) != b.get(role::PRIMARY) {
                moved += 1;
            }
        }
        // Midtone backgrounds sit too close to a mid-lightness primary.
        assert!(moved > 0);
    }

    #[test]
    fn separation_respects_the_threshold() {
        let schema = RoleSchema::legacy();
        let presets = PresetCatalog::builtin();
        let generator = HarmonyGenerator::new(&schema, &presets).with_gate_threshold(3.0);
        for seed in 1..25 {
            let mut rng = seeded(seed);
            let p = generator
                .generate(SchemeFamily::Triadic, LightnessBand::MIDTONE, &Palette::new(), &mut rng)
                .unwrap()
                .palette;
            let bg = p.rgb(role::BACKGROUND).unwrap().unwrap();
            let primary = p.rgb(role::PRIMARY).unwrap().unwrap();
            assert!(contrast_ratio(bg, primary) >= 3.0, "seed {seed}");
        }
    }

    #[test]
    fn button_text_is_black_or_white() {
        let schema = RoleSchema::extended();
        for seed in 1..30 {
            let family = SchemeFamily::Tetradic;
            let p = generate(&schema, family, LightnessBand::MIDTONE, seed).palette;
            let text = p.rgb(role::BUTTON_TEXT).unwrap().unwrap();
            assert!(text == Rgb::BLACK || text == Rgb::WHITE);
        }
    }

    #[test]
    fn same_seed_same_palette() {
        let schema = RoleSchema::extended();
        let a = generate(&schema, SchemeFamily::Analogous, LightnessBand::DARK, 1234);
        let b = generate(&schema, SchemeFamily::Analogous, LightnessBand::DARK, 1234);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let schema = RoleSchema::extended();
        let a = generate(&schema, SchemeFamily::Analogous, LightnessBand::DARK, 1);
        let b = generate(&schema, SchemeFamily::Analogous, LightnessBand::DARK, 2);
        assert_ne!(a.palette, b.palette);
    }

    #[test]
    fn unknown_roles_pass_through() {
        let schema = RoleSchema::legacy();
        let presets = PresetCatalog::builtin();
        let base = Palette::new()
            .with("x-logo", "not a color")
            .with(role::SURFACE, "#abcdef")
            .with(role::PRIMARY, "#000000");
        let mut rng = seeded(5);
        let out = HarmonyGenerator::new(&schema, &presets)
            .generate(SchemeFamily::Triadic, LightnessBand::LIGHT, &base, &mut rng)
            .unwrap()
            .palette;
        assert_eq!(out.get("x-logo"), Some("not a color"));
        // Outside the legacy schema, so untouched.
        assert_eq!(out.get(role::SURFACE), Some("#abcdef"));
        // Inside it, so regenerated.
        assert_ne!(out.get(role::PRIMARY), Some("#000000"));
    }

    // ── Random family ───────────────────────────────────────────────

    #[test]
    fn random_uses_matching_preset() {
        let schema = RoleSchema::extended();
        let catalog = PresetCatalog::builtin();
        for seed in 1..20 {
            let candidate = generate(&schema, SchemeFamily::Random, LightnessBand::DARK, seed);
            let SourceTag::Preset { name } = &candidate.source else {
                panic!("expected preset source, got {:?}", candidate.source);
            };
            let preset = catalog.get(name).unwrap();
            assert_eq!(preset.variant, Variant::Dark);
            let background = candidate.palette.get(role::BACKGROUND);
            assert_eq!(background, preset.colors.get(role::BACKGROUND));
            assert!(schema.is_complete(&candidate.palette));
        }
    }

    #[test]
    fn random_with_empty_catalog_is_unsupported() {
        let schema = RoleSchema::extended();
        let presets = PresetCatalog::default();
        let mut rng = seeded(1);
        let err = HarmonyGenerator::new(&schema, &presets)
            .generate(SchemeFamily::Random, LightnessBand::LIGHT, &Palette::new(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PaletteError::UnsupportedSchemeFamily { .. }));
    }

    #[test]
    fn preset_roles_override_derived_ones() {
        let schema = RoleSchema::extended();
        let colors = PresetCatalog::builtin()
            .get("paper")
            .unwrap()
            .colors
            .clone()
            .with(role::BRAND, "#C0FFEE");
        let presets = PresetCatalog::new(vec![Preset {
            name: "custom".to_string(),
            variant: Variant::Light,
            colors,
        }])
        .unwrap();
        let mut rng = seeded(9);
        let out = HarmonyGenerator::new(&schema, &presets)
            .generate(SchemeFamily::Random, LightnessBand::LIGHT, &Palette::new(), &mut rng)
            .unwrap()
            .palette;
        assert_eq!(out.get(role::BRAND), Some("#c0ffee"));
    }

    // ── fill_missing ────────────────────────────────────────────────

    #[test]
    fn fill_missing_keeps_present_roles() {
        let schema = RoleSchema::legacy();
        let presets = PresetCatalog::builtin();
        let base = Palette::new().with(role::BACKGROUND, "#ffffff");
        let mut rng = seeded(21);
        let out = HarmonyGenerator::new(&schema, &presets)
            .fill_missing(SchemeFamily::Analogous, LightnessBand::LIGHT, &base, &mut rng)
            .unwrap();
        assert_eq!(out.get(role::BACKGROUND), Some("#ffffff"));
        assert!(schema.is_complete(&out));
    }
}
