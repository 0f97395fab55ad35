//! Curated palettes for the `random` family.
//!
//! Freeform random hues rarely look good, so `random` draws from a catalog
//! of hand-picked palettes instead. The catalog is plain data handed to the
//! engine: load one from JSON, build one in code, or start from
//! [`PresetCatalog::builtin`].
//!
//! A preset defines at least the six core roles (background, the two text
//! roles, primary, secondary, accent). Wider schemas derive the rest from
//! those six the same way harmony palettes do, unless the preset spells a
//! role out itself.

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, PaletteResult};
use crate::harmony::CORE_ROLES;
use crate::palette::Palette;
use crate::random::RandomSource;

/// Which background polarity a preset was designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Light,
    Dark,
}

/// One curated palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub variant: Variant,
    pub colors: Palette,
}

/// A set of curated palettes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Build a catalog, checking every preset.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::Config`] when a preset lacks a core role
    /// - [`PaletteError::InvalidColorFormat`] when a preset value is not hex
    pub fn new(presets: Vec<Preset>) -> PaletteResult<Self> {
        let catalog = Self { presets };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in catalog: four light and four dark palettes.
    #[must_use]
    pub fn builtin() -> Self {
        let presets = BUILTIN
            .iter()
            .map(|(name, variant, colors)| Preset {
                name: (*name).to_string(),
                variant: *variant,
                colors: CORE_ROLES.iter().copied().zip(colors.iter().copied()).collect(),
            })
            .collect();
        Self { presets }
    }

    /// Load from JSON: `{"presets": [{"name", "variant", "colors"}]}`.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Config`] on malformed JSON, otherwise as [`new`](Self::new).
    pub fn from_json(json: &str) -> PaletteResult<Self> {
        let catalog: Self = serde_json::from_str(json)
            .map_err(|e| PaletteError::Config(format!("preset JSON parse error: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> PaletteResult<()> {
        for preset in &self.presets {
            for core in CORE_ROLES {
                if !preset.colors.contains(core) {
                    return Err(PaletteError::Config(format!(
                        "preset '{}' is missing core role '{core}'",
                        preset.name
                    )));
                }
            }
            for (role, _) in preset.colors.iter() {
                preset.colors.rgb(role)?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Presets designed for `variant`.
    pub fn variant(&self, variant: Variant) -> impl Iterator<Item = &Preset> {
        self.presets.iter().filter(move |p| p.variant == variant)
    }

    /// Uniformly pick one preset of `variant`. `None` if there are none.
    pub fn pick<R: RandomSource>(&self, variant: Variant, rng: &mut R) -> Option<&Preset> {
        let matching: Vec<&Preset> = self.variant(variant).collect();
        rng.pick(&matching).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

// Order matches CORE_ROLES:
// background, text-primary, text-secondary, primary, secondary, accent.
const BUILTIN: &[(&str, Variant, [&str; 6])] = &[
    ("paper", Variant::Light, ["#fbf8f1", "#1f1d1a", "#4a463f", "#1d4e89", "#8a3b12", "#2f7d6d"]),
    ("meadow", Variant::Light, ["#f4f9f4", "#15251b", "#3d5445", "#2e6b3f", "#b5532a", "#6b4fa0"]),
    ("harbor", Variant::Light, ["#f2f6fb", "#0f1c2e", "#3b4a5e", "#1c5fa8", "#c2410c", "#0f766e"]),
    ("blush", Variant::Light, ["#fdf4f5", "#2a1519", "#5c3a40", "#a3324f", "#5b4a9e", "#b8621b"]),
    ("midnight", Variant::Dark, ["#11151f", "#e8ecf4", "#a9b3c6", "#7aa2f7", "#f7768e", "#9ece6a"]),
    ("forest", Variant::Dark, ["#121a16", "#e6efe9", "#a3b8ab", "#6fcf97", "#e0a458", "#8fb8de"]),
    ("ember", Variant::Dark, ["#1b1411", "#f3e9e2", "#c2ada0", "#f08a4b", "#6cb4c9", "#e5c07b"]),
    ("dusk", Variant::Dark, ["#17131f", "#ece6f5", "#b3a8c7", "#b392f0", "#f2b27a", "#7fd4c1"]),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
