//! Palette values, role schemas and lock sets.
//!
//! A [`Palette`] is an open `role -> "#rrggbb"` map. Which roles must be
//! present, which ones are legibility anchors, and which text/background
//! pairs are checked all live in a [`RoleSchema`] value that travels with
//! each request. The two built-in schemas cover the classic six-role
//! shape and the wider seventeen-role shape.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use swatch_color::Rgb;

use crate::contrast::TextSize;
use crate::error::{PaletteError, PaletteResult};

/// Role keys used by the built-in schemas.
pub mod role {
    pub const BACKGROUND: &str = "background";
    pub const SURFACE: &str = "surface";
    pub const SURFACE_ALT: &str = "surface-alt";
    pub const BORDER: &str = "border";
    pub const TEXT_PRIMARY: &str = "text-primary";
    pub const TEXT_SECONDARY: &str = "text-secondary";
    pub const TEXT_MUTED: &str = "text-muted";
    pub const PRIMARY: &str = "primary";
    pub const PRIMARY_HOVER: &str = "primary-hover";
    pub const SECONDARY: &str = "secondary";
    pub const ACCENT: &str = "accent";
    pub const BRAND: &str = "brand";
    pub const BUTTON_TEXT: &str = "button-text";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
    pub const INFO: &str = "info";
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A named set of colors.
///
/// Values are kept as the strings they arrived as. Roles a computation does
/// not touch are never parsed, so foreign or malformed entries outside the
/// active schema pass through verbatim. Generated values are always
/// lowercase `#rrggbb`.
///
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: BTreeMap<String, String>,
}

impl Palette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `role` set to `value`.
    #[must_use]
    pub fn with(mut self, role: impl Into<String>, value: impl Into<String>) -> Self {
        self.colors.insert(role.into(), value.into());
        self
    }

    /// Raw value for `role`.
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.colors.contains_key(role)
    }

    /// Parsed value for `role`: `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// [`PaletteError::InvalidColorFormat`] when the value is not 6-digit hex.
    pub fn rgb(&self, role: &str) -> PaletteResult<Option<Rgb>> {
        self.colors
            .get(role)
            .map(|hex| Rgb::from_hex(hex).map_err(|e| PaletteError::color(role, e)))
            .transpose()
    }

    /// Role keys in sorted order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// `(role, value)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Parse a flat `{"role": "#rrggbb"}` object.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON. Color values are
    /// not validated here.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize as a flat JSON object.
    ///
    /// # Errors
    ///
    /// Only fails if `serde_json` itself fails on a string map.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub(crate) fn insert(&mut self, role: &str, value: String) {
        self.colors.insert(role.to_string(), value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Palette {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// LockSet
// ---------------------------------------------------------------------------

/// Roles whose values must survive regeneration unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockSet {
    roles: BTreeSet<String>,
}

impl LockSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LockSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// RoleSchema
// ---------------------------------------------------------------------------

/// A text role drawn over a background role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePair {
    pub text: String,
    pub background: String,
    pub size: TextSize,
}

impl RolePair {
    #[must_use]
    pub fn new(text: &str, background: &str, size: TextSize) -> Self {
        Self {
            text: text.to_string(),
            background: background.to_string(),
            size,
        }
    }
}

/// The shape a palette must have, plus the pairs that decide legibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSchema {
    /// Schema name (e.g., "legacy", "extended").
    pub name: String,
    /// Every role a complete palette carries.
    pub roles: Vec<String>,
    /// Roles mood variation never perturbs.
    pub anchors: Vec<String>,
    /// Pairs the search orchestrator checks pass/fail.
    pub gate: Vec<RolePair>,
    /// Pairs the validator reports on (a superset of the gate).
    pub checks: Vec<RolePair>,
}

impl RoleSchema {
    /// The six-role shape.
    ///
    /// Buttons in this shape are labelled with the page background, so the
    /// third gated pair is background-on-primary.
    #[must_use]
    pub fn legacy() -> Self {
        use role::{ACCENT, BACKGROUND, PRIMARY, SECONDARY, TEXT_PRIMARY, TEXT_SECONDARY};
        Self {
            name: "legacy".to_string(),
            roles: strings(&[BACKGROUND, TEXT_PRIMARY, TEXT_SECONDARY, PRIMARY, SECONDARY, ACCENT]),
            anchors: strings(&[BACKGROUND, TEXT_PRIMARY, TEXT_SECONDARY]),
            gate: vec![
                RolePair::new(TEXT_PRIMARY, BACKGROUND, TextSize::Normal),
                RolePair::new(TEXT_SECONDARY, BACKGROUND, TextSize::Normal),
                RolePair::new(BACKGROUND, PRIMARY, TextSize::Normal),
            ],
            checks: vec![
                RolePair::new(TEXT_PRIMARY, BACKGROUND, TextSize::Normal),
                RolePair::new(TEXT_SECONDARY, BACKGROUND, TextSize::Normal),
                RolePair::new(BACKGROUND, PRIMARY, TextSize::Normal),
                RolePair::new(SECONDARY, BACKGROUND, TextSize::Large),
                RolePair::new(ACCENT, BACKGROUND, TextSize::Large),
            ],
        }
    }

    /// The open seventeen-role shape.
    #[must_use]
    pub fn extended() -> Self {
        use role::{
            ACCENT, BACKGROUND, BORDER, BRAND, BUTTON_TEXT, ERROR, INFO, PRIMARY, PRIMARY_HOVER,
            SECONDARY, SUCCESS, SURFACE, SURFACE_ALT, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
            WARNING,
        };
        Self {
            name: "extended".to_string(),
            roles: strings(&[
                BACKGROUND,
                SURFACE,
                SURFACE_ALT,
                BORDER,
                TEXT_PRIMARY,
                TEXT_SECONDARY,
                TEXT_MUTED,
                PRIMARY,
                PRIMARY_HOVER,
                SECONDARY,
                ACCENT,
                BRAND,
                BUTTON_TEXT,
                SUCCESS,
                WARNING,
                ERROR,
                INFO,
            ]),
            anchors: strings(&[BACKGROUND, TEXT_PRIMARY, TEXT_SECONDARY]),
            gate: vec![
                RolePair::new(TEXT_PRIMARY, BACKGROUND, TextSize::Normal),
                RolePair::new(TEXT_SECONDARY, BACKGROUND, TextSize::Normal),
                RolePair::new(BUTTON_TEXT, PRIMARY, TextSize::Normal),
            ],
            checks: vec![
                RolePair::new(TEXT_PRIMARY, BACKGROUND, TextSize::Normal),
                RolePair::new(TEXT_SECONDARY, BACKGROUND, TextSize::Normal),
                RolePair::new(TEXT_MUTED, BACKGROUND, TextSize::Large),
                RolePair::new(TEXT_PRIMARY, SURFACE, TextSize::Normal),
                RolePair::new(TEXT_SECONDARY, SURFACE, TextSize::Normal),
                RolePair::new(TEXT_PRIMARY, SURFACE_ALT, TextSize::Normal),
                RolePair::new(BUTTON_TEXT, PRIMARY, TextSize::Normal),
                RolePair::new(BUTTON_TEXT, PRIMARY_HOVER, TextSize::Normal),
                RolePair::new(ACCENT, BACKGROUND, TextSize::Large),
                RolePair::new(ERROR, BACKGROUND, TextSize::Large),
                RolePair::new(SUCCESS, BACKGROUND, TextSize::Large),
                RolePair::new(INFO, BACKGROUND, TextSize::Large),
            ],
        }
    }

    #[must_use]
    pub fn requires(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    #[must_use]
    pub fn is_anchor(&self, role: &str) -> bool {
        self.anchors.iter().any(|r| r == role)
    }

    /// Required roles absent from `palette`, in schema order.
    #[must_use]
    pub fn missing_roles(&self, palette: &Palette) -> Vec<String> {
        self.roles.iter().filter(|r| !palette.contains(r)).cloned().collect()
    }

    #[must_use]
    pub fn is_complete(&self, palette: &Palette) -> bool {
        self.roles.iter().all(|r| palette.contains(r))
    }
}

impl Default for RoleSchema {
    fn default() -> Self {
        Self::extended()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
