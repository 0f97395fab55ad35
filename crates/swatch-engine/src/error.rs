//! Engine error hierarchy.
//!
//! Format and lock errors are caller mistakes and propagate immediately.
//! [`PaletteError::NoAccessiblePaletteFound`] is the one failure expected
//! under normal operation: the search budget ran out, and the caller chooses
//! whether to relax the gate or surface it.

use swatch_color::ColorError;
use thiserror::Error;

/// Root error type for every palette operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// A role's value is not a 6-digit hex color.
    #[error("role '{role}' has an invalid color: {source}")]
    InvalidColorFormat {
        role: String,
        #[source]
        source: ColorError,
    },

    /// A locked role has no value in the palette it should be copied from.
    #[error("locked role '{role}' is missing from the base palette")]
    LockedRoleMissing { role: String },

    /// The accessibility search ran out of attempts.
    #[error("no accessible palette found after {attempts} attempts")]
    NoAccessiblePaletteFound { attempts: u32 },

    /// Unknown family name, or a family that cannot serve the request.
    #[error("unsupported scheme family: {name}")]
    UnsupportedSchemeFamily { name: String },

    /// Band token is not one of the named bands.
    #[error("unknown lightness band: {name}")]
    UnknownLightnessBand { name: String },

    /// Custom band bounds are outside [0, 100] or inverted.
    #[error("invalid lightness band [{min}, {max}]")]
    InvalidLightnessBand { min: f64, max: f64 },

    /// Engine configuration rejected by validation.
    #[error("config error: {0}")]
    Config(String),
}

impl PaletteError {
    /// Wrap a color parse failure with the role it came from.
    pub(crate) fn color(role: &str, source: ColorError) -> Self {
        Self::InvalidColorFormat { role: role.to_string(), source }
    }

    /// `true` for the expected search-exhaustion signal.
    #[must_use]
    pub const fn is_search_exhausted(&self) -> bool {
        matches!(self, Self::NoAccessiblePaletteFound { .. })
    }
}

impl From<ColorError> for PaletteError {
    fn from(source: ColorError) -> Self {
        Self::InvalidColorFormat { role: String::new(), source }
    }
}

pub type PaletteResult<T> = Result<T, PaletteError>;
