//! "More like this" variation.
//!
//! Nudges each free role a little in HSL space instead of drawing a new
//! harmony. Locked roles and the schema's anchors (background and the two
//! text roles) are never touched, so legibility of the base carries over.

use swatch_color::Hsl;

use crate::config::MoodConfig;
use crate::error::{PaletteError, PaletteResult};
use crate::palette::{LockSet, Palette, RoleSchema};
use crate::random::RandomSource;

/// Perturb every free schema role of `palette`.
///
/// A role is free when the schema requires it, it is present, and it is
/// neither locked nor an anchor. Everything else, including roles outside
/// the schema, is returned verbatim.
///
/// # Errors
///
/// [`PaletteError::InvalidColorFormat`] when a free role is not valid hex.
pub fn vary<R: RandomSource>(
    palette: &Palette,
    schema: &RoleSchema,
    locks: &LockSet,
    config: &MoodConfig,
    rng: &mut R,
) -> PaletteResult<Palette> {
    let mut out = palette.clone();

    for role in &schema.roles {
        if locks.contains(role) || schema.is_anchor(role) {
            continue;
        }
        let Some(value) = palette.get(role) else {
            continue;
        };

        let hsl = swatch_color::hex_to_rgb(value)
            .map_err(|e| PaletteError::color(role, e))?
            .to_hsl();
        out.insert(role, perturb(hsl, config, rng).to_hex());
    }

    Ok(out)
}

fn perturb<R: RandomSource>(hsl: Hsl, config: &MoodConfig, rng: &mut R) -> Hsl {
    let h = hsl.h + rng.jitter(config.hue_jitter);
    let s = hsl.s + rng.jitter(config.saturation_jitter);
    let l = hsl.l + rng.jitter(config.lightness_jitter);
    Hsl::new(h, s, l)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
