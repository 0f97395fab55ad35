// SPDX-License-Identifier: MIT
//
// swatch — harmony palette generation with a WCAG contrast gate.
//
// The facade over the workspace crates:
//
//   swatch-color  → hex, 8-bit RGB and HSL conversions
//   swatch-engine → schemas, harmony families, locks, mood variation,
//                   contrast validation, bounded search, batches
//
// A typical call flows through:
//
//   GenerationRequest → PaletteEngine::search → candidate → lock merge
//                     → gate check → Palette (or NoAccessiblePaletteFound)
//
// Everything is synchronous and in-process. Randomness is injected per
// call, so one engine value can be shared freely.

pub use swatch_color as color;
pub use swatch_color::{ColorError, Hsl, Rgb, hex_to_rgb, hsl_to_hex, hsl_to_rgb, rgb_to_hsl};

pub use swatch_engine::*;
