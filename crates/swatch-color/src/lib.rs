// SPDX-License-Identifier: MIT
//
// swatch-color — color space conversions for swatch.
//
// The leaf crate of the workspace: hex parsing and formatting, 8-bit sRGB,
// HSL, and the WCAG channel linearization that luminance math builds on.
// Nothing here allocates beyond hex strings, and nothing here is random.

pub mod color;

pub use color::{ColorError, Hsl, Rgb, hex_to_rgb, hsl_to_hex, hsl_to_rgb, rgb_to_hsl};
