//! # swatch-engine — harmony palettes under a contrast gate
//!
//! Generates complete named palettes from a harmony family and a target
//! lightness band, keeps locked roles across regeneration, offers "more like
//! this" variation, and searches for a palette whose critical text pairs
//! meet WCAG contrast.
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest { family, band, base, locks, enforce, mood }
//!     │
//!     ▼
//! harmony.rs:  base hue → hue set → core six → derived roles
//! presets.rs:  curated palettes for the `random` family
//! mood.rs:     HSL jitter of free roles (mood token path)
//!     │
//!     ▼
//! lock.rs:     copy locked roles from the base
//!     │
//!     ▼
//! contrast.rs: gated pairs pass/fail, full reports with text fixes
//!     │
//!     ▼
//! search.rs:   bounded retry loop (PaletteEngine)
//! batch.rs:    N independent searches → timestamped records
//! ```
//!
//! # Randomness
//!
//! Every draw goes through [`RandomSource`]. Pass a [`seeded`] [`StdRng`] for
//! reproducible output or [`thread_source`] for the default.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]
// Role tables and test grids are long by nature.
#![allow(clippy::too_many_lines)]

pub mod batch;
pub mod config;
pub mod contrast;
pub mod error;
pub mod harmony;
pub mod lock;
pub mod mood;
pub mod palette;
pub mod presets;
pub mod random;
pub mod search;

pub use batch::{BatchRecord, Compliance};
pub use config::{CorrectionConfig, EngineConfig, MoodConfig};
pub use contrast::{
    ContrastLevel, ContrastResult, TextSize, ValidationReport, accessible_version, check_contrast,
    contrast_ratio, relative_luminance, validate_palette,
};
pub use error::{PaletteError, PaletteResult};
pub use harmony::{HarmonyGenerator, LightnessBand, SchemeFamily};
pub use palette::{LockSet, Palette, RolePair, RoleSchema, role};
pub use presets::{Preset, PresetCatalog, Variant};
pub use random::{RandomSource, StdRng, ThreadRng, seeded, thread_source};
pub use search::{Candidate, GenerationRequest, PaletteEngine, SearchOutcome, SourceTag};
