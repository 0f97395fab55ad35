//! The accessible search orchestrator.
//!
//! Harmony formulas cannot be inverted against a contrast target, so the
//! engine searches: draw a candidate, pin the locked roles, test the
//! schema's gated pairs, repeat. The loop is bounded by
//! [`EngineConfig::max_attempts`]; running out is reported as
//! [`PaletteError::NoAccessiblePaletteFound`] and a failing palette is
//! never handed back in its place.
//!
//! ```text
//! GenerationRequest
//!     │
//!     ├─ mood token? ──► fill missing roles ──► mood::vary
//!     └─ otherwise ────► HarmonyGenerator::generate
//!                              │
//!                              ▼
//!                        lock::merge(base)
//!                              │
//!                              ▼
//!                gate_failure(schema.gate) ──► pass: done
//!                              │
//!                              └─ fail: next attempt (≤ max_attempts)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::contrast::{ValidationReport, gate_failure, validate_palette};
use crate::error::{PaletteError, PaletteResult};
use crate::harmony::{HarmonyGenerator, LightnessBand, SchemeFamily};
use crate::lock;
use crate::mood;
use crate::palette::{LockSet, Palette, RoleSchema};
use crate::presets::PresetCatalog;
use crate::random::{self, RandomSource};

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

/// Where a palette came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceTag {
    Harmony { family: SchemeFamily },
    Preset { name: String },
    Mood { token: String },
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Harmony { family } => write!(f, "harmony:{family}"),
            Self::Preset { name } => write!(f, "preset:{name}"),
            Self::Mood { token } => write!(f, "mood:{token}"),
        }
    }
}

/// One drawn palette before it is gated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub palette: Palette,
    pub source: SourceTag,
}

/// Everything that shapes one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub family: SchemeFamily,
    pub band: LightnessBand,
    /// Prior palette: source of locked values and the mood starting point.
    #[serde(default)]
    pub base: Palette,
    #[serde(default)]
    pub locks: LockSet,
    #[serde(default)]
    pub enforce_accessibility: bool,
    /// Selects the variation path. The token itself is only recorded.
    #[serde(default)]
    pub mood: Option<String>,
}

impl GenerationRequest {
    /// A fresh, ungated request with an empty base.
    #[must_use]
    pub fn new(family: SchemeFamily, band: LightnessBand) -> Self {
        Self {
            family,
            band,
            base: Palette::new(),
            locks: LockSet::new(),
            enforce_accessibility: false,
            mood: None,
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: Palette) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_locks(mut self, locks: LockSet) -> Self {
        self.locks = locks;
        self
    }

    #[must_use]
    pub const fn enforce_accessibility(mut self, enforce: bool) -> Self {
        self.enforce_accessibility = enforce;
        self
    }

    #[must_use]
    pub fn with_mood(mut self, token: impl Into<String>) -> Self {
        self.mood = Some(token.into());
        self
    }
}

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub palette: Palette,
    pub source: SourceTag,
    /// Candidates drawn, including the accepted one.
    pub attempts: u32,
}

// ---------------------------------------------------------------------------
// PaletteEngine
// ---------------------------------------------------------------------------

/// Owns the configuration, schema and preset catalog; holds no per-call
/// state, so one engine can serve any number of callers.
#[derive(Debug, Clone)]
pub struct PaletteEngine {
    config: EngineConfig,
    schema: RoleSchema,
    presets: PresetCatalog,
}

impl PaletteEngine {
    /// # Errors
    ///
    /// [`PaletteError::Config`] when `config` fails validation.
    pub fn new(
        config: EngineConfig,
        schema: RoleSchema,
        presets: PresetCatalog,
    ) -> PaletteResult<Self> {
        config.validate()?;
        Ok(Self { config, schema, presets })
    }

    /// Default config, extended schema, built-in presets.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            schema: RoleSchema::extended(),
            presets: PresetCatalog::builtin(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn schema(&self) -> &RoleSchema {
        &self.schema
    }

    #[must_use]
    pub const fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    fn generator(&self) -> HarmonyGenerator<'_> {
        HarmonyGenerator::new(&self.schema, &self.presets)
            .with_gate_threshold(self.config.gate_threshold)
    }

    /// Draw one candidate with locks applied. No gating.
    ///
    /// # Errors
    ///
    /// Format, lock and family errors from the generation path.
    pub fn candidate<R: RandomSource>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> PaletteResult<Candidate> {
        let drawn = match &request.mood {
            Some(token) => {
                let filled = self
                    .generator()
                    .fill_missing(request.family, request.band, &request.base, rng)?;
                let palette =
                    mood::vary(&filled, &self.schema, &request.locks, &self.config.mood, rng)?;
                Candidate {
                    palette,
                    source: SourceTag::Mood { token: token.clone() },
                }
            }
            None => self.generator().generate(request.family, request.band, &request.base, rng)?,
        };

        Ok(Candidate {
            palette: lock::merge(&drawn.palette, &request.base, &request.locks)?,
            source: drawn.source,
        })
    }

    /// Run the request to completion.
    ///
    /// With accessibility off the first candidate is returned. With it on,
    /// candidates are drawn until one passes every gated pair at
    /// [`EngineConfig::gate_threshold`].
    ///
    /// # Errors
    ///
    /// - [`PaletteError::LockedRoleMissing`] before any attempt is made
    /// - [`PaletteError::InvalidColorFormat`] as soon as a parsed role is malformed
    /// - [`PaletteError::NoAccessiblePaletteFound`] once the budget is spent
    pub fn search<R: RandomSource>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> PaletteResult<SearchOutcome> {
        lock::check_locks(&request.base, &request.locks)?;

        if !request.enforce_accessibility {
            let Candidate { palette, source } = self.candidate(request, rng)?;
            return Ok(SearchOutcome { palette, source, attempts: 1 });
        }

        let max = self.config.max_attempts;
        for attempt in 1..=max {
            let Candidate { palette, source } = self.candidate(request, rng)?;
            match gate_failure(&palette, &self.schema, self.config.gate_threshold)? {
                None => {
                    tracing::debug!("attempt {}/{}: {} passed the gate", attempt, max, source);
                    return Ok(SearchOutcome { palette, source, attempts: attempt });
                }
                Some(failure) => {
                    tracing::debug!(
                        "attempt {}/{}: {} on {} failed ({})",
                        attempt,
                        max,
                        failure.pair.text,
                        failure.pair.background,
                        failure.ratio.map_or_else(|| "missing".to_string(), |r| format!("{r:.2}:1"))
                    );
                }
            }
        }

        tracing::warn!("no accessible palette after {} attempts", max);
        Err(PaletteError::NoAccessiblePaletteFound { attempts: max })
    }

    /// [`search`](Self::search), keeping only the palette.
    ///
    /// # Errors
    ///
    /// As [`search`](Self::search).
    pub fn generate<R: RandomSource>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> PaletteResult<Palette> {
        self.search(request, rng).map(|outcome| outcome.palette)
    }

    /// [`generate`](Self::generate) with the thread RNG.
    ///
    /// # Errors
    ///
    /// As [`search`](Self::search).
    pub fn generate_random(&self, request: &GenerationRequest) -> PaletteResult<Palette> {
        self.generate(request, &mut random::thread_source())
    }

    /// Full report over the schema's check table.
    ///
    /// # Errors
    ///
    /// [`PaletteError::InvalidColorFormat`] when a checked role is malformed.
    pub fn validate(&self, palette: &Palette) -> PaletteResult<ValidationReport> {
        validate_palette(palette, &self.schema, &self.config.correction)
    }
}

impl Default for PaletteEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
