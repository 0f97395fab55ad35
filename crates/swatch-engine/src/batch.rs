//! Batch generation.
//!
//! Runs one request template N independent times. Items share nothing but
//! the random source; there is no deduplication.
//!
//! An item whose gated search runs out of attempts does not sink the batch:
//! it is regenerated without the gate and recorded as
//! [`Compliance::Relaxed`], so the caller always sees which palettes were
//! verified. Any other error aborts the whole batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PaletteError, PaletteResult};
use crate::palette::Palette;
use crate::random::RandomSource;
use crate::search::{GenerationRequest, PaletteEngine, SearchOutcome, SourceTag};

/// How a batch item relates to the accessibility gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    /// Passed the gate.
    Verified,
    /// The template did not ask for the gate.
    NotRequired,
    /// The gated search was exhausted; this palette was drawn ungated.
    Relaxed,
}

/// One generated palette in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: Uuid,
    /// Never earlier than the previous record's.
    pub created_at: DateTime<Utc>,
    pub palette: Palette,
    pub source: SourceTag,
    pub compliance: Compliance,
    /// Candidates drawn for this item, across the relaxed retry too.
    pub attempts: u32,
}

impl PaletteEngine {
    /// Generate `count` palettes from `template`, in order.
    ///
    /// # Errors
    ///
    /// The first error that is not search exhaustion, e.g.
    /// [`PaletteError::LockedRoleMissing`]. Records produced before it are
    /// dropped.
    pub fn generate_batch<R: RandomSource>(
        &self,
        count: usize,
        template: &GenerationRequest,
        rng: &mut R,
    ) -> PaletteResult<Vec<BatchRecord>> {
        let mut records: Vec<BatchRecord> = Vec::with_capacity(count);

        for index in 0..count {
            let (outcome, compliance, attempts) = match self.search(template, rng) {
                Ok(outcome) => {
                    let compliance = if template.enforce_accessibility {
                        Compliance::Verified
                    } else {
                        Compliance::NotRequired
                    };
                    let attempts = outcome.attempts;
                    (outcome, compliance, attempts)
                }
                Err(PaletteError::NoAccessiblePaletteFound { attempts }) => {
                    tracing::warn!(
                        "batch item {}: gate exhausted after {} attempts, regenerating ungated",
                        index,
                        attempts
                    );
                    let relaxed = template.clone().enforce_accessibility(false);
                    let outcome = self.search(&relaxed, rng)?;
                    let total = attempts + outcome.attempts;
                    (outcome, Compliance::Relaxed, total)
                }
                Err(e) => return Err(e),
            };

            let SearchOutcome { palette, source, .. } = outcome;
            let now = Utc::now();
            let created_at = records.last().map_or(now, |prev| prev.created_at.max(now));

            tracing::debug!("batch item {}: {} ({:?})", index, source, compliance);
            records.push(BatchRecord {
                id: Uuid::new_v4(),
                created_at,
                palette,
                source,
                compliance,
                attempts,
            });
        }

        let relaxed = records.iter().filter(|r| r.compliance == Compliance::Relaxed).count();
        tracing::info!("batch done: {} palettes, {} relaxed", records.len(), relaxed);
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::passes_gate;
    use crate::harmony::{LightnessBand, SchemeFamily};
    use crate::palette::{LockSet, role};
    use crate::random::seeded;
    use std::collections::HashSet;

    #[test]
    fn five_ungated_records() {
        let engine = PaletteEngine::with_defaults();
        let template = GenerationRequest::new(SchemeFamily::Analogous, LightnessBand::LIGHT);
        let records = engine.generate_batch(5, &template, &mut seeded(1)).unwrap();

        assert_eq!(records.len(), 5);
        let ids: HashSet<Uuid> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 5);
        for pair in records.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
        assert!(records.iter().all(|r| r.compliance == Compliance::NotRequired));
        assert!(records.iter().all(|r| r.attempts == 1));
    }

    #[test]
    fn empty_batch() {
        let engine = PaletteEngine::with_defaults();
        let template = GenerationRequest::new(SchemeFamily::Triadic, LightnessBand::DARK);
        assert!(engine.generate_batch(0, &template, &mut seeded(1)).unwrap().is_empty());
    }

    #[test]
    fn gated_records_are_verified() {
        let engine = PaletteEngine::with_defaults();
        let template = GenerationRequest::new(SchemeFamily::Random, LightnessBand::DARK)
            .enforce_accessibility(true);
        let records = engine.generate_batch(4, &template, &mut seeded(77)).unwrap();
        for record in &records {
            assert_eq!(record.compliance, Compliance::Verified);
            assert!(passes_gate(&record.palette, engine.schema(), 4.5).unwrap());
            assert!(matches!(record.source, SourceTag::Preset { .. }));
        }
    }

    #[test]
    fn exhausted_items_fall_back_to_relaxed() {
        let engine = PaletteEngine::with_defaults();
        let base = Palette::new()
            .with(role::TEXT_PRIMARY, "#777777")
            .with(role::BACKGROUND, "#808080");
        let template = GenerationRequest::new(SchemeFamily::Complementary, LightnessBand::LIGHT)
            .with_base(base)
            .with_locks(LockSet::new().with(role::TEXT_PRIMARY).with(role::BACKGROUND))
            .enforce_accessibility(true);
        let records = engine.generate_batch(3, &template, &mut seeded(12)).unwrap();

        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.compliance, Compliance::Relaxed);
            assert_eq!(record.attempts, 51);
            assert_eq!(record.palette.get(role::BACKGROUND), Some("#808080"));
        }
    }

    #[test]
    fn other_errors_abort() {
        let engine = PaletteEngine::with_defaults();
        let template = GenerationRequest::new(SchemeFamily::Triadic, LightnessBand::LIGHT)
            .with_locks(LockSet::new().with(role::BRAND));
        let err = engine.generate_batch(3, &template, &mut seeded(1)).unwrap_err();
        assert!(matches!(err, PaletteError::LockedRoleMissing { .. }));
    }

    #[test]
    fn records_serialize() {
        let engine = PaletteEngine::with_defaults();
        let template = GenerationRequest::new(SchemeFamily::Tetradic, LightnessBand::MIDTONE_DARK);
        let records = engine.generate_batch(1, &template, &mut seeded(3)).unwrap();
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["compliance"], "not_required");
        assert_eq!(json["source"]["kind"], "harmony");
        assert_eq!(json["source"]["family"], "tetradic");
        assert!(json["palette"]["background"].is_string());

        let back: BatchRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, records[0]);
    }
}
