//! Engine configuration.
//!
//! Every tunable the generator, variation and search paths read lives here
//! and is handed to the engine explicitly. Nothing is read from the
//! environment or from globals.

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, PaletteResult};

/// Runtime configuration for [`PaletteEngine`](crate::PaletteEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search attempt cap. Default: 50.
    pub max_attempts: u32,

    /// Minimum contrast ratio every gated pair must reach. Default: 4.5.
    pub gate_threshold: f64,

    /// Mood variation jitter.
    pub mood: MoodConfig,

    /// Text color correction used for validation suggestions.
    pub correction: CorrectionConfig,
}

/// Perturbation ranges for mood variation (each is ±).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Degrees. Default: 15.
    pub hue_jitter: f64,
    /// Saturation points. Default: 10.
    pub saturation_jitter: f64,
    /// Lightness points. Default: 10.
    pub lightness_jitter: f64,
}

/// Text correction stepping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Fraction of the remaining lightness distance moved per step. Default: 0.15.
    pub step: f64,
    /// Steps before falling back to black or white. Default: 20.
    pub max_iterations: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            gate_threshold: 4.5,
            mood: MoodConfig::default(),
            correction: CorrectionConfig::default(),
        }
    }
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            hue_jitter: 15.0,
            saturation_jitter: 10.0,
            lightness_jitter: 10.0,
        }
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            step: 0.15,
            max_iterations: 20,
        }
    }
}

impl EngineConfig {
    /// Validate configuration parameters.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Config`] naming the first offending field.
    pub fn validate(&self) -> PaletteResult<()> {
        if self.max_attempts == 0 {
            return Err(PaletteError::Config("max_attempts must be >= 1".to_string()));
        }
        if !(1.0..=21.0).contains(&self.gate_threshold) {
            return Err(PaletteError::Config(format!(
                "gate_threshold must be in [1, 21], got {}",
                self.gate_threshold
            )));
        }
        for (name, value) in [
            ("mood.hue_jitter", self.mood.hue_jitter),
            ("mood.saturation_jitter", self.mood.saturation_jitter),
            ("mood.lightness_jitter", self.mood.lightness_jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PaletteError::Config(format!(
                    "{name} must be a finite value >= 0, got {value}"
                )));
            }
        }
        if !(self.correction.step > 0.0 && self.correction.step < 1.0) {
            return Err(PaletteError::Config(format!(
                "correction.step must be in (0, 1), got {}",
                self.correction.step
            )));
        }
        if self.correction.max_iterations == 0 {
            return Err(PaletteError::Config(
                "correction.max_iterations must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from a JSON string. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Config`] on malformed JSON or a value that fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> PaletteResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PaletteError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_attempts, 50);
        assert!((config.gate_threshold - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_attempts() {
        let config = EngineConfig { max_attempts: 0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(PaletteError::Config(_))));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let config = EngineConfig { gate_threshold: 0.5, ..EngineConfig::default() };
        assert!(config.validate().is_err());
        let config = EngineConfig { gate_threshold: 22.0, ..EngineConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_jitter() {
        let mut config = EngineConfig::default();
        config.mood.saturation_jitter = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mood.saturation_jitter"), "{err}");
    }

    #[test]
    fn rejects_bad_step() {
        let mut config = EngineConfig::default();
        config.correction.step = 1.0;
        assert!(config.validate().is_err());
        config.correction.step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_partial_uses_defaults() {
        let config = EngineConfig::from_json(r#"{"max_attempts": 10, "mood": {"hue_jitter": 5}}"#)
            .unwrap();
        assert_eq!(config.max_attempts, 10);
        assert!((config.mood.hue_jitter - 5.0).abs() < f64::EPSILON);
        assert!((config.mood.lightness_jitter - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.correction, CorrectionConfig::default());
    }

    #[test]
    fn json_invalid_value_rejected() {
        assert!(EngineConfig::from_json(r#"{"max_attempts": 0}"#).is_err());
        assert!(EngineConfig::from_json("not json").is_err());
    }
}
