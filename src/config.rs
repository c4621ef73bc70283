//! Configuration structures for the season analysis pipeline.
//!
//! Every calibrated threshold the classifier consults lives here as plain
//! data, so recalibration never touches control flow.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use season_scan::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalyzerConfig::default();
//! # Ok::<(), season_scan::AnalysisError>(())
//! ```
//!
//! Missing sections in a JSON file fall back to their defaults.
//!
//! # Configuration Sections
//!
//! - [`ChromaThresholds`]: clarity gates of the season decision tree
//! - [`DepthThresholds`]: L* cut points for light/medium/deep
//! - [`UndertoneConfig`]: score weighting and per-depth undertone bands
//! - [`ContrastThresholds`]: global and feature contrast cut points
//! - [`SamplingConfig`]: region weights and random sample counts
//! - [`ConfidenceConfig`]: confidence blend and clamp range

use crate::constants::{confidence, sampling, thresholds, undertone};
use crate::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const WEIGHT_SUM_TOLERANCE: f32 = 1e-4;

/// Complete analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub chroma: ChromaThresholds,
    pub depth: DepthThresholds,
    pub undertone: UndertoneConfig,
    pub contrast: ContrastThresholds,
    pub sampling: SamplingConfig,
    pub confidence: ConfidenceConfig,
}

/// Skin chroma gates.
///
/// Chroma above `high` is vivid, above `low` is moderate, otherwise muted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromaThresholds {
    pub high: f32,
    pub low: f32,
}

impl Default for ChromaThresholds {
    fn default() -> Self {
        Self {
            high: thresholds::CHROMA_HIGH,
            low: thresholds::CHROMA_LOW,
        }
    }
}

/// Lightness cut points for depth bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthThresholds {
    /// L* strictly above this is light
    pub light_above: f32,
    /// L* strictly above this (and not light) is medium
    pub medium_above: f32,
}

impl Default for DepthThresholds {
    fn default() -> Self {
        Self {
            light_above: thresholds::DEPTH_LIGHT_ABOVE,
            medium_above: thresholds::DEPTH_MEDIUM_ABOVE,
        }
    }
}

/// Undertone score bands for one depth.
///
/// `score < cool_below` is cool, `< cool_neutral_below` cool-neutral,
/// `<= neutral_max` neutral, `<= warm_neutral_max` warm-neutral, else warm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UndertoneBands {
    pub cool_below: f32,
    pub cool_neutral_below: f32,
    pub neutral_max: f32,
    pub warm_neutral_max: f32,
}

impl From<[f32; 4]> for UndertoneBands {
    fn from(bands: [f32; 4]) -> Self {
        Self {
            cool_below: bands[0],
            cool_neutral_below: bands[1],
            neutral_max: bands[2],
            warm_neutral_max: bands[3],
        }
    }
}

impl UndertoneBands {
    fn is_ordered(&self) -> bool {
        self.cool_below < self.cool_neutral_below
            && self.cool_neutral_below <= self.neutral_max
            && self.neutral_max <= self.warm_neutral_max
    }
}

/// Undertone scoring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UndertoneConfig {
    /// Weight of a* in `score = b* + a_weight·a*`
    pub a_weight: f32,
    pub light: UndertoneBands,
    pub medium: UndertoneBands,
    pub deep: UndertoneBands,
}

impl Default for UndertoneConfig {
    fn default() -> Self {
        Self {
            a_weight: thresholds::UNDERTONE_A_WEIGHT,
            light: undertone::LIGHT.into(),
            medium: undertone::MEDIUM.into(),
            deep: undertone::DEEP.into(),
        }
    }
}

/// Contrast cut points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastThresholds {
    /// Luminance variance above this is high contrast
    pub high_variance: f32,
    /// Luminance variance above this is medium contrast
    pub medium_variance: f32,
    /// Feature contrast above this routes medium-depth warm skin to Spring
    pub relative_spring: f32,
    /// Feature contrast below this routes medium-depth neutral skin to Soft Summer
    pub relative_soft_summer: f32,
}

impl Default for ContrastThresholds {
    fn default() -> Self {
        Self {
            high_variance: thresholds::CONTRAST_HIGH_VARIANCE,
            medium_variance: thresholds::CONTRAST_MEDIUM_VARIANCE,
            relative_spring: thresholds::RELATIVE_CONTRAST_SPRING,
            relative_soft_summer: thresholds::RELATIVE_CONTRAST_SOFT_SUMMER,
        }
    }
}

/// Skin sampling weights and random sample sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub forehead_weight: f32,
    pub cheek_weight: f32,
    pub neck_weight: f32,
    /// Random face pixels used for the luminance variance
    pub contrast_sample_count: usize,
    /// Random photo pixels used for the brightness estimate
    pub brightness_sample_count: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            forehead_weight: sampling::FOREHEAD_WEIGHT,
            cheek_weight: sampling::CHEEK_WEIGHT,
            neck_weight: sampling::NECK_WEIGHT,
            contrast_sample_count: sampling::CONTRAST_SAMPLE_COUNT,
            brightness_sample_count: sampling::BRIGHTNESS_SAMPLE_COUNT,
        }
    }
}

/// Confidence blend weights and clamp range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    pub lighting_weight: f32,
    pub tone_weight: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            lighting_weight: confidence::LIGHTING_WEIGHT,
            tone_weight: confidence::TONE_WEIGHT,
            min: confidence::MIN,
            max: confidence::MAX,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Check that every threshold group is internally ordered
    pub fn validate(&self) -> Result<()> {
        if !(self.chroma.low < self.chroma.high) {
            return Err(AnalysisError::invalid_parameter("chroma.low", self.chroma.low));
        }
        if !(self.depth.medium_above < self.depth.light_above) {
            return Err(AnalysisError::invalid_parameter(
                "depth.medium_above",
                self.depth.medium_above,
            ));
        }
        for (name, bands) in [
            ("undertone.light", &self.undertone.light),
            ("undertone.medium", &self.undertone.medium),
            ("undertone.deep", &self.undertone.deep),
        ] {
            if !bands.is_ordered() {
                return Err(AnalysisError::invalid_parameter(
                    name,
                    format!("{:?}", bands),
                ));
            }
        }
        if !(self.contrast.medium_variance < self.contrast.high_variance) {
            return Err(AnalysisError::invalid_parameter(
                "contrast.medium_variance",
                self.contrast.medium_variance,
            ));
        }
        for (name, weight) in [
            ("sampling.forehead_weight", self.sampling.forehead_weight),
            ("sampling.cheek_weight", self.sampling.cheek_weight),
            ("sampling.neck_weight", self.sampling.neck_weight),
        ] {
            if !(weight > 0.0) {
                return Err(AnalysisError::invalid_parameter(name, weight));
            }
        }
        if self.sampling.contrast_sample_count == 0 {
            return Err(AnalysisError::invalid_parameter("sampling.contrast_sample_count", 0));
        }
        if self.sampling.brightness_sample_count == 0 {
            return Err(AnalysisError::invalid_parameter("sampling.brightness_sample_count", 0));
        }
        self.confidence.validate()
    }
}

impl ConfidenceConfig {
    /// The clamp range may only narrow `[MIN, MAX]`, and the blend weights
    /// must be non-negative and sum to 1
    pub fn validate(&self) -> Result<()> {
        if !(confidence::MIN <= self.min && self.min <= self.max && self.max <= confidence::MAX) {
            return Err(AnalysisError::invalid_parameter(
                "confidence",
                format!("[{}, {}]", self.min, self.max),
            ));
        }
        for (name, weight) in [
            ("confidence.lighting_weight", self.lighting_weight),
            ("confidence.tone_weight", self.tone_weight),
        ] {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(AnalysisError::invalid_parameter(name, weight));
            }
        }
        let total = self.lighting_weight + self.tone_weight;
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AnalysisError::invalid_parameter(
                "confidence weights",
                format!("sum to {}", total),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chroma.high, 18.0);
        assert_eq!(config.chroma.low, 12.0);
        assert_eq!(config.undertone.deep.warm_neutral_max, 9.0);
    }

    #[test]
    fn test_rejects_inverted_chroma_gates() {
        let mut config = AnalyzerConfig::default();
        config.chroma.low = 20.0;
        match config.validate() {
            Err(AnalysisError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "chroma.low")
            }
            other => panic!("Expected InvalidParameter, got: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unordered_undertone_bands() {
        let mut config = AnalyzerConfig::default();
        config.undertone.medium = [3.0, 2.0, 5.0, 8.0].into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_weight() {
        let mut config = AnalyzerConfig::default();
        config.sampling.neck_weight = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_confidence_range_wider_than_calibrated() {
        let mut config = AnalyzerConfig::default();
        config.confidence = ConfidenceConfig {
            lighting_weight: 1.0,
            tone_weight: 1.0,
            min: 0.0,
            max: 1.0,
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidParameter { .. })
        ));

        config.confidence = ConfidenceConfig {
            max: 0.99,
            ..ConfidenceConfig::default()
        };
        assert!(config.validate().is_err());

        // narrowing stays allowed
        config.confidence = ConfidenceConfig {
            min: 0.6,
            max: 0.9,
            ..ConfidenceConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_confidence_range() {
        let mut config = AnalyzerConfig::default();
        config.confidence.min = 0.9;
        config.confidence.max = 0.6;
        match config.validate() {
            Err(AnalysisError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "confidence")
            }
            other => panic!("Expected InvalidParameter, got: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unbalanced_confidence_weights() {
        let mut config = AnalyzerConfig::default();
        config.confidence.lighting_weight = 1.2;
        config.confidence.tone_weight = -0.2;
        match config.validate() {
            Err(AnalysisError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "confidence.tone_weight")
            }
            other => panic!("Expected InvalidParameter, got: {:?}", other),
        }

        config.confidence.lighting_weight = 0.7;
        config.confidence.tone_weight = 0.7;
        assert!(config.validate().is_err());

        config.confidence.lighting_weight = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "chroma": { "high": 20.0, "low": 10.0 } }"#;
        let config: AnalyzerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.chroma.high, 20.0);
        assert_eq!(config.depth, DepthThresholds::default());
        assert_eq!(config.sampling, SamplingConfig::default());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AnalyzerConfig::default();
        config.sampling.cheek_weight = 0.9;
        config.to_json_file(&path).unwrap();

        let loaded = AnalyzerConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = AnalyzerConfig::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(AnalysisError::ConfigError { .. })));
    }
}
