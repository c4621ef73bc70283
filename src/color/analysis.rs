//! Season classification for one face in one photo
//!
//! Runs the whole chain on decoded pixels:
//! - Weighted skin sampling over forehead, cheeks and neck
//! - Lab conversion, chroma, depth and undertone of the skin sample
//! - Global luminance variance and skin-to-feature contrast
//! - Season matching and a lighting/tone confidence score
//!
//! The chain is total: degenerate regions fall back to neutral values, so a
//! decoded image plus any face region always yields a result.

use crate::color::confidence;
use crate::color::contrast::{self, Contrast};
use crate::color::conversion::{ColorConverter, LabColor};
use crate::color::season::{match_season, ColorSeason, SeasonInputs};
use crate::color::tone::{ChromaLevel, Depth, Undertone};
use crate::config::AnalyzerConfig;
use crate::detection::face::FaceRegion;
use crate::detection::regions::{RegionSampler, RgbSample};
use crate::{AnalysisError, Result};
use image::RgbImage;
use palette::Srgb;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Season classification of one face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub season: ColorSeason,
    pub undertone: Undertone,
    pub contrast: Contrast,
    /// Always within the configured clamp range (0.50 to 0.98 by default)
    pub confidence: f32,
}

impl AnalysisResult {
    /// Serialize to the flat JSON record handed to callers
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| AnalysisError::serialization("Failed to serialize analysis result", e))
    }
}

/// Intermediate measurements behind a result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinMeasurements {
    /// Weighted mean skin color, sRGB in [0, 1]
    pub sample: RgbSample,
    pub lab: LabColor,
    pub chroma: f32,
    pub chroma_level: ChromaLevel,
    pub depth: Depth,
    pub relative_contrast: f32,
    pub luminance_variance: f32,
    /// Mean photo luminance, `None` for an empty image
    pub brightness: Option<f32>,
    pub hex: String,
}

/// Result plus the measurements that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub skin: SkinMeasurements,
}

/// Classifies a face into one of the 12 color seasons
///
/// Holds only configuration, so one analyzer can be shared across threads.
#[derive(Debug, Clone)]
pub struct ColorAnalyzer {
    config: AnalyzerConfig,
    converter: ColorConverter,
    sampler: RegionSampler,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAnalyzer {
    /// Create a new analyzer with the calibrated default thresholds
    pub fn new() -> Self {
        Self::from_validated(AnalyzerConfig::default())
    }

    /// Create an analyzer from a custom configuration
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the configuration fails [`AnalyzerConfig::validate`]
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: AnalyzerConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            sampler: RegionSampler::new(config.sampling),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Classify the face in `image` using the thread-local RNG
    pub fn classify(&self, image: &RgbImage, face: FaceRegion) -> AnalysisResult {
        self.classify_with_rng(image, face, &mut rand::thread_rng())
    }

    /// Classify with a caller-supplied RNG; a seeded RNG makes the result
    /// reproducible
    pub fn classify_with_rng<R: Rng>(
        &self,
        image: &RgbImage,
        face: FaceRegion,
        rng: &mut R,
    ) -> AnalysisResult {
        self.analyze_with_rng(image, face, rng).result
    }

    /// Classify and keep the intermediate measurements
    pub fn analyze(&self, image: &RgbImage, face: FaceRegion) -> Analysis {
        self.analyze_with_rng(image, face, &mut rand::thread_rng())
    }

    pub fn analyze_with_rng<R: Rng>(
        &self,
        image: &RgbImage,
        face: FaceRegion,
        rng: &mut R,
    ) -> Analysis {
        let config = &self.config;

        // Skin tone
        let skin = self.sampler.sample_skin(image, &face);
        let lab = self.converter.to_lab(skin.r, skin.g, skin.b);
        let chroma = self.converter.chroma(lab);
        let chroma_level = ChromaLevel::from_chroma(chroma, &config.chroma);
        let depth = Depth::from_lightness(lab.l, &config.depth);
        let undertone = Undertone::classify(lab, depth, &config.undertone);

        // Contrast
        let rect = face.to_pixel_rect(image.width(), image.height());
        let variance = contrast::luminance_variance(
            image,
            &rect,
            config.sampling.contrast_sample_count,
            rng,
        );
        let contrast_level = Contrast::from_variance(variance, &config.contrast);
        let relative = contrast::relative_contrast(
            skin,
            self.sampler.sample_sclera(image, &face),
            self.sampler.sample_lip(image, &face),
        );

        let season = match_season(
            &SeasonInputs {
                undertone,
                depth,
                contrast: contrast_level,
                chroma: chroma_level,
                relative_contrast: relative,
            },
            &config.contrast,
        );

        // Confidence
        let brightness =
            confidence::mean_brightness(image, config.sampling.brightness_sample_count, rng);
        let confidence = confidence::combine(
            confidence::lighting_score(brightness),
            confidence::tone_score(skin),
            &config.confidence,
        );

        debug!(
            l = lab.l,
            a = lab.a,
            b = lab.b,
            chroma,
            ?depth,
            ?undertone,
            variance,
            relative,
            ?season,
            confidence,
            "classified face"
        );

        Analysis {
            result: AnalysisResult {
                season,
                undertone,
                contrast: contrast_level,
                confidence,
            },
            skin: SkinMeasurements {
                sample: skin,
                lab,
                chroma,
                chroma_level,
                depth,
                relative_contrast: relative,
                luminance_variance: variance,
                brightness,
                hex: self.converter.srgb_to_hex(Srgb::new(skin.r, skin.g, skin.b)),
            },
        }
    }
}
