//! Confidence scoring
//!
//! Confidence blends how well exposed the photo is (lighting) with how
//! free of color cast the skin sample is (tone), clamped so the result never
//! claims certainty or near-zero certainty.

use crate::config::ConfidenceConfig;
use crate::constants::confidence::{
    BRIGHTNESS_FAIR, BRIGHTNESS_GOOD, SCORE_FAIR, SCORE_GOOD, SCORE_POOR, TONE_SPREAD_FAIR,
    TONE_SPREAD_GOOD,
};
use crate::detection::regions::RgbSample;
use image::RgbImage;
use rand::Rng;

/// Mean luminance of `samples` random pixels across the whole photo
///
/// `None` for an empty image.
pub fn mean_brightness<R: Rng>(image: &RgbImage, samples: usize, rng: &mut R) -> Option<f32> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || samples == 0 {
        return None;
    }
    let total: f32 = (0..samples)
        .map(|_| {
            let pixel = image.get_pixel(rng.gen_range(0..width), rng.gen_range(0..height));
            RgbSample::from_rgb8(pixel).luminance()
        })
        .sum();
    Some(total / samples as f32)
}

/// Exposure score: well inside the mid-tones is best
pub fn lighting_score(brightness: Option<f32>) -> f32 {
    let within = |b: f32, (lo, hi): (f32, f32)| (lo..=hi).contains(&b);
    match brightness {
        Some(b) if within(b, BRIGHTNESS_GOOD) => SCORE_GOOD,
        Some(b) if within(b, BRIGHTNESS_FAIR) => SCORE_FAIR,
        _ => SCORE_POOR,
    }
}

/// Color-cast score: a small RGB spread in the mean skin sample is best
pub fn tone_score(skin: RgbSample) -> f32 {
    let spread = skin.channel_spread();
    if spread < TONE_SPREAD_GOOD {
        SCORE_GOOD
    } else if spread < TONE_SPREAD_FAIR {
        SCORE_FAIR
    } else {
        SCORE_POOR
    }
}

/// `clamp(w_l·lighting + w_t·tone, min, max)`
pub fn combine(lighting: f32, tone: f32, config: &ConfidenceConfig) -> f32 {
    (config.lighting_weight * lighting + config.tone_weight * tone).clamp(config.min, config.max)
}
