//! Contrast estimators
//!
//! Global contrast is the population variance of luminance over random face
//! pixels. It is sampled, so two runs on the same photo can land in
//! neighbouring buckets near a threshold; pass a seeded RNG to pin it.
//!
//! Relative contrast is the mean luminance gap between skin and two facial
//! features (sclera, lower lip). It only feeds season tie-breaking.

use crate::config::ContrastThresholds;
use crate::detection::face::PixelRect;
use crate::detection::regions::RgbSample;
use image::RgbImage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Overall light/dark contrast of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Contrast {
    Low,
    Medium,
    High,
}

impl Contrast {
    pub const ALL: [Contrast; 3] = [Contrast::Low, Contrast::Medium, Contrast::High];

    pub fn from_variance(variance: f32, thresholds: &ContrastThresholds) -> Self {
        if variance > thresholds.high_variance {
            Contrast::High
        } else if variance > thresholds.medium_variance {
            Contrast::Medium
        } else {
            Contrast::Low
        }
    }
}

/// Population variance of luminance over `samples` random pixels in the face box
///
/// Returns 0 when the box does not overlap the image.
pub fn luminance_variance<R: Rng>(
    image: &RgbImage,
    face: &PixelRect,
    samples: usize,
    rng: &mut R,
) -> f32 {
    let Some((xs, ys)) = face.clip(image.width(), image.height()) else {
        return 0.0;
    };

    let values: Vec<f32> = (0..samples)
        .map(|_| {
            let x = rng.gen_range(xs.clone());
            let y = rng.gen_range(ys.clone());
            RgbSample::from_rgb8(image.get_pixel(x, y)).luminance()
        })
        .collect();

    population_variance(&values)
}

/// Mean of `|skin − feature|` luminance over the features that were found
///
/// Returns 0 when neither feature could be sampled.
pub fn relative_contrast(skin: RgbSample, sclera: Option<RgbSample>, lip: Option<RgbSample>) -> f32 {
    let skin_y = skin.luminance();
    let gaps: Vec<f32> = [sclera, lip]
        .into_iter()
        .flatten()
        .map(|feature| (skin_y - feature.luminance()).abs())
        .collect();

    if gaps.is_empty() {
        0.0
    } else {
        gaps.iter().sum::<f32>() / gaps.len() as f32
    }
}

fn population_variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n
}
