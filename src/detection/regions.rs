//! Anatomical sample regions and pixel sampling
//!
//! A single sample point is unreliable (specular highlights, shadows, hair),
//! so skin color is the weighted mean of points spread over the forehead,
//! both cheeks and the neck. Feature points (sclera, lower lip) are single
//! pixels found by a small jitter search.
//!
//! Points that land outside the image are dropped, never clamped.

use crate::config::SamplingConfig;
use crate::constants::{luma, sampling};
use crate::detection::face::{FaceRegion, PixelRect};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// RGB channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbSample {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbSample {
    pub const NEUTRAL_GRAY: RgbSample = RgbSample {
        r: sampling::NEUTRAL_GRAY,
        g: sampling::NEUTRAL_GRAY,
        b: sampling::NEUTRAL_GRAY,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(pixel: &image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Rec. 601 luma
    pub fn luminance(&self) -> f32 {
        luma::RED * self.r + luma::GREEN * self.g + luma::BLUE * self.b
    }

    /// Largest minus smallest channel
    pub fn channel_spread(&self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        max - min
    }
}

/// Which anatomical zone a sample point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinZone {
    Forehead,
    Cheek,
    Neck,
}

/// A pixel position tagged with the zone that decides its weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f32,
    pub y: f32,
    pub zone: SkinZone,
}

/// Running `Σ(w·v) / Σw` over RGB samples
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMean {
    r: f32,
    g: f32,
    b: f32,
    total_weight: f32,
    count: usize,
}

impl WeightedMean {
    pub fn add(&mut self, sample: RgbSample, weight: f32) {
        self.r += weight * sample.r;
        self.g += weight * sample.g;
        self.b += weight * sample.b;
        self.total_weight += weight;
        self.count += 1;
    }

    /// The weighted mean, or `None` if nothing was added
    pub fn mean(&self) -> Option<RgbSample> {
        if self.count == 0 || self.total_weight <= 0.0 {
            return None;
        }
        Some(RgbSample::new(
            self.r / self.total_weight,
            self.g / self.total_weight,
            self.b / self.total_weight,
        ))
    }
}

/// Nearest-pixel lookup; `None` outside the image
pub fn pixel_at(image: &RgbImage, x: f32, y: f32) -> Option<RgbSample> {
    let (xi, yi) = (x.round(), y.round());
    if !(xi >= 0.0 && yi >= 0.0 && xi < image.width() as f32 && yi < image.height() as f32) {
        return None;
    }
    Some(RgbSample::from_rgb8(image.get_pixel(xi as u32, yi as u32)))
}

/// All skin sample points for a face box: 9 forehead, 6 cheek, 6 neck
pub fn skin_sample_points(rect: &PixelRect) -> Vec<SamplePoint> {
    let mut points = Vec::with_capacity(21);
    let steps = [-1.0, 0.0, 1.0];

    let (fx, fy) = sampling::FOREHEAD_ANCHOR;
    let (cx, cy) = (rect.x_at(fx), rect.y_at(fy));
    for dy in steps {
        for dx in steps {
            points.push(SamplePoint {
                x: cx + dx * sampling::FOREHEAD_GRID_STEP_PX,
                y: cy + dy * sampling::FOREHEAD_GRID_STEP_PX,
                zone: SkinZone::Forehead,
            });
        }
    }

    for (ax, ay) in [sampling::LEFT_CHEEK_ANCHOR, sampling::RIGHT_CHEEK_ANCHOR] {
        let (x, y) = (rect.x_at(ax), rect.y_at(ay));
        for dy in steps {
            points.push(SamplePoint {
                x,
                y: y + dy * sampling::CHEEK_SPREAD_PX,
                zone: SkinZone::Cheek,
            });
        }
    }

    let mid_x = rect.x_at(0.5);
    for offset in sampling::NECK_ROW_OFFSETS_PX {
        for dx in steps {
            points.push(SamplePoint {
                x: mid_x + dx * sampling::NECK_COLUMN_STEP_PX,
                y: rect.bottom() + offset,
                zone: SkinZone::Neck,
            });
        }
    }

    points
}

/// Samples skin and facial features from a face box
#[derive(Debug, Clone, Copy)]
pub struct RegionSampler {
    config: SamplingConfig,
}

impl Default for RegionSampler {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}

impl RegionSampler {
    pub fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    fn weight(&self, zone: SkinZone) -> f32 {
        match zone {
            SkinZone::Forehead => self.config.forehead_weight,
            SkinZone::Cheek => self.config.cheek_weight,
            SkinZone::Neck => self.config.neck_weight,
        }
    }

    /// Weighted mean skin color over forehead, cheeks and neck
    ///
    /// Falls back to neutral gray when no point lands inside the image.
    pub fn sample_skin(&self, image: &RgbImage, face: &FaceRegion) -> RgbSample {
        let rect = face.to_pixel_rect(image.width(), image.height());
        let mut mean = WeightedMean::default();
        for point in skin_sample_points(&rect) {
            if let Some(sample) = pixel_at(image, point.x, point.y) {
                mean.add(sample, self.weight(point.zone));
            }
        }

        match mean.mean() {
            Some(sample) => sample,
            None => {
                debug!(?face, "no skin sample inside the image, using neutral gray");
                RgbSample::NEUTRAL_GRAY
            }
        }
    }

    /// First in-bounds pixel of a 3×3 jitter search around a face-box anchor
    ///
    /// The anchor is `(fraction of width, fraction of height up from the
    /// bottom edge)`.
    pub fn sample_feature(
        &self,
        image: &RgbImage,
        face: &FaceRegion,
        anchor: (f32, f32),
    ) -> Option<RgbSample> {
        let rect = face.to_pixel_rect(image.width(), image.height());
        let (x, y) = (rect.x_at(anchor.0), rect.y_at(anchor.1));
        let step = sampling::FEATURE_JITTER_STEP_PX;
        let steps = [-step, 0.0, step];
        steps
            .iter()
            .flat_map(|dy| steps.iter().map(move |dx| (*dx, *dy)))
            .find_map(|(dx, dy)| pixel_at(image, x + dx, y + dy))
    }

    pub fn sample_sclera(&self, image: &RgbImage, face: &FaceRegion) -> Option<RgbSample> {
        self.sample_feature(image, face, sampling::SCLERA_ANCHOR)
    }

    pub fn sample_lip(&self, image: &RgbImage, face: &FaceRegion) -> Option<RgbSample> {
        self.sample_feature(image, face, sampling::LIP_ANCHOR)
    }
}
