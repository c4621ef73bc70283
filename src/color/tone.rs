//! Skin tone attributes derived from a Lab sample: depth, undertone, chroma level.
//!
//! All three are pure step functions of the Lab coordinates and the
//! configured thresholds.

use crate::color::conversion::LabColor;
use crate::config::{ChromaThresholds, DepthThresholds, UndertoneBands, UndertoneConfig};
use serde::{Deserialize, Serialize};

/// How light or dark the overall coloring is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Depth {
    Light,
    Medium,
    Deep,
}

impl Depth {
    pub const ALL: [Depth; 3] = [Depth::Light, Depth::Medium, Depth::Deep];

    /// Bucket L* into a depth; monotonic non-increasing darkness as L* rises
    pub fn from_lightness(l: f32, thresholds: &DepthThresholds) -> Self {
        if l > thresholds.light_above {
            Depth::Light
        } else if l > thresholds.medium_above {
            Depth::Medium
        } else {
            Depth::Deep
        }
    }
}

/// Warm/cool quality of the skin independent of depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Undertone {
    Cool,
    CoolNeutral,
    Neutral,
    WarmNeutral,
    Warm,
}

impl Undertone {
    pub const ALL: [Undertone; 5] = [
        Undertone::Cool,
        Undertone::CoolNeutral,
        Undertone::Neutral,
        Undertone::WarmNeutral,
        Undertone::Warm,
    ];

    /// Warm/cool score: b* carries the yellow/blue axis, a* corrects
    pub fn score(lab: LabColor, a_weight: f32) -> f32 {
        lab.b + a_weight * lab.a
    }

    /// Classify a skin sample using the bands for its depth
    pub fn classify(lab: LabColor, depth: Depth, config: &UndertoneConfig) -> Self {
        let bands = match depth {
            Depth::Light => &config.light,
            Depth::Medium => &config.medium,
            Depth::Deep => &config.deep,
        };
        Self::from_score(Self::score(lab, config.a_weight), bands)
    }

    pub fn from_score(score: f32, bands: &UndertoneBands) -> Self {
        if score < bands.cool_below {
            Undertone::Cool
        } else if score < bands.cool_neutral_below {
            Undertone::CoolNeutral
        } else if score <= bands.neutral_max {
            Undertone::Neutral
        } else if score <= bands.warm_neutral_max {
            Undertone::WarmNeutral
        } else {
            Undertone::Warm
        }
    }
}

/// Clarity of the skin color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChromaLevel {
    /// chroma <= low gate
    Muted,
    /// low gate < chroma <= high gate
    Moderate,
    /// chroma > high gate
    Vivid,
}

impl ChromaLevel {
    pub const ALL: [ChromaLevel; 3] = [ChromaLevel::Muted, ChromaLevel::Moderate, ChromaLevel::Vivid];

    pub fn from_chroma(chroma: f32, thresholds: &ChromaThresholds) -> Self {
        if chroma > thresholds.high {
            ChromaLevel::Vivid
        } else if chroma > thresholds.low {
            ChromaLevel::Moderate
        } else {
            ChromaLevel::Muted
        }
    }
}
