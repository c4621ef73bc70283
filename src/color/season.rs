//! The 12 color seasons and the chroma-gated matching tree
//!
//! Branches are tried in priority order: warm undertones first (gated on
//! chroma, which keeps clear warm coloring out of Autumn), then cool,
//! cool-neutral and neutral. Every arm is an exhaustive `match`, so each
//! combination of inputs reaches exactly one season.

use crate::color::contrast::Contrast;
use crate::color::tone::{ChromaLevel, Depth, Undertone};
use crate::config::ContrastThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Season family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeasonFamily {
    Winter,
    Summer,
    Spring,
    Autumn,
}

/// One of the 12 seasonal color categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorSeason {
    DeepWinter,
    ClearWinter,
    CoolWinter,
    LightSummer,
    CoolSummer,
    SoftSummer,
    LightSpring,
    WarmSpring,
    ClearSpring,
    SoftAutumn,
    WarmAutumn,
    DeepAutumn,
}

impl ColorSeason {
    pub const ALL: [ColorSeason; 12] = [
        ColorSeason::DeepWinter,
        ColorSeason::ClearWinter,
        ColorSeason::CoolWinter,
        ColorSeason::LightSummer,
        ColorSeason::CoolSummer,
        ColorSeason::SoftSummer,
        ColorSeason::LightSpring,
        ColorSeason::WarmSpring,
        ColorSeason::ClearSpring,
        ColorSeason::SoftAutumn,
        ColorSeason::WarmAutumn,
        ColorSeason::DeepAutumn,
    ];

    pub fn family(&self) -> SeasonFamily {
        match self {
            ColorSeason::DeepWinter | ColorSeason::ClearWinter | ColorSeason::CoolWinter => {
                SeasonFamily::Winter
            }
            ColorSeason::LightSummer | ColorSeason::CoolSummer | ColorSeason::SoftSummer => {
                SeasonFamily::Summer
            }
            ColorSeason::LightSpring | ColorSeason::WarmSpring | ColorSeason::ClearSpring => {
                SeasonFamily::Spring
            }
            ColorSeason::SoftAutumn | ColorSeason::WarmAutumn | ColorSeason::DeepAutumn => {
                SeasonFamily::Autumn
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ColorSeason::DeepWinter => "Deep Winter",
            ColorSeason::ClearWinter => "Clear Winter",
            ColorSeason::CoolWinter => "Cool Winter",
            ColorSeason::LightSummer => "Light Summer",
            ColorSeason::CoolSummer => "Cool Summer",
            ColorSeason::SoftSummer => "Soft Summer",
            ColorSeason::LightSpring => "Light Spring",
            ColorSeason::WarmSpring => "Warm Spring",
            ColorSeason::ClearSpring => "Clear Spring",
            ColorSeason::SoftAutumn => "Soft Autumn",
            ColorSeason::WarmAutumn => "Warm Autumn",
            ColorSeason::DeepAutumn => "Deep Autumn",
        }
    }
}

impl fmt::Display for ColorSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Everything the matching tree looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonInputs {
    pub undertone: Undertone,
    pub depth: Depth,
    pub contrast: Contrast,
    pub chroma: ChromaLevel,
    /// Skin-to-feature luminance gap, only used for tie-breaking
    pub relative_contrast: f32,
}

/// Pick the season for a set of skin attributes
pub fn match_season(inputs: &SeasonInputs, thresholds: &ContrastThresholds) -> ColorSeason {
    use ColorSeason::*;
    use Contrast::{High, Low, Medium};
    use Depth::{Deep, Light};

    let SeasonInputs {
        undertone,
        depth,
        contrast,
        chroma,
        relative_contrast,
    } = *inputs;

    match undertone {
        Undertone::Warm | Undertone::WarmNeutral => match chroma {
            ChromaLevel::Vivid => match (depth, contrast) {
                (Light, High) => ClearSpring,
                (Light, _) => LightSpring,
                (Depth::Medium, High) => ClearSpring,
                (Depth::Medium, _) => WarmSpring,
                // very deep and very vivid reads as Deep Autumn, not Spring
                (Deep, High) => DeepAutumn,
                (Deep, Medium) => ClearSpring,
                (Deep, Low) => WarmSpring,
            },
            ChromaLevel::Moderate => match depth {
                Light => LightSpring,
                Depth::Medium => {
                    if relative_contrast > thresholds.relative_spring || contrast == High {
                        WarmSpring
                    } else {
                        WarmAutumn
                    }
                }
                Deep => DeepAutumn,
            },
            ChromaLevel::Muted => match (depth, contrast) {
                // very light skin rarely reads as true Autumn even when muted
                (Light, _) => LightSpring,
                (Depth::Medium, High) => WarmAutumn,
                (Depth::Medium, _) => SoftAutumn,
                (Deep, High | Medium) => DeepAutumn,
                (Deep, Low) => SoftAutumn,
            },
        },

        Undertone::Cool => match (depth, contrast) {
            (Deep, High | Medium) => DeepWinter,
            (Deep, Low) => CoolWinter,
            (Depth::Medium, High) => CoolWinter,
            (Depth::Medium, Medium) => CoolSummer,
            (Depth::Medium, Low) => SoftSummer,
            (Light, High) => CoolSummer,
            (Light, _) => LightSummer,
        },

        // one family lighter than cool at the light end
        Undertone::CoolNeutral => match (depth, contrast) {
            (Deep, High | Medium) => DeepWinter,
            (Deep, Low) => SoftSummer,
            (Depth::Medium, High) => ClearWinter,
            (Depth::Medium, _) => SoftSummer,
            (Light, High) => ClearWinter,
            (Light, Medium) => LightSummer,
            (Light, Low) => LightSpring,
        },

        // no warm/cool signal: depth splits first, contrast then picks the family
        Undertone::Neutral => match depth {
            Deep => match contrast {
                High => DeepWinter,
                Medium | Low => DeepAutumn,
            },
            // low feature contrast moves the family itself, not just the sub-season
            Depth::Medium if relative_contrast < thresholds.relative_soft_summer => SoftSummer,
            Depth::Medium => match contrast {
                High => ClearSpring,
                Medium | Low => SoftAutumn,
            },
            Light => match contrast {
                High | Medium => LightSpring,
                Low => LightSummer,
            },
        },
    }
}
