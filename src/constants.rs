//! Calibration constants and reference values for season analysis
//!
//! Colorimetric constants follow the CIE sRGB/D65 definitions. The
//! classification thresholds are the calibrated defaults behind
//! [`crate::config::AnalyzerConfig`]; change them there rather than here
//! when recalibrating at runtime.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. This is the reference white for sRGB.
pub mod d65 {
    /// D65 white point in CIE XYZ color space
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f32; 3] = [0.95047, 1.00000, 1.08883];

    /// Linear sRGB to XYZ matrix (rows produce X, Y, Z)
    /// Source: IEC 61966-2-1, 7 significant digits
    pub const SRGB_TO_XYZ: [[f32; 3]; 3] = [
        [0.4124564, 0.3575761, 0.1804375],
        [0.2126729, 0.7151522, 0.0721750],
        [0.0193339, 0.1191920, 0.9503041],
    ];
}

/// Re-export D65 white point at top level for convenience
pub const D65_WHITE_POINT_XYZ: [f32; 3] = d65::WHITE_POINT_XYZ;

/// sRGB transfer function and CIE Lab transfer constants
pub mod transfer {
    /// Encoded values at or below this are on the linear toe of the sRGB curve
    pub const SRGB_LINEAR_THRESHOLD: f32 = 0.04045;

    /// Slope of the linear toe
    pub const SRGB_LINEAR_SLOPE: f32 = 12.92;

    /// Offset and scale of the power segment
    pub const SRGB_GAMMA_OFFSET: f32 = 0.055;
    pub const SRGB_GAMMA_SCALE: f32 = 1.055;
    pub const SRGB_GAMMA: f32 = 2.4;

    /// CIE delta, 6/29
    pub const LAB_DELTA: f32 = 6.0 / 29.0;

    /// Cube-root/linear switch point, (6/29)^3
    pub const LAB_EPSILON: f32 = LAB_DELTA * LAB_DELTA * LAB_DELTA;
}

/// Luminance weights (Rec. 601) used for contrast and brightness statistics
pub mod luma {
    pub const RED: f32 = 0.299;
    pub const GREEN: f32 = 0.587;
    pub const BLUE: f32 = 0.114;
}

/// Classification thresholds
pub mod thresholds {
    /// Skin chroma above this reads as clear/vivid coloring
    pub const CHROMA_HIGH: f32 = 18.0;

    /// Skin chroma at or below this reads as muted/soft coloring
    pub const CHROMA_LOW: f32 = 12.0;

    /// L* above this is light depth
    pub const DEPTH_LIGHT_ABOVE: f32 = 65.0;

    /// L* above this (and not light) is medium depth
    pub const DEPTH_MEDIUM_ABOVE: f32 = 45.0;

    /// Weight of a* in the undertone score `b* + w·a*`
    pub const UNDERTONE_A_WEIGHT: f32 = 0.3;

    /// Luminance variance above this is high contrast
    pub const CONTRAST_HIGH_VARIANCE: f32 = 0.15;

    /// Luminance variance above this is medium contrast
    pub const CONTRAST_MEDIUM_VARIANCE: f32 = 0.08;

    /// Feature contrast above this pushes medium-depth warm skin to Spring
    pub const RELATIVE_CONTRAST_SPRING: f32 = 0.12;

    /// Feature contrast below this moves medium-depth neutral skin to Soft Summer
    pub const RELATIVE_CONTRAST_SOFT_SUMMER: f32 = 0.08;
}

/// Undertone score bands per depth: `[cool_below, cool_neutral_below, neutral_max, warm_neutral_max]`
///
/// Deep skin gets a narrower warm window because camera sensors tend to read
/// darker skin as warmer than it is.
pub mod undertone {
    pub const LIGHT: [f32; 4] = [-3.0, 1.0, 4.0, 8.0];
    pub const MEDIUM: [f32; 4] = [-1.0, 2.0, 5.0, 8.0];
    pub const DEEP: [f32; 4] = [0.0, 3.0, 6.0, 9.0];
}

/// Skin sampling geometry and weights
///
/// Anchors are fractions of the face box measured from its origin: x from
/// the left edge, y upward from the bottom edge. Offsets are raw pixels.
pub mod sampling {
    pub const FOREHEAD_ANCHOR: (f32, f32) = (0.50, 0.85);
    pub const FOREHEAD_GRID_STEP_PX: f32 = 10.0;

    pub const LEFT_CHEEK_ANCHOR: (f32, f32) = (0.25, 0.50);
    pub const RIGHT_CHEEK_ANCHOR: (f32, f32) = (0.75, 0.50);
    pub const CHEEK_SPREAD_PX: f32 = 15.0;

    /// Distance below the chin of each neck sample row
    pub const NECK_ROW_OFFSETS_PX: [f32; 2] = [10.0, 25.0];
    pub const NECK_COLUMN_STEP_PX: f32 = 20.0;

    pub const FOREHEAD_WEIGHT: f32 = 1.0;
    pub const CHEEK_WEIGHT: f32 = 0.8;
    pub const NECK_WEIGHT: f32 = 1.2;

    /// Returned when no sample point lands inside the image
    pub const NEUTRAL_GRAY: f32 = 0.5;

    pub const SCLERA_ANCHOR: (f32, f32) = (0.30, 0.60);
    pub const LIP_ANCHOR: (f32, f32) = (0.50, 0.15);
    pub const FEATURE_JITTER_STEP_PX: f32 = 2.0;

    /// Random face pixels drawn for the luminance variance
    pub const CONTRAST_SAMPLE_COUNT: usize = 100;

    /// Random photo pixels drawn for the brightness estimate
    pub const BRIGHTNESS_SAMPLE_COUNT: usize = 1000;
}

/// Confidence scoring bands
pub mod confidence {
    pub const LIGHTING_WEIGHT: f32 = 0.6;
    pub const TONE_WEIGHT: f32 = 0.4;

    pub const MIN: f32 = 0.50;
    pub const MAX: f32 = 0.98;

    pub const SCORE_GOOD: f32 = 0.95;
    pub const SCORE_FAIR: f32 = 0.85;
    pub const SCORE_POOR: f32 = 0.70;

    /// Brightness inside this range scores good
    pub const BRIGHTNESS_GOOD: (f32, f32) = (0.4, 0.7);
    /// Brightness inside this range scores fair
    pub const BRIGHTNESS_FAIR: (f32, f32) = (0.3, 0.8);

    /// Skin channel spread below these scores good / fair
    pub const TONE_SPREAD_GOOD: f32 = 0.15;
    pub const TONE_SPREAD_FAIR: f32 = 0.3;
}
