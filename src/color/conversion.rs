//! Color space conversion utilities
//!
//! Provides the conversions the season classifier needs:
//! - sRGB (gamma-encoded) or linear RGB to CIE Lab under D65
//! - Lab to LCh for chroma
//! - sRGB to hex for reporting
//!
//! The sRGB to XYZ matrix and Lab transfer function are spelled out from
//! [`crate::constants`] instead of delegated, because classification
//! boundaries depend on their exact values.

use crate::constants::{d65, transfer, D65_WHITE_POINT_XYZ};
use palette::{FromColor, Lab, Lch, Srgb};

/// Perceptually uniform color used for all skin judgments (D65, `f32`)
pub type LabColor = Lab;

/// Color converter targeting the D65 white point
#[derive(Debug, Clone, Copy)]
pub struct ColorConverter {
    white_point: [f32; 3],
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a new color converter with D65 as reference white
    pub fn new() -> Self {
        Self {
            white_point: D65_WHITE_POINT_XYZ,
        }
    }

    /// Convert gamma-encoded sRGB channels in `[0, 1]` to Lab
    pub fn to_lab(&self, r: f32, g: f32, b: f32) -> LabColor {
        self.linear_to_lab(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
        )
    }

    /// Convert linear-light RGB channels in `[0, 1]` to Lab
    pub fn linear_to_lab(&self, r: f32, g: f32, b: f32) -> LabColor {
        let m = &d65::SRGB_TO_XYZ;
        let x = m[0][0] * r + m[0][1] * g + m[0][2] * b;
        let y = m[1][0] * r + m[1][1] * g + m[1][2] * b;
        let z = m[2][0] * r + m[2][1] * g + m[2][2] * b;

        let fx = lab_transfer(x / self.white_point[0]);
        let fy = lab_transfer(y / self.white_point[1]);
        let fz = lab_transfer(z / self.white_point[2]);

        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }

    /// Convert Lab to LCh (cylindrical representation)
    pub fn lab_to_lch(&self, lab: LabColor) -> Lch {
        Lch::from_color(lab)
    }

    /// Colorfulness independent of hue and lightness, `sqrt(a² + b²)`
    pub fn chroma(&self, lab: LabColor) -> f32 {
        self.lab_to_lch(lab).chroma
    }

    /// Convert sRGB to hexadecimal color string
    ///
    /// Channels are clamped to `[0, 1]` before quantizing.
    pub fn srgb_to_hex(&self, srgb: Srgb) -> String {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            quantize(srgb.red),
            quantize(srgb.green),
            quantize(srgb.blue)
        )
    }
}

/// Convert gamma-encoded sRGB channels to Lab with the default converter
pub fn to_lab(r: f32, g: f32, b: f32) -> LabColor {
    ColorConverter::new().to_lab(r, g, b)
}

/// Decode one sRGB channel to linear light
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= transfer::SRGB_LINEAR_THRESHOLD {
        c / transfer::SRGB_LINEAR_SLOPE
    } else {
        ((c + transfer::SRGB_GAMMA_OFFSET) / transfer::SRGB_GAMMA_SCALE).powf(transfer::SRGB_GAMMA)
    }
}

/// CIE Lab companding: cube root above (6/29)^3, linear segment below
fn lab_transfer(t: f32) -> f32 {
    if t > transfer::LAB_EPSILON {
        t.cbrt()
    } else {
        let delta = transfer::LAB_DELTA;
        t / (3.0 * delta * delta) + 4.0 / 29.0
    }
}
