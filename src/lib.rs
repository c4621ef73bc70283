//! # Season Scan
//!
//! A Rust crate for seasonal color analysis from a single selfie.
//!
//! This library classifies a face into one of 12 color seasons by:
//! - Sampling skin from forehead, cheeks and neck with a weighted mean
//! - Converting the sample to CIE Lab (D65) and deriving depth, undertone
//!   and chroma
//! - Estimating global luminance contrast and skin-to-feature contrast
//! - Matching the attributes to a season with a confidence score
//!
//! ## Example
//!
//! ```rust,no_run
//! use season_scan::{image_loader::load_image, ColorAnalyzer, FaceRegion};
//! use std::path::Path;
//!
//! let image = load_image(Path::new("selfie.jpg"))?;
//! let face = FaceRegion::new(0.3, 0.35, 0.4, 0.45)?;
//! let result = ColorAnalyzer::new().classify(&image, face);
//! println!("{} ({:.2})", result.season, result.confidence);
//! # Ok::<(), season_scan::AnalysisError>(())
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod exif;
pub mod image_loader;
pub mod pipeline;

pub use color::{
    Analysis, AnalysisResult, ChromaLevel, ColorAnalyzer, ColorSeason, Contrast, Depth, LabColor,
    SeasonFamily, SkinMeasurements, Undertone,
};
pub use config::AnalyzerConfig;
pub use detection::{FaceBounds, FaceDetector, FaceLocator, FaceRegion, RgbSample};
pub use error::{AnalysisError, Result};
pub use pipeline::{analyze_request, AnalysisRequest};
