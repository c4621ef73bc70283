//! Color science and season classification
//!
//! This module converts skin samples to CIE Lab, derives depth, undertone,
//! chroma and contrast from them, and maps those attributes to a season.

pub mod analysis;
pub mod confidence;
pub mod contrast;
pub mod conversion;
pub mod season;
pub mod tone;

pub use analysis::{Analysis, AnalysisResult, ColorAnalyzer, SkinMeasurements};
pub use contrast::Contrast;
pub use conversion::{ColorConverter, LabColor};
pub use season::{match_season, ColorSeason, SeasonFamily, SeasonInputs};
pub use tone::{ChromaLevel, Depth, Undertone};
