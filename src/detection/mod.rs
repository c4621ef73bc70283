//! Face location and pixel region sampling
//!
//! This module finds the face box in a photo and reads skin and feature
//! colors from fixed anatomical anchors inside it.

pub mod face;
pub mod regions;
#[cfg(feature = "rustface")]
pub mod rustface_backend;

pub use face::{FaceBounds, FaceDetector, FaceLocator, FaceRegion, PixelRect};
pub use regions::{RegionSampler, RgbSample};
#[cfg(feature = "rustface")]
pub use rustface_backend::RustfaceDetector;
