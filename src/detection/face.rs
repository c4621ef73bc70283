//! Face location: the normalized face box and the pluggable detector contract
//!
//! The locator accepts exactly one face. Zero faces and several faces are
//! both typed failures; the caller re-prompts for a new photo.

use crate::image_loader::decode_image;
use crate::{AnalysisError, Result};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Face bounding box in normalized image coordinates.
///
/// `origin_x`/`origin_y` locate the bottom-left corner with the origin at the
/// bottom-left of the image; all four values are fractions of the image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceRegion {
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Face box in pixels with a top-left origin, as image rows are stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    /// Horizontal pixel position of a fraction of the width
    pub fn x_at(&self, fraction: f32) -> f32 {
        self.left + fraction * self.width
    }

    /// Vertical pixel position of a fraction of the height measured upward
    /// from the bottom edge
    pub fn y_at(&self, fraction_up: f32) -> f32 {
        self.bottom() - fraction_up * self.height
    }

    /// Row of the bottom edge (the chin)
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whole-pixel column and row ranges of the box clipped to the image
    ///
    /// Edges snap to the nearest pixel boundary. Returns `None` when nothing
    /// of the box lies inside the image.
    pub fn clip(
        &self,
        image_width: u32,
        image_height: u32,
    ) -> Option<(std::ops::Range<u32>, std::ops::Range<u32>)> {
        let x0 = self.left.round().max(0.0);
        let y0 = self.top.round().max(0.0);
        let x1 = (self.left + self.width).round().min(image_width as f32);
        let y1 = (self.top + self.height).round().min(image_height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32..x1 as u32, y0 as u32..y1 as u32))
    }
}

impl FaceRegion {
    /// Create a face region, rejecting non-finite values and empty boxes
    pub fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Result<Self> {
        let region = Self {
            origin_x,
            origin_y,
            width,
            height,
        };
        region.validate()?;
        Ok(region)
    }

    /// Check that the box is finite and has positive size
    pub fn validate(&self) -> Result<()> {
        let values = [self.origin_x, self.origin_y, self.width, self.height];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::InvalidFaceRegion {
                reason: format!("non-finite coordinates {:?}", values),
            });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(AnalysisError::InvalidFaceRegion {
                reason: format!("empty box {}x{}", self.width, self.height),
            });
        }
        Ok(())
    }

    /// Convert to a pixel rectangle with a top-left origin
    pub fn to_pixel_rect(&self, image_width: u32, image_height: u32) -> PixelRect {
        let (w, h) = (image_width as f32, image_height as f32);
        PixelRect {
            left: self.origin_x * w,
            top: (1.0 - self.origin_y - self.height) * h,
            width: self.width * w,
            height: self.height * h,
        }
    }

    /// Build from detector bounds (pixels, top-left origin), clipped to the image
    pub fn from_pixel_bounds(bounds: &FaceBounds, image_width: u32, image_height: u32) -> Self {
        let (w, h) = (image_width as f64, image_height as f64);
        let left = bounds.x.clamp(0.0, w);
        let top = bounds.y.clamp(0.0, h);
        let right = (bounds.x + bounds.width).clamp(0.0, w);
        let bottom = (bounds.y + bounds.height).clamp(0.0, h);
        Self {
            origin_x: (left / w) as f32,
            origin_y: (1.0 - bottom / h) as f32,
            width: ((right - left) / w) as f32,
            height: ((bottom - top) / h) as f32,
        }
    }
}

/// Bounding box of a detected face within an image.
#[derive(Debug, Clone)]
pub struct FaceBounds {
    /// X coordinate of the top-left corner (pixels).
    pub x: f64,
    /// Y coordinate of the top-left corner (pixels).
    pub y: f64,
    /// Width of the bounding box (pixels).
    pub width: f64,
    /// Height of the bounding box (pixels).
    pub height: f64,
    /// Detection confidence score.
    pub confidence: f64,
}

/// Pluggable face detection backend.
///
/// Implement this trait to provide a platform or ML face detector and pass
/// it to [`FaceLocator::new`].
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds>;
}

/// Finds the single face the analysis runs on
pub struct FaceLocator {
    detector: Box<dyn FaceDetector>,
}

impl FaceLocator {
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self { detector }
    }

    /// Locate exactly one face in a decoded photo
    ///
    /// # Errors
    ///
    /// - `InvalidImage` if the image has no pixels
    /// - `NoFaceFound` if the detector returns nothing
    /// - `MultipleFacesFound` if it returns more than one face
    pub fn locate(&self, image: &RgbImage) -> Result<FaceRegion> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::invalid_image("image has zero dimensions"));
        }

        let gray = image::imageops::grayscale(image);
        let faces = self.detector.detect(gray.as_raw(), width, height);
        debug!(count = faces.len(), width, height, "face detection finished");

        match faces.as_slice() {
            [] => Err(AnalysisError::NoFaceFound),
            [face] => {
                let region = FaceRegion::from_pixel_bounds(face, width, height);
                region.validate()?;
                Ok(region)
            }
            many => {
                warn!(count = many.len(), "refusing to pick one of several faces");
                Err(AnalysisError::MultipleFacesFound { count: many.len() })
            }
        }
    }

    /// Decode encoded image bytes and locate exactly one face
    pub fn locate_bytes(&self, bytes: &[u8]) -> Result<FaceRegion> {
        let image = decode_image(bytes)?;
        self.locate(&image)
    }
}
