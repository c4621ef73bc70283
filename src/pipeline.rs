//! Request-level entry point: encoded photo in, season out
//!
//! A request carries the encoded photo and optionally a face region the
//! caller already knows (from a platform face detector, say). Without one,
//! the supplied [`FaceLocator`] finds the face.

use crate::color::analysis::{AnalysisResult, ColorAnalyzer};
use crate::detection::face::{FaceLocator, FaceRegion};
use crate::image_loader::decode_image;
use crate::{AnalysisError, Result};
use tracing::debug;

/// One photo to analyze
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Encoded image bytes (JPEG, PNG, ...)
    pub image: Vec<u8>,
    /// Normalized face box; `None` asks the locator to find it
    pub face: Option<FaceRegion>,
}

impl AnalysisRequest {
    pub fn new(image: Vec<u8>) -> Self {
        Self { image, face: None }
    }

    pub fn with_face(mut self, face: FaceRegion) -> Self {
        self.face = Some(face);
        self
    }
}

/// Decode, locate the face if needed, and classify
///
/// # Errors
///
/// - `InvalidImage` if the bytes do not decode
/// - `InvalidFaceRegion` if the supplied region is not a valid box
/// - `InvalidParameter` if there is neither a face region nor a locator
/// - `NoFaceFound` / `MultipleFacesFound` from the locator
pub fn analyze_request(
    analyzer: &ColorAnalyzer,
    locator: Option<&FaceLocator>,
    request: &AnalysisRequest,
) -> Result<AnalysisResult> {
    let image = decode_image(&request.image)?;

    let face = match (request.face, locator) {
        (Some(face), _) => {
            face.validate()?;
            face
        }
        (None, Some(locator)) => locator.locate(&image)?,
        (None, None) => {
            return Err(AnalysisError::invalid_parameter(
                "face",
                "missing and no face locator configured",
            ))
        }
    };
    debug!(?face, "analyzing request");

    Ok(analyzer.classify(&image, face))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::face::{FaceBounds, FaceDetector};
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    struct CenterDetector;

    impl FaceDetector for CenterDetector {
        fn detect(&self, _gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
            vec![FaceBounds {
                x: width as f64 / 4.0,
                y: height as f64 / 4.0,
                width: width as f64 / 2.0,
                height: height as f64 / 2.0,
                confidence: 9.0,
            }]
        }
    }

    fn png_bytes() -> Vec<u8> {
        let image = RgbImage::from_pixel(40, 40, Rgb([200, 160, 140]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_request_with_face_skips_locator() {
        let request =
            AnalysisRequest::new(png_bytes()).with_face(FaceRegion::new(0.2, 0.2, 0.6, 0.6).unwrap());
        let result = analyze_request(&ColorAnalyzer::new(), None, &request).unwrap();
        assert!((0.50..=0.98).contains(&result.confidence));
    }

    #[test]
    fn test_request_uses_locator_when_face_missing() {
        let locator = FaceLocator::new(Box::new(CenterDetector));
        let request = AnalysisRequest::new(png_bytes());
        assert!(analyze_request(&ColorAnalyzer::new(), Some(&locator), &request).is_ok());
    }

    #[test]
    fn test_request_without_face_or_locator() {
        let request = AnalysisRequest::new(png_bytes());
        assert!(matches!(
            analyze_request(&ColorAnalyzer::new(), None, &request),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_request_rejects_bad_inputs() {
        let garbage = AnalysisRequest::new(b"nope".to_vec());
        assert!(matches!(
            analyze_request(&ColorAnalyzer::new(), None, &garbage),
            Err(AnalysisError::InvalidImage { .. })
        ));

        let empty_box = AnalysisRequest::new(png_bytes()).with_face(FaceRegion {
            origin_x: 0.1,
            origin_y: 0.1,
            width: 0.0,
            height: 0.3,
        });
        assert!(matches!(
            analyze_request(&ColorAnalyzer::new(), None, &empty_box),
            Err(AnalysisError::InvalidFaceRegion { .. })
        ));
    }
}
