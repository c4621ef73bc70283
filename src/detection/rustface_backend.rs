//! SeetaFace face detection through the `rustface` crate (feature `rustface`)

use crate::detection::face::{FaceBounds, FaceDetector};
use crate::{AnalysisError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Minimum face edge in pixels; selfies fill most of the frame
const MIN_FACE_SIZE: u32 = 40;
const SCORE_THRESHOLD: f64 = 2.0;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace frontal model (`seeta_fd_frontal_v1.0.bin`) from disk.
    pub fn from_model_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            AnalysisError::config(format!("Failed to open face model {}", path.display()), e)
        })?;
        let model = rustface::read_model(BufReader::new(file)).map_err(|e| {
            AnalysisError::config(format!("Failed to parse face model {}", path.display()), e)
        })?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        detector
            .detect(&rustface::ImageData::new(gray, width, height))
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x() as f64,
                    y: bbox.y() as f64,
                    width: bbox.width() as f64,
                    height: bbox.height() as f64,
                    confidence: face.score(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_config_error() {
        let result = RustfaceDetector::from_model_file(Path::new("/nonexistent/seeta.bin"));
        assert!(matches!(result, Err(AnalysisError::ConfigError { .. })));
    }
}
