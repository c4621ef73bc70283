//! Error types for the season_scan library

use thiserror::Error;

/// Result type alias for season_scan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for photo decoding, face location and configuration
///
/// The classification core itself never fails: once it holds decoded pixels
/// and a face region every input maps to a season. Everything here happens
/// before that point.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be opened or read
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image bytes could not be decoded into a usable pixel buffer
    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },

    /// The face locator found no face in the photo
    #[error("No face found in photo")]
    NoFaceFound,

    /// The face locator found more than one face and refuses to guess
    #[error("Multiple faces found in photo ({count})")]
    MultipleFacesFound { count: usize },

    /// A caller-supplied face region is not a valid normalized box
    #[error("Invalid face region: {reason}")]
    InvalidFaceRegion { reason: String },

    /// EXIF metadata extraction failed
    #[error("EXIF processing error: {message}")]
    ExifError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read, written or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A result could not be serialized for the caller
    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid image error
    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    /// Create an EXIF processing error with context
    pub fn exif<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ExifError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a serialization error with context
    pub fn serialization<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if taking a new photo can resolve this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidImage { .. }
                | AnalysisError::NoFaceFound
                | AnalysisError::MultipleFacesFound { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } | AnalysisError::InvalidImage { .. } => {
                "Could not read the photo. Please take or choose another photo.".to_string()
            }
            AnalysisError::NoFaceFound => {
                "No face detected. Please ensure your face is clearly visible and well lit."
                    .to_string()
            }
            AnalysisError::MultipleFacesFound { count } => format!(
                "Found {} faces. Please make sure only one face is in the frame.",
                count
            ),
            AnalysisError::InvalidFaceRegion { .. } => {
                "The selected face area is not valid. Please try again.".to_string()
            }
            _ => "Color analysis failed. Please try with a different photo.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_errors_are_recoverable() {
        assert!(AnalysisError::NoFaceFound.is_recoverable());
        assert!(AnalysisError::MultipleFacesFound { count: 2 }.is_recoverable());
        assert!(AnalysisError::invalid_image("truncated").is_recoverable());
        assert!(!AnalysisError::invalid_parameter("chroma_high", 5.0).is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        assert!(AnalysisError::NoFaceFound.user_message().contains("clearly visible"));
        let message = AnalysisError::MultipleFacesFound { count: 3 }.user_message();
        assert!(message.contains("3 faces"));
        assert!(message.contains("only one face"));
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::invalid_parameter("depth.light_above", 40.0);
        assert_eq!(err.to_string(), "Invalid parameter: depth.light_above = 40");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AnalysisError::image_load("Failed to open image file: a.jpg", io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serialization_error_names_the_failure() {
        let cause = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = AnalysisError::serialization("Failed to serialize analysis result", cause);
        assert!(matches!(err, AnalysisError::SerializationError { .. }));
        assert_eq!(
            err.to_string(),
            "Serialization error: Failed to serialize analysis result"
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_recoverable());
    }
}
