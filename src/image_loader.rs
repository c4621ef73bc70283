//! Unified image loading with support for multiple formats
//!
//! This module provides a single entry point for turning a photo (a file or
//! an encoded byte buffer) into an upright RGB pixel buffer.
//!
//! ## Supported Formats
//!
//! Standard formats (via `image` crate):
//! - JPEG, PNG, GIF, WebP, TIFF, BMP, ICO, TGA, PNM, QOI
//!
//! Apple formats (via `libheif-rs`, feature `heic`):
//! - HEIC, HEIF
//!
//! ## Design
//!
//! All decoders produce `image::RgbImage` (8-bit sRGB). EXIF orientation is
//! applied before returning so face anchors always see an upright face; a
//! broken EXIF block is logged and ignored rather than failing the photo.

use crate::error::{AnalysisError, Result};
use crate::exif::read_orientation;
use image::RgbImage;
use std::path::Path;
use tracing::{debug, warn};

/// Decoder a file extension routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Anything the `image` crate decodes
    Raster,
    /// HEIC/HEIF, decoded by libheif
    Heif,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "tiff" | "tif" | "bmp" | "ico" | "tga"
            | "pbm" | "pgm" | "ppm" | "pnm" | "qoi" => Some(ImageFormat::Raster),
            "heic" | "heif" => Some(ImageFormat::Heif),
            _ => None,
        }
    }
}

/// Load a photo from disk as an upright RGB image
///
/// # Errors
///
/// - `InvalidImage` if the extension is unknown or the bytes do not decode
/// - `ImageLoadError` if the file cannot be read
///
/// # Example
///
/// ```rust,no_run
/// use season_scan::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("selfie.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), season_scan::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let format = ImageFormat::from_extension(path).ok_or_else(|| {
        AnalysisError::invalid_image(format!("Unknown image format for file: {}", path.display()))
    })?;

    if format == ImageFormat::Heif {
        return load_heic(path);
    }

    let bytes = std::fs::read(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to read image file: {}", path.display()), e)
    })?;
    decode_image(&bytes)
}

/// Decode an encoded photo held in memory and apply its EXIF orientation
///
/// # Errors
///
/// `InvalidImage` if the bytes are not a decodable image or decode to an
/// image with no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::invalid_image(format!("Failed to decode image: {}", e)))?;
    let image = decoded.to_rgb8();
    if image.width() == 0 || image.height() == 0 {
        return Err(AnalysisError::invalid_image("image has zero dimensions"));
    }

    let orientation = match read_orientation(bytes) {
        Ok(orientation) => orientation,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable EXIF orientation");
            None
        }
    };

    let image = match orientation {
        Some(orientation) => orientation.apply(image),
        None => image,
    };
    debug!(
        width = image.width(),
        height = image.height(),
        ?orientation,
        "decoded image"
    );
    Ok(image)
}

/// Load HEIC/HEIF image using libheif
///
/// libheif applies the container's rotation and mirror transforms while
/// decoding, so no EXIF pass is needed.
#[cfg(feature = "heic")]
fn load_heic(path: &Path) -> Result<RgbImage> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let lib_heif = LibHeif::new();

    let path_str = path
        .to_str()
        .ok_or_else(|| AnalysisError::invalid_parameter("path", path.display()))?;
    let ctx = HeifContext::read_from_file(path_str).map_err(|e| {
        AnalysisError::image_load(format!("Failed to read HEIC file: {}", path.display()), e)
    })?;

    let handle = ctx
        .primary_image_handle()
        .map_err(|e| AnalysisError::image_load("Failed to get primary image handle", e))?;

    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| AnalysisError::image_load("Failed to decode HEIC image", e))?;

    let planes = image.planes();
    let rgb_plane = planes
        .interleaved
        .ok_or_else(|| AnalysisError::invalid_image("HEIC image has no interleaved RGB data"))?;

    let width = handle.width();
    let height = handle.height();
    let stride = rgb_plane.stride as usize;
    let row_bytes = width as usize * 3;

    // Rows may carry stride padding
    let rgb_data: Vec<u8> = rgb_plane
        .data
        .chunks(stride)
        .take(height as usize)
        .filter_map(|row| row.get(..row_bytes))
        .flatten()
        .copied()
        .collect();

    RgbImage::from_raw(width, height, rgb_data)
        .ok_or_else(|| AnalysisError::invalid_image("HEIC plane is smaller than its dimensions"))
}

#[cfg(not(feature = "heic"))]
fn load_heic(path: &Path) -> Result<RgbImage> {
    Err(AnalysisError::invalid_image(format!(
        "{}: HEIC/HEIF support requires the `heic` feature",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::orientation::tests::{encode_jpeg, with_orientation_tag};
    use image::Rgb;
    use std::io::Cursor;

    fn encode_png(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.jpg")),
            Some(ImageFormat::Raster)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.TIF")),
            Some(ImageFormat::Raster)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.heic")),
            Some(ImageFormat::Heif)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.HEIF")),
            Some(ImageFormat::Heif)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("photo.xyz")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("photo")), None);
    }

    #[cfg(not(feature = "heic"))]
    #[test]
    fn test_heif_extension_routes_to_libheif() {
        match load_image(Path::new("selfie.HEIC")) {
            Err(AnalysisError::InvalidImage { reason }) => assert!(reason.contains("`heic` feature")),
            other => panic!("Expected InvalidImage, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_png_keeps_pixels() {
        let mut source = RgbImage::from_pixel(5, 3, Rgb([10, 20, 30]));
        source.put_pixel(4, 2, Rgb([200, 100, 50]));
        let decoded = decode_image(&encode_png(&source)).unwrap();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let jpeg = encode_jpeg(&RgbImage::from_pixel(16, 8, Rgb([180, 130, 100])));
        assert_eq!(decode_image(&jpeg).unwrap().dimensions(), (16, 8));
        let rotated = with_orientation_tag(&jpeg, 6);
        assert_eq!(decode_image(&rotated).unwrap().dimensions(), (8, 16));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_image(b"\x00\x01\x02 not an image"),
            Err(AnalysisError::InvalidImage { .. })
        ));
        assert!(matches!(decode_image(&[]), Err(AnalysisError::InvalidImage { .. })));
    }

    #[test]
    fn test_load_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        std::fs::write(&path, encode_png(&RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])))).unwrap();
        assert_eq!(load_image(&path).unwrap().dimensions(), (4, 4));

        assert!(matches!(
            load_image(&dir.path().join("missing.png")),
            Err(AnalysisError::ImageLoadError { .. })
        ));
        assert!(matches!(
            load_image(&dir.path().join("notes.txt")),
            Err(AnalysisError::InvalidImage { .. })
        ));
    }
}
