//! EXIF Orientation tag reading and correction

use crate::{AnalysisError, Result};
use image::imageops;
use image::RgbImage;
use std::io::Cursor;
use tracing::debug;

/// Display transform recorded in EXIF tag 0x0112
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// 1: stored upright
    Normal,
    /// 2
    FlipHorizontal,
    /// 3
    Rotate180,
    /// 4
    FlipVertical,
    /// 5: mirrored across the main diagonal
    Transpose,
    /// 6: rotate 90° clockwise to display
    Rotate90,
    /// 7: mirrored across the anti-diagonal
    Transverse,
    /// 8: rotate 270° clockwise to display
    Rotate270,
}

impl Orientation {
    /// Map the raw tag value; values outside 1..=8 are ignored
    pub fn from_exif_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270),
            _ => None,
        }
    }

    /// Whether width and height trade places
    pub fn swaps_dimensions(&self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90
                | Orientation::Transverse
                | Orientation::Rotate270
        )
    }

    /// Return the upright image
    pub fn apply(&self, image: RgbImage) -> RgbImage {
        match self {
            Orientation::Normal => image,
            Orientation::FlipHorizontal => imageops::flip_horizontal(&image),
            Orientation::Rotate180 => imageops::rotate180(&image),
            Orientation::FlipVertical => imageops::flip_vertical(&image),
            Orientation::Transpose => imageops::flip_horizontal(&imageops::rotate90(&image)),
            Orientation::Rotate90 => imageops::rotate90(&image),
            Orientation::Transverse => imageops::flip_horizontal(&imageops::rotate270(&image)),
            Orientation::Rotate270 => imageops::rotate270(&image),
        }
    }
}

/// Read the orientation tag from an encoded image container
///
/// `Ok(None)` when the container has no EXIF block or no orientation tag.
///
/// # Errors
///
/// `ExifError` when the container format is unknown or the EXIF block is
/// malformed.
pub fn read_orientation(bytes: &[u8]) -> Result<Option<Orientation>> {
    let exif = match ::exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(::exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(AnalysisError::exif("Failed to read EXIF block", e)),
    };

    let orientation = exif
        .get_field(::exif::Tag::Orientation, ::exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(Orientation::from_exif_value);
    debug!(?orientation, "read EXIF orientation");
    Ok(orientation)
}
