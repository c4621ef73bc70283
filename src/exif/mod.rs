//! EXIF metadata handling
//!
//! Phone cameras store pixels in sensor order and record the display
//! rotation in the EXIF Orientation tag. Face anchors assume an upright
//! face, so the rotation is applied right after decoding.

pub mod orientation;

pub use orientation::{read_orientation, Orientation};
