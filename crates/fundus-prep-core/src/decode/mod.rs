//! Image decoding for the cropping and augmentation stages.
//!
//! Every supported container is decoded to an 8-bit RGB [`DecodedImage`].
//! The cropping stage applies the EXIF orientation tag so boundaries are
//! found on the upright image; the augmentation stage keeps stored pixel
//! order so derivatives line up with the verbatim copy next to them.

mod file;
mod types;

pub use file::{decode_bytes, decode_file, read_orientation};
pub use types::{DecodeError, DecodedImage, Orientation, OrientationPolicy};

#[cfg(test)]
pub(crate) use file::jpeg_with_orientation;
