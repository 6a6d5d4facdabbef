//! Validated encoding for `image` crate buffers.
//!
//! The bridge entry points accept any quality; this layer restricts it to the
//! range where the perceptual search pays off and reports failures as
//! [`EncodeError`].

use std::io::Write;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bridge::{encode_gray, encode_rgb, encode_rgba};

/// Lowest accepted quality. Below this a plain JPEG encoder does as well.
pub const MIN_QUALITY: f32 = 84.0;
/// Highest accepted quality.
pub const MAX_QUALITY: f32 = 110.0;
pub const DEFAULT_QUALITY: f32 = 84.0;

/// Errors that can occur during validated encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Quality outside `MIN_QUALITY..=MAX_QUALITY`
    #[error("Invalid quality {0}: must be between 84 and 110")]
    InvalidQuality(f32),

    /// The encoder reported failure
    #[error("Perceptual JPEG encoding failed")]
    EncodeFailed,

    /// Writing the encoded stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Target quality (84 to 110)
    pub quality: f32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

impl EncodeOptions {
    pub fn new(quality: f32) -> Self {
        Self { quality }
    }

    /// Check that the quality is inside the accepted range.
    pub fn validate(&self) -> Result<(), EncodeError> {
        check_quality(self.quality)
    }
}

fn check_quality(quality: f32) -> Result<(), EncodeError> {
    if (MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        Ok(())
    } else {
        Err(EncodeError::InvalidQuality(quality))
    }
}

/// Encode a grayscale image.
pub fn encode_gray_image(image: &GrayImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    check_quality(quality)?;
    let (w, h) = (image.width() as usize, image.height() as usize);
    encode_gray(image.as_raw(), w, h, 0, quality)
        .map(|b| b.into_vec())
        .ok_or(EncodeError::EncodeFailed)
}

/// Encode an RGB image.
pub fn encode_rgb_image(image: &RgbImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    check_quality(quality)?;
    let (w, h) = (image.width() as usize, image.height() as usize);
    encode_rgb(image.as_raw(), w, h, 0, quality)
        .map(|b| b.into_vec())
        .ok_or(EncodeError::EncodeFailed)
}

/// Encode an RGBA image. Alpha is discarded, not composited.
pub fn encode_rgba_image(image: &RgbaImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    check_quality(quality)?;
    let (w, h) = (image.width() as usize, image.height() as usize);
    encode_rgba(image.as_raw(), w, h, 0, quality)
        .map(|b| b.into_vec())
        .ok_or(EncodeError::EncodeFailed)
}

/// Encode any decoded image.
///
/// 8-bit gray, RGB and RGBA buffers are encoded directly; every other pixel
/// format is converted to RGBA8 first.
pub fn encode_image(image: &DynamicImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    match image {
        DynamicImage::ImageLuma8(gray) => encode_gray_image(gray, quality),
        DynamicImage::ImageRgb8(rgb) => encode_rgb_image(rgb, quality),
        DynamicImage::ImageRgba8(rgba) => encode_rgba_image(rgba, quality),
        other => encode_rgba_image(&other.to_rgba8(), quality),
    }
}

/// Encode `image` and write the stream to `writer`.
///
/// `None` options mean [`EncodeOptions::default`].
pub fn encode_to_writer<W: Write>(
    writer: &mut W,
    image: &DynamicImage,
    options: Option<&EncodeOptions>,
) -> Result<(), EncodeError> {
    let options = options.copied().unwrap_or_default();
    options.validate()?;

    let jpeg = encode_image(image, options.quality)?;
    writer.write_all(&jpeg)?;
    Ok(())
}
