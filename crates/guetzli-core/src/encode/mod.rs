//! Encode bridge and high-level encode API.
//!
//! This module provides:
//! - The bridge entry points ([`encode_gray`], [`encode_rgb`], [`encode_rgba`])
//!   used by the C and WASM bindings: normalize the raster, derive encoder
//!   parameters from quality, run the processor, return an [`EncodedBuffer`]
//!   or `None`
//! - A validated API for Rust callers working with `image` buffers
//!   ([`encode_image`], [`encode_to_writer`], ...)
//!
//! # Architecture
//!
//! All operations are synchronous. The canonical RGB buffer lives only for the
//! duration of one call; the returned buffer is owned by the caller. No state
//! is shared between calls, so independent threads may encode concurrently.
//!
//! # Examples
//!
//! ```ignore
//! use guetzli_core::encode::encode_rgba;
//!
//! let pixels = vec![128u8; 64 * 64 * 4];
//! if let Some(jpeg) = encode_rgba(&pixels, 64, 64, 0, 95.0) {
//!     println!("Encoded {} bytes", jpeg.len());
//! }
//! ```
//!
//! [`EncodedBuffer`]: crate::EncodedBuffer

mod bridge;
mod options;

pub use bridge::{
    encode_canonical, encode_gray, encode_gray_with, encode_raster, encode_raster_with,
    encode_rgb, encode_rgb_with, encode_rgba, encode_rgba_with,
};
pub use options::{
    encode_gray_image, encode_image, encode_rgb_image, encode_rgba_image, encode_to_writer,
    EncodeError, EncodeOptions, DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY,
};
