//! Guetzli Core - perceptual JPEG encode bridge
//!
//! This crate normalizes caller rasters into canonical RGB, derives a
//! butteraugli target from a quality value, runs the perceptual encoder and
//! returns the stream in an owned [`EncodedBuffer`]. The C and WASM binding
//! crates are thin layers over it.
//!
//! # Module Structure
//!
//! - `buffer` - The owned output buffer handed to callers
//! - `normalize` - Gray / RGB / RGBA to canonical RGB conversion
//! - `processor` - Encoder call contract and the default butteraugli search
//! - `encode` - Bridge entry points and the validated `image`-based API

pub mod buffer;
pub mod encode;
pub mod normalize;
pub mod processor;

pub use buffer::EncodedBuffer;
pub use encode::{
    encode_gray, encode_image, encode_rgb, encode_rgba, encode_to_writer, EncodeError,
    EncodeOptions,
};
pub use normalize::{Raster, RasterLayout};
pub use processor::{ButteraugliSearch, Params, ProcessStats, Processor};
