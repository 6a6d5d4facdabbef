//! Pixel normalization for the encode bridge.
//!
//! This module converts caller-owned rasters into the canonical layout the
//! encoder consumes: tightly packed, row-major, 3 bytes (R, G, B) per pixel.
//!
//! - [`gray_to_rgb`] - replicate each gray sample into R, G and B
//! - [`rgb_to_rgb`] - drop row padding from packed RGB
//! - [`rgba_to_rgb`] - drop the alpha byte of every pixel
//!
//! Every converter takes a row stride in bytes, where 0 means "tightly packed".
//! The output never carries a stride, so nothing downstream needs to know which
//! layout the caller started from.
//!
//! # Examples
//!
//! ```ignore
//! use guetzli_core::normalize::gray_to_rgb;
//!
//! let rgb = gray_to_rgb(&[10, 20, 30, 40], 2, 2, 0);
//! assert_eq!(rgb, vec![10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40]);
//! ```

mod convert;
mod raster;

pub use convert::{gray_to_rgb, rgb_to_rgb, rgba_to_rgb};
pub use raster::{canonical_len, required_len, Raster, RasterLayout};
