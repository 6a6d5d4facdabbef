//! Perceptual JPEG encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_gray`], [`encode_rgb`], [`encode_rgba`] - Raw bridge: any
//!   quality, `undefined` on failure
//! - [`encode_with_options`] - Validated quality and layout, throws on failure
//!
//! # Example
//!
//! ```typescript
//! import { encode_rgba, encode_with_options } from '@guetzli/wasm';
//!
//! // ImageData from a canvas, tightly packed
//! const jpeg = encode_rgba(imageData.data, imageData.width, imageData.height, 0, 95);
//!
//! // Gray pixels with a 1024-byte stride and validated options
//! const bytes = encode_with_options(gray, 1000, 800, 1024, 0, { quality: 90 });
//! ```

use crate::types::{layout_from_u8, JsEncodedBuffer};
use guetzli_core::encode::encode_raster;
use guetzli_core::normalize::{required_len, Raster, RasterLayout};
use guetzli_core::EncodeOptions;
use wasm_bindgen::prelude::*;

/// Encode 8-bit grayscale pixels.
///
/// # Arguments
///
/// * `pixels` - Gray samples as a `Uint8Array`
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `stride` - Bytes between row starts (0 = `width`)
/// * `quality` - Quality value mapped to a butteraugli target (70-110 useful)
///
/// # Returns
///
/// A `JsEncodedBuffer` holding the JPEG, or `undefined` if encoding fails or
/// `pixels` is too short for the geometry.
#[wasm_bindgen]
pub fn encode_gray(
    pixels: &[u8],
    width: u32,
    height: u32,
    stride: u32,
    quality: f32,
) -> Option<JsEncodedBuffer> {
    encode_layout(RasterLayout::Gray, pixels, width, height, stride, quality)
}

/// Encode packed RGB pixels (3 bytes per pixel). `stride` 0 = `width * 3`.
#[wasm_bindgen]
pub fn encode_rgb(
    pixels: &[u8],
    width: u32,
    height: u32,
    stride: u32,
    quality: f32,
) -> Option<JsEncodedBuffer> {
    encode_layout(RasterLayout::Rgb, pixels, width, height, stride, quality)
}

/// Encode packed RGBA pixels (4 bytes per pixel, alpha ignored).
/// `stride` 0 = `width * 4`.
#[wasm_bindgen]
pub fn encode_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    stride: u32,
    quality: f32,
) -> Option<JsEncodedBuffer> {
    encode_layout(RasterLayout::Rgba, pixels, width, height, stride, quality)
}

/// Encode with validated options.
///
/// # Arguments
///
/// * `layout` - 0 = gray, 1 = RGB, 2 = RGBA
/// * `options` - `{ quality?: number }` or `undefined` for defaults
///   (quality must be within 84-110)
///
/// # Errors
///
/// Throws if the options are malformed or out of range, the layout tag is
/// unknown, `pixels` is too short, or encoding fails.
#[wasm_bindgen]
pub fn encode_with_options(
    pixels: &[u8],
    width: u32,
    height: u32,
    stride: u32,
    layout: u8,
    options: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let options = if options.is_undefined() || options.is_null() {
        EncodeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
    };

    encode_checked(pixels, width, height, stride, layout, &options).map_err(|e| JsValue::from_str(&e))
}

fn raster(
    layout: RasterLayout,
    pixels: &[u8],
    width: u32,
    height: u32,
    stride: u32,
) -> Option<Raster<'_>> {
    let (w, h, s) = (width as usize, height as usize, stride as usize);
    match required_len(layout, w, h, s) {
        Some(needed) if pixels.len() >= needed => Some(Raster::new(pixels, w, h, s, layout)),
        _ => None,
    }
}

fn encode_layout(
    layout: RasterLayout,
    pixels: &[u8],
    width: u32,
    height: u32,
    stride: u32,
    quality: f32,
) -> Option<JsEncodedBuffer> {
    let raster = raster(layout, pixels, width, height, stride)?;
    encode_raster(&raster, quality).map(JsEncodedBuffer::from_buffer)
}

fn encode_checked(
    pixels: &[u8],
    width: u32,
    height: u32,
    stride: u32,
    layout: u8,
    options: &EncodeOptions,
) -> Result<Vec<u8>, String> {
    options.validate().map_err(|e| e.to_string())?;
    let layout = layout_from_u8(layout).ok_or_else(|| format!("Unknown pixel layout: {}", layout))?;
    let raster = raster(layout, pixels, width, height, stride).ok_or_else(|| {
        format!(
            "Pixel data does not cover {}x{} {:?} with stride {} ({} bytes)",
            width,
            height,
            layout,
            stride,
            pixels.len()
        )
    })?;

    encode_raster(&raster, options.quality)
        .map(|buffer| buffer.into_vec())
        .ok_or_else(|| "Perceptual JPEG encoding failed".to_string())
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_with_default_options() {
        let pixels = vec![128u8; 16 * 16 * 4];
        let jpeg = encode_with_options(&pixels, 16, 16, 0, 2, JsValue::UNDEFINED).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_with_options_object() {
        let pixels = vec![128u8; 16 * 16 * 3];
        let options = serde_wasm_bindgen::to_value(&EncodeOptions::new(95.0)).unwrap();
        assert!(encode_with_options(&pixels, 16, 16, 0, 1, options).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_encode_with_invalid_quality() {
        let pixels = vec![128u8; 16 * 16 * 3];
        let options = serde_wasm_bindgen::to_value(&EncodeOptions::new(10.0)).unwrap();
        assert!(encode_with_options(&pixels, 16, 16, 0, 1, options).is_err());
    }

    #[wasm_bindgen_test]
    fn test_view_writes_through() {
        let mut buf = JsEncodedBuffer::new(3);
        buf.view().set_index(1, 42);
        assert_eq!(buf.data(), vec![0, 42, 0]);
    }
}
