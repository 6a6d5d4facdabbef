//! WASM-compatible wrapper types.
//!
//! This module provides the JavaScript-facing buffer handle and the mapping
//! from numeric layout tags to the core raster layouts.

use guetzli_core::{EncodedBuffer, RasterLayout};
use wasm_bindgen::prelude::*;

/// An encoded byte buffer owned by JavaScript.
///
/// # Memory Management
///
/// The bytes live in WASM memory. `data()` copies them into a fresh
/// `Uint8Array`; `view()` returns a zero-copy view that is invalidated by the
/// next `resize()` or `free()` (or by any WASM memory growth).
///
/// Call `free()` once the buffer is no longer needed. wasm-bindgen's finalizer
/// reclaims forgotten buffers eventually, but large JPEGs should be released
/// explicitly.
#[wasm_bindgen]
pub struct JsEncodedBuffer {
    inner: EncodedBuffer,
}

#[wasm_bindgen]
impl JsEncodedBuffer {
    /// Create a buffer holding `size` zeroed bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize) -> JsEncodedBuffer {
        JsEncodedBuffer {
            inner: EncodedBuffer::new(size),
        }
    }

    /// Grow or shrink to exactly `size` bytes, keeping the common prefix.
    pub fn resize(&mut self, size: usize) {
        self.inner.resize(size);
    }

    /// Get the number of bytes in the buffer
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    /// Returns the bytes as a Uint8Array copy.
    pub fn data(&self) -> Vec<u8> {
        self.inner.as_slice().to_vec()
    }

    /// Zero-copy view into WASM memory.
    ///
    /// Writes through the view land in the buffer. The view must not be used
    /// after `resize()`, `free()` or any allocation that grows WASM memory.
    pub fn view(&mut self) -> js_sys::Uint8Array {
        // SAFETY: the view is handed to JS with the lifetime caveats above.
        let len = self.inner.len();
        unsafe { js_sys::Uint8Array::view_mut_raw(self.inner.as_mut_slice().as_mut_ptr(), len) }
    }

    /// Copy `bytes` into the buffer starting at `offset`.
    ///
    /// Returns false, leaving the buffer untouched, if the write would run past
    /// the end.
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> bool {
        let Some(end) = offset.checked_add(bytes.len()) else {
            return false;
        };
        match self.inner.as_mut_slice().get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsEncodedBuffer {
    pub(crate) fn from_buffer(inner: EncodedBuffer) -> Self {
        Self { inner }
    }
}

/// Convert a u8 layout tag to the core RasterLayout.
///
/// Values:
/// - 0 = Gray (1 byte per pixel)
/// - 1 = RGB (3 bytes per pixel)
/// - 2 = RGBA (4 bytes per pixel, alpha ignored)
///
/// Any other value is rejected.
pub(crate) fn layout_from_u8(value: u8) -> Option<RasterLayout> {
    match value {
        0 => Some(RasterLayout::Gray),
        1 => Some(RasterLayout::Rgb),
        2 => Some(RasterLayout::Rgba),
        _ => None,
    }
}
