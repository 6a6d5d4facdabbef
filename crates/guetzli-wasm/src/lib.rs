//! Guetzli WASM - WebAssembly bindings for the perceptual JPEG encoder
//!
//! This crate exposes the guetzli-core encode bridge to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `types` - `JsEncodedBuffer`, the buffer handle returned to JavaScript
//! - `encode` - Encode bindings for gray, RGB and RGBA pixel data
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_rgba } from '@guetzli/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const { data, width, height } = ctx.getImageData(0, 0, w, h);
//! const jpeg = encode_rgba(data, width, height, 0, 95);
//! if (jpeg) {
//!   const bytes = jpeg.data();
//!   jpeg.free();
//! }
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod types;

pub use encode::{encode_gray, encode_rgb, encode_rgba, encode_with_options};
pub use types::JsEncodedBuffer;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
