//! Raster descriptors for caller-owned pixel memory.

use super::convert::{gray_to_rgb, rgb_to_rgb, rgba_to_rgb};

/// Pixel layout of a caller-supplied raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterLayout {
    /// One 8-bit luma sample per pixel.
    Gray,
    /// Packed R, G, B bytes.
    Rgb,
    /// Packed R, G, B, A bytes.
    Rgba,
}

impl RasterLayout {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            RasterLayout::Gray => 1,
            RasterLayout::Rgb => 3,
            RasterLayout::Rgba => 4,
        }
    }

    /// Row stride to use when the caller passes `stride`; 0 means packed.
    #[inline]
    pub fn effective_stride(self, width: usize, stride: usize) -> usize {
        if stride == 0 {
            width * self.channels()
        } else {
            stride
        }
    }
}

/// Length of the canonical RGB buffer for a `width` x `height` image.
#[inline]
pub fn canonical_len(width: usize, height: usize) -> usize {
    width * height * 3
}

/// Minimum number of bytes a raster must span to be read in full.
///
/// The last row only needs `width * channels` bytes, so trailing padding after
/// it is not required. Returns `None` when either the span or the canonical
/// RGB output for this geometry does not fit in `usize`.
pub fn required_len(
    layout: RasterLayout,
    width: usize,
    height: usize,
    stride: usize,
) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    width.checked_mul(height)?.checked_mul(3)?;

    let row = width.checked_mul(layout.channels())?;
    let stride = if stride == 0 { row } else { stride };
    (height - 1).checked_mul(stride)?.checked_add(row)
}

/// A borrowed view of caller pixel memory plus the geometry needed to read it.
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    pub pixels: &'a [u8],
    pub width: usize,
    pub height: usize,
    /// Row stride in bytes; 0 means `width * layout.channels()`.
    pub stride: usize,
    pub layout: RasterLayout,
}

impl<'a> Raster<'a> {
    pub fn new(
        pixels: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        layout: RasterLayout,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            stride,
            layout,
        }
    }

    #[inline]
    pub fn effective_stride(&self) -> usize {
        self.layout.effective_stride(self.width, self.stride)
    }

    /// Produce the canonical packed RGB buffer for this raster.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` is shorter than [`required_len`] for this geometry.
    pub fn to_canonical(&self) -> Vec<u8> {
        match self.layout {
            RasterLayout::Gray => gray_to_rgb(self.pixels, self.width, self.height, self.stride),
            RasterLayout::Rgb => rgb_to_rgb(self.pixels, self.width, self.height, self.stride),
            RasterLayout::Rgba => rgba_to_rgb(self.pixels, self.width, self.height, self.stride),
        }
    }
}
