//! Layout converters producing canonical packed RGB.
//!
//! Each function reads a caller raster with an arbitrary row stride and returns
//! exactly `width * height * 3` bytes. Geometry is not validated: a `pixels`
//! slice shorter than [`required_len`](super::required_len) panics on the
//! out-of-range row.

use super::raster::{canonical_len, RasterLayout};

/// Expand 8-bit grayscale to RGB by replicating each sample three times.
///
/// `stride` is the byte distance between rows; 0 means `width`.
///
/// # Panics
///
/// Panics if `pixels` does not cover every row described by the geometry.
pub fn gray_to_rgb(pixels: &[u8], width: usize, height: usize, stride: usize) -> Vec<u8> {
    let stride = RasterLayout::Gray.effective_stride(width, stride);
    let mut rgb = Vec::with_capacity(canonical_len(width, height));

    for y in 0..height {
        let start = y * stride;
        for &v in &pixels[start..start + width] {
            rgb.extend_from_slice(&[v, v, v]);
        }
    }

    rgb
}

/// Copy packed RGB, removing any padding between rows.
///
/// With `stride == 0` the input is already canonical and is copied in one go.
///
/// # Panics
///
/// Panics if `pixels` does not cover every row described by the geometry.
pub fn rgb_to_rgb(pixels: &[u8], width: usize, height: usize, stride: usize) -> Vec<u8> {
    let len = canonical_len(width, height);
    if stride == 0 {
        return pixels[..len].to_vec();
    }

    let row_len = width * 3;
    let mut rgb = Vec::with_capacity(len);
    for y in 0..height {
        let start = y * stride;
        rgb.extend_from_slice(&pixels[start..start + row_len]);
    }

    rgb
}

/// Copy R, G and B out of packed RGBA, discarding alpha.
///
/// `stride` is the byte distance between rows; 0 means `width * 4`.
///
/// # Panics
///
/// Panics if `pixels` does not cover every row described by the geometry.
pub fn rgba_to_rgb(pixels: &[u8], width: usize, height: usize, stride: usize) -> Vec<u8> {
    let stride = RasterLayout::Rgba.effective_stride(width, stride);
    let row_len = width * 4;
    let mut rgb = Vec::with_capacity(canonical_len(width, height));

    for y in 0..height {
        let start = y * stride;
        for px in pixels[start..start + row_len].chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
    }

    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_2x2_packed() {
        let rgb = gray_to_rgb(&[10, 20, 30, 40], 2, 2, 0);
        assert_eq!(rgb, vec![10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40]);
    }

    #[test]
    fn test_gray_with_stride_skips_padding() {
        // 2x2, stride 4: two padding bytes per row
        let pixels = [1, 2, 99, 99, 3, 4, 99, 99];
        let rgb = gray_to_rgb(&pixels, 2, 2, 4);
        assert_eq!(rgb, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_rgb_packed_is_plain_copy() {
        let pixels: Vec<u8> = (0..18).collect();
        assert_eq!(rgb_to_rgb(&pixels, 3, 2, 0), pixels);
    }

    #[test]
    fn test_rgb_with_stride_drops_padding() {
        // 2x2 RGB, stride 8: two padding bytes after each 6-byte row
        let pixels = [
            1, 2, 3, 4, 5, 6, 0xEE, 0xEE, //
            7, 8, 9, 10, 11, 12, 0xEE, 0xEE,
        ];
        let rgb = rgb_to_rgb(&pixels, 2, 2, 8);
        assert_eq!(rgb, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_rgb_stride_equal_to_row_matches_packed() {
        let pixels: Vec<u8> = (0..24).collect();
        assert_eq!(rgb_to_rgb(&pixels, 4, 2, 12), rgb_to_rgb(&pixels, 4, 2, 0));
    }

    #[test]
    fn test_rgba_1x2_drops_alpha() {
        let rgb = rgba_to_rgb(&[1, 2, 3, 255, 4, 5, 6, 128], 1, 2, 0);
        assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rgba_with_stride() {
        // 1x2 RGBA, stride 6
        let pixels = [1, 2, 3, 0, 0xEE, 0xEE, 4, 5, 6, 0];
        let rgb = rgba_to_rgb(&pixels, 1, 2, 6);
        assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_last_row_padding_not_required() {
        // Final row ends exactly at the last pixel byte
        let pixels = [1, 2, 3, 0xEE, 4, 5, 6];
        let rgb = rgb_to_rgb(&pixels, 1, 2, 4);
        assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_zero_dimensions_produce_empty() {
        assert!(gray_to_rgb(&[], 0, 5, 0).is_empty());
        assert!(rgb_to_rgb(&[], 5, 0, 0).is_empty());
        assert!(rgba_to_rgb(&[], 0, 0, 0).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_short_input_panics() {
        gray_to_rgb(&[1, 2, 3], 2, 2, 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
