//! Bridge from caller rasters to the perceptual encoder.
//!
//! Quality passes through [`Params::for_quality`] and nowhere else. The
//! processor reports a single success flag and that is all the caller sees:
//! either a complete [`EncodedBuffer`] or `None`.

use crate::buffer::EncodedBuffer;
use crate::normalize::{gray_to_rgb, rgb_to_rgb, rgba_to_rgb, Raster};
use crate::processor::{ButteraugliSearch, Params, ProcessStats, Processor};

/// Encode canonical RGB (`width * height * 3` bytes, no stride).
///
/// Returns `None` when the processor reports failure; quality never changes
/// that outcome by itself.
pub fn encode_canonical<P: Processor + ?Sized>(
    processor: &P,
    rgb: &[u8],
    width: usize,
    height: usize,
    quality: f32,
) -> Option<EncodedBuffer> {
    let params = Params::for_quality(quality);
    let mut stats = ProcessStats::new();
    log::debug!(
        "encoding {width}x{height} at quality {quality} (butteraugli target {})",
        params.butteraugli_target
    );

    let mut buffer = EncodedBuffer::new(0);
    if !processor.process(&params, &mut stats, rgb, width, height, buffer.as_mut_vec()) {
        log::debug!("encoder rejected {width}x{height} image");
        return None;
    }

    log::debug!(
        "encoded {} bytes after {} encoder passes",
        buffer.len(),
        stats.encodes
    );
    Some(buffer)
}

/// Encode any described raster with the given processor.
pub fn encode_raster_with<P: Processor + ?Sized>(
    processor: &P,
    raster: &Raster<'_>,
    quality: f32,
) -> Option<EncodedBuffer> {
    let rgb = raster.to_canonical();
    encode_canonical(processor, &rgb, raster.width, raster.height, quality)
}

/// Encode any described raster with the default processor.
pub fn encode_raster(raster: &Raster<'_>, quality: f32) -> Option<EncodedBuffer> {
    encode_raster_with(&ButteraugliSearch::default(), raster, quality)
}

/// Encode 8-bit grayscale with the given processor. `stride` 0 means `width`.
///
/// # Panics
///
/// Panics if `pixels` is too short for the geometry.
pub fn encode_gray_with<P: Processor + ?Sized>(
    processor: &P,
    pixels: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    quality: f32,
) -> Option<EncodedBuffer> {
    let rgb = gray_to_rgb(pixels, width, height, stride);
    encode_canonical(processor, &rgb, width, height, quality)
}

/// Encode packed RGB with the given processor. `stride` 0 means `width * 3`.
///
/// # Panics
///
/// Panics if `pixels` is too short for the geometry.
pub fn encode_rgb_with<P: Processor + ?Sized>(
    processor: &P,
    pixels: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    quality: f32,
) -> Option<EncodedBuffer> {
    let rgb = rgb_to_rgb(pixels, width, height, stride);
    encode_canonical(processor, &rgb, width, height, quality)
}

/// Encode packed RGBA with the given processor, ignoring alpha.
/// `stride` 0 means `width * 4`.
///
/// # Panics
///
/// Panics if `pixels` is too short for the geometry.
pub fn encode_rgba_with<P: Processor + ?Sized>(
    processor: &P,
    pixels: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    quality: f32,
) -> Option<EncodedBuffer> {
    let rgb = rgba_to_rgb(pixels, width, height, stride);
    encode_canonical(processor, &rgb, width, height, quality)
}

/// Encode 8-bit grayscale with the default processor.
pub fn encode_gray(
    pixels: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    quality: f32,
) -> Option<EncodedBuffer> {
    encode_gray_with(&ButteraugliSearch::default(), pixels, width, height, stride, quality)
}

/// Encode packed RGB with the default processor.
pub fn encode_rgb(
    pixels: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    quality: f32,
) -> Option<EncodedBuffer> {
    encode_rgb_with(&ButteraugliSearch::default(), pixels, width, height, stride, quality)
}

/// Encode packed RGBA with the default processor.
pub fn encode_rgba(
    pixels: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    quality: f32,
) -> Option<EncodedBuffer> {
    encode_rgba_with(&ButteraugliSearch::default(), pixels, width, height, stride, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RasterLayout;
    use std::sync::Mutex;

    /// Records what the bridge hands to the encoder and returns a canned result.
    struct Recording {
        succeed: bool,
        output: Vec<u8>,
        seen: Mutex<Vec<(Params, Vec<u8>, usize, usize)>>,
    }

    impl Recording {
        fn new(succeed: bool, output: &[u8]) -> Self {
            Self {
                succeed,
                output: output.to_vec(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Params, Vec<u8>, usize, usize)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Processor for Recording {
        fn process(
            &self,
            params: &Params,
            stats: &mut ProcessStats,
            rgb: &[u8],
            width: usize,
            height: usize,
            out: &mut Vec<u8>,
        ) -> bool {
            assert!(stats.steps.is_empty(), "stats sink must start empty");
            self.seen
                .lock()
                .unwrap()
                .push((*params, rgb.to_vec(), width, height));
            out.extend_from_slice(&self.output);
            self.succeed
        }
    }

    #[test]
    fn test_success_wraps_stream() {
        let proc = Recording::new(true, &[0xFF, 0xD8, 0xFF, 0xD9]);
        let out = encode_canonical(&proc, &[1, 2, 3], 1, 1, 90.0).unwrap();
        assert_eq!(out.as_slice(), &[0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[test]
    fn test_failure_returns_none_even_with_partial_output() {
        let proc = Recording::new(false, &[0xFF, 0xD8]);
        assert!(encode_canonical(&proc, &[1, 2, 3], 1, 1, 90.0).is_none());
    }

    #[test]
    fn test_empty_stream_on_success_is_still_some() {
        let proc = Recording::new(true, &[]);
        let out = encode_canonical(&proc, &[1, 2, 3], 1, 1, 90.0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_quality_goes_through_mapping() {
        let proc = Recording::new(true, &[0]);
        encode_canonical(&proc, &[0, 0, 0], 1, 1, 92.5).unwrap();
        let (params, _, _, _) = proc.calls()[0];
        assert_eq!(params, Params::for_quality(92.5));
    }

    #[test]
    fn test_quality_never_changes_outcome() {
        for succeed in [true, false] {
            let proc = Recording::new(succeed, &[1]);
            let low = encode_canonical(&proc, &[0, 0, 0], 1, 1, 1.0);
            let high = encode_canonical(&proc, &[0, 0, 0], 1, 1, 100.0);
            assert_eq!(low.is_some(), succeed);
            assert_eq!(high.is_some(), succeed);
        }
    }

    #[test]
    fn test_gray_entry_point_normalizes() {
        let proc = Recording::new(true, &[0]);
        encode_gray_with(&proc, &[10, 20, 30, 40], 2, 2, 0, 90.0).unwrap();
        let (_, rgb, w, h) = proc.calls()[0].clone();
        assert_eq!((w, h), (2, 2));
        assert_eq!(rgb, vec![10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40]);
    }

    #[test]
    fn test_rgb_entry_point_strips_stride() {
        let proc = Recording::new(true, &[0]);
        let pixels = [1, 2, 3, 0, 4, 5, 6, 0];
        encode_rgb_with(&proc, &pixels, 1, 2, 4, 90.0).unwrap();
        assert_eq!(proc.calls()[0].1, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rgba_entry_point_drops_alpha() {
        let proc = Recording::new(true, &[0]);
        encode_rgba_with(&proc, &[1, 2, 3, 255, 4, 5, 6, 128], 1, 2, 0, 90.0).unwrap();
        assert_eq!(proc.calls()[0].1, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_raster_entry_point() {
        let proc = Recording::new(true, &[7]);
        let pixels = [9u8; 6];
        let raster = Raster::new(&pixels, 2, 1, 0, RasterLayout::Rgb);
        let out = encode_raster_with(&proc, &raster, 95.0).unwrap();
        assert_eq!(out.as_slice(), &[7]);
        assert_eq!(proc.calls()[0].1, pixels.to_vec());
    }

    #[test]
    fn test_default_processor_produces_jpeg() {
        let pixels: Vec<u8> = (0..16 * 16 * 4).map(|i| (i % 251) as u8).collect();
        let out = encode_rgba(&pixels, 16, 16, 0, 95.0).unwrap();
        assert_eq!(&out.as_slice()[..2], &[0xFF, 0xD8]);

        let raster = Raster::new(&pixels, 16, 16, 0, RasterLayout::Rgba);
        assert_eq!(encode_raster(&raster, 95.0), Some(out));
    }

    #[test]
    fn test_default_processor_gray_and_rgb() {
        let gray: Vec<u8> = (0..10 * 10).map(|i| (i * 3 % 256) as u8).collect();
        assert!(encode_gray(&gray, 10, 10, 0, 90.0).is_some());

        let rgb: Vec<u8> = (0..10 * 12 * 3).map(|i| (i % 256) as u8).collect();
        // 10x10 image stored with a 36-byte stride
        assert!(encode_rgb(&rgb, 10, 10, 36, 90.0).is_some());
    }

    #[test]
    fn test_default_processor_failure_is_none() {
        assert!(encode_rgb(&[], 0, 0, 0, 90.0).is_none());
    }

    #[test]
    fn test_shared_processor_across_threads() {
        let search = ButteraugliSearch::new();
        let inputs: Vec<Vec<u8>> = (0..4u32)
            .map(|seed| {
                (0..12 * 12 * 3u32)
                    .map(|i| ((i * (7 + seed * 6) + seed * 40) % 256) as u8)
                    .collect()
            })
            .collect();
        let expected: Vec<_> = inputs
            .iter()
            .map(|rgb| encode_rgb_with(&search, rgb, 12, 12, 0, 95.0).unwrap())
            .collect();

        let shared = &search;
        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|rgb| scope.spawn(move || encode_rgb_with(shared, rgb, 12, 12, 0, 95.0)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (got, want) in results.into_iter().zip(expected) {
            assert_eq!(got, Some(want));
        }
    }
}
