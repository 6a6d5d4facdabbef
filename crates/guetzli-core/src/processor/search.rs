//! Butteraugli-guided JPEG quality search.
//!
//! Baseline JPEG is produced by the `image` crate's encoder. Each candidate is
//! decoded again and compared with the source using butteraugli; the smallest
//! candidate within the target distance wins.

use std::io::Cursor;

use butteraugli::{butteraugli, ButteraugliError, ButteraugliParams};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use imgref::{Img, ImgRef};
use rgb::RGB8;
use thiserror::Error;

use super::quality::jpeg_quality_for_score;
use super::{Params, ProcessStats, Processor, SearchStep};
use crate::normalize::canonical_len;

/// Smallest side butteraugli can measure.
const MIN_METRIC_SIDE: usize = 8;

const MIN_JPEG_QUALITY: u8 = 1;
const MAX_JPEG_QUALITY: u8 = 100;

#[derive(Debug, Error)]
enum SearchError {
    #[error("JPEG codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("butteraugli error: {0}")]
    Metric(#[from] ButteraugliError),
}

/// Default [`Processor`]: binary search over baseline JPEG quality.
#[derive(Debug, Clone, Default)]
pub struct ButteraugliSearch {
    metric: ButteraugliParams,
}

impl ButteraugliSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom butteraugli parameters (intensity target, asymmetry, ...).
    pub fn with_metric_params(metric: ButteraugliParams) -> Self {
        Self { metric }
    }

    fn search(
        &self,
        params: &Params,
        stats: &mut ProcessStats,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, SearchError> {
        let (w, h) = (width as usize, height as usize);

        if w < MIN_METRIC_SIDE || h < MIN_METRIC_SIDE {
            let quality = jpeg_quality_for_score(params.butteraugli_target);
            let jpeg = encode_jpeg(rgb, width, height, quality)?;
            stats.encodes += 1;
            stats.record(SearchStep {
                jpeg_quality: quality,
                size: jpeg.len(),
                score: None,
            });
            return Ok(jpeg);
        }

        let source = Img::new(to_rgb8(rgb), w, h);
        let target = f64::from(params.butteraugli_target);

        let mut best: Option<Vec<u8>> = None;
        let mut ceiling: Option<Vec<u8>> = None;
        let (mut lo, mut hi) = (MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);

        while lo <= hi {
            let quality = lo + (hi - lo) / 2;
            let jpeg = encode_jpeg(rgb, width, height, quality)?;
            stats.encodes += 1;
            let score = self.distance(source.as_ref(), &jpeg)?;
            stats.record(SearchStep {
                jpeg_quality: quality,
                size: jpeg.len(),
                score: Some(score),
            });

            if score <= target {
                if best.as_ref().map_or(true, |b| jpeg.len() < b.len()) {
                    best = Some(jpeg);
                }
                if quality == MIN_JPEG_QUALITY {
                    break;
                }
                hi = quality - 1;
            } else {
                if quality == MAX_JPEG_QUALITY {
                    ceiling = Some(jpeg);
                    break;
                }
                lo = quality + 1;
            }
        }

        match (best, ceiling) {
            (Some(jpeg), _) => Ok(jpeg),
            (None, Some(jpeg)) => {
                log::debug!("target {target} not reached, using quality {MAX_JPEG_QUALITY}");
                Ok(jpeg)
            }
            (None, None) => {
                let jpeg = encode_jpeg(rgb, width, height, MAX_JPEG_QUALITY)?;
                stats.encodes += 1;
                Ok(jpeg)
            }
        }
    }

    fn distance(&self, source: ImgRef<'_, RGB8>, jpeg: &[u8]) -> Result<f64, SearchError> {
        let decoded = image::load_from_memory_with_format(jpeg, ImageFormat::Jpeg)?.to_rgb8();
        let (w, h) = (decoded.width() as usize, decoded.height() as usize);
        let candidate = Img::new(to_rgb8(decoded.as_raw()), w, h);

        Ok(butteraugli(source, candidate.as_ref(), &self.metric)?.score)
    }
}

impl Processor for ButteraugliSearch {
    fn process(
        &self,
        params: &Params,
        stats: &mut ProcessStats,
        rgb: &[u8],
        width: usize,
        height: usize,
        out: &mut Vec<u8>,
    ) -> bool {
        if width == 0 || height == 0 {
            log::warn!("refusing to encode empty image {width}x{height}");
            return false;
        }

        let expected = canonical_len(width, height);
        if rgb.len() != expected {
            log::warn!(
                "pixel buffer holds {} bytes, expected {expected} for {width}x{height}",
                rgb.len()
            );
            return false;
        }

        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            log::warn!("image {width}x{height} exceeds JPEG dimension limits");
            return false;
        };

        match self.search(params, stats, rgb, w, h) {
            Ok(jpeg) => {
                *out = jpeg;
                true
            }
            Err(e) => {
                log::warn!("encode failed: {e}");
                false
            }
        }
    }
}

fn encode_jpeg(rgb: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, SearchError> {
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
        rgb,
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(buffer.into_inner())
}

fn to_rgb8(rgb: &[u8]) -> Vec<RGB8> {
    rgb.chunks_exact(3)
        .map(|c| RGB8::new(c[0], c[1], c[2]))
        .collect()
}
