//! Call contract for the perceptual JPEG encoder.
//!
//! The encode bridge talks to the encoder only through [`Processor`]: it hands
//! over [`Params`] (carrying the butteraugli target derived from a quality
//! value), a fresh [`ProcessStats`] sink, the canonical RGB pixels and the
//! image size, and gets back a success flag plus the bytes written to `out`.
//!
//! [`ButteraugliSearch`] is the default implementation. It searches baseline
//! JPEG quality levels for the smallest stream whose butteraugli distance to
//! the source stays within the target.

mod quality;
mod search;

pub use quality::{
    butteraugli_score_for_quality, jpeg_quality_for_score, HIGHEST_QUALITY, LOWEST_QUALITY,
};
pub use search::ButteraugliSearch;

/// Encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Maximum acceptable butteraugli distance between source and output.
    pub butteraugli_target: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            butteraugli_target: butteraugli_score_for_quality(95.0),
        }
    }
}

impl Params {
    /// Parameters targeting the score that corresponds to `quality`.
    pub fn for_quality(quality: f32) -> Self {
        Self {
            butteraugli_target: butteraugli_score_for_quality(quality),
        }
    }
}

/// One candidate stream tried by the encoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStep {
    pub jpeg_quality: u8,
    pub size: usize,
    /// Butteraugli distance, `None` when the image is too small to measure.
    pub score: Option<f64>,
}

/// Bookkeeping collected by the encoder during one call.
#[derive(Debug, Clone, Default)]
pub struct ProcessStats {
    pub steps: Vec<SearchStep>,
    /// Number of JPEG encodes performed.
    pub encodes: usize,
}

impl ProcessStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, step: SearchStep) {
        log::debug!(
            "jpeg quality {} -> {} bytes, butteraugli {:?}",
            step.jpeg_quality,
            step.size,
            step.score
        );
        self.steps.push(step);
    }
}

/// A perceptual encoder turning canonical RGB into a compressed stream.
///
/// `rgb` holds exactly `width * height * 3` bytes in row-major R, G, B order.
/// On success the stream is written to `out` and `true` is returned; on
/// failure the contents of `out` are unspecified and `false` is returned.
pub trait Processor: Send + Sync {
    fn process(
        &self,
        params: &Params,
        stats: &mut ProcessStats,
        rgb: &[u8],
        width: usize,
        height: usize,
        out: &mut Vec<u8>,
    ) -> bool;
}
