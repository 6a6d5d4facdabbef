//! Mapping from human-facing quality to a butteraugli target.

/// Lowest quality with a tabulated score; lower values clamp here.
pub const LOWEST_QUALITY: f32 = 70.0;
/// Highest quality with a tabulated score; higher values clamp here.
pub const HIGHEST_QUALITY: f32 = 110.0;

// Median butteraugli scores of libjpeg output at qualities 70..=110. Entries
// past 100 decrease linearly so that 110 lands at 90% of the score for 100.
const SCORE_FOR_QUALITY: [f32; 41] = [
    2.810761, // 70
    2.729300, 2.689687, 2.636811, 2.564863, 2.476562, // 75
    2.409495, 2.320038, 2.195178, 2.118619, 2.071655, // 80
    2.001461, 1.902920, 1.850844, 1.805808, 1.756978, // 85
    1.718066, 1.662700, 1.611318, 1.555082, 1.492303, // 90
    1.420858, 1.333020, 1.259906, 1.172183, 1.085366, // 95
    0.997837, 0.903838, 0.822451, 0.729218, 0.627181, // 100
    0.621163, 0.615145, 0.609127, 0.603109, 0.597091, // 105
    0.591073, 0.585055, 0.579037, 0.573019, 0.567001, // 110
];

/// Butteraugli target for `quality`.
///
/// Quality is clamped to `[LOWEST_QUALITY, HIGHEST_QUALITY]` and linearly
/// interpolated between whole-number entries. Higher quality always yields a
/// lower (stricter) target. NaN is treated as the lowest quality.
pub fn butteraugli_score_for_quality(quality: f32) -> f32 {
    let quality = if quality.is_nan() {
        LOWEST_QUALITY
    } else {
        quality.clamp(LOWEST_QUALITY, HIGHEST_QUALITY)
    };

    let offset = quality - LOWEST_QUALITY;
    let index = offset.floor() as usize;
    if index + 1 >= SCORE_FOR_QUALITY.len() {
        return SCORE_FOR_QUALITY[SCORE_FOR_QUALITY.len() - 1];
    }

    let mix = offset - index as f32;
    let (lo, hi) = (SCORE_FOR_QUALITY[index], SCORE_FOR_QUALITY[index + 1]);
    lo + (hi - lo) * mix
}

/// Lowest libjpeg quality (70..=100) whose tabulated score meets `target`.
///
/// Targets looser than the quality-70 score return 70; targets stricter than
/// the quality-100 score return 100.
pub fn jpeg_quality_for_score(target: f32) -> u8 {
    SCORE_FOR_QUALITY[..=30]
        .iter()
        .position(|&score| score <= target)
        .map_or(100, |i| 70 + i as u8)
}
