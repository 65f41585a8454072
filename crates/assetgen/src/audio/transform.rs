/// Peak-to-peak span of the transformed signal, in timer ticks.
pub const SCALE: f64 = 1500.0;
/// DC level the transformed signal is centered on.
pub const OFFSET: f64 = 450.0;

const HALF_RANGE: i64 = 1 << 15;
const FULL_RANGE: f64 = (1u32 << 16) as f64;

/// Maps a raw signed 16-bit sample to the transducer's duty-cycle domain:
/// `1500 * ((s + 2^15) / 2^16 - 0.5) + 450`.
/// Evaluated in this exact order, algebraically equivalent forms round
/// differently.
#[inline]
pub fn scale_offset(sample: i32) -> f64 {
    let shifted = (sample as i64 + HALF_RANGE) as f64;
    SCALE * (shifted / FULL_RANGE - 0.5) + OFFSET
}

pub fn transform_samples(samples: &[i32]) -> Vec<f64> {
    samples.iter().map(|&s| scale_offset(s)).collect()
}
