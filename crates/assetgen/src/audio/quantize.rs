/// Casts a sample to `u16` by truncating toward zero and keeping the low
/// 16 bits. Out-of-range values wrap instead of clamping: `-1.7` becomes
/// `65535` and `65536.9` becomes `0`. NaN becomes `0`.
///
/// Resampling ringing can push a sample below zero, which then shows up in
/// the buffer as a value near 65535.
#[inline]
pub fn to_u16_wrapping(value: f64) -> u16 {
    (value.trunc() as i64) as u16
}

/// Keeps at most `max_len` leading samples and casts them to `u16`.
pub fn quantize(samples: &[f64], max_len: usize) -> Vec<u16> {
    samples
        .iter()
        .take(max_len)
        .map(|&s| to_u16_wrapping(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(to_u16_wrapping(123.9), 123);
        assert_eq!(to_u16_wrapping(0.999), 0);
        assert_eq!(to_u16_wrapping(-0.5), 0);
        assert_eq!(to_u16_wrapping(65535.99), 65535);
    }

    #[test]
    fn test_wraps_without_clamping() {
        assert_eq!(to_u16_wrapping(-1.7), 65535);
        assert_eq!(to_u16_wrapping(-300.0), 65236);
        assert_eq!(to_u16_wrapping(65536.9), 0);
        assert_eq!(to_u16_wrapping(65537.0), 1);
    }

    #[test]
    fn test_nan() {
        assert_eq!(to_u16_wrapping(f64::NAN), 0);
    }

    #[test]
    fn test_quantize_limits_length() {
        let samples: Vec<f64> = (0..70_000).map(|i| i as f64).collect();
        let out = quantize(&samples, 65535);
        assert_eq!(out.len(), 65535);
        assert_eq!(out[65534], 65534);

        let out = quantize(&samples[..10], 65535);
        assert_eq!(out, (0..10).collect::<Vec<u16>>());
    }
}
