//! Band-limited resampling in the frequency domain.
//!
//! The signal is treated as one period of a periodic sequence: it is moved
//! into the frequency domain, its spectrum is truncated (downsampling) or
//! zero-padded (upsampling) to the new length, and it is transformed back.
//! Nothing is done about the discontinuity between the last and the first
//! sample, so ringing near the edges is expected.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::collections::TryReserveError;

/// Number of samples `source_len` samples at `source_rate` occupy at
/// `target_rate`, rounded half to even.
///
/// # Panics
/// Panics if `source_rate` is zero.
pub fn target_length(source_len: usize, source_rate: u32, target_rate: u32) -> usize {
    assert!(source_rate > 0, "Source sample rate must be positive");
    let ratio = target_rate as f64 / source_rate as f64;
    (source_len as f64 * ratio).round_ties_even() as usize
}

/// Resamples `input` to exactly `num` samples.
///
/// Empty input or `num == 0` gives an empty output. When `num` equals the
/// input length the signal comes back unchanged up to floating-point error.
///
/// The whole `num`-sample spectrum is held in memory, even when the caller
/// keeps only a prefix of the output. A spectrum that cannot be allocated
/// is reported as an error.
pub fn resample(input: &[f64], num: usize) -> Result<Vec<f64>, TryReserveError> {
    let nx = input.len();
    if nx == 0 || num == 0 {
        return Ok(Vec::new());
    }

    // Hermitian spectrum of the real output signal
    let mut full: Vec<Complex<f64>> = Vec::new();
    full.try_reserve_exact(num)?;
    full.resize(num, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::<f64>::new();

    let mut spectrum: Vec<Complex<f64>> = input.iter().map(|&x| Complex::new(x, 0.0)).collect();
    planner.plan_fft_forward(nx).process(&mut spectrum);

    // Positive half of the output spectrum, bins 0..=num/2
    let half_len = num / 2 + 1;
    let mut half: Vec<Complex<f64>> = Vec::new();
    half.try_reserve_exact(half_len)?;
    half.resize(half_len, Complex::new(0.0, 0.0));

    let n = num.min(nx);
    let nyquist = n / 2 + 1;
    half[..nyquist].copy_from_slice(&spectrum[..nyquist]);

    // With an even common length the bin at n/2 is shared between the
    // positive and negative halves of the longer spectrum.
    if n % 2 == 0 {
        if num < nx {
            half[n / 2] *= 2.0;
        } else if nx < num {
            half[n / 2] *= 0.5;
        }
    }

    full[0] = Complex::new(half[0].re, 0.0);
    for k in 1..half_len {
        if num % 2 == 0 && k == num / 2 {
            full[k] = Complex::new(half[k].re, 0.0);
        } else {
            full[k] = half[k];
            full[num - k] = half[k].conj();
        }
    }

    planner.plan_fft_inverse(num).process(&mut full);

    // rustfft does not normalize. 1/num undoes the inverse transform and
    // num/nx rescales the energy to the new length.
    let scale = 1.0 / nx as f64;
    Ok(full.into_iter().map(|c| c.re * scale).collect())
}
