//! FFT Utilities for Chirplet Analysis
//!
//! Thin wrappers around `rustfft` used by the analytic-signal construction
//! and by the spectral stage of the estimator.
//!
//! ## Frequency Axis
//!
//! An N-point DFT of a signal sampled at `fs` has bins spaced `fs/N` apart.
//! Bins past the middle alias to negative frequencies, giving a zero-centered
//! axis folded into `[-fs/2, fs/2)`:
//!
//! ```text
//! bin k:    0     1    ...  (N-1)/2  | (N-1)/2+1  ...   N-1
//! freq:     0   fs/N   ...    +      |     -      ...  -fs/N
//! ```
//!
//! For a real signal `|X[k]| = |X[N-k]|`, so the peak search only looks at
//! bins `0..=N/2`. The result is non-negative except for even `N`, where bin
//! `N/2` sits at `-fs/2`.

use rustfft::{Fft, FftPlanner, Length};
use std::sync::Arc;

use crate::argmax::argmax_f64;
use crate::types::{complex_ops, Complex, Sample};

/// Planned forward/inverse transform pair of one length.
///
/// Plans are built once; the scratch buffer is shared by both directions.
pub struct FftProcessor {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex>,
}

impl std::fmt::Debug for FftProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FftProcessor({})", self.size())
    }
}

impl FftProcessor {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        Self {
            forward,
            inverse,
            scratch: vec![Complex::default(); scratch_len],
        }
    }

    /// Transform length
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Unnormalized forward DFT, in place. `buffer.len()` must equal `size()`.
    pub fn fft_inplace(&mut self, buffer: &mut [Complex]) {
        debug_assert_eq!(buffer.len(), self.size());
        self.forward.process_with_scratch(buffer, &mut self.scratch);
    }

    /// Forward DFT of a real sequence; shorter input is zero-padded and
    /// longer input truncated to `size()`.
    pub fn fft_real(&mut self, input: &[Sample]) -> Vec<Complex> {
        let n = self.size();
        let mut buffer: Vec<Complex> = input
            .iter()
            .copied()
            .chain(std::iter::repeat(0.0))
            .take(n)
            .map(|x| Complex::new(x, 0.0))
            .collect();
        self.fft_inplace(&mut buffer);
        buffer
    }

    /// Inverse DFT scaled by `1/N`, so `ifft(fft(x)) == x`.
    pub fn ifft_inplace(&mut self, buffer: &mut [Complex]) {
        debug_assert_eq!(buffer.len(), self.size());
        self.inverse.process_with_scratch(buffer, &mut self.scratch);
        let scale = (self.size() as f64).recip();
        buffer.iter_mut().for_each(|z| *z *= scale);
    }

    /// `|X[k]|` for every bin
    pub fn magnitude_spectrum(spectrum: &[Complex]) -> Vec<f64> {
        complex_ops::magnitudes(spectrum)
    }
}

/// DFT sample frequencies for an `n`-point transform at `sample_rate`.
///
/// Same layout as the transform output: non-negative frequencies first,
/// then negative frequencies in increasing order.
pub fn fft_freq(n: usize, sample_rate: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let resolution = sample_rate / n as f64;
    let positive = (n - 1) / 2;
    (0..n)
        .map(|k| {
            let idx = if k <= positive {
                k as f64
            } else {
                (k as i64 - n as i64) as f64
            };
            idx * resolution
        })
        .collect()
}

/// Result of a spectral peak search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralPeak {
    /// Bin index of the maximum magnitude (first occurrence)
    pub bin: usize,
    /// Physical frequency of that bin
    pub frequency: f64,
    /// Spectrum magnitude at that bin
    pub magnitude: f64,
}

/// Locate the strongest bin of the N-point magnitude spectrum of a real
/// signal and map it to a physical frequency.
///
/// The spectrum of a real signal is conjugate-symmetric, so the first
/// occurrence of the maximum lies in bins `0..=N/2`. Only that half is
/// searched, which keeps rounding differences between mirrored bins from
/// flipping the sign of the result. For even `N` the Nyquist bin `N/2` maps
/// to `-fs/2`.
///
/// Returns `None` for an empty signal.
pub fn spectral_peak(signal: &[Sample], sample_rate: f64) -> Option<SpectralPeak> {
    let n = signal.len();
    if n == 0 {
        return None;
    }
    let mut processor = FftProcessor::new(n);
    let spectrum = processor.fft_real(signal);
    let magnitudes = FftProcessor::magnitude_spectrum(&spectrum);
    let (bin, magnitude) = argmax_f64(&magnitudes[..=n / 2])?;
    let freqs = fft_freq(n, sample_rate);
    Some(SpectralPeak {
        bin,
        frequency: freqs[bin],
        magnitude,
    })
}
