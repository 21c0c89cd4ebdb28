//! Analytic signal via the frequency-domain Hilbert transform
//!
//! Builds the analytic signal of a finite real segment in the frequency
//! domain: transform, suppress negative frequencies, double positive ones,
//! transform back. The output real part reproduces the input and the
//! imaginary part is its Hilbert transform, with no group delay.
//!
//! ```text
//! H[k] = 1   k = 0, and k = N/2 for even N
//!        2   0 < k < N/2  (positive frequencies)
//!        0   otherwise    (negative frequencies)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chirplet_core::hilbert::analytic_signal;
//!
//! let input: Vec<f64> = (0..200).map(|i| {
//!     (2.0 * std::f64::consts::PI * 10.0 * i as f64 / 200.0).cos()
//! }).collect();
//! let analytic = analytic_signal(&input);
//! // Whole number of cycles: the envelope is flat at the input amplitude
//! assert!(analytic.iter().all(|z| (z.norm() - 1.0).abs() < 1e-9));
//! ```

use num_complex::Complex64;

use crate::fft_utils::FftProcessor;
use crate::types::Sample;

/// Frequency-domain Hilbert transformer for a fixed block length.
#[derive(Debug)]
pub struct HilbertTransform {
    fft: FftProcessor,
    /// Spectral weights applied between the forward and inverse FFT.
    weights: Vec<f64>,
}

impl HilbertTransform {
    /// Create a transformer for blocks of `size` samples.
    pub fn new(size: usize) -> Self {
        Self {
            fft: FftProcessor::new(size),
            weights: Self::design_weights(size),
        }
    }

    fn design_weights(n: usize) -> Vec<f64> {
        let mut h = vec![0.0; n];
        if n == 0 {
            return h;
        }
        h[0] = 1.0;
        if n % 2 == 0 {
            h[n / 2] = 1.0;
            h[1..n / 2].iter_mut().for_each(|w| *w = 2.0);
        } else {
            h[1..(n + 1) / 2].iter_mut().for_each(|w| *w = 2.0);
        }
        h
    }

    /// Block length this transformer was planned for.
    pub fn size(&self) -> usize {
        self.fft.size()
    }

    /// Spectral weights (1 at DC/Nyquist, 2 for positive, 0 for negative bins).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Convert a real block to its analytic signal.
    ///
    /// Input shorter than the block is zero-padded, longer input truncated;
    /// the output always has `size()` samples.
    pub fn process(&mut self, input: &[Sample]) -> Vec<Complex64> {
        let mut spectrum = self.fft.fft_real(input);
        for (bin, &w) in spectrum.iter_mut().zip(self.weights.iter()) {
            *bin *= w;
        }
        self.fft.ifft_inplace(&mut spectrum);
        spectrum
    }
}

/// Analytic signal of a real sequence, same length as the input.
pub fn analytic_signal(input: &[Sample]) -> Vec<Complex64> {
    if input.is_empty() {
        return Vec::new();
    }
    HilbertTransform::new(input.len()).process(input)
}

/// Instantaneous envelope, `|analytic_signal(x)|`.
pub fn envelope(input: &[Sample]) -> Vec<f64> {
    analytic_signal(input).iter().map(|z| z.norm()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_weights_even() {
        let h = HilbertTransform::new(6);
        assert_eq!(h.weights(), &[1.0, 2.0, 2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_weights_odd() {
        let h = HilbertTransform::new(5);
        assert_eq!(h.weights(), &[1.0, 2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_output_length() {
        let input = vec![1.0; 100];
        assert_eq!(analytic_signal(&input).len(), 100);
        assert!(analytic_signal(&[]).is_empty());
    }

    #[test]
    fn test_real_part_preserved() {
        let input: Vec<f64> = (0..257).map(|i| ((i * 37 % 11) as f64) - 5.0).collect();
        let analytic = analytic_signal(&input);
        for (z, &x) in analytic.iter().zip(input.iter()) {
            assert_abs_diff_eq!(z.re, x, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cosine_to_analytic() {
        let n = 1000;
        let fs = 1000.0;
        let f = 25.0;
        let input: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * f * i as f64 / fs).cos())
            .collect();
        let analytic = analytic_signal(&input);

        // Hilbert of cos is sin: the analytic signal is e^{jωt}
        for (i, z) in analytic.iter().enumerate() {
            let expected_im = (2.0 * PI * f * i as f64 / fs).sin();
            assert_abs_diff_eq!(z.im, expected_im, epsilon = 1e-9);
            assert_abs_diff_eq!(z.norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dc_input() {
        // Hilbert of DC = 0
        let analytic = analytic_signal(&vec![2.5; 64]);
        for z in &analytic {
            assert_abs_diff_eq!(z.re, 2.5, epsilon = 1e-12);
            assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_envelope_of_gaussian_pulse() {
        // Narrowband pulse well inside the window: envelope follows the
        // Gaussian and peaks at its center.
        let n = 2001;
        let fs = 1000.0;
        let input: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / fs - 1.0;
                3.0 * (-20.0 * t * t).exp() * (2.0 * PI * 60.0 * t).cos()
            })
            .collect();
        let env = envelope(&input);
        let (peak_idx, _) = crate::argmax::argmax_f64(&env).unwrap();
        assert!((peak_idx as i64 - 1000).abs() <= 1, "peak at {peak_idx}");
        assert_abs_diff_eq!(env[1000], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn test_reuse_matches_free_function() {
        let input: Vec<f64> = (0..128).map(|i| (i as f64 * 0.3).sin()).collect();
        let mut h = HilbertTransform::new(128);
        let a = h.process(&input);
        let b = h.process(&input);
        let c = analytic_signal(&input);
        assert_eq!(a, b);
        for (x, y) in a.iter().zip(c.iter()) {
            assert!((x - y).norm() < 1e-12);
        }
    }
}
