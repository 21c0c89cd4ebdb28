//! Gaussian Chirplet Generation
//!
//! This module implements the forward model: six parameters in, complex
//! samples out.
//!
//! ## What is a Gaussian Chirplet?
//!
//! A chirplet is a short oscillation under a Gaussian envelope whose
//! instantaneous frequency drifts linearly with time:
//!
//! ```text
//! Amplitude                          Frequency
//!     ^        beta                      ^
//!     |        _.-._                     |            /
//!     |      .'|||||'.                 fc|- - - - - -/
//!     |    .'|||||||||'.                 |          /
//!     | _.'|||||||||||||'._              |         /
//!     +----------+----------> t          +--------+--------> t
//!               tau                              tau
//!       Envelope (alpha1)                   Sweep (alpha2)
//! ```
//!
//! ## Mathematical Foundation
//!
//! ```text
//! y(t) = beta · exp( -alpha1·(t-tau)²
//!                    + j·2π·fc·(t-tau)
//!                    + j·phi
//!                    + j·alpha2·(t-tau)² )
//! ```
//!
//! Reference: Y. Lu, R. Demirli, G. Cardoso, J. Saniie, "A Successive
//! Parameter Estimation Algorithm for Chirplet Signal Decomposition",
//! IEEE Trans. UFFC, vol. 53, no. 11, 2006.

use std::f64::consts::PI;

use crate::params::ChirpletParams;
use crate::types::{complex_ops, Complex, Sample};

/// Evaluate the chirplet at a single instant
#[inline]
pub fn gaussian_chirplet_sample(t: f64, params: &ChirpletParams) -> Complex {
    let d = t - params.tau;
    let d2 = d * d;
    let magnitude = params.beta * (-params.alpha1 * d2).exp();
    let phase = 2.0 * PI * params.fc * d + params.phi + params.alpha2 * d2;
    complex_ops::from_polar(magnitude, phase)
}

/// Evaluate the chirplet over a time vector
pub fn gaussian_chirplet(t: &[f64], params: &ChirpletParams) -> Vec<Complex> {
    t.iter()
        .map(|&ti| gaussian_chirplet_sample(ti, params))
        .collect()
}

/// Synthesize with the default parameters
/// `(alpha1=1, alpha2=0, beta=2, fc=1, phi=0, tau=0)`
pub fn chirplet(t: &[f64]) -> Vec<Complex> {
    gaussian_chirplet(t, &ChirpletParams::default())
}

/// Real part of the chirplet, scaled to unit energy.
///
/// This is the correlation kernel of the grid-search stages. Returns `None`
/// when the kernel energy is not strictly positive (e.g. `beta == 0`), since
/// the normalization is then undefined.
pub fn real_kernel(t: &[f64], params: &ChirpletParams) -> Option<Vec<Sample>> {
    let mut kernel: Vec<Sample> = t
        .iter()
        .map(|&ti| gaussian_chirplet_sample(ti, params).re)
        .collect();
    let energy = complex_ops::energy(&kernel);
    if !(energy > 0.0) || !energy.is_finite() {
        return None;
    }
    let norm = energy.sqrt();
    for k in kernel.iter_mut() {
        *k /= norm;
    }
    Some(kernel)
}

/// Chirplet model bound to one parameter set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChirpletModel {
    params: ChirpletParams,
}

impl ChirpletModel {
    pub fn new(params: ChirpletParams) -> Self {
        Self { params }
    }

    /// Get the parameters
    pub fn params(&self) -> &ChirpletParams {
        &self.params
    }

    /// Complex samples over `t`
    pub fn synthesize(&self, t: &[f64]) -> Vec<Complex> {
        gaussian_chirplet(t, &self.params)
    }

    /// Real part over `t`, the form observed by the estimator
    pub fn synthesize_real(&self, t: &[f64]) -> Vec<Sample> {
        t.iter()
            .map(|&ti| gaussian_chirplet_sample(ti, &self.params).re)
            .collect()
    }

    /// Envelope magnitude `beta·exp(-alpha1·(t-tau)²)`
    pub fn envelope(&self, t: f64) -> f64 {
        let d = t - self.params.tau;
        self.params.beta * (-self.params.alpha1 * d * d).exp()
    }

    /// Instantaneous frequency `fc + alpha2·(t-tau)/π`
    ///
    /// Derivative of the phase divided by 2π.
    pub fn instantaneous_frequency(&self, t: f64) -> f64 {
        self.params.fc + self.params.alpha2 * (t - self.params.tau) / PI
    }

    /// Sum of squared magnitudes over `t`
    pub fn energy(&self, t: &[f64]) -> f64 {
        t.iter().map(|&ti| self.envelope(ti).powi(2)).sum()
    }
}

impl From<ChirpletParams> for ChirpletModel {
    fn from(params: ChirpletParams) -> Self {
        Self::new(params)
    }
}
