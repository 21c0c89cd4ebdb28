//! Core types for chirplet signal processing
//!
//! This module defines the sample types, the error type and a handful of
//! small numeric helpers shared by the synthesis and estimation code.
//!
//! ## Real and Analytic Samples
//!
//! Estimation consumes a *real* signal segment. Internally the estimator
//! lifts it to the *analytic* signal, a complex sequence whose real part is
//! the input and whose imaginary part is its Hilbert transform:
//!
//! ```text
//!            Im
//!            ^
//!            |     * z = a(t)·e^{jθ(t)}
//!            |    /
//!            |   /  |z| = envelope a(t)
//!            |  /   arg z = instantaneous phase θ(t)
//!            | /
//!   ---------+---------> Re  (= original real sample)
//!            |
//! ```

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::config::ConfigError;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// A floating point sample (for real-valued signals)
pub type Sample = f64;

/// Result type for chirplet operations
pub type ChirpletResult<T> = Result<T, ChirpletError>;

/// Errors that can occur while validating estimator inputs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChirpletError {
    #[error("Signal and time vector lengths differ: signal has {signal} samples, time has {time}")]
    LengthMismatch { signal: usize, time: usize },

    #[error("Too few samples: need at least 2, got {actual}")]
    TooFewSamples { actual: usize },

    #[error("Time sample {index} is not finite")]
    NonFiniteTime { index: usize },

    #[error("Time vector is not strictly increasing at index {index}")]
    NonIncreasingTime { index: usize },

    #[error("Non-uniform time spacing at index {index}: expected dt = {expected}, got {actual}")]
    NonUniformSpacing {
        index: usize,
        expected: f64,
        actual: f64,
    },

    #[error("Invalid search grid: {0}")]
    InvalidGrid(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Helper functions for working with samples
pub mod complex_ops {
    use super::*;

    /// Create a complex number from magnitude and phase
    #[inline]
    pub fn from_polar(magnitude: f64, phase: f64) -> Complex {
        Complex::new(magnitude * phase.cos(), magnitude * phase.sin())
    }

    /// Wrap a phase into the half-open interval (-π, π].
    ///
    /// `atan2` already lands in [-π, π]; the lower endpoint is folded onto +π.
    #[inline]
    pub fn wrap_phase(phase: f64) -> f64 {
        let mut p = phase % (2.0 * PI);
        if p > PI {
            p -= 2.0 * PI;
        }
        if p <= -PI {
            p += 2.0 * PI;
        }
        p
    }

    /// Energy (sum of squares) of a real sequence
    pub fn energy(samples: &[Sample]) -> f64 {
        samples.iter().map(|&x| x * x).sum()
    }

    /// Dot product of two real sequences, truncated to the shorter one
    pub fn dot(a: &[Sample], b: &[Sample]) -> f64 {
        a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
    }

    /// Magnitude of every sample in a complex sequence
    pub fn magnitudes(samples: &[Complex]) -> Vec<f64> {
        samples.iter().map(|c| c.norm()).collect()
    }
}
