//! Gaussian Chirplet Parameters
//!
//! A Gaussian chirplet is described by six real scalars:
//!
//! | Symbol   | Name              | Role                                      |
//! |----------|-------------------|-------------------------------------------|
//! | `alpha1` | bandwidth factor  | Gaussian envelope decay, `>= 0`           |
//! | `alpha2` | chirp-rate        | quadratic phase coefficient               |
//! | `beta`   | amplitude         | peak envelope magnitude, `>= 0`           |
//! | `fc`     | center frequency  | same units as `1/dt`                      |
//! | `phi`    | phase             | radians, in `(-π, π]`                     |
//! | `tau`    | time of arrival   | envelope center, same units as `t`        |
//!
//! ### Envelope and Frequency
//!
//! ```text
//! |y(t)|        = beta · exp(-alpha1 · (t - tau)²)
//! f_inst(t)     = fc + alpha2 · (t - tau) / π
//! ```
//!
//! A larger `alpha1` gives a shorter pulse (wider bandwidth). A positive
//! `alpha2` sweeps the instantaneous frequency upwards through `fc` at `tau`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Complete Gaussian chirplet parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChirpletParams {
    /// Bandwidth factor (envelope decay rate)
    pub alpha1: f64,
    /// Chirp-rate (quadratic phase coefficient)
    pub alpha2: f64,
    /// Amplitude
    pub beta: f64,
    /// Center frequency
    pub fc: f64,
    /// Phase in radians
    pub phi: f64,
    /// Time of arrival
    pub tau: f64,
}

impl Default for ChirpletParams {
    fn default() -> Self {
        Self {
            alpha1: 1.0,
            alpha2: 0.0,
            beta: 2.0,
            fc: 1.0,
            phi: 0.0,
            tau: 0.0,
        }
    }
}

impl ChirpletParams {
    /// Create a new builder, starting from the synthesis defaults
    pub fn builder() -> ChirpletParamsBuilder {
        ChirpletParamsBuilder::default()
    }

    /// Create a parameter set from all six values, in canonical order
    pub fn new(alpha1: f64, alpha2: f64, beta: f64, fc: f64, phi: f64, tau: f64) -> Self {
        Self {
            alpha1,
            alpha2,
            beta,
            fc,
            phi,
            tau,
        }
    }

    /// Parameters as an array in canonical order
    /// `[alpha1, alpha2, beta, fc, phi, tau]`
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.alpha1,
            self.alpha2,
            self.beta,
            self.fc,
            self.phi,
            self.tau,
        ]
    }

    /// Envelope duration between the 1/e points, `2/sqrt(alpha1)`.
    ///
    /// Infinite for a flat (`alpha1 <= 0`) envelope.
    pub fn duration(&self) -> f64 {
        if self.alpha1 > 0.0 {
            2.0 / self.alpha1.sqrt()
        } else {
            f64::INFINITY
        }
    }

    /// Whether every field is finite and the sign constraints hold
    pub fn is_well_formed(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
            && self.alpha1 >= 0.0
            && self.beta >= 0.0
            && self.phi > -PI
            && self.phi <= PI
    }
}

impl fmt::Display for ChirpletParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha1={:.6} alpha2={:.6} beta={:.6} fc={:.6} phi={:.6} tau={:.6}",
            self.alpha1, self.alpha2, self.beta, self.fc, self.phi, self.tau
        )
    }
}

impl From<[f64; 6]> for ChirpletParams {
    fn from(v: [f64; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

/// Builder for ChirpletParams
#[derive(Default)]
pub struct ChirpletParamsBuilder {
    params: ChirpletParams,
}

impl ChirpletParamsBuilder {
    pub fn alpha1(mut self, alpha1: f64) -> Self {
        self.params.alpha1 = alpha1;
        self
    }

    pub fn alpha2(mut self, alpha2: f64) -> Self {
        self.params.alpha2 = alpha2;
        self
    }

    pub fn beta(mut self, beta: f64) -> Self {
        self.params.beta = beta;
        self
    }

    pub fn fc(mut self, fc: f64) -> Self {
        self.params.fc = fc;
        self
    }

    pub fn phi(mut self, phi: f64) -> Self {
        self.params.phi = phi;
        self
    }

    pub fn tau(mut self, tau: f64) -> Self {
        self.params.tau = tau;
        self
    }

    pub fn build(self) -> ChirpletParams {
        self.params
    }
}
