//! # Gaussian Chirplet DSP Library
//!
//! This crate provides the Gaussian chirplet signal model and a successive
//! parameter estimator for it.
//!
//! ## Overview
//!
//! A Gaussian chirplet is a short oscillation under a Gaussian envelope whose
//! instantaneous frequency sweeps linearly. Six parameters describe it:
//! bandwidth factor `alpha1`, chirp-rate `alpha2`, amplitude `beta`, center
//! frequency `fc`, phase `phi` and time of arrival `tau`. This library
//! implements:
//!
//! - **Synthesis**: evaluate the chirplet for a parameter set over a time axis
//! - **Estimation**: recover the six parameters from one real signal segment
//! - **Support DSP**: analytic signal, DFT frequency axis, grid search
//!
//! ## Signal Flow
//!
//! ```text
//! Synthesis:  ChirpletParams ──► ChirpletModel ──► complex samples
//! Estimation: real samples ──► envelope ──► phase ──► spectrum ──► alpha2 sweep ──► alpha1 sweep
//!                                (tau,beta)   (phi)     (fc)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chirplet_core::prelude::*;
//!
//! // Synthesize a chirplet on a uniform time axis
//! let t = TimeVector::linspace(-2.0, 2.0, 2001).unwrap();
//! let truth = ChirpletParams::builder()
//!     .alpha2(0.3)
//!     .beta(3.0)
//!     .fc(5.0)
//!     .phi(0.5)
//!     .build();
//! let y = ChirpletModel::new(truth).synthesize_real(t.as_slice());
//!
//! // Recover the parameters
//! let estimator = ParameterEstimator::default();
//! let est = estimator.estimate(&y, t.as_slice()).unwrap();
//! assert!((est.tau - truth.tau).abs() <= t.dt());
//! ```
//!
//! ## Features
//!
//! - `parallel`: score grid candidates on the Rayon thread pool

pub mod argmax;
pub mod chirplet;
pub mod config;
pub mod estimator;
pub mod fft_utils;
pub mod grid;
pub mod hilbert;
pub mod logging;
pub mod params;
pub mod time;
pub mod types;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use chirplet::{chirplet, gaussian_chirplet, ChirpletModel};
pub use config::{ChirpletConfig, ConfigError, ConfigSource, EstimatorConfig};
pub use estimator::{estimate, Estimation, ParameterEstimator};
pub use grid::GridSpec;
pub use params::ChirpletParams;
pub use time::TimeVector;
pub use types::{ChirpletError, ChirpletResult, Complex, Sample};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::chirplet::{chirplet, gaussian_chirplet, real_kernel, ChirpletModel};
    pub use crate::config::{ChirpletConfig, EstimatorConfig};
    pub use crate::estimator::{estimate, Estimation, ParameterEstimator};
    pub use crate::grid::GridSpec;
    pub use crate::hilbert::analytic_signal;
    pub use crate::params::ChirpletParams;
    pub use crate::time::TimeVector;
    pub use crate::types::{ChirpletError, ChirpletResult, Complex, Sample};
}
