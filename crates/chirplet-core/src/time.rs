//! Uniform time axis
//!
//! Every signal handled by this crate is index-aligned with a strictly
//! increasing, uniformly spaced time vector. The sampling interval is taken
//! from the first two samples and the sample rate is its reciprocal:
//!
//! ```text
//! t[0]   t[1]   t[2]          t[N-1]
//!  |------|------|--- ... ------|
//!    dt     dt                     dt = t[1] - t[0],  fs = 1/dt
//! ```

use crate::grid::linspace;
use crate::types::{ChirpletError, ChirpletResult};

/// Default relative tolerance used when checking uniform spacing.
pub const DEFAULT_SPACING_TOLERANCE: f64 = 1e-6;

/// Validated, uniformly spaced time vector
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVector {
    samples: Vec<f64>,
    dt: f64,
}

impl TimeVector {
    /// Validate a time vector with the default spacing tolerance
    pub fn new(samples: Vec<f64>) -> ChirpletResult<Self> {
        Self::with_tolerance(samples, DEFAULT_SPACING_TOLERANCE)
    }

    /// Validate a time vector.
    ///
    /// Every step must match `dt = t[1] - t[0]` within `tolerance · dt`.
    pub fn with_tolerance(samples: Vec<f64>, tolerance: f64) -> ChirpletResult<Self> {
        let dt = validate(&samples, tolerance)?;
        Ok(Self { samples, dt })
    }

    /// `n` evenly spaced samples over `[start, stop]`, endpoints included
    pub fn linspace(start: f64, stop: f64, n: usize) -> ChirpletResult<Self> {
        Self::new(linspace(start, stop, n))
    }

    /// `n` samples starting at `start`, spaced `1/sample_rate` apart
    pub fn from_sample_rate(start: f64, sample_rate: f64, n: usize) -> ChirpletResult<Self> {
        let dt = 1.0 / sample_rate;
        Self::new((0..n).map(|i| start + i as f64 * dt).collect())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sampling interval, `t[1] - t[0]`
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Sampling rate, `1 / dt`
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dt
    }

    /// First and last sample time
    pub fn range(&self) -> (f64, f64) {
        (self.samples[0], self.samples[self.samples.len() - 1])
    }

    /// Whether `value` is exactly one of the sample times
    pub fn contains_sample(&self, value: f64) -> bool {
        self.samples.iter().any(|&t| t == value)
    }
}

impl AsRef<[f64]> for TimeVector {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

/// Check length, finiteness, monotonicity and uniform spacing.
///
/// Returns the sampling interval.
fn validate(t: &[f64], tolerance: f64) -> ChirpletResult<f64> {
    if t.len() < 2 {
        return Err(ChirpletError::TooFewSamples { actual: t.len() });
    }
    if let Some(index) = t.iter().position(|v| !v.is_finite()) {
        return Err(ChirpletError::NonFiniteTime { index });
    }

    let dt = t[1] - t[0];
    if dt <= 0.0 {
        return Err(ChirpletError::NonIncreasingTime { index: 1 });
    }

    let allowed = tolerance.abs() * dt;
    for (i, w) in t.windows(2).enumerate() {
        let step = w[1] - w[0];
        if step <= 0.0 {
            return Err(ChirpletError::NonIncreasingTime { index: i + 1 });
        }
        if (step - dt).abs() > allowed {
            return Err(ChirpletError::NonUniformSpacing {
                index: i + 1,
                expected: dt,
                actual: step,
            });
        }
    }
    Ok(dt)
}
