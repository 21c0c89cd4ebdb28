//! Successive Chirplet Parameter Estimation
//!
//! Estimates the six Gaussian chirplet parameters of a real signal segment
//! in five fixed stages. Each stage freezes its result and hands it to the
//! next; nothing is revisited.
//!
//! ```text
//!  y(t) ──► Hilbert ──► |z| peak ──────────► tau, beta     (1)
//!                 └───► arg z[peak]/beta ──► phi           (2)
//!  y(t) ──► |FFT| peak ────────────────────► fc            (3)
//!  y · kernel(alpha1=1, alpha2=?, ...) max ► alpha2        (4)
//!  y · kernel(alpha1=?, alpha2, ...)  max ─► alpha1        (5)
//! ```
//!
//! The kernels of stages 4 and 5 are the real part of the chirplet model
//! with every already-estimated parameter fixed, scaled to unit energy. The
//! score of a candidate is its dot product with the signal.
//!
//! The estimator is greedy: one pass, fixed grid resolution. It works when
//! the segment holds a single chirplet-like pulse with one dominant envelope
//! peak. Other inputs still produce a well-defined, possibly meaningless,
//! estimate.
//!
//! ## Example
//!
//! ```rust
//! use chirplet_core::prelude::*;
//!
//! let t = TimeVector::linspace(-2.0, 2.0, 4001).unwrap();
//! let truth = ChirpletParams::new(1.0, 0.3, 3.0, 5.0, 0.5, 0.0);
//! let y = ChirpletModel::new(truth).synthesize_real(t.as_slice());
//!
//! let est = estimate(&y, t.as_slice()).unwrap();
//! assert!((est.fc - 5.0).abs() < 0.25);
//! assert!((est.beta - 3.0).abs() < 0.15);
//! ```
//!
//! Reference: Y. Lu, R. Demirli, G. Cardoso, J. Saniie, "A Successive
//! Parameter Estimation Algorithm for Chirplet Signal Decomposition",
//! IEEE Trans. UFFC, vol. 53, no. 11, 2006.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::argmax::argmax_f64;
use crate::chirplet::real_kernel;
use crate::config::EstimatorConfig;
use crate::fft_utils::{spectral_peak, SpectralPeak};
use crate::grid::{grid_search, GridSearchResult};
use crate::hilbert::analytic_signal;
use crate::params::ChirpletParams;
use crate::time::TimeVector;
use crate::types::{complex_ops, ChirpletError, ChirpletResult, Complex, Sample};

/// Estimate chirplet parameters with the default configuration.
///
/// `t` must be uniformly spaced, strictly increasing, at least two samples
/// long and the same length as `y`.
pub fn estimate(y: &[Sample], t: &[f64]) -> ChirpletResult<ChirpletParams> {
    ParameterEstimator::default().estimate(y, t)
}

/// Envelope peak found in stage 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePeak {
    /// Sample index of the envelope maximum (first occurrence)
    pub index: usize,
    /// Time of arrival, `t[index]`
    pub tau: f64,
    /// Envelope magnitude at `index`
    pub beta: f64,
    /// Analytic signal value at `index`
    pub value: Complex,
}

/// Stage 1: locate the envelope maximum of the analytic signal.
///
/// Returns the peak together with the full envelope.
pub fn envelope_peak(analytic: &[Complex], t: &[f64]) -> (EnvelopePeak, Vec<f64>) {
    let envelope = complex_ops::magnitudes(analytic);
    let (index, beta) = argmax_f64(&envelope).unwrap_or((0, 0.0));
    let peak = EnvelopePeak {
        index,
        tau: t[index],
        beta,
        value: analytic[index],
    };
    (peak, envelope)
}

/// Stage 2: phase of the analytic signal at the envelope peak, in (-π, π].
///
/// A zero-amplitude peak has no defined phase; `0.0` is returned.
pub fn peak_phase(peak: &EnvelopePeak) -> f64 {
    if peak.beta > 0.0 {
        complex_ops::wrap_phase((peak.value / peak.beta).arg())
    } else {
        0.0
    }
}

/// Stage 3: frequency of the strongest DFT bin.
pub fn center_frequency(y: &[Sample], sample_rate: f64) -> SpectralPeak {
    spectral_peak(y, sample_rate).unwrap_or(SpectralPeak {
        bin: 0,
        frequency: 0.0,
        magnitude: 0.0,
    })
}

/// Correlation of `y` with the unit-energy real kernel built from `params`.
///
/// `None` when the kernel has no energy to normalize.
pub fn correlation_score(y: &[Sample], t: &[f64], params: &ChirpletParams) -> Option<f64> {
    real_kernel(t, params).map(|kernel| complex_ops::dot(y, &kernel))
}

/// Parameters frozen after stages 1–3
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageState {
    pub tau: f64,
    pub beta: f64,
    pub phi: f64,
    pub fc: f64,
}

impl StageState {
    /// Full parameter record with the two remaining values filled in
    pub fn with_alphas(&self, alpha1: f64, alpha2: f64) -> ChirpletParams {
        ChirpletParams {
            alpha1,
            alpha2,
            beta: self.beta,
            fc: self.fc,
            phi: self.phi,
            tau: self.tau,
        }
    }
}

/// Sweep one parameter over `candidates`, scoring each kernel against `y`.
///
/// Zero-energy kernels score `0.0`.
fn sweep<F>(y: &[Sample], t: &[f64], candidates: &[f64], stage: &str, kernel: F) -> GridSearchResult
where
    F: Fn(f64) -> ChirpletParams + Sync + Send,
{
    let degenerate = AtomicUsize::new(0);
    let result = grid_search(candidates, |c| {
        correlation_score(y, t, &kernel(c)).unwrap_or_else(|| {
            degenerate.fetch_add(1, Ordering::Relaxed);
            0.0
        })
    });

    let degenerate = degenerate.into_inner();
    if degenerate > 0 {
        tracing::warn!(
            stage,
            degenerate,
            candidates = candidates.len(),
            "zero-energy kernels scored as 0"
        );
    }
    tracing::trace!(
        stage,
        best_index = result.index,
        best_value = result.value,
        best_score = result.score,
        "grid sweep finished"
    );
    result
}

/// Stage 4: chirp-rate sweep with the bandwidth factor held at
/// `fixed_alpha1`.
pub fn chirp_rate_search(
    y: &[Sample],
    t: &[f64],
    state: &StageState,
    candidates: &[f64],
    fixed_alpha1: f64,
) -> GridSearchResult {
    sweep(y, t, candidates, "alpha2", |alpha2| {
        state.with_alphas(fixed_alpha1, alpha2)
    })
}

/// Stage 5: bandwidth sweep with the chirp-rate held at the stage-4 result.
pub fn bandwidth_search(
    y: &[Sample],
    t: &[f64],
    state: &StageState,
    candidates: &[f64],
    alpha2: f64,
) -> GridSearchResult {
    sweep(y, t, candidates, "alpha1", |alpha1| {
        state.with_alphas(alpha1, alpha2)
    })
}

/// Full estimation result with per-stage intermediates
#[derive(Debug, Clone, PartialEq)]
pub struct Estimation {
    /// The six estimated parameters
    pub params: ChirpletParams,
    /// Envelope peak from stage 1
    pub peak: EnvelopePeak,
    /// Envelope of the analytic signal
    pub envelope: Vec<f64>,
    /// Spectral peak from stage 3
    pub spectral_peak: SpectralPeak,
    /// Stage-4 sweep over alpha2
    pub alpha2_search: GridSearchResult,
    /// Stage-5 sweep over alpha1
    pub alpha1_search: GridSearchResult,
}

/// Sequential five-stage chirplet parameter estimator
#[derive(Debug, Clone)]
pub struct ParameterEstimator {
    config: EstimatorConfig,
    alpha2_candidates: Vec<f64>,
    alpha1_candidates: Vec<f64>,
}

impl Default for ParameterEstimator {
    fn default() -> Self {
        Self::from_valid_config(EstimatorConfig::default())
    }
}

impl ParameterEstimator {
    /// Create an estimator, validating the configuration
    pub fn new(config: EstimatorConfig) -> ChirpletResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EstimatorConfig) -> Self {
        Self {
            alpha2_candidates: config.alpha2_grid.values(),
            alpha1_candidates: config.alpha1_grid.values(),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Candidate chirp-rates, ascending
    pub fn alpha2_candidates(&self) -> &[f64] {
        &self.alpha2_candidates
    }

    /// Candidate bandwidth factors, ascending
    pub fn alpha1_candidates(&self) -> &[f64] {
        &self.alpha1_candidates
    }

    /// Estimate the parameters of `y` sampled at times `t`.
    pub fn estimate(&self, y: &[Sample], t: &[f64]) -> ChirpletResult<ChirpletParams> {
        self.estimate_detailed(y, t).map(|e| e.params)
    }

    /// Estimate, keeping every intermediate result.
    pub fn estimate_detailed(&self, y: &[Sample], t: &[f64]) -> ChirpletResult<Estimation> {
        if y.len() != t.len() {
            return Err(ChirpletError::LengthMismatch {
                signal: y.len(),
                time: t.len(),
            });
        }
        let time = TimeVector::with_tolerance(t.to_vec(), self.config.spacing_tolerance)?;
        Ok(self.run(y, &time))
    }

    /// Estimate against an already validated time vector.
    pub fn estimate_on(&self, y: &[Sample], t: &TimeVector) -> ChirpletResult<Estimation> {
        if y.len() != t.len() {
            return Err(ChirpletError::LengthMismatch {
                signal: y.len(),
                time: t.len(),
            });
        }
        Ok(self.run(y, t))
    }

    fn run(&self, y: &[Sample], time: &TimeVector) -> Estimation {
        let t = time.as_slice();
        let _span = tracing::debug_span!("estimate", samples = y.len()).entered();

        // Stage 1: envelope peak -> tau, beta
        let analytic = analytic_signal(y);
        let (peak, envelope) = envelope_peak(&analytic, t);
        tracing::debug!(index = peak.index, tau = peak.tau, beta = peak.beta, "envelope peak");

        // Stage 2: phase at the peak -> phi
        let phi = peak_phase(&peak);
        tracing::debug!(phi, "phase at peak");

        // Stage 3: spectral peak -> fc
        let spectral = center_frequency(y, time.sample_rate());
        tracing::debug!(bin = spectral.bin, fc = spectral.frequency, "spectral peak");

        let state = StageState {
            tau: peak.tau,
            beta: peak.beta,
            phi,
            fc: spectral.frequency,
        };

        // Stage 4: chirp-rate sweep -> alpha2
        let alpha2_search = chirp_rate_search(
            y,
            t,
            &state,
            &self.alpha2_candidates,
            self.config.chirp_search_alpha1,
        );
        let alpha2 = alpha2_search.value;
        tracing::debug!(alpha2, score = alpha2_search.score, "chirp-rate");

        // Stage 5: bandwidth sweep -> alpha1
        let alpha1_search = bandwidth_search(y, t, &state, &self.alpha1_candidates, alpha2);
        let alpha1 = alpha1_search.value;
        tracing::debug!(alpha1, score = alpha1_search.score, "bandwidth factor");

        Estimation {
            params: state.with_alphas(alpha1, alpha2),
            peak,
            envelope,
            spectral_peak: spectral,
            alpha2_search,
            alpha1_search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chirplet::ChirpletModel;
    use crate::grid::GridSpec;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn reference_case() -> (TimeVector, ChirpletParams, Vec<f64>) {
        let t = TimeVector::linspace(-2.0, 2.0, 4001).unwrap();
        let truth = ChirpletParams::new(1.0, 0.3, 3.0, 5.0, 0.5, 0.0);
        let y = ChirpletModel::new(truth).synthesize_real(t.as_slice());
        (t, truth, y)
    }

    #[test]
    fn test_envelope_peak_first_occurrence() {
        let analytic = vec![
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 2.0),
            Complex::new(-2.0, 0.0),
        ];
        let t = [0.0, 0.5, 1.0];
        let (peak, envelope) = envelope_peak(&analytic, &t);
        assert_eq!(peak.index, 1);
        assert_eq!(peak.tau, 0.5);
        assert_eq!(peak.beta, 2.0);
        assert_eq!(envelope, vec![1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_peak_phase_normalized() {
        let peak = EnvelopePeak {
            index: 0,
            tau: 0.0,
            beta: 1.0,
            value: Complex::new(-1.0, -0.0),
        };
        // atan2(-0, -1) = -π, folded onto +π
        assert_eq!(peak_phase(&peak), PI);

        let peak = EnvelopePeak {
            value: Complex::new(0.0, -2.0),
            beta: 2.0,
            ..peak
        };
        assert_relative_eq!(peak_phase(&peak), -PI / 2.0);
    }

    #[test]
    fn test_peak_phase_zero_amplitude() {
        let peak = EnvelopePeak {
            index: 3,
            tau: 0.1,
            beta: 0.0,
            value: Complex::new(0.0, 0.0),
        };
        assert_eq!(peak_phase(&peak), 0.0);
    }

    #[test]
    fn test_stages_on_reference_signal() {
        let (t, truth, y) = reference_case();
        let est = ParameterEstimator::default()
            .estimate_on(&y, &t)
            .unwrap();

        assert!((est.peak.index as i64 - 2000).abs() <= 1);
        assert!((est.params.tau - truth.tau).abs() <= t.dt());
        assert_relative_eq!(est.params.beta, truth.beta, max_relative = 0.05);
        assert!((est.params.phi - truth.phi).abs() < 0.05);
        assert!((est.params.fc - truth.fc).abs() <= t.sample_rate() / t.len() as f64);

        let step = GridSpec::default().step();
        assert!((est.params.alpha2 - truth.alpha2).abs() <= step + 1e-12);
        assert!((est.params.alpha1 - truth.alpha1).abs() <= step + 1e-12);
    }

    #[test]
    fn test_detailed_result_consistency() {
        let (t, _, y) = reference_case();
        let est = ParameterEstimator::default().estimate_on(&y, &t).unwrap();
        assert_eq!(est.alpha2_search.scores.len(), 128);
        assert_eq!(est.alpha1_search.scores.len(), 128);
        assert_eq!(est.params.alpha2, est.alpha2_search.value);
        assert_eq!(est.params.alpha1, est.alpha1_search.value);
        assert_eq!(est.envelope[est.peak.index], est.params.beta);
        assert_eq!(est.spectral_peak.frequency, est.params.fc);
    }

    #[test]
    fn test_chirp_rate_score_peaks_at_truth() {
        let (t, truth, y) = reference_case();
        let state = StageState {
            tau: truth.tau,
            beta: truth.beta,
            phi: truth.phi,
            fc: truth.fc,
        };
        let candidates = [0.0, 0.3, 0.6, 1.2];
        let result = chirp_rate_search(&y, t.as_slice(), &state, &candidates, 1.0);
        assert_eq!(result.index, 1);
        // Matched kernel: score equals the signal norm
        assert_relative_eq!(
            result.score,
            complex_ops::energy(&y).sqrt(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_bandwidth_score_peaks_at_truth() {
        let (t, truth, y) = reference_case();
        let state = StageState {
            tau: truth.tau,
            beta: truth.beta,
            phi: truth.phi,
            fc: truth.fc,
        };
        let candidates = [0.25, 0.5, 1.0, 1.5, 2.0];
        let result = bandwidth_search(&y, t.as_slice(), &state, &candidates, truth.alpha2);
        assert_eq!(result.index, 2);
    }

    #[test]
    fn test_zero_signal_fallback() {
        let t = TimeVector::linspace(0.0, 1.0, 64).unwrap();
        let y = vec![0.0; 64];
        let est = ParameterEstimator::default().estimate_on(&y, &t).unwrap();
        assert_eq!(est.params.tau, 0.0);
        assert_eq!(est.params.beta, 0.0);
        assert_eq!(est.params.phi, 0.0);
        assert_eq!(est.params.fc, 0.0);
        assert_eq!(est.params.alpha1, 0.0);
        assert_eq!(est.params.alpha2, 0.0);
        assert!(est.alpha2_search.scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_custom_grid() {
        let (t, _, y) = reference_case();
        let config = EstimatorConfig {
            alpha2_grid: GridSpec::new(0.0, 1.0, 11),
            alpha1_grid: GridSpec::new(0.5, 1.5, 11),
            ..Default::default()
        };
        let estimator = ParameterEstimator::new(config).unwrap();
        let est = estimator.estimate(&y, t.as_slice()).unwrap();
        assert!(estimator.alpha2_candidates().contains(&est.alpha2));
        assert!(estimator.alpha1_candidates().contains(&est.alpha1));
        assert_relative_eq!(est.alpha2, 0.3, epsilon = 1e-12);
        assert_relative_eq!(est.alpha1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EstimatorConfig {
            alpha1_grid: GridSpec::new(1.0, 0.0, 4),
            ..Default::default()
        };
        assert!(matches!(
            ParameterEstimator::new(config),
            Err(ChirpletError::Config(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let t = TimeVector::linspace(0.0, 1.0, 10).unwrap();
        let err = ParameterEstimator::default()
            .estimate_on(&[0.0; 9], &t)
            .unwrap_err();
        assert_eq!(err, ChirpletError::LengthMismatch { signal: 9, time: 10 });
    }
}
