//! One-dimensional grid search
//!
//! The chirp-rate and bandwidth stages each sweep a single parameter over a
//! fixed, evenly spaced grid and keep the candidate with the best score:
//!
//! ```text
//! score
//!   ^          *
//!   |       *     *
//!   |    *           *  *
//!   | *                    *  *
//!   +--+--+--+--+--+--+--+--+--+--> candidate
//!     min      ^best          max
//! ```
//!
//! Each candidate is scored independently, so the sweep parallelises
//! trivially (see [`crate::parallel`]). The reduction is always a sequential
//! first-occurrence argmax, so sequential and parallel sweeps agree bit for bit.

use serde::{Deserialize, Serialize};

use crate::argmax::argmax_f64;
use crate::types::{ChirpletError, ChirpletResult};

/// `n` evenly spaced values over `[start, stop]`, endpoints included.
///
/// The last value is exactly `stop`. `n == 1` yields `[start]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Evenly spaced search grid: `points` values over `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Lowest candidate
    pub min: f64,
    /// Highest candidate
    pub max: f64,
    /// Number of candidates
    pub points: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 2.0,
            points: 128,
        }
    }
}

impl GridSpec {
    pub fn new(min: f64, max: f64, points: usize) -> Self {
        Self { min, max, points }
    }

    /// Candidate values, ascending
    pub fn values(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.points)
    }

    /// Spacing between neighbouring candidates (0 for a single point)
    pub fn step(&self) -> f64 {
        if self.points > 1 {
            (self.max - self.min) / (self.points - 1) as f64
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> ChirpletResult<()> {
        if self.points == 0 {
            return Err(ChirpletError::InvalidGrid(
                "grid needs at least one point".to_string(),
            ));
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ChirpletError::InvalidGrid(format!(
                "grid bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max || (self.points > 1 && self.min == self.max) {
            return Err(ChirpletError::InvalidGrid(format!(
                "grid bounds must satisfy min < max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Outcome of a grid sweep
#[derive(Debug, Clone, PartialEq)]
pub struct GridSearchResult {
    /// Index of the winning candidate
    pub index: usize,
    /// Winning candidate value
    pub value: f64,
    /// Score of the winning candidate
    pub score: f64,
    /// Score of every candidate, in grid order
    pub scores: Vec<f64>,
}

/// Score every candidate and pick the first maximum.
///
/// `candidates` must be non-empty. The scoring closure must be pure; with
/// the `parallel` feature it is called from several threads.
pub fn grid_search<F>(candidates: &[f64], score: F) -> GridSearchResult
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    let scores = score_candidates(candidates, score);
    let (index, best) = argmax_f64(&scores).unwrap_or((0, f64::NAN));
    GridSearchResult {
        index,
        value: candidates.get(index).copied().unwrap_or(f64::NAN),
        score: best,
        scores,
    }
}

#[cfg(feature = "parallel")]
fn score_candidates<F>(candidates: &[f64], score: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    crate::parallel::par_scores(candidates, score)
}

#[cfg(not(feature = "parallel"))]
fn score_candidates<F>(candidates: &[f64], score: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    candidates.iter().map(|&c| score(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(0.0, 2.0, 128);
        assert_eq!(v.len(), 128);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[127], 2.0);
        assert_relative_eq!(v[1] - v[0], 2.0 / 127.0, epsilon = 1e-15);
    }

    #[test]
    fn test_linspace_small() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
        assert_eq!(linspace(-1.0, 1.0, 3), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_default_grid() {
        let g = GridSpec::default();
        assert_eq!(g.points, 128);
        assert_relative_eq!(g.step(), 2.0 / 127.0);
        let v = g.values();
        assert!(v.iter().all(|&x| (0.0..=2.0).contains(&x)));
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_grid_validation() {
        assert!(GridSpec::new(0.0, 2.0, 0).validate().is_err());
        assert!(GridSpec::new(2.0, 0.0, 10).validate().is_err());
        assert!(GridSpec::new(1.0, 1.0, 10).validate().is_err());
        assert!(GridSpec::new(1.0, 1.0, 1).validate().is_ok());
        assert!(GridSpec::new(f64::NAN, 1.0, 4).validate().is_err());
    }

    #[test]
    fn test_grid_search_picks_maximum() {
        let candidates = linspace(0.0, 2.0, 128);
        let result = grid_search(&candidates, |x| -(x - 0.75) * (x - 0.75));
        let expected = candidates
            .iter()
            .enumerate()
            .min_by(|a, b| {
                (a.1 - 0.75)
                    .abs()
                    .partial_cmp(&(b.1 - 0.75).abs())
                    .unwrap()
            })
            .unwrap()
            .0;
        assert_eq!(result.index, expected);
        assert_eq!(result.value, candidates[expected]);
        assert_eq!(result.scores.len(), 128);
    }

    #[test]
    fn test_grid_search_first_on_tie() {
        let candidates = linspace(0.0, 1.0, 5);
        let result = grid_search(&candidates, |_| 1.0);
        assert_eq!(result.index, 0);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_grid_search_ignores_nan_scores() {
        let candidates = linspace(0.0, 1.0, 4);
        let result = grid_search(&candidates, |x| if x < 0.5 { f64::NAN } else { x });
        assert_eq!(result.index, 3);
    }
}
