//! Parallel Processing Module
//!
//! This module provides parallel grid-sweep scoring using Rayon.
//! Enable with the `parallel` feature flag.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! chirplet-core = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! ## Performance Considerations
//!
//! Every grid candidate builds and correlates one full-length kernel, so
//! the work per candidate is O(N). Parallelism pays off for long segments;
//! for a few hundred samples the sequential sweep is usually faster.

use rayon::prelude::*;

/// Score every candidate on the Rayon pool.
///
/// Results come back in candidate order, so the caller's argmax sees
/// exactly what the sequential sweep would produce.
pub fn par_scores<F>(candidates: &[f64], score: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    candidates.par_iter().map(|&c| score(c)).collect()
}
