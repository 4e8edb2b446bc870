//! Robust 1-D consensus estimator.
//!
//! A wall's projected samples cluster around the true wall coordinate, with
//! possible multi-modal contamination from neighboring walls or detector
//! noise. [`vote`] finds the largest run of sorted samples whose spread
//! stays within tolerance and reports its mean together with a confidence
//! score, falling back to the median when no consensus exists.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::VoteConfig;
use crate::core::math::{mean, median};

/// Result of a consensus vote over one wall's samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoteResult {
    /// Estimated coordinate (consensus-span mean, or median on fallback).
    pub best_fit: f32,
    /// Fraction of samples inside the winning span, in `[0, 1]`.
    /// Zero means the median fallback was taken.
    pub score: f32,
    /// Mean absolute deviation of all samples from `best_fit`. Used as a
    /// tie-breaker between competing axis hypotheses for the same wall.
    pub residual: f32,
}

/// Vote for the coordinate best supported by a set of noisy samples.
///
/// Sorts the samples and scans for the longest contiguous span whose extent
/// stays within `cfg.tolerance` and whose length is at least
/// `cfg.min_span_fraction` of the sample count. Span ties go to the lowest
/// start index, so the result is deterministic. Degenerate inputs (sample
/// count below `tolerance`, or no valid span) fall back to the median with
/// score 0.
///
/// # Example
/// ```
/// use vastu_layout::config::VoteConfig;
/// use vastu_layout::vote::vote;
///
/// let samples = [49.6, 50.1, 50.0, 49.9, 50.3, 120.0];
/// let result = vote(&samples, &VoteConfig::default());
/// assert!((result.best_fit - 50.0).abs() < 0.5);
/// assert!(result.score > 0.8);
/// ```
pub fn vote(values: &[f32], cfg: &VoteConfig) -> VoteResult {
    if values.is_empty() {
        return VoteResult {
            best_fit: 0.0,
            score: 0.0,
            residual: 0.0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let min_len = (cfg.min_span_fraction * n as f32).ceil().max(1.0) as usize;

    // Longest within-tolerance span over the sorted samples. The upper
    // pointer never moves backwards, so the scan is linear.
    let mut best: Option<(usize, usize)> = None;
    let mut j = 0usize;
    for i in 0..n {
        if j < i {
            j = i;
        }
        // Small slack keeps spans exactly at tolerance out.
        while j + 1 < n && sorted[j + 1] - sorted[i] + 1e-9 <= cfg.tolerance {
            j += 1;
        }
        let len = j - i + 1;
        if len >= min_len {
            let is_better = match best {
                Some((bi, bj)) => len > bj - bi + 1,
                None => true,
            };
            if is_better {
                best = Some((i, j));
            }
        }
    }

    let degenerate = (n as f32) < cfg.tolerance || best.is_none();
    let (best_fit, score) = if degenerate {
        trace!("vote: no consensus among {} samples, median fallback", n);
        (median(&sorted), 0.0)
    } else {
        let (i, j) = best.unwrap();
        (mean(&sorted[i..=j]), (j - i + 1) as f32 / n as f32)
    };

    let residual = sorted.iter().map(|v| (v - best_fit).abs()).sum::<f32>() / n as f32;

    VoteResult {
        best_fit,
        score,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cfg(tolerance: f32) -> VoteConfig {
        VoteConfig::default().with_tolerance(tolerance)
    }

    #[test]
    fn test_clean_cluster_high_score() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<f32> = (0..100).map(|_| 50.0 + rng.gen_range(-1.0..1.0)).collect();

        let result = vote(&samples, &cfg(5.0));
        assert!(result.score >= 0.9, "score {} too low", result.score);
        assert!((result.best_fit - 50.0).abs() < 1.0);
        assert!(result.residual < 1.0);
    }

    #[test]
    fn test_two_separated_clusters_pick_one() {
        // Equal-size clusters far apart: one must win outright.
        let mut samples = Vec::new();
        for i in 0..50 {
            samples.push(10.0 + 0.01 * i as f32);
            samples.push(500.0 + 0.01 * i as f32);
        }

        let result = vote(&samples, &cfg(5.0));
        assert_relative_eq!(result.score, 0.5, epsilon = 0.01);
        // The winner is a cluster, not the global mean (~255).
        assert!((result.best_fit - 255.0).abs() > 100.0);
        assert!((result.best_fit - 10.0).abs() < 2.0 || (result.best_fit - 500.0).abs() < 2.0);
    }

    #[test]
    fn test_cluster_tie_prefers_lower_values() {
        // Two identical clusters: scan order makes the lower one win.
        let samples = [10.0, 10.1, 10.2, 50.0, 50.1, 50.2];
        let result = vote(&samples, &cfg(1.0));
        assert!((result.best_fit - 10.1).abs() < 0.1);
    }

    #[test]
    fn test_too_few_samples_falls_back_to_median() {
        let samples = [7.0, 3.0, 5.0];
        let result = vote(&samples, &cfg(5.0));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.best_fit, 5.0);
    }

    #[test]
    fn test_no_valid_span_falls_back_to_median() {
        // Every pair is farther apart than the tolerance.
        let samples: Vec<f32> = (0..10).map(|i| 100.0 * i as f32).collect();
        let result = vote(&samples, &cfg(3.0));
        assert_eq!(result.score, 0.0);
        assert_relative_eq!(result.best_fit, 450.0);
    }

    #[test]
    fn test_residual_is_mean_absolute_deviation() {
        let samples = [50.0, 50.0, 50.0, 60.0];
        let result = vote(&samples, &cfg(3.0));
        assert_relative_eq!(result.best_fit, 50.0);
        assert_relative_eq!(result.residual, 2.5);
    }

    #[test]
    fn test_deterministic() {
        let samples = [4.0, 2.0, 8.0, 2.5, 3.0, 9.0, 2.2];
        let a = vote(&samples, &cfg(2.0));
        let b = vote(&samples, &cfg(2.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input() {
        let result = vote(&[], &cfg(3.0));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.best_fit, 0.0);
    }
}
