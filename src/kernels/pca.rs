// In: src/kernels/pca.rs

//! This module contains the pure, stateless kernel for fitting and applying
//! a principal-component basis to a grayscale image matrix.
//!
//! The convention for the whole pipeline is fixed here: rows are samples and
//! columns are features. For an `(height, width)` image the covariance matrix
//! is therefore `width x width` and explained variance is measured across
//! image columns.
//!
//! The data matrix lives in `ndarray`; the symmetric eigendecomposition of
//! the covariance matrix is delegated to `nalgebra::SymmetricEigen`.
//! Eigenpairs are sorted by descending eigenvalue with the original index as
//! a tie-breaker, so identical inputs always produce identical bases.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{s, Array1, Array2, Axis};

use crate::config::Fidelity;
use crate::error::EigenpressError;

//==================================================================================
// 1. The Fitted Basis
//==================================================================================

/// A principal-component basis fitted to one image.
///
/// Holds the per-column mean, the full set of eigenvectors (as matrix
/// columns, ordered by descending eigenvalue) and the explained-variance
/// ratio of each component. Truncation to `k` components happens at
/// projection time, so a single fit can serve several fidelity choices.
#[derive(Debug, Clone)]
pub struct PcaBasis {
    mean: Array1<f64>,
    components: Array2<f64>,
    explained_variance_ratio: Vec<f64>,
}

impl PcaBasis {
    /// Fits the basis: center, column covariance, symmetric eigendecomposition.
    ///
    /// # Errors
    /// Returns `EigenpressError::InvalidInput` for an empty matrix.
    pub fn fit(data: &Array2<f64>) -> Result<Self, EigenpressError> {
        let (n_samples, n_features) = data.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(EigenpressError::InvalidInput(format!(
                "cannot fit a basis on an empty {n_samples}x{n_features} matrix"
            )));
        }

        let mean = data.mean_axis(Axis(0)).ok_or_else(|| {
            EigenpressError::InternalError("mean of a non-empty axis was undefined".to_string())
        })?;
        let centered = data - &mean;

        // Sample covariance; a single-row image degenerates to a zero matrix.
        let denom = n_samples.saturating_sub(1).max(1) as f64;
        let covariance = centered.t().dot(&centered) / denom;

        // Column-major fill order is irrelevant for a symmetric matrix.
        let covariance =
            DMatrix::from_iterator(n_features, n_features, covariance.iter().cloned());
        let eigen = SymmetricEigen::new(covariance);

        let mut order: Vec<usize> = (0..n_features).collect();
        order.sort_by(|&a, &b| {
            eigen.eigenvalues[b]
                .partial_cmp(&eigen.eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        // Tiny negative eigenvalues are numerical noise on a PSD matrix.
        let total: f64 = eigen.eigenvalues.iter().map(|ev| ev.max(0.0)).sum();
        let explained_variance_ratio: Vec<f64> = order
            .iter()
            .map(|&i| {
                if total > 0.0 {
                    eigen.eigenvalues[i].max(0.0) / total
                } else {
                    0.0
                }
            })
            .collect();

        let components =
            Array2::from_shape_fn((n_features, n_features), |(i, j)| {
                eigen.eigenvectors[(i, order[j])]
            });

        Ok(PcaBasis {
            mean,
            components,
            explained_variance_ratio,
        })
    }

    /// Number of features the basis was fitted on (the image width).
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Per-component explained-variance ratios, descending.
    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }

    /// Cumulative explained-variance ratio of the first `k` components.
    pub fn cumulative_explained(&self, k: usize) -> f64 {
        self.explained_variance_ratio
            .iter()
            .take(k)
            .sum::<f64>()
            .min(1.0)
    }

    /// Resolves a fidelity parameter to a concrete component count.
    ///
    /// The explicit form is returned as-is (the pipeline validates its range
    /// against the image shape beforehand). The fractional form walks the
    /// cumulative explained variance and returns the first count that reaches
    /// the requested fraction; the count is clamped to at least 1, and a
    /// basis with zero total variance resolves to 1 outright.
    pub fn resolve_components(&self, fidelity: &Fidelity) -> usize {
        match *fidelity {
            Fidelity::Components(count) => count,
            Fidelity::VarianceFraction(fraction) => {
                let mut cumulative = 0.0;
                let mut resolved = 0;
                for ratio in &self.explained_variance_ratio {
                    resolved += 1;
                    cumulative += ratio;
                    // Guard against the cumulative sum landing a ULP short.
                    if cumulative + 1e-12 >= fraction {
                        break;
                    }
                }
                if cumulative <= 0.0 {
                    // Zero total variance; one component reproduces a constant image.
                    return 1;
                }
                resolved.max(1)
            }
        }
    }

    /// Projects rows onto the first `k` components.
    ///
    /// # Errors
    /// Returns `EigenpressError::InternalError` if `k` is outside
    /// `[1, n_features]` or the data width disagrees with the fitted basis.
    /// Both are pipeline invariants, not user-facing conditions.
    pub fn project(&self, data: &Array2<f64>, k: usize) -> Result<Array2<f64>, EigenpressError> {
        if k == 0 || k > self.n_features() {
            return Err(EigenpressError::InternalError(format!(
                "projection rank {k} outside [1, {}]",
                self.n_features()
            )));
        }
        if data.ncols() != self.n_features() {
            return Err(EigenpressError::InternalError(format!(
                "data width {} does not match fitted width {}",
                data.ncols(),
                self.n_features()
            )));
        }
        let centered = data - &self.mean;
        Ok(centered.dot(&self.components.slice(s![.., ..k])))
    }

    /// Inverse-projects scores back to the original feature space and
    /// restores the mean. This is where the discarded components are gone
    /// for good.
    pub fn reconstruct(&self, scores: &Array2<f64>) -> Result<Array2<f64>, EigenpressError> {
        let k = scores.ncols();
        if k == 0 || k > self.n_features() {
            return Err(EigenpressError::InternalError(format!(
                "score rank {k} outside [1, {}]",
                self.n_features()
            )));
        }
        let basis = self.components.slice(s![.., ..k]);
        Ok(scores.dot(&basis.t()) + &self.mean)
    }
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
