//! Posterior summary statistics.
//!
//! Reduces an `n_draws × n_sites` [`SampleMatrix`] to one [`SiteSummary`] per
//! site: arithmetic mean plus the empirical 2.5th and 97.5th percentiles (a
//! 95% central credible interval). Percentiles use linear interpolation
//! between order statistics at position `(N − 1) · p`, so identical inputs
//! always produce bit-identical summaries.

use crate::sampler::SampleMatrix;
use sitewise_core::{Result, SitewiseError};

/// Posterior summary for one site: mean and 95% central credible interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteSummary {
    /// Site identifier (e.g. codon position).
    pub site: u32,
    /// Posterior mean.
    pub mean: f64,
    /// 2.5th percentile of the posterior draws.
    pub q025: f64,
    /// 97.5th percentile of the posterior draws.
    pub q975: f64,
}

impl SiteSummary {
    /// Whether the credible interval strictly excludes zero on either side.
    pub fn excludes_zero(&self) -> bool {
        self.q025 > 0.0 || self.q975 < 0.0
    }
}

/// Summarize each column of `matrix`, attaching the corresponding site id.
///
/// The input matrix is not mutated.
///
/// # Errors
///
/// Returns an error if `sites.len()` differs from the matrix's site count.
pub fn summarize(matrix: &SampleMatrix, sites: &[u32]) -> Result<Vec<SiteSummary>> {
    if sites.len() != matrix.n_sites() {
        return Err(SitewiseError::ShapeMismatch(format!(
            "summarize: {} site ids for a matrix with {} sites",
            sites.len(),
            matrix.n_sites()
        )));
    }

    let n = matrix.n_draws();
    let mut column = vec![0.0; n];
    let mut summaries = Vec::with_capacity(sites.len());
    for (i, &site) in sites.iter().enumerate() {
        for (k, slot) in column.iter_mut().enumerate() {
            *slot = matrix.get(k, i);
        }
        let mean = column.iter().sum::<f64>() / n as f64;
        column.sort_by(|a, b| a.total_cmp(b));
        summaries.push(SiteSummary {
            site,
            mean,
            q025: quantile_sorted(&column, 0.025),
            q975: quantile_sorted(&column, 0.975),
        });
    }
    Ok(summaries)
}

/// Quantile of a pre-sorted slice by linear interpolation between the order
/// statistics bracketing position `q * (n - 1)`.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = lo + 1;
    let frac = pos - lo as f64;
    if hi >= n {
        sorted[n - 1]
    } else {
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::sample_dirichlet;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    const TOL: f64 = 1e-12;

    fn constant_matrix(row: &[f64], n_draws: usize) -> SampleMatrix {
        let data: Vec<f64> = row
            .iter()
            .copied()
            .cycle()
            .take(n_draws * row.len())
            .collect();
        SampleMatrix::from_parts(data, n_draws, row.len())
    }

    #[test]
    fn identical_rows_collapse_interval() {
        let matrix = constant_matrix(&[0.2, 0.3, 0.5], 100);
        let rows = summarize(&matrix, &[1, 2, 3]).unwrap();
        for (row, &expected) in rows.iter().zip(&[0.2, 0.3, 0.5]) {
            assert!((row.mean - expected).abs() < TOL);
            assert!((row.q025 - expected).abs() < TOL);
            assert!((row.q975 - expected).abs() < TOL);
        }
    }

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        // 5 values: position for q = 0.025 is 0.1, between 1.0 and 2.0.
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((quantile_sorted(&sorted, 0.025) - 1.1).abs() < TOL);
        assert!((quantile_sorted(&sorted, 0.975) - 4.9).abs() < TOL);
        assert!((quantile_sorted(&sorted, 0.5) - 3.0).abs() < TOL);
        assert!((quantile_sorted(&sorted, 1.0) - 5.0).abs() < TOL);
    }

    #[test]
    fn interval_brackets_mean_for_posterior_draws() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let matrix = sample_dirichlet(&mut rng, &[4.0, 6.0, 10.0], 20_000).unwrap();
        for row in summarize(&matrix, &[1, 2, 3]).unwrap() {
            assert!(row.q025 <= row.mean && row.mean <= row.q975, "{row:?}");
            assert!(row.q025 < row.q975);
        }
    }

    #[test]
    fn rejects_site_id_mismatch() {
        let matrix = constant_matrix(&[0.5, 0.5], 10);
        let err = summarize(&matrix, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, SitewiseError::ShapeMismatch(_)));
    }

    #[test]
    fn excludes_zero_predicate() {
        let positive = SiteSummary {
            site: 1,
            mean: 0.2,
            q025: 0.1,
            q975: 0.3,
        };
        let straddling = SiteSummary {
            site: 2,
            mean: 0.0,
            q025: -0.1,
            q975: 0.1,
        };
        let negative = SiteSummary {
            site: 3,
            mean: -0.2,
            q025: -0.3,
            q975: -0.1,
        };
        assert!(positive.excludes_zero());
        assert!(!straddling.excludes_zero());
        assert!(negative.excludes_zero());
    }
}
