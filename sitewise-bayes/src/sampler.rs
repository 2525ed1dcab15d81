//! Gamma and Dirichlet Monte-Carlo sampling primitives.
//!
//! A Dirichlet(α₁, ..., αL) draw is L independent Gamma(αᵢ, 1) variates
//! normalized by their sum. [`sample_gamma`] is the underlying primitive;
//! [`sample_dirichlet`] stacks `n_draws` such draws into a [`SampleMatrix`].
//!
//! The caller owns the random generator, so determinism is a matter of
//! seeding: the same generator state and call sequence reproduce the same
//! matrix bit for bit.

use rand::Rng;
use rand_distr::{Distribution, Gamma};
use sitewise_core::{Result, SitewiseError};

// ── Sample matrix ──────────────────────────────────────────────────────────

/// An `n_draws × n_sites` matrix of Monte-Carlo draws, stored row-major.
///
/// Each row of a posterior matrix is one probability vector over sites
/// (entries in [0, 1], summing to 1); each row of a difference matrix is one
/// paired per-site difference vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    data: Vec<f64>,
    n_draws: usize,
    n_sites: usize,
}

impl SampleMatrix {
    pub(crate) fn from_parts(data: Vec<f64>, n_draws: usize, n_sites: usize) -> Self {
        debug_assert_eq!(data.len(), n_draws * n_sites);
        Self {
            data,
            n_draws,
            n_sites,
        }
    }

    /// Number of Monte-Carlo draws (rows).
    pub fn n_draws(&self) -> usize {
        self.n_draws
    }

    /// Number of sites (columns).
    pub fn n_sites(&self) -> usize {
        self.n_sites
    }

    /// One draw as a per-site slice.
    pub fn row(&self, draw: usize) -> &[f64] {
        let start = draw * self.n_sites;
        &self.data[start..start + self.n_sites]
    }

    /// Value for a single (draw, site) cell.
    pub fn get(&self, draw: usize, site: usize) -> f64 {
        self.data[draw * self.n_sites + site]
    }

    /// The full row-major backing storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

// ── Gamma sampling ─────────────────────────────────────────────────────────

/// Draw `count` independent Gamma(shape, scale = 1) variates.
///
/// Valid for shapes from well below 1 (near-zero prior weight) up to several
/// thousand (large pooled counts); outputs are always finite and
/// non-negative.
///
/// # Errors
///
/// Returns an error if `shape` is non-positive or non-finite.
pub fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64, count: usize) -> Result<Vec<f64>> {
    if !shape.is_finite() || shape <= 0.0 {
        return Err(SitewiseError::InvalidParameter(format!(
            "sample_gamma: shape must be positive and finite (got {shape})"
        )));
    }
    let gamma = Gamma::new(shape, 1.0)
        .map_err(|e| SitewiseError::InvalidParameter(format!("sample_gamma: {e}")))?;
    Ok((0..count).map(|_| gamma.sample(rng)).collect())
}

/// Unit-scale Gamma distribution for one site's concentration entry.
fn gamma_dist(shape: f64, site: usize) -> Result<Gamma<f64>> {
    if !shape.is_finite() || shape <= 0.0 {
        return Err(SitewiseError::InvalidParameter(format!(
            "concentration at site index {site} must be positive and finite (got {shape})"
        )));
    }
    Gamma::new(shape, 1.0).map_err(|e| {
        SitewiseError::InvalidParameter(format!("concentration at site index {site}: {e}"))
    })
}

// ── Dirichlet sampling ─────────────────────────────────────────────────────

/// Draw `n_draws` independent samples from Dirichlet(`concentration`).
///
/// Row k is built from L independent Gamma(concentration[i], 1) variates
/// divided by their sum, so every row sums to 1 and every entry lies in
/// [0, 1].
///
/// # Errors
///
/// Returns an error if `n_draws` is zero, fewer than two concentration
/// entries are given, or any entry is non-positive or non-finite (the
/// offending index is named).
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256PlusPlus;
/// use sitewise_bayes::sampler::sample_dirichlet;
///
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
/// let matrix = sample_dirichlet(&mut rng, &[2.0, 3.0, 5.0], 100).unwrap();
/// assert_eq!(matrix.n_draws(), 100);
/// assert!((matrix.row(0).iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
pub fn sample_dirichlet<R: Rng + ?Sized>(
    rng: &mut R,
    concentration: &[f64],
    n_draws: usize,
) -> Result<SampleMatrix> {
    if n_draws == 0 {
        return Err(SitewiseError::InvalidParameter(
            "sample_dirichlet: n_draws must be > 0".into(),
        ));
    }
    if concentration.len() < 2 {
        return Err(SitewiseError::InvalidParameter(format!(
            "sample_dirichlet: need at least 2 sites (got {})",
            concentration.len()
        )));
    }
    let dists = concentration
        .iter()
        .enumerate()
        .map(|(i, &a)| gamma_dist(a, i))
        .collect::<Result<Vec<_>>>()?;

    let l = concentration.len();
    let mut data = vec![0.0; n_draws * l];
    for row in data.chunks_exact_mut(l) {
        let mut total = 0.0;
        for (slot, dist) in row.iter_mut().zip(&dists) {
            // Gamma draws at very small shapes can underflow to exactly
            // zero; the floor keeps every row normalizable.
            let g = dist.sample(rng).max(1e-300);
            *slot = g;
            total += g;
        }
        for slot in row.iter_mut() {
            *slot /= total;
        }
    }
    Ok(SampleMatrix::from_parts(data, n_draws, l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng(seed: u64) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    }

    #[test]
    fn gamma_draws_finite_across_shape_range() {
        for &shape in &[0.1, 1.0, 35.0, 4000.0] {
            let draws = sample_gamma(&mut rng(1), shape, 500).unwrap();
            assert_eq!(draws.len(), 500);
            for &d in &draws {
                assert!(d.is_finite() && d >= 0.0, "shape {shape} gave {d}");
            }
        }
    }

    #[test]
    fn gamma_rejects_bad_shape() {
        assert!(sample_gamma(&mut rng(1), 0.0, 10).is_err());
        assert!(sample_gamma(&mut rng(1), -1.0, 10).is_err());
        assert!(sample_gamma(&mut rng(1), f64::NAN, 10).is_err());
    }

    #[test]
    fn dirichlet_rows_are_probability_vectors() {
        let matrix = sample_dirichlet(&mut rng(2), &[0.1, 5.0, 2000.0], 1000).unwrap();
        for k in 0..matrix.n_draws() {
            let row = matrix.row(k);
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "row {k} sums to {sum}");
            for &p in row {
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn dirichlet_rejects_non_positive_entry() {
        let err = sample_dirichlet(&mut rng(3), &[1.0, 0.0, 2.0], 10).unwrap_err();
        assert!(err.to_string().contains("index 1"), "{err}");
    }

    #[test]
    fn dirichlet_rejects_degenerate_dimensions() {
        assert!(sample_dirichlet(&mut rng(3), &[1.0, 2.0], 0).is_err());
        assert!(sample_dirichlet(&mut rng(3), &[1.0], 10).is_err());
    }

    #[test]
    fn same_seed_reproduces_matrix() {
        let a = sample_dirichlet(&mut rng(9), &[3.0, 1.0, 7.0], 200).unwrap();
        let b = sample_dirichlet(&mut rng(9), &[3.0, 1.0, 7.0], 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn concentration_governs_expected_proportions() {
        // Dirichlet([8, 2]) has mean (0.8, 0.2).
        let matrix = sample_dirichlet(&mut rng(4), &[8.0, 2.0], 50_000).unwrap();
        let mean0: f64 =
            (0..matrix.n_draws()).map(|k| matrix.get(k, 0)).sum::<f64>() / 50_000.0;
        assert!((mean0 - 0.8).abs() < 0.01, "mean {mean0}");
    }
}
