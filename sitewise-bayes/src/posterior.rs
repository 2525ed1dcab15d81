//! Conjugate posterior construction and sampling.
//!
//! Under the Dirichlet-multinomial model the posterior is available in closed
//! form: observing counts `c₁, ..., cL` turns a Dirichlet(α) prior into
//! Dirichlet(α₁ + c₁, ..., αL + cL). [`sample_posterior`] performs the update
//! and delegates the simulation to [`crate::sampler::sample_dirichlet`].

use crate::sampler::{sample_dirichlet, SampleMatrix};
use rand::Rng;
use sitewise_core::{Result, SitewiseError};

/// Posterior concentration vector: `prior[i] + counts[i]` per site.
///
/// An all-zero count vector is valid — the posterior then equals the prior —
/// as long as the prior itself is strictly positive at every site.
///
/// # Errors
///
/// Returns an error if the vectors differ in length, or if any resulting
/// entry is non-positive or non-finite (the site index is named).
pub fn posterior_concentration(prior: &[f64], counts: &[u64]) -> Result<Vec<f64>> {
    if prior.len() != counts.len() {
        return Err(SitewiseError::ShapeMismatch(format!(
            "posterior_concentration: prior has {} sites, counts have {}",
            prior.len(),
            counts.len()
        )));
    }
    let concentration: Vec<f64> = prior
        .iter()
        .zip(counts)
        .map(|(&a, &c)| a + c as f64)
        .collect();
    for (i, &a) in concentration.iter().enumerate() {
        if !a.is_finite() || a <= 0.0 {
            return Err(SitewiseError::InvalidParameter(format!(
                "posterior_concentration: site index {i} has non-positive concentration {a}"
            )));
        }
    }
    Ok(concentration)
}

/// Draw `n_draws` samples from the posterior `Dirichlet(prior + counts)`.
///
/// # Errors
///
/// Propagates [`posterior_concentration`] and
/// [`crate::sampler::sample_dirichlet`] failures.
pub fn sample_posterior<R: Rng + ?Sized>(
    rng: &mut R,
    prior: &[f64],
    counts: &[u64],
    n_draws: usize,
) -> Result<SampleMatrix> {
    let concentration = posterior_concentration(prior, counts)?;
    sample_dirichlet(rng, &concentration, n_draws)
}

/// Analytic Dirichlet mean `E[Xᵢ] = αᵢ / Σα` for a concentration vector.
///
/// Useful as a closed-form check against the Monte-Carlo posterior mean.
pub fn dirichlet_mean(concentration: &[f64]) -> Vec<f64> {
    let sum: f64 = concentration.iter().sum();
    concentration.iter().map(|&a| a / sum).collect()
}
