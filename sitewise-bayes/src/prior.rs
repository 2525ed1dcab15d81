//! Empirical prior construction policies.
//!
//! Two policies cover the comparison scenarios:
//!
//! - [`PriorPolicy::PooledEmpirical`] — sibling cohorts inform each other:
//!   the shared prior concentration at a site is the sum of observed counts
//!   at that site across the contributing groups.
//! - [`PriorPolicy::ExternalReference`] — a cohort is compared against an
//!   external reference dataset: non-reference groups get the reference's
//!   count distribution rescaled to a fixed total weight, while the
//!   reference's own posterior uses a flat low-information prior.
//!
//! Both `total_weight` and `flat_concentration` are calibration constants
//! chosen relative to sample size, so they are caller-supplied rather than
//! baked in.

use crate::counts::CountTable;
use sitewise_core::{Result, SitewiseError};

/// Which prior-construction rule a comparison uses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriorPolicy {
    /// One shared prior: per-site sums of counts across contributing groups.
    PooledEmpirical,
    /// Reference-weighted priors for cohort groups, flat prior for the
    /// reference group itself.
    ExternalReference {
        /// Name of the reference group column in the count table.
        reference_group: String,
        /// Total prior concentration given to each cohort group (e.g. 35.0).
        total_weight: f64,
        /// Flat per-site concentration for the reference group's own
        /// posterior (e.g. 0.1).
        flat_concentration: f64,
    },
}

/// Shared pooled-empirical prior: per-site count sums across contributors.
///
/// `contributors` restricts which groups feed the pool; `None` pools every
/// group in the table. A site with zero total count across all contributors
/// would leave a zero Dirichlet concentration, so it is rejected with the
/// site named — such rows must be dropped upstream.
///
/// # Errors
///
/// Returns an error on an unknown contributor name, an empty contributor
/// list, or an all-zero site.
pub fn pooled_prior(table: &CountTable, contributors: Option<&[String]>) -> Result<Vec<f64>> {
    let indices: Vec<usize> = match contributors {
        None => (0..table.n_groups()).collect(),
        Some(names) => {
            if names.is_empty() {
                return Err(SitewiseError::InvalidParameter(
                    "pooled_prior: contributor list must be non-empty".into(),
                ));
            }
            names
                .iter()
                .map(|name| {
                    table.index_of(name).ok_or_else(|| {
                        SitewiseError::InvalidParameter(format!(
                            "pooled_prior: unknown contributor group \"{name}\""
                        ))
                    })
                })
                .collect::<Result<_>>()?
        }
    };

    let mut prior = vec![0.0; table.n_sites()];
    for &g in &indices {
        for (slot, &count) in prior.iter_mut().zip(table.counts_at(g)) {
            *slot += count as f64;
        }
    }
    for (i, &total) in prior.iter().enumerate() {
        if total <= 0.0 {
            return Err(SitewiseError::InvalidParameter(format!(
                "pooled_prior: site {} has zero counts in every contributing group",
                table.sites()[i]
            )));
        }
    }
    Ok(prior)
}

/// Reference-weighted prior: reference counts normalized to proportions and
/// rescaled so the concentrations sum to `total_weight`.
///
/// # Errors
///
/// Returns an error if `total_weight` is non-positive or non-finite, or if
/// the reference counts sum to zero.
pub fn reference_prior(reference_counts: &[u64], total_weight: f64) -> Result<Vec<f64>> {
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return Err(SitewiseError::InvalidParameter(format!(
            "reference_prior: total_weight must be positive and finite (got {total_weight})"
        )));
    }
    let total: u64 = reference_counts.iter().sum();
    if total == 0 {
        return Err(SitewiseError::InvalidParameter(
            "reference_prior: reference counts sum to zero".into(),
        ));
    }
    Ok(reference_counts
        .iter()
        .map(|&c| c as f64 / total as f64 * total_weight)
        .collect())
}

/// Flat low-information prior: concentration `c` at every one of `n_sites`
/// sites.
///
/// # Errors
///
/// Returns an error if `c` is non-positive or non-finite.
pub fn flat_prior(n_sites: usize, c: f64) -> Result<Vec<f64>> {
    if !c.is_finite() || c <= 0.0 {
        return Err(SitewiseError::InvalidParameter(format!(
            "flat_prior: concentration must be positive and finite (got {c})"
        )));
    }
    Ok(vec![c; n_sites])
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn table() -> CountTable {
        CountTable::new(
            vec![1, 2],
            vec![
                ("a".into(), vec![10, 0]),
                ("b".into(), vec![0, 10]),
                ("c".into(), vec![5, 5]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn pooled_prior_sums_all_groups() {
        let prior = pooled_prior(&table(), None).unwrap();
        assert_eq!(prior, vec![15.0, 15.0]);
    }

    #[test]
    fn pooled_prior_respects_contributor_subset() {
        let subset = vec!["a".to_string(), "b".to_string()];
        let prior = pooled_prior(&table(), Some(&subset)).unwrap();
        assert_eq!(prior, vec![10.0, 10.0]);
    }

    #[test]
    fn pooled_prior_rejects_all_zero_site() {
        let table = CountTable::new(
            vec![4, 9],
            vec![("a".into(), vec![3, 0]), ("b".into(), vec![2, 0])],
        )
        .unwrap();
        let err = pooled_prior(&table, None).unwrap_err();
        assert!(err.to_string().contains("site 9"), "{err}");
    }

    #[test]
    fn pooled_prior_rejects_unknown_contributor() {
        let subset = vec!["nope".to_string()];
        let err = pooled_prior(&table(), Some(&subset)).unwrap_err();
        assert!(err.to_string().contains("\"nope\""), "{err}");
    }

    #[test]
    fn reference_prior_rescales_to_total_weight() {
        let prior = reference_prior(&[30, 10], 35.0).unwrap();
        assert!((prior[0] - 26.25).abs() < TOL);
        assert!((prior[1] - 8.75).abs() < TOL);
        assert!((prior.iter().sum::<f64>() - 35.0).abs() < TOL);
    }

    #[test]
    fn reference_prior_rejects_bad_inputs() {
        assert!(reference_prior(&[1, 2], 0.0).is_err());
        assert!(reference_prior(&[0, 0], 35.0).is_err());
    }

    #[test]
    fn flat_prior_fills_and_validates() {
        assert_eq!(flat_prior(3, 0.1).unwrap(), vec![0.1, 0.1, 0.1]);
        assert!(flat_prior(3, 0.0).is_err());
        assert!(flat_prior(3, f64::INFINITY).is_err());
    }
}
