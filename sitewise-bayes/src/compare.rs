//! Comparison orchestration: the sole public entry point of the pipeline.
//!
//! [`run_comparison`] runs a fixed linear pipeline over a [`CountTable`]:
//! build priors per the configured policy, sample each group's posterior and
//! summarize it, then contrast each requested ordered pair of groups via
//! paired differences. Any precondition violation aborts the run before any
//! output is produced; partial results are never returned.
//!
//! # Determinism and memory
//!
//! Each group samples from its own `Xoshiro256PlusPlus` stream, derived from
//! the master seed and the group's column position via `long_jump`. Streams
//! are independent, so groups may be sampled in any order (or in parallel
//! with the `parallel` feature) without changing results — and a group's
//! posterior matrix can be regenerated bit-identically on demand. The pair
//! phase exploits this by resampling both members of a pair instead of
//! retaining every group's matrix: at most two N×L matrices are live at any
//! moment, whatever the group count.

use crate::counts::CountTable;
use crate::difference::{count_significant, paired_difference};
use crate::posterior::sample_posterior;
use crate::prior::{flat_prior, pooled_prior, reference_prior, PriorPolicy};
use crate::summary::{summarize, SiteSummary};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sitewise_core::{Annotated, Result, SitewiseError, Summarizable};

// ── Configuration ──────────────────────────────────────────────────────────

/// Configuration for one comparison run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonConfig {
    /// Monte-Carlo draws per group (N).
    pub n_draws: usize,
    /// Prior-construction policy.
    pub prior_policy: PriorPolicy,
    /// Which groups feed the pooled prior (pooled policy only); `None` pools
    /// every group in the table.
    pub prior_groups: Option<Vec<String>>,
    /// Ordered `(first, second)` pairs to contrast; differences are
    /// `first − second`.
    pub pairs: Vec<(String, String)>,
    /// Master seed; together with the group order it fixes every draw.
    pub seed: u64,
}

// ── Result types ───────────────────────────────────────────────────────────

/// Posterior summary table for one group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupSummary {
    /// Group name.
    pub group: String,
    /// Per-site posterior mean and 95% credible interval.
    pub sites: Vec<SiteSummary>,
}

/// Difference summary table for one ordered pair of groups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairSummary {
    /// First group of the ordered pair.
    pub first: String,
    /// Second group of the ordered pair.
    pub second: String,
    /// Per-site summary of the `first − second` difference draws.
    pub sites: Vec<SiteSummary>,
    /// Number of sites whose difference interval strictly excludes zero.
    pub n_significant: usize,
}

/// All durable outputs of one comparison run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResults {
    /// One summary table per group, in table column order.
    pub groups: Vec<GroupSummary>,
    /// One difference table per requested pair, in request order.
    pub pairs: Vec<PairSummary>,
}

impl Annotated for GroupSummary {
    fn name(&self) -> &str {
        &self.group
    }
}

impl Summarizable for GroupSummary {
    fn summary(&self) -> String {
        format!("{}: {} sites", self.group, self.sites.len())
    }
}

impl Summarizable for PairSummary {
    fn summary(&self) -> String {
        format!(
            "{} - {}: {} of {} sites exclude zero",
            self.first,
            self.second,
            self.n_significant,
            self.sites.len()
        )
    }
}

impl Summarizable for ComparisonResults {
    fn summary(&self) -> String {
        format!(
            "{} groups, {} pairs",
            self.groups.len(),
            self.pairs.len()
        )
    }
}

// ── Orchestration ──────────────────────────────────────────────────────────

/// Run a full comparison: per-group posterior summaries plus per-pair
/// difference summaries and significant-site counts.
///
/// # Errors
///
/// Fails the whole run on any precondition violation: zero `n_draws`,
/// unknown group names in pairs, the prior policy, or the pooled-prior
/// scope, a `prior_groups` restriction combined with the external-reference
/// policy, or any prior/posterior construction failure.
///
/// # Example
///
/// ```
/// use sitewise_bayes::compare::{run_comparison, ComparisonConfig};
/// use sitewise_bayes::counts::CountTable;
/// use sitewise_bayes::prior::PriorPolicy;
///
/// let table = CountTable::new(
///     vec![1, 2],
///     vec![("a".into(), vec![8, 2]), ("b".into(), vec![3, 7])],
/// ).unwrap();
/// let config = ComparisonConfig {
///     n_draws: 5_000,
///     prior_policy: PriorPolicy::PooledEmpirical,
///     prior_groups: None,
///     pairs: vec![("a".into(), "b".into())],
///     seed: 1,
/// };
/// let results = run_comparison(&table, &config).unwrap();
/// assert_eq!(results.pairs[0].sites.len(), 2);
/// ```
pub fn run_comparison(table: &CountTable, config: &ComparisonConfig) -> Result<ComparisonResults> {
    if config.n_draws == 0 {
        return Err(SitewiseError::InvalidParameter(
            "run_comparison: n_draws must be > 0".into(),
        ));
    }
    for (first, second) in &config.pairs {
        for name in [first, second] {
            if table.index_of(name).is_none() {
                return Err(SitewiseError::InvalidParameter(format!(
                    "run_comparison: pair references unknown group \"{name}\""
                )));
            }
        }
    }

    let priors = build_priors(table, config)?;

    #[cfg(feature = "parallel")]
    let groups = {
        use rayon::prelude::*;
        (0..table.n_groups())
            .into_par_iter()
            .map(|g| group_summary(table, &priors, config, g))
            .collect::<Result<Vec<_>>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let groups = (0..table.n_groups())
        .map(|g| group_summary(table, &priors, config, g))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let pairs = {
        use rayon::prelude::*;
        config
            .pairs
            .par_iter()
            .map(|pair| pair_summary(table, &priors, config, pair))
            .collect::<Result<Vec<_>>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let pairs = config
        .pairs
        .iter()
        .map(|pair| pair_summary(table, &priors, config, pair))
        .collect::<Result<Vec<_>>>()?;

    Ok(ComparisonResults { groups, pairs })
}

/// One prior concentration vector per group column, per the configured
/// policy.
fn build_priors(table: &CountTable, config: &ComparisonConfig) -> Result<Vec<Vec<f64>>> {
    match &config.prior_policy {
        PriorPolicy::PooledEmpirical => {
            let shared = pooled_prior(table, config.prior_groups.as_deref())?;
            Ok(vec![shared; table.n_groups()])
        }
        PriorPolicy::ExternalReference {
            reference_group,
            total_weight,
            flat_concentration,
        } => {
            if config.prior_groups.is_some() {
                return Err(SitewiseError::InvalidParameter(
                    "run_comparison: prior_groups only applies to the pooled-empirical policy"
                        .into(),
                ));
            }
            let ref_idx = table.index_of(reference_group).ok_or_else(|| {
                SitewiseError::InvalidParameter(format!(
                    "run_comparison: unknown reference group \"{reference_group}\""
                ))
            })?;
            let weighted = reference_prior(table.counts_at(ref_idx), *total_weight)?;
            let flat = flat_prior(table.n_sites(), *flat_concentration)?;
            Ok((0..table.n_groups())
                .map(|g| {
                    if g == ref_idx {
                        flat.clone()
                    } else {
                        weighted.clone()
                    }
                })
                .collect())
        }
    }
}

/// Independent generator for one group: the master stream advanced by
/// `stream` long jumps. Derivation depends only on the seed and the group's
/// column position, so a stream can be recreated at will.
fn stream_rng(seed: u64, stream: usize) -> Xoshiro256PlusPlus {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    for _ in 0..stream {
        rng.long_jump();
    }
    rng
}

/// Sample one group's posterior, summarize it, and drop the matrix.
fn group_summary(
    table: &CountTable,
    priors: &[Vec<f64>],
    config: &ComparisonConfig,
    g: usize,
) -> Result<GroupSummary> {
    let mut rng = stream_rng(config.seed, g);
    let matrix = sample_posterior(&mut rng, &priors[g], table.counts_at(g), config.n_draws)?;
    let sites = summarize(&matrix, table.sites())?;
    Ok(GroupSummary {
        group: table.name_at(g).to_string(),
        sites,
    })
}

/// Contrast one ordered pair: regenerate both posterior matrices from their
/// streams, difference them draw by draw, and summarize.
fn pair_summary(
    table: &CountTable,
    priors: &[Vec<f64>],
    config: &ComparisonConfig,
    pair: &(String, String),
) -> Result<PairSummary> {
    let (first, second) = pair;
    // Pair names were validated up front.
    let ia = table.index_of(first).ok_or_else(|| {
        SitewiseError::InvalidParameter(format!("unknown group \"{first}\""))
    })?;
    let ib = table.index_of(second).ok_or_else(|| {
        SitewiseError::InvalidParameter(format!("unknown group \"{second}\""))
    })?;

    let mut rng_a = stream_rng(config.seed, ia);
    let a = sample_posterior(&mut rng_a, &priors[ia], table.counts_at(ia), config.n_draws)?;
    let mut rng_b = stream_rng(config.seed, ib);
    let b = sample_posterior(&mut rng_b, &priors[ib], table.counts_at(ib), config.n_draws)?;

    let diff = paired_difference(&a, &b)?;
    drop((a, b));
    let sites = summarize(&diff, table.sites())?;
    let n_significant = count_significant(&sites);
    Ok(PairSummary {
        first: first.clone(),
        second: second.clone(),
        sites,
        n_significant,
    })
}
