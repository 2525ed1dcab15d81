//! Bayesian comparison of per-site mutation-count spectra.
//!
//! Given per-site mutation counts for several groups (disease cohorts, or a
//! cohort against an external reference), this crate infers each group's
//! latent per-site mutation proportions under a conjugate
//! Dirichlet-multinomial model, summarizes the Monte-Carlo posteriors, and
//! contrasts groups pairwise:
//!
//! - **Sampling** — Gamma-based Dirichlet posterior simulation
//!   ([`sampler`], [`posterior`])
//! - **Priors** — pooled-empirical and external-reference-weighted policies
//!   ([`prior`])
//! - **Summaries** — per-site mean and 95% central credible interval
//!   ([`summary`])
//! - **Contrasts** — paired difference distributions and significant-site
//!   counts ([`difference`])
//! - **Orchestration** — the full comparison pipeline ([`compare`])
//!
//! # Example
//!
//! ```
//! use sitewise_bayes::compare::{run_comparison, ComparisonConfig};
//! use sitewise_bayes::counts::CountTable;
//! use sitewise_bayes::prior::PriorPolicy;
//!
//! let table = CountTable::new(
//!     vec![12, 13],
//!     vec![
//!         ("melanoma".into(), vec![10, 0]),
//!         ("colorectal".into(), vec![0, 10]),
//!     ],
//! ).unwrap();
//!
//! let config = ComparisonConfig {
//!     n_draws: 10_000,
//!     prior_policy: PriorPolicy::PooledEmpirical,
//!     prior_groups: None,
//!     pairs: vec![("melanoma".into(), "colorectal".into())],
//!     seed: 42,
//! };
//!
//! let results = run_comparison(&table, &config).unwrap();
//! assert_eq!(results.groups.len(), 2);
//! assert_eq!(results.pairs.len(), 1);
//! ```

pub mod compare;
pub mod counts;
pub mod difference;
pub mod posterior;
pub mod prior;
pub mod sampler;
pub mod summary;

pub use compare::{run_comparison, ComparisonConfig, ComparisonResults, GroupSummary, PairSummary};
pub use counts::CountTable;
pub use difference::{count_significant, paired_difference};
pub use posterior::{dirichlet_mean, sample_posterior};
pub use prior::PriorPolicy;
pub use sampler::{sample_dirichlet, sample_gamma, SampleMatrix};
pub use summary::{summarize, SiteSummary};
