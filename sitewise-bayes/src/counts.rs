//! Per-site mutation-count input tables.
//!
//! A [`CountTable`] is the immutable in-memory handoff point between an
//! external loader and the inference pipeline: one shared site column and one
//! named non-negative count column per group. Loading, parsing, and dropping
//! of all-zero rows happen upstream; this type only enforces structural
//! consistency.

use sitewise_core::{Result, SitewiseError};

/// Per-site mutation counts for a set of named groups over a shared site set.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountTable {
    sites: Vec<u32>,
    groups: Vec<(String, Vec<u64>)>,
}

impl CountTable {
    /// Build a table from a site column and one `(name, counts)` column per
    /// group.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two sites or no groups are given, if a
    /// site identifier or group name repeats, or if any count column's length
    /// differs from the site column's.
    pub fn new(sites: Vec<u32>, groups: Vec<(String, Vec<u64>)>) -> Result<Self> {
        if sites.len() < 2 {
            return Err(SitewiseError::InputData(format!(
                "CountTable: need at least 2 sites (got {})",
                sites.len()
            )));
        }
        if groups.is_empty() {
            return Err(SitewiseError::InputData(
                "CountTable: need at least one group".into(),
            ));
        }
        for (i, site) in sites.iter().enumerate() {
            if sites[..i].contains(site) {
                return Err(SitewiseError::InputData(format!(
                    "CountTable: duplicate site {site}"
                )));
            }
        }
        for (g, (name, counts)) in groups.iter().enumerate() {
            if name.is_empty() {
                return Err(SitewiseError::InputData(
                    "CountTable: group name must be non-empty".into(),
                ));
            }
            if groups[..g].iter().any(|(other, _)| other == name) {
                return Err(SitewiseError::InputData(format!(
                    "CountTable: duplicate group \"{name}\""
                )));
            }
            if counts.len() != sites.len() {
                return Err(SitewiseError::ShapeMismatch(format!(
                    "CountTable: group \"{}\" has {} counts, expected {}",
                    name,
                    counts.len(),
                    sites.len()
                )));
            }
        }
        Ok(Self { sites, groups })
    }

    /// Number of sites (L).
    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    /// Number of groups.
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// The shared site column.
    pub fn sites(&self) -> &[u32] {
        &self.sites
    }

    /// Group names, in column order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    /// Count column for a group, by name.
    pub fn counts(&self, group: &str) -> Option<&[u64]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, counts)| counts.as_slice())
    }

    /// Column position of a group, by name.
    pub fn index_of(&self, group: &str) -> Option<usize> {
        self.groups.iter().position(|(name, _)| name == group)
    }

    /// Count column at a given position.
    pub fn counts_at(&self, index: usize) -> &[u64] {
        &self.groups[index].1
    }

    /// Group name at a given position.
    pub fn name_at(&self, index: usize) -> &str {
        &self.groups[index].0
    }
}
