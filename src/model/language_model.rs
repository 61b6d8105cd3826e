//! Blended user/resource language model.
//!
//! A candidate tag `t` for user `u` and resource `r` scores
//!
//! ```text
//! beta * exp(c_u(t)) / Σ exp(c_u) + (1 - beta) * exp(c_r(t)) / Σ exp(c_r)
//! ```
//!
//! where `c_u` and `c_r` are the tag counts of the user and the resource in
//! the training events.

use std::collections::HashMap;

use crate::config::ModelConfig;
use crate::core::Event;
use crate::model::distribution::{Axis, Distribution, DistributionTable};

/// Scored tags, either in accumulation order or ranked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedList {
    entries: Vec<(u32, f64)>,
}

impl RankedList {
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Tag IDs in list order.
    pub fn tag_ids(&self) -> Vec<u32> {
        self.entries.iter().map(|&(tag, _)| tag).collect()
    }

    pub fn score(&self, tag: u32) -> Option<f64> {
        self.entries.iter().find(|(t, _)| *t == tag).map(|&(_, score)| score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort by descending score, ties by ascending tag ID, and keep `top_k`.
    pub fn into_top_k(mut self, top_k: usize) -> Self {
        self.entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        self.entries.truncate(top_k);
        self
    }
}

/// Accumulates weighted contributions per tag, remembering first-seen order.
#[derive(Default)]
struct ScoreAccumulator {
    entries: Vec<(u32, f64)>,
    positions: HashMap<u32, usize>,
}

impl ScoreAccumulator {
    fn add_distribution(&mut self, distribution: &Distribution, weight: f64) {
        for (tag, count) in distribution.iter() {
            let value = weight * distribution.weight_of_count(count);
            match self.positions.get(&tag) {
                Some(&position) => self.entries[position].1 += value,
                None => {
                    self.positions.insert(tag, self.entries.len());
                    self.entries.push((tag, value));
                }
            }
        }
    }

    fn finish(self) -> RankedList {
        RankedList { entries: self.entries }
    }
}

/// Trained model. Immutable once built, so scoring only needs `&self`.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    blend: f64,
    top_k: usize,
    sorting: bool,
    users: Option<DistributionTable>,
    resources: Option<DistributionTable>,
}

impl LanguageModel {
    /// Build the enabled distribution tables from the training events.
    pub fn train(events: &[Event], config: &ModelConfig) -> Self {
        let users = config.user_based.then(|| DistributionTable::build(events, Axis::User));
        let resources = config.res_based.then(|| DistributionTable::build(events, Axis::Resource));

        log::debug!(
            "Trained language model on {} events ({} user, {} resource distributions)",
            events.len(),
            users.as_ref().map_or(0, DistributionTable::len),
            resources.as_ref().map_or(0, DistributionTable::len)
        );

        LanguageModel {
            blend: config.blend(),
            top_k: config.top_k,
            sorting: config.sorting,
            users,
            resources,
        }
    }

    pub fn blend(&self) -> f64 {
        self.blend
    }

    pub fn user_distributions(&self) -> Option<&DistributionTable> {
        self.users.as_ref()
    }

    pub fn resource_distributions(&self) -> Option<&DistributionTable> {
        self.resources.as_ref()
    }

    /// Unranked scores: user contributions first, then resource
    /// contributions summed into them. Unknown IDs contribute nothing.
    pub fn score(&self, user: u32, resource: u32) -> RankedList {
        let mut accumulator = ScoreAccumulator::default();

        if let Some(distribution) = self.users.as_ref().and_then(|table| table.get(user)) {
            accumulator.add_distribution(distribution, self.blend);
        }
        if let Some(distribution) = self.resources.as_ref().and_then(|table| table.get(resource)) {
            accumulator.add_distribution(distribution, 1.0 - self.blend);
        }

        accumulator.finish()
    }

    /// Scores ranked and truncated to `top_k`, or the raw score list when
    /// sorting is disabled.
    pub fn predict(&self, user: u32, resource: u32) -> RankedList {
        let scores = self.score(user, resource);
        if self.sorting {
            scores.into_top_k(self.top_k)
        } else {
            scores
        }
    }
}
