use std::collections::BTreeMap;

use crate::core::Event;

/// Which event field a distribution is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    User,
    Resource,
}

impl Axis {
    fn key(self, event: &Event) -> u32 {
        match self {
            Axis::User => event.user,
            Axis::Resource => event.resource,
        }
    }
}

/// Tag counts of one user or one resource, with the cached normalizer
/// `Σ exp(count)`.
///
/// The normalizer is kept relative to the largest count, `Σ exp(count - max)`,
/// so weights stay finite however large the counts grow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    counts: BTreeMap<u32, u32>,
    max: u32,
    shifted_denom: f64,
}

impl Distribution {
    /// Build a distribution directly from `(tag, count)` pairs.
    pub fn from_counts<I: IntoIterator<Item = (u32, u32)>>(counts: I) -> Self {
        let mut distribution =
            Distribution { counts: counts.into_iter().collect(), ..Default::default() };
        distribution.update_denom();
        distribution
    }

    fn add(&mut self, tag: u32) {
        *self.counts.entry(tag).or_insert(0) += 1;
    }

    fn update_denom(&mut self) {
        self.max = self.counts.values().copied().max().unwrap_or(0);
        let max = f64::from(self.max);
        self.shifted_denom =
            self.counts.values().map(|&count| (f64::from(count) - max).exp()).sum();
    }

    pub fn count(&self, tag: u32) -> u32 {
        self.counts.get(&tag).copied().unwrap_or(0)
    }

    /// `(tag, count)` in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.counts.iter().map(|(&tag, &count)| (tag, count))
    }

    /// Largest count, 0 for an empty distribution.
    pub fn max_count(&self) -> u32 {
        self.max
    }

    /// `Σ exp(count)`. Overflows to infinity once a count passes ~709;
    /// use [`Distribution::log_denom`] or [`Distribution::weight`] instead.
    pub fn denom(&self) -> f64 {
        f64::from(self.max).exp() * self.shifted_denom
    }

    /// `ln Σ exp(count)`, finite for any counts. Negative infinity when empty.
    pub fn log_denom(&self) -> f64 {
        f64::from(self.max) + self.shifted_denom.ln()
    }

    /// `exp(count) / Σ exp(count)` for a count taken from this distribution.
    pub fn weight_of_count(&self, count: u32) -> f64 {
        (f64::from(count) - f64::from(self.max)).exp() / self.shifted_denom
    }

    /// `exp(count) / denom` for a tag, 0 for tags not in the distribution.
    pub fn weight(&self, tag: u32) -> f64 {
        match self.counts.get(&tag) {
            Some(&count) => self.weight_of_count(count),
            None => 0.0,
        }
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of tag occurrences.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }
}

/// One distribution per ID, dense from 0 to the highest ID seen.
#[derive(Debug, Clone, Default)]
pub struct DistributionTable {
    distributions: Vec<Distribution>,
}

impl DistributionTable {
    /// Count every tag occurrence of `events` under the event's user or
    /// resource. A tag repeated within one event counts every time.
    pub fn build(events: &[Event], axis: Axis) -> Self {
        let mut distributions: Vec<Distribution> = Vec::new();

        for event in events {
            let key = axis.key(event) as usize;
            if key >= distributions.len() {
                distributions.resize_with(key + 1, Distribution::default);
            }
            let distribution = &mut distributions[key];
            for &tag in &event.tags {
                distribution.add(tag);
            }
        }

        for distribution in &mut distributions {
            distribution.update_denom();
        }

        DistributionTable { distributions }
    }

    /// `None` for IDs beyond the trained range.
    pub fn get(&self, id: u32) -> Option<&Distribution> {
        self.distributions.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}
