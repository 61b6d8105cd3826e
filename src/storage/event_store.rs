use std::collections::{HashMap, HashSet};
use std::ops::RangeFrom;

use crate::core::Event;

/// Ordered, append-only sequence of encoded events.
///
/// The leading part of the store is the training set, the trailing part the
/// test set; the split point is chosen by the caller.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event after all existing ones.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The first `n` events (training slice). `n` is clamped to the length.
    pub fn prefix(&self, n: usize) -> &[Event] {
        &self.events[..n.min(self.events.len())]
    }

    /// Events from position `n` onwards (test slice).
    pub fn suffix_from(&self, n: usize) -> &[Event] {
        &self.events[n.min(self.events.len())..]
    }

    /// Keep only the events in `range`, dropping everything before it.
    pub fn retain_range(&mut self, range: RangeFrom<usize>) {
        let start = range.start.min(self.events.len());
        self.events.drain(..start);
    }

    /// Number of tag assignments in the first `count_limit` events (all if 0).
    pub fn total_tag_assignments(&self, count_limit: usize) -> usize {
        let limit = if count_limit == 0 { self.events.len() } else { count_limit };
        self.events.iter().take(limit).map(|e| e.tags.len()).sum()
    }

    /// Distinct users of the test slice, in first-seen order.
    pub fn unique_users_from(&self, train_size: usize) -> Vec<u32> {
        let mut seen = HashSet::new();
        self.suffix_from(train_size).iter().map(|e| e.user).filter(|u| seen.insert(*u)).collect()
    }

    /// Resources each test user tagged within the test slice.
    pub fn resources_of_users_from(&self, train_size: usize) -> HashMap<u32, Vec<u32>> {
        let mut resources: HashMap<u32, Vec<u32>> = HashMap::new();
        for event in self.suffix_from(train_size) {
            resources.entry(event.user).or_default().push(event.resource);
        }
        resources
    }
}

impl Extend<Event> for EventStore {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}
