//! Encoding of tagging events against the interning tables

use crate::core::{Event, TagAssignment};
use crate::storage::indexing::dictionary::Vocabulary;

impl TagAssignment {
    /// Encode this assignment to an internal Event, interning every string.
    ///
    /// `counting` decides whether the occurrences count towards the table
    /// statistics. IDs are assigned either way.
    pub fn encode(&self, vocabulary: &mut Vocabulary, counting: bool) -> Event {
        let user = vocabulary.users.intern_and_count(self.user.as_str(), counting);
        let resource = vocabulary.resources.intern_and_count(self.resource.as_str(), counting);
        let categories = self
            .categories
            .iter()
            .map(|c| vocabulary.categories.intern_and_count(c.as_str(), counting))
            .collect();
        let tags =
            self.tags.iter().map(|t| vocabulary.tags.intern_and_count(t.as_str(), counting)).collect();

        Event {
            user,
            resource,
            timestamp: self.timestamp.clone(),
            rating: self.rating,
            tags,
            categories,
        }
    }
}

impl Event {
    /// Decode this internal Event back to strings.
    pub fn decode(&self, vocabulary: &Vocabulary) -> TagAssignment {
        TagAssignment {
            user: vocabulary.users.resolve(self.user).map_or("UNKNOWN", String::as_str).to_string(),
            resource: vocabulary
                .resources
                .resolve(self.resource)
                .map_or("UNKNOWN", String::as_str)
                .to_string(),
            timestamp: self.timestamp.clone(),
            rating: self.rating,
            tags: vocabulary.tags.resolve_all(&self.tags),
            categories: vocabulary.categories.resolve_all(&self.categories),
        }
    }
}
