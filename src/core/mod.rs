//! Core data structures and types for tagrec

use serde::{Deserialize, Serialize};

/// Internal tagging event with dictionary-encoded IDs.
/// Users, resources, tags and categories each live in their own ID space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub user: u32,
    pub resource: u32,
    /// Numeric string, or empty when the log had no timestamp
    pub timestamp: String,
    pub rating: Option<f64>,
    /// Input order, duplicates kept
    pub tags: Vec<u32>,
    pub categories: Vec<u32>,
}

/// User-facing tagging event with the original strings.
#[derive(Debug, Clone, PartialEq)]
pub struct TagAssignment {
    pub user: String,
    pub resource: String,
    pub timestamp: String,
    pub rating: Option<f64>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

/// Implement methods for TagAssignment struct.
impl TagAssignment {
    pub fn new(user: &str, resource: &str, timestamp: &str, tags: &[&str]) -> Self {
        Self {
            user: user.to_string(),
            resource: resource.to_string(),
            timestamp: timestamp.to_string(),
            rating: None,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| (*c).to_string()).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

impl Event {
    /// Timestamp as a number, `None` when the log had none.
    pub fn timestamp_value(&self) -> Option<u64> {
        self.timestamp.parse().ok()
    }
}

pub mod encoding;
pub use encoding::*;
