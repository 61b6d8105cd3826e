pub mod event_store;
pub mod indexing {
    pub mod dictionary;
}

pub use event_store::EventStore;
pub use indexing::dictionary::{InternTable, Vocabulary};
