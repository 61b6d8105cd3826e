//! Tagging log parsing
//!
//! - **record_parser** - splits and normalizes a single line
//! - **reader** - streams whole logs into interned events

/// Streaming reader with the one-line commit lag
pub mod reader;
/// Line splitting, quote stripping and tag normalization
pub mod record_parser;

pub use reader::{Corpus, CorpusReader};
pub use record_parser::{parse_line, InvalidTimestamp, MalformedRecord, ParsedFields, RatingField};
