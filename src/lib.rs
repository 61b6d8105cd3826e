//! # tagrec
//!
//! tagrec predicts tags for (user, resource) pairs from a collaborative tagging
//! log. Every user and every resource gets a tag-frequency distribution built
//! from the training part of the log, and candidate tags are scored by a
//! blend of both distributions weighted with `exp(count)`.
//!
//! ## Features
//!
//! - Streaming ingestion of `";"`-delimited tagging logs
//! - Dense interning of users, resources, tags and categories with counters
//! - Per-user and per-resource language model with top-K ranking
//! - Train/test evaluation with timing reports
//!
//! ## Example
//!
//! ```rust
//! use tagrec::diagnostics::CollectingSink;
//! use tagrec::model::LanguageModel;
//! use tagrec::parsing::CorpusReader;
//! use tagrec::ModelConfig;
//!
//! fn example() -> tagrec::Result<()> {
//!     let input = "\"u1\";\"r1\";\"100\";\"rust,systems\"\n";
//!     let sink = CollectingSink::new();
//!     let mut reader = CorpusReader::new(0, None);
//!     reader.read_lines(input.as_bytes(), &sink)?;
//!     let corpus = reader.into_corpus();
//!
//!     let model = LanguageModel::train(corpus.store.events(), &ModelConfig::default());
//!     let ranked = model.predict(0, 0);
//!     assert_eq!(ranked.tag_ids(), vec![0, 1]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

/// Core data structures and types
pub mod core;

/// Configuration structures and utilities
pub mod config;

/// Diagnostic reporting for skipped records and run summaries
pub mod diagnostics;

/// Error types and result definitions
pub mod error;

/// Tag normalization through stemming
pub mod stemming;

/// Parsing of raw tagging log records
pub mod parsing;

/// Interning tables and the event store
pub mod storage;

/// Tag distributions and the scoring engine
pub mod model;

/// Train/test evaluation and prediction output
pub mod execution;

// Re-export commonly used types
pub use config::ModelConfig;
pub use error::{Error, Result};

