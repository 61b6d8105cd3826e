//! Evaluation Module
//!
//! # Components
//!
//! - **run_evaluation** - trains on the leading events and scores the held-out suffix
//! - **predict_sample** - reads a log, evaluates it and keeps only the test events
//! - **prediction_writer** - writes predictions and timing reports to disk
//!
//! # Example
//!
//! ```ignore
//! use tagrec::diagnostics::LogSink;
//! use tagrec::execution::{predict_sample, prediction_writer};
//!
//! let run = predict_sample(Path::new("data/csv/wiki.txt"), &config, &LogSink)?;
//! prediction_writer::write_run(&run, Path::new("data/results"))?;
//! ```

pub mod evaluation;
pub mod predict;
pub mod prediction_writer;

// Re-export main types for convenience
pub use evaluation::{run_evaluation, Evaluation, EvaluationTiming};
pub use predict::{predict_sample, PredictionRun};
