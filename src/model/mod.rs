//! Language model over user and resource tag distributions
//!
//! # Components
//!
//! - **DistributionTable** - per-user or per-resource tag counts with cached normalizers
//! - **LanguageModel** - blends both distributions and ranks candidate tags

pub mod distribution;
pub mod language_model;

pub use distribution::{Axis, Distribution, DistributionTable};
pub use language_model::{LanguageModel, RankedList};
