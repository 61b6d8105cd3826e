//! Run configuration for ingestion and the language model

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of tags returned per prediction when not configured otherwise
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Options recognized by the reader, the model and the evaluation driver
pub struct ModelConfig {
    /// How many leading events contribute to the interning counters (0 = all)
    pub count_limit: usize,
    /// Pass tags through the English stemmer before interning
    pub stemming: bool,
    /// Use the user's tag distribution
    pub user_based: bool,
    /// Use the resource's tag distribution
    pub res_based: bool,
    /// Blend weight in tenths: 10 is user-only, 0 is resource-only
    pub beta: u8,
    /// Size of the held-out test suffix
    pub sample_size: usize,
    /// Maximum number of tags per ranked list
    pub top_k: usize,
    /// Sort and truncate predictions; otherwise the raw score map is returned
    pub sorting: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            count_limit: 0,
            stemming: false,
            user_based: true,
            res_based: true,
            beta: 5,
            sample_size: 0,
            top_k: DEFAULT_TOP_K,
            sorting: true,
        }
    }
}

impl ModelConfig {
    /// Weight of the user distribution, `beta / 10`.
    pub fn blend(&self) -> f64 {
        f64::from(self.beta) / 10.0
    }

    /// Reject option combinations the model cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.beta > 10 {
            return Err(Error::Config(format!("beta must be within 0..=10, got {}", self.beta)));
        }
        if self.sorting && self.top_k == 0 {
            return Err(Error::Config("top_k must be positive when sorting".to_string()));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: ModelConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Suffix used for output names, following the `_mp_{u,r,ur}_<beta>` scheme.
    pub fn output_suffix(&self) -> String {
        let mode = if !self.user_based {
            "_mp_r_"
        } else if !self.res_based {
            "_mp_u_"
        } else {
            "_mp_ur_"
        };
        format!("{}{}", mode, self.beta)
    }
}
