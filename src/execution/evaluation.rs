use std::fmt;
use std::time::{Duration, Instant};

use crate::config::ModelConfig;
use crate::core::Event;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use crate::model::{LanguageModel, RankedList};

/// Wall-clock cost of one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationTiming {
    pub training: Duration,
    pub testing: Duration,
    pub test_items: usize,
}

impl EvaluationTiming {
    /// Average scoring time per test event in milliseconds, 0 without test events.
    pub fn average_test_ms(&self) -> f64 {
        if self.test_items == 0 {
            0.0
        } else {
            self.testing.as_secs_f64() * 1000.0 / self.test_items as f64
        }
    }

    pub fn total(&self) -> Duration {
        self.training + self.testing
    }
}

impl fmt::Display for EvaluationTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Full training time: {}", self.training.as_millis())?;
        writeln!(f, "Full test time: {}", self.testing.as_millis())?;
        writeln!(f, "Average test time: {}", self.average_test_ms())?;
        write!(f, "Total time: {}", self.total().as_millis())
    }
}

/// Result of scoring every test event.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Number of leading events the model was trained on
    pub trained_on: usize,
    /// Index of the first test event
    pub test_start: usize,
    /// One ranked list per test event, in event order
    pub predictions: Vec<RankedList>,
    pub timing: EvaluationTiming,
}

impl Evaluation {
    /// Tag IDs of every prediction in rank order.
    pub fn prediction_ids(&self) -> Vec<Vec<u32>> {
        self.predictions.iter().map(RankedList::tag_ids).collect()
    }
}

/// Train on all but the last `sample_size` events and score the rest.
///
/// With a sample size of 0 the model is trained on the whole corpus and the
/// whole corpus is scored as well.
pub fn run_evaluation(
    events: &[Event],
    config: &ModelConfig,
    sink: &dyn DiagnosticSink,
) -> Result<Evaluation> {
    config.validate()?;

    let total = events.len();
    if config.sample_size > total {
        return Err(Error::Config(format!(
            "sample size {} exceeds the {} available events",
            config.sample_size, total
        )));
    }
    let trained_on = total - config.sample_size;

    let start = Instant::now();
    let model = LanguageModel::train(&events[..trained_on], config);
    let training = start.elapsed();

    let test_start = if trained_on == total { 0 } else { trained_on };

    let start = Instant::now();
    let predictions: Vec<RankedList> =
        events[test_start..].iter().map(|event| model.predict(event.user, event.resource)).collect();
    let testing = start.elapsed();

    let timing = EvaluationTiming { training, testing, test_items: predictions.len() };
    sink.report(Diagnostic::Timing(timing.clone()));

    Ok(Evaluation { trained_on, test_start, predictions, timing })
}
