use std::path::Path;

use crate::config::ModelConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::execution::evaluation::{run_evaluation, EvaluationTiming};
use crate::parsing::CorpusReader;
use crate::storage::{EventStore, Vocabulary};

/// Everything needed to write the predictions of one run.
#[derive(Debug, Clone)]
pub struct PredictionRun {
    /// Output base name, `<input stem><mode suffix><beta>`
    pub name: String,
    pub vocabulary: Vocabulary,
    /// The test events only, aligned with `predictions`
    pub test_events: EventStore,
    /// Tag IDs per test event, best first
    pub predictions: Vec<Vec<u32>>,
    pub timing: EvaluationTiming,
    /// Tag assignments within the counted part of the log
    pub tag_assignments: usize,
}

/// Read `input`, evaluate the language model on its last `sample_size`
/// events and keep only the test events for output.
pub fn predict_sample(
    input: &Path,
    config: &ModelConfig,
    sink: &dyn DiagnosticSink,
) -> Result<PredictionRun> {
    config.validate()?;

    let mut reader = CorpusReader::from_config(config);
    reader.read_file(input, sink)?;
    let corpus = reader.into_corpus();
    log::info!(
        "Read {} events: {} users, {} resources, {} tags, {} categories",
        corpus.store.len(),
        corpus.vocabulary.users.len(),
        corpus.vocabulary.resources.len(),
        corpus.vocabulary.tags.len(),
        corpus.vocabulary.categories.len()
    );

    let evaluation = run_evaluation(corpus.store.events(), config, sink)?;
    let predictions = evaluation.prediction_ids();
    let tag_assignments = corpus.store.total_tag_assignments(config.count_limit);

    let mut test_events = corpus.store;
    test_events.retain_range(evaluation.test_start..);

    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("predictions");
    let name = format!("{}{}", stem, config.output_suffix());

    Ok(PredictionRun {
        name,
        vocabulary: corpus.vocabulary,
        test_events,
        predictions,
        timing: evaluation.timing,
        tag_assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use std::io::Write;

    #[test]
    fn test_predict_sample_keeps_test_events_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "\"u1\";\"r1\";\"1\";\"a,b\"").unwrap();
        writeln!(file, "\"u2\";\"r1\";\"2\";\"b\"").unwrap();
        writeln!(file, "\"u1\";\"r2\";\"3\";\"c\"").unwrap();
        drop(file);

        let sink = CollectingSink::new();
        let config = ModelConfig { sample_size: 1, res_based: false, beta: 10, ..Default::default() };
        let run = predict_sample(&path, &config, &sink).unwrap();

        assert_eq!(run.name, "wiki_mp_u_10");
        assert_eq!(run.test_events.len(), 1);
        assert_eq!(run.predictions, vec![vec![0, 1]]);
        assert_eq!(run.tag_assignments, 4);
        assert_eq!(run.timing.test_items, 1);
    }

    #[test]
    fn test_missing_input_is_an_io_error() {
        let sink = CollectingSink::new();
        let result = predict_sample(Path::new("/nonexistent/wiki.txt"), &ModelConfig::default(), &sink);
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
