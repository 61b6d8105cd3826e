use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::Event;
use crate::error::{Error, Result};
use crate::execution::evaluation::EvaluationTiming;
use crate::execution::predict::PredictionRun;
use crate::parsing::record_parser::FIELD_DELIMITER;
use crate::storage::Vocabulary;

/// Write one line per test event in the log's own format:
/// `"user";"resource";"tag,tag,..."`, tags best first.
///
/// Returns the number of lines written.
pub fn write_predictions<W: Write>(
    out: W,
    vocabulary: &Vocabulary,
    events: &[Event],
    predictions: &[Vec<u32>],
) -> Result<usize> {
    if events.len() != predictions.len() {
        return Err(Error::Config(format!(
            "{} test events but {} predictions",
            events.len(),
            predictions.len()
        )));
    }

    let mut out = BufWriter::new(out);
    for (event, tags) in events.iter().zip(predictions) {
        let user = vocabulary.users.resolve(event.user).map_or("", String::as_str);
        let resource = vocabulary.resources.resolve(event.resource).map_or("", String::as_str);
        let tags = vocabulary.tags.resolve_all(tags).join(",");
        writeln!(out, "\"{}{}{}{}{}\"", user, FIELD_DELIMITER, resource, FIELD_DELIMITER, tags)?;
    }
    out.flush()?;
    Ok(events.len())
}

pub fn write_timing<W: Write>(mut out: W, timing: &EvaluationTiming) -> Result<()> {
    writeln!(out, "{}", timing)?;
    out.flush()?;
    Ok(())
}

/// Write `<name>.txt` and `<name>_TIME.txt` into `dir`, creating it if needed.
pub fn write_run(run: &PredictionRun, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let predictions_path = dir.join(format!("{}.txt", run.name));
    let lines = write_predictions(
        File::create(&predictions_path)?,
        &run.vocabulary,
        run.test_events.events(),
        &run.predictions,
    )?;

    let timing_path = dir.join(format!("{}_TIME.txt", run.name));
    write_timing(File::create(&timing_path)?, &run.timing)?;

    log::info!("Wrote {} predictions to {}", lines, predictions_path.display());
    Ok((predictions_path, timing_path))
}
