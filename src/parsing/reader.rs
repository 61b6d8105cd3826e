//! Streaming ingestion of a tagging log.
//!
//! A line only becomes an event once the next parsable line (or the end of
//! the input) is reached: every new line first commits the event in flight,
//! then takes its place.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ModelConfig;
use crate::core::TagAssignment;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::Result;
use crate::parsing::record_parser::{
    parse_line, validate_timestamp, InvalidTimestamp, MalformedRecord, ParsedFields, RatingField,
};
use crate::stemming::{EnglishStemmer, Stemmer};
use crate::storage::{EventStore, Vocabulary};

/// Emit a progress diagnostic every this many committed events.
const PROGRESS_INTERVAL: usize = 100_000;

/// Interned vocabulary plus the events that reference it.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Users, resources, tags and categories with their counters
    pub vocabulary: Vocabulary,
    /// Committed events in input order
    pub store: EventStore,
}

impl Corpus {
    /// Event at `index` with its original strings.
    pub fn decode(&self, index: usize) -> Option<TagAssignment> {
        self.store.get(index).map(|event| event.decode(&self.vocabulary))
    }
}

/// A parsed line together with its 1-based line number.
struct PendingLine {
    fields: ParsedFields,
    line: usize,
}

enum InFlight {
    Empty,
    Pending(PendingLine),
}

impl InFlight {
    /// Seed with `next`, handing back the event that was pending.
    fn replace(&mut self, next: PendingLine) -> Option<PendingLine> {
        match std::mem::replace(self, InFlight::Pending(next)) {
            InFlight::Empty => None,
            InFlight::Pending(previous) => Some(previous),
        }
    }

    fn take(&mut self) -> Option<PendingLine> {
        match std::mem::replace(self, InFlight::Empty) {
            InFlight::Empty => None,
            InFlight::Pending(previous) => Some(previous),
        }
    }
}

/// Reads tagging logs into a [`Corpus`].
pub struct CorpusReader {
    count_limit: usize,
    stemmer: Option<Box<dyn Stemmer>>,
    corpus: Corpus,
}

impl CorpusReader {
    /// `count_limit` caps how many leading events feed the interning
    /// counters (0 = unlimited). Later events are still interned and stored.
    pub fn new(count_limit: usize, stemmer: Option<Box<dyn Stemmer>>) -> Self {
        Self { count_limit, stemmer, corpus: Corpus::default() }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        let stemmer: Option<Box<dyn Stemmer>> =
            if config.stemming { Some(Box::new(EnglishStemmer::new())) } else { None };
        Self::new(config.count_limit, stemmer)
    }

    /// Read a whole file. Fails only if the file cannot be opened or read.
    pub fn read_file(&mut self, path: &Path, sink: &dyn DiagnosticSink) -> Result<()> {
        let file = File::open(path).map_err(|err| {
            log::error!("Could not open {}: {}", path.display(), err);
            err
        })?;
        self.read_lines(BufReader::new(file), sink)
    }

    /// Read line by line until end of input. Bytes that are not valid UTF-8
    /// are replaced with U+FFFD and reported; only I/O failures abort.
    pub fn read_lines<R: BufRead>(&mut self, mut reader: R, sink: &dyn DiagnosticSink) -> Result<()> {
        let mut in_flight = InFlight::Empty;
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let raw = trim_line_ending(&buffer);
            let line = String::from_utf8_lossy(raw);
            if let Cow::Owned(_) = line {
                sink.report(Diagnostic::InvalidUtf8 { line: line_number });
            }

            match parse_line(&line, self.stemmer.as_deref()) {
                Ok(fields) => {
                    if let Some(previous) =
                        in_flight.replace(PendingLine { fields, line: line_number })
                    {
                        self.commit(previous, sink);
                    }
                }
                Err(MalformedRecord { fields }) => {
                    sink.report(Diagnostic::MalformedRecord { line: line_number, fields });
                }
            }
        }

        if let Some(last) = in_flight.take() {
            self.commit(last, sink);
        }
        Ok(())
    }

    fn commit(&mut self, pending: PendingLine, sink: &dyn DiagnosticSink) {
        let PendingLine { fields, line } = pending;
        if fields.user.is_empty() || fields.tags.is_empty() {
            return;
        }
        if let Err(InvalidTimestamp(timestamp)) = validate_timestamp(&fields.timestamp) {
            sink.report(Diagnostic::InvalidTimestamp { committed: self.corpus.store.len(), timestamp });
            return;
        }
        if let RatingField::Unparsable(value) = &fields.rating {
            sink.report(Diagnostic::UnparsableRating { line, value: value.clone() });
        }

        let committed = self.corpus.store.len();
        let counting = self.count_limit == 0 || committed < self.count_limit;
        let event = fields.into_assignment().encode(&mut self.corpus.vocabulary, counting);
        self.corpus.store.push(event);

        let committed = self.corpus.store.len();
        if committed % PROGRESS_INTERVAL == 0 {
            sink.report(Diagnostic::Progress { committed });
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn into_corpus(self) -> Corpus {
        self.corpus
    }
}

/// Strip `\n` or `\r\n`, as `BufRead::lines` does.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
