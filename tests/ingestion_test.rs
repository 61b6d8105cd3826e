//! Ingestion tests
//!
//! These tests feed small tagging logs through the reader and check the
//! interning tables and the event store that come out of it.

use std::io::Write;

use tagrec::diagnostics::{CollectingSink, Diagnostic};
use tagrec::model::{Axis, DistributionTable};
use tagrec::parsing::CorpusReader;
use tagrec::stemming::EnglishStemmer;
use tagrec::Error;

fn read(input: &str, count_limit: usize) -> (tagrec::parsing::Corpus, CollectingSink) {
    let sink = CollectingSink::new();
    let mut reader = CorpusReader::new(count_limit, None);
    reader.read_lines(input.as_bytes(), &sink).unwrap();
    (reader.into_corpus(), sink)
}

#[test]
fn test_round_trip_scenario() {
    let input = "\"u1\";\"r1\";\"100\";\"a,b,a\"\n\"u2\";\"r2\";\"101\";\"b\"\n";
    let (corpus, sink) = read(input, 0);

    assert_eq!(corpus.store.len(), 2);
    assert_eq!(corpus.vocabulary.users.items(), &["u1", "u2"]);
    assert_eq!(corpus.vocabulary.resources.items(), &["r1", "r2"]);
    assert_eq!(corpus.vocabulary.tags.items(), &["a", "b"]);
    assert!(sink.diagnostics().is_empty());

    let users = DistributionTable::build(corpus.store.events(), Axis::User);
    let u1 = users.get(0).unwrap();
    assert_eq!(u1.count(0), 2);
    assert_eq!(u1.count(1), 1);
}

#[test]
fn test_grouping_lag_with_trailing_malformed_line() {
    let input = "\"u1\";\"r1\";\"100\";\"a\"\n\"u2\";\"r2\";\"101\"\n";
    let (corpus, sink) = read(input, 0);

    assert_eq!(corpus.store.len(), 1);
    assert_eq!(corpus.store.events()[0].user, 0);
    assert_eq!(sink.malformed_count(), 1);
    assert_eq!(sink.diagnostics()[0], Diagnostic::MalformedRecord { line: 2, fields: 3 });
}

#[test]
fn test_single_line_is_committed_at_end() {
    let (corpus, _) = read("\"u1\";\"r1\";\"100\";\"a\"", 0);
    assert_eq!(corpus.store.len(), 1);
}

#[test]
fn test_events_keep_input_order_and_duplicates() {
    let input = "\"u1\";\"r1\";\"1\";\"x,y,x\";\"c1,c2\";\"3.5\"\n\"u1\";\"r1\";\"2\";\"y\"\n";
    let (corpus, _) = read(input, 0);

    let first = &corpus.store.events()[0];
    assert_eq!(first.tags, vec![0, 1, 0]);
    assert_eq!(first.categories, vec![0, 1]);
    assert_eq!(first.rating, Some(3.5));
    assert_eq!(first.timestamp_value(), Some(1));
    assert_eq!(corpus.store.events()[1].tags, vec![1]);
    assert_eq!(corpus.store.total_tag_assignments(0), 4);
    assert_eq!(corpus.store.total_tag_assignments(1), 3);
}

#[test]
fn test_counting_gate() {
    let input = [
        "\"u1\";\"r1\";\"1\";\"a,b\"",
        "\"u2\";\"r1\";\"2\";\"a\"",
        "\"u1\";\"r2\";\"3\";\"a,c\"",
        "\"u3\";\"r3\";\"4\";\"b,d\"",
    ]
    .join("\n");

    let (limited, _) = read(&input, 2);
    assert_eq!(limited.store.len(), 4);
    assert_eq!(limited.vocabulary.users.items(), &["u1", "u2", "u3"]);
    assert_eq!(limited.vocabulary.users.counts(), &[1, 1, 0]);
    assert_eq!(limited.vocabulary.resources.counts(), &[2, 0, 0]);
    // a: 2 counted occurrences, b: 1, c and d first seen after the budget
    assert_eq!(limited.vocabulary.tags.counts(), &[2, 1, 0, 0]);

    let (unlimited, _) = read(&input, 0);
    assert_eq!(unlimited.vocabulary.users.counts(), &[2, 1, 1]);
    assert_eq!(unlimited.vocabulary.resources.counts(), &[2, 1, 1]);
    assert_eq!(unlimited.vocabulary.tags.counts(), &[3, 2, 1, 1]);

    // ID assignment does not depend on the budget
    assert_eq!(limited.vocabulary.tags.items(), unlimited.vocabulary.tags.items());
    assert_eq!(limited.store.events(), unlimited.store.events());
}

#[test]
fn test_skipped_events_do_not_consume_ids() {
    let input = "\"u1\";\"r1\";\"noon\";\"a\"\n\"\";\"r2\";\"1\";\"b\"\n\"u3\";\"r3\";\"2\";\"c\"\n";
    let (corpus, sink) = read(input, 0);

    assert_eq!(corpus.store.len(), 1);
    assert_eq!(corpus.vocabulary.users.items(), &["u3"]);
    assert_eq!(corpus.vocabulary.resources.items(), &["r3"]);
    assert_eq!(sink.invalid_timestamp_count(), 1);
}

#[test]
fn test_stemming_reader() {
    let sink = CollectingSink::new();
    let mut reader = CorpusReader::new(0, Some(Box::new(EnglishStemmer::new())));
    reader.read_lines("\"u1\";\"r1\";\"1\";\"Running,runs\"\n".as_bytes(), &sink).unwrap();

    let corpus = reader.into_corpus();
    assert_eq!(corpus.vocabulary.tags.items(), &["run"]);
    assert_eq!(corpus.store.events()[0].tags, vec![0, 0]);
}

#[test]
fn test_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wiki.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "\"u1\";\"r1\";\"100\";\"a,b,a\"").unwrap();
    writeln!(file, "\"u2\";\"r2\";\"101\";\"b\"").unwrap();
    drop(file);

    let sink = CollectingSink::new();
    let mut reader = CorpusReader::new(0, None);
    reader.read_file(&path, &sink).unwrap();
    assert_eq!(reader.corpus().store.len(), 2);
}

#[test]
fn test_missing_file_fails() {
    let sink = CollectingSink::new();
    let mut reader = CorpusReader::new(0, None);
    let result = reader.read_file(std::path::Path::new("/nonexistent/wiki.txt"), &sink);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_utf8_line_does_not_abort_the_read() {
    let sink = CollectingSink::new();
    let mut reader = CorpusReader::new(0, None);
    let bytes: &[u8] = b"\"u1\";\"r1\";\"1\";\"a\"\n\"u2\";\"r\xE9sum\xE9\";\"2\";\"b\"\n\"u3\";\"r3\";\"3\";\"c\"\n";
    reader.read_lines(bytes, &sink).unwrap();

    let corpus = reader.into_corpus();
    assert_eq!(corpus.store.len(), 3);
    assert_eq!(corpus.vocabulary.users.items(), &["u1", "u2", "u3"]);
    assert_eq!(corpus.vocabulary.resources.items()[1], "r\u{FFFD}sum\u{FFFD}");
    assert_eq!(sink.diagnostics(), vec![Diagnostic::InvalidUtf8 { line: 2 }]);
}
