//! Integration tests for tagrec
//!
//! These tests run the full pipeline: read a tagging log, train on its
//! leading events, predict the tail and write the result files.

use std::fs;
use std::io::Write;

use tagrec::diagnostics::CollectingSink;
use tagrec::execution::{predict_sample, prediction_writer};
use tagrec::{Error, ModelConfig};

const LOG: &str = concat!(
    "\"alice\";\"Rust\";\"100\";\"lang,systems\";\"cs\"\n",
    "\"bob\";\"Rust\";\"101\";\"lang,memory\";\"cs\"\n",
    "\"alice\";\"Haskell\";\"102\";\"lang,functional\";\"cs\"\n",
    "\"bob\";\"Go\";\"103\";\"lang,concurrency\"\n",
    "\"carol\";\"Rust\";\"104\";\"systems\"\n",
);

fn write_log(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_end_to_end_prediction_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "wiki.txt", LOG);
    let output = dir.path().join("results");

    let config = ModelConfig { sample_size: 2, top_k: 2, ..Default::default() };
    let sink = CollectingSink::new();
    let run = predict_sample(&input, &config, &sink).unwrap();
    assert_eq!(run.name, "wiki_mp_ur_5");
    assert_eq!(run.test_events.len(), 2);

    let (predictions_path, timing_path) = prediction_writer::write_run(&run, &output).unwrap();
    assert_eq!(predictions_path, output.join("wiki_mp_ur_5.txt"));
    assert_eq!(timing_path, output.join("wiki_mp_ur_5_TIME.txt"));

    let predictions = fs::read_to_string(&predictions_path).unwrap();
    let lines: Vec<&str> = predictions.lines().collect();
    assert_eq!(lines.len(), 2);
    // bob tagged lang and memory once each; Go was never seen in training
    assert_eq!(lines[0], "\"bob\";\"Go\";\"lang,memory\"");
    // carol is unseen; Rust was tagged lang x2, systems, memory
    assert_eq!(lines[1], "\"carol\";\"Rust\";\"lang,systems\"");

    let timing = fs::read_to_string(&timing_path).unwrap();
    assert!(timing.starts_with("Full training time: "));
    assert!(timing.contains("Average test time: "));
    assert!(timing.contains("Total time: "));
}

#[test]
fn test_mode_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "wiki.txt", LOG);
    let sink = CollectingSink::new();

    let user_only = ModelConfig { res_based: false, beta: 10, ..Default::default() };
    assert_eq!(predict_sample(&input, &user_only, &sink).unwrap().name, "wiki_mp_u_10");

    let resource_only = ModelConfig { user_based: false, beta: 0, ..Default::default() };
    assert_eq!(predict_sample(&input, &resource_only, &sink).unwrap().name, "wiki_mp_r_0");
}

#[test]
fn test_malformed_lines_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let contents = format!("{}\"broken\";\"line\"\n{}", &LOG[..LOG.find('\n').unwrap() + 1], LOG);
    let input = write_log(dir.path(), "noisy.txt", &contents);

    let sink = CollectingSink::new();
    let config = ModelConfig { sample_size: 1, ..Default::default() };
    let run = predict_sample(&input, &config, &sink).unwrap();

    assert_eq!(sink.malformed_count(), 1);
    // the first line appears twice, the broken one is dropped
    assert_eq!(run.timing.test_items, 1);
    assert_eq!(run.tag_assignments, 11);
}

#[test]
fn test_sample_larger_than_log() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "wiki.txt", LOG);
    let sink = CollectingSink::new();
    let config = ModelConfig { sample_size: 6, ..Default::default() };
    assert!(matches!(predict_sample(&input, &config, &sink), Err(Error::Config(_))));
}

#[test]
fn test_zero_sample_predicts_every_event() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "wiki.txt", LOG);
    let sink = CollectingSink::new();
    let run = predict_sample(&input, &ModelConfig::default(), &sink).unwrap();

    assert_eq!(run.test_events.len(), 5);
    assert_eq!(run.predictions.len(), 5);
    assert!(run.predictions.iter().all(|tags| !tags.is_empty()));
}

#[test]
fn test_vocabulary_survives_a_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "wiki.txt", LOG);
    let sink = CollectingSink::new();
    let run = predict_sample(&input, &ModelConfig::default(), &sink).unwrap();

    let path = dir.path().join("wiki.vocab");
    run.vocabulary.save_to_file(&path).unwrap();
    let loaded = tagrec::storage::Vocabulary::load_from_file(&path).unwrap();

    assert_eq!(loaded.users.items(), run.vocabulary.users.items());
    assert_eq!(loaded.tags.counts(), run.vocabulary.tags.counts());
    assert_eq!(loaded.tags.get_id("systems"), Some(1));
}
