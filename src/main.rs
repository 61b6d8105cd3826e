//! tagrec - tag prediction for collaborative tagging logs
//!
//! Usage:
//!   tagrec --input data/csv/wiki.txt --sample-size 10000 --beta 5
//!   tagrec --input data/csv/wiki.txt --sample-size 10000 --no-resource --beta 10
//!   tagrec --input data/csv/wiki.txt --config lm.json --output-dir data/results
//!   tagrec --input data/csv/wiki.txt --save-vocabulary data/wiki.vocab

use std::path::PathBuf;

use clap::Parser;
use tagrec::diagnostics::LogSink;
use tagrec::execution::{predict_sample, prediction_writer};
use tagrec::ModelConfig;

#[derive(Parser, Debug)]
#[command(name = "tagrec")]
#[command(about = "Predict tags for the held-out tail of a tagging log with a user/resource language model")]
struct Args {
    /// Input file: "user";"resource";"timestamp";"tags";"categories";"rating"
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file; flags given on the command line override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the prediction and timing files
    #[arg(short, long, default_value = "data/results")]
    output_dir: PathBuf,

    /// Number of trailing events to predict (0 = train and test on everything)
    #[arg(short, long)]
    sample_size: Option<usize>,

    /// Number of leading events that feed the frequency counters (0 = all)
    #[arg(long)]
    count_limit: Option<usize>,

    /// User weight in tenths, 0..=10
    #[arg(short, long)]
    beta: Option<u8>,

    /// Tags per prediction
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Stem tags with the English Snowball stemmer
    #[arg(long)]
    stemming: bool,

    /// Ignore user distributions
    #[arg(long)]
    no_user: bool,

    /// Ignore resource distributions
    #[arg(long)]
    no_resource: bool,

    /// Also save the interned users, resources, tags and categories
    #[arg(long)]
    save_vocabulary: Option<PathBuf>,
}

impl Args {
    fn model_config(&self) -> tagrec::Result<ModelConfig> {
        let mut config = match &self.config {
            Some(path) => ModelConfig::from_json_file(path)?,
            None => ModelConfig::default(),
        };

        if let Some(sample_size) = self.sample_size {
            config.sample_size = sample_size;
        }
        if let Some(count_limit) = self.count_limit {
            config.count_limit = count_limit;
        }
        if let Some(beta) = self.beta {
            config.beta = beta;
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        config.stemming |= self.stemming;
        config.user_based &= !self.no_user;
        config.res_based &= !self.no_resource;

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.model_config()?;

    println!("tagrec");
    println!("======\n");
    println!("Configuration:");
    println!("  Input file: {}", args.input.display());
    println!("  Sample size: {}", config.sample_size);
    println!(
        "  Count limit: {}",
        if config.count_limit == 0 { "unlimited".to_string() } else { config.count_limit.to_string() }
    );
    println!("  Beta: {}", config.beta);
    println!("  User based: {}", config.user_based);
    println!("  Resource based: {}", config.res_based);
    println!("  Stemming: {}", config.stemming);
    println!("  Top K: {}", config.top_k);
    println!();

    if !config.user_based && !config.res_based {
        log::warn!("Both user and resource distributions are disabled, predictions will be empty");
    }

    let run = predict_sample(&args.input, &config, &LogSink)?;

    if let Some(path) = &args.save_vocabulary {
        run.vocabulary.save_to_file(path)?;
        println!("Vocabulary saved to {}", path.display());
    }

    let (predictions_path, timing_path) = prediction_writer::write_run(&run, &args.output_dir)?;

    println!("\nPrediction Complete!");
    println!("====================");
    println!("Test events:      {}", run.predictions.len());
    println!("Tag assignments:  {}", run.tag_assignments);
    println!("Training time:    {} ms", run.timing.training.as_millis());
    println!("Test time:        {} ms", run.timing.testing.as_millis());
    println!("Average per item: {:.4} ms", run.timing.average_test_ms());
    println!("Predictions:      {}", predictions_path.display());
    println!("Timing:           {}", timing_path.display());

    Ok(())
}
