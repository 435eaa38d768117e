//! `iris-train`: fit the forest on the bundled iris dataset and write the
//! model and metadata artifacts.
//!
//! Every flag is optional; with none it reproduces the reference run
//! (80/20 stratified split, 100 trees of depth 5, seed 42, output `model/`).

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use iris_classifier::model::ArtifactPaths;
use iris_classifier::train::{self, TARGET_NAMES, TrainConfig, TrainingRun};
use iris_classifier::{Classifier, ForestParams};

// ── CLI ─────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "iris-train", about = "train the iris classifier and save its artifacts")]
#[command(version = iris_classifier::PKG_VERSION)]
struct Args {
    /// directory receiving iris_model.msgpack and metadata.json
    #[arg(long, env = "IRIS_MODEL_DIR", default_value = "model")]
    output_dir: PathBuf,

    /// seed for both the split and the bootstrap resampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// number of trees in the forest
    #[arg(long, default_value_t = 100)]
    trees: usize,

    /// maximum depth of each tree
    #[arg(long, default_value_t = 5)]
    max_depth: usize,

    /// fraction of each class held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,
}

impl From<Args> for TrainConfig {
    fn from(args: Args) -> Self {
        TrainConfig {
            output_dir: args.output_dir,
            test_size: args.test_size,
            split_seed: args.seed,
            forest: ForestParams::default()
                .n_trees(args.trees)
                .max_depth(args.max_depth)
                .seed(args.seed),
        }
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config: TrainConfig = Args::parse().into();

    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(config: &TrainConfig) -> iris_classifier::Result<()> {
    println!("Loading iris dataset...");
    println!("Classes: {TARGET_NAMES:?}");
    println!("Features: {:?}", train::FEATURE_NAMES);

    println!(
        "\nTraining random forest ({} trees, max depth {})...",
        config.forest.n_trees, config.forest.max_depth
    );
    let run = train::train(config)?;

    println!("Training set: {} samples", run.split.train_records.nrows());
    println!("Test set: {} samples", run.split.test_records.nrows());

    let accuracy = run.accuracy();
    println!("\nModel performance:");
    println!("Accuracy: {accuracy:.4} ({:.2}%)", accuracy * 100.0);
    println!("\nClassification report:");
    println!("{}", run.report);

    let paths = ArtifactPaths::in_dir(&config.output_dir);
    println!("Saved model to {}", paths.model.display());
    println!("Saved metadata to {}", paths.metadata.display());

    print_sample(&run)?;
    println!("\nModel training complete!");
    Ok(())
}

/// Classify the first held-out row as a smoke test.
fn print_sample(run: &TrainingRun) -> iris_classifier::Result<()> {
    let Some(sample) = run.split.test_records.rows().into_iter().next() else {
        return Ok(());
    };
    let sample = sample.to_vec();
    let index = run.forest.classify(&sample)?;
    let probabilities = run.forest.class_probabilities(&sample)?;

    println!("\n{}", "=".repeat(50));
    println!("Sample prediction:");
    println!("Input features: {sample:?}");
    println!("Predicted class: {}", run.metadata.class_name(index));
    let named: Vec<String> = probabilities
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}: {p:.3}", run.metadata.class_name(i)))
        .collect();
    println!("Probabilities: {{{}}}", named.join(", "));
    println!("{}", "=".repeat(50));
    Ok(())
}
