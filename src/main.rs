//! CLI for training and evaluating the policy-statement classifier
//!
//! Usage:
//! ```bash
//! cargo run -- run --data statements.json
//! cargo run -- tune --data statements.json --target vix_buckets_1d
//! cargo run -- inspect --data statements.csv --target tnx_buckets_5d
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fomc_naive_bayes::{
    config::{load_config, ExperimentConfig},
    select_alpha, DataLoader, Dataset, Experiment, Label, NaiveBayes,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "fomc_nb")]
#[command(author = "ML for Trading")]
#[command(version = "0.1.0")]
#[command(about = "Naive Bayes on FOMC statements for VIX / yield moves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train and score every target over several random splits
    Run {
        /// Dataset file (.json or .csv)
        #[arg(short, long)]
        data: PathBuf,

        /// Experiment config (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of epochs
        #[arg(short, long)]
        epochs: Option<usize>,

        /// Smoothing parameter
        #[arg(short, long)]
        alpha: Option<f64>,

        /// Pick alpha by cross-validation on each training split
        #[arg(long)]
        tune: bool,

        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Words listed per label
        #[arg(long)]
        top: Option<usize>,

        /// Save the report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Cross-validate the smoothing parameter for one target
    Tune {
        /// Dataset file (.json or .csv)
        #[arg(short, long)]
        data: PathBuf,

        /// Target column
        #[arg(short, long)]
        target: String,

        /// Number of folds
        #[arg(short = 'k', long, default_value = "5")]
        folds: usize,
    },

    /// Train on a whole column and print corpus statistics
    Inspect {
        /// Dataset file (.json or .csv)
        #[arg(short, long)]
        data: PathBuf,

        /// Target column
        #[arg(short, long)]
        target: String,

        /// Smoothing parameter
        #[arg(short, long, default_value = "1.0")]
        alpha: f64,

        /// Most frequent words listed per label
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            data,
            config,
            epochs,
            alpha,
            tune,
            seed,
            top,
            output,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)
                    .with_context(|| format!("Failed to load config: {:?}", path))?,
                None => ExperimentConfig::default(),
            };
            if let Some(epochs) = epochs {
                config.epochs = epochs;
            }
            if let Some(alpha) = alpha {
                config.alpha = alpha;
            }
            if tune {
                config.tune_alpha = true;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(top) = top {
                config.top_n = top;
            }
            run_experiment(&data, config, output.as_deref())?;
        }
        Commands::Tune {
            data,
            target,
            folds,
        } => {
            run_tune(&data, &target, folds)?;
        }
        Commands::Inspect {
            data,
            target,
            alpha,
            top,
        } => {
            run_inspect(&data, &target, alpha, top)?;
        }
    }

    Ok(())
}

fn load_dataset(path: &Path, lowercase: bool) -> Result<Dataset> {
    let mut dataset =
        DataLoader::load(path).with_context(|| format!("Failed to load dataset: {:?}", path))?;
    if lowercase {
        dataset.lowercase();
    }
    Ok(dataset)
}

fn run_experiment(data: &Path, config: ExperimentConfig, output: Option<&Path>) -> Result<()> {
    let dataset = load_dataset(data, config.lowercase)?;

    let mut experiment = Experiment::new(config)?;
    info!(
        epochs = experiment.config().epochs,
        targets = experiment.config().targets.len(),
        "running experiment"
    );
    let report = experiment.run(&dataset)?;

    println!("\n{}", report);

    if let Some(path) = output {
        report
            .save_json(path)
            .with_context(|| format!("Failed to write report: {:?}", path))?;
        info!(path = %path.display(), "saved report");
    }

    Ok(())
}

fn run_tune(data: &Path, target: &str, folds: usize) -> Result<()> {
    let dataset = load_dataset(data, false)?;
    let (documents, labels) = dataset.column(target)?;

    let grid = ExperimentConfig::default().alpha_grid;
    let search = select_alpha(&documents, &labels, &grid, folds)?;

    println!("\nAlpha search for {} ({} folds)\n", target, folds);
    println!("{}", search);

    Ok(())
}

fn run_inspect(data: &Path, target: &str, alpha: f64, top: usize) -> Result<()> {
    let dataset = load_dataset(data, false)?;
    let (documents, labels) = dataset.column(target)?;

    let model = NaiveBayes::fit(&documents, &labels, alpha)?;

    println!("\n{} ({} statements)\n", target, documents.len());
    println!("{}", model.training_report());

    for label in Label::ALL {
        let words: Vec<String> = model
            .top_n(label, top)
            .into_iter()
            .map(|(w, c)| format!("{} ({})", w, c))
            .collect();
        println!("\nTop {} {} words: {}", top, label, words.join(", "));
    }

    Ok(())
}
