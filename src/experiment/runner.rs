//! Multi-epoch, multi-target experiment driver
//!
//! Each epoch draws a fresh random split per target, trains one model on
//! the training part and scores it on the held-out part. Accuracies are
//! averaged over epochs and likelihood log-ratios are summed, since a
//! single small split is noisy.

use crate::classifier::NaiveBayes;
use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::experiment::likelihood::LikelihoodRatioTable;
use crate::ml::{select, select_alpha, train_test_split};
use crate::models::{Dataset, Label};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// One model trained and scored in one epoch
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    pub target: String,
    pub alpha: f64,
    pub accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
}

/// Top words per label for one target
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopWords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

impl TopWords {
    fn from_table(table: &LikelihoodRatioTable, n: usize) -> Self {
        let words = |label: Label| -> Vec<String> {
            table
                .top_words(label, n)
                .into_iter()
                .map(|(w, _)| w)
                .collect()
        };
        Self {
            positive: words(Label::Positive),
            negative: words(Label::Negative),
            neutral: words(Label::Neutral),
        }
    }

    pub fn get(&self, label: Label) -> &[String] {
        match label {
            Label::Positive => &self.positive,
            Label::Negative => &self.negative,
            Label::Neutral => &self.neutral,
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub started_at: DateTime<Utc>,
    pub config: ExperimentConfig,
    /// Outer index is the epoch, inner follows `config.targets`
    pub epochs: Vec<Vec<TargetOutcome>>,
    /// Mean accuracy per target over all epochs
    pub mean_accuracy: BTreeMap<String, f64>,
    /// Words ranked by summed likelihood log-ratio
    pub top_words: BTreeMap<String, TopWords>,
}

impl ExperimentReport {
    /// Write the report as pretty JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average score for each target over {} epochs:", self.epochs.len())?;
        for target in &self.config.targets {
            if let Some(mean) = self.mean_accuracy.get(target) {
                writeln!(f, "  {:<16} {:.4}", target, mean)?;
            }
        }

        for target in &self.config.targets {
            let Some(top) = self.top_words.get(target) else {
                continue;
            };
            writeln!(f)?;
            for label in Label::ALL {
                writeln!(
                    f,
                    "Top {} {} words for {}: {:?}",
                    self.config.top_n,
                    label,
                    target,
                    top.get(label)
                )?;
            }
        }
        Ok(())
    }
}

/// Experiment driver
pub struct Experiment {
    config: ExperimentConfig,
    rng: StdRng,
}

impl Experiment {
    /// Create a driver; the RNG is seeded from `config.seed` when set
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run every epoch over every target
    pub fn run(&mut self, dataset: &Dataset) -> Result<ExperimentReport> {
        let started_at = Utc::now();

        let mut columns = Vec::with_capacity(self.config.targets.len());
        for target in &self.config.targets {
            columns.push(dataset.column(target)?);
        }

        let mut tables: Vec<LikelihoodRatioTable> =
            vec![LikelihoodRatioTable::new(); self.config.targets.len()];
        let mut epochs = Vec::with_capacity(self.config.epochs);

        for epoch in 0..self.config.epochs {
            info!(epoch, "starting epoch");
            let mut outcomes = Vec::with_capacity(columns.len());

            for (t, (documents, labels)) in columns.iter().enumerate() {
                let target = self.config.targets[t].clone();
                let (outcome, model) = self.run_target(&target, documents, labels)?;
                tables[t].accumulate(&model);
                info!(
                    epoch,
                    column = %target,
                    alpha = outcome.alpha,
                    accuracy = outcome.accuracy,
                    "scored target"
                );
                outcomes.push(outcome);
            }

            epochs.push(outcomes);
        }

        let mut mean_accuracy = BTreeMap::new();
        let mut top_words = BTreeMap::new();
        for (t, target) in self.config.targets.iter().enumerate() {
            let mean = epochs.iter().map(|e| e[t].accuracy).sum::<f64>() / epochs.len() as f64;
            mean_accuracy.insert(target.clone(), mean);
            top_words.insert(target.clone(), TopWords::from_table(&tables[t], self.config.top_n));
        }

        Ok(ExperimentReport {
            started_at,
            config: self.config.clone(),
            epochs,
            mean_accuracy,
            top_words,
        })
    }

    /// Split, optionally tune, train and score one target
    fn run_target(
        &mut self,
        target: &str,
        documents: &[Vec<String>],
        labels: &[Label],
    ) -> Result<(TargetOutcome, NaiveBayes)> {
        let split = train_test_split(documents.len(), self.config.test_size, &mut self.rng)?;
        let train_docs = select(documents, &split.train_indices);
        let train_labels = select(labels, &split.train_indices);
        let test_docs = select(documents, &split.test_indices);
        let test_labels = select(labels, &split.test_indices);

        let alpha = if self.config.tune_alpha {
            select_alpha(
                &train_docs,
                &train_labels,
                &self.config.alpha_grid,
                self.config.n_folds,
            )?
            .best_alpha
        } else {
            self.config.alpha
        };

        let model = NaiveBayes::fit(&train_docs, &train_labels, alpha)?;

        let missing = model.training_report().missing_labels();
        if !missing.is_empty() {
            warn!(column = %target, ?missing, "training split lacks labels, their prior is zero");
        }

        let accuracy = model.evaluate_classifier_accuracy(&test_docs, &test_labels)?;

        let outcome = TargetOutcome {
            target: target.to_string(),
            alpha,
            accuracy,
            train_size: train_docs.len(),
            test_size: test_docs.len(),
        };
        Ok((outcome, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Statement;

    fn dataset() -> Dataset {
        let rows: [(&str, i64, i64); 3] = [
            ("rate hike inflation", 1, 0),
            ("rate cut slowdown", -1, 1),
            ("steady outlook", 0, -1),
        ];
        let statements = (0..30)
            .map(|i| {
                let (text, vix, tnx) = rows[i % rows.len()];
                let tokens = text.split_whitespace().map(str::to_string).collect();
                Statement::new(tokens)
                    .with_target("vix_buckets_1d", Label::try_from(vix).unwrap())
                    .with_target("tnx_buckets_1d", Label::try_from(tnx).unwrap())
            })
            .collect();
        Dataset::new(statements)
    }

    fn config() -> ExperimentConfig {
        ExperimentConfig {
            targets: vec!["vix_buckets_1d".to_string(), "tnx_buckets_1d".to_string()],
            epochs: 3,
            seed: Some(11),
            top_n: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_produces_scores_per_epoch_and_target() {
        let mut experiment = Experiment::new(config()).unwrap();
        let report = experiment.run(&dataset()).unwrap();

        assert_eq!(report.epochs.len(), 3);
        for outcomes in &report.epochs {
            assert_eq!(outcomes.len(), 2);
            for outcome in outcomes {
                assert_eq!(outcome.test_size, 6);
                assert_eq!(outcome.train_size, 24);
                assert!((0.0..=1.0).contains(&outcome.accuracy));
            }
        }
        assert_eq!(report.mean_accuracy.len(), 2);
        assert_eq!(report.top_words["vix_buckets_1d"].positive.len(), 2);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let a = Experiment::new(config()).unwrap().run(&dataset()).unwrap();
        let b = Experiment::new(config()).unwrap().run(&dataset()).unwrap();
        assert_eq!(a.mean_accuracy, b.mean_accuracy);
    }

    #[test]
    fn test_run_with_tuning() {
        let mut config = config();
        config.tune_alpha = true;
        config.alpha_grid = vec![0.1, 1.0];
        config.epochs = 1;

        let report = Experiment::new(config).unwrap().run(&dataset()).unwrap();
        for outcome in &report.epochs[0] {
            assert!(outcome.alpha == 0.1 || outcome.alpha == 1.0);
        }
    }

    #[test]
    fn test_unknown_target_fails() {
        let mut config = config();
        config.targets = vec!["gold_buckets_1d".to_string()];
        let mut experiment = Experiment::new(config).unwrap();
        assert!(experiment.run(&dataset()).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExperimentConfig {
            epochs: 0,
            ..Default::default()
        };
        assert!(Experiment::new(config).is_err());
    }
}
