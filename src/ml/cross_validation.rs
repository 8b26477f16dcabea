//! Cross-validation and smoothing parameter search
//!
//! Includes:
//! - K-Fold splits
//! - Alpha sweep scored by mean held-out accuracy

use crate::classifier::NaiveBayes;
use crate::error::{Error, Result};
use crate::ml::split::select;
use crate::models::Label;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Candidate smoothing values searched by default
pub const DEFAULT_ALPHA_GRID: [f64; 13] = [
    0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 50.0, 100.0,
];

/// Cross-validation split
#[derive(Debug, Clone)]
pub struct CVSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Cross-validator
pub struct CrossValidator;

impl CrossValidator {
    /// K-Fold cross-validation splits
    ///
    /// Folds are contiguous over the (optionally shuffled) indices and the
    /// last fold absorbs the remainder.
    ///
    /// # Arguments
    /// * `n_samples` - Total number of samples
    /// * `n_folds` - Number of folds
    /// * `rng` - Shuffles indices when given
    pub fn k_fold<R: Rng + ?Sized>(
        n_samples: usize,
        n_folds: usize,
        rng: Option<&mut R>,
    ) -> Result<Vec<CVSplit>> {
        if n_folds < 2 {
            return Err(Error::InvalidSplit(format!("n_folds must be > 1, got {}", n_folds)));
        }
        if n_samples < n_folds {
            return Err(Error::InvalidSplit(format!(
                "{} samples cannot fill {} folds",
                n_samples, n_folds
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if let Some(rng) = rng {
            indices.shuffle(rng);
        }

        let fold_size = n_samples / n_folds;
        let mut splits = Vec::with_capacity(n_folds);

        for i in 0..n_folds {
            let test_start = i * fold_size;
            let test_end = if i == n_folds - 1 {
                n_samples
            } else {
                (i + 1) * fold_size
            };

            let test_indices: Vec<usize> = indices[test_start..test_end].to_vec();
            let train_indices: Vec<usize> = indices[..test_start]
                .iter()
                .chain(indices[test_end..].iter())
                .cloned()
                .collect();

            splits.push(CVSplit {
                train_indices,
                test_indices,
            });
        }

        Ok(splits)
    }

    /// Held-out accuracy of a model trained on each split
    pub fn cross_val_accuracy(
        documents: &[Vec<String>],
        labels: &[Label],
        splits: &[CVSplit],
        alpha: f64,
    ) -> Result<Vec<f64>> {
        splits
            .iter()
            .map(|split| {
                let train_docs = select(documents, &split.train_indices);
                let train_labels = select(labels, &split.train_indices);
                let test_docs = select(documents, &split.test_indices);
                let test_labels = select(labels, &split.test_indices);

                let model = NaiveBayes::fit(&train_docs, &train_labels, alpha)?;
                model.evaluate_classifier_accuracy(&test_docs, &test_labels)
            })
            .collect()
    }
}

/// Mean fold accuracy for one candidate alpha
#[derive(Debug, Clone, Serialize)]
pub struct AlphaScore {
    pub alpha: f64,
    pub mean_accuracy: f64,
    pub fold_scores: Vec<f64>,
}

/// Outcome of an alpha sweep
#[derive(Debug, Clone, Serialize)]
pub struct AlphaSearch {
    /// Candidate with the highest mean accuracy (first one on ties)
    pub best_alpha: f64,
    pub best_accuracy: f64,
    pub scores: Vec<AlphaScore>,
}

impl fmt::Display for AlphaSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10}  {:>8}", "alpha", "accuracy")?;
        for score in &self.scores {
            let marker = if score.alpha == self.best_alpha { " *" } else { "" };
            writeln!(f, "{:>10}  {:>8.4}{}", score.alpha, score.mean_accuracy, marker)?;
        }
        write!(f, "best alpha = {} ({:.4})", self.best_alpha, self.best_accuracy)
    }
}

/// Pick the smoothing parameter with the best mean k-fold accuracy
///
/// Folds are taken in order without shuffling. Only the public training
/// and evaluation API of [`NaiveBayes`] is used.
pub fn select_alpha(
    documents: &[Vec<String>],
    labels: &[Label],
    candidates: &[f64],
    n_folds: usize,
) -> Result<AlphaSearch> {
    if documents.len() != labels.len() {
        return Err(Error::LengthMismatch {
            documents: documents.len(),
            labels: labels.len(),
        });
    }
    if candidates.is_empty() {
        return Err(Error::InvalidConfig("alpha candidate list is empty".to_string()));
    }

    let splits = CrossValidator::k_fold::<rand::rngs::ThreadRng>(documents.len(), n_folds, None)?;

    let mut scores = Vec::with_capacity(candidates.len());
    for &alpha in candidates {
        let fold_scores = CrossValidator::cross_val_accuracy(documents, labels, &splits, alpha)?;
        let mean_accuracy = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
        debug!(alpha, mean_accuracy, "scored alpha candidate");
        scores.push(AlphaScore {
            alpha,
            mean_accuracy,
            fold_scores,
        });
    }

    let mut best = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if score.mean_accuracy > scores[best].mean_accuracy {
            best = i;
        }
    }

    Ok(AlphaSearch {
        best_alpha: scores[best].alpha,
        best_accuracy: scores[best].mean_accuracy,
        scores,
    })
}
