//! Likelihood log-ratios summed over repeated trials

use crate::classifier::NaiveBayes;
use crate::models::Label;
use std::collections::HashMap;

/// Per-label running sums of [`NaiveBayes::likelihood_log_ratio`]
#[derive(Debug, Clone, Default)]
pub struct LikelihoodRatioTable {
    /// Indexed by [`Label::index`]
    sums: [HashMap<String, f64>; Label::COUNT],
    trials: usize,
}

impl LikelihoodRatioTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the log-ratio of every observed vocabulary word for every label
    ///
    /// The unknown-word sentinel is skipped.
    pub fn accumulate(&mut self, model: &NaiveBayes) {
        for word in model.vocabulary().words() {
            for label in Label::ALL {
                let ratio = model.likelihood_log_ratio(word, label);
                *self.sums[label.index()].entry(word.to_string()).or_insert(0.0) += ratio;
            }
        }
        self.trials += 1;
    }

    /// Models accumulated so far
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Accumulated score of a word for a label
    pub fn score(&self, word: &str, label: Label) -> Option<f64> {
        self.sums[label.index()].get(word).copied()
    }

    /// The `n` words with the highest accumulated score, ties by word
    pub fn top_words(&self, label: Label, n: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self.sums[label.index()]
            .iter()
            .map(|(w, &s)| (w.clone(), s))
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}
