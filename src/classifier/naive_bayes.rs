//! Multinomial Naive Bayes classifier
//!
//! Per-label word statistics are accumulated one document at a time and
//! queried with add-alpha (Lidstone) smoothing:
//!
//! ```text
//! P(word | label) = (count(word, label) + alpha) / (total(label) + |V| * alpha)
//! ```
//!
//! Degenerate statistics are not guarded: a label with no training
//! documents has a log-prior of -inf, and `alpha = 0` yields zero
//! probabilities for unseen words. Callers make sure every label is present
//! in the training data.

use crate::classifier::vocabulary::Vocabulary;
use crate::error::{Error, Result};
use crate::models::Label;
use crate::nlp::tokenizer::{tokenize_doc, total_count, BagOfWords};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Statistics accumulated for one label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassStatistics {
    /// Number of training documents with this label
    pub doc_count: usize,
    /// Sum of all token counts in those documents
    pub word_total: f64,
    /// Token -> summed count; absent tokens count as zero
    pub word_counts: HashMap<String, f64>,
}

impl ClassStatistics {
    /// Count of a word, zero when never seen
    pub fn count(&self, word: &str) -> f64 {
        self.word_counts.get(word).copied().unwrap_or(0.0)
    }
}

/// Naive Bayes model over the three fixed labels
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    /// Known words plus the unknown-word sentinel
    vocabulary: Vocabulary,
    /// Smoothing pseudo-count
    alpha: f64,
    /// Indexed by [`Label::index`]
    stats: [ClassStatistics; Label::COUNT],
}

impl NaiveBayes {
    /// Create an untrained model whose vocabulary is seeded from `documents`
    ///
    /// # Arguments
    /// * `documents` - Tokenized documents (normally the training set)
    /// * `alpha` - Smoothing parameter, `>= 0`
    pub fn new<S: AsRef<str>>(documents: &[Vec<S>], alpha: f64) -> Self {
        Self {
            vocabulary: Vocabulary::from_documents(documents),
            alpha,
            stats: Default::default(),
        }
    }

    /// Build and train in one step
    pub fn fit<S: AsRef<str>>(documents: &[Vec<S>], labels: &[Label], alpha: f64) -> Result<Self> {
        let mut model = Self::new(documents, alpha);
        model.train_model(documents, labels)?;
        Ok(model)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Vocabulary size, sentinel included
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn statistics(&self, label: Label) -> &ClassStatistics {
        &self.stats[label.index()]
    }

    /// Training documents seen across all labels
    pub fn total_documents(&self) -> usize {
        self.stats.iter().map(|s| s.doc_count).sum()
    }

    /// Train over parallel lists of documents and labels
    pub fn train_model<S: AsRef<str>>(&mut self, documents: &[Vec<S>], labels: &[Label]) -> Result<()> {
        if documents.len() != labels.len() {
            return Err(Error::LengthMismatch {
                documents: documents.len(),
                labels: labels.len(),
            });
        }

        for (doc, &label) in documents.iter().zip(labels) {
            self.tokenize_and_update_model(doc, label);
        }

        debug!(
            documents = documents.len(),
            vocab_size = self.vocab_size(),
            alpha = self.alpha,
            "trained naive bayes model"
        );
        Ok(())
    }

    /// Add one document's counts to the statistics of `label`
    pub fn update_model(&mut self, bow: &BagOfWords, label: Label) {
        let stats = &mut self.stats[label.index()];
        for (word, &count) in bow {
            *stats.word_counts.entry(word.clone()).or_insert(0.0) += count;
            self.vocabulary.insert(word);
        }
        stats.word_total += total_count(bow);
        stats.doc_count += 1;
    }

    /// Tokenize a raw document and apply [`NaiveBayes::update_model`]
    pub fn tokenize_and_update_model<S: AsRef<str>>(&mut self, doc: &[S], label: Label) {
        let bow = tokenize_doc(doc);
        self.update_model(&bow, label);
    }

    /// The `n` most frequent words for `label`, highest count first
    ///
    /// Equal counts are ordered alphabetically.
    pub fn top_n(&self, label: Label, n: usize) -> Vec<(String, f64)> {
        let mut words: Vec<(String, f64)> = self
            .statistics(label)
            .word_counts
            .iter()
            .map(|(w, &c)| (w.clone(), c))
            .collect();

        words.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(n);
        words
    }

    /// Unsmoothed P(word | label); `None` when the label has no tokens
    pub fn p_word_given_label(&self, word: &str, label: Label) -> Option<f64> {
        let stats = self.statistics(label);
        if stats.word_total == 0.0 {
            return None;
        }
        Some(stats.count(word) / stats.word_total)
    }

    /// Smoothed P(word | label)
    ///
    /// Words outside the vocabulary get the same floor as words never seen
    /// with this label.
    pub fn p_word_given_label_and_pseudocount(&self, word: &str, label: Label) -> f64 {
        let stats = self.statistics(label);
        let vocab_size = self.vocabulary.len() as f64;
        (stats.count(word) + self.alpha) / (stats.word_total + vocab_size * self.alpha)
    }

    /// Sum of log smoothed probabilities over the distinct words of `bow`
    ///
    /// Each key contributes once regardless of its count in the bag, while
    /// training weights words by count.
    pub fn log_likelihood(&self, bow: &BagOfWords, label: Label) -> f64 {
        bow.keys()
            .map(|word| self.p_word_given_label_and_pseudocount(word, label).ln())
            .sum()
    }

    /// ln(documents with `label` / all documents)
    pub fn log_prior(&self, label: Label) -> f64 {
        let prior = self.statistics(label).doc_count as f64 / self.total_documents() as f64;
        prior.ln()
    }

    /// Log posterior up to the evidence term shared by all labels
    pub fn unnormalized_log_posterior(&self, bow: &BagOfWords, label: Label) -> f64 {
        self.log_prior(label) + self.log_likelihood(bow, label)
    }

    /// Label with the highest unnormalized log posterior
    ///
    /// Labels are scored in [`Label::ALL`] order and the first maximum wins.
    pub fn classify(&self, bow: &BagOfWords) -> Label {
        let mut best = Label::Positive;
        let mut best_score = self.unnormalized_log_posterior(bow, best);

        for label in [Label::Negative, Label::Neutral] {
            let score = self.unnormalized_log_posterior(bow, label);
            if score > best_score {
                best = label;
                best_score = score;
            }
        }

        best
    }

    /// ln(P(word | label) / (P(word | other_1) + P(word | other_2)))
    ///
    /// The denominator is the plain sum of the two other smoothed
    /// probabilities, not a renormalized complement. Used to rank words by
    /// how strongly they point to `label`.
    pub fn likelihood_log_ratio(&self, word: &str, label: Label) -> f64 {
        let numerator = self.p_word_given_label_and_pseudocount(word, label);
        let denominator: f64 = label
            .others()
            .iter()
            .map(|&other| self.p_word_given_label_and_pseudocount(word, other))
            .sum();
        (numerator / denominator).ln()
    }

    /// Fraction of `documents` classified as their gold label
    pub fn evaluate_classifier_accuracy<S: AsRef<str>>(
        &self,
        documents: &[Vec<S>],
        labels: &[Label],
    ) -> Result<f64> {
        if documents.len() != labels.len() {
            return Err(Error::LengthMismatch {
                documents: documents.len(),
                labels: labels.len(),
            });
        }
        if documents.is_empty() {
            return Err(Error::EmptyEvaluationSet);
        }

        let correct = documents
            .iter()
            .zip(labels)
            .filter(|(doc, gold)| self.classify(&tokenize_doc(doc.as_slice())) == **gold)
            .count();

        Ok(correct as f64 / documents.len() as f64)
    }

    /// Corpus statistics after training
    pub fn training_report(&self) -> TrainingReport {
        TrainingReport {
            doc_counts: Label::ALL.map(|l| self.statistics(l).doc_count),
            token_counts: Label::ALL.map(|l| self.statistics(l).word_total),
            vocab_size: self.vocab_size(),
        }
    }
}

/// Snapshot of per-label training counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Documents per label, indexed by [`Label::index`]
    pub doc_counts: [usize; Label::COUNT],
    /// Tokens per label, indexed by [`Label::index`]
    pub token_counts: [f64; Label::COUNT],
    /// Unique word types plus the sentinel
    pub vocab_size: usize,
}

impl TrainingReport {
    /// Labels with no training documents
    pub fn missing_labels(&self) -> Vec<Label> {
        Label::ALL
            .into_iter()
            .filter(|l| self.doc_counts[l.index()] == 0)
            .collect()
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Corpus statistics")?;
        for label in Label::ALL {
            writeln!(
                f,
                "  {:<8} documents: {:>6}  tokens: {:>10}",
                label.to_string(),
                self.doc_counts[label.index()],
                self.token_counts[label.index()]
            )?;
        }
        write!(f, "  vocabulary size: {}", self.vocab_size)
    }
}
