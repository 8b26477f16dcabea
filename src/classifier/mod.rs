//! Naive Bayes text classification

pub mod naive_bayes;
pub mod vocabulary;

pub use naive_bayes::{ClassStatistics, NaiveBayes, TrainingReport};
pub use vocabulary::{Vocabulary, UNK_TOKEN};
