//! # FOMC Naive Bayes
//!
//! Multinomial Naive Bayes over the tokenized text of central-bank policy
//! statements, predicting bucketed moves of the VIX and the 10-year yield
//! (TNX) at 1-day and 5-day horizons.
//!
//! ## Modules
//!
//! - `nlp` - Bag-of-words tokenizer
//! - `classifier` - Naive Bayes estimator and vocabulary
//! - `models` - Labels, statements and datasets
//! - `data` - Dataset loading (JSON, CSV)
//! - `ml` - Train/test split, k-fold cross-validation, alpha search
//! - `experiment` - Multi-epoch driver and likelihood-ratio word ranking
//! - `config` - Experiment configuration
//!
//! ## Example
//!
//! ```
//! use fomc_naive_bayes::{tokenize_doc, Label, NaiveBayes};
//!
//! let docs = vec![vec!["rate", "hike", "hike"], vec!["rate", "cut"], vec!["steady"]];
//! let labels = vec![Label::Positive, Label::Negative, Label::Neutral];
//!
//! let model = NaiveBayes::fit(&docs, &labels, 1.0).unwrap();
//! assert_eq!(model.classify(&tokenize_doc(&["hike"])), Label::Positive);
//! ```

pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod experiment;
pub mod ml;
pub mod models;
pub mod nlp;

pub use classifier::{NaiveBayes, TrainingReport, Vocabulary};
pub use config::ExperimentConfig;
pub use data::DataLoader;
pub use error::{Error, Result};
pub use experiment::{Experiment, ExperimentReport, LikelihoodRatioTable};
pub use ml::{select_alpha, AlphaSearch, CrossValidator};
pub use models::{Dataset, Label, Statement};
pub use nlp::{tokenize_doc, BagOfWords};
