//! Error types for the FOMC Naive Bayes library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Accuracy was requested over zero examples
    #[error("Evaluation set is empty, accuracy is undefined")]
    EmptyEvaluationSet,

    /// Parallel document/label lists differ in length
    #[error("Length mismatch: {documents} documents but {labels} labels")]
    LengthMismatch { documents: usize, labels: usize },

    /// Label value outside {1, -1, 0}
    #[error("Invalid label value: {0} (expected 1, -1 or 0)")]
    InvalidLabel(i64),

    /// Target column not present in the dataset
    #[error("Unknown target column: {0}")]
    UnknownTarget(String),

    /// Train/test or k-fold split cannot be formed
    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File extension not recognised
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Data parsing error
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
