//! Experiment configuration

use crate::error::{Error, Result};
use crate::ml::DEFAULT_ALPHA_GRID;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a full multi-epoch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Label columns, one model per column per epoch
    pub targets: Vec<String>,
    /// Repeated random splits to average over
    pub epochs: usize,
    /// Held-out fraction per split
    pub test_size: f64,
    /// Smoothing parameter when not tuned
    pub alpha: f64,
    /// Search alpha by cross-validation on each training split
    pub tune_alpha: bool,
    /// Candidates for the search
    pub alpha_grid: Vec<f64>,
    /// Folds for the search
    pub n_folds: usize,
    /// Words listed per label in the report
    pub top_n: usize,
    /// Fixed RNG seed; entropy when unset
    pub seed: Option<u64>,
    /// Lowercase tokens at load time
    pub lowercase: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "vix_buckets_1d".to_string(),
                "vix_buckets_5d".to_string(),
                "tnx_buckets_1d".to_string(),
                "tnx_buckets_5d".to_string(),
            ],
            epochs: 4,
            test_size: 0.2,
            alpha: 1.0,
            tune_alpha: false,
            alpha_grid: DEFAULT_ALPHA_GRID.to_vec(),
            n_folds: 5,
            top_n: 5,
            seed: None,
            lowercase: false,
        }
    }
}

impl ExperimentConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(Error::InvalidConfig("targets must not be empty".to_string()));
        }
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_string()));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if !(self.alpha >= 0.0) {
            return Err(Error::InvalidConfig(format!("alpha must be >= 0, got {}", self.alpha)));
        }
        if self.tune_alpha {
            if self.alpha_grid.is_empty() {
                return Err(Error::InvalidConfig("alpha_grid must not be empty".to_string()));
            }
            if let Some(bad) = self.alpha_grid.iter().find(|a| !(**a >= 0.0)) {
                return Err(Error::InvalidConfig(format!("alpha_grid contains {}", bad)));
            }
            if self.n_folds < 2 {
                return Err(Error::InvalidConfig("n_folds must be >= 2".to_string()));
            }
        }
        Ok(())
    }
}

/// Load configuration from a `.json` or `.toml` file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
    let content = std::fs::read_to_string(path.as_ref())?;

    let ext = path.as_ref().extension().and_then(|e| e.to_str()).unwrap_or("");

    let config: ExperimentConfig = match ext {
        "json" => serde_json::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        _ => return Err(Error::UnsupportedFormat(ext.to_string())),
    };

    config.validate()?;
    Ok(config)
}

/// Save configuration to a `.json` or `.toml` file
pub fn save_config<P: AsRef<Path>>(config: &ExperimentConfig, path: P) -> Result<()> {
    let ext = path.as_ref().extension().and_then(|e| e.to_str()).unwrap_or("");

    let content = match ext {
        "json" => serde_json::to_string_pretty(config)?,
        "toml" => toml::to_string_pretty(config)?,
        _ => return Err(Error::UnsupportedFormat(ext.to_string())),
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.targets.len(), 4);
        assert_eq!(config.epochs, 4);
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.alpha_grid.len(), 13);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ExperimentConfig {
            test_size: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExperimentConfig {
            alpha: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExperimentConfig {
            tune_alpha: true,
            n_folds: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ExperimentConfig = toml::from_str("epochs = 10\nseed = 7\n").unwrap();
        assert_eq!(config.epochs, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.test_size, 0.2);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let config = ExperimentConfig {
            targets: vec!["vix_buckets_1d".to_string()],
            test_size: 0.25,
            tune_alpha: true,
            alpha_grid: vec![0.5, 1.0, 2.0],
            seed: Some(42),
            ..Default::default()
        };

        for name in ["config.json", "config.toml"] {
            let path = dir.path().join(name);
            save_config(&config, &path).unwrap();
            assert_eq!(load_config(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "epochs: 3").unwrap();
        assert!(matches!(load_config(&path), Err(Error::UnsupportedFormat(_))));
    }
}
