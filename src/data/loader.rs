//! Dataset loading
//!
//! Two on-disk layouts are accepted, chosen by file extension:
//!
//! - `.json`: an array of `{"statement": [tokens...], "<target>": 1|-1|0, ...}`
//! - `.csv`: a `statement` column of whitespace-separated tokens, every other
//!   column is a target holding 1, -1 or 0 (empty cells mean "no label")

use crate::error::{Error, Result};
use crate::models::{Dataset, Label, Statement};
use csv::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Column holding the statement tokens
pub const STATEMENT_COLUMN: &str = "statement";

/// Data loader for statement datasets
pub struct DataLoader;

impl DataLoader {
    /// Load a dataset, dispatching on the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let dataset = match ext {
            "json" => Self::load_json(path)?,
            "csv" => Self::load_csv(path)?,
            _ => return Err(Error::UnsupportedFormat(ext.to_string())),
        };

        info!(
            path = %path.display(),
            statements = dataset.len(),
            targets = ?dataset.target_names(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Load statements from a JSON array
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let file = File::open(path)?;
        let statements: Vec<Statement> = serde_json::from_reader(file)?;
        Ok(Dataset::new(statements))
    }

    /// Load statements from a CSV file
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let file = File::open(path)?;
        Self::read_csv(file)
    }

    /// Parse CSV from any reader
    pub fn read_csv<R: Read>(source: R) -> Result<Dataset> {
        let mut reader = Reader::from_reader(source);
        let mut statements = Vec::new();

        for (row, result) in reader.deserialize().enumerate() {
            let record: HashMap<String, String> = result?;
            statements.push(Self::parse_row(row, record)?);
        }

        Ok(Dataset::new(statements))
    }

    fn parse_row(row: usize, mut record: HashMap<String, String>) -> Result<Statement> {
        let text = record.remove(STATEMENT_COLUMN).ok_or_else(|| {
            Error::ParseError(format!("row {}: missing '{}' column", row, STATEMENT_COLUMN))
        })?;

        let tokens = text.split_whitespace().map(str::to_string).collect();
        let mut statement = Statement::new(tokens);

        for (column, cell) in record {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let value: i64 = cell.parse().map_err(|_| {
                Error::ParseError(format!("row {}: column '{}' has non-integer '{}'", row, column, cell))
            })?;
            statement.targets.insert(column, Label::try_from(value)?);
        }

        Ok(statement)
    }

    /// Save a dataset as pretty JSON
    pub fn save_json<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &dataset.statements)?;
        Ok(())
    }
}
