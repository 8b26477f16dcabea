//! Data types for policy statements and their market-move labels

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Direction of an indicator move after a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Label {
    /// Indicator moved up (encoded as 1)
    Positive,
    /// Indicator moved down (encoded as -1)
    Negative,
    /// No significant move (encoded as 0)
    Neutral,
}

impl Label {
    /// All labels in classification evaluation order
    pub const ALL: [Label; 3] = [Label::Positive, Label::Negative, Label::Neutral];

    /// Number of labels
    pub const COUNT: usize = 3;

    /// Dense index in 0..3
    pub fn index(self) -> usize {
        match self {
            Label::Positive => 0,
            Label::Negative => 1,
            Label::Neutral => 2,
        }
    }

    /// Reverse of [`Label::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Integer encoding used in the datasets
    pub fn value(self) -> i64 {
        match self {
            Label::Positive => 1,
            Label::Negative => -1,
            Label::Neutral => 0,
        }
    }

    /// The two labels other than `self`
    pub fn others(self) -> [Label; 2] {
        match self {
            Label::Positive => [Label::Negative, Label::Neutral],
            Label::Negative => [Label::Positive, Label::Neutral],
            Label::Neutral => [Label::Positive, Label::Negative],
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Label::Positive),
            -1 => Ok(Label::Negative),
            0 => Ok(Label::Neutral),
            other => Err(Error::InvalidLabel(other)),
        }
    }
}

impl From<Label> for i64 {
    fn from(label: Label) -> Self {
        label.value()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        };
        write!(f, "{}", name)
    }
}

/// One tokenized policy statement and its labels per target column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Already-segmented tokens
    #[serde(rename = "statement")]
    pub tokens: Vec<String>,
    /// Target column name -> label
    #[serde(flatten)]
    pub targets: BTreeMap<String, Label>,
}

impl Statement {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            targets: BTreeMap::new(),
        }
    }

    /// Attach a label for a target column
    pub fn with_target(mut self, target: impl Into<String>, label: Label) -> Self {
        self.targets.insert(target.into(), label);
        self
    }

    pub fn label(&self, target: &str) -> Option<Label> {
        self.targets.get(target).copied()
    }
}

/// Collection of statements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub statements: Vec<Statement>,
}

impl Dataset {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Target columns present in at least one statement
    pub fn target_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .statements
            .iter()
            .flat_map(|s| s.targets.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Documents and labels for one target, skipping rows without a label
    pub fn column(&self, target: &str) -> Result<(Vec<Vec<String>>, Vec<Label>)> {
        let (documents, labels): (Vec<_>, Vec<_>) = self
            .statements
            .iter()
            .filter_map(|s| s.label(target).map(|label| (s.tokens.clone(), label)))
            .unzip();

        if labels.is_empty() {
            return Err(Error::UnknownTarget(target.to_string()));
        }

        Ok((documents, labels))
    }

    /// Lowercase every token in place
    pub fn lowercase(&mut self) {
        for statement in &mut self.statements {
            for token in &mut statement.tokens {
                *token = token.to_lowercase();
            }
        }
    }
}
