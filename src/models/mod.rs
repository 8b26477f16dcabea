//! Data models

pub mod types;

pub use types::{Dataset, Label, Statement};
