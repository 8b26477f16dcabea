//! Repeated-trial experiment over several target columns

pub mod likelihood;
pub mod runner;

pub use likelihood::LikelihoodRatioTable;
pub use runner::{Experiment, ExperimentReport, TargetOutcome, TopWords};
