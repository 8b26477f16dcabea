//! Model selection utilities

pub mod cross_validation;
pub mod split;

pub use cross_validation::{select_alpha, AlphaSearch, CVSplit, CrossValidator, DEFAULT_ALPHA_GRID};
pub use split::{select, train_test_split};
