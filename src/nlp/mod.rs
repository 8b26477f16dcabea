//! Text processing
//!
//! Statements arrive already segmented into tokens; this module only turns a
//! token sequence into a bag-of-words.

pub mod tokenizer;

pub use tokenizer::{tokenize_doc, BagOfWords};
