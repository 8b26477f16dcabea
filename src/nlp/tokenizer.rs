//! Bag-of-words tokenizer
//!
//! Counts already-segmented tokens. Case folding and other cleaning happen
//! upstream (see [`crate::models::Dataset::lowercase`]).

use std::collections::HashMap;

/// Token -> occurrence count within one document
pub type BagOfWords = HashMap<String, f64>;

/// Count how many times each distinct token occurs in `doc`
pub fn tokenize_doc<S: AsRef<str>>(doc: &[S]) -> BagOfWords {
    let mut bow = BagOfWords::with_capacity(doc.len());
    for word in doc {
        *bow.entry(word.as_ref().to_string()).or_insert(0.0) += 1.0;
    }
    bow
}

/// Sum of all counts in a bag
pub fn total_count(bow: &BagOfWords) -> f64 {
    bow.values().sum()
}
