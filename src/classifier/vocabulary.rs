//! Vocabulary with a reserved unknown-word sentinel

use std::collections::HashMap;

/// Sentinel standing in for out-of-vocabulary words, always at index 0
pub const UNK_TOKEN: &str = "<unk>";

/// Word <-> index mapping
///
/// Words are indexed in first-seen order starting at 1. The vocabulary only
/// grows.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    word_to_idx: HashMap<String, usize>,
    idx_to_word: Vec<String>,
}

impl Vocabulary {
    /// Empty vocabulary holding only the sentinel
    pub fn new() -> Self {
        let mut word_to_idx = HashMap::new();
        word_to_idx.insert(UNK_TOKEN.to_string(), 0);
        Self {
            word_to_idx,
            idx_to_word: vec![UNK_TOKEN.to_string()],
        }
    }

    /// Build from every token of every document
    pub fn from_documents<S: AsRef<str>>(documents: &[Vec<S>]) -> Self {
        let mut vocab = Self::new();
        for doc in documents {
            for word in doc {
                vocab.insert(word.as_ref());
            }
        }
        vocab
    }

    /// Add a word, returning its index
    pub fn insert(&mut self, word: &str) -> usize {
        if let Some(&idx) = self.word_to_idx.get(word) {
            return idx;
        }
        let idx = self.idx_to_word.len();
        self.word_to_idx.insert(word.to_string(), idx);
        self.idx_to_word.push(word.to_string());
        idx
    }

    /// Index of a word, falling back to the sentinel
    pub fn index_of(&self, word: &str) -> usize {
        self.word_to_idx.get(word).copied().unwrap_or(0)
    }

    pub fn word(&self, idx: usize) -> Option<&str> {
        self.idx_to_word.get(idx).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_to_idx.contains_key(word)
    }

    /// Number of entries, sentinel included
    pub fn len(&self) -> usize {
        self.idx_to_word.len()
    }

    /// Never true: the sentinel is always present
    pub fn is_empty(&self) -> bool {
        self.idx_to_word.is_empty()
    }

    /// All entries in index order, sentinel first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.idx_to_word.iter().map(String::as_str)
    }

    /// Observed words in index order, sentinel skipped
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.idx_to_word.iter().skip(1).map(String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_at_zero() {
        let vocab = Vocabulary::new();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.word(0), Some(UNK_TOKEN));
        assert_eq!(vocab.index_of("anything"), 0);
    }

    #[test]
    fn test_from_documents() {
        let docs = vec![vec!["rate", "hike", "hike"], vec!["rate", "cut"]];
        let vocab = Vocabulary::from_documents(&docs);

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.index_of("rate"), 1);
        assert_eq!(vocab.index_of("hike"), 2);
        assert_eq!(vocab.index_of("cut"), 3);
        assert_eq!(vocab.words().collect::<Vec<_>>(), vec!["rate", "hike", "cut"]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut vocab = Vocabulary::new();
        let a = vocab.insert("taper");
        let b = vocab.insert("taper");
        assert_eq!(a, b);
        assert_eq!(vocab.len(), 2);

        // Re-inserting the sentinel does not grow the vocabulary
        vocab.insert(UNK_TOKEN);
        assert_eq!(vocab.len(), 2);
    }
}
