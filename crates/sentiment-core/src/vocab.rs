//! Word-index vocabulary and the text → fixed-length sequence pipeline.
//!
//! Mirrors the tokenisation the model was trained with: lowercase, split on
//! whitespace, shift each known index by [`INDEX_OFFSET`], drop anything at or
//! above `max_words`, then pre-pad / pre-truncate to `max_len`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CoreError;

/// Indices 0–2 are reserved for padding, start and unknown markers.
pub const INDEX_OFFSET: u32 = 3;

/// Value used to left-pad short sequences.
pub const PAD_ID: i64 = 0;

/// Vocabulary table plus the truncation parameters the model was built with.
///
/// Serialized as `vocab.json`:
/// `{"word_index": {"the": 1, ...}, "max_words": 10000, "max_len": 200}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    word_index: HashMap<String, u32>,
    max_words: usize,
    max_len: usize,
}

impl Vocabulary {
    /// Load and validate a vocabulary artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::VocabNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let vocab: Vocabulary = serde_json::from_str(&raw)?;
        vocab.validate()?;

        info!(
            words = vocab.word_index.len(),
            max_words = vocab.max_words,
            max_len = vocab.max_len,
            path = %path.display(),
            "loaded vocabulary"
        );
        Ok(vocab)
    }

    /// Build a vocabulary in memory.
    pub fn from_parts(
        word_index: HashMap<String, u32>,
        max_words: usize,
        max_len: usize,
    ) -> Result<Self, CoreError> {
        let vocab = Self {
            word_index,
            max_words,
            max_len,
        };
        vocab.validate()?;
        Ok(vocab)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.max_len == 0 {
            return Err(CoreError::InvalidVocab("max_len must be positive".into()));
        }
        Ok(())
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of entries in the word-index table.
    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }

    /// Map text to shifted word indices, without padding.
    ///
    /// Unknown words and words whose shifted index falls outside `max_words`
    /// are skipped; there is no unknown-token placeholder.
    pub fn tokenize(&self, text: &str) -> Vec<i64> {
        text.to_lowercase()
            .split_whitespace()
            .filter_map(|word| self.word_index.get(word))
            .map(|&idx| idx as u64 + INDEX_OFFSET as u64)
            .filter(|&idx| idx < self.max_words as u64)
            .map(|idx| idx as i64)
            .collect()
    }

    /// Full pipeline: tokenize, then pad/truncate to `max_len`.
    pub fn encode(&self, text: &str) -> Vec<i64> {
        pad_sequence(&self.tokenize(text), self.max_len)
    }
}

/// Left-pad with [`PAD_ID`] or truncate from the left, keeping the rightmost
/// `max_len` ids.
pub fn pad_sequence(ids: &[i64], max_len: usize) -> Vec<i64> {
    if ids.len() >= max_len {
        return ids[ids.len() - max_len..].to_vec();
    }
    let mut padded = vec![PAD_ID; max_len - ids.len()];
    padded.extend_from_slice(ids);
    padded
}
