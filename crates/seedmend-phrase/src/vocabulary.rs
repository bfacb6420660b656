//! Candidate word vocabularies

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bip39::Language;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Vocabulary is empty")]
    EmptyVocabulary,
    #[error("Duplicate word '{0}' in vocabulary")]
    DuplicateWord(String),
    #[error("Failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered, de-duplicated list of lowercase candidate words.
///
/// Immutable once built; workers share it behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct WordVocabulary {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl WordVocabulary {
    /// Build a vocabulary, keeping the given order.
    ///
    /// Words are lowercased to match how templates normalise fixed words.
    pub fn from_words<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Vec::new();
        let mut lookup = HashSet::new();

        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if !lookup.insert(word.clone()) {
                return Err(VocabularyError::DuplicateWord(word));
            }
            list.push(word);
        }

        if list.is_empty() {
            return Err(VocabularyError::EmptyVocabulary);
        }

        Ok(Self { words: list, lookup })
    }

    /// The standard 2048-word English BIP-39 list
    pub fn bip39_english() -> Self {
        let words: Vec<String> = Language::English
            .word_list()
            .iter()
            .map(|w| w.to_string())
            .collect();

        Self {
            lookup: words.iter().cloned().collect(),
            words,
        }
    }

    /// Load a newline-separated word list; blank lines are skipped
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_words(content.lines())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl std::ops::Index<usize> for WordVocabulary {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.words[index]
    }
}
