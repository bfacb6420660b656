//! Phrase templates: fixed words plus unknown positions

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WordVocabulary;

/// Token that marks an unknown word
pub const DEFAULT_MARKER: &str = "?";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Seed phrase is empty")]
    EmptyPhrase,
}

/// One word slot of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// Known word, copied verbatim into every candidate
    Fixed(String),
    /// Slot to search over
    Unknown,
}

/// A parsed seed phrase with zero or more unknown positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTemplate {
    tokens: Vec<Token>,
    unknown_positions: Vec<usize>,
    marker: String,
}

impl PhraseTemplate {
    /// Split `phrase` on whitespace; tokens equal to `marker` become unknown.
    ///
    /// Fixed words are lowercased. Length and marker-count policy is left to
    /// the caller.
    pub fn parse(phrase: &str, marker: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut unknown_positions = Vec::new();

        for (i, raw) in phrase.split_whitespace().enumerate() {
            if raw == marker {
                unknown_positions.push(i);
                tokens.push(Token::Unknown);
            } else {
                tokens.push(Token::Fixed(raw.to_lowercase()));
            }
        }

        if tokens.is_empty() {
            return Err(TemplateError::EmptyPhrase);
        }

        Ok(Self {
            tokens,
            unknown_positions,
            marker: marker.to_string(),
        })
    }

    /// Number of word positions
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Indices of unknown positions, ascending
    pub fn unknown_positions(&self) -> &[usize] {
        &self.unknown_positions
    }

    pub fn missing_count(&self) -> usize {
        self.unknown_positions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.unknown_positions.is_empty()
    }

    /// Fixed words with their positions
    pub fn fixed_words(&self) -> impl Iterator<Item = (usize, &str)> {
        self.tokens.iter().enumerate().filter_map(|(i, t)| match t {
            Token::Fixed(w) => Some((i, w.as_str())),
            Token::Unknown => None,
        })
    }

    /// Fixed words that do not appear in `vocabulary`.
    ///
    /// A template with any such word can never produce a checksum-valid phrase.
    pub fn words_outside<'a>(&'a self, vocabulary: &WordVocabulary) -> Vec<(usize, &'a str)> {
        self.fixed_words()
            .filter(|(_, w)| !vocabulary.contains(w))
            .collect()
    }
}

impl fmt::Display for PhraseTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match token {
                Token::Fixed(w) => f.write_str(w)?,
                Token::Unknown => f.write_str(&self.marker)?,
            }
        }
        Ok(())
    }
}
