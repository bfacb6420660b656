//! Exhaustive candidate enumeration
//!
//! Candidates are ordered as a mixed-radix counter over vocabulary indices at
//! the unknown positions, the last unknown position turning fastest. The
//! outermost digit can be restricted to a sub-range, which is how the search
//! splits work across threads.

use std::ops::Range;

use seedmend_phrase::{search_space, PhraseTemplate, Token, WordVocabulary};

/// One fully-instantiated phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMnemonic<'a> {
    words: Vec<&'a str>,
}

impl<'a> CandidateMnemonic<'a> {
    /// Words joined with single spaces
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

/// Restartable source of candidates for a template and vocabulary
#[derive(Debug, Clone)]
pub struct CandidateGenerator<'a> {
    template: &'a PhraseTemplate,
    vocabulary: &'a WordVocabulary,
    outer: Range<usize>,
}

impl<'a> CandidateGenerator<'a> {
    /// Generator over the full space
    pub fn new(template: &'a PhraseTemplate, vocabulary: &'a WordVocabulary) -> Self {
        Self {
            template,
            vocabulary,
            outer: 0..vocabulary.len(),
        }
    }

    /// Same generator with the outermost unknown slot limited to `outer`
    /// (clamped to the vocabulary)
    pub fn shard(&self, outer: Range<usize>) -> Self {
        let end = outer.end.min(self.vocabulary.len());
        Self {
            template: self.template,
            vocabulary: self.vocabulary,
            outer: outer.start.min(end)..end,
        }
    }

    /// Split the outermost slot into at most `count` contiguous, non-empty
    /// shards covering this generator's range.
    ///
    /// A complete template has a single candidate and yields one shard.
    pub fn shards(&self, count: usize) -> Vec<Self> {
        if self.template.is_complete() {
            return vec![self.clone()];
        }

        let total = self.outer.len();
        let count = count.clamp(1, total.max(1));
        let base = total / count;
        let extra = total % count;

        let mut shards = Vec::with_capacity(count);
        let mut start = self.outer.start;
        for i in 0..count {
            let len = base + usize::from(i < extra);
            if len == 0 {
                continue;
            }
            shards.push(self.shard(start..start + len));
            start += len;
        }
        shards
    }

    /// Outermost slot range of this generator
    pub fn outer_range(&self) -> Range<usize> {
        self.outer.clone()
    }

    /// Number of candidates this generator yields (saturating)
    pub fn space_size(&self) -> u128 {
        let k = self.template.missing_count();
        if k == 0 {
            return 1;
        }
        search_space(self.vocabulary.len(), k - 1).saturating_mul(self.outer.len() as u128)
    }

    /// Fresh iterator from the first candidate
    pub fn iter(&self) -> Candidates<'a> {
        let k = self.template.missing_count();
        let mut digits = vec![0usize; k];
        if let Some(first) = digits.first_mut() {
            *first = self.outer.start;
        }

        Candidates {
            generator: self.clone(),
            exhausted: k > 0 && self.outer.is_empty(),
            digits,
        }
    }

    fn build(&self, digits: &[usize]) -> CandidateMnemonic<'a> {
        let template: &'a PhraseTemplate = self.template;
        let vocabulary: &'a WordVocabulary = self.vocabulary;
        let mut next_digit = digits.iter();
        let words = template
            .tokens()
            .iter()
            .map(|token| match token {
                Token::Fixed(word) => word.as_str(),
                Token::Unknown => {
                    let index = next_digit.next().copied().unwrap_or_default();
                    &vocabulary[index]
                }
            })
            .collect();

        CandidateMnemonic { words }
    }
}

impl<'a> IntoIterator for &CandidateGenerator<'a> {
    type Item = CandidateMnemonic<'a>;
    type IntoIter = Candidates<'a>;

    fn into_iter(self) -> Candidates<'a> {
        self.iter()
    }
}

/// Iterator state: one vocabulary index per unknown position
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    generator: CandidateGenerator<'a>,
    digits: Vec<usize>,
    exhausted: bool,
}

impl<'a> Candidates<'a> {
    fn advance(&mut self) {
        let radix = self.generator.vocabulary.len();
        for i in (0..self.digits.len()).rev() {
            self.digits[i] += 1;
            let limit = if i == 0 { self.generator.outer.end } else { radix };
            if self.digits[i] < limit {
                return;
            }
            self.digits[i] = 0;
        }
        self.exhausted = true;
    }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = CandidateMnemonic<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let candidate = self.generator.build(&self.digits);
        self.advance();
        Some(candidate)
    }
}
