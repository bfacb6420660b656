//! SeedMend Core Engine
//!
//! Missing-word search: candidate enumeration, checksum filtering, and
//! multi-threaded aggregation of valid phrases.

mod error;
mod generator;
mod oracle;
mod search;
mod stats;

pub use error::RecoveryError;
pub use generator::{CandidateGenerator, CandidateMnemonic, Candidates};
pub use oracle::{Bip39Checksum, ChecksumOracle};
pub use search::{Outcome, RecoveryReport, RecoverySearch, SearchConfig};
pub use stats::SearchStats;

// Re-exports for convenience
pub use seedmend_phrase::{
    PhraseTemplate, Token, WordVocabulary, VocabularyError, TemplateError, DEFAULT_MARKER,
    search_space, format_space, estimate_time, format_duration,
};
