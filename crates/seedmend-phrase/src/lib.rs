//! SeedMend Phrase Model
//!
//! Word vocabularies, phrase templates with unknown positions, and
//! search-space arithmetic.

mod vocabulary;
mod template;
mod space;

pub use vocabulary::{WordVocabulary, VocabularyError};
pub use template::{PhraseTemplate, Token, TemplateError, DEFAULT_MARKER};
pub use space::{search_space, format_space, estimate_time, format_duration};
