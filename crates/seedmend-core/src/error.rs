//! Structural failures that stop a search before it starts

use seedmend_phrase::TemplateError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("Seed phrase is empty")]
    EmptyPhrase,
    #[error("{count} missing words exceeds the limit of {max}")]
    TooManyMissing { count: usize, max: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl From<TemplateError> for RecoveryError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::EmptyPhrase => RecoveryError::EmptyPhrase,
        }
    }
}
