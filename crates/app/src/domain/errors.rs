//! Repository errors.

use std::error::Error as StdError;

use thiserror::Error;

/// A lookup could not be answered, as opposed to answering "not found".
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store failed to answer.
    #[error("storage unavailable")]
    Unavailable(#[source] Box<dyn StdError + Send + Sync>),
}

impl RepositoryError {
    /// Wrap an underlying storage failure.
    pub fn unavailable(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Unavailable(source.into())
    }
}
