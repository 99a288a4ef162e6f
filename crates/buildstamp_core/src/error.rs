//! Error types for configuration and host I/O.

use thiserror::Error;

/// Errors surfaced outside the timestamp query path.
///
/// Queries themselves never fail; a target without a resolvable time is
/// reported as `None`.
#[derive(Debug, Error)]
pub enum StampError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Archive could not be read as a member directory.
    #[error("Archive error: {0}")]
    Archive(#[from] buildstamp_archive::ArchiveError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StampError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
