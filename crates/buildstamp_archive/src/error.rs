//! Archive parse error types.

use thiserror::Error;

/// Errors that can occur while reading an archive's member directory.
///
/// Every variant means the archive is unusable as a whole; callers never
/// receive a partially parsed index alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// The buffer does not start with a known archive magic string.
    #[error("Not an archive: bad magic")]
    BadMagic,

    /// The archive is a thin archive and thin archives were not accepted.
    #[error("Thin archives are not accepted")]
    ThinArchive,

    /// Fewer bytes remain than a full member header needs.
    #[error("Truncated member header at offset {offset}")]
    TruncatedHeader {
        /// Byte offset of the partial header.
        offset: usize,
    },

    /// Member data extends past the end of the archive.
    #[error("Member at offset {offset} declares {size} bytes past end of archive")]
    TruncatedData {
        /// Byte offset of the member header.
        offset: usize,
        /// Declared member size.
        size: u64,
    },

    /// A header field could not be interpreted.
    #[error("Malformed member header at offset {offset}: {message}")]
    Malformed {
        /// Error message.
        message: String,
        /// Byte offset of the member header.
        offset: usize,
    },

    /// The archive is larger than the configured read limit.
    #[error("Archive is larger than the {limit} byte read limit")]
    TooLarge {
        /// Configured limit in bytes.
        limit: u64,
    },
}

impl ArchiveError {
    /// Creates a malformed header error.
    pub fn malformed(message: impl Into<String>, offset: usize) -> Self {
        Self::Malformed {
            message: message.into(),
            offset,
        }
    }
}
