//! Error types for Open ID generation, parsing, and verification.

use thiserror::Error;

/// Errors that can occur when generating, verifying, or decoding an Open ID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpenIdError {
    /// A caller-supplied field has the wrong width and no default applies.
    #[error("{field} must be {expected} alphanumeric characters, got '{actual}'")]
    InvalidField {
        field: &'static str,
        expected: usize,
        actual: String,
    },

    /// The instant cannot be encoded in the reserved time key width.
    #[error("timestamp {millis}ms does not fit the {width}-character time key")]
    TimeKeyOverflow { millis: i64, width: usize },

    /// The ID is not exactly 32 characters long.
    #[error("ID is of invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The ID contains a disallowed character or a segment of the wrong width.
    #[error("ID format is invalid: {message}")]
    InvalidFormat { message: String },

    /// The ID does not split into the expected number of segments.
    #[error("unexpected element count in ID: expected {expected}, got {actual}")]
    InvalidStructure { expected: usize, actual: usize },

    /// The trailing checksum character does not match the secret.
    #[error("checksum does not match vendor secret")]
    ChecksumMismatch,

    /// A required environment variable is not set.
    #[error("environment variable {var} is not set")]
    MissingEnv { var: &'static str },

    /// The time segment is not a base-36 millisecond timestamp.
    #[error("invalid time key '{key}'")]
    InvalidTimeKey { key: String },
}

impl OpenIdError {
    /// Returns true if the ID failed length, format, or structure checks.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            OpenIdError::InvalidLength { .. }
                | OpenIdError::InvalidFormat { .. }
                | OpenIdError::InvalidStructure { .. }
        )
    }

    /// Returns true if the ID is well-formed but was not signed with the given secret.
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self, OpenIdError::ChecksumMismatch)
    }

    /// Returns true if retrying cannot succeed until the encoding itself changes.
    pub fn is_fatal(&self) -> bool {
        matches!(self, OpenIdError::TimeKeyOverflow { .. })
    }
}
