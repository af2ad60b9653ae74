//! Grammar error types.

use thiserror::Error;

/// Errors raised while parsing knitout tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid direction '{0}': expected '+' or '-'")]
    InvalidDirection(String),

    #[error("invalid bed '{0}'")]
    InvalidBedSpec(String),

    #[error("bed+needle '{0}' is not in <bed><needle> format")]
    InvalidBedNeedleFormat(String),

    #[error("needle index must be an integer greater or equal zero: '{0}'")]
    InvalidNeedleIndex(String),
}

impl CodecError {
    /// Returns a stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            CodecError::InvalidDirection(_) => "INVALID_DIRECTION",
            CodecError::InvalidBedSpec(_) => "INVALID_BED_SPEC",
            CodecError::InvalidBedNeedleFormat(_) => "INVALID_BED_NEEDLE_FORMAT",
            CodecError::InvalidNeedleIndex(_) => "INVALID_NEEDLE_INDEX",
        }
    }
}
