//! Core error types.

use knitout_codec::CodecError;
use thiserror::Error;

/// Result alias for builder operations.
pub type Result<T> = std::result::Result<T, KnitoutError>;

/// Fatal errors from the knitout builder.
///
/// A call that returns one of these leaves the writer exactly as it was.
#[derive(Debug, Error)]
pub enum KnitoutError {
    #[error("invalid header name '{name}': {reason}")]
    InvalidHeaderName { name: String, reason: String },

    #[error("invalid value for header '{name}': {reason}")]
    InvalidHeaderValue { name: String, reason: String },

    #[error("header '{name}' is reserved (set carriers when creating the writer instead)")]
    ReservedHeaderName { name: String },

    #[error("header '{name}' already set earlier")]
    DuplicateHeader { name: String },

    #[error("missing carrier name")]
    InvalidCarrierName { name: String },

    #[error("carrier '{carrier}' is already in")]
    CarrierAlreadyIn { carrier: String },

    #[error("carrier '{carrier}' isn't in")]
    CarrierNotIn { carrier: String },

    #[error("carrier '{carrier}' isn't in the hook")]
    CarrierNotInHook { carrier: String },

    #[error("it doesn't make sense to '{operation}' on an empty carrier set")]
    EmptyCarrierSet { operation: &'static str },

    #[error("cannot split to same bed '{bed}'")]
    SameBedSplit { bed: String },

    #[error("it doesn't make sense to miss with no carriers")]
    NoCarriersForMiss,

    #[error("racking values must be finite numbers, got {value}")]
    NonFiniteRacking { value: f64 },

    #[error("unable to open '{target}' for writing: {source}")]
    SinkUnavailable {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl KnitoutError {
    /// Returns a stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            KnitoutError::InvalidHeaderName { .. } => "INVALID_HEADER_NAME",
            KnitoutError::InvalidHeaderValue { .. } => "INVALID_HEADER_VALUE",
            KnitoutError::ReservedHeaderName { .. } => "RESERVED_HEADER_NAME",
            KnitoutError::DuplicateHeader { .. } => "DUPLICATE_HEADER",
            KnitoutError::InvalidCarrierName { .. } => "INVALID_CARRIER_NAME",
            KnitoutError::CarrierAlreadyIn { .. } => "CARRIER_ALREADY_IN",
            KnitoutError::CarrierNotIn { .. } => "CARRIER_NOT_IN",
            KnitoutError::CarrierNotInHook { .. } => "CARRIER_NOT_IN_HOOK",
            KnitoutError::EmptyCarrierSet { .. } => "EMPTY_CARRIER_SET",
            KnitoutError::SameBedSplit { .. } => "SAME_BED_SPLIT",
            KnitoutError::NoCarriersForMiss => "NO_CARRIERS_FOR_MISS",
            KnitoutError::NonFiniteRacking { .. } => "NON_FINITE_RACKING",
            KnitoutError::SinkUnavailable { .. } => "SINK_UNAVAILABLE",
            KnitoutError::Codec(e) => e.error_code(),
        }
    }
}
