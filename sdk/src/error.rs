//! SDK error types.
//!
//! Provides the error type for inbound frame decoding. Frame errors are never
//! surfaced to subscribers: the dispatcher logs and drops the offending frame.

/// Errors raised while decoding an inbound frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The frame is not a JSON object with a string `type` field.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// The frame has a known type but its fields do not validate.
    #[error("malformed '{kind}' frame: {reason}")]
    Malformed {
        /// Declared frame type.
        kind: String,
        /// Decoder message.
        reason: String,
    },

    /// A participant id could not be parsed.
    #[error("invalid participant id: {0}")]
    InvalidId(String),
}
