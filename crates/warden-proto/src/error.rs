//! Protocol error types.

use thiserror::Error;

/// Errors from encoding, decoding or parsing protocol values.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// CBOR serialization failed.
    #[error("failed to encode {kind}: {reason}")]
    Encode {
        /// What was being encoded.
        kind: &'static str,
        /// Underlying encoder message.
        reason: String,
    },

    /// CBOR deserialization failed.
    #[error("failed to decode {kind}: {reason}")]
    Decode {
        /// What was being decoded.
        kind: &'static str,
        /// Underlying decoder message.
        reason: String,
    },

    /// Address text was not 20 bytes of hex.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}
