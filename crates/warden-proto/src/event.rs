//! Log records emitted by units.

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// Record emitted by the unprotected operation.
///
/// Carries the caller-supplied value and flag verbatim. The committed
/// protected value may differ from `value`; the event reports the input, not
/// the resulting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Value supplied to the operation.
    pub value: String,
    /// Flag supplied to the operation.
    pub fail_flag: bool,
}

impl MessageEvent {
    /// Create a new event.
    pub fn new(value: impl Into<String>, fail_flag: bool) -> Self {
        Self { value: value.into(), fail_flag }
    }

    /// Encode as CBOR, appending to `dst`.
    pub fn encode(&self, dst: &mut Vec<u8>) -> Result<(), ProtoError> {
        ciborium::ser::into_writer(self, dst)
            .map_err(|e| ProtoError::Encode { kind: "message event", reason: e.to_string() })
    }

    /// Decode from CBOR bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtoError> {
        ciborium::de::from_reader(bytes)
            .map_err(|e| ProtoError::Decode { kind: "message event", reason: e.to_string() })
    }
}
