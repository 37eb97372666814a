//! Invocation payloads.
//!
//! A [`Call`] names one entry point on one unit together with its arguments.
//! Calls travel through the ledger as CBOR, the same encoding used for every
//! other payload in the workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{address::Address, error::ProtoError};

/// Named entry points on a Target unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryPoint {
    /// `register_callback`
    RegisterCallback,
    /// `unprotected_operation`
    UnprotectedOperation,
    /// `protected_operation_a`
    ProtectedOperationA,
    /// `protected_operation_b`
    ProtectedOperationB,
}

impl EntryPoint {
    /// Stable name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegisterCallback => "register_callback",
            Self::UnprotectedOperation => "unprotected_operation",
            Self::ProtectedOperationA => "protected_operation_a",
            Self::ProtectedOperationB => "protected_operation_b",
        }
    }

    /// Whether a set fail flag reverts this entry point.
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::ProtectedOperationA | Self::ProtectedOperationB)
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mutating call against a Target unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetCall {
    /// Record `callback` as the authorized address.
    RegisterCallback {
        /// Address to record.
        callback: Address,
    },

    /// Emit a message event and store the sentinel value.
    UnprotectedOperation {
        /// Value carried by the emitted event.
        value: String,
        /// Carried by the event; never causes a revert here.
        fail_flag: bool,
    },

    /// Flag-gated write through the first protected entry point.
    ProtectedOperationA {
        /// Candidate protected value.
        value: String,
        /// Revert instead of committing.
        fail_flag: bool,
    },

    /// Flag-gated write through the second protected entry point.
    ProtectedOperationB {
        /// Candidate protected value.
        value: String,
        /// Revert instead of committing.
        fail_flag: bool,
    },
}

impl TargetCall {
    /// Entry point this call dispatches to.
    pub const fn entry_point(&self) -> EntryPoint {
        match self {
            Self::RegisterCallback { .. } => EntryPoint::RegisterCallback,
            Self::UnprotectedOperation { .. } => EntryPoint::UnprotectedOperation,
            Self::ProtectedOperationA { .. } => EntryPoint::ProtectedOperationA,
            Self::ProtectedOperationB { .. } => EntryPoint::ProtectedOperationB,
        }
    }

    /// Whether executing this call is guaranteed to revert.
    pub const fn reverts(&self) -> bool {
        match self {
            Self::ProtectedOperationA { fail_flag, .. }
            | Self::ProtectedOperationB { fail_flag, .. } => *fail_flag,
            Self::RegisterCallback { .. } | Self::UnprotectedOperation { .. } => false,
        }
    }
}

/// A call against a Caller unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerCall {
    /// Forward `call` to the Target at `target`, propagating any revert.
    Forward {
        /// Target unit to call into.
        target: Address,
        /// Call to forward.
        call: TargetCall,
    },
}

/// Any call the ledger can route to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    /// Call addressed to a Target unit.
    Target(TargetCall),
    /// Call addressed to a Caller unit.
    Caller(CallerCall),
}

impl Call {
    /// Encode as CBOR, appending to `dst`.
    pub fn encode(&self, dst: &mut Vec<u8>) -> Result<(), ProtoError> {
        ciborium::ser::into_writer(self, dst)
            .map_err(|e| ProtoError::Encode { kind: "call", reason: e.to_string() })
    }

    /// Decode from CBOR bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtoError> {
        ciborium::de::from_reader(bytes)
            .map_err(|e| ProtoError::Decode { kind: "call", reason: e.to_string() })
    }
}

impl From<TargetCall> for Call {
    fn from(call: TargetCall) -> Self {
        Self::Target(call)
    }
}

impl From<CallerCall> for Call {
    fn from(call: CallerCall) -> Self {
        Self::Caller(call)
    }
}
