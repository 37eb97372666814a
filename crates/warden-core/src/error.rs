//! Unit error types.

use thiserror::Error;
use warden_proto::EntryPoint;

/// Errors surfaced by Target entry points.
///
/// A returned error always means the invocation was a no-op: no field
/// changed and nothing reached the event sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// A protected entry point was invoked with its fail flag set.
    #[error("operation reverted: {entry_point} called with fail flag set")]
    OperationReverted {
        /// Entry point that reverted.
        entry_point: EntryPoint,
    },
}

impl TargetError {
    /// Entry point the error originated from.
    pub fn entry_point(&self) -> EntryPoint {
        match self {
            Self::OperationReverted { entry_point } => *entry_point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TargetError::OperationReverted { entry_point: EntryPoint::ProtectedOperationA };
        insta::assert_snapshot!(
            err.to_string(),
            @"operation reverted: protected_operation_a called with fail flag set"
        );
    }

    #[test]
    fn entry_point_is_preserved() {
        let err = TargetError::OperationReverted { entry_point: EntryPoint::ProtectedOperationB };
        assert_eq!(err.entry_point(), EntryPoint::ProtectedOperationB);
    }
}
