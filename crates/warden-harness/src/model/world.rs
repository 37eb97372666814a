//! Model world - a Target plus the Caller that forwards into it.

use super::{
    operation::{Operation, OperationResult, Registrant, Route},
    target::ModelTarget,
};

/// Observable state for oracle comparison.
///
/// This is the subset of world state that can be compared against the real
/// ledger-hosted units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Registered callback identity.
    pub callback: Registrant,
    /// Protected value.
    pub value: String,
    /// Every committed event, in order.
    pub events: Vec<(String, bool)>,
    /// Committed forwards through the Caller.
    pub forwarded: u64,
    /// Committed invocations.
    pub committed: u64,
}

/// Model world - the reference implementation.
#[derive(Debug, Clone, Default)]
pub struct ModelWorld {
    /// Model Target.
    target: ModelTarget,
    /// Committed forwards.
    forwarded: u64,
    /// Committed invocations.
    committed: u64,
}

impl ModelWorld {
    /// Create a freshly deployed model world.
    pub fn new() -> Self {
        Self::default()
    }

    /// The model Target.
    pub fn target(&self) -> &ModelTarget {
        &self.target
    }

    /// Apply an operation and return the result.
    ///
    /// This is the main entry point for model-based testing. The result should
    /// match the real implementation's result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        let result = match op {
            Operation::RegisterCallback { registrant, .. } => self.target.register(*registrant),
            Operation::Unprotected { value, fail_flag, .. } => {
                self.target.unprotected(value.to_value(), *fail_flag)
            },
            Operation::ProtectedA { value, fail_flag, .. }
            | Operation::ProtectedB { value, fail_flag, .. } => {
                self.target.protected(value.to_value(), *fail_flag)
            },
        };

        if result.is_ok() {
            self.committed += 1;
            if op.route() == Route::ViaCaller {
                self.forwarded += 1;
            }
        }

        result
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            callback: self.target.callback(),
            value: self.target.value().to_string(),
            events: self.target.events().to_vec(),
            forwarded: self.forwarded,
            committed: self.committed,
        }
    }
}
