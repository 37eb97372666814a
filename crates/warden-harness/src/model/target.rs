//! Model Target.
//!
//! Plain fields, no transactions: a reverting call simply returns before
//! touching anything.

use super::operation::{OperationError, OperationResult, Registrant};

/// Sentinel stored by the unprotected operation.
const SENTINEL: &str = "surprise!";

/// Model of a Target's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTarget {
    /// Registered identity, `Nobody` until the first registration.
    callback: Registrant,
    /// Protected value.
    value: String,
    /// Emitted `(value, fail_flag)` pairs, in order.
    events: Vec<(String, bool)>,
}

impl ModelTarget {
    /// Create a model Target with an empty protected value.
    pub fn new() -> Self {
        Self { callback: Registrant::Nobody, value: String::new(), events: Vec::new() }
    }

    /// Registered identity.
    pub fn callback(&self) -> Registrant {
        self.callback
    }

    /// Protected value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Emitted events.
    pub fn events(&self) -> &[(String, bool)] {
        &self.events
    }

    /// Record a callback.
    pub fn register(&mut self, registrant: Registrant) -> OperationResult {
        self.callback = registrant;
        OperationResult::Ok
    }

    /// Emit the event and store the sentinel.
    pub fn unprotected(&mut self, value: String, fail_flag: bool) -> OperationResult {
        self.events.push((value, fail_flag));
        SENTINEL.clone_into(&mut self.value);
        OperationResult::Ok
    }

    /// Store `value` unless `fail_flag` is set. Both protected entry points
    /// share this.
    pub fn protected(&mut self, value: String, fail_flag: bool) -> OperationResult {
        if fail_flag {
            return OperationResult::Error(OperationError::Reverted);
        }

        self.value = value;
        OperationResult::Ok
    }
}

impl Default for ModelTarget {
    fn default() -> Self {
        Self::new()
    }
}
