//! Operations for model-based testing.
//!
//! Operations are generated randomly by proptest (or decoded from fuzz input
//! via `arbitrary`) and applied to both the model and the real units.

use arbitrary::Arbitrary;

/// Identity recorded by a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Arbitrary)]
pub enum Registrant {
    /// The Caller unit.
    Caller,
    /// The deploying account.
    Deployer,
    /// The zero address.
    Nobody,
}

/// How an operation reaches the Target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Route {
    /// Submitted by the deployer straight to the Target.
    Direct,
    /// Submitted to the Caller, which forwards it.
    ViaCaller,
}

/// Compact string value for testing.
///
/// Keeps generated test cases small while still exercising distinct values.
/// The content is deterministic from the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct SmallValue {
    /// Value seed (first character).
    pub seed: u8,
    /// Length hint (0-3 maps to empty/short/medium/long).
    pub size_class: u8,
}

impl SmallValue {
    /// Expand to the actual string.
    pub fn to_value(self) -> String {
        let len = match self.size_class % 4 {
            0 => 0,
            1 => 4,
            2 => 16,
            _ => 64,
        };

        (0..len).map(|i: u8| char::from(b'a' + self.seed.wrapping_add(i) % 26)).collect()
    }
}

/// Operations that can be applied to a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Register an identity as the callback.
    RegisterCallback {
        /// Identity to record.
        registrant: Registrant,
        /// Delivery route.
        route: Route,
    },

    /// Call the unprotected operation.
    Unprotected {
        /// Value for the event.
        value: SmallValue,
        /// Flag for the event.
        fail_flag: bool,
        /// Delivery route.
        route: Route,
    },

    /// Call the first protected operation.
    ProtectedA {
        /// Candidate value.
        value: SmallValue,
        /// Revert instead of committing.
        fail_flag: bool,
        /// Delivery route.
        route: Route,
    },

    /// Call the second protected operation.
    ProtectedB {
        /// Candidate value.
        value: SmallValue,
        /// Revert instead of committing.
        fail_flag: bool,
        /// Delivery route.
        route: Route,
    },
}

impl Operation {
    /// Delivery route of this operation.
    pub fn route(&self) -> Route {
        match self {
            Self::RegisterCallback { route, .. }
            | Self::Unprotected { route, .. }
            | Self::ProtectedA { route, .. }
            | Self::ProtectedB { route, .. } => *route,
        }
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation committed.
    Ok,

    /// Operation failed with expected error.
    Error(OperationError),
}

/// Expected errors that can occur during operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// A protected entry point reverted.
    Reverted,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}
