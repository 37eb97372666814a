//! Deterministic test harness for Warden units.
//!
//! Provides the pieces a test needs around the units themselves: a seeded
//! `Environment`, an in-memory ledger that assigns addresses and executes
//! invocations atomically, a standard two-unit deployment, and a reference
//! model.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and the ledger-hosted
//! units, and their observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod deployment;
pub mod ledger;
pub mod model;
pub mod receipt;
pub mod sim_env;

pub use deployment::Deployment;
pub use ledger::{Ledger, LedgerConfig, LedgerError, Unit, UnitKind};
pub use model::{
    ModelTarget, ModelWorld, ObservableState, Operation, OperationError, OperationResult,
    Registrant, Route, SmallValue,
};
pub use receipt::{LogEntry, Receipt, RevertRecord};
pub use sim_env::{SimEnv, SimInstant};
