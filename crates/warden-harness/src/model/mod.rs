//! Reference model for model-based testing.
//!
//! The model captures the observable contract of a Target and its Caller with
//! no addresses, sinks or ledger. It serves as the oracle against which the
//! ledger-hosted units are verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Contract not implementation: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

pub mod operation;
mod target;
mod world;

pub use operation::{Operation, OperationError, OperationResult, Registrant, Route, SmallValue};
pub use target::ModelTarget;
pub use world::{ModelWorld, ObservableState};
