//! Warden Core
//!
//! The authorization and conditional-failure logic of the Target and Caller
//! units, independent of any ledger.
//!
//! # Architecture
//!
//! Units are plain state machines:
//! - Every mutation takes `&mut self`, so at most one invocation is in flight
//! - Every mutation is a transaction: commit all effects or none
//! - Events go to a sink injected at construction, never to global output
//! - Time and randomness come from the `Environment` trait, used by the host
//!   ledger for address assignment
//!
//! # Components
//!
//! - [`Target`]: Protected value, callback registration, flag-gated writes
//! - [`Caller`]: Addressable identity that forwards calls into a Target
//! - [`EventSink`]: Ordered destination for committed events
//! - [`identity`]: Deterministic unit address derivation

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod caller;
pub mod config;
pub mod env;
pub mod error;
pub mod identity;
pub mod sink;
pub mod target;

pub use caller::Caller;
pub use config::{SENTINEL_VALUE, TargetConfig};
pub use env::Environment;
pub use error::TargetError;
pub use sink::{EventBuffer, EventSink};
pub use target::Target;
pub use warden_proto::{Address, EntryPoint, MessageEvent, TargetCall};
