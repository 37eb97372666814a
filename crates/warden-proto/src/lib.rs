//! Warden Protocol Types
//!
//! Value types shared by every Warden crate: unit addresses, the calls a
//! ledger routes to units, and the events units emit.
//!
//! # Encoding
//!
//! Calls and events are encoded as CBOR via `ciborium`. Addresses have a
//! `0x`-prefixed hex text form for logs and configuration.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod address;
pub mod call;
pub mod error;
pub mod event;

pub use address::{ADDRESS_LEN, Address};
pub use call::{Call, CallerCall, EntryPoint, TargetCall};
pub use error::ProtoError;
pub use event::MessageEvent;
