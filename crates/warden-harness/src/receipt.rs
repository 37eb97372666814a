//! Invocation receipts.

use warden_proto::{Address, Call, MessageEvent};

/// One event together with the unit that emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Unit that emitted the event.
    pub emitter: Address,
    /// The event itself.
    pub event: MessageEvent,
}

/// Record of a committed invocation.
///
/// Only committed invocations get a receipt; logs are in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt<I> {
    /// Position in the ledger's receipt log, starting at 0.
    pub index: u64,
    /// Account that submitted the invocation.
    pub origin: Address,
    /// Unit the invocation was addressed to.
    pub to: Address,
    /// The call that was executed.
    pub call: Call,
    /// Events emitted while executing the call.
    pub logs: Vec<LogEntry>,
    /// When the ledger executed the call.
    pub executed_at: I,
}

/// Record of a reverted invocation.
///
/// Kept only when `LedgerConfig::record_reverts` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertRecord<I> {
    /// Account that submitted the invocation.
    pub origin: Address,
    /// Unit the invocation was addressed to.
    pub to: Address,
    /// The call that reverted.
    pub call: Call,
    /// Display form of the error surfaced to the submitter.
    pub reason: String,
    /// When the ledger attempted the call.
    pub executed_at: I,
}
