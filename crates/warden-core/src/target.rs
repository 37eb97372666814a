//! Target unit.
//!
//! The Target owns two fields: the authorized callback address and the
//! protected value. Every mutating entry point runs as a transaction: the
//! effects are computed into a local [`Transaction`] first, then either
//! committed in one step or dropped together with a [`TargetError`].
//!
//! ## Entry points
//!
//! | entry point             | gate          | effect on commit                   |
//! |-------------------------|---------------|------------------------------------|
//! | `register_callback`     | none          | callback := addr                   |
//! | `unprotected_operation` | none          | emit event, value := `"surprise!"` |
//! | `protected_operation_a` | `!fail_flag`  | value := input                     |
//! | `protected_operation_b` | `!fail_flag`  | value := input                     |
//!
//! The protected entry points do not consult the registered callback. The
//! callback is bookkeeping; [`Target::is_authorized`] reports it for
//! observers but never gates a call.

use warden_proto::{Address, EntryPoint, MessageEvent, TargetCall};

use crate::{
    config::{SENTINEL_VALUE, TargetConfig},
    error::TargetError,
    sink::EventSink,
};

/// Pending effects of a single invocation.
///
/// Nothing here is visible outside the Target until [`Target::commit`].
#[derive(Debug, Default)]
struct Transaction {
    /// Replacement protected value, if the invocation writes one.
    value: Option<String>,
    /// Events to emit, in order.
    events: Vec<MessageEvent>,
}

impl Transaction {
    fn write(value: String) -> Self {
        Self { value: Some(value), events: Vec::new() }
    }

    fn emit(mut self, event: MessageEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Unit holding the protected value and the authorized callback.
///
/// # Type Parameters
///
/// - `S`: Sink receiving committed events
#[derive(Debug, Clone)]
pub struct Target<S> {
    /// Our own address.
    address: Address,

    /// Last registered callback, `Address::ZERO` until the first registration.
    callback: Address,

    /// Current protected value.
    protected_value: String,

    /// Destination for committed events.
    sink: S,
}

impl<S: EventSink> Target<S> {
    /// Create a Target at `address` writing events to `sink`.
    pub fn new(address: Address, sink: S, config: TargetConfig) -> Self {
        Self { address, callback: Address::ZERO, protected_value: config.initial_value, sink }
    }

    /// Create a Target with [`TargetConfig::default`].
    pub fn with_defaults(address: Address, sink: S) -> Self {
        Self::new(address, sink, TargetConfig::default())
    }

    /// Our own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Record `callback` as the authorized address, replacing any previous one.
    pub fn register_callback(&mut self, callback: Address) {
        let previous = std::mem::replace(&mut self.callback, callback);
        tracing::debug!(
            target_unit = %self.address,
            %previous,
            %callback,
            "callback registered"
        );
    }

    /// Last registered callback, or [`Address::ZERO`] if none was registered.
    pub fn get_callback(&self) -> Address {
        self.callback
    }

    /// Whether `address` is the registered callback.
    ///
    /// Always false before the first registration.
    pub fn is_authorized(&self, address: &Address) -> bool {
        !self.callback.is_zero() && self.callback == *address
    }

    /// Current protected value.
    pub fn get_protected_value(&self) -> &str {
        &self.protected_value
    }

    /// Emit `MessageEvent { value, fail_flag }` and store the sentinel value.
    ///
    /// Never fails. `fail_flag` is only reported in the event; it does not
    /// gate this entry point, and `value` is not what gets stored.
    pub fn unprotected_operation(&mut self, value: impl Into<String>, fail_flag: bool) {
        let tx = Transaction::write(SENTINEL_VALUE.to_string())
            .emit(MessageEvent::new(value, fail_flag));

        self.commit(EntryPoint::UnprotectedOperation, tx);
    }

    /// Store `value` unless `fail_flag` is set.
    ///
    /// # Errors
    ///
    /// Returns `TargetError::OperationReverted` if `fail_flag` is set. The
    /// Target is left exactly as it was.
    pub fn protected_operation_a(
        &mut self,
        value: impl Into<String>,
        fail_flag: bool,
    ) -> Result<(), TargetError> {
        if fail_flag {
            return Err(self.revert(EntryPoint::ProtectedOperationA));
        }

        let tx = Transaction::write(value.into());
        self.commit(EntryPoint::ProtectedOperationA, tx);
        Ok(())
    }

    /// Store `value` unless `fail_flag` is set.
    ///
    /// Separate entry point from [`Target::protected_operation_a`] with the
    /// same observable contract.
    ///
    /// # Errors
    ///
    /// Returns `TargetError::OperationReverted` if `fail_flag` is set. The
    /// Target is left exactly as it was.
    pub fn protected_operation_b(
        &mut self,
        value: impl Into<String>,
        fail_flag: bool,
    ) -> Result<(), TargetError> {
        let Some(tx) = (!fail_flag).then(|| Transaction::write(value.into())) else {
            return Err(self.revert(EntryPoint::ProtectedOperationB));
        };

        self.commit(EntryPoint::ProtectedOperationB, tx);
        Ok(())
    }

    /// Dispatch a decoded call to its entry point.
    ///
    /// # Errors
    ///
    /// Returns `TargetError::OperationReverted` if a protected entry point
    /// reverts.
    pub fn handle(&mut self, call: &TargetCall) -> Result<(), TargetError> {
        match call {
            TargetCall::RegisterCallback { callback } => {
                self.register_callback(*callback);
                Ok(())
            },
            TargetCall::UnprotectedOperation { value, fail_flag } => {
                self.unprotected_operation(value.as_str(), *fail_flag);
                Ok(())
            },
            TargetCall::ProtectedOperationA { value, fail_flag } => {
                self.protected_operation_a(value.as_str(), *fail_flag)
            },
            TargetCall::ProtectedOperationB { value, fail_flag } => {
                self.protected_operation_b(value.as_str(), *fail_flag)
            },
        }
    }

    /// The injected event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the injected event sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Apply every effect of `tx` in one step.
    fn commit(&mut self, entry_point: EntryPoint, tx: Transaction) {
        let Transaction { value, events } = tx;
        let event_count = events.len();

        if let Some(value) = value {
            self.protected_value = value;
        }
        for event in events {
            self.sink.emit(event);
        }

        tracing::debug!(
            target_unit = %self.address,
            %entry_point,
            value = %self.protected_value,
            event_count,
            "invocation committed"
        );
    }

    /// Build the revert error. Touches no state.
    fn revert(&self, entry_point: EntryPoint) -> TargetError {
        tracing::warn!(target_unit = %self.address, %entry_point, "invocation reverted");
        TargetError::OperationReverted { entry_point }
    }
}
