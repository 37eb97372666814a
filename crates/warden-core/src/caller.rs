//! Caller unit.
//!
//! A Caller exists to be an address worth registering on a Target. It can
//! also forward calls into a Target; a revert inside the Target propagates
//! out of the forward unchanged, and the Caller's own bookkeeping only moves
//! once the Target has committed.

use warden_proto::{Address, TargetCall};

use crate::{error::TargetError, sink::EventSink, target::Target};

/// Addressable identity that may forward calls into a Target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Our own address.
    address: Address,

    /// Forwards that committed.
    forwarded: u64,
}

impl Caller {
    /// Create a Caller at `address`.
    pub fn new(address: Address) -> Self {
        Self { address, forwarded: 0 }
    }

    /// Our own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Number of forwarded calls that committed.
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Forward `call` into `target`.
    ///
    /// # Errors
    ///
    /// Returns the Target's error verbatim if the call reverts. Neither the
    /// Target nor this Caller changes in that case.
    pub fn forward<S: EventSink>(
        &mut self,
        target: &mut Target<S>,
        call: &TargetCall,
    ) -> Result<(), TargetError> {
        let entry_point = call.entry_point();
        tracing::debug!(
            caller = %self.address,
            target_unit = %target.address(),
            %entry_point,
            authorized = target.is_authorized(&self.address),
            "forwarding call"
        );

        target.handle(call)?;

        self.forwarded += 1;
        Ok(())
    }
}
