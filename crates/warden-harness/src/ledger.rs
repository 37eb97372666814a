//! In-memory ledger.
//!
//! Stand-in for the host substrate the units run on. It assigns addresses,
//! routes calls to units, executes each invocation atomically and keeps a
//! receipt log.
//!
//! ## Atomicity
//!
//! Before executing an invocation the ledger snapshots every unit. If the
//! invocation fails for any reason the snapshot is restored, so a revert deep
//! inside a forwarded call leaves the Caller untouched as well as the Target.
//! Failed invocations never produce a receipt.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt,
};

use warden_core::{
    Caller, Environment, EventBuffer, Target, TargetConfig, TargetError, identity,
};
use warden_proto::{Address, Call, CallerCall, ProtoError, TargetCall};

use crate::receipt::{LogEntry, Receipt, RevertRecord};

/// Ledger settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerConfig {
    /// Keep a [`RevertRecord`] for every failed invocation.
    pub record_reverts: bool,
}

/// Kind of unit deployed at an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A [`Target`] unit.
    Target,
    /// A [`Caller`] unit.
    Caller,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => f.write_str("target"),
            Self::Caller => f.write_str("caller"),
        }
    }
}

/// A deployed unit.
#[derive(Debug, Clone)]
pub enum Unit {
    /// Target unit buffering its events for receipts.
    Target(Target<EventBuffer>),
    /// Caller unit.
    Caller(Caller),
}

impl Unit {
    /// Kind of this unit.
    pub fn kind(&self) -> UnitKind {
        match self {
            Self::Target(_) => UnitKind::Target,
            Self::Caller(_) => UnitKind::Caller,
        }
    }
}

/// Errors from ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Origin or deployer is not an account created on this ledger.
    #[error("unknown account: {0}")]
    UnknownAccount(Address),

    /// No unit is deployed at the address.
    #[error("no unit at {0}")]
    UnknownUnit(Address),

    /// The unit at the address is of the wrong kind for the call.
    #[error("unit at {address} is a {actual}, expected a {expected}")]
    UnexpectedUnitKind {
        /// Address that was called.
        address: Address,
        /// Kind the call needed.
        expected: UnitKind,
        /// Kind actually deployed there.
        actual: UnitKind,
    },

    /// A Caller was asked to forward to its own address.
    #[error("caller {0} cannot forward to itself")]
    SelfForward(Address),

    /// A unit reverted the invocation.
    #[error("invocation reverted in {address}: {source}")]
    Reverted {
        /// Unit that reverted.
        address: Address,
        /// The unit's error.
        #[source]
        source: TargetError,
    },

    /// Encoded invocation could not be decoded.
    #[error("invalid invocation: {0}")]
    Decode(#[from] ProtoError),
}

impl LedgerError {
    /// Returns true if a unit reverted, as opposed to the invocation being
    /// malformed or misaddressed.
    pub fn is_revert(&self) -> bool {
        match self {
            Self::Reverted { .. } => true,

            Self::UnknownAccount(_)
            | Self::UnknownUnit(_)
            | Self::UnexpectedUnitKind { .. }
            | Self::SelfForward(_)
            | Self::Decode(_) => false,
        }
    }
}

/// In-memory ledger hosting Target and Caller units.
///
/// # Type Parameters
///
/// - `E`: Environment supplying time and account randomness
pub struct Ledger<E>
where
    E: Environment,
{
    /// Environment for time/randomness.
    env: E,
    /// Ledger settings.
    config: LedgerConfig,
    /// External accounts allowed to submit invocations.
    accounts: BTreeSet<Address>,
    /// Deployment counter per account.
    nonces: HashMap<Address, u64>,
    /// Deployed units, ordered by address for deterministic log collection.
    units: BTreeMap<Address, Unit>,
    /// Committed invocations.
    receipts: Vec<Receipt<E::Instant>>,
    /// Failed invocations, if recording is enabled.
    reverts: Vec<RevertRecord<E::Instant>>,
}

impl<E> Ledger<E>
where
    E: Environment,
{
    /// Create an empty ledger.
    pub fn new(env: E, config: LedgerConfig) -> Self {
        Self {
            env,
            config,
            accounts: BTreeSet::new(),
            nonces: HashMap::new(),
            units: BTreeMap::new(),
            receipts: Vec::new(),
            reverts: Vec::new(),
        }
    }

    /// The ledger's environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Create an external account and return its address.
    pub fn create_account(&mut self) -> Address {
        loop {
            let address = identity::account_address(&self.env);
            if !self.units.contains_key(&address) && self.accounts.insert(address) {
                tracing::debug!(%address, "account created");
                return address;
            }
        }
    }

    /// Deploy a Target from `deployer`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnknownAccount` if `deployer` was not created on
    /// this ledger.
    pub fn deploy_target(
        &mut self,
        deployer: Address,
        config: TargetConfig,
    ) -> Result<Address, LedgerError> {
        let address = self.next_unit_address(deployer)?;
        self.units.insert(address, Unit::Target(Target::new(address, EventBuffer::new(), config)));

        tracing::info!(%deployer, %address, "target deployed");
        Ok(address)
    }

    /// Deploy a Caller from `deployer`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnknownAccount` if `deployer` was not created on
    /// this ledger.
    pub fn deploy_caller(&mut self, deployer: Address) -> Result<Address, LedgerError> {
        let address = self.next_unit_address(deployer)?;
        self.units.insert(address, Unit::Caller(Caller::new(address)));

        tracing::info!(%deployer, %address, "caller deployed");
        Ok(address)
    }

    /// Execute `call` against the unit at `to`, submitted by `origin`.
    ///
    /// The invocation either commits, appending a receipt, or fails with no
    /// effect on any unit.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Reverted` if a unit reverts, or a routing error if
    /// `origin`, `to` or a forwarded target is not valid for the call.
    pub fn submit(
        &mut self,
        origin: Address,
        to: Address,
        call: impl Into<Call>,
    ) -> Result<Receipt<E::Instant>, LedgerError> {
        let call = call.into();
        let executed_at = self.env.now();
        let snapshot = self.units.clone();

        match self.execute(origin, to, &call) {
            Ok(logs) => {
                let receipt =
                    Receipt { index: self.receipts.len() as u64, origin, to, call, logs, executed_at };
                tracing::debug!(
                    index = receipt.index,
                    %origin,
                    %to,
                    log_count = receipt.logs.len(),
                    "invocation committed"
                );
                self.receipts.push(receipt.clone());
                Ok(receipt)
            },
            Err(err) => {
                self.units = snapshot;
                tracing::warn!(%origin, %to, error = %err, "invocation failed, state restored");

                if self.config.record_reverts {
                    self.reverts.push(RevertRecord {
                        origin,
                        to,
                        call,
                        reason: err.to_string(),
                        executed_at,
                    });
                }
                Err(err)
            },
        }
    }

    /// Decode a CBOR-encoded [`Call`] and submit it.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Decode` for undecodable input, otherwise as
    /// [`Ledger::submit`].
    pub fn submit_encoded(
        &mut self,
        origin: Address,
        to: Address,
        bytes: &[u8],
    ) -> Result<Receipt<E::Instant>, LedgerError> {
        let call = Call::decode(bytes)?;
        self.submit(origin, to, call)
    }

    /// Callback registered on the Target at `address`.
    pub fn callback(&self, address: Address) -> Result<Address, LedgerError> {
        Ok(self.expect_target(address)?.get_callback())
    }

    /// Protected value of the Target at `address`.
    pub fn protected_value(&self, address: Address) -> Result<&str, LedgerError> {
        Ok(self.expect_target(address)?.get_protected_value())
    }

    /// The Target at `address`, if one is deployed there.
    pub fn target(&self, address: Address) -> Option<&Target<EventBuffer>> {
        match self.units.get(&address) {
            Some(Unit::Target(target)) => Some(target),
            _ => None,
        }
    }

    /// The Caller at `address`, if one is deployed there.
    pub fn caller(&self, address: Address) -> Option<&Caller> {
        match self.units.get(&address) {
            Some(Unit::Caller(caller)) => Some(caller),
            _ => None,
        }
    }

    /// Kind of unit at `address`.
    pub fn unit_kind(&self, address: Address) -> Option<UnitKind> {
        self.units.get(&address).map(Unit::kind)
    }

    /// Committed invocations, oldest first.
    pub fn receipts(&self) -> &[Receipt<E::Instant>] {
        &self.receipts
    }

    /// Failed invocations, oldest first. Empty unless recording is enabled.
    pub fn reverts(&self) -> &[RevertRecord<E::Instant>] {
        &self.reverts
    }

    /// Logs of the receipt at `index`.
    pub fn logs(&self, index: u64) -> Option<&[LogEntry]> {
        let index = usize::try_from(index).ok()?;
        self.receipts.get(index).map(|r| r.logs.as_slice())
    }

    /// Route `call` and collect the events it emitted.
    fn execute(
        &mut self,
        origin: Address,
        to: Address,
        call: &Call,
    ) -> Result<Vec<LogEntry>, LedgerError> {
        if !self.accounts.contains(&origin) {
            return Err(LedgerError::UnknownAccount(origin));
        }

        match call {
            Call::Target(call) => {
                let target = self.target_mut(to)?;
                tracing::debug!(
                    %origin,
                    target_unit = %to,
                    entry_point = %call.entry_point(),
                    authorized = target.is_authorized(&origin),
                    "direct call"
                );
                target.handle(call).map_err(|source| LedgerError::Reverted { address: to, source })?;
            },
            Call::Caller(CallerCall::Forward { target, call }) => {
                self.forward(to, *target, call)?;
            },
        }

        Ok(self.drain_logs())
    }

    /// Forward `call` from the Caller at `caller` into the Target at `target`.
    fn forward(
        &mut self,
        caller: Address,
        target: Address,
        call: &TargetCall,
    ) -> Result<(), LedgerError> {
        if caller == target {
            return Err(LedgerError::SelfForward(caller));
        }

        // Work on a copy of the Caller so the Target can be borrowed mutably.
        let mut forwarding = match self.units.get(&caller) {
            Some(Unit::Caller(c)) => c.clone(),
            Some(other) => {
                return Err(LedgerError::UnexpectedUnitKind {
                    address: caller,
                    expected: UnitKind::Caller,
                    actual: other.kind(),
                });
            },
            None => return Err(LedgerError::UnknownUnit(caller)),
        };

        let unit = self.target_mut(target)?;
        forwarding
            .forward(unit, call)
            .map_err(|source| LedgerError::Reverted { address: target, source })?;

        self.units.insert(caller, Unit::Caller(forwarding));
        Ok(())
    }

    /// Take buffered events from every Target, in address order.
    fn drain_logs(&mut self) -> Vec<LogEntry> {
        let mut logs = Vec::new();
        for (address, unit) in &mut self.units {
            if let Unit::Target(target) = unit {
                logs.extend(
                    target
                        .sink_mut()
                        .drain()
                        .into_iter()
                        .map(|event| LogEntry { emitter: *address, event }),
                );
            }
        }
        logs
    }

    /// Allocate the next unit address for `deployer`.
    fn next_unit_address(&mut self, deployer: Address) -> Result<Address, LedgerError> {
        if !self.accounts.contains(&deployer) {
            return Err(LedgerError::UnknownAccount(deployer));
        }

        let nonce = self.nonces.entry(deployer).or_insert(0);
        let address = identity::derive_unit_address(&deployer, *nonce);
        *nonce += 1;

        Ok(address)
    }

    fn expect_target(&self, address: Address) -> Result<&Target<EventBuffer>, LedgerError> {
        match self.units.get(&address) {
            Some(Unit::Target(target)) => Ok(target),
            Some(other) => Err(LedgerError::UnexpectedUnitKind {
                address,
                expected: UnitKind::Target,
                actual: other.kind(),
            }),
            None => Err(LedgerError::UnknownUnit(address)),
        }
    }

    fn target_mut(&mut self, address: Address) -> Result<&mut Target<EventBuffer>, LedgerError> {
        match self.units.get_mut(&address) {
            Some(Unit::Target(target)) => Ok(target),
            Some(other) => Err(LedgerError::UnexpectedUnitKind {
                address,
                expected: UnitKind::Target,
                actual: other.kind(),
            }),
            None => Err(LedgerError::UnknownUnit(address)),
        }
    }
}

impl<E> fmt::Debug for Ledger<E>
where
    E: Environment,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("accounts", &self.accounts.len())
            .field("units", &self.units.len())
            .field("receipts", &self.receipts.len())
            .finish()
    }
}
