//! Standard two-unit deployment.
//!
//! Mirrors the usual test setup: one funded account deploys a Caller, then a
//! Target, on a fresh ledger. Tests then drive the Target either directly from
//! the account or through the Caller.

use warden_core::{TargetCall, TargetConfig};
use warden_proto::{Address, CallerCall};

use crate::{
    ledger::{Ledger, LedgerConfig, LedgerError},
    receipt::Receipt,
    sim_env::{SimEnv, SimInstant},
};

/// A ledger with one account, one Caller and one Target.
#[derive(Debug)]
pub struct Deployment {
    /// The ledger hosting both units.
    pub ledger: Ledger<SimEnv>,
    /// Account that deployed both units and submits direct calls.
    pub deployer: Address,
    /// Address of the Caller unit.
    pub caller: Address,
    /// Address of the Target unit.
    pub target: Address,
}

impl Deployment {
    /// Deploy with default configuration.
    pub fn new(seed: u64) -> Result<Self, LedgerError> {
        Self::with_config(seed, LedgerConfig::default(), TargetConfig::default())
    }

    /// Deploy with explicit ledger and Target configuration.
    pub fn with_config(
        seed: u64,
        ledger_config: LedgerConfig,
        target_config: TargetConfig,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Ledger::new(SimEnv::with_seed(seed), ledger_config);
        let deployer = ledger.create_account();
        let caller = ledger.deploy_caller(deployer)?;
        let target = ledger.deploy_target(deployer, target_config)?;

        tracing::info!(seed, %caller, %target, "deployment ready");
        Ok(Self { ledger, deployer, caller, target })
    }

    /// Submit `call` to the Target directly from the deployer account.
    pub fn call_target(&mut self, call: TargetCall) -> Result<Receipt<SimInstant>, LedgerError> {
        self.ledger.submit(self.deployer, self.target, call)
    }

    /// Submit `call` to the Target through the Caller.
    pub fn forward(&mut self, call: TargetCall) -> Result<Receipt<SimInstant>, LedgerError> {
        self.ledger.submit(self.deployer, self.caller, CallerCall::Forward {
            target: self.target,
            call,
        })
    }

    /// Register the Caller as the Target's callback.
    pub fn register_caller(&mut self) -> Result<Receipt<SimInstant>, LedgerError> {
        self.call_target(TargetCall::RegisterCallback { callback: self.caller })
    }

    /// The Target's protected value.
    pub fn protected_value(&self) -> Result<&str, LedgerError> {
        self.ledger.protected_value(self.target)
    }

    /// The Target's registered callback.
    pub fn callback(&self) -> Result<Address, LedgerError> {
        self.ledger.callback(self.target)
    }

    /// Committed forwards recorded by the Caller.
    pub fn forwarded(&self) -> u64 {
        self.ledger.caller(self.caller).map_or(0, warden_core::Caller::forwarded)
    }
}
