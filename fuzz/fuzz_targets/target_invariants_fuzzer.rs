//! Fuzz target for the [`Target`] entry points
//!
//! Prevent partial commits and flag bypass via arbitrary call sequences
//!
//! # Strategy
//!
//! - Operation sequences: Arbitrary mixes of registrations, unprotected and
//!   protected calls, each with an arbitrary fail flag
//! - Oracle: Every step is mirrored into `ModelTarget`
//!
//! # Invariants
//!
//! - A protected call with the fail flag set MUST revert
//! - A revert MUST leave value, callback and sink untouched
//! - The unprotected call NEVER fails and ALWAYS stores the sentinel
//! - Real and model state agree after every step

#![no_main]

use libfuzzer_sys::fuzz_target;
use warden_core::{Address, EventBuffer, SENTINEL_VALUE, Target, TargetCall};
use warden_harness::{ModelTarget, Operation, Registrant};

const CALLER: Address = Address::from_bytes([0xca; 20]);
const DEPLOYER: Address = Address::from_bytes([0xde; 20]);

fn address_of(registrant: Registrant) -> Address {
    match registrant {
        Registrant::Caller => CALLER,
        Registrant::Deployer => DEPLOYER,
        Registrant::Nobody => Address::ZERO,
    }
}

fn to_call(op: &Operation) -> TargetCall {
    match op {
        Operation::RegisterCallback { registrant, .. } => {
            TargetCall::RegisterCallback { callback: address_of(*registrant) }
        },
        Operation::Unprotected { value, fail_flag, .. } => {
            TargetCall::UnprotectedOperation { value: value.to_value(), fail_flag: *fail_flag }
        },
        Operation::ProtectedA { value, fail_flag, .. } => {
            TargetCall::ProtectedOperationA { value: value.to_value(), fail_flag: *fail_flag }
        },
        Operation::ProtectedB { value, fail_flag, .. } => {
            TargetCall::ProtectedOperationB { value: value.to_value(), fail_flag: *fail_flag }
        },
    }
}

fuzz_target!(|ops: Vec<Operation>| {
    let mut target = Target::with_defaults(Address::from_bytes([0x7a; 20]), EventBuffer::new());
    let mut model = ModelTarget::new();

    for op in &ops {
        let call = to_call(op);
        let before = (
            target.get_callback(),
            target.get_protected_value().to_string(),
            target.sink().len(),
        );

        let result = target.handle(&call);
        let model_result = match op {
            Operation::RegisterCallback { registrant, .. } => model.register(*registrant),
            Operation::Unprotected { value, fail_flag, .. } => {
                model.unprotected(value.to_value(), *fail_flag)
            },
            Operation::ProtectedA { value, fail_flag, .. }
            | Operation::ProtectedB { value, fail_flag, .. } => {
                model.protected(value.to_value(), *fail_flag)
            },
        };

        assert_eq!(result.is_err(), call.reverts(), "flag gate bypassed: {call:?}");
        assert_eq!(result.is_err(), model_result.is_err(), "model divergence: {call:?}");

        if result.is_err() {
            let after = (
                target.get_callback(),
                target.get_protected_value().to_string(),
                target.sink().len(),
            );
            assert_eq!(before, after, "revert leaked state: {call:?}");
        }

        if matches!(call, TargetCall::UnprotectedOperation { .. }) {
            assert_eq!(target.get_protected_value(), SENTINEL_VALUE);
        }

        assert_eq!(target.get_protected_value(), model.value());
        assert_eq!(target.get_callback(), address_of(model.callback()));
        assert_eq!(target.sink().len(), model.events().len());
    }
});
