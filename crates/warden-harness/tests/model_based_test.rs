//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the
//! ledger-hosted units behave identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelWorld    RealWorld      Compare
//!      (reference)   (ledger)       Results
//! ```

use proptest::prelude::*;
use warden_core::TargetCall;
use warden_harness::{
    Deployment, LedgerError, ModelWorld, ObservableState, Operation, OperationError,
    OperationResult, Registrant, Route, SmallValue,
};
use warden_proto::Address;

/// Real system wrapper that mirrors ModelWorld's interface.
struct RealWorld {
    deployment: Deployment,
}

impl RealWorld {
    fn new(seed: u64) -> Self {
        let deployment = Deployment::new(seed).expect("deployment should succeed");
        Self { deployment }
    }

    fn apply(&mut self, op: &Operation) -> OperationResult {
        let call = self.to_call(op);

        let result = match op.route() {
            Route::Direct => self.deployment.call_target(call),
            Route::ViaCaller => self.deployment.forward(call),
        };

        match result {
            Ok(_) => OperationResult::Ok,
            Err(LedgerError::Reverted { .. }) => OperationResult::Error(OperationError::Reverted),
            Err(other) => panic!("routing error in well-formed deployment: {other}"),
        }
    }

    fn to_call(&self, op: &Operation) -> TargetCall {
        match op {
            Operation::RegisterCallback { registrant, .. } => {
                TargetCall::RegisterCallback { callback: self.address_of(*registrant) }
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

    fn address_of(&self, registrant: Registrant) -> Address {
        match registrant {
            Registrant::Caller => self.deployment.caller,
            Registrant::Deployer => self.deployment.deployer,
            Registrant::Nobody => Address::ZERO,
        }
    }

    fn registrant_of(&self, address: Address) -> Registrant {
        if address == self.deployment.caller {
            Registrant::Caller
        } else if address == self.deployment.deployer {
            Registrant::Deployer
        } else {
            assert!(address.is_zero(), "unexpected callback {address}");
            Registrant::Nobody
        }
    }

    fn observable_state(&self) -> ObservableState {
        let ledger = &self.deployment.ledger;

        let events = ledger
            .receipts()
            .iter()
            .flat_map(|r| r.logs.iter())
            .map(|log| (log.event.value.clone(), log.event.fail_flag))
            .collect();

        ObservableState {
            callback: self.registrant_of(self.deployment.callback().unwrap()),
            value: self.deployment.protected_value().unwrap().to_string(),
            events,
            forwarded: self.deployment.forwarded(),
            committed: ledger.receipts().len() as u64,
        }
    }
}

/// Strategy for generating SmallValue.
fn small_value_strategy() -> impl Strategy<Value = SmallValue> {
    (any::<u8>(), any::<u8>()).prop_map(|(seed, size_class)| SmallValue { seed, size_class })
}

fn route_strategy() -> impl Strategy<Value = Route> {
    prop_oneof![Just(Route::Direct), Just(Route::ViaCaller)]
}

fn registrant_strategy() -> impl Strategy<Value = Registrant> {
    prop_oneof![Just(Registrant::Caller), Just(Registrant::Deployer), Just(Registrant::Nobody)]
}

/// Strategy for generating operations.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        // Weight towards the flag-gated entry points
        1 => (registrant_strategy(), route_strategy())
            .prop_map(|(registrant, route)| Operation::RegisterCallback { registrant, route }),
        2 => (small_value_strategy(), any::<bool>(), route_strategy()).prop_map(
            |(value, fail_flag, route)| Operation::Unprotected { value, fail_flag, route }
        ),
        4 => (small_value_strategy(), any::<bool>(), route_strategy()).prop_map(
            |(value, fail_flag, route)| Operation::ProtectedA { value, fail_flag, route }
        ),
        4 => (small_value_strategy(), any::<bool>(), route_strategy()).prop_map(
            |(value, fail_flag, route)| Operation::ProtectedB { value, fail_flag, route }
        ),
    ]
}

proptest! {
    /// Verify that operation results and observable state match between the
    /// model and the real units after every step.
    #[test]
    fn prop_model_matches_real(
        seed in any::<u64>(),
        ops in prop::collection::vec(operation_strategy(), 0..50)
    ) {
        let mut model = ModelWorld::new();
        let mut real = RealWorld::new(seed);

        for (i, op) in ops.iter().enumerate() {
            let model_result = model.apply(op);
            let real_result = real.apply(op);

            prop_assert_eq!(
                &model_result,
                &real_result,
                "Divergence at operation {}: {:?}",
                i, op
            );
            prop_assert_eq!(model.observable_state(), real.observable_state());
        }
    }

    /// Verify a revert never changes observable state, whatever came before.
    #[test]
    fn prop_revert_preserves_state(
        seed in any::<u64>(),
        prefix in prop::collection::vec(operation_strategy(), 0..20),
        value in small_value_strategy(),
        route in route_strategy(),
        use_b in any::<bool>(),
    ) {
        let mut real = RealWorld::new(seed);
        for op in &prefix {
            let _ = real.apply(op);
        }
        let before = real.observable_state();

        let op = if use_b {
            Operation::ProtectedB { value, fail_flag: true, route }
        } else {
            Operation::ProtectedA { value, fail_flag: true, route }
        };
        let result = real.apply(&op);

        prop_assert_eq!(result, OperationResult::Error(OperationError::Reverted));
        prop_assert_eq!(real.observable_state(), before);
    }

    /// Verify the unprotected operation always commits the sentinel.
    #[test]
    fn prop_unprotected_always_commits(
        seed in any::<u64>(),
        value in small_value_strategy(),
        fail_flag in any::<bool>(),
        route in route_strategy(),
    ) {
        let mut real = RealWorld::new(seed);

        let result = real.apply(&Operation::Unprotected { value, fail_flag, route });

        prop_assert!(result.is_ok());
        let state = real.observable_state();
        prop_assert_eq!(state.value.as_str(), "surprise!");
        prop_assert_eq!(state.events, vec![(value.to_value(), fail_flag)]);
    }
}

#[cfg(test)]
mod smoke_tests {
    use super::*;

    /// Basic smoke test for the model.
    #[test]
    fn model_basic_operations() {
        let mut model = ModelWorld::new();
        let value = SmallValue { seed: 7, size_class: 1 };

        let result = model.apply(&Operation::ProtectedA { value, fail_flag: false, route: Route::Direct });
        assert!(result.is_ok());
        assert_eq!(model.target().value(), value.to_value());

        let result =
            model.apply(&Operation::ProtectedB { value, fail_flag: true, route: Route::ViaCaller });
        assert!(result.is_err());

        let state = model.observable_state();
        assert_eq!(state.committed, 1);
        assert_eq!(state.forwarded, 0);
    }
}
