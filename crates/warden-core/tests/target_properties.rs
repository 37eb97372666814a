//! Property tests for Target entry points
//!
//! These tests pin down the observable contract:
//! - Registration is last-write-wins
//! - The unprotected operation always succeeds and stores the sentinel
//! - Protected operations commit iff the fail flag is clear
//! - A revert leaves value, callback and emitted events untouched

use proptest::prelude::*;
use warden_core::{
    Address, EntryPoint, EventBuffer, SENTINEL_VALUE, Target, TargetCall, TargetError,
};

fn new_target() -> Target<EventBuffer> {
    Target::with_defaults(Address::from_bytes([0x42; 20]), EventBuffer::new())
}

fn address_strategy() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

fn protected_call_strategy() -> impl Strategy<Value = TargetCall> {
    prop_oneof![
        (".{0,24}", any::<bool>())
            .prop_map(|(value, fail_flag)| TargetCall::ProtectedOperationA { value, fail_flag }),
        (".{0,24}", any::<bool>())
            .prop_map(|(value, fail_flag)| TargetCall::ProtectedOperationB { value, fail_flag }),
    ]
}

fn any_call_strategy() -> impl Strategy<Value = TargetCall> {
    prop_oneof![
        1 => address_strategy().prop_map(|callback| TargetCall::RegisterCallback { callback }),
        2 => (".{0,24}", any::<bool>())
            .prop_map(|(value, fail_flag)| TargetCall::UnprotectedOperation { value, fail_flag }),
        4 => protected_call_strategy(),
    ]
}

/// Snapshot of everything a client can observe on a Target.
fn observe(target: &Target<EventBuffer>) -> (Address, String, usize) {
    (target.get_callback(), target.get_protected_value().to_string(), target.sink().len())
}

proptest! {
    #[test]
    fn prop_registration_last_write_wins(first in address_strategy(), second in address_strategy()) {
        let mut target = new_target();

        target.register_callback(first);
        target.register_callback(second);

        prop_assert_eq!(target.get_callback(), second);
    }

    #[test]
    fn prop_unprotected_always_stores_sentinel(value in ".{0,64}", fail_flag in any::<bool>()) {
        let mut target = new_target();

        target.unprotected_operation(value.as_str(), fail_flag);

        prop_assert_eq!(target.get_protected_value(), SENTINEL_VALUE);
        let event = &target.sink().events()[0];
        prop_assert_eq!(&event.value, &value);
        prop_assert_eq!(event.fail_flag, fail_flag);
    }

    #[test]
    fn prop_protected_commit(value in ".{0,64}") {
        let mut a = new_target();
        let mut b = new_target();

        a.protected_operation_a(value.as_str(), false).unwrap();
        b.protected_operation_b(value.as_str(), false).unwrap();

        prop_assert_eq!(a.get_protected_value(), value.as_str());
        prop_assert_eq!(b.get_protected_value(), value.as_str());
    }

    #[test]
    fn prop_protected_revert_is_noop(
        history in prop::collection::vec(any_call_strategy(), 0..16),
        value in ".{0,64}",
        use_b in any::<bool>(),
    ) {
        let mut target = new_target();
        for call in &history {
            let _ = target.handle(call);
        }
        let before = observe(&target);

        let result = if use_b {
            target.protected_operation_b(value, true)
        } else {
            target.protected_operation_a(value, true)
        };

        let expected = if use_b {
            EntryPoint::ProtectedOperationB
        } else {
            EntryPoint::ProtectedOperationA
        };
        prop_assert_eq!(result, Err(TargetError::OperationReverted { entry_point: expected }));
        prop_assert_eq!(observe(&target), before);
    }

    #[test]
    fn prop_value_tracks_latest_commit(calls in prop::collection::vec(protected_call_strategy(), 1..32)) {
        let mut target = new_target();
        let mut expected = String::new();

        for call in &calls {
            let result = target.handle(call);
            prop_assert_eq!(result.is_err(), call.reverts());

            if let TargetCall::ProtectedOperationA { value, fail_flag: false }
            | TargetCall::ProtectedOperationB { value, fail_flag: false } = call
            {
                expected.clone_from(value);
            }
        }

        prop_assert_eq!(target.get_protected_value(), expected.as_str());
    }
}

#[test]
fn a_then_b_reflects_call_order() {
    let mut target = new_target();

    target.protected_operation_a("a value", false).unwrap();
    target.protected_operation_b("b value", false).unwrap();
    assert_eq!(target.get_protected_value(), "b value");

    target.protected_operation_a("a again", false).unwrap();
    assert_eq!(target.get_protected_value(), "a again");
}
