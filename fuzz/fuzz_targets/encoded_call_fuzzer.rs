//! Fuzz target for encoded ledger submissions
//!
//! Arbitrary bytes are submitted to both deployed units.
//!
//! # Invariants
//!
//! - NEVER panic on malformed input
//! - A failed submission leaves no receipt and changes no unit
//! - A successful submission appends exactly one receipt

#![no_main]

use libfuzzer_sys::fuzz_target;
use warden_harness::Deployment;

fuzz_target!(|data: &[u8]| {
    let Ok(mut d) = Deployment::new(0) else {
        return;
    };

    for to in [d.target, d.caller] {
        let receipts_before = d.ledger.receipts().len();
        let value_before = d.protected_value().map(str::to_string).ok();
        let forwarded_before = d.forwarded();

        match d.ledger.submit_encoded(d.deployer, to, data) {
            Ok(_) => assert_eq!(d.ledger.receipts().len(), receipts_before + 1),
            Err(_) => {
                assert_eq!(d.ledger.receipts().len(), receipts_before);
                assert_eq!(d.protected_value().map(str::to_string).ok(), value_before);
                assert_eq!(d.forwarded(), forwarded_before);
            },
        }
    }
});
