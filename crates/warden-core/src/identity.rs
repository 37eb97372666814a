//! Address assignment.
//!
//! Unit addresses are derived from the deployer's address and its deployment
//! nonce, so the same deployment sequence always lands at the same addresses.
//! External accounts draw their address from the environment's RNG.

use sha2::{Digest, Sha256};
use warden_proto::{ADDRESS_LEN, Address};

use crate::env::Environment;

/// Domain separation label for unit address derivation.
const UNIT_ADDRESS_LABEL: &[u8] = b"warden unit address v1";

/// Derive the address of the unit deployed by `deployer` at `nonce`.
///
/// Hashes `label || deployer || nonce_be` with SHA-256 and keeps the trailing
/// 20 bytes.
pub fn derive_unit_address(deployer: &Address, nonce: u64) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(UNIT_ADDRESS_LABEL);
    hasher.update(deployer.as_bytes());
    hasher.update(nonce.to_be_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; ADDRESS_LEN];
    bytes.copy_from_slice(&digest[digest.len() - ADDRESS_LEN..]);
    Address::from_bytes(bytes)
}

/// Draw a fresh external account address from `env`.
///
/// Never returns [`Address::ZERO`].
pub fn account_address<E: Environment>(env: &E) -> Address {
    loop {
        let mut bytes = [0u8; ADDRESS_LEN];
        env.random_bytes(&mut bytes);

        let address = Address::from_bytes(bytes);
        if !address.is_zero() {
            return address;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{
            Arc,
            atomic::{AtomicU8, Ordering},
        },
    };

    use super::*;

    /// Counter-backed environment: first fill is all zeros, later fills are not.
    #[derive(Clone, Default)]
    struct CountingEnv {
        fills: Arc<AtomicU8>,
    }

    impl Environment for CountingEnv {
        type Instant = u64;

        fn now(&self) -> u64 {
            0
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            let n = self.fills.fetch_add(1, Ordering::SeqCst);
            buffer.fill(n);
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let deployer = Address::from_bytes([0xab; ADDRESS_LEN]);
        assert_eq!(derive_unit_address(&deployer, 3), derive_unit_address(&deployer, 3));
    }

    #[test]
    fn derivation_separates_nonces_and_deployers() {
        let a = Address::from_bytes([1; ADDRESS_LEN]);
        let b = Address::from_bytes([2; ADDRESS_LEN]);

        let addresses: HashSet<_> = (0..64)
            .flat_map(|nonce| [derive_unit_address(&a, nonce), derive_unit_address(&b, nonce)])
            .collect();

        assert_eq!(addresses.len(), 128);
    }

    #[test]
    fn account_address_skips_zero() {
        let env = CountingEnv::default();

        let address = account_address(&env);

        assert_eq!(address, Address::from_bytes([1; ADDRESS_LEN]));
        assert_eq!(env.fills.load(Ordering::SeqCst), 2);
    }
}
