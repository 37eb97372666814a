//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples unit logic from system resources (time
//! and randomness). Units never read a clock or an RNG directly; the ledger
//! that hosts them does, through this trait.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Determinism: Given the same seed, `random_bytes()` produces the same
//!   sequence
//! - Isolation: Implementations must not share global state

use std::fmt::Debug;

/// Abstract environment providing time and randomness.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Point-in-time type produced by [`Environment::now`].
    type Instant: Copy + Ord + Debug + Send + Sync;

    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: Subsequent calls must return times >= previous calls.
    fn now(&self) -> Self::Instant;

    /// Fills the provided buffer with random bytes.
    ///
    /// Simulation implementations MUST be seeded so runs can be replayed.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }
}
