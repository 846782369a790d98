//! Seedable random number generator for nonce and key generation.
//!
//! Without a seed all randomness comes from the operating system CSPRNG.
//! When a seed is provided via [`Config::rng_seed`](crate::Config::rng_seed),
//! nonces and keys are deterministic. This is for tests and debugging only.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// A random number generator that can be seeded for deterministic behavior.
///
/// Both backends are cryptographically secure. `StdRng` is only predictable
/// because its seed is known.
pub struct SeededRng {
    inner: Option<StdRng>,
}

impl SeededRng {
    /// Create a new RNG with an optional seed.
    ///
    /// If `seed` is `Some`, the RNG will produce deterministic values.
    /// If `seed` is `None`, it will use the OS random source.
    pub fn new(seed: Option<u64>) -> Self {
        let inner = seed.map(StdRng::seed_from_u64);
        Self { inner }
    }

    /// Fill `dest` with random bytes.
    pub fn fill(&mut self, dest: &mut [u8]) {
        match self.inner.as_mut() {
            Some(rng) => rng.fill_bytes(dest),
            None => OsRng.fill_bytes(dest),
        }
    }

    /// Generate a fixed size array of random bytes.
    pub fn random_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        self.fill(&mut out);
        out
    }

    pub fn is_seeded(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for SeededRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededRng")
            .field("seeded", &self.is_seeded())
            .finish()
    }
}
