//! Random data generators selected by platform algorithm code.
//!
//! Generator state is updated in place by `generate_data` and `set_seed` and
//! is never part of the host's transaction journal: neither method takes a
//! transaction context, and a rollback on the caller side leaves the new state
//! in effect.

use std::any::Any;
use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::CryptoError;

mod pseudo;

pub use pseudo::PseudoRandomData;

/// Utility pseudo-random generation.
pub const PSEUDO_RANDOM: u8 = 1;
/// Secure random generation. Served by [`PseudoRandomData`] in this emulation.
pub const SECURE_RANDOM: u8 = 2;

/// Source of random bytes with the platform's buffer conventions.
pub trait RandomData {
    /// Writes `length` random bytes into `buffer` at `offset`.
    ///
    /// Fails with [`CryptoError::IllegalValue`] when `length` is zero.
    fn generate_data(
        &mut self,
        buffer: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError>;

    /// Mixes `length` bytes of `buffer` at `offset` into the generator state.
    fn set_seed(&mut self, buffer: &[u8], offset: usize, length: usize) -> Result<(), CryptoError>;

    /// The algorithm code this instance was created for.
    fn algorithm(&self) -> u8;

    fn as_any(&self) -> &dyn Any;
}

/// Builds a generator for the given algorithm code.
pub type Constructor = fn(u8) -> Box<dyn RandomData>;

/// Maps algorithm codes to generator constructors.
#[derive(Clone)]
pub struct RandomRegistry {
    constructors: BTreeMap<u8, Constructor>,
}

impl RandomRegistry {
    /// A registry with no algorithms.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registers `constructor` for `algorithm`, returning the one it replaces.
    pub fn register(&mut self, algorithm: u8, constructor: Constructor) -> Option<Constructor> {
        self.constructors.insert(algorithm, constructor)
    }

    pub fn is_supported(&self, algorithm: u8) -> bool {
        self.constructors.contains_key(&algorithm)
    }

    /// Creates a generator for `algorithm`.
    pub fn get_instance(&self, algorithm: u8) -> Result<Box<dyn RandomData>, CryptoError> {
        let constructor = self
            .constructors
            .get(&algorithm)
            .ok_or(CryptoError::NoSuchAlgorithm(algorithm))?;
        debug!(algorithm, "creating random data instance");
        Ok(constructor(algorithm))
    }
}

impl Default for RandomRegistry {
    /// Registers the platform codes. Both map to the same pseudo-random
    /// generator, which is not a certified secure generator.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(PSEUDO_RANDOM, PseudoRandomData::boxed);
        registry.register(SECURE_RANDOM, PseudoRandomData::boxed);
        registry
    }
}

impl std::fmt::Debug for RandomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomRegistry")
            .field("algorithms", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
