use std::any::Any;

use rand_chacha::ChaCha20Rng;
use rand_core::{OsRng, RngCore, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::buffer::{window, window_mut};
use crate::errors::CryptoError;

use super::{RandomData, SECURE_RANDOM};

const SEED_LABEL: &[u8] = b"cardkeys pseudo random reseed";
const SEED_LEN: usize = 32;

/// ChaCha20 keystream generator.
///
/// The initial key is drawn from the operating system. Reseeding hashes the
/// next keystream block together with the caller's bytes, so the output after
/// `set_seed` depends on both and identical seeds do not repeat a sequence.
pub struct PseudoRandomData {
    rng: ChaCha20Rng,
    algorithm: u8,
}

impl PseudoRandomData {
    pub fn new(algorithm: u8) -> Self {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        OsRng.fill_bytes(seed.as_mut_slice());
        Self::from_seed(algorithm, *seed)
    }

    /// A generator with a caller-chosen initial key.
    pub fn from_seed(algorithm: u8, seed: [u8; SEED_LEN]) -> Self {
        if algorithm == SECURE_RANDOM {
            warn!("secure random requested; served by a pseudo-random generator");
        }
        Self {
            rng: ChaCha20Rng::from_seed(seed),
            algorithm,
        }
    }

    pub(crate) fn boxed(algorithm: u8) -> Box<dyn RandomData> {
        Box::new(Self::new(algorithm))
    }
}

impl RandomData for PseudoRandomData {
    fn generate_data(
        &mut self,
        buffer: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        if length == 0 {
            return Err(CryptoError::IllegalValue);
        }
        self.rng.fill_bytes(window_mut(buffer, offset, length)?);
        Ok(())
    }

    fn set_seed(&mut self, buffer: &[u8], offset: usize, length: usize) -> Result<(), CryptoError> {
        let material = window(buffer, offset, length)?;
        let mut block = Zeroizing::new([0u8; SEED_LEN]);
        self.rng.fill_bytes(block.as_mut_slice());

        let mut hasher = Sha256::new();
        hasher.update(SEED_LABEL);
        hasher.update(block.as_slice());
        hasher.update(material);
        let seed = Zeroizing::new(<[u8; SEED_LEN]>::from(hasher.finalize()));
        self.rng = ChaCha20Rng::from_seed(*seed);
        Ok(())
    }

    fn algorithm(&self) -> u8 {
        self.algorithm
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for PseudoRandomData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PseudoRandomData")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
