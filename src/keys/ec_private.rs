//! EC private key: domain parameters plus the private scalar `S`.
use num_bigint::{BigInt, Sign};
use tracing::trace;
use zeroize::Zeroizing;

use crate::errors::CryptoError;
use crate::key_material::KeyMaterial;

use super::{
    byte_length, order_length, BackendParameters, EcKey, EcKeyBase, Key, KeyType,
    PrivateKeyParameters,
};

/// Converts the backend's minimal signed big-endian encoding of a scalar into
/// the fixed-length unsigned form stored by private keys.
///
/// - shorter than `byte_length`: left-padded with zeros;
/// - longer, with a leading zero byte that only carries the sign (the next
///   byte has its high bit set): the zero byte is dropped;
/// - anything else is returned unchanged.
pub fn normalize_scalar(encoded: &[u8], byte_length: usize) -> Zeroizing<Vec<u8>> {
    if encoded.len() < byte_length {
        trace!(from = encoded.len(), to = byte_length, "padding scalar");
        let mut padded = Zeroizing::new(vec![0u8; byte_length - encoded.len()]);
        padded.extend_from_slice(encoded);
        return padded;
    }
    if encoded.len() > byte_length {
        if let [0x00, second, ..] = encoded {
            if second & 0x80 != 0 {
                trace!(from = encoded.len(), "stripping sign byte from scalar");
                return Zeroizing::new(encoded.get(1..).unwrap_or_default().to_vec());
            }
        }
    }
    Zeroizing::new(encoded.to_vec())
}

/// A private key on a prime-field curve.
#[derive(Debug)]
pub struct EcPrivateKey {
    base: EcKeyBase,
    s: KeyMaterial,
}

impl EcPrivateKey {
    /// An uninitialized private key of `size` bits.
    pub fn new(size: u16) -> Self {
        Self::with_base(EcKeyBase::new(KeyType::EcFpPrivate, size))
    }

    fn with_base(base: EcKeyBase) -> Self {
        // scalars are reduced modulo the order, not the field
        let s = KeyMaterial::new(order_length(base.size()));
        Self { base, s }
    }

    /// Loads a key computed by the backend, e.g. during key generation.
    pub fn from_parameters(params: &PrivateKeyParameters) -> Result<Self, CryptoError> {
        let base = EcKeyBase::from_domain(KeyType::EcFpPrivate, &params.domain)?;
        let mut key = Self::with_base(base);
        let encoded = Zeroizing::new(params.d.to_signed_bytes_be());
        let normalized = normalize_scalar(&encoded, byte_length(key.size()));
        key.s.set(&normalized, 0, normalized.len())?;
        Ok(key)
    }

    /// Sets the scalar from unsigned big-endian bytes, taken as given.
    pub fn set_s(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.s.set(buffer, offset, length)
    }

    /// Copies the scalar into `buffer` at `offset`, returning the byte count.
    pub fn get_s(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.s.get(buffer, offset)
    }

    /// The key as a backend parameter object.
    pub fn to_parameters(&self) -> Result<PrivateKeyParameters, CryptoError> {
        if !self.is_initialized() {
            return Err(CryptoError::UninitializedKey);
        }
        let d = BigInt::from_biguint(Sign::Plus, self.s.to_biguint()?);
        Ok(PrivateKeyParameters::new(d, self.base.domain_parameters()?))
    }

    /// The key as the tagged backend value.
    pub fn backend_parameters(&self) -> Result<BackendParameters, CryptoError> {
        self.to_parameters().map(BackendParameters::from)
    }
}

impl Key for EcPrivateKey {
    fn is_initialized(&self) -> bool {
        self.base.is_domain_parameters_initialized() && self.s.is_initialized()
    }

    fn clear_key(&mut self) {
        trace!(size = self.base.size(), "clearing private key");
        self.base.clear_key();
        self.s.clear();
    }

    fn key_type(&self) -> KeyType {
        self.base.key_type()
    }

    fn size(&self) -> u16 {
        self.base.size()
    }
}

impl EcKey for EcPrivateKey {
    fn base(&self) -> &EcKeyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EcKeyBase {
        &mut self.base
    }
}
