//! EC public key: domain parameters plus the public point `W`.
use tracing::trace;

use crate::errors::CryptoError;
use crate::key_material::KeyMaterial;

use super::{point_length, BackendParameters, EcKey, EcKeyBase, Key, KeyType, PublicKeyParameters};

/// A public key on a prime-field curve, `W` held as a SEC1 encoded point.
#[derive(Debug)]
pub struct EcPublicKey {
    base: EcKeyBase,
    w: KeyMaterial,
}

impl EcPublicKey {
    pub fn new(size: u16) -> Self {
        Self::with_base(EcKeyBase::new(KeyType::EcFpPublic, size))
    }

    fn with_base(base: EcKeyBase) -> Self {
        let w = KeyMaterial::new(point_length(base.size()));
        Self { base, w }
    }

    pub fn from_parameters(params: &PublicKeyParameters) -> Result<Self, CryptoError> {
        let base = EcKeyBase::from_domain(KeyType::EcFpPublic, &params.domain)?;
        let mut key = Self::with_base(base);
        key.w.set(&params.w, 0, params.w.len())?;
        Ok(key)
    }

    pub fn set_w(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.w.set(buffer, offset, length)
    }

    pub fn get_w(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.w.get(buffer, offset)
    }

    pub fn to_parameters(&self) -> Result<PublicKeyParameters, CryptoError> {
        if !self.is_initialized() {
            return Err(CryptoError::UninitializedKey);
        }
        Ok(PublicKeyParameters::new(
            self.w.as_bytes()?.to_vec(),
            self.base.domain_parameters()?,
        ))
    }

    pub fn backend_parameters(&self) -> Result<BackendParameters, CryptoError> {
        self.to_parameters().map(BackendParameters::from)
    }
}

impl Key for EcPublicKey {
    fn is_initialized(&self) -> bool {
        self.base.is_domain_parameters_initialized() && self.w.is_initialized()
    }

    fn clear_key(&mut self) {
        trace!(size = self.base.size(), "clearing public key");
        self.base.clear_key();
        self.w.clear();
    }

    fn key_type(&self) -> KeyType {
        self.base.key_type()
    }

    fn size(&self) -> u16 {
        self.base.size()
    }
}

impl EcKey for EcPublicKey {
    fn base(&self) -> &EcKeyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EcKeyBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::NamedCurve;

    #[test]
    fn test_public_key_lifecycle() {
        let domain = NamedCurve::Secp256r1.domain_parameters();
        let mut key = EcPublicKey::new(256);
        assert_eq!(key.key_type(), KeyType::EcFpPublic);
        key.set_w(&domain.generator, 0, domain.generator.len()).unwrap();
        assert!(!key.is_initialized());

        key.set_domain_parameters(&domain).unwrap();
        assert!(key.is_initialized());
        let params = key.to_parameters().unwrap();
        assert_eq!(params.w, domain.generator);

        let copy = EcPublicKey::from_parameters(&params).unwrap();
        let mut out = [0u8; 65];
        assert_eq!(copy.get_w(&mut out, 0).unwrap(), 65);
        assert_eq!(out.as_slice(), domain.generator.as_slice());

        key.clear_key();
        assert!(!key.is_initialized());
        assert_eq!(key.get_w(&mut out, 0), Err(CryptoError::UninitializedKey));
    }

    #[test]
    fn test_point_too_long() {
        let mut key = EcPublicKey::new(256);
        let long = [0x04u8; 66];
        assert!(matches!(
            key.set_w(&long, 0, long.len()),
            Err(CryptoError::InvalidArgument { .. })
        ));
    }
}
