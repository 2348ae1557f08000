//! Domain-parameter state shared by EC private and public keys.
use crate::errors::CryptoError;
use crate::key_material::KeyMaterial;

use super::{byte_length, order_length, point_length, DomainParameters, Key, KeyType};

/// Key type, key size and curve domain parameters of an EC key.
///
/// Domain parameters are held in key-material containers so they follow the
/// same copy-in/copy-out and wipe rules as the key value itself. They count as
/// initialized only once all six components are set.
#[derive(Debug)]
pub struct EcKeyBase {
    key_type: KeyType,
    size: u16,
    field: KeyMaterial,
    a: KeyMaterial,
    b: KeyMaterial,
    g: KeyMaterial,
    r: KeyMaterial,
    k: Option<u16>,
}

impl EcKeyBase {
    /// A key of `size` bits without domain parameters.
    pub fn new(key_type: KeyType, size: u16) -> Self {
        let len = byte_length(size);
        Self {
            key_type,
            size,
            field: KeyMaterial::new(len),
            a: KeyMaterial::new(len),
            b: KeyMaterial::new(len),
            g: KeyMaterial::new(point_length(size)),
            // the order may be one bit longer than the field (Hasse bound)
            r: KeyMaterial::new(order_length(size)),
            k: None,
        }
    }

    /// A key sized to the field of `domain`, with its domain parameters set.
    pub fn from_domain(
        key_type: KeyType,
        domain: &DomainParameters,
    ) -> Result<Self, CryptoError> {
        let mut base = Self::new(key_type, domain.field_size()?);
        let len = byte_length(base.size);
        base.field.set_biguint(&domain.field, len)?;
        base.a.set_biguint(&domain.a, len)?;
        base.b.set_biguint(&domain.b, len)?;
        base.g.set(&domain.generator, 0, domain.generator.len())?;
        base.r.set_biguint(&domain.order, len)?;
        base.k = Some(domain.cofactor);
        Ok(base)
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn is_domain_parameters_initialized(&self) -> bool {
        self.field.is_initialized()
            && self.a.is_initialized()
            && self.b.is_initialized()
            && self.g.is_initialized()
            && self.r.is_initialized()
            && self.k.is_some()
    }

    /// Wipes all domain parameters.
    pub fn clear_key(&mut self) {
        self.field.clear();
        self.a.clear();
        self.b.clear();
        self.g.clear();
        self.r.clear();
        self.k = None;
    }

    /// Replaces every domain parameter at once; on error nothing changes.
    pub fn set_domain_parameters(
        &mut self,
        domain: &DomainParameters,
    ) -> Result<(), CryptoError> {
        if domain.field_size()? != self.size {
            return Err(CryptoError::IllegalValue);
        }
        *self = Self::from_domain(self.key_type, domain)?;
        Ok(())
    }

    /// Copies the domain parameters of `other`, which must have the same size.
    pub fn copy_domain_parameters_from(&mut self, other: &Self) -> Result<(), CryptoError> {
        let domain = other.domain_parameters()?;
        if other.size != self.size {
            return Err(CryptoError::IllegalValue);
        }
        self.set_domain_parameters(&domain)
    }

    /// The domain parameters as a backend object, rebuilt on every call.
    pub fn domain_parameters(&self) -> Result<DomainParameters, CryptoError> {
        Ok(DomainParameters {
            field: self.field.to_biguint()?,
            a: self.a.to_biguint()?,
            b: self.b.to_biguint()?,
            generator: self.g.as_bytes()?.to_vec(),
            order: self.r.to_biguint()?,
            cofactor: self.k.ok_or(CryptoError::UninitializedKey)?,
        })
    }

    pub fn set_field_fp(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.field.set(buffer, offset, length)
    }

    pub fn get_field(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.field.get(buffer, offset)
    }

    pub fn set_a(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.a.set(buffer, offset, length)
    }

    pub fn get_a(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.a.get(buffer, offset)
    }

    pub fn set_b(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.b.set(buffer, offset, length)
    }

    pub fn get_b(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.b.get(buffer, offset)
    }

    /// Sets the base point from its SEC1 encoding.
    pub fn set_g(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.g.set(buffer, offset, length)
    }

    pub fn get_g(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.g.get(buffer, offset)
    }

    /// Sets the order of the base point.
    pub fn set_r(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.r.set(buffer, offset, length)
    }

    pub fn get_r(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.r.get(buffer, offset)
    }

    pub fn set_k(&mut self, cofactor: u16) {
        self.k = Some(cofactor);
    }

    pub fn get_k(&self) -> Result<u16, CryptoError> {
        self.k.ok_or(CryptoError::UninitializedKey)
    }
}

/// Domain-parameter accessors for keys composed over an [`EcKeyBase`].
pub trait EcKey: Key {
    fn base(&self) -> &EcKeyBase;

    fn base_mut(&mut self) -> &mut EcKeyBase;

    fn is_domain_parameters_initialized(&self) -> bool {
        self.base().is_domain_parameters_initialized()
    }

    fn domain_parameters(&self) -> Result<DomainParameters, CryptoError> {
        self.base().domain_parameters()
    }

    fn set_domain_parameters(
        &mut self,
        domain: &DomainParameters,
    ) -> Result<(), CryptoError> {
        self.base_mut().set_domain_parameters(domain)
    }

    fn copy_domain_parameters_from(&mut self, other: &dyn EcKey) -> Result<(), CryptoError> {
        self.base_mut().copy_domain_parameters_from(other.base())
    }

    fn set_field_fp(
        &mut self,
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), CryptoError> {
        self.base_mut().set_field_fp(buffer, offset, length)
    }

    fn get_field(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.base().get_field(buffer, offset)
    }

    fn set_a(&mut self, buffer: &[u8], offset: usize, length: usize) -> Result<(), CryptoError> {
        self.base_mut().set_a(buffer, offset, length)
    }

    fn get_a(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.base().get_a(buffer, offset)
    }

    fn set_b(&mut self, buffer: &[u8], offset: usize, length: usize) -> Result<(), CryptoError> {
        self.base_mut().set_b(buffer, offset, length)
    }

    fn get_b(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.base().get_b(buffer, offset)
    }

    fn set_g(&mut self, buffer: &[u8], offset: usize, length: usize) -> Result<(), CryptoError> {
        self.base_mut().set_g(buffer, offset, length)
    }

    fn get_g(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.base().get_g(buffer, offset)
    }

    fn set_r(&mut self, buffer: &[u8], offset: usize, length: usize) -> Result<(), CryptoError> {
        self.base_mut().set_r(buffer, offset, length)
    }

    fn get_r(&self, buffer: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        self.base().get_r(buffer, offset)
    }

    fn set_k(&mut self, cofactor: u16) {
        self.base_mut().set_k(cofactor);
    }

    fn get_k(&self) -> Result<u16, CryptoError> {
        self.base().get_k()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::domain::secp160r1;
    use crate::keys::NamedCurve;

    #[test]
    fn test_new_has_no_domain() {
        let base = EcKeyBase::new(KeyType::EcFpPrivate, 256);
        assert!(!base.is_domain_parameters_initialized());
        assert_eq!(base.domain_parameters(), Err(CryptoError::UninitializedKey));
        assert_eq!(base.get_k(), Err(CryptoError::UninitializedKey));
    }

    #[test]
    fn test_from_domain_roundtrip() {
        let domain = NamedCurve::Secp256k1.domain_parameters();
        let base = EcKeyBase::from_domain(KeyType::EcFpPrivate, &domain).unwrap();
        assert!(base.is_domain_parameters_initialized());
        assert_eq!(base.size(), 256);
        assert_eq!(base.domain_parameters().unwrap(), domain);

        let mut b = [0u8; 32];
        assert_eq!(base.get_b(&mut b, 0).unwrap(), 32);
        assert_eq!(b.last(), Some(&7u8));
        assert!(b.iter().rev().skip(1).all(|byte| *byte == 0));
    }

    #[test]
    fn test_domain_set_piecewise() {
        let domain = NamedCurve::Secp256r1.domain_parameters();
        let reference = EcKeyBase::from_domain(KeyType::EcFpPublic, &domain).unwrap();
        let mut base = EcKeyBase::new(KeyType::EcFpPublic, 256);

        let mut scratch = [0u8; 65];
        let n = reference.get_field(&mut scratch, 0).unwrap();
        base.set_field_fp(&scratch, 0, n).unwrap();
        let n = reference.get_a(&mut scratch, 0).unwrap();
        base.set_a(&scratch, 0, n).unwrap();
        let n = reference.get_b(&mut scratch, 0).unwrap();
        base.set_b(&scratch, 0, n).unwrap();
        let n = reference.get_g(&mut scratch, 0).unwrap();
        base.set_g(&scratch, 0, n).unwrap();
        assert!(!base.is_domain_parameters_initialized());
        let n = reference.get_r(&mut scratch, 0).unwrap();
        base.set_r(&scratch, 0, n).unwrap();
        base.set_k(1);

        assert!(base.is_domain_parameters_initialized());
        assert_eq!(base.domain_parameters().unwrap(), domain);
    }

    #[test]
    fn test_order_wider_than_field() {
        let domain = secp160r1();
        let base = EcKeyBase::from_domain(KeyType::EcFpPrivate, &domain).unwrap();
        assert_eq!(base.size(), 160);
        assert_eq!(base.domain_parameters().unwrap(), domain);

        let mut r = [0u8; 21];
        assert_eq!(base.get_r(&mut r, 0).unwrap(), 21);
        assert_eq!(r.first(), Some(&1u8));
        let mut field = [0u8; 21];
        assert_eq!(base.get_field(&mut field, 0).unwrap(), 20);

        let mut piecewise = EcKeyBase::new(KeyType::EcFpPublic, 160);
        piecewise.set_r(&r, 0, r.len()).unwrap();
        let too_wide = [0xffu8; 22];
        assert!(matches!(
            piecewise.set_r(&too_wide, 0, too_wide.len()),
            Err(CryptoError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_order_keeps_field_width() {
        let domain = NamedCurve::Secp256r1.domain_parameters();
        let base = EcKeyBase::from_domain(KeyType::EcFpPublic, &domain).unwrap();
        let mut r = [0u8; 33];
        assert_eq!(base.get_r(&mut r, 0).unwrap(), 32);
    }

    #[test]
    fn test_oversized_domain_component_rejected() {
        let mut base = EcKeyBase::new(KeyType::EcFpPrivate, 128);
        let wide = [0xffu8; 17];
        assert!(matches!(
            base.set_a(&wide, 0, wide.len()),
            Err(CryptoError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_clear_key_resets_domain() {
        let domain = NamedCurve::Secp256r1.domain_parameters();
        let mut base = EcKeyBase::from_domain(KeyType::EcFpPrivate, &domain).unwrap();
        base.clear_key();
        assert!(!base.is_domain_parameters_initialized());
        let mut out = [0u8; 32];
        assert_eq!(base.get_field(&mut out, 0), Err(CryptoError::UninitializedKey));
    }

    #[test]
    fn test_copy_domain_parameters() {
        let domain = NamedCurve::Secp256k1.domain_parameters();
        let source = EcKeyBase::from_domain(KeyType::EcFpPublic, &domain).unwrap();
        let mut target = EcKeyBase::new(KeyType::EcFpPrivate, 256);
        target.copy_domain_parameters_from(&source).unwrap();
        assert_eq!(target.key_type(), KeyType::EcFpPrivate);
        assert_eq!(target.domain_parameters().unwrap(), domain);

        let mut small = EcKeyBase::new(KeyType::EcFpPrivate, 192);
        assert_eq!(
            small.copy_domain_parameters_from(&source),
            Err(CryptoError::IllegalValue)
        );
        let empty = EcKeyBase::new(KeyType::EcFpPublic, 256);
        assert_eq!(
            target.copy_domain_parameters_from(&empty),
            Err(CryptoError::UninitializedKey)
        );
        assert!(target.is_domain_parameters_initialized());
    }
}
