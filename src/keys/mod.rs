//! Elliptic-curve keys in the platform's buffer-oriented style.
use crate::errors::CryptoError;

pub mod domain;
pub mod ec_key;
pub mod ec_private;
pub mod ec_public;
pub mod key_pair;

pub use domain::{
    BackendParameters, DomainParameters, NamedCurve, PrivateKeyParameters, PublicKeyParameters,
};
pub use ec_key::{EcKey, EcKeyBase};
pub use ec_private::{normalize_scalar, EcPrivateKey};
pub use ec_public::EcPublicKey;
pub use key_pair::KeyPair;

/// Key type codes as published by the emulated platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyType {
    EcF2mPublic = 9,
    EcF2mPrivate = 10,
    EcFpPublic = 11,
    EcFpPrivate = 12,
}

impl KeyType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_private(self) -> bool {
        matches!(self, Self::EcF2mPrivate | Self::EcFpPrivate)
    }
}

impl TryFrom<u8> for KeyType {
    type Error = CryptoError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            9 => Ok(Self::EcF2mPublic),
            10 => Ok(Self::EcF2mPrivate),
            11 => Ok(Self::EcFpPublic),
            12 => Ok(Self::EcFpPrivate),
            _ => Err(CryptoError::NoSuchAlgorithm(code)),
        }
    }
}

/// Capability shared by every key: initialization query and erase.
pub trait Key {
    /// True once every component the key needs has been set.
    fn is_initialized(&self) -> bool;

    /// Wipes all key components and returns the key to the uninitialized state.
    fn clear_key(&mut self);

    fn key_type(&self) -> KeyType;

    /// Key size in bits.
    fn size(&self) -> u16;
}

/// Number of bytes needed to hold a value of `bits` bits.
pub fn byte_length(bits: u16) -> usize {
    usize::from(bits).div_ceil(8)
}

/// Bytes needed for the order of a curve over a `bits`-bit field, which can be
/// one bit wider than the field itself.
pub(crate) fn order_length(bits: u16) -> usize {
    (usize::from(bits) + 1).div_ceil(8)
}

/// Length of an uncompressed SEC1 point on a curve of `bits` bits.
pub(crate) fn point_length(bits: u16) -> usize {
    1 + 2 * byte_length(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_length() {
        assert_eq!(byte_length(256), 32);
        assert_eq!(byte_length(255), 32);
        assert_eq!(byte_length(257), 33);
        assert_eq!(byte_length(521), 66);
        assert_eq!(point_length(256), 65);
    }

    #[test]
    fn test_order_length() {
        assert_eq!(order_length(160), 21);
        assert_eq!(order_length(224), 29);
        assert_eq!(order_length(256), 33);
        assert_eq!(order_length(255), 32);
        assert_eq!(order_length(521), 66);
    }

    #[test]
    fn test_key_type_codes() {
        assert_eq!(KeyType::try_from(12), Ok(KeyType::EcFpPrivate));
        assert_eq!(KeyType::EcFpPublic.code(), 11);
        assert!(KeyType::EcF2mPrivate.is_private());
        assert!(!KeyType::EcFpPublic.is_private());
        assert_eq!(KeyType::try_from(1), Err(CryptoError::NoSuchAlgorithm(1)));
    }
}
