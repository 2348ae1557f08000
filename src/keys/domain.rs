//! Backend-side parameter objects exchanged with the curve library.
//!
//! These values are built on demand from the buffers held by the keys and are
//! never cached by them. Conversion into RustCrypto `elliptic-curve` types is
//! available for callers that need actual curve arithmetic.

use std::fmt;

use elliptic_curve::{
    bigint::ArrayEncoding,
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, Curve, CurveArithmetic, FieldBytes, FieldBytesSize, PublicKey, SecretKey,
};
use hex_literal::hex;
use num_bigint::{BigInt, BigUint, Sign};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::CryptoError;

/// Curve domain parameters over a prime field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters {
    /// Field prime `p`.
    pub field: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    /// SEC1-encoded base point.
    pub generator: Vec<u8>,
    /// Order `r` of the base point.
    pub order: BigUint,
    /// Cofactor `k`.
    pub cofactor: u16,
}

impl DomainParameters {
    /// Size of the field in bits, which is also the key size of keys on it.
    pub fn field_size(&self) -> Result<u16, CryptoError> {
        u16::try_from(self.field.bits()).map_err(|_| CryptoError::IllegalValue)
    }

    /// Checks that the order matches the one of curve `C`.
    fn ensure_curve<C: Curve>(&self) -> Result<(), CryptoError> {
        let order = BigUint::from_bytes_be(&C::ORDER.to_be_byte_array());
        if order == self.order {
            Ok(())
        } else {
            Err(CryptoError::IllegalValue)
        }
    }
}

const SECP256R1_P: [u8; 32] =
    hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
const SECP256R1_A: [u8; 32] =
    hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc");
const SECP256R1_B: [u8; 32] =
    hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
const SECP256R1_G: [u8; 65] = hex!(
    "04"
    "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
    "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"
);
const SECP256R1_R: [u8; 32] =
    hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");

const SECP256K1_P: [u8; 32] =
    hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
const SECP256K1_G: [u8; 65] = hex!(
    "04"
    "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
);
const SECP256K1_R: [u8; 32] =
    hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

/// Curves the crate can generate keys on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    Secp256r1,
    Secp256k1,
}

impl NamedCurve {
    pub const ALL: [Self; 2] = [Self::Secp256r1, Self::Secp256k1];

    pub fn domain_parameters(self) -> DomainParameters {
        match self {
            Self::Secp256r1 => DomainParameters {
                field: BigUint::from_bytes_be(&SECP256R1_P),
                a: BigUint::from_bytes_be(&SECP256R1_A),
                b: BigUint::from_bytes_be(&SECP256R1_B),
                generator: SECP256R1_G.to_vec(),
                order: BigUint::from_bytes_be(&SECP256R1_R),
                cofactor: 1,
            },
            Self::Secp256k1 => DomainParameters {
                field: BigUint::from_bytes_be(&SECP256K1_P),
                a: BigUint::from(0u8),
                b: BigUint::from(7u8),
                generator: SECP256K1_G.to_vec(),
                order: BigUint::from_bytes_be(&SECP256K1_R),
                cofactor: 1,
            },
        }
    }

    /// Finds the named curve with exactly these domain parameters.
    pub fn identify(domain: &DomainParameters) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.domain_parameters() == *domain)
    }

    /// The curve used when a key pair of `bits` is generated without domain
    /// parameters.
    pub fn default_for_size(bits: u16) -> Option<Self> {
        match bits {
            256 => Some(Self::Secp256r1),
            _ => None,
        }
    }
}

/// SEC 2 secp160r1, whose order is one bit wider than its field.
#[cfg(test)]
pub(crate) fn secp160r1() -> DomainParameters {
    DomainParameters {
        field: BigUint::from_bytes_be(&hex!("ffffffffffffffffffffffffffffffff7fffffff")),
        a: BigUint::from_bytes_be(&hex!("ffffffffffffffffffffffffffffffff7ffffffc")),
        b: BigUint::from_bytes_be(&hex!("1c97befc54bd7a8b65acf89f81d4d4adc565fa45")),
        generator: hex!(
            "04"
            "4a96b5688ef573284664698968c38bb913cbfc82"
            "23a628553168947d59dcc912042351377ac5fb32"
        )
        .to_vec(),
        order: BigUint::from_bytes_be(&hex!("0100000000000000000001f4c8f927aed3ca752257")),
        cofactor: 1,
    }
}

/// Private scalar `d` as a signed backend integer, with its domain.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeyParameters {
    pub d: BigInt,
    pub domain: DomainParameters,
}

impl fmt::Debug for PrivateKeyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyParameters")
            .field("d", &"<redacted>")
            .field("domain", &self.domain)
            .finish()
    }
}

impl PrivateKeyParameters {
    pub fn new(d: BigInt, domain: DomainParameters) -> Self {
        Self { d, domain }
    }

    /// Converts into a RustCrypto secret key on curve `C`.
    pub fn secret_key<C: Curve>(&self) -> Result<SecretKey<C>, CryptoError> {
        self.domain.ensure_curve::<C>()?;
        let (sign, magnitude) = self.d.to_bytes_be();
        let magnitude = Zeroizing::new(magnitude);
        if sign == Sign::Minus {
            return Err(CryptoError::IllegalValue);
        }

        let mut repr = FieldBytes::<C>::default();
        let pad = repr
            .len()
            .checked_sub(magnitude.len())
            .ok_or(CryptoError::IllegalValue)?;
        for (dst, src) in repr.iter_mut().skip(pad).zip(magnitude.iter()) {
            *dst = *src;
        }
        let secret = SecretKey::from_bytes(&repr).map_err(|_| CryptoError::IllegalValue);
        repr.zeroize();
        secret
    }
}

/// Public point `W` in SEC1 encoding, with its domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKeyParameters {
    pub w: Vec<u8>,
    pub domain: DomainParameters,
}

impl PublicKeyParameters {
    pub fn new(w: Vec<u8>, domain: DomainParameters) -> Self {
        Self { w, domain }
    }

    /// Converts into a RustCrypto public key on curve `C`.
    pub fn public_key<C>(&self) -> Result<PublicKey<C>, CryptoError>
    where
        C: CurveArithmetic,
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
        FieldBytesSize<C>: ModulusSize,
    {
        self.domain.ensure_curve::<C>()?;
        PublicKey::from_sec1_bytes(&self.w).map_err(|_| CryptoError::IllegalValue)
    }
}

/// The parameter object handed to the backend for a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendParameters {
    Private(PrivateKeyParameters),
    Public(PublicKeyParameters),
}

impl BackendParameters {
    pub fn domain(&self) -> &DomainParameters {
        match self {
            Self::Private(params) => &params.domain,
            Self::Public(params) => &params.domain,
        }
    }
}

impl From<PrivateKeyParameters> for BackendParameters {
    fn from(params: PrivateKeyParameters) -> Self {
        Self::Private(params)
    }
}

impl From<PublicKeyParameters> for BackendParameters {
    fn from(params: PublicKeyParameters) -> Self {
        Self::Public(params)
    }
}
