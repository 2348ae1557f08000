//! Key pair generation on the named curves.
use elliptic_curve::{
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytesSize, SecretKey,
};
use num_bigint::{BigInt, Sign};
use rand_core::CryptoRngCore;
use tracing::debug;
use zeroize::Zeroizing;

use crate::errors::CryptoError;

use super::{
    DomainParameters, EcKey, EcPrivateKey, EcPublicKey, Key, NamedCurve, PrivateKeyParameters,
    PublicKeyParameters,
};

/// A matching EC public/private key pair.
#[derive(Debug)]
pub struct KeyPair {
    public: EcPublicKey,
    private: EcPrivateKey,
}

impl KeyPair {
    /// An uninitialized pair of `size` bits.
    pub fn new(size: u16) -> Self {
        Self {
            public: EcPublicKey::new(size),
            private: EcPrivateKey::new(size),
        }
    }

    /// Pairs existing key objects; generation will overwrite their values.
    pub fn from_keys(public: EcPublicKey, private: EcPrivateKey) -> Result<Self, CryptoError> {
        if public.size() != private.size() {
            return Err(CryptoError::IllegalValue);
        }
        Ok(Self { public, private })
    }

    /// Generates fresh key values.
    ///
    /// The domain parameters are taken from the private key, then from the
    /// public key, and otherwise default to the named curve for the key size.
    pub fn gen_key_pair(&mut self, rng: &mut impl CryptoRngCore) -> Result<(), CryptoError> {
        let domain = self.domain()?;
        let curve = NamedCurve::identify(&domain).ok_or(CryptoError::IllegalValue)?;
        debug!(?curve, size = self.private.size(), "generating key pair");

        let (d, w) = match curve {
            NamedCurve::Secp256r1 => generate::<p256::NistP256>(rng),
            NamedCurve::Secp256k1 => generate::<k256::Secp256k1>(rng),
        };
        let private = EcPrivateKey::from_parameters(&PrivateKeyParameters::new(d, domain.clone()))?;
        let public = EcPublicKey::from_parameters(&PublicKeyParameters::new(w, domain))?;
        self.private = private;
        self.public = public;
        Ok(())
    }

    fn domain(&self) -> Result<DomainParameters, CryptoError> {
        if self.private.is_domain_parameters_initialized() {
            return self.private.domain_parameters();
        }
        if self.public.is_domain_parameters_initialized() {
            return self.public.domain_parameters();
        }
        NamedCurve::default_for_size(self.private.size())
            .map(NamedCurve::domain_parameters)
            .ok_or(CryptoError::IllegalValue)
    }

    pub fn public(&self) -> &EcPublicKey {
        &self.public
    }

    pub fn private(&self) -> &EcPrivateKey {
        &self.private
    }

    pub fn into_parts(self) -> (EcPublicKey, EcPrivateKey) {
        (self.public, self.private)
    }
}

/// Draws a scalar with the backend and returns it as a signed integer along
/// with the uncompressed public point.
fn generate<C>(rng: &mut impl CryptoRngCore) -> (BigInt, Vec<u8>)
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret = SecretKey::<C>::random(rng);
    let w = secret.public_key().to_encoded_point(false).as_bytes().to_vec();
    let bytes = Zeroizing::new(secret.to_bytes());
    let d = BigInt::from_bytes_be(Sign::Plus, &bytes);
    (d, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    fn check_pair<C>(pair: &KeyPair)
    where
        C: CurveArithmetic,
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
        FieldBytesSize<C>: ModulusSize,
    {
        assert!(pair.private().is_initialized());
        assert!(pair.public().is_initialized());
        let secret = pair.private().to_parameters().unwrap().secret_key::<C>().unwrap();
        let public = pair.public().to_parameters().unwrap().public_key::<C>().unwrap();
        assert_eq!(secret.public_key(), public);

        let mut s = [0u8; 32];
        assert_eq!(pair.private().get_s(&mut s, 0).unwrap(), 32);
    }

    #[test]
    fn test_default_curve_generation() {
        let mut pair = KeyPair::new(256);
        pair.gen_key_pair(&mut OsRng).unwrap();
        assert_eq!(
            pair.private().domain_parameters().unwrap(),
            NamedCurve::Secp256r1.domain_parameters()
        );
        check_pair::<p256::NistP256>(&pair);
    }

    #[test]
    fn test_generation_uses_private_domain() {
        let mut private = EcPrivateKey::new(256);
        private
            .set_domain_parameters(&NamedCurve::Secp256k1.domain_parameters())
            .unwrap();
        let mut pair = KeyPair::from_keys(EcPublicKey::new(256), private).unwrap();
        pair.gen_key_pair(&mut OsRng).unwrap();
        check_pair::<k256::Secp256k1>(&pair);

        // regenerating replaces the scalar
        let before = pair.private().to_parameters().unwrap().d;
        pair.gen_key_pair(&mut OsRng).unwrap();
        assert_ne!(pair.private().to_parameters().unwrap().d, before);
    }

    #[test]
    fn test_generation_uses_public_domain() {
        let mut public = EcPublicKey::new(256);
        public
            .set_domain_parameters(&NamedCurve::Secp256k1.domain_parameters())
            .unwrap();
        let mut pair = KeyPair::from_keys(public, EcPrivateKey::new(256)).unwrap();
        pair.gen_key_pair(&mut OsRng).unwrap();
        check_pair::<k256::Secp256k1>(&pair);
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let mut pair = KeyPair::new(256);
        pair.gen_key_pair(&mut OsRng).unwrap();
        let params = pair.private().to_parameters().unwrap();
        let decimal = params.d.to_string();
        let hex = params.d.to_str_radix(16);

        for printed in [format!("{pair:?}"), format!("{params:?}")] {
            assert!(!printed.contains(&decimal));
            assert!(!printed.contains(&hex));
        }
    }

    #[test]
    fn test_unsupported_domains() {
        let mut pair = KeyPair::new(192);
        assert_eq!(pair.gen_key_pair(&mut OsRng), Err(CryptoError::IllegalValue));

        let mut custom = NamedCurve::Secp256r1.domain_parameters();
        custom.cofactor = 2;
        let mut private = EcPrivateKey::new(256);
        private.set_domain_parameters(&custom).unwrap();
        let mut pair = KeyPair::from_keys(EcPublicKey::new(256), private).unwrap();
        assert_eq!(pair.gen_key_pair(&mut OsRng), Err(CryptoError::IllegalValue));
        assert!(!pair.private().is_initialized());

        assert!(KeyPair::from_keys(EcPublicKey::new(256), EcPrivateKey::new(384)).is_err());
    }
}
