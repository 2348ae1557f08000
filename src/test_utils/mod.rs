#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

mod mockrng;

use crate::keys::{EcKey, EcPrivateKey, NamedCurve};

/// Type for a deterministic RNG
pub use mockrng::MockCryptoRng;

/// A private key on `curve` holding the domain parameters but no scalar.
pub fn private_key_with_domain(curve: NamedCurve) -> EcPrivateKey {
    let domain = curve.domain_parameters();
    let mut key = EcPrivateKey::new(domain.field_size().unwrap());
    key.set_domain_parameters(&domain).unwrap();
    key
}
