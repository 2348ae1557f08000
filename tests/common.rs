#![allow(dead_code)]
use cardkeys::{test_utils::MockCryptoRng, KeyPair, NamedCurve};

/// Generates a key pair on `curve` with a deterministic RNG.
#[allow(clippy::missing_panics_doc)]
pub fn generate_pair(curve: NamedCurve, seed: u64) -> KeyPair {
    let private = cardkeys::test_utils::private_key_with_domain(curve);
    let mut pair = KeyPair::from_keys(cardkeys::EcPublicKey::new(256), private).unwrap();
    pair.gen_key_pair(&mut MockCryptoRng::seed_from_u64(seed)).unwrap();
    pair
}
