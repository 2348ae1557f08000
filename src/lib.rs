//! Emulation of a smart-card platform's EC key objects and random data
//! generators on top of `num-bigint` and the RustCrypto curve crates.
//!
//! Keys keep their components as fixed-capacity byte buffers that follow the
//! platform's `(buffer, offset, length)` copy-in/copy-out conventions, and are
//! converted into backend parameter objects only on demand.

mod buffer;
pub mod errors;
pub mod key_material;
pub mod keys;
pub mod random;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use errors::CryptoError;
pub use key_material::KeyMaterial;
pub use keys::{
    normalize_scalar, BackendParameters, DomainParameters, EcKey, EcKeyBase, EcPrivateKey,
    EcPublicKey, Key, KeyPair, KeyType, NamedCurve, PrivateKeyParameters, PublicKeyParameters,
};
pub use random::{PseudoRandomData, RandomData, RandomRegistry, PSEUDO_RANDOM, SECURE_RANDOM};
