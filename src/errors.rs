use thiserror::Error;

/// Errors surfaced to code running against the emulated card primitives.
///
/// The first three kinds mirror the platform's `CryptoException` reasons; the
/// last one stands in for the platform's array-bounds exceptions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material or domain parameters were requested before being set.
    #[error("key is not initialized")]
    UninitializedKey,
    /// A value is not acceptable for the operation, e.g. a zero-length request.
    #[error("illegal value")]
    IllegalValue,
    /// The requested algorithm code is not registered.
    #[error("no such algorithm: {0}")]
    NoSuchAlgorithm(u8),
    /// An `(offset, length)` pair does not fit the buffer or the container.
    #[error("invalid buffer argument: offset {offset}, length {length}, available {available}")]
    InvalidArgument {
        offset: usize,
        length: usize,
        available: usize,
    },
}

impl CryptoError {
    /// The platform reason code, when the kind has one.
    pub fn reason_code(&self) -> Option<u16> {
        match self {
            Self::IllegalValue => Some(1),
            Self::UninitializedKey => Some(2),
            Self::NoSuchAlgorithm(_) => Some(3),
            Self::InvalidArgument { .. } => None,
        }
    }
}
