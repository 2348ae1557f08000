//! Fixed-capacity byte storage for one piece of key material.
//!
//! Every mutation replaces the whole value, and the backing storage is
//! allocated once at full capacity so a replacement never reallocates and
//! never leaves an unwiped copy of an earlier value on the heap.

use std::fmt;

use num_bigint::BigUint;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::buffer::{window, window_mut};
use crate::errors::CryptoError;

pub struct KeyMaterial {
    bytes: Vec<u8>,
    capacity: usize,
    initialized: bool,
}

impl KeyMaterial {
    /// Creates an empty, uninitialized container holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
            initialized: false,
        }
    }

    /// Replaces the content with `length` bytes of `source` starting at `offset`.
    ///
    /// Nothing changes when the range is out of bounds or the value does not fit.
    pub fn set(&mut self, source: &[u8], offset: usize, length: usize) -> Result<(), CryptoError> {
        let value = window(source, offset, length)?;
        if length > self.capacity {
            return Err(CryptoError::InvalidArgument {
                offset,
                length,
                available: self.capacity,
            });
        }
        self.bytes.zeroize();
        self.bytes.extend_from_slice(value);
        self.initialized = true;
        Ok(())
    }

    /// Copies the stored value into `dest` at `offset` and returns the number
    /// of bytes written.
    pub fn get(&self, dest: &mut [u8], offset: usize) -> Result<usize, CryptoError> {
        if !self.initialized {
            return Err(CryptoError::UninitializedKey);
        }
        window_mut(dest, offset, self.bytes.len())?.copy_from_slice(&self.bytes);
        Ok(self.bytes.len())
    }

    /// Stores `value` as unsigned big-endian bytes, left-padded to at least
    /// `length` bytes.
    pub fn set_biguint(&mut self, value: &BigUint, length: usize) -> Result<(), CryptoError> {
        let mut encoded = value.to_bytes_be();
        let padded = left_pad(&encoded, length.max(encoded.len()));
        encoded.zeroize();
        let mut padded = padded?;
        let result = self.set(&padded, 0, padded.len());
        padded.zeroize();
        result
    }

    /// The stored value read as an unsigned big-endian integer.
    pub fn to_biguint(&self) -> Result<BigUint, CryptoError> {
        if !self.initialized {
            return Err(CryptoError::UninitializedKey);
        }
        Ok(BigUint::from_bytes_be(&self.bytes))
    }

    /// Wipes the stored value and marks the container uninitialized.
    pub fn clear(&mut self) {
        self.bytes.zeroize();
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Length of the stored value, zero when uninitialized.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Crate-internal view of the stored bytes.
    pub(crate) fn as_bytes(&self) -> Result<&[u8], CryptoError> {
        if !self.initialized {
            return Err(CryptoError::UninitializedKey);
        }
        Ok(&self.bytes)
    }
}

/// Left-pads `value` with zero bytes up to `length`.
pub(crate) fn left_pad(value: &[u8], length: usize) -> Result<Vec<u8>, CryptoError> {
    let pad = length
        .checked_sub(value.len())
        .ok_or(CryptoError::InvalidArgument {
            offset: 0,
            length: value.len(),
            available: length,
        })?;
    let mut padded = Vec::with_capacity(length);
    padded.resize(pad, 0u8);
    padded.extend_from_slice(value);
    Ok(padded)
}

impl ConstantTimeEq for KeyMaterial {
    fn ct_eq(&self, other: &Self) -> Choice {
        let same_state = Choice::from(u8::from(self.initialized == other.initialized));
        same_state & self.bytes.as_slice().ct_eq(other.bytes.as_slice())
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &self.bytes.len())
            .field("capacity", &self.capacity)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.clear();
    }
}
