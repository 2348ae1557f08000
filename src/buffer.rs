//! Bounds handling for the `(buffer, offset, length)` calling convention.
use std::ops::Range;

use crate::errors::CryptoError;

/// Validates that `length` bytes starting at `offset` fit in a buffer of
/// `available` bytes and returns the corresponding range.
pub(crate) fn checked_range(
    available: usize,
    offset: usize,
    length: usize,
) -> Result<Range<usize>, CryptoError> {
    let invalid = CryptoError::InvalidArgument {
        offset,
        length,
        available,
    };
    let end = offset.checked_add(length).ok_or(invalid)?;
    if end > available {
        return Err(invalid);
    }
    Ok(offset..end)
}

/// Borrows `length` bytes of `buffer` starting at `offset`.
pub(crate) fn window(buffer: &[u8], offset: usize, length: usize) -> Result<&[u8], CryptoError> {
    let range = checked_range(buffer.len(), offset, length)?;
    buffer.get(range).ok_or(CryptoError::InvalidArgument {
        offset,
        length,
        available: buffer.len(),
    })
}

/// Mutably borrows `length` bytes of `buffer` starting at `offset`.
pub(crate) fn window_mut(
    buffer: &mut [u8],
    offset: usize,
    length: usize,
) -> Result<&mut [u8], CryptoError> {
    let available = buffer.len();
    let range = checked_range(available, offset, length)?;
    buffer.get_mut(range).ok_or(CryptoError::InvalidArgument {
        offset,
        length,
        available,
    })
}
