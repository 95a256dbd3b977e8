//! Zeroizing storage for secret bytes.
//!
//! A [`SecureBuffer`] owns a fixed allocation. Its contents are only
//! reachable inside the closures passed to [`SecureBuffer::with_bytes`] and
//! [`SecureBuffer::with_bytes_mut`], and the whole allocation is overwritten
//! with zeros when the buffer is dropped.
//!
//! ## Example
//!
//! ```
//! use curve448::secure::SecureBuffer;
//!
//! let buffer = SecureBuffer::new(8, |bytes| {
//!     bytes[..3].copy_from_slice(b"key");
//!     3
//! });
//! assert_eq!(buffer.len(), 3);
//! buffer.with_bytes(|bytes| assert_eq!(bytes, b"key"));
//! ```

use std::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-capacity container for secret bytes that is wiped on drop.
pub struct SecureBuffer {
    storage: Box<[u8]>,
    len: usize,
}

impl SecureBuffer {
    /// Allocates `capacity` zeroed bytes and lets `fill` initialize them.
    ///
    /// `fill` returns how many leading bytes are valid. Only that prefix is
    /// visible afterwards; a count larger than `capacity` is clamped.
    pub fn new<F>(capacity: usize, fill: F) -> Self
    where
        F: FnOnce(&mut [u8]) -> usize,
    {
        let mut buffer = Self::zeroed(capacity);
        let valid = fill(&mut buffer.storage[..]);
        buffer.len = valid.min(capacity);
        buffer
    }

    /// Fallible version of [`SecureBuffer::new`].
    ///
    /// If `fill` fails, the partially written storage is wiped before the
    /// error is returned.
    pub fn try_new<F, E>(capacity: usize, fill: F) -> Result<Self, E>
    where
        F: FnOnce(&mut [u8]) -> Result<usize, E>,
    {
        let mut buffer = Self::zeroed(capacity);
        let valid = fill(&mut buffer.storage[..])?;
        buffer.len = valid.min(capacity);
        Ok(buffer)
    }

    /// Copies `bytes` into a new buffer of exactly the same size.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.len(), |storage| {
            storage.copy_from_slice(bytes);
            bytes.len()
        })
    }

    fn zeroed(capacity: usize) -> Self {
        SecureBuffer {
            storage: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Number of valid bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no byte is valid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the underlying allocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Gives `body` read access to the valid bytes.
    pub fn with_bytes<R, F>(&self, body: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        body(&self.storage[..self.len])
    }

    /// Gives `body` write access to the valid bytes.
    pub fn with_bytes_mut<R, F>(&mut self, body: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        body(&mut self.storage[..self.len])
    }

    // overwrites the full allocation, not only the valid prefix
    fn wipe(&mut self) {
        self.storage[..].zeroize();
        self.len = 0;
    }

    #[cfg(test)]
    fn raw_storage(&self) -> &[u8] {
        &self.storage
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl ZeroizeOnDrop for SecureBuffer {}

impl Clone for SecureBuffer {
    fn clone(&self) -> Self {
        self.with_bytes(SecureBuffer::from_slice)
    }
}

impl ConstantTimeEq for SecureBuffer {
    fn ct_eq(&self, other: &Self) -> Choice {
        // lengths are not secret
        if self.len != other.len {
            return Choice::from(0);
        }
        self.storage[..self.len].ct_eq(&other.storage[..other.len])
    }
}

impl PartialEq for SecureBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SecureBuffer {}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
