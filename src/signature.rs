//! Ed448 signature.
//!
//! A signature is the 57-byte encoding of the point `R` followed by the
//! 57-byte little-endian encoding of the scalar `S`
//! ([RFC 8032 §5.2.6](https://datatracker.ietf.org/doc/html/rfc8032#section-5.2.6)).
//! This type only fixes the length; whether the halves decode is decided at
//! verification time.

use std::fmt;

use crate::bytes::ByteSequence;
use crate::constants::SIGNATURE_LENGTH;
use crate::error::{Curve448Error, Result};

const HALF_LENGTH: usize = SIGNATURE_LENGTH / 2;

/// Ed448 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Creates a signature from a byte array.
    #[inline]
    pub const fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        Signature(*bytes)
    }

    /// Creates a signature from a byte slice.
    ///
    /// Fails with [`Curve448Error::Value`] unless `bytes` is 114 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| {
            Curve448Error::Value(format!(
                "Ed448 signatures must be {SIGNATURE_LENGTH} bytes, found {}",
                bytes.len()
            ))
        })?;
        Ok(Signature(bytes))
    }

    /// Returns the raw representation.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }

    /// Borrows the raw representation.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// Encoded `R` half.
    #[allow(non_snake_case)]
    pub fn R_bytes(&self) -> [u8; HALF_LENGTH] {
        let mut R = [0u8; HALF_LENGTH];
        R.copy_from_slice(&self.0[..HALF_LENGTH]);
        R
    }

    /// Encoded `S` half.
    pub fn s_bytes(&self) -> [u8; HALF_LENGTH] {
        let mut s = [0u8; HALF_LENGTH];
        s.copy_from_slice(&self.0[HALF_LENGTH..]);
        s
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature(bytes)
    }
}

impl From<Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Curve448Error;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ByteSequence for Signature {
    #[inline]
    fn byte_len(&self) -> usize {
        SIGNATURE_LENGTH
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(&self.0)
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
