//! Byte sequences that may be split across several memory regions.
//!
//! Signing and verification take any [`ByteSequence`]. A sequence backed by
//! a single region is handed to the provider as is; only sequences made of
//! several non-empty regions are copied into one contiguous buffer first.

use std::borrow::Cow;
use std::collections::VecDeque;

/// Bytes that may live in one or more separate regions.
pub trait ByteSequence {
    /// Total number of bytes across all regions.
    fn byte_len(&self) -> usize;

    /// Returns the bytes as one slice if they already occupy a single region.
    fn as_contiguous(&self) -> Option<&[u8]>;

    /// Appends all regions, in order, to `out`.
    fn copy_into(&self, out: &mut Vec<u8>);
}

/// Returns `bytes` as a single slice, copying only if it is split.
pub fn flatten<B>(bytes: &B) -> Cow<'_, [u8]>
where
    B: ByteSequence + ?Sized,
{
    match bytes.as_contiguous() {
        Some(contiguous) => Cow::Borrowed(contiguous),
        None => {
            let mut out = Vec::with_capacity(bytes.byte_len());
            bytes.copy_into(&mut out);
            Cow::Owned(out)
        }
    }
}

// empty regions do not count as separate regions
fn single_region<'a, I>(regions: I) -> Option<&'a [u8]>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut regions = regions.into_iter().filter(|region| !region.is_empty());
    match (regions.next(), regions.next()) {
        (None, _) => Some(&[]),
        (Some(only), None) => Some(only),
        _ => None,
    }
}

impl ByteSequence for [u8] {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl<const N: usize> ByteSequence for [u8; N] {
    #[inline]
    fn byte_len(&self) -> usize {
        N
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl ByteSequence for Vec<u8> {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl ByteSequence for str {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl ByteSequence for String {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

/// A ring buffer is contiguous unless it wraps around.
impl ByteSequence for VecDeque<u8> {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        let (front, back) = self.as_slices();
        single_region([front, back])
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        let (front, back) = self.as_slices();
        out.extend_from_slice(front);
        out.extend_from_slice(back);
    }
}

/// Scatter list of regions.
impl<'a> ByteSequence for [&'a [u8]] {
    fn byte_len(&self) -> usize {
        self.iter().map(|region| region.len()).sum()
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        single_region(self.iter().copied())
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        for region in self {
            out.extend_from_slice(region);
        }
    }
}

impl<'a, const N: usize> ByteSequence for [&'a [u8]; N] {
    fn byte_len(&self) -> usize {
        self.as_slice().byte_len()
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        self.as_slice().as_contiguous()
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        self.as_slice().copy_into(out)
    }
}

impl<'a> ByteSequence for Vec<&'a [u8]> {
    fn byte_len(&self) -> usize {
        self.as_slice().byte_len()
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        self.as_slice().as_contiguous()
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        self.as_slice().copy_into(out)
    }
}

impl<T> ByteSequence for &T
where
    T: ByteSequence + ?Sized,
{
    #[inline]
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[u8]> {
        (**self).as_contiguous()
    }

    fn copy_into(&self, out: &mut Vec<u8>) {
        (**self).copy_into(out)
    }
}
