//! Read-only byte access for the decoder

/// A length-bounded, randomly addressable sequence of bytes.
///
/// The decoder checks every position against [`ByteSource::len`] before
/// calling [`ByteSource::byte_at`], so implementations may index directly.
pub trait ByteSource {
    /// Total number of addressable bytes
    fn len(&self) -> usize;

    /// Byte at `offset`. Callers guarantee `offset < self.len()`.
    fn byte_at(&self, offset: usize) -> u8;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for [u8] {
    #[inline]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl<const N: usize> ByteSource for [u8; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl ByteSource for Vec<u8> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> u8 {
        (**self).byte_at(offset)
    }
}
