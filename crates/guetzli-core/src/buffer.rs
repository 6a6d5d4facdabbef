//! Owned output buffer handed across the library boundary.
//!
//! [`EncodedBuffer`] is the unit of data the encode bridge returns. Binding
//! crates box it and hand out an opaque pointer (C) or a class instance (JS);
//! the caller queries, resizes and eventually frees it without knowing how the
//! storage grows.

/// A resizable, contiguous byte buffer holding an encoded stream.
///
/// Resizing follows `Vec::resize` semantics: growing zero-fills the new tail,
/// shrinking truncates, and the first `min(old, new)` bytes are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedBuffer {
    bytes: Vec<u8>,
}

impl EncodedBuffer {
    /// Create a buffer holding `size` zeroed bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0u8; size],
        }
    }

    /// Grow or shrink the buffer to exactly `size` bytes.
    pub fn resize(&mut self, size: usize) {
        self.bytes.resize(size, 0);
    }

    /// Current length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read-only view of the stored bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable view of the stored bytes, valid until the next resize.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Backing vector, for producers that write a stream of unknown length.
    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    /// Consume the buffer and return its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for EncodedBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for EncodedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: resize reports the new size and keeps the common prefix.
        #[test]
        fn prop_resize_preserves_common_prefix(
            initial in prop::collection::vec(any::<u8>(), 0..64),
            new_size in 0usize..128,
        ) {
            let mut buf = EncodedBuffer::from(initial.clone());
            buf.resize(new_size);

            prop_assert_eq!(buf.len(), new_size);
            let keep = initial.len().min(new_size);
            prop_assert_eq!(&buf.as_slice()[..keep], &initial[..keep]);
        }
    }
}
