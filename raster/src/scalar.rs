//! Typed reads over a [`ByteSource`]
//!
//! Used by `binview inspect` to show what the bytes under the cursor mean as
//! integers, floats or text. Every read is bounds-checked and returns `None`
//! instead of reading past the end.

use crate::ByteSource;

/// Byte order for multi-byte reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    pub const fn name(self) -> &'static str {
        match self {
            Endian::Little => "le",
            Endian::Big => "be",
        }
    }
}

/// Scalar reads available on every [`ByteSource`]
pub trait ScalarReader: ByteSource {
    /// Copy `N` bytes starting at `offset`, or `None` if they run past the end
    fn read_array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        if offset.checked_add(N)? > self.len() {
            return None;
        }
        let mut bytes = [0u8; N];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.byte_at(offset + i);
        }
        Some(bytes)
    }

    fn read_u8(&self, offset: usize) -> Option<u8> {
        (offset < self.len()).then(|| self.byte_at(offset))
    }

    fn read_u16(&self, offset: usize, endian: Endian) -> Option<u16> {
        self.read_array(offset).map(|b| match endian {
            Endian::Little => u16::from_le_bytes(b),
            Endian::Big => u16::from_be_bytes(b),
        })
    }

    fn read_i16(&self, offset: usize, endian: Endian) -> Option<i16> {
        self.read_u16(offset, endian).map(|v| v as i16)
    }

    fn read_u32(&self, offset: usize, endian: Endian) -> Option<u32> {
        self.read_array(offset).map(|b| match endian {
            Endian::Little => u32::from_le_bytes(b),
            Endian::Big => u32::from_be_bytes(b),
        })
    }

    fn read_i32(&self, offset: usize, endian: Endian) -> Option<i32> {
        self.read_u32(offset, endian).map(|v| v as i32)
    }

    fn read_f32(&self, offset: usize, endian: Endian) -> Option<f32> {
        self.read_u32(offset, endian).map(f32::from_bits)
    }

    fn read_f64(&self, offset: usize, endian: Endian) -> Option<f64> {
        self.read_array(offset).map(|b| match endian {
            Endian::Little => f64::from_le_bytes(b),
            Endian::Big => f64::from_be_bytes(b),
        })
    }

    /// Read `length` bytes as text, one char per byte (Latin-1)
    fn read_ascii(&self, offset: usize, length: usize) -> Option<String> {
        if offset.checked_add(length)? > self.len() {
            return None;
        }
        Some(
            (offset..offset + length)
                .map(|i| char::from(self.byte_at(i)))
                .collect(),
        )
    }
}

impl<T: ByteSource + ?Sized> ScalarReader for T {}
