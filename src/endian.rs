use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order used to assemble multi-byte integers from a byte sequence.
///
/// Defaults to [`Endian::Little`], the order a released reader resets to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endian {
    /// The first byte of a value is its most significant byte.
    Big,
    /// The first byte of a value is its least significant byte.
    #[default]
    Little,
}

impl Endian {
    /// Returns `true` for [`Endian::Big`].
    #[inline]
    pub fn is_big(self) -> bool {
        matches!(self, Endian::Big)
    }

    /// Returns `true` for [`Endian::Little`].
    #[inline]
    pub fn is_little(self) -> bool {
        matches!(self, Endian::Little)
    }

    /// Decodes all of `buf` as an unsigned integer in this byte order.
    ///
    /// An empty buffer decodes to 0.
    ///
    /// # Panics
    /// Panics if `buf` is longer than 8 bytes.
    pub fn decode_uint(self, buf: &[u8]) -> u64 {
        if buf.is_empty() {
            return 0;
        }
        match self {
            Endian::Big => BigEndian::read_uint(buf, buf.len()),
            Endian::Little => LittleEndian::read_uint(buf, buf.len()),
        }
    }
}
