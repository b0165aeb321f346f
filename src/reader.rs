use std::io;
use std::result;

use debug_print::debug_eprintln;

use crate::endian::Endian;
use crate::source::ByteSource;

/// Result alias used for all reader operations.
pub type Result<T> = result::Result<T, ReadError>;

/// Decodes unsigned integers and byte arrays sequentially from an attached
/// [`ByteSource`], in a configurable byte order.
///
/// The reader owns its source exclusively while attached and counts every
/// byte successfully consumed since the last attach (the *position*). Each
/// read pulls straight from the source; nothing is buffered here, so a
/// source that is expensive to poke byte-by-byte should bring its own
/// buffering (for example a `BufReader` behind
/// [`ReadSource`](crate::ReadSource)).
///
/// Failures are not transactions. A multi-byte read that hits end of
/// stream keeps the bytes it already consumed counted in
/// [`position`](Self::position), and partially filled destinations keep
/// their partial contents. Callers that need to resume after a failure
/// must track the position themselves and re-attach a suitably positioned
/// source; the reader cannot seek.
pub struct SequentialReader<S> {
    source: Option<S>,
    endian: Endian,
    position: u64,
}

impl<S> SequentialReader<S> {
    /// Creates a reader attached to `source`, decoding in `endian` order.
    pub fn new(source: S, endian: Endian) -> Self {
        Self {
            source: Some(source),
            endian,
            position: 0,
        }
    }

    /// Creates a reader with no source attached.
    ///
    /// Every operation that needs a source fails with
    /// [`ReadError::Unattached`] until [`attach`](Self::attach) is called.
    pub fn unattached() -> Self {
        Self {
            source: None,
            endian: Endian::default(),
            position: 0,
        }
    }

    /// Attaches `source`, decoding in `endian` order from a fresh position 0.
    ///
    /// No I/O happens here. A source that was still attached is dropped;
    /// call [`release`](Self::release) first to close it explicitly.
    pub fn attach(&mut self, source: S, endian: Endian) {
        self.source = Some(source);
        self.endian = endian;
        self.position = 0;
    }

    /// The byte order applied to multi-byte reads.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Changes the byte order for subsequent reads.
    ///
    /// The position and the attached source are untouched.
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Count of bytes successfully consumed since the last attach.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Borrows the attached source, if any.
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Consumes the reader, handing back the attached source, if any.
    pub fn into_source(self) -> Option<S> {
        self.source
    }
}

impl<S: ByteSource> SequentialReader<S> {
    /// Detaches and closes the current source, if any.
    ///
    /// Never fails: a close error is logged in debug builds and otherwise
    /// discarded. Afterwards the reader is unattached, with the byte order
    /// and position reset to their defaults. Releasing an already
    /// unattached reader just re-applies the reset.
    pub fn release(&mut self) {
        if let Some(source) = self.source.take() {
            if let Err(err) = source.close() {
                debug_eprintln!("release: source close failed: {err}");
            }
        }
        self.endian = Endian::default();
        self.position = 0;
    }

    /// The source's best-effort estimate of bytes immediately readable
    /// without blocking.
    ///
    /// Pure passthrough to [`ByteSource::available`]; 0 can mean "unknown"
    /// as much as "none".
    pub fn available(&mut self) -> Result<u64> {
        Ok(self.source_mut()?.available()?)
    }

    /// Reads one unsigned byte. Equivalent to `read_uint(1)`.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_uint(1)? as u8)
    }

    /// Reads a 2-byte unsigned integer. Equivalent to `read_uint(2)`.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.read_uint(2)? as u16)
    }

    /// Reads a 4-byte unsigned integer. Equivalent to `read_uint(4)`.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_uint(4)
    }

    /// Reads an unsigned integer of `width` bytes, where `width <= 4`.
    ///
    /// Bytes are pulled from the source one at a time; under
    /// [`Endian::Big`] the first byte is the most significant, under
    /// [`Endian::Little`] the least significant. `width == 0` performs no
    /// I/O and returns 0, attached or not.
    ///
    /// Widths above 4 fail with [`ReadError::InvalidWidth`] before
    /// anything is consumed. On [`ReadError::UnexpectedEof`] the bytes
    /// consumed before the stream ended remain counted in
    /// [`position`](Self::position).
    pub fn read_uint(&mut self, width: usize) -> Result<u32> {
        if width > 4 {
            return Err(ReadError::InvalidWidth(width));
        }
        if width == 0 {
            return Ok(0);
        }
        let mut buf = [0u8; 4];
        for slot in &mut buf[..width] {
            *slot = self.fetch_byte()?;
        }
        Ok(self.endian.decode_uint(&buf[..width]) as u32)
    }

    /// Reads `count` consecutive 4-byte unsigned integers.
    ///
    /// Each element is read as by [`read_u32`](Self::read_u32); the first
    /// failing element aborts the read and its error is returned as-is.
    pub fn read_u32_array(&mut self, count: usize) -> Result<Vec<u32>> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_u32()?);
        }
        Ok(values)
    }

    /// Fills `dst` with consecutive 4-byte unsigned integers.
    ///
    /// Decodes element-wise like [`read_u32`](Self::read_u32). On failure
    /// the elements already decoded remain in `dst`. To fill only part of
    /// a buffer, pass a subslice.
    pub fn read_u32_into(&mut self, dst: &mut [u32]) -> Result<()> {
        for slot in dst.iter_mut() {
            *slot = self.read_u32()?;
        }
        Ok(())
    }

    /// Reads exactly `len` bytes into a new buffer.
    ///
    /// The source is asked once for the whole range. A short answer fails
    /// with [`ReadError::UnexpectedEof`] after the bytes that were
    /// obtained have been counted in [`position`](Self::position).
    /// `len == 0` succeeds with an empty buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let got = self.source_mut()?.read_into(&mut buf)?;
        self.position += got as u64;
        if got < len {
            return Err(ReadError::UnexpectedEof);
        }
        Ok(buf)
    }

    /// Skips `n` bytes of the source.
    ///
    /// Advances [`position`](Self::position) by the count actually
    /// skipped, so a short skip fails with [`ReadError::UnexpectedEof`]
    /// with the partial progress still counted. `skip(0)` is a no-op,
    /// attached or not.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        let skipped = self.source_mut()?.skip_bytes(n)?;
        self.position += skipped;
        if skipped < n {
            return Err(ReadError::UnexpectedEof);
        }
        Ok(())
    }

    /// Skips one 4-byte integer. Equivalent to `skip(4)`.
    #[inline(always)]
    pub fn skip_u32(&mut self) -> Result<()> {
        self.skip(4)
    }

    fn source_mut(&mut self) -> Result<&mut S> {
        self.source.as_mut().ok_or(ReadError::Unattached)
    }

    fn fetch_byte(&mut self) -> Result<u8> {
        match self.source_mut()?.read_byte()? {
            Some(byte) => {
                self.position += 1;
                Ok(byte)
            }
            None => Err(ReadError::UnexpectedEof),
        }
    }
}

impl<S> Default for SequentialReader<S> {
    fn default() -> Self {
        Self::unattached()
    }
}

/// Error type for [`SequentialReader`].
#[derive(Debug)]
pub enum ReadError {
    /// An integer width outside the supported `0..=4` range was requested.
    /// Nothing was consumed from the source.
    InvalidWidth(usize),
    /// The source ran out of bytes before the request was satisfied. Bytes
    /// consumed before the end still count toward the position.
    UnexpectedEof,
    /// An operation that needs a source was called on an unattached reader.
    Unattached,
    /// The source reported an error other than end of stream.
    Io(io::Error),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::InvalidWidth(width) => write!(f, "invalid integer width: {width}"),
            ReadError::UnexpectedEof => write!(f, "unexpected end of stream"),
            ReadError::Unattached => write!(f, "no source attached"),
            ReadError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let ReadError::Io(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        ReadError::Io(e)
    }
}
