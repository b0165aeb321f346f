//! Ordered byte sources a [`SequentialReader`](crate::SequentialReader) can
//! attach to.
//!
//! [`ByteSource`] is the full capability set the reader depends on: pull one
//! byte, bulk-fill a buffer, skip forward, estimate availability, close.
//! Implementations are provided for byte slices, [`Cursor`], [`File`], and,
//! through the [`ReadSource`] adapter, anything that implements [`Read`].

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::slice;

/// An ordered byte-producing resource.
///
/// A source yields its bytes in a fixed sequence and is consumed exclusively
/// by whoever owns it; there is no rewinding. End of stream is a normal
/// condition, signalled in-band (`None` from [`read_byte`], a short count
/// from [`read_into`] or [`skip_bytes`]) rather than as an error. An
/// `Err(_)` from any method means the resource itself failed.
///
/// Only [`read_into`] is required. The provided methods are correct for any
/// conforming source, but exact implementations (in-memory buffers, files)
/// should override them: the defaults skip by reading into a scratch buffer
/// and report availability as 0, meaning "unknown".
///
/// [`read_byte`]: ByteSource::read_byte
/// [`read_into`]: ByteSource::read_into
/// [`skip_bytes`]: ByteSource::skip_bytes
pub trait ByteSource {
    /// Reads the next byte, or `None` at end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0;
        Ok(match self.read_into(slice::from_mut(&mut byte))? {
            0 => None,
            _ => Some(byte),
        })
    }

    /// Reads bytes into `buf`, returning the count obtained.
    ///
    /// Implementations make a best effort to fill `buf`: a count short of
    /// `buf.len()` means the source is exhausted, not merely that fewer
    /// bytes happened to be ready.
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Skips forward up to `n` bytes, returning the count actually skipped.
    ///
    /// The count is short of `n` only at end of stream.
    fn skip_bytes(&mut self, n: u64) -> io::Result<u64> {
        let mut scratch = [0u8; 512];
        let mut skipped = 0u64;
        while skipped < n {
            let want = (n - skipped).min(scratch.len() as u64) as usize;
            let got = self.read_into(&mut scratch[..want])?;
            if got == 0 {
                break;
            }
            skipped += got as u64;
        }
        Ok(skipped)
    }

    /// Best-effort estimate of bytes immediately readable without blocking.
    ///
    /// 0 means "unknown" as much as "none"; callers must not treat it as
    /// end of stream.
    fn available(&mut self) -> io::Result<u64> {
        Ok(0)
    }

    /// Closes the underlying resource.
    ///
    /// The standard implementations have nothing to report and simply drop
    /// the value. Sources wrapping resources whose teardown can fail
    /// (sockets, custom transports) should override this and surface the
    /// error.
    fn close(self) -> io::Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Fills `buf` from `reader` as far as the stream allows, returning the
/// count obtained. Stops early only at end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Borrowed in-memory source. The slice is consumed front to back by
/// reassigning it, so the unread remainder is always the slice itself.
impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(match self.split_first() {
            Some((&byte, rest)) => {
                *self = rest;
                Some(byte)
            }
            None => None,
        })
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.len().min(buf.len());
        let (lo, hi) = self.split_at(n);
        buf[..n].copy_from_slice(lo);
        *self = hi;
        Ok(n)
    }

    fn skip_bytes(&mut self, n: u64) -> io::Result<u64> {
        let step = n.min(self.len() as u64);
        *self = &self[step as usize..];
        Ok(step)
    }

    fn available(&mut self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }
}

/// Owned in-memory source. Availability and skips are exact.
impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let pos = self.position();
        let data = self.get_ref().as_ref();
        if pos < data.len() as u64 {
            let byte = data[pos as usize];
            self.set_position(pos + 1);
            Ok(Some(byte))
        } else {
            Ok(None)
        }
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // A cursor read copies everything still available in one call.
        Read::read(self, buf)
    }

    fn skip_bytes(&mut self, n: u64) -> io::Result<u64> {
        let len = self.get_ref().as_ref().len() as u64;
        let pos = self.position();
        let step = n.min(len.saturating_sub(pos));
        self.set_position(pos + step);
        Ok(step)
    }

    fn available(&mut self) -> io::Result<u64> {
        let len = self.get_ref().as_ref().len() as u64;
        Ok(len.saturating_sub(self.position()))
    }
}

/// File source. Availability is the remaining file length.
impl ByteSource for File {
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_full(self, buf)
    }

    fn skip_bytes(&mut self, n: u64) -> io::Result<u64> {
        // A plain seek can move past end-of-file; clamp so short skips
        // stay reportable.
        let len = self.metadata()?.len();
        let pos = self.stream_position()?;
        let step = n.min(len.saturating_sub(pos));
        self.seek(SeekFrom::Start(pos + step))?;
        Ok(step)
    }

    fn available(&mut self) -> io::Result<u64> {
        let len = self.metadata()?.len();
        let pos = self.stream_position()?;
        Ok(len.saturating_sub(pos))
    }
}

/// Adapter that gives any [`Read`] implementation the [`ByteSource`]
/// capability set.
///
/// Availability stays at 0 ("unknown") and skipping reads into a scratch
/// buffer and discards, which suits pipes, sockets and decompressors.
/// Resources with a cheaper skip or a real availability estimate deserve a
/// dedicated [`ByteSource`] implementation instead.
pub struct ReadSource<R> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    /// Wraps a [`Read`] implementation.
    pub fn wrap(inner: R) -> Self {
        Self { inner }
    }

    /// Extracts the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Accesses the wrapped reader.
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_full(&mut self.inner, buf)
    }
}
