//! Sequential decoding of fixed-width unsigned integers, integer arrays and
//! raw bytes from ordered byte sources, in either byte order.
//!
//! [`SequentialReader`] wraps any [`ByteSource`]: a byte slice, a
//! [`Cursor`](std::io::Cursor), a [`File`](std::fs::File), or any
//! [`Read`](std::io::Read) behind the [`ReadSource`] adapter. It decodes
//! values in the byte order it is configured with, counting every byte
//! successfully consumed. It is the primitive that format-specific parsers
//! (resource tables, container headers) are built on; no format lives here.
//!
//! # Example
//! ```
//! use sequential_reader::{Endian, SequentialReader};
//!
//! let data = [0x01u8, 0x02, 0x03, 0x04, 0xff];
//! let mut reader = SequentialReader::new(&data[..], Endian::Big);
//! assert_eq!(reader.read_uint(4).unwrap(), 0x0102_0304);
//! assert_eq!(reader.read_u8().unwrap(), 0xff);
//! assert_eq!(reader.position(), 5);
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod endian;
mod reader;
mod source;


pub use endian::Endian;
pub use reader::{ReadError, Result, SequentialReader};
pub use source::{ByteSource, ReadSource};
