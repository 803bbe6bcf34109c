//! Wire primitives for channel request encoding.
//!
//! Two encodings share every channel request message:
//! - Length-prefixed byte strings (4-byte big-endian length + raw bytes)
//! - Variable-length integers whose width is chosen by magnitude
//!
//! plus strict single-byte booleans. Encoders write into caller-supplied
//! slices and return the number of bytes written; decoders read from any
//! [`bytes::Buf`] and advance it past what they consumed.

pub mod cursor;
pub mod error;
pub mod flag;
pub mod string;
pub mod varint;

pub use cursor::SliceWriter;
pub use error::{
    ensure_capacity, ensure_remaining, DecodeError, DecodeResult, EncodeError, EncodeResult,
};
pub use flag::{get_flag, write_flag, FLAG_LEN};
pub use string::{get_string, get_utf8, string_len, write_string, STRING_PREFIX_LEN};
pub use varint::{get_varint, varint_len, write_varint, MAX_VARINT_LEN, VARINT_MAX};
