//! Variable-length integers in the transport's native scheme.
//!
//! The two high bits of the first byte select the width:
//!
//! ```text
//! ┌──────┬────────┬─────────────────────┐
//! │ Bits │ Length │ Range               │
//! ├──────┼────────┼─────────────────────┤
//! │ 00   │ 1      │ 0 ..= 2^6 - 1       │
//! │ 01   │ 2      │ 0 ..= 2^14 - 1      │
//! │ 10   │ 4      │ 0 ..= 2^30 - 1      │
//! │ 11   │ 8      │ 0 ..= 2^62 - 1      │
//! └──────┴────────┴─────────────────────┘
//! ```
//!
//! The remaining bits hold the value in network byte order. Encoding always
//! picks the smallest width; decoding accepts any width.

use bytes::Buf;

use crate::error::{ensure_capacity, ensure_remaining, DecodeResult, EncodeError, EncodeResult};

/// Largest value a varint can carry.
pub const VARINT_MAX: u64 = (1 << 62) - 1;

/// Widest encoding in bytes.
pub const MAX_VARINT_LEN: usize = 8;

const ONE_BYTE_MAX: u64 = (1 << 6) - 1;
const TWO_BYTE_MAX: u64 = (1 << 14) - 1;
const FOUR_BYTE_MAX: u64 = (1 << 30) - 1;

/// Number of bytes `value` occupies when encoded.
///
/// Values above [`VARINT_MAX`] report the 8-byte width; [`write_varint`]
/// rejects them.
pub fn varint_len(value: u64) -> usize {
    if value <= ONE_BYTE_MAX {
        1
    } else if value <= TWO_BYTE_MAX {
        2
    } else if value <= FOUR_BYTE_MAX {
        4
    } else {
        8
    }
}

/// Width of a varint as announced by its first byte.
pub fn varint_len_from_prefix(first: u8) -> usize {
    1 << (first >> 6)
}

/// Write `value` at the start of `buf`, returning the bytes written.
pub fn write_varint(buf: &mut [u8], value: u64) -> EncodeResult<usize> {
    if value > VARINT_MAX {
        return Err(EncodeError::Overflow { value });
    }
    let len = varint_len(value);
    ensure_capacity(buf, len)?;

    match len {
        1 => buf[0] = value as u8,
        2 => buf[..2].copy_from_slice(&(value as u16 | 0x4000).to_be_bytes()),
        4 => buf[..4].copy_from_slice(&(value as u32 | 0x8000_0000).to_be_bytes()),
        _ => buf[..8].copy_from_slice(&(value | 0xC000_0000_0000_0000).to_be_bytes()),
    }
    Ok(len)
}

/// Read one varint from `src`, advancing past it.
pub fn get_varint<B: Buf>(src: &mut B) -> DecodeResult<u64> {
    ensure_remaining(src.remaining(), 1)?;
    let first = src.chunk()[0];
    let len = varint_len_from_prefix(first);
    ensure_remaining(src.remaining(), len)?;

    let value = match len {
        1 => u64::from(src.get_u8()),
        2 => u64::from(src.get_u16() & 0x3FFF),
        4 => u64::from(src.get_u32() & 0x3FFF_FFFF),
        _ => src.get_u64() & VARINT_MAX,
    };
    Ok(value)
}
