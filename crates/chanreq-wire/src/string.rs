//! Length-prefixed byte strings.
//!
//! Wire format: a 4-byte big-endian length followed by that many raw bytes.
//! No character encoding is applied; text fields are carried as their UTF-8
//! bytes.

use bytes::{Buf, Bytes};

use crate::error::{
    ensure_capacity, ensure_remaining, DecodeError, DecodeResult, EncodeError, EncodeResult,
};

/// Size of the length prefix.
pub const STRING_PREFIX_LEN: usize = 4;

/// Encoded size of a string holding `data`.
pub fn string_len(data: &[u8]) -> usize {
    STRING_PREFIX_LEN + data.len()
}

/// Write `data` as a length-prefixed string at the start of `buf`.
pub fn write_string(buf: &mut [u8], data: &[u8]) -> EncodeResult<usize> {
    let len = u32::try_from(data.len()).map_err(|_| EncodeError::Overflow {
        value: data.len() as u64,
    })?;
    let total = string_len(data);
    ensure_capacity(buf, total)?;

    buf[..STRING_PREFIX_LEN].copy_from_slice(&len.to_be_bytes());
    buf[STRING_PREFIX_LEN..total].copy_from_slice(data);
    Ok(total)
}

/// Read a length-prefixed string as raw bytes.
pub fn get_string<B: Buf>(src: &mut B) -> DecodeResult<Bytes> {
    ensure_remaining(src.remaining(), STRING_PREFIX_LEN)?;
    let len = src.get_u32() as usize;
    ensure_remaining(src.remaining(), len)?;
    Ok(src.copy_to_bytes(len))
}

/// Read a length-prefixed string that must hold valid UTF-8.
///
/// `field` names the value in the `MalformedField` error.
pub fn get_utf8<B: Buf>(src: &mut B, field: &'static str) -> DecodeResult<String> {
    let raw = get_string(src)?;
    String::from_utf8(raw.to_vec()).map_err(|err| DecodeError::MalformedField {
        field,
        reason: format!("invalid UTF-8: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prefix_and_bytes() {
        let mut buf = [0u8; 10];
        let n = write_string(&mut buf, b"exec").unwrap();
        assert_eq!(n, 8);
        assert_eq!(&buf[..n], &[0, 0, 0, 4, b'e', b'x', b'e', b'c']);
        assert_eq!(&buf[n..], &[0, 0]);
    }

    #[test]
    fn empty_string_is_prefix_only() {
        let mut buf = [0xFFu8; 4];
        assert_eq!(write_string(&mut buf, b"").unwrap(), 4);
        assert_eq!(buf, [0, 0, 0, 0]);

        let mut src: &[u8] = &buf;
        assert!(get_string(&mut src).unwrap().is_empty());
    }

    #[test]
    fn multibyte_utf8_roundtrip() {
        let text = "héllo ✓ 日本";
        let mut buf = vec![0u8; string_len(text.as_bytes())];
        write_string(&mut buf, text.as_bytes()).unwrap();

        let mut src = buf.as_slice();
        assert_eq!(get_utf8(&mut src, "text").unwrap(), text);
        assert!(src.is_empty());
    }

    #[test]
    fn short_buffer_rejected() {
        let mut buf = [0u8; 6];
        let err = write_string(&mut buf, b"abc").unwrap_err();
        assert_eq!(
            err,
            EncodeError::BufferTooSmall {
                needed: 7,
                available: 6
            }
        );
    }

    #[test]
    fn missing_length_is_truncated() {
        let mut src: &[u8] = &[0, 0];
        let err = get_string(&mut src).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                needed: 4,
                remaining: 2
            }
        );
    }

    #[test]
    fn declared_length_past_end_is_truncated() {
        let mut src: &[u8] = &[0, 0, 0, 10, b'x', b't', b'e'];
        let err = get_string(&mut src).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                needed: 10,
                remaining: 3
            }
        );
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut src: &[u8] = &[0, 0, 0, 2, 0xC3, 0x28];
        let err = get_utf8(&mut src, "command").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField {
                field: "command",
                ..
            }
        ));
    }
}
