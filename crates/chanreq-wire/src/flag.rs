//! Single-byte booleans.
//!
//! `1` is true and `0` is false. Any other byte is rejected rather than
//! coerced.

use bytes::Buf;

use crate::error::{ensure_capacity, ensure_remaining, DecodeError, DecodeResult, EncodeResult};

/// Encoded size of a boolean.
pub const FLAG_LEN: usize = 1;

/// Write `value` as a single byte at the start of `buf`.
pub fn write_flag(buf: &mut [u8], value: bool) -> EncodeResult<usize> {
    ensure_capacity(buf, FLAG_LEN)?;
    buf[0] = u8::from(value);
    Ok(FLAG_LEN)
}

/// Read a strict 0/1 boolean. `field` names the value in errors.
pub fn get_flag<B: Buf>(src: &mut B, field: &'static str) -> DecodeResult<bool> {
    ensure_remaining(src.remaining(), FLAG_LEN)?;
    match src.get_u8() {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DecodeError::MalformedField {
            field,
            reason: format!("boolean byte must be 0 or 1, got {other:#04x}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_zero_and_one() {
        let mut buf = [0xFFu8; 2];
        assert_eq!(write_flag(&mut buf, true).unwrap(), 1);
        assert_eq!(buf, [1, 0xFF]);
        write_flag(&mut buf, false).unwrap();
        assert_eq!(buf, [0, 0xFF]);
    }

    #[test]
    fn reads_strict_values() {
        let mut src: &[u8] = &[0, 1];
        assert!(!get_flag(&mut src, "flag").unwrap());
        assert!(get_flag(&mut src, "flag").unwrap());
    }

    #[test]
    fn rejects_other_bytes() {
        let mut src: &[u8] = &[2];
        let err = get_flag(&mut src, "want_reply").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField {
                field: "want_reply",
                ..
            }
        ));
    }

    #[test]
    fn empty_input_is_truncated() {
        let mut src: &[u8] = &[];
        assert!(get_flag(&mut src, "flag").unwrap_err().is_truncated());
    }

    #[test]
    fn empty_buffer_rejected() {
        let mut buf = [0u8; 0];
        assert!(write_flag(&mut buf, true).is_err());
    }
}
