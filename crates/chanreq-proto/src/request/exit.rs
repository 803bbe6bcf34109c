//! Signal delivery and process exit reporting.

use bytes::{Buf, Bytes};
use chanreq_wire::{
    ensure_capacity, get_flag, get_string, get_utf8, get_varint, string_len, varint_len,
    write_string, write_varint, DecodeResult, EncodeResult, SliceWriter, FLAG_LEN,
};

use super::RequestPayload;

/// `signal`: deliver a signal to the remote process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRequest {
    /// Signal name without the `SIG` prefix, e.g. `TERM`.
    pub signal_name: Bytes,
}

impl SignalRequest {
    pub fn new(signal_name: impl Into<Bytes>) -> Self {
        Self {
            signal_name: signal_name.into(),
        }
    }
}

impl RequestPayload for SignalRequest {
    const TAG: &'static str = "signal";

    fn wire_length(&self) -> usize {
        string_len(&self.signal_name)
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;
        write_string(buf, &self.signal_name)
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        Ok(Self {
            signal_name: get_string(src)?,
        })
    }
}

/// `exit-status`: the remote process exited with a status code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitStatusRequest {
    pub exit_status: u64,
}

impl ExitStatusRequest {
    pub fn new(exit_status: u64) -> Self {
        Self { exit_status }
    }
}

impl RequestPayload for ExitStatusRequest {
    const TAG: &'static str = "exit-status";

    fn wire_length(&self) -> usize {
        varint_len(self.exit_status)
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;
        write_varint(buf, self.exit_status)
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        Ok(Self {
            exit_status: get_varint(src)?,
        })
    }
}

/// `exit-signal`: the remote process was terminated by a signal.
///
/// Wire layout: signal name (string), core dumped (byte), error message
/// (string), language tag (string). Only the error message is text and must
/// be UTF-8; the other strings are carried as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitSignalRequest {
    /// Signal name without the `SIG` prefix.
    pub signal_name: Bytes,
    pub core_dumped: bool,
    pub error_message: String,
    /// RFC 3066 language tag, usually empty.
    pub language_tag: Bytes,
}

impl ExitSignalRequest {
    pub fn new(
        signal_name: impl Into<Bytes>,
        core_dumped: bool,
        error_message: impl Into<String>,
        language_tag: impl Into<Bytes>,
    ) -> Self {
        Self {
            signal_name: signal_name.into(),
            core_dumped,
            error_message: error_message.into(),
            language_tag: language_tag.into(),
        }
    }
}

impl RequestPayload for ExitSignalRequest {
    const TAG: &'static str = "exit-signal";

    fn wire_length(&self) -> usize {
        string_len(&self.signal_name)
            + FLAG_LEN
            + string_len(self.error_message.as_bytes())
            + string_len(&self.language_tag)
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;

        let mut w = SliceWriter::new(buf);
        w.put_string(&self.signal_name)?;
        w.put_flag(self.core_dumped)?;
        w.put_string(self.error_message.as_bytes())?;
        w.put_string(&self.language_tag)?;

        debug_assert_eq!(w.position(), self.wire_length());
        Ok(w.position())
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        Ok(Self {
            signal_name: get_string(src)?,
            core_dumped: get_flag(src, "core_dumped")?,
            error_message: get_utf8(src, "error_message")?,
            language_tag: get_string(src)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chanreq_wire::DecodeError;

    use super::*;
    use crate::request::test_support::{decode_all, encode_exact};

    #[test]
    fn signal_roundtrip() {
        let req = SignalRequest::new("HUP");
        let bytes = encode_exact(&req);
        assert_eq!(bytes, b"\x00\x00\x00\x03HUP");
        assert_eq!(decode_all::<SignalRequest>(&bytes), req);
    }

    #[test]
    fn exit_status_is_a_varint() {
        assert_eq!(encode_exact(&ExitStatusRequest::new(0)), vec![0]);
        assert_eq!(encode_exact(&ExitStatusRequest::new(127)), vec![0x40, 0x7F]);
        assert_eq!(
            decode_all::<ExitStatusRequest>(&[0x40, 0x7F]),
            ExitStatusRequest::new(127)
        );
    }

    #[test]
    fn exit_status_empty_input_is_truncated() {
        let mut src: &[u8] = &[];
        assert!(ExitStatusRequest::decode(&mut src)
            .unwrap_err()
            .is_truncated());
    }

    #[test]
    fn exit_signal_fields_are_sequential() {
        let req = ExitSignalRequest::new("SEGV", true, "boom", "en");
        let bytes = encode_exact(&req);

        let mut expected = b"\x00\x00\x00\x04SEGV".to_vec();
        expected.push(1);
        expected.extend_from_slice(b"\x00\x00\x00\x04boom");
        expected.extend_from_slice(b"\x00\x00\x00\x02en");
        assert_eq!(bytes, expected);

        assert_eq!(decode_all::<ExitSignalRequest>(&bytes), req);
    }

    #[test]
    fn exit_signal_utf8_message() {
        let req = ExitSignalRequest::new("ABRT", false, "échec: ошибка ✗", "");
        assert_eq!(decode_all::<ExitSignalRequest>(&encode_exact(&req)), req);
    }

    #[test]
    fn exit_signal_rejects_bad_core_flag() {
        let mut bytes = encode_exact(&ExitSignalRequest::new("KILL", false, "", ""));
        bytes[8] = 0xFF;
        let mut src = bytes.as_slice();
        assert!(matches!(
            ExitSignalRequest::decode(&mut src),
            Err(DecodeError::MalformedField {
                field: "core_dumped",
                ..
            })
        ));
    }

    #[test]
    fn signal_name_is_not_validated() {
        let mut src: &[u8] = &[0, 0, 0, 2, 0xC0, 0x80];
        let req = SignalRequest::decode(&mut src).unwrap();
        assert_eq!(req.signal_name, &[0xC0u8, 0x80][..]);
    }

    #[test]
    fn exit_signal_rejects_non_utf8_message() {
        let mut bytes = b"\x00\x00\x00\x04KILL\x00".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 1, 0xFF]);
        bytes.extend_from_slice(&[0, 0, 0, 1, 0xFE]);
        let mut src = bytes.as_slice();
        assert!(matches!(
            ExitSignalRequest::decode(&mut src),
            Err(DecodeError::MalformedField {
                field: "error_message",
                ..
            })
        ));
    }

    #[test]
    fn exit_signal_language_tag_is_opaque() {
        let mut bytes = b"\x00\x00\x00\x04KILL\x00\x00\x00\x00\x00".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 1, 0xFE]);
        let req = decode_all::<ExitSignalRequest>(&bytes);
        assert_eq!(req.language_tag, &[0xFEu8][..]);
    }
}
