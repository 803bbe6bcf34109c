use bytes::{Buf, BytesMut};
use chanreq_wire::{
    ensure_remaining, get_flag, get_string, string_len, DecodeError, DecodeResult, EncodeError,
    EncodeResult, SliceWriter, FLAG_LEN,
};

use crate::message_type::CHANNEL_REQUEST;
use crate::registry;
use crate::request::ChannelRequest;

/// Size of the leading message-type byte.
pub const MESSAGE_TYPE_LEN: usize = 1;

/// A channel request envelope: message type, tag, reply flag, payload.
///
/// The tag is never stored on its own; it is always taken from the payload,
/// so the tag written on the wire matches the payload that follows it.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────────────┬────────────┬────────────────────┐
/// │ Type (1) │ Tag (4B BE len   │ Want reply │ Payload            │
/// │ 98       │ + tag bytes)     │ (1B, 0/1)  │ (variant-specific) │
/// └──────────┴──────────────────┴────────────┴────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRequestMessage {
    want_reply: bool,
    request: ChannelRequest,
}

impl ChannelRequestMessage {
    /// Wrap a payload in an envelope.
    pub fn new(want_reply: bool, request: impl Into<ChannelRequest>) -> Self {
        Self {
            want_reply,
            request: request.into(),
        }
    }

    /// Request-type tag, read from the payload.
    pub fn tag(&self) -> &'static str {
        self.request.tag()
    }

    /// Whether the sender expects a success/failure reply.
    pub fn want_reply(&self) -> bool {
        self.want_reply
    }

    /// Borrow the payload.
    pub fn request(&self) -> &ChannelRequest {
        &self.request
    }

    /// Take the payload out of the envelope.
    pub fn into_request(self) -> ChannelRequest {
        self.request
    }

    /// Total encoded size: type byte + tag string + reply flag + payload.
    pub fn length(&self) -> usize {
        MESSAGE_TYPE_LEN + string_len(self.tag().as_bytes()) + FLAG_LEN + self.request.wire_length()
    }

    /// Encode the whole envelope into the start of `buf`.
    ///
    /// Fails with `BufferTooSmall` before writing anything if `buf` is
    /// shorter than [`length`](Self::length). On success returns exactly
    /// `length()`.
    pub fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        let length = self.length();
        chanreq_wire::ensure_capacity(buf, length)?;

        let mut w = SliceWriter::new(&mut buf[..length]);
        w.put_u8(CHANNEL_REQUEST)?;
        w.put_string(self.tag().as_bytes())?;
        w.put_flag(self.want_reply)?;
        let n = payload_written(self.tag(), self.request.write(w.remaining_mut()))?;
        w.advance(n);

        debug_assert_eq!(
            w.position(),
            length,
            "{} payload wrote a different size than it reported",
            self.tag()
        );
        Ok(w.position())
    }

    /// Append the encoded envelope to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) -> EncodeResult<()> {
        let start = dst.len();
        dst.resize(start + self.length(), 0);
        match self.write(&mut dst[start..]) {
            Ok(_) => Ok(()),
            Err(err) => {
                dst.truncate(start);
                Err(err)
            }
        }
    }

    /// Encode into a freshly allocated buffer of exactly `length()` bytes.
    pub fn to_bytes(&self) -> EncodeResult<BytesMut> {
        let mut buf = BytesMut::zeroed(self.length());
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Decode an envelope whose message-type byte has already been consumed.
    ///
    /// Reads the tag and reply flag, resolves the tag, and hands the rest of
    /// the input to the payload decoder. Payload errors pass through as-is.
    /// On error the position of `src` is unspecified.
    pub fn parse(src: &mut &[u8]) -> DecodeResult<Self> {
        let tag = get_string(src)?;
        let want_reply = get_flag(src, "want_reply")?;

        let decoder = std::str::from_utf8(&tag)
            .ok()
            .and_then(registry::resolve)
            .ok_or_else(|| {
                DecodeError::UnsupportedRequestType(String::from_utf8_lossy(&tag).into_owned())
            })?;

        let request = decoder(src)?;
        Ok(Self {
            want_reply,
            request,
        })
    }

    /// Decode a full envelope, starting at the message-type byte.
    pub fn decode(src: &mut &[u8]) -> DecodeResult<Self> {
        ensure_remaining(src.remaining(), MESSAGE_TYPE_LEN)?;
        let msg_type = src.get_u8();
        if msg_type != CHANNEL_REQUEST {
            return Err(DecodeError::UnexpectedMessageType(msg_type));
        }
        Self::parse(src)
    }
}

/// Check a payload write made after the envelope reserved `wire_length()`.
///
/// Running out of room at this point means the payload under-reported its
/// length, which is a bug in the payload rather than a caller error.
fn payload_written(tag: &str, result: EncodeResult<usize>) -> EncodeResult<usize> {
    debug_assert!(
        !matches!(result, Err(EncodeError::BufferTooSmall { .. })),
        "{tag} payload under-reported its wire length: {result:?}"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{
        ExecRequest, ExitSignalRequest, ExitStatusRequest, PtyRequest, ShellRequest,
        SignalRequest, SubsystemRequest, WindowChangeRequest, X11Request,
    };
    use chanreq_wire::EncodeError;

    #[test]
    fn exec_envelope_bytes() {
        let msg = ChannelRequestMessage::new(true, ExecRequest::new("ls -la"));
        let bytes = msg.to_bytes().unwrap();

        let mut expected = vec![CHANNEL_REQUEST, 0, 0, 0, 4];
        expected.extend_from_slice(b"exec");
        expected.push(0x01);
        expected.extend_from_slice(&[0, 0, 0, 6]);
        expected.extend_from_slice(b"ls -la");
        assert_eq!(bytes.as_ref(), expected.as_slice());
        assert_eq!(msg.length(), expected.len());

        let mut src = &bytes[..];
        let decoded = ChannelRequestMessage::decode(&mut src).unwrap();
        assert!(src.is_empty());
        assert!(decoded.want_reply());
        assert_eq!(decoded, msg);
    }

    #[test]
    fn parse_starts_at_tag() {
        let msg = ChannelRequestMessage::new(false, ShellRequest);
        let bytes = msg.to_bytes().unwrap();

        let mut src = &bytes[MESSAGE_TYPE_LEN..];
        let decoded = ChannelRequestMessage::parse(&mut src).unwrap();
        assert_eq!(decoded.tag(), "shell");
        assert!(!decoded.want_reply());
    }

    #[test]
    fn length_matches_written_for_every_variant() {
        let messages = vec![
            ChannelRequestMessage::new(true, PtyRequest::new("xterm", 200, 50, 1600, 900)),
            ChannelRequestMessage::new(false, X11Request::new(false, "MIT", "00ff", 1)),
            ChannelRequestMessage::new(true, ShellRequest),
            ChannelRequestMessage::new(true, ExecRequest::new("uname -a")),
            ChannelRequestMessage::new(true, SubsystemRequest::new("sftp")),
            ChannelRequestMessage::new(false, WindowChangeRequest::new(80, 24, 0, 0)),
            ChannelRequestMessage::new(false, SignalRequest::new("WINCH")),
            ChannelRequestMessage::new(false, ExitStatusRequest::new(1 << 31)),
            ChannelRequestMessage::new(false, ExitSignalRequest::new("TERM", false, "", "")),
        ];

        for msg in messages {
            let len = msg.length();
            let mut buf = vec![0x5A; len + 8];
            assert_eq!(msg.write(&mut buf).unwrap(), len, "{}", msg.tag());
            assert!(buf[len..].iter().all(|b| *b == 0x5A), "{}", msg.tag());

            let mut src = &buf[..len];
            assert_eq!(ChannelRequestMessage::decode(&mut src).unwrap(), msg);
        }
    }

    #[test]
    fn short_buffer_rejected_without_writing() {
        let msg = ChannelRequestMessage::new(true, ExecRequest::new("ls"));
        let mut buf = vec![0u8; msg.length() - 1];
        let err = msg.write(&mut buf).unwrap_err();
        assert_eq!(
            err,
            EncodeError::BufferTooSmall {
                needed: msg.length(),
                available: msg.length() - 1
            }
        );
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[test]
    fn encode_appends_and_rolls_back_on_error() {
        let mut dst = BytesMut::from(&b"head"[..]);
        let msg = ChannelRequestMessage::new(false, ShellRequest);
        msg.encode(&mut dst).unwrap();
        assert_eq!(&dst[..4], b"head");
        assert_eq!(dst.len(), 4 + msg.length());

        let bad = ChannelRequestMessage::new(false, ExitStatusRequest::new(u64::MAX));
        assert!(matches!(
            bad.encode(&mut dst),
            Err(EncodeError::Overflow { .. })
        ));
        assert_eq!(dst.len(), 4 + msg.length());
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let mut bytes = vec![0, 0, 0, 10];
        bytes.extend_from_slice(b"frobnicate");
        bytes.push(1);

        let mut src = bytes.as_slice();
        let err = ChannelRequestMessage::parse(&mut src).unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedRequestType("frobnicate".into()));
    }

    #[test]
    fn non_utf8_tag_is_unsupported() {
        let bytes = [0, 0, 0, 2, 0xFF, 0xFE, 0];
        let mut src = &bytes[..];
        assert!(matches!(
            ChannelRequestMessage::parse(&mut src),
            Err(DecodeError::UnsupportedRequestType(_))
        ));
    }

    #[test]
    fn bad_reply_flag_is_malformed() {
        let mut bytes = ChannelRequestMessage::new(true, ShellRequest)
            .to_bytes()
            .unwrap();
        let flag_at = MESSAGE_TYPE_LEN + string_len(b"shell");
        bytes[flag_at] = 7;

        let mut src = &bytes[..];
        assert!(matches!(
            ChannelRequestMessage::decode(&mut src),
            Err(DecodeError::MalformedField {
                field: "want_reply",
                ..
            })
        ));
    }

    #[test]
    fn wrong_message_type_rejected() {
        let mut src: &[u8] = &[94, 0, 0, 0, 0];
        assert_eq!(
            ChannelRequestMessage::decode(&mut src),
            Err(DecodeError::UnexpectedMessageType(94))
        );
    }

    #[test]
    fn payload_error_passes_through() {
        let mut bytes = ChannelRequestMessage::new(false, ExecRequest::new("ls -la"))
            .to_bytes()
            .unwrap();
        bytes.truncate(bytes.len() - 3);

        let mut src = &bytes[..];
        assert_eq!(
            ChannelRequestMessage::decode(&mut src),
            Err(DecodeError::Truncated {
                needed: 6,
                remaining: 3
            })
        );
    }

    #[test]
    fn trailing_bytes_are_left_unread() {
        let mut bytes = ChannelRequestMessage::new(true, SignalRequest::new("INT"))
            .to_bytes()
            .unwrap()
            .to_vec();
        bytes.extend_from_slice(&[0xAB, 0xCD]);

        let mut src = bytes.as_slice();
        ChannelRequestMessage::decode(&mut src).unwrap();
        assert_eq!(src, &[0xAB, 0xCD]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "under-reported its wire length")]
    fn short_payload_buffer_panics_in_debug() {
        let _ = payload_written(
            "exec",
            Err(EncodeError::BufferTooSmall {
                needed: 10,
                available: 4,
            }),
        );
    }

    #[test]
    fn payload_errors_other_than_short_buffer_pass_through() {
        let err = EncodeError::Overflow { value: u64::MAX };
        assert_eq!(payload_written("exit-status", Err(err.clone())), Err(err));
        assert_eq!(payload_written("shell", Ok(0)), Ok(0));
    }
}
