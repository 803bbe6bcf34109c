use bytes::{Buf, Bytes};
use chanreq_wire::{
    ensure_capacity, get_flag, get_string, get_varint, string_len, varint_len, DecodeResult,
    EncodeResult, SliceWriter, FLAG_LEN,
};

use super::RequestPayload;

/// `x11-req`: forward X11 connections over the session.
///
/// Wire layout: single-connection flag (byte), auth protocol (string),
/// auth cookie (string), screen number (varint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X11Request {
    /// Forward only one connection, then stop.
    pub single_connection: bool,
    /// e.g. `MIT-MAGIC-COOKIE-1`.
    pub auth_protocol: Bytes,
    /// Hex-encoded cookie.
    pub auth_cookie: Bytes,
    pub screen_number: u64,
}

impl X11Request {
    pub fn new(
        single_connection: bool,
        auth_protocol: impl Into<Bytes>,
        auth_cookie: impl Into<Bytes>,
        screen_number: u64,
    ) -> Self {
        Self {
            single_connection,
            auth_protocol: auth_protocol.into(),
            auth_cookie: auth_cookie.into(),
            screen_number,
        }
    }
}

impl RequestPayload for X11Request {
    const TAG: &'static str = "x11-req";

    fn wire_length(&self) -> usize {
        FLAG_LEN
            + string_len(&self.auth_protocol)
            + string_len(&self.auth_cookie)
            + varint_len(self.screen_number)
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;

        let mut w = SliceWriter::new(buf);
        w.put_flag(self.single_connection)?;
        w.put_string(&self.auth_protocol)?;
        w.put_string(&self.auth_cookie)?;
        w.put_varint(self.screen_number)?;

        debug_assert_eq!(w.position(), self.wire_length());
        Ok(w.position())
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        Ok(Self {
            single_connection: get_flag(src, "single_connection")?,
            auth_protocol: get_string(src)?,
            auth_cookie: get_string(src)?,
            screen_number: get_varint(src)?,
        })
    }
}
