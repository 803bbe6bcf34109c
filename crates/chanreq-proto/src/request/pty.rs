//! Terminal allocation and resize requests.

use bytes::{Buf, Bytes};
use chanreq_wire::{
    ensure_capacity, get_string, get_varint, string_len, varint_len, DecodeResult, EncodeResult,
    SliceWriter,
};

use super::RequestPayload;

/// Character and pixel dimensions of a terminal.
///
/// Zero pixel dimensions mean "unknown" to the receiver; the codec does not
/// interpret them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Dimensions {
    char_width: u64,
    char_height: u64,
    pixel_width: u64,
    pixel_height: u64,
}

impl Dimensions {
    fn wire_length(&self) -> usize {
        varint_len(self.char_width)
            + varint_len(self.char_height)
            + varint_len(self.pixel_width)
            + varint_len(self.pixel_height)
    }

    fn put(&self, w: &mut SliceWriter<'_>) -> EncodeResult<()> {
        for value in [
            self.char_width,
            self.char_height,
            self.pixel_width,
            self.pixel_height,
        ] {
            w.put_varint(value)?;
        }
        Ok(())
    }

    fn get<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        Ok(Self {
            char_width: get_varint(src)?,
            char_height: get_varint(src)?,
            pixel_width: get_varint(src)?,
            pixel_height: get_varint(src)?,
        })
    }
}

/// `pty-req`: allocate a pseudo-terminal for the session.
///
/// Wire layout: term (string), char width, char height, pixel width,
/// pixel height (varints), encoded terminal modes (string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtyRequest {
    /// Value for the `TERM` environment variable, e.g. `xterm-256color`.
    pub term: Bytes,
    pub char_width: u64,
    pub char_height: u64,
    pub pixel_width: u64,
    pub pixel_height: u64,
    /// Opaque encoded terminal modes.
    pub terminal_modes: Bytes,
}

impl PtyRequest {
    /// Create a request with no terminal modes.
    pub fn new(
        term: impl Into<Bytes>,
        char_width: u64,
        char_height: u64,
        pixel_width: u64,
        pixel_height: u64,
    ) -> Self {
        Self {
            term: term.into(),
            char_width,
            char_height,
            pixel_width,
            pixel_height,
            terminal_modes: Bytes::new(),
        }
    }

    /// Attach encoded terminal modes.
    pub fn with_terminal_modes(mut self, modes: impl Into<Bytes>) -> Self {
        self.terminal_modes = modes.into();
        self
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            char_width: self.char_width,
            char_height: self.char_height,
            pixel_width: self.pixel_width,
            pixel_height: self.pixel_height,
        }
    }
}

impl RequestPayload for PtyRequest {
    const TAG: &'static str = "pty-req";

    fn wire_length(&self) -> usize {
        string_len(&self.term)
            + self.dimensions().wire_length()
            + string_len(&self.terminal_modes)
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;

        let mut w = SliceWriter::new(buf);
        w.put_string(&self.term)?;
        self.dimensions().put(&mut w)?;
        w.put_string(&self.terminal_modes)?;

        debug_assert_eq!(w.position(), self.wire_length());
        Ok(w.position())
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        let term = get_string(src)?;
        let dims = Dimensions::get(src)?;
        let terminal_modes = get_string(src)?;
        Ok(Self {
            term,
            char_width: dims.char_width,
            char_height: dims.char_height,
            pixel_width: dims.pixel_width,
            pixel_height: dims.pixel_height,
            terminal_modes,
        })
    }
}

/// `window-change`: the client's terminal was resized.
///
/// Wire layout: four varints with no separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowChangeRequest {
    pub char_width: u64,
    pub char_height: u64,
    pub pixel_width: u64,
    pub pixel_height: u64,
}

impl WindowChangeRequest {
    pub fn new(char_width: u64, char_height: u64, pixel_width: u64, pixel_height: u64) -> Self {
        Self {
            char_width,
            char_height,
            pixel_width,
            pixel_height,
        }
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            char_width: self.char_width,
            char_height: self.char_height,
            pixel_width: self.pixel_width,
            pixel_height: self.pixel_height,
        }
    }
}

impl RequestPayload for WindowChangeRequest {
    const TAG: &'static str = "window-change";

    fn wire_length(&self) -> usize {
        self.dimensions().wire_length()
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;

        let mut w = SliceWriter::new(buf);
        self.dimensions().put(&mut w)?;

        debug_assert_eq!(w.position(), self.wire_length());
        Ok(w.position())
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        let dims = Dimensions::get(src)?;
        Ok(Self::new(
            dims.char_width,
            dims.char_height,
            dims.pixel_width,
            dims.pixel_height,
        ))
    }
}
