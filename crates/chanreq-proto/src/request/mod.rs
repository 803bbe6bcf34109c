//! Channel request payloads.
//!
//! Each request type has its own struct implementing [`RequestPayload`].
//! [`ChannelRequest`] is the closed set of all of them and dispatches the
//! shared contract with a `match`.
//!
//! # Invariants
//!
//! - **Tag uniqueness**: every variant reports a distinct, constant tag, and
//!   the registry maps that tag back to a decoder for the same variant.
//! - **Length exactness**: `write` returns exactly `wire_length()` and never
//!   touches bytes past that count.
//! - **All or nothing**: a decode error aborts the whole payload; no partial
//!   value is returned.

pub mod exit;
pub mod pty;
pub mod session;
pub mod x11;

use bytes::Buf;
use chanreq_wire::{DecodeResult, EncodeResult};

pub use exit::{ExitSignalRequest, ExitStatusRequest, SignalRequest};
pub use pty::{PtyRequest, WindowChangeRequest};
pub use session::{ExecRequest, ShellRequest, SubsystemRequest};
pub use x11::X11Request;

/// Encode/decode contract shared by every payload type.
pub trait RequestPayload: Sized {
    /// Request-type tag carried in the envelope.
    const TAG: &'static str;

    /// The tag for this payload.
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    /// Number of bytes [`write`](Self::write) produces.
    fn wire_length(&self) -> usize;

    /// Encode into the start of `buf`, returning the bytes written.
    ///
    /// Fails with `BufferTooSmall` if `buf` is shorter than
    /// [`wire_length`](Self::wire_length).
    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize>;

    /// Decode from `src`, advancing it past the payload.
    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self>;
}

/// Any channel request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRequest {
    /// Allocate a pseudo-terminal (`pty-req`).
    Pty(PtyRequest),
    /// Set up X11 forwarding (`x11-req`).
    X11(X11Request),
    /// Start the user's default shell (`shell`).
    Shell(ShellRequest),
    /// Run a command (`exec`).
    Exec(ExecRequest),
    /// Start a named subsystem (`subsystem`).
    Subsystem(SubsystemRequest),
    /// Terminal dimensions changed (`window-change`).
    WindowChange(WindowChangeRequest),
    /// Deliver a signal to the remote process (`signal`).
    Signal(SignalRequest),
    /// The remote process exited normally (`exit-status`).
    ExitStatus(ExitStatusRequest),
    /// The remote process was terminated by a signal (`exit-signal`).
    ExitSignal(ExitSignalRequest),
}

impl ChannelRequest {
    /// Request-type tag of the contained payload.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pty(r) => r.tag(),
            Self::X11(r) => r.tag(),
            Self::Shell(r) => r.tag(),
            Self::Exec(r) => r.tag(),
            Self::Subsystem(r) => r.tag(),
            Self::WindowChange(r) => r.tag(),
            Self::Signal(r) => r.tag(),
            Self::ExitStatus(r) => r.tag(),
            Self::ExitSignal(r) => r.tag(),
        }
    }

    /// Encoded payload size in bytes.
    #[must_use]
    pub fn wire_length(&self) -> usize {
        match self {
            Self::Pty(r) => r.wire_length(),
            Self::X11(r) => r.wire_length(),
            Self::Shell(r) => r.wire_length(),
            Self::Exec(r) => r.wire_length(),
            Self::Subsystem(r) => r.wire_length(),
            Self::WindowChange(r) => r.wire_length(),
            Self::Signal(r) => r.wire_length(),
            Self::ExitStatus(r) => r.wire_length(),
            Self::ExitSignal(r) => r.wire_length(),
        }
    }

    /// Encode the payload into the start of `buf`.
    pub fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        match self {
            Self::Pty(r) => r.write(buf),
            Self::X11(r) => r.write(buf),
            Self::Shell(r) => r.write(buf),
            Self::Exec(r) => r.write(buf),
            Self::Subsystem(r) => r.write(buf),
            Self::WindowChange(r) => r.write(buf),
            Self::Signal(r) => r.write(buf),
            Self::ExitStatus(r) => r.write(buf),
            Self::ExitSignal(r) => r.write(buf),
        }
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ChannelRequest {
                fn from(request: $ty) -> Self {
                    Self::$variant(request)
                }
            }
        )*
    };
}

impl_from_payload!(
    Pty(PtyRequest),
    X11(X11Request),
    Shell(ShellRequest),
    Exec(ExecRequest),
    Subsystem(SubsystemRequest),
    WindowChange(WindowChangeRequest),
    Signal(SignalRequest),
    ExitStatus(ExitStatusRequest),
    ExitSignal(ExitSignalRequest),
);
