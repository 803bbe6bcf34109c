//! Channel request codec for SSH-style remote shells carried over QUIC.
//!
//! chanreq encodes and decodes the typed requests a client and server
//! exchange on an open session channel: PTY allocation, X11 forwarding,
//! shell/exec/subsystem start, window resizes, signals and exit reports.
//!
//! # Crate Structure
//!
//! - [`wire`] - Primitive field codec (length-prefixed strings, varints, flags)
//! - [`proto`] - Request registry, payload types, envelope and stream I/O
//!
//! # Example
//!
//! ```
//! use chanreq::proto::{ChannelRequestMessage, ExecRequest};
//!
//! let msg = ChannelRequestMessage::new(true, ExecRequest::new("uptime"));
//! let bytes = msg.to_bytes()?;
//!
//! let decoded = ChannelRequestMessage::decode(&mut &bytes[..])?;
//! assert_eq!(decoded, msg);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Re-export primitive wire codec types.
pub mod wire {
    pub use chanreq_wire::*;
}

/// Re-export channel request protocol types.
pub mod proto {
    pub use chanreq_proto::*;
}

pub use chanreq_proto::{
    ChannelRequest, ChannelRequestMessage, CodecError, DecodeError, EncodeError,
};
