//! Channel request messages for a remote-shell protocol.
//!
//! A channel request is a typed command sent over an already-open channel:
//! allocate a PTY, start a shell, run a command, resize the window, deliver
//! a signal, report how a process exited. Every request shares one envelope:
//! - A 1-byte message type (98)
//! - The request-type tag as a length-prefixed string
//! - A 1-byte "want reply" flag
//! - A payload whose layout depends on the tag
//!
//! Payload numbers use variable-length integers; strings keep their fixed
//! 4-byte length prefix.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod error;
pub mod message;
pub mod message_type;
pub mod reader;
pub mod registry;
pub mod request;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::ChannelRequestCodec;
pub use chanreq_wire::{DecodeError, EncodeError};
pub use codec::{decode_message, encode_message, CodecConfig, DEFAULT_MAX_MESSAGE_SIZE};
pub use error::{CodecError, Result};
pub use message::ChannelRequestMessage;
pub use message_type::{message_type_name, CHANNEL_REQUEST};
pub use reader::RequestReader;
pub use request::{
    ChannelRequest, ExecRequest, ExitSignalRequest, ExitStatusRequest, PtyRequest,
    RequestPayload, ShellRequest, SignalRequest, SubsystemRequest, WindowChangeRequest,
    X11Request,
};
pub use writer::RequestWriter;
