use chanreq_wire::{DecodeError, EncodeError};

/// Errors that can occur while moving channel requests over a byte stream.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A buffered message failed to decode.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// A message failed to encode.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The message exceeds the configured maximum size.
    #[error("message too large ({size} bytes, max {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing.
    #[error("channel request I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete message was received.
    #[error("connection closed (incomplete channel request)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, CodecError>;
