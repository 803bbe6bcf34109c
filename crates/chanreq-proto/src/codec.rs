use bytes::{Buf, BytesMut};
use chanreq_wire::DecodeError;

use crate::error::{CodecError, Result};
use crate::message::ChannelRequestMessage;

/// Default maximum encoded message size: 256 KiB.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 256 * 1024;

/// Configuration for streaming channel request I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest message, in bytes, that will be buffered or emitted.
    pub max_message_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

/// Append one encoded message to `dst`.
///
/// Nothing is appended if the message is larger than `max_message_size` or
/// fails to encode.
pub fn encode_message(
    msg: &ChannelRequestMessage,
    dst: &mut BytesMut,
    max_message_size: usize,
) -> Result<()> {
    let size = msg.length();
    if size > max_message_size {
        return Err(CodecError::MessageTooLarge {
            size,
            max: max_message_size,
        });
    }
    msg.encode(dst)?;
    Ok(())
}

/// Decode one message from the front of a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete message yet.
/// On success, consumes exactly the message bytes; otherwise the buffer is
/// left untouched.
pub fn decode_message(
    src: &mut BytesMut,
    max_message_size: usize,
) -> Result<Option<ChannelRequestMessage>> {
    if src.is_empty() {
        return Ok(None); // Need more data
    }

    let mut cursor: &[u8] = src;
    match ChannelRequestMessage::decode(&mut cursor) {
        Ok(msg) => {
            let consumed = src.len() - cursor.len();
            if consumed > max_message_size {
                return Err(CodecError::MessageTooLarge {
                    size: consumed,
                    max: max_message_size,
                });
            }
            src.advance(consumed);
            Ok(Some(msg))
        }
        Err(DecodeError::Truncated { needed, remaining }) => {
            // Offset of the failing field plus what it still asks for.
            let required = src.len() - remaining + needed;
            if required > max_message_size {
                return Err(CodecError::MessageTooLarge {
                    size: required,
                    max: max_message_size,
                });
            }
            Ok(None) // Need more data
        }
        Err(err) => Err(err.into()),
    }
}
