use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::{decode_message, CodecConfig};
use crate::error::{CodecError, Result};
use crate::message::ChannelRequestMessage;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Reads complete channel requests from any `Read` stream.
///
/// Handles partial reads internally; callers always get whole messages.
/// After any error other than a clean `ConnectionClosed` the stream position
/// is no longer aligned to a message boundary and the channel should be
/// torn down.
pub struct RequestReader<T> {
    inner: T,
    buf: BytesMut,
    config: CodecConfig,
}

impl<T: Read> RequestReader<T> {
    /// Create a new reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new reader with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete channel request (blocking).
    ///
    /// Returns `Err(CodecError::ConnectionClosed)` when EOF is reached,
    /// whether or not a partial message was buffered.
    pub fn read_request(&mut self) -> Result<ChannelRequestMessage> {
        loop {
            if let Some(msg) = decode_message(&mut self.buf, self.config.max_message_size)? {
                tracing::trace!(
                    tag = msg.tag(),
                    want_reply = msg.want_reply(),
                    size = msg.length(),
                    "read channel request"
                );
                return Ok(msg);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            };

            if read == 0 {
                return Err(CodecError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Returns true if bytes of an unfinished message are buffered.
    pub fn has_partial(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum message size for subsequent reads.
    pub fn set_max_message_size(&mut self, max_message_size: usize) {
        self.config.max_message_size = max_message_size;
    }

    /// Current reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl<T: Read> Iterator for RequestReader<T> {
    type Item = Result<ChannelRequestMessage>;

    /// Yields messages until the stream ends cleanly between messages.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_request() {
            Err(CodecError::ConnectionClosed) if !self.has_partial() => None,
            other => Some(other),
        }
    }
}
