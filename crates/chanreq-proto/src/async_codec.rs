//! `tokio_util::codec` adapter for channel requests.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_message, encode_message, CodecConfig};
use crate::error::CodecError;
use crate::message::ChannelRequestMessage;

/// Codec for use with `FramedRead` / `FramedWrite` / `Framed`.
#[derive(Debug, Clone, Default)]
pub struct ChannelRequestCodec {
    config: CodecConfig,
}

impl ChannelRequestCodec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Current codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl Decoder for ChannelRequestCodec {
    type Item = ChannelRequestMessage;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        decode_message(src, self.config.max_message_size)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(msg) => Ok(Some(msg)),
            None if src.is_empty() => Ok(None),
            None => Err(CodecError::ConnectionClosed),
        }
    }
}

impl Encoder<ChannelRequestMessage> for ChannelRequestCodec {
    type Error = CodecError;

    fn encode(&mut self, item: ChannelRequestMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_message(&item, dst, self.config.max_message_size)
    }
}

impl Encoder<&ChannelRequestMessage> for ChannelRequestCodec {
    type Error = CodecError;

    fn encode(
        &mut self,
        item: &ChannelRequestMessage,
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        encode_message(item, dst, self.config.max_message_size)
    }
}
