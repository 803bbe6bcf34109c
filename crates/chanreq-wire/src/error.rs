/// Errors that can occur while encoding into a caller-supplied buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The destination buffer is shorter than the encoded value.
    #[error("buffer too small ({available} bytes, need {needed})")]
    BufferTooSmall { needed: usize, available: usize },

    /// The value cannot be represented as a variable-length integer.
    #[error("value {value} exceeds varint range (max {max})", max = crate::varint::VARINT_MAX)]
    Overflow { value: u64 },
}

/// Errors that can occur while decoding from a byte source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes remain than the field requires.
    #[error("truncated input (need {needed} bytes, {remaining} remaining)")]
    Truncated { needed: usize, remaining: usize },

    /// The field is structurally present but carries an invalid value.
    #[error("malformed field `{field}`: {reason}")]
    MalformedField { field: &'static str, reason: String },

    /// The request-type tag is not registered.
    #[error("unsupported channel request type: {0:?}")]
    UnsupportedRequestType(String),

    /// The leading message-type byte is not a channel request.
    #[error("unexpected message type {0} (expected channel request)")]
    UnexpectedMessageType(u8),
}

impl DecodeError {
    /// Returns true if more input could turn this failure into a success.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Fails with `BufferTooSmall` unless `buf` holds at least `needed` bytes.
pub fn ensure_capacity(buf: &[u8], needed: usize) -> EncodeResult<()> {
    if buf.len() < needed {
        return Err(EncodeError::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

/// Fails with `Truncated` unless `remaining` covers `needed` bytes.
pub fn ensure_remaining(remaining: usize, needed: usize) -> DecodeResult<()> {
    if remaining < needed {
        return Err(DecodeError::Truncated { needed, remaining });
    }
    Ok(())
}
