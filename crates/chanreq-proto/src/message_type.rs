//! Message-type numbers for the channel family of the host protocol.
//!
//! Only [`CHANNEL_REQUEST`] is produced or consumed by this crate; the rest
//! are listed so callers can name what they see on a shared stream.

/// Open a new channel.
pub const CHANNEL_OPEN: u8 = 90;

/// Channel open accepted.
pub const CHANNEL_OPEN_CONFIRMATION: u8 = 91;

/// Channel open rejected.
pub const CHANNEL_OPEN_FAILURE: u8 = 92;

/// Flow-control window grant.
pub const CHANNEL_WINDOW_ADJUST: u8 = 93;

/// Channel payload bytes.
pub const CHANNEL_DATA: u8 = 94;

/// Out-of-band channel payload bytes (e.g. stderr).
pub const CHANNEL_EXTENDED_DATA: u8 = 95;

/// No more data will be sent on the channel.
pub const CHANNEL_EOF: u8 = 96;

/// The channel is closing.
pub const CHANNEL_CLOSE: u8 = 97;

/// A typed request on an open channel.
pub const CHANNEL_REQUEST: u8 = 98;

/// Positive reply to a request that asked for one.
pub const CHANNEL_SUCCESS: u8 = 99;

/// Negative reply to a request that asked for one.
pub const CHANNEL_FAILURE: u8 = 100;

/// Returns a human-readable name for a message-type number.
pub fn message_type_name(msg_type: u8) -> &'static str {
    match msg_type {
        CHANNEL_OPEN => "CHANNEL_OPEN",
        CHANNEL_OPEN_CONFIRMATION => "CHANNEL_OPEN_CONFIRMATION",
        CHANNEL_OPEN_FAILURE => "CHANNEL_OPEN_FAILURE",
        CHANNEL_WINDOW_ADJUST => "CHANNEL_WINDOW_ADJUST",
        CHANNEL_DATA => "CHANNEL_DATA",
        CHANNEL_EXTENDED_DATA => "CHANNEL_EXTENDED_DATA",
        CHANNEL_EOF => "CHANNEL_EOF",
        CHANNEL_CLOSE => "CHANNEL_CLOSE",
        CHANNEL_REQUEST => "CHANNEL_REQUEST",
        CHANNEL_SUCCESS => "CHANNEL_SUCCESS",
        CHANNEL_FAILURE => "CHANNEL_FAILURE",
        _ => "UNKNOWN",
    }
}

/// Returns true if the number belongs to the channel message family.
pub fn is_channel_message(msg_type: u8) -> bool {
    (CHANNEL_OPEN..=CHANNEL_FAILURE).contains(&msg_type)
}
