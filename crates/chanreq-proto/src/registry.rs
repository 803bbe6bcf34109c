//! Request-type registry.
//!
//! Maps each request-type tag to the decoder for its payload. The table is
//! built on first use and never mutated afterwards, so lookups need no
//! synchronization.

use std::collections::HashMap;
use std::sync::LazyLock;

use chanreq_wire::DecodeResult;

use crate::request::{
    ChannelRequest, ExecRequest, ExitSignalRequest, ExitStatusRequest, PtyRequest, RequestPayload,
    ShellRequest, SignalRequest, SubsystemRequest, WindowChangeRequest, X11Request,
};

/// Decodes one payload from the bytes following the envelope header.
pub type Decoder = fn(&mut &[u8]) -> DecodeResult<ChannelRequest>;

fn decode_as<P>(src: &mut &[u8]) -> DecodeResult<ChannelRequest>
where
    P: RequestPayload + Into<ChannelRequest>,
{
    P::decode(src).map(Into::into)
}

/// Every supported request type. Adding a payload means adding a row here.
const DECODERS: [(&str, Decoder); 9] = [
    (PtyRequest::TAG, decode_as::<PtyRequest>),
    (X11Request::TAG, decode_as::<X11Request>),
    (ShellRequest::TAG, decode_as::<ShellRequest>),
    (ExecRequest::TAG, decode_as::<ExecRequest>),
    (SubsystemRequest::TAG, decode_as::<SubsystemRequest>),
    (WindowChangeRequest::TAG, decode_as::<WindowChangeRequest>),
    (SignalRequest::TAG, decode_as::<SignalRequest>),
    (ExitStatusRequest::TAG, decode_as::<ExitStatusRequest>),
    (ExitSignalRequest::TAG, decode_as::<ExitSignalRequest>),
];

static REGISTRY: LazyLock<HashMap<&'static str, Decoder>> =
    LazyLock::new(|| DECODERS.into_iter().collect());

/// Look up the decoder for `tag`.
pub fn resolve(tag: &str) -> Option<Decoder> {
    REGISTRY.get(tag).copied()
}

/// Returns true if `tag` has a registered decoder.
pub fn is_supported(tag: &str) -> bool {
    REGISTRY.contains_key(tag)
}

/// All registered tags, sorted.
pub fn tags() -> Vec<&'static str> {
    let mut tags: Vec<_> = REGISTRY.keys().copied().collect();
    tags.sort_unstable();
    tags
}
