//! Requests that start something on the remote end of a session channel.

use bytes::{Buf, Bytes};
use chanreq_wire::{ensure_capacity, get_string, string_len, write_string, DecodeResult, EncodeResult};

use super::RequestPayload;

/// `shell`: start the user's default shell. Carries no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellRequest;

impl RequestPayload for ShellRequest {
    const TAG: &'static str = "shell";

    fn wire_length(&self) -> usize {
        0
    }

    fn write(&self, _buf: &mut [u8]) -> EncodeResult<usize> {
        Ok(0)
    }

    fn decode<B: Buf>(_src: &mut B) -> DecodeResult<Self> {
        Ok(ShellRequest)
    }
}

/// `exec`: run a single command.
///
/// The command is passed through as raw bytes; no character set is assumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub command: Bytes,
}

impl ExecRequest {
    pub fn new(command: impl Into<Bytes>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl RequestPayload for ExecRequest {
    const TAG: &'static str = "exec";

    fn wire_length(&self) -> usize {
        string_len(&self.command)
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;
        write_string(buf, &self.command)
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        Ok(Self {
            command: get_string(src)?,
        })
    }
}

/// `subsystem`: start a named subsystem such as `sftp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemRequest {
    pub name: Bytes,
}

impl SubsystemRequest {
    pub fn new(name: impl Into<Bytes>) -> Self {
        Self { name: name.into() }
    }
}

impl RequestPayload for SubsystemRequest {
    const TAG: &'static str = "subsystem";

    fn wire_length(&self) -> usize {
        string_len(&self.name)
    }

    fn write(&self, buf: &mut [u8]) -> EncodeResult<usize> {
        ensure_capacity(buf, self.wire_length())?;
        write_string(buf, &self.name)
    }

    fn decode<B: Buf>(src: &mut B) -> DecodeResult<Self> {
        Ok(Self {
            name: get_string(src)?,
        })
    }
}
