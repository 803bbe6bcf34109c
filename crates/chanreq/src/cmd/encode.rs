use chanreq_proto::{
    ChannelRequest, ChannelRequestMessage, ExecRequest, ExitSignalRequest, ExitStatusRequest,
    PtyRequest, ShellRequest, SignalRequest, SubsystemRequest, WindowChangeRequest, X11Request,
};

use crate::cmd::{EncodeArgs, RequestArgs};
use crate::exit::{encode_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_message, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let msg = ChannelRequestMessage::new(args.want_reply, build_request(args.request)?);
    let wire = msg
        .to_bytes()
        .map_err(|err| encode_error(msg.tag(), err))?;

    tracing::debug!(
        tag = msg.tag(),
        want_reply = msg.want_reply(),
        size = wire.len(),
        "encoded channel request"
    );
    print_message(&msg, &wire, format);
    Ok(SUCCESS)
}

fn build_request(args: RequestArgs) -> CliResult<ChannelRequest> {
    let request: ChannelRequest = match args {
        RequestArgs::PtyReq {
            term,
            cols,
            rows,
            width_px,
            height_px,
            modes,
        } => {
            let pty = PtyRequest::new(term, cols, rows, width_px, height_px);
            match modes {
                Some(text) => pty.with_terminal_modes(parse_hex("--modes", &text)?).into(),
                None => pty.into(),
            }
        }
        RequestArgs::X11Req {
            single_connection,
            auth_protocol,
            auth_cookie,
            screen,
        } => X11Request::new(single_connection, auth_protocol, auth_cookie, screen).into(),
        RequestArgs::Shell => ShellRequest.into(),
        RequestArgs::Exec { command } => ExecRequest::new(command).into(),
        RequestArgs::Subsystem { name } => SubsystemRequest::new(name).into(),
        RequestArgs::WindowChange {
            cols,
            rows,
            width_px,
            height_px,
        } => WindowChangeRequest::new(cols, rows, width_px, height_px).into(),
        RequestArgs::Signal { name } => SignalRequest::new(name).into(),
        RequestArgs::ExitStatus { status } => ExitStatusRequest::new(status).into(),
        RequestArgs::ExitSignal {
            signal,
            core_dumped,
            message,
            language,
        } => ExitSignalRequest::new(signal, core_dumped, message, language).into(),
    };
    Ok(request)
}

/// Decode hex text, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(what: &str, text: &str) -> CliResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).map_err(|err| CliError::new(USAGE, format!("{what}: invalid hex: {err}")))
}
