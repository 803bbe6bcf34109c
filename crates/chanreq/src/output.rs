use std::io::{IsTerminal, Write};

use chanreq_proto::{message_type_name, ChannelRequest, ChannelRequestMessage, CHANNEL_REQUEST};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Hex,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    message_type: u8,
    message_type_name: &'static str,
    tag: &'a str,
    want_reply: bool,
    length: usize,
    fields: Map<String, Value>,
    hex: String,
}

/// Print one envelope. `wire` is its encoded form.
pub fn print_message(msg: &ChannelRequestMessage, wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = MessageOutput {
                message_type: CHANNEL_REQUEST,
                message_type_name: message_type_name(CHANNEL_REQUEST),
                tag: msg.tag(),
                want_reply: msg.want_reply(),
                length: wire.len(),
                fields: request_fields(msg.request()).into_iter().collect(),
                hex: hex::encode(wire),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec!["tag".to_string(), msg.tag().to_string()])
                .add_row(vec!["want_reply".to_string(), msg.want_reply().to_string()])
                .add_row(vec!["length".to_string(), wire.len().to_string()]);
            for (name, value) in request_fields(msg.request()) {
                table.add_row(vec![name, value_text(&value)]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let mut line = format!(
                "{} want_reply={} size={}",
                msg.tag(),
                msg.want_reply(),
                wire.len()
            );
            for (name, value) in request_fields(msg.request()) {
                line.push_str(&format!(" {name}={value}"));
            }
            println!("{line}");
        }
        OutputFormat::Hex => {
            println!("{}", hex::encode(wire));
        }
        OutputFormat::Raw => {
            print_raw(wire);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Payload fields in wire order.
pub fn request_fields(request: &ChannelRequest) -> Vec<(String, Value)> {
    let fields: Vec<(&str, Value)> = match request {
        ChannelRequest::Pty(req) => vec![
            ("term", bytes_value(&req.term)),
            ("char_width", json!(req.char_width)),
            ("char_height", json!(req.char_height)),
            ("pixel_width", json!(req.pixel_width)),
            ("pixel_height", json!(req.pixel_height)),
            ("terminal_modes", json!(hex::encode(&req.terminal_modes))),
        ],
        ChannelRequest::X11(req) => vec![
            ("single_connection", json!(req.single_connection)),
            ("auth_protocol", bytes_value(&req.auth_protocol)),
            ("auth_cookie", bytes_value(&req.auth_cookie)),
            ("screen_number", json!(req.screen_number)),
        ],
        ChannelRequest::Shell(_) => Vec::new(),
        ChannelRequest::Exec(req) => vec![("command", bytes_value(&req.command))],
        ChannelRequest::Subsystem(req) => vec![("subsystem_name", bytes_value(&req.name))],
        ChannelRequest::WindowChange(req) => vec![
            ("char_width", json!(req.char_width)),
            ("char_height", json!(req.char_height)),
            ("pixel_width", json!(req.pixel_width)),
            ("pixel_height", json!(req.pixel_height)),
        ],
        ChannelRequest::Signal(req) => vec![("signal_name", bytes_value(&req.signal_name))],
        ChannelRequest::ExitStatus(req) => vec![("exit_status", json!(req.exit_status))],
        ChannelRequest::ExitSignal(req) => vec![
            ("signal_name", bytes_value(&req.signal_name)),
            ("core_dumped", json!(req.core_dumped)),
            ("error_message", json!(req.error_message)),
            ("language_tag", bytes_value(&req.language_tag)),
        ],
    };
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Byte-string fields print as text when they hold UTF-8, otherwise as
/// `{"hex": "..."}`.
fn bytes_value(raw: &[u8]) -> Value {
    match std::str::from_utf8(raw) {
        Ok(text) => json!(text),
        Err(_) => json!({ "hex": hex::encode(raw) }),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chanreq_proto::{
        ExecRequest, ExitSignalRequest, PtyRequest, ShellRequest, WindowChangeRequest,
    };

    use super::*;

    fn names(request: impl Into<ChannelRequest>) -> Vec<String> {
        request_fields(&request.into())
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    #[test]
    fn pty_fields_follow_wire_order() {
        assert_eq!(
            names(PtyRequest::new("vt100", 80, 24, 0, 0)),
            [
                "term",
                "char_width",
                "char_height",
                "pixel_width",
                "pixel_height",
                "terminal_modes"
            ]
        );
    }

    #[test]
    fn terminal_modes_render_as_hex() {
        let req = PtyRequest::new("vt100", 80, 24, 0, 0).with_terminal_modes(vec![0x35, 0x00]);
        let fields = request_fields(&req.into());
        assert_eq!(fields[5].1, json!("3500"));
    }

    #[test]
    fn numbers_stay_numeric() {
        let fields = request_fields(&WindowChangeRequest::new(120, 40, 0, 0).into());
        assert_eq!(fields[0].1, json!(120));
        assert_eq!(value_text(&fields[0].1), "120");
    }

    #[test]
    fn shell_has_no_fields() {
        assert!(names(ShellRequest).is_empty());
    }

    #[test]
    fn strings_render_unquoted_in_tables() {
        let fields = request_fields(&ExitSignalRequest::new("KILL", true, "killed", "").into());
        assert_eq!(value_text(&fields[0].1), "KILL");
        assert_eq!(value_text(&fields[1].1), "true");
    }

    #[test]
    fn non_utf8_fields_render_as_hex() {
        let fields = request_fields(&ExecRequest::new(&b"cat caf\xE9"[..]).into());
        assert_eq!(fields[0].1, json!({ "hex": "63617420636166e9" }));
    }
}
