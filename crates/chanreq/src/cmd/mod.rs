use clap::{Args, Subcommand};
use std::path::PathBuf;

use chanreq_proto::DEFAULT_MAX_MESSAGE_SIZE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod tags;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build one channel request and print its encoding.
    Encode(EncodeArgs),
    /// Decode every channel request in the input.
    Decode(DecodeArgs),
    /// List registered request types.
    Tags(TagsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: Option<OutputFormat>) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format.unwrap_or(OutputFormat::Hex)),
        Command::Decode(args) => {
            decode::run(args, format.unwrap_or_else(OutputFormat::default_for_stdout))
        }
        Command::Tags(args) => {
            tags::run(args, format.unwrap_or_else(OutputFormat::default_for_stdout))
        }
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Ask the peer to answer with success or failure.
    #[arg(long, global = true)]
    pub want_reply: bool,

    #[command(subcommand)]
    pub request: RequestArgs,
}

/// One subcommand per request type, named by its wire tag.
#[derive(Subcommand, Debug)]
pub enum RequestArgs {
    /// Allocate a pseudo-terminal.
    #[command(name = "pty-req")]
    PtyReq {
        /// TERM value for the remote side.
        #[arg(long, default_value = "xterm-256color")]
        term: String,
        /// Width in characters.
        #[arg(long, default_value_t = 80)]
        cols: u64,
        /// Height in rows.
        #[arg(long, default_value_t = 24)]
        rows: u64,
        /// Width in pixels.
        #[arg(long, default_value_t = 0)]
        width_px: u64,
        /// Height in pixels.
        #[arg(long, default_value_t = 0)]
        height_px: u64,
        /// Encoded terminal modes, as hex.
        #[arg(long, value_name = "HEX")]
        modes: Option<String>,
    },
    /// Request X11 forwarding.
    #[command(name = "x11-req")]
    X11Req {
        /// Forward a single connection only.
        #[arg(long)]
        single_connection: bool,
        #[arg(long, default_value = "MIT-MAGIC-COOKIE-1")]
        auth_protocol: String,
        #[arg(long)]
        auth_cookie: String,
        #[arg(long, default_value_t = 0)]
        screen: u64,
    },
    /// Start the user's login shell.
    Shell,
    /// Run a single command.
    Exec { command: String },
    /// Start a named subsystem.
    Subsystem { name: String },
    /// Report a terminal resize.
    WindowChange {
        #[arg(long, default_value_t = 80)]
        cols: u64,
        #[arg(long, default_value_t = 24)]
        rows: u64,
        #[arg(long, default_value_t = 0)]
        width_px: u64,
        #[arg(long, default_value_t = 0)]
        height_px: u64,
    },
    /// Deliver a signal (name without the SIG prefix).
    Signal { name: String },
    /// Report a process exit status.
    ExitStatus { status: u64 },
    /// Report death by signal.
    ExitSignal {
        signal: String,
        #[arg(long)]
        core_dumped: bool,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long, default_value = "")]
        language: String,
    },
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded input (whitespace ignored).
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read binary input from a file. Default: stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Largest accepted request, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    pub max_message_size: usize,
}

#[derive(Args, Debug, Default)]
pub struct TagsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
