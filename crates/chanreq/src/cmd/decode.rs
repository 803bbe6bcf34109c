use std::fs::File;
use std::io::{Cursor, Read};

use chanreq_proto::{CodecConfig, RequestReader};

use crate::cmd::encode::parse_hex;
use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, encode_error, io_error, CliResult, SUCCESS};
use crate::output::{print_message, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = CodecConfig {
        max_message_size: args.max_message_size,
    };

    if let Some(text) = args.hex.as_deref() {
        let bytes = parse_hex("--hex", text)?;
        return print_all(RequestReader::with_config(Cursor::new(bytes), config), format);
    }

    match args.file {
        Some(path) => {
            let file = File::open(&path)
                .map_err(|err| io_error(&format!("open {}", path.display()), err))?;
            print_all(RequestReader::with_config(file, config), format)
        }
        None => {
            let stdin = std::io::stdin().lock();
            print_all(RequestReader::with_config(stdin, config), format)
        }
    }
}

/// Decode until the input ends cleanly between requests.
///
/// Requests decoded before a failure are still printed.
fn print_all<R: Read>(reader: RequestReader<R>, format: OutputFormat) -> CliResult<i32> {
    let mut count = 0usize;
    for result in reader {
        let index = count + 1;
        let msg = result.map_err(|err| codec_error(&format!("request #{index}"), err))?;
        let wire = msg
            .to_bytes()
            .map_err(|err| encode_error(&format!("request #{index}"), err))?;
        print_message(&msg, &wire, format);
        count = index;
    }

    tracing::debug!(count, "decoded channel requests");
    Ok(SUCCESS)
}
