use chanreq_proto::{registry, CHANNEL_REQUEST};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::TagsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct TagsOutput {
    message_type: u8,
    tags: Vec<&'static str>,
}

pub fn run(_args: TagsArgs, format: OutputFormat) -> CliResult<i32> {
    let tags = registry::tags();

    match format {
        OutputFormat::Json => {
            let out = TagsOutput {
                message_type: CHANNEL_REQUEST,
                tags,
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
                .set_header(vec!["TAG"]);
            for tag in tags {
                table.add_row(vec![tag]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Hex | OutputFormat::Raw => {
            for tag in tags {
                println!("{tag}");
            }
        }
    }

    Ok(SUCCESS)
}
