use ecjet_frame::Command;
use serde::Serialize;

use crate::cmd::CommandsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, OutputFormat};

#[derive(Serialize)]
struct CatalogEntry {
    code: String,
    name: &'static str,
    request: String,
    response: String,
    state_report: bool,
}

impl CatalogEntry {
    fn new(command: Command) -> Self {
        Self {
            code: format!("0x{:04X}", command.code()),
            name: command.name(),
            request: command.request_len().to_string(),
            response: command.response_len().to_string(),
            state_report: command.is_state_report(),
        }
    }
}

pub fn run(_args: CommandsArgs, format: OutputFormat) -> CliResult<i32> {
    let entries: Vec<CatalogEntry> = Command::ALL.iter().copied().map(CatalogEntry::new).collect();

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Table => {
            let mut table = new_table(vec!["CODE", "NAME", "REQUEST", "RESPONSE"]);
            for entry in &entries {
                table.add_row(vec![
                    entry.code.clone(),
                    entry.name.to_string(),
                    entry.request.clone(),
                    entry.response.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in &entries {
                println!(
                    "{}  {:<26} request={:<8} response={}",
                    entry.code, entry.name, entry.request, entry.response
                );
            }
        }
        OutputFormat::Raw => {
            for entry in &entries {
                println!("{}", entry.name);
            }
        }
    }

    Ok(SUCCESS)
}
