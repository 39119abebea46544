use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ecjet_frame::Frame;
use ecjet_payload::summary;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
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

/// A decoded frame as printed by `decode`.
#[derive(Debug, Serialize)]
pub struct FrameOutput {
    pub address: u8,
    pub command: &'static str,
    pub code: String,
    pub direction: &'static str,
    pub acknowledge: &'static str,
    pub status: String,
    pub sequence: u16,
    pub payload_size: usize,
    pub payload: String,
    pub summary: String,
}

impl FrameOutput {
    pub fn new(frame: &Frame) -> Self {
        let information = &frame.information;
        Self {
            address: frame.address,
            command: frame.command.name(),
            code: format!("0x{:04X}", frame.command.code()),
            direction: direction(frame),
            acknowledge: information.acknowledge.name(),
            status: information.command_status().to_string(),
            sequence: information.nr,
            payload_size: frame.data.len(),
            payload: summary::hex(&frame.data),
            summary: summary::describe(frame),
        }
    }
}

pub fn direction(frame: &Frame) -> &'static str {
    if frame.is_request() {
        "request"
    } else {
        "response"
    }
}

pub fn print_frames(frames: &[Frame], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for frame in frames {
                print_json(&FrameOutput::new(frame));
            }
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["ADDR", "COMMAND", "DIRECTION", "ACK", "PAYLOAD"]);
            for frame in frames {
                let out = FrameOutput::new(frame);
                table.add_row(vec![
                    out.address.to_string(),
                    format!("{} ({})", out.command, out.code),
                    out.direction.to_string(),
                    out.acknowledge.to_string(),
                    out.payload,
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for frame in frames {
                println!("[{}] {}", frame.address, summary::describe(frame));
            }
        }
        OutputFormat::Raw => {
            for frame in frames {
                print_raw(&frame.data);
            }
        }
    }
}

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
