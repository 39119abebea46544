use ecjet_frame::{Frame, Verification};
use ecjet_payload::summary;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cmd::EncodeArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, print_raw, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    command: &'static str,
    code: String,
    address: u8,
    verification: &'static str,
    payload_size: usize,
    wire_size: usize,
    bytes: String,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = build_frame(&args);
    let wire = frame.to_bytes();
    debug!(command = %frame.command, size = wire.len(), "encoded frame");

    let out = EncodeOutput {
        command: frame.command.name(),
        code: format!("0x{:04X}", frame.command.code()),
        address: frame.address,
        verification: frame.verification.name(),
        payload_size: frame.data.len(),
        wire_size: wire.len(),
        bytes: summary::hex(&wire),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            let rows = [
                ("command", format!("{} ({})", out.command, out.code)),
                ("address", out.address.to_string()),
                ("verification", out.verification.to_string()),
                ("payload", format!("{} bytes", out.payload_size)),
                ("wire", format!("{} bytes", out.wire_size)),
                ("bytes", out.bytes.clone()),
            ];
            for (field, value) in rows {
                table.add_row(vec![field.to_string(), value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", out.bytes),
        OutputFormat::Raw => print_raw(&wire),
    }

    Ok(SUCCESS)
}

fn build_frame(args: &EncodeArgs) -> Frame {
    let data = args.data.clone().unwrap_or_default().0;
    let expected = args.command.request_len();
    if !expected.accepts(data.len()) {
        warn!(
            command = %args.command,
            expected = %expected,
            actual = data.len(),
            "payload length does not match the command catalog; the printer will reject it"
        );
    }
    Frame::new(args.command, data)
        .with_address(args.address)
        .with_verification(Verification::from(args.verification))
}
