use ecjet_frame::{crc16_x25, mod256};
use serde::Serialize;

use crate::cmd::{parse_hex_args, CrcArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, print_raw, OutputFormat};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ChecksumOutput {
    length: usize,
    crc16: String,
    /// CRC bytes in wire order (low byte first).
    crc16_wire: String,
    mod256: String,
}

fn checksums(bytes: &[u8]) -> (u16, u8, ChecksumOutput) {
    let crc = crc16_x25(bytes);
    let sum = mod256(bytes);
    let [lo, hi] = crc.to_le_bytes();
    let out = ChecksumOutput {
        length: bytes.len(),
        crc16: format!("0x{crc:04X}"),
        crc16_wire: format!("{lo:02X} {hi:02X}"),
        mod256: format!("0x{sum:02X}"),
    };
    (crc, sum, out)
}

pub fn run(args: CrcArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = parse_hex_args(&args.hex)?;
    let (crc, sum, out) = checksums(&bytes);

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["BYTES", "CRC16/X25", "WIRE", "MOD256"]);
            table.add_row(vec![
                out.length.to_string(),
                out.crc16.clone(),
                out.crc16_wire.clone(),
                out.mod256.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("crc16={} ({}) mod256={}", out.crc16, out.crc16_wire, out.mod256);
        }
        OutputFormat::Raw => {
            let mut raw = crc.to_le_bytes().to_vec();
            raw.push(sum);
            print_raw(&raw);
        }
    }

    Ok(SUCCESS)
}
