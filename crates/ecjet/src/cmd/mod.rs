use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use ecjet_frame::{Command as EcjetCommand, Verification};

use crate::exit::{CliError, CliResult};
use crate::output::OutputFormat;

pub mod commands;
pub mod crc;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a request frame and print its wire bytes.
    Encode(EncodeArgs),
    /// Split input into frames and decode each one.
    Decode(DecodeArgs),
    /// List the command catalog.
    Commands(CommandsArgs),
    /// Compute the CRC16/X25 and mod256 checksums of some bytes.
    Crc(CrcArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Commands(args) => commands::run(args, format),
        Command::Crc(args) => crc::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Checksum mode of the link.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum VerificationArg {
    None,
    Mod256,
    #[default]
    Crc16,
}

impl From<VerificationArg> for Verification {
    fn from(arg: VerificationArg) -> Self {
        match arg {
            VerificationArg::None => Verification::None,
            VerificationArg::Mod256 => Verification::Mod256,
            VerificationArg::Crc16 => Verification::Crc16,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Command name (e.g. start-print), or code (e.g. 0x0018).
    #[arg(value_parser = parse_command)]
    pub command: EcjetCommand,
    /// Printer address.
    #[arg(long, short = 'a', default_value = "0")]
    pub address: u8,
    /// Payload as hex (e.g. "96" or "0A 00 31 32").
    #[arg(long, short = 'd', value_parser = parse_hex_bytes)]
    pub data: Option<HexBytes>,
    /// Checksum mode.
    #[arg(long, value_enum, default_value = "crc16")]
    pub verification: VerificationArg,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Wire bytes as hex. Reads --file or stdin when omitted.
    #[arg(conflicts_with = "file")]
    pub hex: Vec<String>,
    /// Read raw wire bytes from a file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Checksum mode.
    #[arg(long, value_enum, default_value = "crc16")]
    pub verification: VerificationArg,
}

#[derive(Args, Debug, Default)]
pub struct CommandsArgs {}

#[derive(Args, Debug)]
pub struct CrcArgs {
    /// Bytes as hex.
    #[arg(required = true)]
    pub hex: Vec<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Bytes given as a single hex argument.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HexBytes(pub Vec<u8>);

fn parse_hex_bytes(input: &str) -> Result<HexBytes, String> {
    parse_hex(input).map(HexBytes)
}

/// Parse hex bytes. Accepts separators (space, comma, colon) and `0x` prefixes.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let mut digits = String::with_capacity(input.len());
    for token in input.split(|c: char| c.is_whitespace() || c == ',' || c == ':') {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        digits.push_str(token);
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit {bad:?}"));
    }
    if digits.len() % 2 != 0 {
        return Err("hex input has an odd number of digits".to_string());
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|err| err.to_string())?;
            u8::from_str_radix(text, 16).map_err(|err| err.to_string())
        })
        .collect()
}

/// Parse hex spread over several arguments.
pub fn parse_hex_args(args: &[String]) -> CliResult<Vec<u8>> {
    parse_hex(&args.join(" ")).map_err(CliError::usage)
}

/// Resolve a command from its name or code.
///
/// Names match case-insensitively with `-` or `_` standing for spaces, so
/// `start-print`, `START_PRINT` and `"start print"` are the same command.
pub fn parse_command(input: &str) -> Result<EcjetCommand, String> {
    let input = input.trim();
    let code = if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(u16::from_str_radix(hex, 16).map_err(|err| format!("invalid code {input}: {err}"))?)
    } else if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        Some(input.parse::<u16>().map_err(|err| format!("invalid code {input}: {err}"))?)
    } else {
        None
    };
    if let Some(code) = code {
        return EcjetCommand::from_code(code).map_err(|err| err.to_string());
    }

    let wanted = input.replace(['-', '_'], " ").to_ascii_lowercase();
    EcjetCommand::ALL
        .iter()
        .copied()
        .find(|command| command.name().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| format!("unknown command {input:?} (see `ecjet commands`)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_with_separators() {
        assert_eq!(parse_hex("7E 00 18").unwrap(), [0x7E, 0x00, 0x18]);
        assert_eq!(parse_hex("7e0018").unwrap(), [0x7E, 0x00, 0x18]);
        assert_eq!(parse_hex("0x7E,0x00:0X18").unwrap(), [0x7E, 0x00, 0x18]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(parse_hex("7E 0").is_err());
        assert!(parse_hex("zz").is_err());
        assert!(parse_hex("+1").is_err());
    }

    #[test]
    fn hex_args_join() {
        let args = vec!["7E".to_string(), "00 18".to_string()];
        assert_eq!(parse_hex_args(&args).unwrap(), [0x7E, 0x00, 0x18]);
        assert_eq!(parse_hex_args(&["7".to_string()]).unwrap_err().code, crate::exit::USAGE);
    }

    #[test]
    fn command_by_name_or_code() {
        assert_eq!(parse_command("start-print").unwrap(), EcjetCommand::StartPrint);
        assert_eq!(parse_command("SET_AUX_MODE").unwrap(), EcjetCommand::SetAuxMode);
        assert_eq!(parse_command("get print width").unwrap(), EcjetCommand::GetPrintWidth);
        assert_eq!(parse_command("0x0018").unwrap(), EcjetCommand::StartPrint);
        assert_eq!(parse_command("4096").unwrap(), EcjetCommand::PrintTriggerState);
        assert!(parse_command("0x002C").is_err());
        assert!(parse_command("launch").is_err());
    }
}
