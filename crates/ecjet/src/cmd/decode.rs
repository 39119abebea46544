use std::fs;
use std::io::Read;

use ecjet_frame::{decode_frame, Frame, FrameError, Tokenizer, Verification};
use tracing::{info, warn};

use crate::cmd::{parse_hex_args, DecodeArgs};
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frames, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input = read_input(&args)?;
    let report = decode_all(&input, Verification::from(args.verification));

    if !report.frames.is_empty() {
        print_frames(&report.frames, format);
    }
    if report.trailing > 0 {
        info!(bytes = report.trailing, "input ends inside a frame");
    }

    let failed = report.errors.len();
    let total = report.frames.len() + failed;
    if total == 0 {
        return Err(CliError::new(DATA_INVALID, "no frames found in input"));
    }
    match report.errors.into_iter().next() {
        Some(first) => Err(frame_error(
            &format!("{failed} of {total} frames failed to decode, first"),
            first,
        )),
        None => Ok(SUCCESS),
    }
}

fn read_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if !args.hex.is_empty() {
        return parse_hex_args(&args.hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(input)
}

#[derive(Debug, Default)]
struct DecodeReport {
    frames: Vec<Frame>,
    errors: Vec<FrameError>,
    /// Bytes of an unterminated frame left at the end of the input.
    trailing: usize,
}

fn decode_all(input: &[u8], verification: Verification) -> DecodeReport {
    let mut tokenizer = Tokenizer::with_capacity(input.len());
    tokenizer.append(input);

    let mut report = DecodeReport::default();
    for (index, token) in tokenizer.by_ref().enumerate() {
        match decode_frame(&token, verification) {
            Ok(frame) => report.frames.push(frame),
            Err(err) => {
                warn!(index, error = %err, "frame rejected");
                report.errors.push(err);
            }
        }
    }
    report.trailing = tokenizer.len();
    report
}

#[cfg(test)]
mod tests {
    use ecjet_frame::{Acknowledge, Command};

    use super::*;

    const START_PRINT_RESPONSE: [u8; 16] = [
        0x7E, 0x00, 0x18, 0x00, 0x0C, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xD3,
        0xB5, 0x7F,
    ];
    const STOP_PRINT_REQUEST: [u8; 16] = [
        0x7E, 0x00, 0x19, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x8F,
        0xB8, 0x7F,
    ];

    #[test]
    fn decodes_every_frame_in_the_input() {
        let mut input = vec![0xFF, 0x00];
        input.extend_from_slice(&START_PRINT_RESPONSE);
        input.extend_from_slice(&STOP_PRINT_REQUEST);
        input.extend_from_slice(&[0x7E, 0x00, 0x19]);

        let report = decode_all(&input, Verification::Crc16);
        assert!(report.errors.is_empty());
        assert_eq!(report.frames.len(), 2);
        assert_eq!(report.frames[0].command, Command::StartPrint);
        assert_eq!(report.frames[0].information.acknowledge, Acknowledge::Complete);
        assert!(report.frames[1].is_request());
        assert_eq!(report.trailing, 3);
    }

    #[test]
    fn bad_frames_are_reported_not_fatal() {
        let mut corrupt = START_PRINT_RESPONSE;
        corrupt[13] ^= 0xFF;
        let mut input = corrupt.to_vec();
        input.extend_from_slice(&STOP_PRINT_REQUEST);

        let report = decode_all(&input, Verification::Crc16);
        assert_eq!(report.frames.len(), 1);
        assert!(matches!(report.errors[0], FrameError::ChecksumMismatch { .. }));
    }

    #[test]
    fn verification_mode_matters() {
        let report = decode_all(&STOP_PRINT_REQUEST, Verification::Mod256);
        assert!(report.frames.is_empty());
        assert_eq!(report.errors.len(), 1);
    }
}
