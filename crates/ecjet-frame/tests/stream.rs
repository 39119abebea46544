//! Stream-level scenarios: a host talking to a printer over a noisy link.

use std::io::{Cursor, Read};

use ecjet_frame::{
    Acknowledge, Command, CommandInformation, CommandStatus, Frame, FrameConfig, FrameError,
    FrameReader, FrameWriter, Tokenizer, Verification,
};

const SET_PRINT_HEIGHT_RESPONSE: [u8; 16] = [
    0x7E, 0x00, 0x07, 0x00, 0x0C, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xDA, 0xD8, 0x7F,
];

const GET_PRINT_COUNT_RESPONSE: [u8; 20] = [
    0x7E, 0x00, 0x0A, 0x00, 0x0C, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xA2, 0x01,
    0x00, 0x00, 0xB3, 0x61, 0x7F,
];

const GET_REVERSE_RESPONSE: [u8; 18] = [
    0x7E, 0x00, 0x0C, 0x00, 0x0C, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    0xDF, 0xC5, 0x7F,
];

/// Delivers its bytes in fixed-size chunks, like a UART driver.
struct Chunked {
    bytes: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl Read for Chunked {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.bytes.len() - self.pos);
        buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn printer_responses_across_chunk_boundaries() {
    let mut line = vec![0x00, 0x13, 0x7F];
    line.extend_from_slice(&SET_PRINT_HEIGHT_RESPONSE);
    line.extend_from_slice(&GET_PRINT_COUNT_RESPONSE);
    line.extend_from_slice(&[0xFF, 0xFF]);
    line.extend_from_slice(&GET_REVERSE_RESPONSE);

    for chunk in [1, 3, 5, 16, 64] {
        let reader = FrameReader::new(Chunked {
            bytes: line.clone(),
            pos: 0,
            chunk,
        });
        let frames: Vec<Frame> = reader.collect::<Result<_, _>>().unwrap();

        assert_eq!(frames.len(), 3, "chunk size {chunk}");
        assert_eq!(frames[0].command, Command::SetPrintHeight);
        assert!(frames[0].data.is_empty());
        assert_eq!(frames[1].command, Command::GetPrintCount);
        assert_eq!(frames[1].data.as_ref(), &[0xA2, 0x01, 0x00, 0x00]);
        assert_eq!(frames[2].command, Command::GetReverseMessage);
        assert_eq!(frames[2].data.as_ref(), &[0x00, 0x01]);
        for frame in &frames {
            assert!(!frame.is_request());
            assert_eq!(frame.information.acknowledge, Acknowledge::Complete);
            assert_eq!(frame.information.command_status(), CommandStatus::Success);
        }
    }
}

#[test]
fn request_response_exchange() {
    let mut host = FrameWriter::new(Vec::new());
    host.send(Command::SetPrintHeight, &[0x96]).unwrap();
    assert_eq!(
        host.port().as_slice(),
        &[
            0x7E, 0x00, 0x07, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x96,
            0x79, 0x65, 0x7F
        ]
    );

    let mut printer = FrameReader::new(Cursor::new(host.into_port()));
    let request = printer.read_frame().unwrap();
    assert!(request.is_request());

    let response = Frame::request(request.command)
        .with_information(CommandInformation::response(Acknowledge::Complete));
    assert_eq!(response.to_bytes().as_ref(), &SET_PRINT_HEIGHT_RESPONSE);
}

#[test]
fn corrupt_frame_does_not_stop_the_stream() {
    let mut corrupt = GET_REVERSE_RESPONSE.to_vec();
    corrupt[14] = 0x00;
    let mut line = corrupt;
    line.extend_from_slice(&SET_PRINT_HEIGHT_RESPONSE);

    let results: Vec<_> = FrameReader::new(Cursor::new(line)).collect();
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(FrameError::ChecksumMismatch { .. })));
    assert_eq!(results[1].as_ref().unwrap().command, Command::SetPrintHeight);
}

#[test]
fn state_report_from_printer() {
    let report = Frame::request(Command::PrintGoState)
        .with_information(CommandInformation::response(Acknowledge::Complete));
    let mut reader = FrameReader::new(Cursor::new(report.to_bytes().to_vec()));
    let frame = reader.read_frame().unwrap();
    assert!(frame.command.is_state_report());
}

#[test]
fn mod256_link() {
    let config = FrameConfig {
        verification: Verification::Mod256,
        ..FrameConfig::default()
    };
    let mut writer = FrameWriter::with_config(Vec::new(), config.clone());
    writer.send(Command::SetPhotocellMode, &[0x03]).unwrap();
    writer.send(Command::GetPhotocellMode, &[]).unwrap();

    let mut reader = FrameReader::with_config(Cursor::new(writer.into_port()), config);
    assert_eq!(reader.read_frame().unwrap().data.as_ref(), &[0x03]);
    assert_eq!(reader.read_frame().unwrap().command, Command::GetPhotocellMode);
}

#[test]
fn tokenizer_feeds_decoder() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.append(&GET_PRINT_COUNT_RESPONSE[..9]);
    assert!(tokenizer.next().is_none());
    tokenizer.append(&GET_PRINT_COUNT_RESPONSE[9..]);

    let token = tokenizer.next().unwrap();
    let frame = ecjet_frame::decode_frame(&token, Verification::Crc16).unwrap();
    assert_eq!(u32::from_le_bytes([frame.data[0], frame.data[1], frame.data[2], frame.data[3]]), 418);
}
