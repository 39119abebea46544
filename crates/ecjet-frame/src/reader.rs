use std::io::{ErrorKind, Read};

use tracing::debug;

use crate::codec::{decode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};
use crate::tokenizer::Tokenizer;

const INITIAL_BUFFER_CAPACITY: usize = 1024;
const READ_CHUNK_SIZE: usize = 1024;

/// Reads validated frames from any `Read` stream (serial port, socket, file).
///
/// Partial reads are buffered internally. A frame that fails validation is
/// returned as an error and dropped; the reader stays usable and the next
/// call continues with the following bytes.
pub struct FrameReader<R> {
    port: R,
    tokenizer: Tokenizer,
    config: FrameConfig,
}

impl<R: Read> FrameReader<R> {
    /// Reader using the default [`FrameConfig`] (CRC16).
    pub fn new(port: R) -> Self {
        Self::with_config(port, FrameConfig::default())
    }

    /// Reader using `config` for verification and the buffer limit.
    pub fn with_config(port: R, config: FrameConfig) -> Self {
        Self {
            port,
            tokenizer: Tokenizer::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Block until the next frame is complete and decode it.
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(token) = self.tokenizer.next() {
                return decode_frame(&token, self.config.verification);
            }

            if self.tokenizer.len() > self.config.max_buffered {
                let dropped = self.tokenizer.discard_stale();
                debug!(
                    dropped,
                    max_buffered = self.config.max_buffered,
                    "frame buffer limit exceeded, dropping stale bytes"
                );
            }

            let mut scratch = [0u8; READ_CHUNK_SIZE];
            match self.port.read(&mut scratch) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => self.tokenizer.append(&scratch[..n]),
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Bytes received but not yet part of a complete frame.
    pub fn buffered(&self) -> &[u8] {
        self.tokenizer.buffered()
    }

    /// The wrapped byte source.
    pub fn port(&self) -> &R {
        &self.port
    }

    /// Mutable access to the byte source, e.g. to change port timeouts.
    pub fn port_mut(&mut self) -> &mut R {
        &mut self.port
    }

    /// Unwrap the byte source. Buffered bytes are dropped.
    pub fn into_port(self) -> R {
        self.port
    }

    /// Verification mode and buffer limit in use.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame>;

    /// Yields frames and decode errors until the stream ends.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_frame() {
            Err(FrameError::ConnectionClosed) => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::checksum::Verification;
    use crate::codec::{Acknowledge, CommandInformation};
    use crate::command::Command;

    fn wire(frames: &[Frame]) -> Vec<u8> {
        frames.iter().flat_map(|f| f.to_bytes().to_vec()).collect()
    }

    #[test]
    fn read_single_frame() {
        let frame = Frame::new(Command::SetPrintHeight, vec![0x96]);
        let mut reader = FrameReader::new(Cursor::new(frame.to_bytes().to_vec()));
        assert_eq!(reader.read_frame().unwrap(), frame);
    }

    #[test]
    fn read_multiple_frames() {
        let frames = [
            Frame::request(Command::StartJet),
            Frame::request(Command::StartPrint),
            Frame::new(Command::SetReverseMessage, vec![0x01, 0x01]),
        ];
        let mut reader = FrameReader::new(Cursor::new(wire(&frames)));
        for expected in &frames {
            assert_eq!(&reader.read_frame().unwrap(), expected);
        }
        assert!(matches!(reader.read_frame(), Err(FrameError::ConnectionClosed)));
    }

    #[test]
    fn frame_arriving_byte_by_byte() {
        let frame = Frame::new(Command::SetTriggerRepeat, vec![0x7E]);
        let port = SlowPort::new(frame.to_bytes().to_vec(), 1);
        let mut reader = FrameReader::new(port);
        assert_eq!(reader.read_frame().unwrap(), frame);
    }

    #[test]
    fn noise_between_frames_is_skipped() {
        let a = Frame::request(Command::GetJetStatus);
        let b = Frame::request(Command::GetPrinterStatus);
        let mut bytes = vec![0x01, 0x7F, 0x02];
        bytes.extend_from_slice(&a.to_bytes());
        bytes.extend_from_slice(&[0x55, 0x55]);
        bytes.extend_from_slice(&b.to_bytes());

        let frames: Vec<Frame> = FrameReader::new(Cursor::new(bytes))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(frames, vec![a, b]);
    }

    #[test]
    fn invalid_frame_is_reported_and_skipped() {
        let mut corrupt = Frame::request(Command::StartPrint).to_bytes().to_vec();
        corrupt[13] ^= 0x01;
        let good = Frame::request(Command::StopPrint);
        let mut bytes = corrupt;
        bytes.extend_from_slice(&good.to_bytes());

        let mut reader = FrameReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.read_frame(),
            Err(FrameError::ChecksumMismatch { .. })
        ));
        assert_eq!(reader.read_frame().unwrap(), good);
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(reader.read_frame(), Err(FrameError::ConnectionClosed)));
    }

    #[test]
    fn connection_closed_mid_frame() {
        let wire = Frame::request(Command::StartPrint).to_bytes();
        let mut reader = FrameReader::new(Cursor::new(wire[..10].to_vec()));
        assert!(matches!(reader.read_frame(), Err(FrameError::ConnectionClosed)));
        assert_eq!(reader.buffered(), &wire[..10]);
    }

    #[test]
    fn respects_configured_verification() {
        let frame = Frame::request(Command::SetPhotocellMode)
            .with_information(CommandInformation::response(Acknowledge::Complete))
            .with_verification(Verification::Mod256);
        let config = FrameConfig {
            verification: Verification::Mod256,
            ..FrameConfig::default()
        };
        let mut reader = FrameReader::with_config(Cursor::new(frame.to_bytes().to_vec()), config);
        assert_eq!(reader.read_frame().unwrap(), frame);
    }

    #[test]
    fn stale_bytes_are_bounded() {
        let frame = Frame::request(Command::StartJet);
        let mut bytes = vec![0x7E];
        bytes.extend(std::iter::repeat(0x33).take(64));
        bytes.extend_from_slice(&frame.to_bytes());

        let config = FrameConfig {
            max_buffered: 32,
            ..FrameConfig::default()
        };
        let mut reader = FrameReader::with_config(SlowPort::new(bytes, 8), config);
        assert_eq!(reader.read_frame().unwrap(), frame);
    }

    #[test]
    fn interrupted_read_retries() {
        let frame = Frame::request(Command::TriggerPrint);
        let mut port = SlowPort::new(frame.to_bytes().to_vec(), 4);
        port.interrupt_next = true;
        let mut reader = FrameReader::new(port);
        assert_eq!(reader.read_frame().unwrap(), frame);
    }

    #[test]
    fn other_io_errors_propagate() {
        let mut reader = FrameReader::new(TimedOutPort);
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::TimedOut));
    }

    #[test]
    fn port_accessors() {
        let mut reader = FrameReader::new(Cursor::new(vec![0x7E, 0x00]));
        reader.port_mut().set_position(1);
        assert_eq!(reader.port().position(), 1);
        assert_eq!(reader.config().verification, Verification::Crc16);
        assert_eq!(reader.into_port().into_inner(), vec![0x7E, 0x00]);
    }

    /// Hands out at most `step` bytes per read, optionally failing the
    /// next read with `Interrupted` first.
    struct SlowPort {
        bytes: Vec<u8>,
        pos: usize,
        step: usize,
        interrupt_next: bool,
    }

    impl SlowPort {
        fn new(bytes: Vec<u8>, step: usize) -> Self {
            Self {
                bytes,
                pos: 0,
                step,
                interrupt_next: false,
            }
        }
    }

    impl Read for SlowPort {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if std::mem::take(&mut self.interrupt_next) {
                return Err(ErrorKind::Interrupted.into());
            }
            let n = self.step.min(buf.len()).min(self.bytes.len() - self.pos);
            buf[..n].copy_from_slice(&self.bytes[self.pos..][..n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct TimedOutPort;

    impl Read for TimedOutPort {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(ErrorKind::TimedOut.into())
        }
    }
}
