use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::checksum::Verification;
use crate::command::Command;
use crate::error::{FrameError, Result};
use crate::stuffing::{self, END, START};

/// Header: address (1) + command (2) + data offset (2) + information (7) = 12 bytes.
pub const HEADER_SIZE: usize = 12;

/// The data offset field always carries the header length.
pub const DATA_OFFSET: u16 = HEADER_SIZE as u16;

/// Information block size.
pub const INFORMATION_SIZE: usize = 7;

/// Default ceiling on bytes buffered while waiting for a frame end: 16 000 bytes.
pub const DEFAULT_MAX_BUFFERED: usize = 16_000;

/// Acknowledge byte of the information block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acknowledge {
    /// Request sent by the host, not acknowledged yet.
    FromPc = 0x00,
    /// The printer processed the frame.
    Complete = 0x06,
    /// The printer rejected the frame.
    FrameError = 0x15,
}

impl Acknowledge {
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(Acknowledge::FromPc),
            0x06 => Ok(Acknowledge::Complete),
            0x15 => Ok(Acknowledge::FrameError),
            other => Err(FrameError::BadInformation(other)),
        }
    }

    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Acknowledge::FromPc => "from pc",
            Acknowledge::Complete => "complete",
            Acknowledge::FrameError => "frame error",
        }
    }
}

impl std::fmt::Display for Acknowledge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Interpretation of the status code carried in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandStatus {
    Success,
    Failed,
    NotImplemented,
    ParameterError,
    JetNotRunning,
    PrinterBusy,
    Other(u16),
}

impl From<u16> for CommandStatus {
    fn from(code: u16) -> Self {
        match code {
            0 => CommandStatus::Success,
            1 => CommandStatus::Failed,
            2 => CommandStatus::NotImplemented,
            4 => CommandStatus::ParameterError,
            8 => CommandStatus::JetNotRunning,
            10 => CommandStatus::PrinterBusy,
            other => CommandStatus::Other(other),
        }
    }
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandStatus::Success => f.write_str("success"),
            CommandStatus::Failed => f.write_str("failed"),
            CommandStatus::NotImplemented => f.write_str("not implemented"),
            CommandStatus::ParameterError => f.write_str("parameter error"),
            CommandStatus::JetNotRunning => f.write_str("jet not running"),
            CommandStatus::PrinterBusy => f.write_str("printer busy"),
            CommandStatus::Other(code) => write!(f, "status {code}"),
        }
    }
}

/// The 7-byte information block following the data offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandInformation {
    pub acknowledge: Acknowledge,
    /// Sequence number.
    pub nr: u16,
    pub device_status: u16,
    pub status: u16,
}

impl CommandInformation {
    /// The all-zero block carried by host requests.
    pub const FROM_PC: CommandInformation = CommandInformation {
        acknowledge: Acknowledge::FromPc,
        nr: 0,
        device_status: 0,
        status: 0,
    };

    /// A response block with the given acknowledge and zeroed counters.
    pub const fn response(acknowledge: Acknowledge) -> Self {
        Self {
            acknowledge,
            nr: 0,
            device_status: 0,
            status: 0,
        }
    }

    pub fn from_bytes(bytes: [u8; INFORMATION_SIZE]) -> Result<Self> {
        Ok(Self {
            acknowledge: Acknowledge::from_byte(bytes[0])?,
            nr: u16::from_le_bytes([bytes[1], bytes[2]]),
            device_status: u16::from_le_bytes([bytes[3], bytes[4]]),
            status: u16::from_le_bytes([bytes[5], bytes[6]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; INFORMATION_SIZE] {
        let [nr_lo, nr_hi] = self.nr.to_le_bytes();
        let [dev_lo, dev_hi] = self.device_status.to_le_bytes();
        let [st_lo, st_hi] = self.status.to_le_bytes();
        [
            self.acknowledge.as_byte(),
            nr_lo,
            nr_hi,
            dev_lo,
            dev_hi,
            st_lo,
            st_hi,
        ]
    }

    /// A block is a host request iff every byte is zero.
    pub fn from_pc(&self) -> bool {
        self.to_bytes().iter().all(|&b| b == 0)
    }

    pub fn command_status(&self) -> CommandStatus {
        CommandStatus::from(self.status)
    }
}

impl Default for CommandInformation {
    fn default() -> Self {
        Self::FROM_PC
    }
}

/// One protocol message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Device/bus address. 0 is the default.
    pub address: u8,
    pub command: Command,
    pub information: CommandInformation,
    /// Command payload.
    pub data: Bytes,
    /// Checksum mode used to produce/validate the trailing checksum.
    pub verification: Verification,
}

impl Frame {
    /// A request frame: address 0, from-PC information, CRC16.
    pub fn new(command: Command, data: impl Into<Bytes>) -> Self {
        Self {
            address: 0,
            command,
            information: CommandInformation::FROM_PC,
            data: data.into(),
            verification: Verification::Crc16,
        }
    }

    /// A request frame with no payload.
    pub fn request(command: Command) -> Self {
        Self::new(command, Bytes::new())
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_information(mut self, information: CommandInformation) -> Self {
        self.information = information;
        self
    }

    pub fn with_verification(mut self, verification: Verification) -> Self {
        self.verification = verification;
        self
    }

    /// Always [`DATA_OFFSET`] for a valid frame.
    pub fn data_offset(&self) -> u16 {
        DATA_OFFSET
    }

    /// True for host requests, false for printer responses.
    pub fn is_request(&self) -> bool {
        self.information.from_pc()
    }

    /// Serialize to wire bytes.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::new();
        encode_frame(self, &mut dst);
        dst.freeze()
    }

    /// The total wire size of this frame, stuffing included.
    pub fn wire_size(&self) -> usize {
        stuffing::escaped_len(&self.body()) + 2
    }

    /// Parse wire bytes.
    pub fn from_bytes(bytes: &[u8], verification: Verification) -> Result<Self> {
        decode_frame(bytes, verification)
    }

    /// Unstuffed body: header, payload and checksum.
    fn body(&self) -> Vec<u8> {
        let mut body =
            Vec::with_capacity(HEADER_SIZE + self.data.len() + self.verification.checksum_len());
        body.push(self.address);
        body.put_u16_le(self.command.code());
        body.put_u16_le(DATA_OFFSET);
        body.extend_from_slice(&self.information.to_bytes());
        body.extend_from_slice(&self.data);
        match self.verification {
            Verification::None => {}
            Verification::Mod256 => {
                let sum = crate::checksum::mod256(&body);
                body.push(sum);
            }
            Verification::Crc16 => {
                let crc = crate::checksum::crc16_x25(&body);
                body.put_u16_le(crc);
            }
        }
        body
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────┬──────┬───────────┬───────────┬──────────┬─────────┬───────────┬──────┐
/// │ 0x7E │ ADDR │ CMD (2 LE)│ 0x0C 0x00 │ INFO (7) │ DATA(n) │ CHK (0-2) │ 0x7F │
/// └──────┴──────┴───────────┴───────────┴──────────┴─────────┴───────────┴──────┘
/// ```
///
/// Everything between the delimiters is byte-stuffed after the checksum is
/// appended.
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) {
    let body = frame.body();
    let mut stuffed = Vec::with_capacity(stuffing::escaped_len(&body) + 2);
    stuffed.push(START);
    stuffing::escape_into(&body, &mut stuffed);
    stuffed.push(END);
    dst.reserve(stuffed.len());
    dst.put_slice(&stuffed);
}

/// Decode one complete delimited frame.
///
/// `bytes` must span exactly one frame, from the start byte to the end byte,
/// as produced by [`crate::Tokenizer`].
pub fn decode_frame(bytes: &[u8], verification: Verification) -> Result<Frame> {
    let result = parse(bytes, verification);
    if let Err(err) = &result {
        debug!(error = %err, len = bytes.len(), %verification, "rejected frame");
    }
    result
}

fn parse(bytes: &[u8], verification: Verification) -> Result<Frame> {
    let min = verification.min_frame_len();
    if bytes.len() < min {
        return Err(FrameError::FrameTooShort {
            len: bytes.len(),
            min,
        });
    }

    let interior = match bytes {
        [START, interior @ .., END] => interior,
        _ => return Err(FrameError::BadDelimiter),
    };

    let body = stuffing::unescape(interior);
    // Unstuffing shrinks the body; re-check before slicing.
    if body.len() < HEADER_SIZE + verification.checksum_len() {
        return Err(FrameError::FrameTooShort {
            len: body.len() + 2,
            min,
        });
    }

    let (content, provided) = body.split_at(body.len() - verification.checksum_len());
    match verification {
        Verification::None => {}
        Verification::Mod256 => {
            let expected = u16::from(provided[0]);
            let actual = verification.compute(content);
            if expected != actual {
                return Err(FrameError::ChecksumMismatch { expected, actual });
            }
        }
        Verification::Crc16 => {
            let expected = u16::from_le_bytes([provided[0], provided[1]]);
            let actual = verification.compute(content);
            if expected != actual {
                return Err(FrameError::ChecksumMismatch { expected, actual });
            }
        }
    }

    let address = content[0];
    let command = Command::from_code(u16::from_le_bytes([content[1], content[2]]))?;
    let data_offset = u16::from_le_bytes([content[3], content[4]]);
    if data_offset != DATA_OFFSET {
        return Err(FrameError::BadDataOffset(data_offset));
    }
    let mut info = [0u8; INFORMATION_SIZE];
    info.copy_from_slice(&content[5..HEADER_SIZE]);
    let information = CommandInformation::from_bytes(info)?;

    let data = &content[HEADER_SIZE..];
    let expected = command.expected_len(information.from_pc());
    if !expected.accepts(data.len()) {
        return Err(FrameError::PayloadLengthMismatch {
            command,
            expected,
            actual: data.len(),
        });
    }

    Ok(Frame {
        address,
        command,
        information,
        data: Bytes::copy_from_slice(data),
        verification,
    })
}

/// Configuration for the frame reader, writer and async codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Checksum mode of the link. Default: CRC16.
    pub verification: Verification,
    /// Maximum bytes held while waiting for a frame end. Default: 16 000.
    pub max_buffered: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            verification: Verification::Crc16,
            max_buffered: DEFAULT_MAX_BUFFERED,
        }
    }
}
