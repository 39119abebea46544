use crate::command::{Command, PayloadLength};

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The input is shorter than the smallest frame for the verification mode.
    #[error("frame too short ({len} bytes, min {min})")]
    FrameTooShort { len: usize, min: usize },

    /// The frame does not start with 0x7E or does not end with 0x7F.
    #[error("invalid frame delimiters (expected 0x7E ... 0x7F)")]
    BadDelimiter,

    /// The trailing checksum does not match the frame contents.
    #[error("checksum mismatch (received 0x{expected:04X}, calculated 0x{actual:04X})")]
    ChecksumMismatch { expected: u16, actual: u16 },

    /// The command code is not part of the protocol.
    #[error("unknown command code 0x{0:04X}")]
    UnknownCommand(u16),

    /// The data offset field is not the fixed header length.
    #[error("invalid data offset {0} (expected 12)")]
    BadDataOffset(u16),

    /// The acknowledge byte of the information block is not recognised.
    #[error("invalid acknowledge byte 0x{0:02X} in information block")]
    BadInformation(u8),

    /// The payload length disagrees with the command catalog.
    #[error("payload length mismatch for {command} (expected {expected}, got {actual})")]
    PayloadLengthMismatch {
        command: Command,
        expected: PayloadLength,
        actual: usize,
    },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
