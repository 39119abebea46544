//! Wire framing for the ECJet continuous inkjet printer protocol.
//!
//! Every message travels as:
//! - a `0x7E` start byte
//! - a 12-byte header (address, command, data offset, information block)
//! - the command payload
//! - an optional checksum (none, mod256 or CRC-16/X-25)
//! - a `0x7F` end byte
//!
//! Everything between the delimiters is byte-stuffed. The [`Tokenizer`]
//! recovers frame boundaries from a raw stream and [`decode_frame`] validates
//! each candidate against the [`Command`] catalog.

pub mod checksum;
pub mod codec;
pub mod command;
pub mod error;
pub mod reader;
pub mod stuffing;
pub mod tokenizer;
pub mod writer;

#[cfg(feature = "async")]
pub mod async_codec;

#[cfg(feature = "async")]
pub use async_codec::EcjetCodec;
pub use checksum::{crc16_x25, mod256, Verification};
pub use codec::{
    decode_frame, encode_frame, Acknowledge, CommandInformation, CommandStatus, Frame, FrameConfig,
    DATA_OFFSET, DEFAULT_MAX_BUFFERED, HEADER_SIZE,
};
pub use command::{Command, PayloadLength};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use tokenizer::{scan, Scan, Tokenizer};
pub use writer::FrameWriter;
