//! Remote buffer: text pushed into a remote field of the current message.

use std::fmt;

use ecjet_frame::PayloadLength;

use crate::error::{Result, ValueError};
use crate::{fixed, PayloadValue};

/// Download-remote-buffer payload: a u16 LE byte length followed by UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RemoteBuffer(String);

impl RemoteBuffer {
    pub fn new(text: &str) -> Result<Self> {
        if text.len() > usize::from(u16::MAX) {
            return Err(ValueError::invalid(format!(
                "remote buffer holds at most {} bytes, got {}",
                u16::MAX,
                text.len()
            )));
        }
        Ok(Self(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PayloadValue for RemoteBuffer {
    const LEN: PayloadLength = PayloadLength::Variable;

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Some((prefix, text)) = bytes.split_first_chunk::<2>() else {
            return Err(ValueError::IncorrectByteCount {
                expected: 2,
                actual: bytes.len(),
            });
        };
        let declared = usize::from(u16::from_le_bytes(*prefix));
        if declared != text.len() {
            return Err(ValueError::IncorrectByteCount {
                expected: 2 + declared,
                actual: bytes.len(),
            });
        }
        let text = std::str::from_utf8(text)
            .map_err(|err| ValueError::invalid(format!("remote buffer is not UTF-8: {err}")))?;
        Ok(Self(text.to_owned()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.0.len());
        // Length is bounded by `new`.
        out.extend_from_slice(&(self.0.len() as u16).to_le_bytes());
        out.extend_from_slice(self.0.as_bytes());
        out
    }
}

impl fmt::Display for RemoteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Capacity of the printer's remote buffer in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoteBufferSize(pub u32);

impl PayloadValue for RemoteBufferSize {
    const LEN: PayloadLength = PayloadLength::Exact(4);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        fixed::<4>(bytes).map(|raw| Self(u32::from_le_bytes(raw)))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_le_bytes().to_vec()
    }
}

impl fmt::Display for RemoteBufferSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_then_text() {
        let buffer = RemoteBuffer::new("1234567890").unwrap();
        assert_eq!(
            buffer.to_bytes(),
            [0x0A, 0x00, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x30]
        );
        assert_eq!(RemoteBuffer::from_bytes(&buffer.to_bytes()).unwrap(), buffer);
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(RemoteBuffer::from_bytes(&[0, 0]).unwrap().as_str(), "");
        assert_eq!(RemoteBuffer::default().to_bytes(), [0, 0]);
    }

    #[test]
    fn prefix_must_match_text() {
        assert!(matches!(
            RemoteBuffer::from_bytes(&[3, 0, b'a']),
            Err(ValueError::IncorrectByteCount { expected: 5, actual: 3 })
        ));
        assert!(matches!(
            RemoteBuffer::from_bytes(&[1]),
            Err(ValueError::IncorrectByteCount { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn multibyte_text_counts_bytes() {
        let buffer = RemoteBuffer::new("Lot Nº5").unwrap();
        let bytes = buffer.to_bytes();
        assert_eq!(bytes[0], 8);
        assert_eq!(RemoteBuffer::from_bytes(&bytes).unwrap().as_str(), "Lot Nº5");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert!(matches!(
            RemoteBuffer::from_bytes(&[2, 0, 0xC3, 0x28]),
            Err(ValueError::EncodingValue(_))
        ));
    }

    #[test]
    fn oversized_text_is_rejected() {
        assert!(RemoteBuffer::new(&"x".repeat(65_536)).is_err());
        assert!(RemoteBuffer::new(&"x".repeat(65_535)).is_ok());
    }

    #[test]
    fn buffer_size_is_little_endian() {
        let size = RemoteBufferSize::from_bytes(&[0x00, 0x04, 0x00, 0x00]).unwrap();
        assert_eq!(size, RemoteBufferSize(1024));
        assert_eq!(size.to_string(), "1024 bytes");
        assert!(RemoteBufferSize::from_bytes(&[1, 2]).is_err());
    }
}
