//! Font and message name tables.
//!
//! Names travel as fixed-width, NUL-padded ASCII fields. Font lists carry a
//! one-byte count and 16-byte names; message lists a little-endian u16 count
//! and 32-byte names.

use std::fmt;

use ecjet_frame::PayloadLength;

use crate::error::{Result, ValueError};
use crate::PayloadValue;

const RESERVED: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Clean a raw name field for display and file-system use.
///
/// The field is cut at the first NUL. Control and path-reserved characters
/// are removed and runs of whitespace collapse to one space.
pub fn sanitize(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let text = String::from_utf8_lossy(&raw[..end]);
    let kept: String = text
        .chars()
        .filter(|c| !c.is_control() && !RESERVED.contains(c))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn check_name(name: &str, width: usize) -> Result<()> {
    if name.len() > width {
        return Err(ValueError::invalid(format!(
            "name {name:?} is longer than {width} bytes"
        )));
    }
    if name.bytes().any(|b| b == 0 || !b.is_ascii()) {
        return Err(ValueError::invalid(format!(
            "name {name:?} must be ASCII without NUL"
        )));
    }
    Ok(())
}

fn pad_into(out: &mut Vec<u8>, name: &str, width: usize) {
    let start = out.len();
    out.extend_from_slice(name.as_bytes());
    out.resize(start + width, 0);
}

/// Split `bytes` into `count` fields of `width` bytes after a `prefix`-byte header.
fn decode_table(bytes: &[u8], prefix: usize, count: usize, width: usize) -> Result<Vec<String>> {
    let expected = prefix + count * width;
    if bytes.len() != expected {
        return Err(ValueError::IncorrectByteCount {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes[prefix..].chunks_exact(width).map(sanitize).collect())
}

/// Fonts installed on the printer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FontList {
    names: Vec<String>,
}

impl FontList {
    pub const NAME_WIDTH: usize = 16;

    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.len() > usize::from(u8::MAX) {
            return Err(ValueError::invalid(format!(
                "font list holds at most 255 names, got {}",
                names.len()
            )));
        }
        for name in &names {
            check_name(name, Self::NAME_WIDTH)?;
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl PayloadValue for FontList {
    const LEN: PayloadLength = PayloadLength::Variable;

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Some(&count) = bytes.first() else {
            return Err(ValueError::IncorrectByteCount {
                expected: 1,
                actual: 0,
            });
        };
        let names = decode_table(bytes, 1, usize::from(count), Self::NAME_WIDTH)?;
        Ok(Self { names })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.names.len() * Self::NAME_WIDTH);
        // Length is bounded by `new`.
        out.push(self.names.len() as u8);
        for name in &self.names {
            pad_into(&mut out, name, Self::NAME_WIDTH);
        }
        out
    }
}

impl fmt::Display for FontList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fonts: {}", self.names.len(), self.names.join(", "))
    }
}

/// Messages stored on the printer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MessageList {
    names: Vec<String>,
}

impl MessageList {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.len() > usize::from(u16::MAX) {
            return Err(ValueError::invalid(format!(
                "message list holds at most 65535 names, got {}",
                names.len()
            )));
        }
        for name in &names {
            check_name(name, MessageName::WIDTH)?;
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl PayloadValue for MessageList {
    const LEN: PayloadLength = PayloadLength::Variable;

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [lo, hi] = match bytes {
            [lo, hi, ..] => [*lo, *hi],
            _ => {
                return Err(ValueError::IncorrectByteCount {
                    expected: 2,
                    actual: bytes.len(),
                })
            }
        };
        let count = usize::from(u16::from_le_bytes([lo, hi]));
        let names = decode_table(bytes, 2, count, MessageName::WIDTH)?;
        Ok(Self { names })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.names.len() * MessageName::WIDTH);
        out.extend_from_slice(&(self.names.len() as u16).to_le_bytes());
        for name in &self.names {
            pad_into(&mut out, name, MessageName::WIDTH);
        }
        out
    }
}

impl fmt::Display for MessageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} messages: {}", self.names.len(), self.names.join(", "))
    }
}

/// Name of the message to select for printing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageName(String);

impl MessageName {
    pub const WIDTH: usize = 32;

    pub fn new(name: &str) -> Result<Self> {
        check_name(name, Self::WIDTH)?;
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PayloadValue for MessageName {
    const LEN: PayloadLength = PayloadLength::Exact(MessageName::WIDTH);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::WIDTH {
            return Err(ValueError::IncorrectByteCount {
                expected: Self::WIDTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(sanitize(bytes)))
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIDTH);
        pad_into(&mut out, &self.0, Self::WIDTH);
        out
    }
}

impl fmt::Display for MessageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONTS: [&str; 41] = [
        "5 HighCaps",
        "7 HighCapsI",
        "7 HighCaps",
        "7 Bengalese",
        "9 HighCaps",
        "9 Bengalese",
        "12 HighCapsR",
        "12 Bengalese",
        "12 HighCaps",
        "16 HighFull",
        "16 Bengalese",
        "16 HighCaps",
        "24 Bengalese",
        "24 HighFull",
        "24 HighCaps",
        "32 HighFull",
        "9 Chinese",
        "12 Chinese",
        "16 Chinese",
        "24 Chinese",
        "7 Arabic",
        "9 Arabic",
        "12 Arabic",
        "16 Arabic",
        "20 Arabic",
        "24 Arabic",
        "32 Arabic",
        "12 Korea",
        "16 Korea",
        "24 Korea",
        "7 Farsi",
        "9 Farsi",
        "12 Farsi",
        "15 Farsi",
        "16 Farsi",
        "21 Farsi",
        "9 ChineseF",
        "12 ChineseF",
        "16 ChineseF",
        "24 ChineseF",
        "7 Chinese",
    ];

    const MESSAGES: [&str; 7] = [
        "2000-Chuji_EN.nmk",
        "HighSpeed_16_1.nmk",
        "HighSpeed_16_2.nmk",
        "HighSpeed_16_3.nmk",
        "HighSpeed_5_1.nmk",
        "HighSpeed_5_2.nmk",
        "TEST.nmk",
    ];

    fn padded(names: &[&str], width: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for name in names {
            pad_into(&mut out, name, width);
        }
        out
    }

    #[test]
    fn decode_printer_font_list() {
        let mut bytes = vec![41];
        bytes.extend(padded(&FONTS, 16));
        assert_eq!(bytes.len(), 1 + 41 * 16);

        let fonts = FontList::from_bytes(&bytes).unwrap();
        assert_eq!(fonts.len(), 41);
        assert_eq!(fonts.names()[0], "5 HighCaps");
        assert_eq!(fonts.names()[40], "7 Chinese");
        assert_eq!(fonts.names(), FONTS);
        assert_eq!(fonts.to_bytes(), bytes);
    }

    #[test]
    fn decode_printer_message_list() {
        let mut bytes = vec![7, 0];
        bytes.extend(padded(&MESSAGES, 32));
        assert_eq!(bytes.len(), 226);

        let messages = MessageList::from_bytes(&bytes).unwrap();
        assert_eq!(messages.names(), MESSAGES);
        assert_eq!(messages.to_bytes(), bytes);
    }

    #[test]
    fn count_must_match_payload() {
        let mut bytes = vec![2];
        bytes.extend(padded(&FONTS[..1], 16));
        assert!(matches!(
            FontList::from_bytes(&bytes),
            Err(ValueError::IncorrectByteCount { expected: 33, actual: 17 })
        ));
        assert!(matches!(
            FontList::from_bytes(&[]),
            Err(ValueError::IncorrectByteCount { expected: 1, actual: 0 })
        ));
        assert!(matches!(
            MessageList::from_bytes(&[1]),
            Err(ValueError::IncorrectByteCount { expected: 2, actual: 1 })
        ));
        assert!(MessageList::from_bytes(&[0, 0]).unwrap().is_empty());
    }

    #[test]
    fn sanitize_cleans_names() {
        assert_eq!(sanitize(b"My:Msg\t\x01  A\0garbage"), "MyMsg A");
        assert_eq!(sanitize(b"  a/b\\c*d?e\"f<g>h|i  "), "abcdefghi");
        assert_eq!(sanitize(b"line\r\nbreak"), "linebreak");
        assert_eq!(sanitize(b"\0\0\0"), "");
    }

    #[test]
    fn full_width_name_has_no_terminator() {
        let name = "ABCDEFGHIJKLMNOP";
        let mut bytes = vec![1];
        bytes.extend_from_slice(name.as_bytes());
        assert_eq!(FontList::from_bytes(&bytes).unwrap().names(), [name]);
    }

    #[test]
    fn constructors_validate_names() {
        assert!(FontList::new(vec!["ABCDEFGHIJKLMNOPQ".into()]).is_err());
        assert!(FontList::new(vec!["nul\0".into()]).is_err());
        assert!(FontList::new(vec![String::new(); 256]).is_err());
        assert!(MessageName::new(&"x".repeat(33)).is_err());
        assert!(MessageName::new("caf\u{e9}").is_err());
    }

    #[test]
    fn message_name_is_padded() {
        let name = MessageName::new("TEST.nmk").unwrap();
        let bytes = name.to_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..8], b"TEST.nmk");
        assert!(bytes[8..].iter().all(|&b| b == 0));
        assert_eq!(MessageName::from_bytes(&bytes).unwrap(), name);
        assert!(MessageName::from_bytes(&bytes[..31]).is_err());
    }
}
