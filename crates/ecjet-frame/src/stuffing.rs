//! Byte stuffing for the frame body.
//!
//! The three reserved values never appear literally between the outer
//! delimiters. Each is replaced by [`ESCAPE`] followed by the value XOR 0x20:
//!
//! ```text
//! 0x7D -> 0x7D 0x5D
//! 0x7E -> 0x7D 0x5E
//! 0x7F -> 0x7D 0x5F
//! ```

/// Frame start delimiter.
pub const START: u8 = 0x7E;

/// Frame end delimiter.
pub const END: u8 = 0x7F;

/// Escape lead byte.
pub const ESCAPE: u8 = 0x7D;

const ESCAPED_ESCAPE: u8 = 0x5D;
const ESCAPED_START: u8 = 0x5E;
const ESCAPED_END: u8 = 0x5F;

/// Returns true for the bytes that must be escaped inside a frame body.
pub fn is_reserved(byte: u8) -> bool {
    matches!(byte, ESCAPE | START | END)
}

/// Length of `bytes` once escaped.
pub fn escaped_len(bytes: &[u8]) -> usize {
    bytes.len() + bytes.iter().filter(|&&b| is_reserved(b)).count()
}

/// Escape every reserved byte of `bytes`.
///
/// Single forward pass into a fresh buffer, so an inserted `0x7D` is never
/// looked at again.
pub fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(escaped_len(bytes));
    escape_into(bytes, &mut out);
    out
}

pub(crate) fn escape_into(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        match b {
            ESCAPE => out.extend_from_slice(&[ESCAPE, ESCAPED_ESCAPE]),
            START => out.extend_from_slice(&[ESCAPE, ESCAPED_START]),
            END => out.extend_from_slice(&[ESCAPE, ESCAPED_END]),
            _ => out.push(b),
        }
    }
}

/// Reverse [`escape`].
///
/// Walks the input from the end, collapsing each matched pair. Escape
/// sequences that are not one of the three known pairs are left untouched.
pub fn unescape(bytes: &[u8]) -> Vec<u8> {
    let mut reversed = Vec::with_capacity(bytes.len());
    let mut i = bytes.len();
    while i > 0 {
        let b = bytes[i - 1];
        let lead = if i >= 2 { Some(bytes[i - 2]) } else { None };
        let original = match (lead, b) {
            (Some(ESCAPE), ESCAPED_ESCAPE) => Some(ESCAPE),
            (Some(ESCAPE), ESCAPED_START) => Some(START),
            (Some(ESCAPE), ESCAPED_END) => Some(END),
            _ => None,
        };
        match original {
            Some(value) => {
                reversed.push(value);
                i -= 2;
            }
            None => {
                reversed.push(b);
                i -= 1;
            }
        }
    }
    reversed.reverse();
    reversed
}
