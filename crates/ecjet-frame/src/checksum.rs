//! Frame integrity checks.
//!
//! Both algorithms run over the unstuffed bytes from the address up to the
//! end of the payload, i.e. excluding the delimiters and the checksum itself.

/// Reflected form of the CRC-16 polynomial 0x1021.
const CRC16_X25_POLY: u16 = 0x8408;

/// Checksum mode used by a link. It is not transmitted, both ends agree on it
/// out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verification {
    /// No trailing checksum.
    None,
    /// One byte: wrapping sum of all bytes.
    Mod256,
    /// Two bytes (low first): CRC-16/X-25.
    #[default]
    Crc16,
}

impl Verification {
    /// Number of checksum bytes appended to the frame body.
    pub const fn checksum_len(self) -> usize {
        match self {
            Verification::None => 0,
            Verification::Mod256 => 1,
            Verification::Crc16 => 2,
        }
    }

    /// Smallest possible wire frame: delimiters + 12 byte header + checksum.
    pub const fn min_frame_len(self) -> usize {
        2 + crate::codec::HEADER_SIZE + self.checksum_len()
    }

    /// Compute the checksum of `bytes` for this mode, widened to 16 bits.
    pub fn compute(self, bytes: &[u8]) -> u16 {
        match self {
            Verification::None => 0,
            Verification::Mod256 => u16::from(mod256(bytes)),
            Verification::Crc16 => crc16_x25(bytes),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Verification::None => "none",
            Verification::Mod256 => "mod256",
            Verification::Crc16 => "crc16",
        }
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sum of all bytes, wrapping on overflow.
pub fn mod256(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// CRC-16/X-25: init 0xFFFF, reflected input and output, xor-out 0xFFFF.
pub fn crc16_x25(bytes: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in bytes {
        crc ^= u16::from(byte);
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ CRC16_X25_POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc16_reference_vector() {
        let data = [0x00, 0x16, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(crc16_x25(&data), 0xA4C3);
    }

    #[test]
    fn crc16_check_value() {
        // Catalogued check value for CRC-16/X-25.
        assert_eq!(crc16_x25(b"123456789"), 0x906E);
    }

    #[test]
    fn crc16_of_empty_input() {
        assert_eq!(crc16_x25(&[]), 0x0000);
    }

    #[test]
    fn mod256_wraps_instead_of_saturating() {
        assert_eq!(mod256(&[]), 0);
        assert_eq!(mod256(&[0x01, 0x02, 0x03]), 0x06);
        assert_eq!(mod256(&[0xFF, 0x02]), 0x01);
        assert_eq!(mod256(&[0x80; 4]), 0x00);
    }

    #[test]
    fn mod256_depends_on_input() {
        assert_ne!(mod256(&[0x00, 0x18]), mod256(&[0x00, 0x19]));
    }

    #[test]
    fn min_frame_lengths() {
        assert_eq!(Verification::None.min_frame_len(), 14);
        assert_eq!(Verification::Mod256.min_frame_len(), 15);
        assert_eq!(Verification::Crc16.min_frame_len(), 16);
    }

    #[test]
    fn compute_dispatches_on_mode() {
        let data = [0x00, 0x18, 0x00, 0x0C];
        assert_eq!(Verification::None.compute(&data), 0);
        assert_eq!(Verification::Mod256.compute(&data), 0x24);
        assert_eq!(Verification::Crc16.compute(&data), crc16_x25(&data));
    }
}
