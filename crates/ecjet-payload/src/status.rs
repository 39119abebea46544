//! Printer, jet and print head state.

use std::fmt;

use ecjet_frame::PayloadLength;

use crate::error::{Result, ValueError};
use crate::{fixed, PayloadValue};

/// One bit of the printer status warning mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Warning {
    /// Bit position in the little-endian 32-bit mask.
    pub bit: u8,
    pub name: &'static str,
    pub description: &'static str,
}

impl Warning {
    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }
}

/// Every warning the printer reports, by bit position.
///
/// The names and descriptions are provisional. They have not been checked
/// against printer firmware documentation, so treat them as labels for the
/// bit positions rather than a hardware reference. Bits outside this table
/// are kept in [`Warnings::unknown_bits`].
pub const WARNINGS: [Warning; 15] = [
    Warning {
        bit: 0,
        name: "ink low",
        description: "The ink cartridge is nearly empty. Replace it before the reservoir runs dry.",
    },
    Warning {
        bit: 1,
        name: "solvent low",
        description: "The solvent cartridge is nearly empty. Viscosity control stops once it runs out.",
    },
    Warning {
        bit: 2,
        name: "ink reservoir empty",
        description: "The ink reservoir level is below the minimum. The jet will be stopped to protect the pump.",
    },
    Warning {
        bit: 3,
        name: "viscosity high",
        description: "Ink viscosity is above the target. Solvent is being added; check the solvent supply if it persists.",
    },
    Warning {
        bit: 4,
        name: "viscosity low",
        description: "Ink viscosity is below the target. Usually caused by too much solvent; let the printer run to recover.",
    },
    Warning {
        bit: 5,
        name: "pressure low",
        description: "Jet pressure is below the set point. Check for blocked filters or a worn pump.",
    },
    Warning {
        bit: 6,
        name: "pressure high",
        description: "Jet pressure is above the set point. Check the nozzle for blockage.",
    },
    Warning {
        bit: 7,
        name: "phase fault",
        description: "Drop charge phase could not be detected. Clean the print head and check the modulation setting.",
    },
    Warning {
        bit: 8,
        name: "charge fault",
        description: "Drops are not being charged correctly. Clean the charge electrode.",
    },
    Warning {
        bit: 9,
        name: "high voltage fault",
        description: "The deflection high voltage tripped. Clean and dry the print head before restarting.",
    },
    Warning {
        bit: 10,
        name: "gutter fault",
        description: "Ink is not returning through the gutter. Check jet alignment and the gutter line.",
    },
    Warning {
        bit: 11,
        name: "print head temperature",
        description: "The print head heater is outside its operating range.",
    },
    Warning {
        bit: 12,
        name: "filter service due",
        description: "The main ink filter has reached its service interval.",
    },
    Warning {
        bit: 13,
        name: "pump service due",
        description: "The pump has reached its service interval.",
    },
    Warning {
        bit: 14,
        name: "product too fast",
        description: "A print was triggered before the previous one finished. Reduce line speed or shorten the message.",
    },
];

/// Warning bitmask from the printer status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Warnings(pub u32);

impl Warnings {
    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, warning: &Warning) -> bool {
        self.0 & warning.mask() != 0
    }

    /// The named warnings that are set.
    pub fn iter(self) -> impl Iterator<Item = &'static Warning> {
        WARNINGS.iter().filter(move |w| self.contains(w))
    }

    /// Set bits with no entry in [`WARNINGS`].
    pub fn unknown_bits(self) -> u32 {
        let known = WARNINGS.iter().fold(0u32, |mask, w| mask | w.mask());
        self.0 & !known
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no warnings");
        }
        let mut first = true;
        for warning in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(warning.name)?;
            first = false;
        }
        let unknown = self.unknown_bits();
        if unknown != 0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "unknown 0x{unknown:08X}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JetState {
    JetStop = 1,
    JetStart = 2,
    Printing = 4,
}

impl JetState {
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            1 => Ok(JetState::JetStop),
            2 => Ok(JetState::JetStart),
            4 => Ok(JetState::Printing),
            other => Err(ValueError::invalid(format!("unknown jet state {other}"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JetState::JetStop => "jet stopped",
            JetState::JetStart => "jet running",
            JetState::Printing => "printing",
        }
    }
}

/// Get-printer-status response: state byte + warning mask (u32 LE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrinterStatus {
    pub state: JetState,
    pub warnings: Warnings,
}

impl PayloadValue for PrinterStatus {
    const LEN: PayloadLength = PayloadLength::Exact(5);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [state, a, b, c, d] = fixed::<5>(bytes)?;
        Ok(Self {
            state: JetState::from_byte(state)?,
            warnings: Warnings(u32::from_le_bytes([a, b, c, d])),
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![self.state as u8];
        out.extend_from_slice(&self.warnings.0.to_le_bytes());
        out
    }
}

impl fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.state.name(), self.warnings)
    }
}

/// Get-jet-status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JetStatus {
    pub reference_pressure: u8,
    pub set_pressure: u8,
    pub read_pressure: u8,
    pub solvent_addition: u8,
    pub modulation: u8,
    pub phase: u8,
    pub reference_ink_speed: u16,
    pub ink_speed: u16,
}

impl PayloadValue for JetStatus {
    const LEN: PayloadLength = PayloadLength::Exact(10);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let b = fixed::<10>(bytes)?;
        Ok(Self {
            reference_pressure: b[0],
            set_pressure: b[1],
            read_pressure: b[2],
            solvent_addition: b[3],
            modulation: b[4],
            phase: b[5],
            reference_ink_speed: u16::from_le_bytes([b[6], b[7]]),
            ink_speed: u16::from_le_bytes([b[8], b[9]]),
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![
            self.reference_pressure,
            self.set_pressure,
            self.read_pressure,
            self.solvent_addition,
            self.modulation,
            self.phase,
        ];
        out.extend_from_slice(&self.reference_ink_speed.to_le_bytes());
        out.extend_from_slice(&self.ink_speed.to_le_bytes());
        out
    }
}

impl fmt::Display for JetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pressure ref {} set {} read {}, solvent {}, modulation {}, phase {}, ink speed {} (ref {})",
            self.reference_pressure,
            self.set_pressure,
            self.read_pressure,
            self.solvent_addition,
            self.modulation,
            self.phase,
            self.ink_speed,
            self.reference_ink_speed
        )
    }
}

/// Print head identification: 14 ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrintHeadCode(String);

impl PrintHeadCode {
    pub const WIDTH: usize = 14;

    pub fn new(code: &str) -> Result<Self> {
        if code.len() != Self::WIDTH || !code.is_ascii() {
            return Err(ValueError::invalid(format!(
                "print head code must be {} ASCII characters, got {code:?}",
                Self::WIDTH
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PayloadValue for PrintHeadCode {
    const LEN: PayloadLength = PayloadLength::Exact(Self::WIDTH);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = fixed::<{ PrintHeadCode::WIDTH }>(bytes)?;
        if !raw.is_ascii() {
            return Err(ValueError::invalid("print head code is not ASCII"));
        }
        Ok(Self(raw.iter().map(|&b| char::from(b)).collect()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

impl fmt::Display for PrintHeadCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printer_status_vector() {
        let status = PrinterStatus::from_bytes(&[0x01, 0x00, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(status.state, JetState::JetStop);
        assert!(status.warnings.is_empty());
        assert_eq!(status.to_string(), "jet stopped (no warnings)");
    }

    #[test]
    fn printer_status_rejects_unknown_state() {
        assert!(matches!(
            PrinterStatus::from_bytes(&[0x03, 0, 0, 0, 0]),
            Err(ValueError::EncodingValue(_))
        ));
    }

    #[test]
    fn warning_mask_is_little_endian() {
        let status = PrinterStatus::from_bytes(&[0x04, 0x01, 0x40, 0x00, 0x00]).unwrap();
        assert_eq!(status.state, JetState::Printing);
        let names: Vec<_> = status.warnings.iter().map(|w| w.name).collect();
        assert_eq!(names, ["ink low", "product too fast"]);
        assert_eq!(status.to_bytes(), [0x04, 0x01, 0x40, 0x00, 0x00]);
    }

    #[test]
    fn warning_table_is_complete() {
        for (i, warning) in WARNINGS.iter().enumerate() {
            assert_eq!(usize::from(warning.bit), i);
            assert!(!warning.name.is_empty());
            assert!(!warning.description.is_empty());
        }
        assert_eq!(Warnings(0x7FFF).iter().count(), 15);
        assert_eq!(Warnings(0x7FFF).unknown_bits(), 0);
    }

    #[test]
    fn unknown_warning_bits_are_kept() {
        let warnings = Warnings(0x8000_0002);
        assert_eq!(warnings.unknown_bits(), 0x8000_0000);
        assert_eq!(warnings.to_string(), "solvent low, unknown 0x80000000");
    }

    #[test]
    fn jet_status_vector() {
        let status =
            JetStatus::from_bytes(&[0xAA, 0xAA, 0x00, 0xAE, 0x83, 0x0C, 0x59, 0x52, 0x00, 0x00])
                .unwrap();
        assert_eq!(status.reference_pressure, 0xAA);
        assert_eq!(status.set_pressure, 0xAA);
        assert_eq!(status.read_pressure, 0x00);
        assert_eq!(status.solvent_addition, 0xAE);
        assert_eq!(status.modulation, 0x83);
        assert_eq!(status.phase, 0x0C);
        assert_eq!(status.reference_ink_speed, 0x5259);
        assert_eq!(status.ink_speed, 0);
        assert_eq!(
            status.to_bytes(),
            [0xAA, 0xAA, 0x00, 0xAE, 0x83, 0x0C, 0x59, 0x52, 0x00, 0x00]
        );
    }

    #[test]
    fn print_head_code_vector() {
        let code = PrintHeadCode::from_bytes(b"12108010001701").unwrap();
        assert_eq!(code.as_str(), "12108010001701");
        assert_eq!(PrintHeadCode::new("12108010001701").unwrap(), code);
    }

    #[test]
    fn print_head_code_width() {
        assert!(PrintHeadCode::new("1210801000170").is_err());
        assert!(PrintHeadCode::new("121080100017011").is_err());
        assert!(matches!(
            PrintHeadCode::from_bytes(b"123"),
            Err(ValueError::IncorrectByteCount { expected: 14, actual: 3 })
        ));
        assert!(PrintHeadCode::from_bytes(&[0xC3; 14]).is_err());
    }
}
