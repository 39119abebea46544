//! Fixed-point distances: print width, print delay and print interval.
//!
//! A distance is a little-endian mixed-radix number with one byte per tier
//! followed by a tag byte (always 1 when encoding):
//!
//! ```text
//! byte 0 × 0.001 mm + byte 1 × 0.256 mm + byte 2 × 65.536 mm + byte 3 × 16777.216 mm
//! ```
//!
//! Every tier is 256 times the previous one, so the value is quantized to whole
//! micrometres first and split with integer arithmetic. Print width only has
//! the first two tiers.

use std::fmt;

use ecjet_frame::PayloadLength;

use crate::error::{Result, ValueError};
use crate::{fixed, PayloadValue};

/// Tag byte written after the tiers.
pub const DISTANCE_TAG: u8 = 1;

/// Quantize millimetres to micrometres, rounding half away from zero.
fn to_micrometres(mm: f64) -> Result<u64> {
    if !mm.is_finite() || mm < 0.0 {
        return Err(ValueError::invalid(format!(
            "distance must be a non-negative finite number of millimetres, got {mm}"
        )));
    }
    let um = (mm * 1000.0).round();
    if um >= u64::MAX as f64 {
        return Err(ValueError::invalid(format!("distance {mm} mm is out of range")));
    }
    Ok(um as u64)
}

/// Split micrometres into `N` tiers plus the tag. Each tier is reduced mod 256.
fn encode_tiers<const N: usize>(um: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(N + 1);
    for tier in 0..N {
        out.push(((um >> (8 * tier)) & 0xFF) as u8);
    }
    out.push(DISTANCE_TAG);
    out
}

fn decode_tiers(tiers: &[u8]) -> u64 {
    tiers
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Print width, two tiers + tag. Limited to less than 65.536 mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrintWidth([u8; 3]);

impl PrintWidth {
    /// Largest encodable width, exclusive.
    pub const LIMIT_MM: f64 = 256.0 * 0.256;

    /// Widths below the limit that round up to it encode as the largest
    /// representable width, 65.535 mm.
    pub fn from_mm(mm: f64) -> Result<Self> {
        if mm >= Self::LIMIT_MM {
            return Err(ValueError::invalid(format!(
                "print width {mm} mm must be below {} mm",
                Self::LIMIT_MM
            )));
        }
        let um = to_micrometres(mm)?.min(0xFFFF);
        let bytes = encode_tiers::<2>(um);
        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }

    pub fn micrometres(&self) -> u64 {
        decode_tiers(&self.0[..2])
    }

    pub fn mm(&self) -> f64 {
        self.micrometres() as f64 / 1000.0
    }
}

impl PayloadValue for PrintWidth {
    const LEN: PayloadLength = PayloadLength::Exact(3);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        fixed(bytes).map(Self)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl fmt::Display for PrintWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}mm", self.mm())
    }
}

macro_rules! long_distance {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; 5]);

        impl $name {
            pub fn from_mm(mm: f64) -> Result<Self> {
                let bytes = encode_tiers::<4>(to_micrometres(mm)?);
                Ok(Self([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]))
            }

            pub fn micrometres(&self) -> u64 {
                decode_tiers(&self.0[..4])
            }

            pub fn mm(&self) -> f64 {
                self.micrometres() as f64 / 1000.0
            }
        }

        impl PayloadValue for $name {
            const LEN: PayloadLength = PayloadLength::Exact(5);

            fn from_bytes(bytes: &[u8]) -> Result<Self> {
                fixed(bytes).map(Self)
            }

            fn to_bytes(&self) -> Vec<u8> {
                self.0.to_vec()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.2}mm", self.mm())
            }
        }
    };
}

long_distance! {
    /// Delay between the trigger and the start of printing, four tiers + tag.
    PrintDelay
}

long_distance! {
    /// Distance between repeated prints, four tiers + tag.
    PrintInterval
}
