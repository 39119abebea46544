//! Single-field printer settings.

use std::fmt;

use ecjet_frame::PayloadLength;

use crate::error::{Result, ValueError};
use crate::{fixed, PayloadValue};

/// Character height. The raw byte is taken as millimetres directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrintHeight(u8);

impl PrintHeight {
    /// Range accepted by the printer when setting the height.
    pub const RANGE: std::ops::RangeInclusive<u8> = 110..=230;

    pub fn new(mm: u8) -> Result<Self> {
        if !Self::RANGE.contains(&mm) {
            return Err(ValueError::invalid(format!(
                "print height {mm} is outside {}..={}",
                Self::RANGE.start(),
                Self::RANGE.end()
            )));
        }
        Ok(Self(mm))
    }

    pub fn raw(&self) -> u8 {
        self.0
    }

    pub fn mm(&self) -> f64 {
        f64::from(self.0)
    }
}

impl PayloadValue for PrintHeight {
    const LEN: PayloadLength = PayloadLength::Exact(1);

    /// Accepts any byte; the range only applies to values being set.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [raw] = fixed::<1>(bytes)?;
        Ok(Self(raw))
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![self.0]
    }
}

impl fmt::Display for PrintHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}mm", self.mm())
    }
}

/// Which counter a print count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountType {
    /// Lifetime count of the print head.
    Total = 0,
    /// Count for the message being printed.
    PrintingData = 1,
    /// Count for the message being edited.
    EditingData = 2,
}

impl CountType {
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(CountType::Total),
            1 => Ok(CountType::PrintingData),
            2 => Ok(CountType::EditingData),
            other => Err(ValueError::invalid(format!("unknown count type {other}"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CountType::Total => "total",
            CountType::PrintingData => "printing data",
            CountType::EditingData => "editing data",
        }
    }
}

/// The get-print-count request carries only the count type.
impl PayloadValue for CountType {
    const LEN: PayloadLength = PayloadLength::Exact(1);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [byte] = fixed::<1>(bytes)?;
        Self::from_byte(byte)
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![*self as u8]
    }
}

impl fmt::Display for CountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Count type tag followed by the count, u32 little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrintCount {
    pub count_type: CountType,
    pub count: u32,
}

impl PrintCount {
    pub fn new(count_type: CountType, count: u32) -> Self {
        Self { count_type, count }
    }

    /// Decode the 4-byte get-print-count response. It omits the tag, so the
    /// caller supplies the type it asked for.
    pub fn from_response(count_type: CountType, bytes: &[u8]) -> Result<Self> {
        let count = u32::from_le_bytes(fixed(bytes)?);
        Ok(Self { count_type, count })
    }
}

impl PayloadValue for PrintCount {
    const LEN: PayloadLength = PayloadLength::Exact(5);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [tag, a, b, c, d] = fixed::<5>(bytes)?;
        Ok(Self {
            count_type: CountType::from_byte(tag)?,
            count: u32::from_le_bytes([a, b, c, d]),
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![self.count_type as u8];
        out.extend_from_slice(&self.count.to_le_bytes());
        out
    }
}

impl fmt::Display for PrintCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.count, self.count_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Normal = 0,
    Flipped = 1,
}

impl Orientation {
    fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Orientation::Normal),
            1 => Ok(Orientation::Flipped),
            other => Err(ValueError::invalid(format!("orientation flag must be 0 or 1, got {other}"))),
        }
    }

    pub fn is_flipped(self) -> bool {
        self == Orientation::Flipped
    }
}

/// Mirror flags: byte 0 vertical, byte 1 horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReverseMessage {
    pub vertical: Orientation,
    pub horizontal: Orientation,
}

impl ReverseMessage {
    pub fn new(vertical: Orientation, horizontal: Orientation) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl PayloadValue for ReverseMessage {
    const LEN: PayloadLength = PayloadLength::Exact(2);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [vertical, horizontal] = fixed::<2>(bytes)?;
        Ok(Self {
            vertical: Orientation::from_byte(vertical)?,
            horizontal: Orientation::from_byte(horizontal)?,
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![self.vertical as u8, self.horizontal as u8]
    }
}

impl fmt::Display for ReverseMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |o: Orientation| if o.is_flipped() { "flipped" } else { "normal" };
        write!(
            f,
            "vertical {}, horizontal {}",
            flag(self.vertical),
            flag(self.horizontal)
        )
    }
}

/// Number of prints per trigger, at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerRepeat(u8);

impl TriggerRepeat {
    pub fn new(count: u8) -> Result<Self> {
        if count == 0 {
            return Err(ValueError::invalid("trigger repeat must be at least 1"));
        }
        Ok(Self(count))
    }

    pub fn count(&self) -> u8 {
        self.0
    }
}

impl PayloadValue for TriggerRepeat {
    const LEN: PayloadLength = PayloadLength::Exact(1);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [count] = fixed::<1>(bytes)?;
        Self::new(count)
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![self.0]
    }
}

impl fmt::Display for TriggerRepeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Print trigger source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotocellMode {
    Off = 0,
    Photocell = 1,
    Continuous = 2,
    Remote = 3,
}

impl PhotocellMode {
    pub fn name(self) -> &'static str {
        match self {
            PhotocellMode::Off => "off",
            PhotocellMode::Photocell => "photocell",
            PhotocellMode::Continuous => "continuous",
            PhotocellMode::Remote => "remote",
        }
    }
}

impl PayloadValue for PhotocellMode {
    const LEN: PayloadLength = PayloadLength::Exact(1);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match fixed::<1>(bytes)? {
            [0] => Ok(PhotocellMode::Off),
            [1] => Ok(PhotocellMode::Photocell),
            [2] => Ok(PhotocellMode::Continuous),
            [3] => Ok(PhotocellMode::Remote),
            [other] => Err(ValueError::invalid(format!("unknown photocell mode {other}"))),
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![*self as u8]
    }
}

impl fmt::Display for PhotocellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! raw_setting {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u8);

        impl PayloadValue for $name {
            const LEN: PayloadLength = PayloadLength::Exact(1);

            fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let [raw] = fixed::<1>(bytes)?;
                Ok(Self(raw))
            }

            fn to_bytes(&self) -> Vec<u8> {
                vec![self.0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

raw_setting! {
    /// AUX input mode, passed through as the printer reports it.
    AuxMode
}

raw_setting! {
    /// Shaft encoder mode, passed through as the printer reports it.
    ShaftEncoderMode
}

raw_setting! {
    /// Reference modulation voltage step.
    ReferenceModulation
}
