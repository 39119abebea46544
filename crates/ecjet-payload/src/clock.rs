//! Printer clock and running-time counters.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use ecjet_frame::PayloadLength;

use crate::error::{Result, ValueError};
use crate::{fixed, PayloadValue};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Printer wall clock: `YYYY-MM-DD HH:MM:SS` in ASCII, NUL terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    pub const WIDTH: usize = 20;

    /// Sub-second precision is dropped; the printer clock counts whole seconds.
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl PayloadValue for DateTime {
    const LEN: PayloadLength = PayloadLength::Exact(DateTime::WIDTH);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = fixed::<{ DateTime::WIDTH }>(bytes)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let text = std::str::from_utf8(&raw[..end])
            .map_err(|_| ValueError::invalid("date time is not ASCII"))?;
        NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
            .map(Self)
            .map_err(|err| ValueError::invalid(format!("invalid date time {text:?}: {err}")))
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.0.format(DATE_TIME_FORMAT).to_string().into_bytes();
        out.resize(Self::WIDTH, 0);
        out
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_FORMAT))
    }
}

/// Hours and minutes of an elapsed-time counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunTime {
    pub hours: u32,
    pub minutes: u32,
}

impl RunTime {
    fn from_le(bytes: &[u8]) -> Self {
        let word = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Self {
            hours: word(0),
            minutes: word(4),
        }
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.hours.to_le_bytes());
        out.extend_from_slice(&self.minutes.to_le_bytes());
    }
}

impl fmt::Display for RunTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m", self.hours, self.minutes)
    }
}

/// Get-system-times response: four counters, each (hours, minutes) as u32 LE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SystemTimes {
    pub power_on: RunTime,
    pub jet_running: RunTime,
    pub filter: RunTime,
    pub pump: RunTime,
}

impl PayloadValue for SystemTimes {
    const LEN: PayloadLength = PayloadLength::Exact(32);

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = fixed::<32>(bytes)?;
        Ok(Self {
            power_on: RunTime::from_le(&raw[0..8]),
            jet_running: RunTime::from_le(&raw[8..16]),
            filter: RunTime::from_le(&raw[16..24]),
            pump: RunTime::from_le(&raw[24..32]),
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32);
        for counter in [&self.power_on, &self.jet_running, &self.filter, &self.pump] {
            counter.write_le(&mut out);
        }
        out
    }
}

impl fmt::Display for SystemTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "power on {}, jet {}, filter {}, pump {}",
            self.power_on, self.jet_running, self.filter, self.pump
        )
    }
}
