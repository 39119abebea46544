//! Typed payloads for the ECJet printer protocol.
//!
//! The frame layer only knows how many payload bytes a command carries. This
//! crate gives those bytes meaning: fixed-point distances, status bitfields,
//! name tables and the rest. Every value type implements [`PayloadValue`].
//!
//! ```
//! use ecjet_frame::Command;
//! use ecjet_payload::{requests, PayloadValue, PrintWidth};
//!
//! let width = PrintWidth::from_mm(0.79).unwrap();
//! assert_eq!(width.to_bytes(), [22, 3, 1]);
//!
//! let frame = requests::set_print_width(0, width);
//! assert_eq!(PrintWidth::from_frame(&frame, Command::SetPrintWidth).unwrap(), width);
//! ```

pub mod clock;
pub mod distance;
pub mod error;
pub mod names;
pub mod remote;
pub mod requests;
pub mod settings;
pub mod status;
pub mod summary;

use ecjet_frame::{Command, Frame, PayloadLength};

pub use clock::{DateTime, RunTime, SystemTimes};
pub use distance::{PrintDelay, PrintInterval, PrintWidth};
pub use error::{Result, ValueError};
pub use names::{FontList, MessageList, MessageName};
pub use remote::{RemoteBuffer, RemoteBufferSize};
pub use settings::{
    AuxMode, CountType, Orientation, PhotocellMode, PrintCount, PrintHeight, ReferenceModulation,
    ReverseMessage, ShaftEncoderMode, TriggerRepeat,
};
pub use status::{
    JetState, JetStatus, PrintHeadCode, PrinterStatus, Warning, Warnings, WARNINGS,
};

/// A value carried in a frame payload.
pub trait PayloadValue: Sized {
    /// Payload width on the wire.
    const LEN: PayloadLength;

    /// Decode from exactly the payload bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Encode to payload bytes.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode the payload of `frame`, which must carry `command`.
    fn from_frame(frame: &Frame, command: Command) -> Result<Self> {
        if frame.command != command {
            return Err(ValueError::UnexpectedCommand {
                expected: command,
                actual: frame.command,
            });
        }
        Self::from_bytes(&frame.data)
    }
}

/// Borrow `bytes` as a fixed-size array or fail with the byte counts.
pub(crate) fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| ValueError::IncorrectByteCount {
            expected: N,
            actual: bytes.len(),
        })
}
