//! ECJet continuous inkjet printer protocol.
//!
//! # Crate Structure
//!
//! - [`frame`]: delimited, checksummed, byte-stuffed framing plus the stream
//!   tokenizer and blocking (and optionally async) adapters
//! - [`payload`]: typed payload values, request builders and frame summaries
//!
//! ```
//! use ecjet::frame::{Command, Frame, Verification};
//! use ecjet::payload::{requests, summary, PayloadValue, PrintDelay};
//!
//! let frame = requests::set_print_delay(0, PrintDelay::from_mm(215.0).unwrap());
//! let wire = frame.to_bytes();
//!
//! let decoded = Frame::from_bytes(&wire, Verification::Crc16).unwrap();
//! let delay = PrintDelay::from_frame(&decoded, Command::SetPrintDelay).unwrap();
//! assert_eq!(delay.micrometres(), 215_000);
//! assert_eq!(summary::describe(&decoded), "set print delay (0x0003) request: 215.00mm");
//! ```

/// Re-export frame types.
pub mod frame {
    pub use ecjet_frame::*;
}

/// Re-export payload types.
pub mod payload {
    pub use ecjet_payload::*;
}
