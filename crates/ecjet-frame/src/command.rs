//! Command catalog.
//!
//! Every command the printer understands, with the payload length expected
//! in each direction. Codes 0x0001-0x002F are host requests (set, get and
//! action commands); 0x1000-0x1004 are state reports raised by the printer.

use crate::error::{FrameError, Result};

/// Expected payload length for one direction of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadLength {
    /// Exactly this many bytes.
    Exact(usize),
    /// Not checkable at the framing layer; the payload carries its own
    /// length prefix.
    Variable,
}

impl PayloadLength {
    /// Whether a payload of `len` bytes is acceptable.
    pub fn accepts(self, len: usize) -> bool {
        match self {
            PayloadLength::Exact(expected) => expected == len,
            PayloadLength::Variable => true,
        }
    }
}

impl std::fmt::Display for PayloadLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadLength::Exact(n) => write!(f, "{n}"),
            PayloadLength::Variable => f.write_str("variable"),
        }
    }
}

macro_rules! commands {
    ($(
        $(#[$meta:meta])*
        $variant:ident = $code:literal, $name:literal, $request:expr, $response:expr;
    )+) => {
        /// A protocol command code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Command {
            $(
                $(#[$meta])*
                $variant = $code,
            )+
        }

        impl Command {
            /// Every command, in code order.
            pub const ALL: &'static [Command] = &[$(Command::$variant),+];

            /// Look up a command by its wire code.
            pub fn from_code(code: u16) -> Result<Command> {
                match code {
                    $($code => Ok(Command::$variant),)+
                    other => Err(FrameError::UnknownCommand(other)),
                }
            }

            /// Human readable name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Command::$variant => $name,)+
                }
            }

            /// Payload length of a host request (from-PC direction).
            pub const fn request_len(self) -> PayloadLength {
                match self {
                    $(Command::$variant => $request,)+
                }
            }

            /// Payload length of a printer response.
            pub const fn response_len(self) -> PayloadLength {
                match self {
                    $(Command::$variant => $response,)+
                }
            }
        }
    };
}

use PayloadLength::{Exact, Variable};

commands! {
    SetPrintWidth = 0x0001, "set print width", Exact(3), Exact(0);
    GetPrintWidth = 0x0002, "get print width", Exact(0), Exact(3);
    SetPrintDelay = 0x0003, "set print delay", Exact(5), Exact(0);
    GetPrintDelay = 0x0004, "get print delay", Exact(0), Exact(5);
    SetPrintInterval = 0x0005, "set print interval", Exact(5), Exact(0);
    GetPrintInterval = 0x0006, "get print interval", Exact(0), Exact(5);
    SetPrintHeight = 0x0007, "set print height", Exact(1), Exact(0);
    GetPrintHeight = 0x0008, "get print height", Exact(0), Exact(1);
    SetPrintCount = 0x0009, "set print count", Exact(5), Exact(0);
    /// The request carries the count type, the response only the count.
    GetPrintCount = 0x000A, "get print count", Exact(1), Exact(4);
    SetReverseMessage = 0x000B, "set reverse message", Exact(2), Exact(0);
    GetReverseMessage = 0x000C, "get reverse message", Exact(0), Exact(2);
    SetTriggerRepeat = 0x000D, "set trigger repeat", Exact(1), Exact(0);
    GetTriggerRepeat = 0x000E, "get trigger repeat", Exact(0), Exact(1);
    GetPrinterStatus = 0x000F, "get printer status", Exact(0), Exact(5);
    SetPrintHeadCode = 0x0010, "set print head code", Exact(14), Exact(0);
    GetPrintHeadCode = 0x0011, "get print head code", Exact(0), Exact(14);
    SetPhotocellMode = 0x0012, "set photocell mode", Exact(1), Exact(0);
    GetPhotocellMode = 0x0013, "get photocell mode", Exact(0), Exact(1);
    GetJetStatus = 0x0014, "get jet status", Exact(0), Exact(10);
    GetSystemTimes = 0x0015, "get system times", Exact(0), Exact(32);
    StartJet = 0x0016, "start jet", Exact(0), Exact(0);
    StopJet = 0x0017, "stop jet", Exact(0), Exact(0);
    StartPrint = 0x0018, "start print", Exact(0), Exact(0);
    StopPrint = 0x0019, "stop print", Exact(0), Exact(0);
    TriggerPrint = 0x001A, "trigger print", Exact(0), Exact(0);
    SetDateTime = 0x001B, "set date time", Exact(20), Exact(0);
    GetDateTime = 0x001C, "get date time", Exact(0), Exact(20);
    GetFontList = 0x001D, "get font list", Exact(0), Variable;
    GetMessageList = 0x001E, "get message list", Exact(0), Variable;
    CreateField = 0x001F, "create field", Variable, Exact(0);
    /// The response is a single status byte.
    DownloadRemoteBuffer = 0x0020, "download remote buffer", Variable, Exact(1);
    DeleteLastField = 0x0021, "delete last field", Exact(0), Exact(0);
    DeleteMessageContent = 0x0022, "delete message content", Exact(0), Exact(0);
    SetCurrentMessage = 0x0023, "set current message", Exact(32), Exact(0);
    SetAuxMode = 0x0024, "set AUX mode", Exact(1), Exact(0);
    GetAuxMode = 0x0025, "get AUX mode", Exact(0), Exact(1);
    SetShaftEncoderMode = 0x0026, "set shaft encoder mode", Exact(1), Exact(0);
    GetShaftEncoderMode = 0x0027, "get shaft encoder mode", Exact(0), Exact(1);
    SetReferenceModulation = 0x0028, "set reference modulation", Exact(1), Exact(0);
    GetReferenceModulation = 0x0029, "get reference modulation", Exact(0), Exact(1);
    ResetSerialNumber = 0x002A, "reset serial number", Exact(0), Exact(0);
    ResetCountLength = 0x002B, "reset count length", Exact(0), Exact(0);
    GetRemoteBufferSize = 0x002F, "get remote buffer size", Exact(0), Exact(4);
    PrintTriggerState = 0x1000, "print trigger state", Exact(0), Exact(0);
    PrintGoState = 0x1001, "print go state", Exact(0), Exact(0);
    PrintEndState = 0x1002, "print end state", Exact(0), Exact(0);
    RequestRemoteData = 0x1003, "request remote data", Exact(0), Exact(0);
    PrintFaultState = 0x1004, "print fault state", Exact(0), Exact(0);
}

impl Command {
    /// Wire code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Expected payload length for the direction of a frame.
    pub const fn expected_len(self, from_pc: bool) -> PayloadLength {
        if from_pc {
            self.request_len()
        } else {
            self.response_len()
        }
    }

    /// True for the unsolicited state reports (0x1000 and up).
    pub const fn is_state_report(self) -> bool {
        self.code() >= 0x1000
    }
}

impl TryFrom<u16> for Command {
    type Error = FrameError;

    fn try_from(code: u16) -> Result<Self> {
        Command::from_code(code)
    }
}

impl From<Command> for u16 {
    fn from(command: Command) -> Self {
        command.code()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:04X})", self.name(), self.code())
    }
}
