//! One-line, human readable frame summaries.

use std::fmt::{Display, Write as _};

use ecjet_frame::{Command, Frame};
use tracing::{debug, trace};

use crate::error::Result;
use crate::{
    AuxMode, CountType, DateTime, FontList, JetStatus, MessageList, MessageName, PayloadValue,
    PhotocellMode, PrintCount, PrintDelay, PrintHeadCode, PrintHeight, PrintInterval, PrintWidth,
    PrinterStatus, ReferenceModulation, RemoteBuffer, RemoteBufferSize, ReverseMessage,
    ShaftEncoderMode, SystemTimes, TriggerRepeat,
};

/// Describe `frame`: command, direction, acknowledge and, when the payload
/// shape is known, the decoded value.
///
/// Payloads that fail to decode fall back to their raw bytes.
pub fn describe(frame: &Frame) -> String {
    let mut out = frame.command.to_string();
    if frame.is_request() {
        out.push_str(" request");
    } else {
        let _ = write!(
            out,
            " {}, {}",
            frame.information.acknowledge,
            frame.information.command_status()
        );
    }

    if !frame.data.is_empty() {
        let payload = match decode_payload(frame) {
            Some(Ok(text)) => text,
            Some(Err(err)) => {
                debug!(command = %frame.command, error = %err, "payload did not decode");
                format!("{} (undecodable: {err})", hex(&frame.data))
            }
            None => hex(&frame.data),
        };
        out.push_str(": ");
        out.push_str(&payload);
    }

    trace!(summary = %out, "described frame");
    out
}

/// Space separated upper-case hex.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02X}");
    }
    out
}

fn render<V: PayloadValue + Display>(data: &[u8]) -> Result<String> {
    V::from_bytes(data).map(|value| value.to_string())
}

fn decode_payload(frame: &Frame) -> Option<Result<String>> {
    use Command::*;

    let data = &frame.data[..];
    let text = if frame.is_request() {
        match frame.command {
            SetPrintWidth => render::<PrintWidth>(data),
            SetPrintDelay => render::<PrintDelay>(data),
            SetPrintInterval => render::<PrintInterval>(data),
            SetPrintHeight => render::<PrintHeight>(data),
            SetPrintCount => render::<PrintCount>(data),
            GetPrintCount => render::<CountType>(data),
            SetReverseMessage => render::<ReverseMessage>(data),
            SetTriggerRepeat => render::<TriggerRepeat>(data),
            SetPrintHeadCode => render::<PrintHeadCode>(data),
            SetPhotocellMode => render::<PhotocellMode>(data),
            SetDateTime => render::<DateTime>(data),
            DownloadRemoteBuffer => render::<RemoteBuffer>(data),
            SetCurrentMessage => render::<MessageName>(data),
            SetAuxMode => render::<AuxMode>(data),
            SetShaftEncoderMode => render::<ShaftEncoderMode>(data),
            SetReferenceModulation => render::<ReferenceModulation>(data),
            _ => return None,
        }
    } else {
        match frame.command {
            GetPrintWidth => render::<PrintWidth>(data),
            GetPrintDelay => render::<PrintDelay>(data),
            GetPrintInterval => render::<PrintInterval>(data),
            GetPrintHeight => render::<PrintHeight>(data),
            GetPrintCount => crate::fixed::<4>(data).map(|raw| u32::from_le_bytes(raw).to_string()),
            GetReverseMessage => render::<ReverseMessage>(data),
            GetTriggerRepeat => render::<TriggerRepeat>(data),
            GetPrinterStatus => render::<PrinterStatus>(data),
            GetPrintHeadCode => render::<PrintHeadCode>(data),
            GetPhotocellMode => render::<PhotocellMode>(data),
            GetJetStatus => render::<JetStatus>(data),
            GetSystemTimes => render::<SystemTimes>(data),
            GetDateTime => render::<DateTime>(data),
            GetFontList => render::<FontList>(data),
            GetMessageList => render::<MessageList>(data),
            GetAuxMode => render::<AuxMode>(data),
            GetShaftEncoderMode => render::<ShaftEncoderMode>(data),
            GetReferenceModulation => render::<ReferenceModulation>(data),
            GetRemoteBufferSize => render::<RemoteBufferSize>(data),
            _ => return None,
        }
    };
    Some(text)
}
