//! Request builders.
//!
//! One function per host command. Every builder returns a from-PC [`Frame`]
//! with CRC16 verification; use [`Frame::with_verification`] for links that
//! run mod256 or no checksum.

use ecjet_frame::{Command, Frame};

use crate::error::Result;
use crate::{
    AuxMode, CountType, DateTime, MessageName, PayloadValue, PhotocellMode, PrintCount,
    PrintDelay, PrintHeadCode, PrintHeight, PrintInterval, PrintWidth, ReferenceModulation,
    RemoteBuffer, ReverseMessage, ShaftEncoderMode, TriggerRepeat,
};

fn with_value(address: u8, command: Command, value: &impl PayloadValue) -> Frame {
    Frame::new(command, value.to_bytes()).with_address(address)
}

macro_rules! empty_requests {
    ($($fn_name:ident => $command:ident;)+) => {
        $(
            #[doc = concat!("`", stringify!($command), "` request.")]
            pub fn $fn_name(address: u8) -> Frame {
                Frame::request(Command::$command).with_address(address)
            }
        )+
    };
}

macro_rules! value_requests {
    ($($fn_name:ident => $command:ident($value:ty);)+) => {
        $(
            #[doc = concat!("`", stringify!($command), "` request carrying a [`", stringify!($value), "`].")]
            pub fn $fn_name(address: u8, value: $value) -> Frame {
                with_value(address, Command::$command, &value)
            }
        )+
    };
}

empty_requests! {
    get_print_width => GetPrintWidth;
    get_print_delay => GetPrintDelay;
    get_print_interval => GetPrintInterval;
    get_print_height => GetPrintHeight;
    get_reverse_message => GetReverseMessage;
    get_trigger_repeat => GetTriggerRepeat;
    get_printer_status => GetPrinterStatus;
    get_print_head_code => GetPrintHeadCode;
    get_photocell_mode => GetPhotocellMode;
    get_jet_status => GetJetStatus;
    get_system_times => GetSystemTimes;
    start_jet => StartJet;
    stop_jet => StopJet;
    start_print => StartPrint;
    stop_print => StopPrint;
    trigger_print => TriggerPrint;
    get_date_time => GetDateTime;
    get_font_list => GetFontList;
    get_message_list => GetMessageList;
    delete_last_field => DeleteLastField;
    delete_message_content => DeleteMessageContent;
    get_aux_mode => GetAuxMode;
    get_shaft_encoder_mode => GetShaftEncoderMode;
    get_reference_modulation => GetReferenceModulation;
    reset_serial_number => ResetSerialNumber;
    reset_count_length => ResetCountLength;
    get_remote_buffer_size => GetRemoteBufferSize;
}

value_requests! {
    set_print_width => SetPrintWidth(PrintWidth);
    set_print_delay => SetPrintDelay(PrintDelay);
    set_print_interval => SetPrintInterval(PrintInterval);
    set_print_height => SetPrintHeight(PrintHeight);
    set_print_count => SetPrintCount(PrintCount);
    get_print_count => GetPrintCount(CountType);
    set_reverse_message => SetReverseMessage(ReverseMessage);
    set_trigger_repeat => SetTriggerRepeat(TriggerRepeat);
    set_print_head_code => SetPrintHeadCode(PrintHeadCode);
    set_photocell_mode => SetPhotocellMode(PhotocellMode);
    set_date_time => SetDateTime(DateTime);
    set_current_message => SetCurrentMessage(MessageName);
    set_aux_mode => SetAuxMode(AuxMode);
    set_shaft_encoder_mode => SetShaftEncoderMode(ShaftEncoderMode);
    set_reference_modulation => SetReferenceModulation(ReferenceModulation);
}

/// Push `text` into the remote buffer. Fails when the text exceeds 65535 bytes.
pub fn download_remote_buffer(address: u8, text: &str) -> Result<Frame> {
    let buffer = RemoteBuffer::new(text)?;
    Ok(with_value(address, Command::DownloadRemoteBuffer, &buffer))
}

/// Append a field to the message being edited. The field record is passed
/// through as-is.
pub fn create_field(address: u8, field: &[u8]) -> Frame {
    Frame::new(Command::CreateField, field.to_vec()).with_address(address)
}
