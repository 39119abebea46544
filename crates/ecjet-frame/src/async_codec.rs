//! `tokio-util` codec for use with `Framed`, `FramedRead` and `FramedWrite`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::codec::{decode_frame, encode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};
use crate::tokenizer::Tokenizer;

/// Frame codec over an async byte stream.
///
/// A frame that fails validation is returned as an error. `FramedRead`
/// ends the stream after the first error; drive [`Decoder::decode`] directly
/// to keep going past corrupt frames.
#[derive(Debug, Default)]
pub struct EcjetCodec {
    tokenizer: Tokenizer,
    config: FrameConfig,
}

impl EcjetCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            config,
        }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Decoder for EcjetCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        if !src.is_empty() {
            let chunk = src.split();
            self.tokenizer.append(&chunk);
        }

        match self.tokenizer.next() {
            Some(token) => decode_frame(&token, self.config.verification).map(Some),
            None => {
                if self.tokenizer.len() > self.config.max_buffered {
                    let dropped = self.tokenizer.discard_stale();
                    debug!(
                        dropped,
                        max_buffered = self.config.max_buffered,
                        "frame buffer limit exceeded, dropping stale bytes"
                    );
                }
                Ok(None)
            }
        }
    }
}

impl Encoder<Frame> for EcjetCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<()> {
        encode_frame(&item, dst);
        Ok(())
    }
}

impl Encoder<&Frame> for EcjetCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &Frame, dst: &mut BytesMut) -> Result<()> {
        encode_frame(item, dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures_util::{SinkExt, StreamExt};
    use tokio_util::codec::{FramedRead, FramedWrite};

    use super::*;
    use crate::command::Command;

    #[test]
    fn decode_split_input() {
        let wire = Frame::request(Command::StartPrint).to_bytes();
        let mut codec = EcjetCodec::new();

        let mut buf = BytesMut::from(&wire[..7]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());

        buf.extend_from_slice(&wire[7..]);
        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.command, Command::StartPrint);
    }

    #[test]
    fn decode_yields_buffered_frames_one_at_a_time() {
        let mut buf = BytesMut::new();
        encode_frame(&Frame::request(Command::StartJet), &mut buf);
        encode_frame(&Frame::request(Command::StopJet), &mut buf);

        let mut codec = EcjetCodec::new();
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap().command, Command::StartJet);
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap().command, Command::StopJet);
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn decode_error_does_not_poison_codec() {
        let mut corrupt = Frame::request(Command::StartPrint).to_bytes().to_vec();
        corrupt[2] = 0x2C;
        let mut buf = BytesMut::from(corrupt.as_slice());
        encode_frame(&Frame::request(Command::StopPrint), &mut buf);

        let mut codec = EcjetCodec::new();
        assert!(codec.decode(&mut buf).is_err());
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap().command, Command::StopPrint);
    }

    #[tokio::test]
    async fn framed_roundtrip() {
        let frames = vec![
            Frame::new(Command::SetPrintHeight, vec![0x96]),
            Frame::new(Command::DownloadRemoteBuffer, b"\x03\x00\x7D\x7E\x7F".to_vec()),
            Frame::request(Command::GetJetStatus),
        ];

        let mut writer = FramedWrite::new(Vec::new(), EcjetCodec::new());
        for frame in &frames {
            writer.send(frame).await.unwrap();
        }
        let wire = writer.into_inner();

        let mut reader = FramedRead::new(wire.as_slice(), EcjetCodec::new());
        let mut decoded = Vec::new();
        while let Some(frame) = reader.next().await {
            decoded.push(frame.unwrap());
        }
        assert_eq!(decoded, frames);
    }
}
