use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_frame, Frame, FrameConfig};
use crate::command::Command;
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Encodes frames onto a byte sink such as a serial port.
pub struct FrameWriter<W> {
    port: W,
    buf: BytesMut,
    config: FrameConfig,
}

impl<W: Write> FrameWriter<W> {
    /// Writer using the default [`FrameConfig`] (CRC16).
    pub fn new(port: W) -> Self {
        Self::with_config(port, FrameConfig::default())
    }

    /// Writer whose [`send`](Self::send) uses `config.verification`.
    pub fn with_config(port: W, config: FrameConfig) -> Self {
        Self {
            port,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Write a complete frame (blocking), using the frame's own verification.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_frame(frame, &mut self.buf);
        trace!(command = %frame.command, len = self.buf.len(), "writing frame");

        let mut pending = &self.buf[..];
        while !pending.is_empty() {
            match self.port.write(pending) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => pending = &pending[n..],
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }

        self.flush()
    }

    /// Encode and send a host request to address 0 with the configured verification.
    pub fn send(&mut self, command: Command, data: &[u8]) -> Result<()> {
        let frame = Frame::new(command, data.to_vec()).with_verification(self.config.verification);
        self.write_frame(&frame)
    }

    /// Flush the sink, retrying on `Interrupted`.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.port.flush() {
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                done => return done.map_err(FrameError::from),
            }
        }
    }

    /// The wrapped sink.
    pub fn port(&self) -> &W {
        &self.port
    }

    /// Mutable access to the sink.
    pub fn port_mut(&mut self) -> &mut W {
        &mut self.port
    }

    /// Unwrap the sink.
    pub fn into_port(self) -> W {
        self.port
    }

    /// Configuration in use.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
