//! Frame boundary recovery for a continuous byte stream.
//!
//! Bytes are appended as they arrive from the transport, in chunks of any
//! size. Each call to [`Tokenizer::next`] yields at most one byte range that
//! starts with `0x7E` and ends with `0x7F`. Bytes that can never be part of a
//! frame are dropped. The yielded ranges are not validated here; hand them to
//! [`crate::decode_frame`].

use bytes::{Buf, Bytes, BytesMut};
use tracing::trace;

use crate::stuffing::{END, START};

/// Result of looking at the buffer once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// No delimiter at all: keep everything and wait.
    NeedMore,
    /// A start byte with no end after it: keep `buf[start..]` and wait.
    Partial { start: usize },
    /// A complete candidate at `buf[start..=end]`.
    Frame { start: usize, end: usize },
    /// An end byte with no start before it: drop `buf[..=through]` and look again.
    Discard { through: usize },
}

/// Classify `buf` by its first start and first end delimiter.
pub fn scan(buf: &[u8]) -> Scan {
    let start = buf.iter().position(|&b| b == START);
    let end = buf.iter().position(|&b| b == END);
    match (start, end) {
        (None, None) => Scan::NeedMore,
        (Some(start), None) => Scan::Partial { start },
        (Some(start), Some(end)) if end > start => Scan::Frame { start, end },
        (_, Some(end)) => Scan::Discard { through: end },
    }
}

/// Buffers stream bytes and splits them into frame candidates.
#[derive(Debug, Default)]
pub struct Tokenizer {
    buf: BytesMut,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Add received bytes to the end of the buffer.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Bytes received but not yet resolved into a frame.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Give up on the oldest pending frame start.
    ///
    /// Keeps the buffer from the last start byte after the first position, or
    /// empties it if there is none. Returns the number of bytes dropped.
    pub fn discard_stale(&mut self) -> usize {
        if self.buf.is_empty() {
            return 0;
        }
        let keep_from = self.buf[1..]
            .iter()
            .rposition(|&b| b == START)
            .map_or(self.buf.len(), |i| i + 1);
        self.buf.advance(keep_from);
        keep_from
    }

    fn next_token(&mut self) -> Option<Bytes> {
        loop {
            match scan(&self.buf) {
                Scan::NeedMore => return None,
                Scan::Partial { start } => {
                    if start > 0 {
                        trace!(dropped = start, "discarding bytes before frame start");
                        self.buf.advance(start);
                    }
                    return None;
                }
                Scan::Frame { start, end } => {
                    if start > 0 {
                        trace!(dropped = start, "discarding bytes before frame start");
                        self.buf.advance(start);
                    }
                    let token = self.buf.split_to(end - start + 1).freeze();
                    trace!(len = token.len(), remaining = self.buf.len(), "frame token");
                    return Some(token);
                }
                Scan::Discard { through } => {
                    trace!(dropped = through + 1, "discarding bytes up to orphan frame end");
                    self.buf.advance(through + 1);
                }
            }
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Bytes;

    /// Take the next complete frame candidate, if one is buffered.
    fn next(&mut self) -> Option<Bytes> {
        self.next_token()
    }
}
