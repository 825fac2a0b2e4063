use std::fmt::Display;

use crate::events::DecodedEvent;
use crate::record::parse_record;
use crate::utf8::Utf8Carry;

/// Lifecycle of a decoder; `Active -> Closed` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Active,
    Closed,
}

/// Incremental NDJSON decoder for a single streamed reply
///
/// Chunks may split records at any boundary. Each `feed` emits one event per
/// newline-terminated record; the unterminated tail stays buffered until more
/// input arrives or `flush` is called at end of body. Malformed records become
/// `Failure` events, so decoding never aborts mid-stream.
///
/// A decoder is single-use: once closed by `flush` or
/// `on_transport_failure` it ignores further input. A transport failure keeps
/// the buffered tail so the final `flush` can still recover it.
#[derive(Debug)]
pub struct StreamDecoder {
    buffer: String,
    utf8: Utf8Carry,
    state: DecoderState,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            utf8: Utf8Carry::new(),
            state: DecoderState::Active,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == DecoderState::Closed
    }

    /// Unconsumed trailing record text
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Feed a text chunk and return the events for every record it completes
    pub fn feed(&mut self, chunk: &str) -> Vec<DecodedEvent> {
        if self.is_closed() {
            tracing::warn!("Ignoring {} bytes fed to a closed decoder", chunk.len());
            return Vec::new();
        }

        // Buffered text never holds a newline, so only the new chunk is scanned
        let scanned_from = self.buffer.len();
        self.buffer.push_str(chunk);

        let Some(last_newline) = chunk.rfind('\n').map(|i| scanned_from + i) else {
            return Vec::new();
        };

        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        complete[..last_newline]
            .split('\n')
            .filter_map(|segment| {
                let event = parse_record(segment);
                if let Some(ref event) = event {
                    tracing::debug!(?event, "Decoded stream record");
                }
                event
            })
            .collect()
    }

    /// Feed raw bytes, carrying split multi-byte characters to the next call
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Vec<DecodedEvent> {
        if self.is_closed() {
            tracing::warn!("Ignoring {} bytes fed to a closed decoder", bytes.len());
            return Vec::new();
        }

        let text = self.utf8.decode(bytes);
        self.feed(&text)
    }

    /// Parse the trailing unterminated record once the body is complete
    ///
    /// Closes the decoder and drains the buffer, so later calls return `None`.
    /// Also valid after `on_transport_failure`.
    pub fn flush(&mut self) -> Option<DecodedEvent> {
        self.state = DecoderState::Closed;

        let rest = self.utf8.finish();
        self.buffer.push_str(&rest);

        let remaining = std::mem::take(&mut self.buffer);
        parse_record(&remaining)
    }

    /// Convert a transport failure into a `Failure` event
    ///
    /// Closes the decoder to further input but keeps the buffered tail for
    /// the `flush` that follows.
    pub fn on_transport_failure(&mut self, error: impl Display) -> DecodedEvent {
        let message = error.to_string();
        tracing::warn!("Stream transport failed: {}", message);

        self.state = DecoderState::Closed;

        DecodedEvent::Failure { message }
    }
}
