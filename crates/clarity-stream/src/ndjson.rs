use std::fmt::Display;
use std::pin::Pin;

use futures::{Stream, StreamExt};

use crate::decoder::StreamDecoder;
use crate::events::DecodedEvent;
use crate::sink::EventSink;

/// Boxed stream of decoded reply events
pub type EventStream = Pin<Box<dyn Stream<Item = DecodedEvent> + Send>>;

/// Drive a `StreamDecoder` from a byte stream (e.g. `reqwest::Response::bytes_stream`)
///
/// Yields events in record order. A transport error yields one `Failure` and
/// stops reading; either way the body ends with a flush of the trailing
/// unterminated record.
pub fn decode_ndjson_stream<S, B, E>(byte_stream: S) -> EventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(byte_stream);
        let mut decoder = StreamDecoder::new();

        while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    for event in decoder.feed_bytes(bytes.as_ref()) {
                        yield event;
                    }
                }
                Err(e) => {
                    yield decoder.on_transport_failure(format!("Stream error: {}", e));
                    break;
                }
            }
        }

        if let Some(event) = decoder.flush() {
            yield event;
        }
    })
}

/// Consume an event stream into a sink, returning how many events were dispatched
pub async fn drive_into_sink<S, K>(stream: S, sink: &mut K) -> usize
where
    S: Stream<Item = DecodedEvent>,
    K: EventSink + ?Sized,
{
    let mut stream = Box::pin(stream);
    let mut dispatched = 0;

    while let Some(event) = stream.next().await {
        sink.dispatch(event);
        dispatched += 1;
    }

    dispatched
}
