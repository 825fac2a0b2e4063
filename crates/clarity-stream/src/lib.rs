//! Incremental decoding of newline-delimited JSON reply streams.
//!
//! The coach-reply service streams `application/x-ndjson`, one object per line:
//!
//! ```text
//! {"response":"Let's start"}
//! {"response":" with what you noticed."}
//! {"error":"rate limited"}
//! ```
//!
//! [`StreamDecoder`] turns arbitrarily chunked text or bytes into
//! [`DecodedEvent`]s; [`decode_ndjson_stream`] drives one from an HTTP body.

pub mod decoder;
pub mod events;
pub mod ndjson;
pub mod record;
pub mod sink;
pub mod utf8;

pub use decoder::{DecoderState, StreamDecoder};
pub use events::{DecodedEvent, PARSE_FAILURE_MESSAGE};
pub use ndjson::{decode_ndjson_stream, drive_into_sink, EventStream};
pub use record::parse_record;
pub use sink::{CallbackSink, EventSink};
pub use utf8::Utf8Carry;
