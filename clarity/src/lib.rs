//! # Clarity - streaming coach replies
//!
//! Client side of a retrieval-augmented coaching service:
//! - **Incremental decoding** of `application/x-ndjson` reply streams
//! - **Typed requests** for replies, conversation history and prompts
//! - **One failure path** for malformed records, in-band errors and transport failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clarity::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CoachClient::builder()
//!         .base_url("http://localhost:9621")
//!         .build()?;
//!
//!     let request = ReplyRequest::new(Speaker::Student, "I don't get fractions");
//!
//!     let mut reply = ReplyAccumulator::new();
//!     client.coach_reply_text_stream(&request, &mut reply).await;
//!
//!     println!("{}", reply.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding without HTTP
//!
//! ```rust
//! use clarity::prelude::*;
//!
//! let mut decoder = StreamDecoder::new();
//! assert!(decoder.feed("{\"respo").is_empty());
//! assert_eq!(
//!     decoder.feed("nse\":\"hi\"}\n"),
//!     vec![DecodedEvent::content("hi")]
//! );
//! assert_eq!(decoder.flush(), None);
//! ```
//!
//! ## Crates
//!
//! - **clarity-stream**: `StreamDecoder`, `DecodedEvent`, sinks, async adapter
//! - **clarity-client**: `CoachClient`, request/response types, `ReplyAccumulator`

pub use clarity_client as client;
pub use clarity_stream as stream;

pub use clarity_client::{ClientConfig, CoachClient, ReplyApi, ReplyRequest};
pub use clarity_stream::{DecodedEvent, EventSink, StreamDecoder};

/// Convenient prelude with commonly used types
pub mod prelude {
    pub use crate::client::{
        ClientConfig, CoachClient, DialogTurn, QueryMode, ReplyAccumulator, ReplyApi,
        ReplyRequest, Speaker, UserMessage,
    };
    pub use crate::stream::{CallbackSink, DecodedEvent, EventSink, StreamDecoder};
    pub use anyhow::Result;
}
