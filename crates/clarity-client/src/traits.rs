use async_trait::async_trait;
use clarity_stream::EventStream;

use crate::error::Result;
use crate::types::{ReplyRequest, ReplyResponse};

/// Coach-reply generation, buffered or streamed
///
/// Implemented by [`crate::CoachClient`]; callers that only need replies can
/// hold an `Arc<dyn ReplyApi>` and substitute another implementation.
#[async_trait]
pub trait ReplyApi: Send + Sync {
    /// Non-streaming reply
    async fn coach_reply(&self, request: &ReplyRequest) -> Result<ReplyResponse>;

    /// Streaming reply decoded from NDJSON
    ///
    /// Fails only if the request cannot be sent or the service answers with a
    /// non-success status before the body starts. Later problems arrive as
    /// `Failure` events.
    async fn coach_reply_stream(&self, request: &ReplyRequest) -> Result<EventStream>;
}
