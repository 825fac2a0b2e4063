pub mod accumulator;
pub mod client;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use accumulator::ReplyAccumulator;
pub use client::{CoachClient, CoachClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use traits::ReplyApi;
pub use types::{
    AiSuggestion, CoachMessage, CoachSpeaker, DialogTurn, PromptOption, QueryMode, ReplyRequest,
    ReplyResponse, Speaker, UserMessage,
};

pub use clarity_stream::{CallbackSink, DecodedEvent, EventSink, EventStream};
