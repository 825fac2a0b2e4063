use serde::{Deserialize, Serialize};

/// Message used when a record cannot be parsed as JSON.
pub const PARSE_FAILURE_MESSAGE: &str = "Error parsing server response";

/// One application-level event decoded from the reply stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecodedEvent {
    /// A fragment of the coach reply.
    Content {
        text: String,
    },

    /// An in-band error record, a malformed record, or a transport failure.
    Failure {
        message: String,
    },
}

impl DecodedEvent {
    pub fn content(text: impl Into<String>) -> Self {
        DecodedEvent::Content { text: text.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        DecodedEvent::Failure {
            message: message.into(),
        }
    }

    pub fn parse_failure() -> Self {
        Self::failure(PARSE_FAILURE_MESSAGE)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DecodedEvent::Failure { .. })
    }

    /// Reply text carried by a `Content` event
    pub fn text(&self) -> Option<&str> {
        match self {
            DecodedEvent::Content { text } => Some(text),
            DecodedEvent::Failure { .. } => None,
        }
    }
}
