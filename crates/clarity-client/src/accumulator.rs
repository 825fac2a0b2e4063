use clarity_stream::EventSink;

use crate::types::{now_timestamp, CoachMessage, CoachSpeaker, DialogTurn, UserMessage};

/// Sink that folds a streamed reply into a coach message
///
/// Reply fragments are concatenated in arrival order; failures are kept
/// separately so the caller can surface them without losing partial text.
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    text: String,
    failures: Vec<String>,
    chunks: usize,
}

impl ReplyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Build the (not yet finalised) coach message for this reply
    pub fn finish(self, speaker: CoachSpeaker) -> CoachMessage {
        CoachMessage {
            speaker,
            content: if self.text.is_empty() {
                None
            } else {
                Some(self.text)
            },
            ai_suggestions: None,
            selected_suggestion_index: None,
            is_finalized: false,
            timestamp: now_timestamp(),
        }
    }

    /// Append a turn with the user's message and this reply to the history
    pub fn append_to(self, history: &mut Vec<DialogTurn>, user_message: UserMessage) {
        let coach_message = self.finish(CoachSpeaker::from(user_message.speaker));
        history.push(DialogTurn {
            user_message: Some(user_message),
            coach_message: Some(coach_message),
        });
    }
}

impl EventSink for ReplyAccumulator {
    fn on_chunk(&mut self, text: &str) {
        self.text.push_str(text);
        self.chunks += 1;
    }

    fn on_error(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}
