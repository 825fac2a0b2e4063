use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Retrieval mode used by the service when building context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Local,
    Global,
    #[default]
    Hybrid,
    Naive,
    Mix,
}

/// Who wrote the incoming message (the coached party)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    #[default]
    Student,
    Patient,
}

/// Who authors the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachSpeaker {
    #[default]
    Coach,
    Doctor,
}

impl FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(QueryMode::Local),
            "global" => Ok(QueryMode::Global),
            "hybrid" => Ok(QueryMode::Hybrid),
            "naive" => Ok(QueryMode::Naive),
            "mix" => Ok(QueryMode::Mix),
            other => Err(format!("Unknown query mode: {}", other)),
        }
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Speaker::Student),
            "patient" => Ok(Speaker::Patient),
            other => Err(format!("Unknown speaker: {}", other)),
        }
    }
}

impl From<Speaker> for CoachSpeaker {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::Student => CoachSpeaker::Coach,
            Speaker::Patient => CoachSpeaker::Doctor,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachMessage {
    pub speaker: CoachSpeaker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<AiSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_suggestion_index: Option<usize>,
    #[serde(default)]
    pub is_finalized: bool,
    pub timestamp: String,
}

/// Message from the student or patient side of the dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub speaker: Speaker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub timestamp: String,
}

impl UserMessage {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: Some(content.into()),
            intent: None,
            sentiment: None,
            topic: None,
            sub_topic: None,
            technique: None,
            level: None,
            timestamp: now_timestamp(),
        }
    }
}

/// One exchange in the conversation history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogTurn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<UserMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_message: Option<CoachMessage>,
}

/// Body of `POST /coach_reply` and `POST /coach_reply/stream`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: String,
    pub response_format: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub mode: QueryMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_need_context: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_need_prompt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_token_for_text_unit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_token_for_global_context: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_token_for_local_context: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ll_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_turns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<DialogTurn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

pub const DEFAULT_RESPONSE_FORMAT: &str = "HS Text";
pub const DEFAULT_PROMPT: &str = "Default";

impl ReplyRequest {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            student_name: None,
            speaker,
            content: content.into(),
            timestamp: now_timestamp(),
            response_format: DEFAULT_RESPONSE_FORMAT.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            topic: None,
            sub_topic: None,
            intent: None,
            sentiment: None,
            technique: None,
            level: None,
            mode: QueryMode::default(),
            only_need_context: None,
            only_need_prompt: None,
            top_k: None,
            max_token_for_text_unit: None,
            max_token_for_global_context: None,
            max_token_for_local_context: None,
            hl_keywords: None,
            ll_keywords: None,
            history_turns: None,
            conversation_history: None,
            namespace: None,
        }
    }

    pub fn student_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = format.into();
        self
    }

    pub fn mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Attach history, keeping only the most recent `history_turns` when set
    pub fn history(mut self, turns: &[DialogTurn], history_turns: Option<u32>) -> Self {
        let keep = history_turns
            .map(|n| n as usize)
            .unwrap_or(turns.len())
            .min(turns.len());
        self.conversation_history = Some(turns[turns.len() - keep..].to_vec());
        self.history_turns = history_turns;
        self
    }
}

/// Body of a non-streaming reply
///
/// The service answers either with a full coach message or a bare `reply`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_message: Option<CoachMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl ReplyResponse {
    pub fn text(&self) -> Option<&str> {
        self.coach_message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .or(self.reply.as_deref())
    }
}

/// Selectable prompt entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    pub label: String,
    pub value: String,
}

impl From<String> for PromptOption {
    fn from(key: String) -> Self {
        Self {
            label: key.clone(),
            value: key,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreatePromptRequest<'a> {
    pub prompt_key: &'a str,
    pub prompt_value: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdatePromptRequest<'a> {
    pub prompt_value: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PromptMutationResponse {
    pub message: String,
}

pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
