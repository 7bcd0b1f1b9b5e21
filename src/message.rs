// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::intent::IntentResult;

pub const DEFAULT_ROLE: &str = "patient";

/// Who produced a turn. Anything other than `user` is treated as the bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MessageRole {
    User,
    Bot,
}

impl From<String> for MessageRole {
    fn from(role: String) -> Self {
        if role == "user" {
            MessageRole::User
        } else {
            MessageRole::Bot
        }
    }
}

impl MessageRole {
    pub fn label(self) -> &'static str {
        match self {
            MessageRole::User => "User",
            MessageRole::Bot => "Bot",
        }
    }
}

/// One recorded entry of a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub message: String,
}

impl ChatTurn {
    pub fn new(role: MessageRole, message: impl Into<String>) -> Self {
        Self { role, message: message.into() }
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(MessageRole::User, message)
    }

    pub fn bot(message: impl Into<String>) -> Self {
        Self::new(MessageRole::Bot, message)
    }
}

/// Classifier output with the generated reply attached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub classification: IntentResult,
    pub reply: String,
}

impl AnalysisResult {
    pub fn intent(&self) -> &str {
        &self.classification.intent
    }
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_fall_back_to_bot() {
        let turns: Vec<ChatTurn> = serde_json::from_str(
            r#"[{"role":"user","message":"hi"},{"role":"assistant","message":"hello"},{"role":"bot","message":"yo"}]"#,
        )
        .unwrap();
        assert_eq!(turns[0].role, MessageRole::User);
        assert_eq!(turns[1].role, MessageRole::Bot);
        assert_eq!(turns[2].role, MessageRole::Bot);
    }

    #[test]
    fn chat_request_defaults_role() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"I feel anxious"}"#).unwrap();
        assert_eq!(req.role, "patient");
        assert!(req.history.is_none());
        assert!(req.session_id.is_none());
    }
}
