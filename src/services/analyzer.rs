use std::sync::Arc;

use crate::message::{AnalysisResult, ChatTurn};
use crate::services::intent::{IntentClassifier, IntentError};
use crate::services::llm::{ChatModel, LlmError, PromptMessage};
use crate::services::prompt::build_prompt;

pub const TEMPERATURE: f32 = 0.3;
pub const FALLBACK_REPLY: &str = "⚠️ Sorry, I couldn't process your request right now.";

/// Classifies a message and asks the LLM for a reply.
#[derive(Clone)]
pub struct MessageAnalyzer {
    classifier: Arc<dyn IntentClassifier>,
    model: Arc<dyn ChatModel>,
}

impl MessageAnalyzer {
    pub fn new(classifier: Arc<dyn IntentClassifier>, model: Arc<dyn ChatModel>) -> Self {
        Self { classifier, model }
    }

    /// Classifier failures propagate to the caller. LLM failures never do:
    /// they are logged and replaced with [`FALLBACK_REPLY`].
    pub async fn analyze(
        &self,
        message: &str,
        role: &str,
        history: &[ChatTurn],
    ) -> Result<AnalysisResult, IntentError> {
        let classification = self.classifier.classify(message, role).await?;

        let prompt = build_prompt(role, &classification.intent, message, history);

        let reply = match self.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, intent = %classification.intent, "LLM error");
                FALLBACK_REPLY.to_string()
            }
        };

        Ok(AnalysisResult { classification, reply })
    }

    async fn generate(&self, prompt: &[PromptMessage]) -> Result<String, LlmError> {
        let text = self.model.complete(prompt, TEMPERATURE).await?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }
}
