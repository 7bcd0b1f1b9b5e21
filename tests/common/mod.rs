#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mindmitra_backend::services::analyzer::MessageAnalyzer;
use mindmitra_backend::services::intent::{IntentClassifier, IntentError, IntentResult};
use mindmitra_backend::services::llm::{ChatModel, LlmError, PromptMessage};
use reqwest::StatusCode;

/// Model stub that records every prompt it receives.
pub struct StubModel {
    reply: Result<String, StatusCode>,
    pub calls: Mutex<Vec<(Vec<PromptMessage>, f32)>>,
}

impl StubModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.to_string()), calls: Mutex::new(Vec::new()) })
    }

    pub fn failing(status: StatusCode) -> Arc<Self> {
        Arc::new(Self { reply: Err(status), calls: Mutex::new(Vec::new()) })
    }

    pub fn last_user_prompt(&self) -> String {
        let calls = self.calls.lock().unwrap();
        calls.last().unwrap().0[1].content.clone()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, messages: &[PromptMessage], temperature: f32) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push((messages.to_vec(), temperature));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(LlmError::Api { status: *status, body: "boom".to_string() }),
        }
    }
}

/// Classifier stub returning a fixed label, or failing.
pub struct StubClassifier {
    intent: Option<String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubClassifier {
    pub fn returning(intent: &str) -> Arc<Self> {
        Arc::new(Self { intent: Some(intent.to_string()), calls: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { intent: None, calls: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl IntentClassifier for StubClassifier {
    async fn classify(&self, message: &str, role: &str) -> Result<IntentResult, IntentError> {
        self.calls.lock().unwrap().push((message.to_string(), role.to_string()));
        match &self.intent {
            Some(intent) => {
                let mut result = IntentResult::new(intent.clone());
                result.details.insert("confidence".to_string(), serde_json::json!(0.9));
                Ok(result)
            }
            None => Err(IntentError::Classification("classifier offline".to_string())),
        }
    }
}

pub fn analyzer(classifier: Arc<StubClassifier>, model: Arc<StubModel>) -> MessageAnalyzer {
    MessageAnalyzer::new(classifier, model)
}
