use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("intent classification failed: {0}")]
    Classification(String),
}

/// Output of an intent classifier. Extra fields the classifier produces are
/// kept in `details` and flattened next to `intent` when serialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl IntentResult {
    pub fn new(intent: impl Into<String>) -> Self {
        Self { intent: intent.into(), details: Map::new() }
    }
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, message: &str, role: &str) -> Result<IntentResult, IntentError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Crisis,
    Greeting,
    Anxiety,
    Depression,
    Stress,
    Sleep,
    Appointment,
    Gratitude,
    General,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Crisis => "crisis",
            Intent::Greeting => "greeting",
            Intent::Anxiety => "anxiety",
            Intent::Depression => "depression",
            Intent::Stress => "stress",
            Intent::Sleep => "sleep",
            Intent::Appointment => "appointment",
            Intent::Gratitude => "gratitude",
            Intent::General => "general",
        }
    }
}

// Checked in order; crisis must stay first.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Crisis,
        &["suicide", "kill myself", "end my life", "self harm", "self-harm", "hurt myself", "want to die"],
    ),
    (Intent::Anxiety, &["anxious", "anxiety", "panic", "nervous", "worried", "fear"]),
    (Intent::Depression, &["depressed", "depression", "hopeless", "empty", "sad", "lonely"]),
    (Intent::Stress, &["stress", "stressed", "overwhelmed", "pressure", "burnout", "burned out"]),
    (Intent::Sleep, &["sleep", "insomnia", "nightmare", "can't sleep", "tired"]),
    (
        Intent::Appointment,
        &["appointment", "book", "schedule", "session", "therapist", "doctor", "counsellor", "counselor"],
    ),
    (Intent::Gratitude, &["thank", "thanks", "grateful", "appreciate"]),
    (Intent::Greeting, &["hello", "hi", "hey", "good morning", "good evening", "namaste"]),
];

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .filter(|word| !word.is_empty())
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.contains(' ') {
        // Phrases match whole words only.
        let phrase: Vec<&str> = words(needle).collect();
        let text: Vec<&str> = words(haystack).collect();
        return text.windows(phrase.len()).any(|window| window == phrase.as_slice());
    }
    words(haystack).any(|word| word == needle || (needle.len() > 3 && word.starts_with(needle)))
}

/// Detect the dominant intent and the keywords that triggered it.
pub fn detect_intent(msg: &str) -> (Intent, Vec<&'static str>) {
    let msg_lower = msg.to_lowercase();

    for (intent, keywords) in KEYWORDS {
        let matched: Vec<&'static str> = keywords
            .iter()
            .copied()
            .filter(|k| contains_word(&msg_lower, k))
            .collect();
        if !matched.is_empty() {
            return (*intent, matched);
        }
    }

    (Intent::General, Vec::new())
}

/// In-process classifier used when no remote classifier is configured.
#[derive(Debug, Default, Clone)]
pub struct KeywordClassifier;

#[async_trait]
impl IntentClassifier for KeywordClassifier {
    async fn classify(&self, message: &str, role: &str) -> Result<IntentResult, IntentError> {
        let (intent, matched) = detect_intent(message);
        tracing::debug!(role, intent = intent.as_str(), "classified message");

        let mut result = IntentResult::new(intent.as_str());
        result.details.insert("matched_keywords".to_string(), json!(matched));
        Ok(result)
    }
}
