use crate::message::ChatTurn;
use crate::services::llm::PromptMessage;

/// Number of most recent turns rendered into the prompt.
pub const HISTORY_WINDOW: usize = 10;

pub const SYSTEM_PROMPT: &str = "You are MindMitra, a mental health support AI platform assistant. \
Provide empathetic, informative responses. Tone and style should match the user's role.";

/// Render the tail of the conversation as a transcript, one
/// `User: ...` / `Bot: ...` line per turn.
pub fn render_history(history: &[ChatTurn]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|turn| format!("{}: {}\n", turn.role.label(), turn.message))
        .collect()
}

pub fn build_prompt(role: &str, intent: &str, message: &str, history: &[ChatTurn]) -> Vec<PromptMessage> {
    let human = format!(
        "Role: {role}\nIntent: {intent}\nMessage: {message}\nConversation History:\n{}\n\n\
         Reply in the same conversational style and maintain continuity.",
        render_history(history)
    );
    vec![PromptMessage::system(SYSTEM_PROMPT), PromptMessage::user(human)]
}
