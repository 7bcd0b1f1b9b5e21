pub mod analyzer;
pub mod intent;
pub mod llm;
pub mod metrics_manager;
pub mod prompt;
pub mod session_manager;
