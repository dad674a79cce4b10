//! Translation phase: prompts, the generation client and the escalation engine.

pub mod client;
pub mod engine;
mod error;
pub mod prompt;

pub use client::{Completion, CompletionRequest, OpenAiClient};
pub use engine::{EngineSettings, EscalationEngine};
pub use error::GenerationError;
