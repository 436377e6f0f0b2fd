//! Interactive front-ends over the intent, tool and planning core

pub mod chat;
pub mod context;
pub mod direct;
pub mod planning;

pub use chat::{ChatAgent, ChatReply};
pub use context::ConversationContext;
pub use direct::DirectCommand;
pub use planning::PlanningAgent;

/// Words that end an interactive session
pub const EXIT_WORDS: &[&str] = &["quit", "종료", "그만"];

pub fn is_exit(input: &str) -> bool {
    EXIT_WORDS.contains(&input.trim())
}
