//! Conversation state carried across chat turns

use crate::core::types::arg_str;
use crate::intent::Intent;
use crate::tools::filesystem::listed_files;
use crate::tools::result::ToolResult;
use serde::{Deserialize, Serialize};

/// What the chat agent remembers about the conversation so far
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Tool invoked by the previous turn
    pub last_tool: String,
    /// Content or error text of the previous turn
    pub last_result: String,
    /// Files the agent has most recently seen or created
    pub current_files: Vec<String>,
    pub user_preferences: serde_json::Map<String, serde_json::Value>,
    /// `user: ...` and `agent: ...` lines, oldest first
    pub conversation_history: Vec<String>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_user(&mut self, text: &str) {
        self.conversation_history.push(format!("user: {}", text));
    }

    pub fn record_agent(&mut self, text: &str) {
        self.conversation_history.push(format!("agent: {}", text));
    }

    /// Update after a tool ran on behalf of `intent`
    pub fn observe(&mut self, intent: &Intent, result: &ToolResult) {
        self.last_tool = intent.tool.clone();
        self.last_result = if result.content.is_empty() {
            result.error.clone().unwrap_or_default()
        } else {
            result.content.clone()
        };

        if !result.success {
            return;
        }
        match intent.tool.as_str() {
            "write_file" => {
                if let Some(path) = arg_str(&intent.args, "path") {
                    self.current_files.push(path.to_string());
                }
            }
            "list_directory" => {
                let files = listed_files(&result.content);
                if !files.is_empty() {
                    self.current_files = files;
                }
            }
            _ => {}
        }
    }

    /// One-paragraph summary for display
    pub fn summary(&self) -> String {
        let mut summary = format!("Turns: {}", self.conversation_history.len());
        if !self.last_tool.is_empty() {
            summary.push_str(&format!("\nLast tool: {}", self.last_tool));
        }
        if !self.current_files.is_empty() {
            summary.push_str(&format!("\nKnown files: {}", self.current_files.join(", ")));
        }
        summary
    }
}
