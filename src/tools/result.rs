//! Uniform result shape returned by every tool

use serde::{Deserialize, Serialize};

/// Result of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool did what was asked
    pub success: bool,
    /// Output text (empty on failure)
    pub content: String,
    /// Error message (set on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Create a successful result
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            error: None,
        }
    }

    /// Create an error result
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error.into()),
        }
    }

    /// Collapse an internal `Result` into the uniform shape
    pub fn from_result(result: crate::core::error::Result<String>) -> Self {
        match result {
            Ok(content) => Self::ok(content),
            Err(e) => Self::err(e.to_string()),
        }
    }

    /// Text to show a user: content, else the error, else a generic message
    pub fn display_text(&self) -> &str {
        if !self.content.is_empty() {
            &self.content
        } else if let Some(error) = self.error.as_deref() {
            error
        } else {
            "Unknown error"
        }
    }
}
