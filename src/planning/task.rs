//! Tasks and plans

use crate::core::types::ToolArgs;
use crate::planning::templates::GoalKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One tool invocation inside a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within its plan
    pub id: String,
    pub description: String,
    pub tool: String,
    pub args: ToolArgs,
    /// Lower runs first
    pub priority: u32,
    /// Ids of tasks that must complete before this one runs
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        tool: impl Into<String>,
        priority: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            tool: tool.into(),
            args: ToolArgs::new(),
            priority,
            dependencies: Vec::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }
}

/// Ordered task list built for one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub goal: GoalKind,
    /// Label the user asked for
    pub label: String,
    pub tasks: Vec<Task>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}
