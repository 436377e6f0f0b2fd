//! Goal templates - hand-authored task lists keyed by goal
//!
//! Templates are loaded from TOML. String arguments may contain `{var}`
//! placeholders that are filled from [`PlanVars`] when a plan is built.

use crate::core::error::{AgentError, Result};
use crate::memory::MemoryStats;
use crate::planning::task::Task;
use crate::tools::catalog::ToolId;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Goals the planner knows how to expand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    ProjectAnalysis,
    DocumentGeneration,
    Cleanup,
    /// Smoke run touching every basic tool
    Demo,
}

impl GoalKind {
    pub fn name(&self) -> &'static str {
        match self {
            GoalKind::ProjectAnalysis => "project_analysis",
            GoalKind::DocumentGeneration => "document_generation",
            GoalKind::Cleanup => "cleanup",
            GoalKind::Demo => "demo",
        }
    }

    pub fn from_name(name: &str) -> Option<GoalKind> {
        match name {
            "project_analysis" => Some(GoalKind::ProjectAnalysis),
            "document_generation" => Some(GoalKind::DocumentGeneration),
            "cleanup" => Some(GoalKind::Cleanup),
            "demo" => Some(GoalKind::Demo),
            _ => None,
        }
    }
}

impl std::fmt::Display for GoalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Task as authored in a template, before placeholders are filled
#[derive(Debug, Clone)]
pub struct TaskTemplate {
    pub id: String,
    pub description: String,
    pub tool: ToolId,
    pub priority: u32,
    pub args: BTreeMap<String, String>,
    pub depends_on: Vec<String>,
}

impl TaskTemplate {
    pub fn instantiate(&self, vars: &PlanVars) -> Task {
        let mut task = Task::new(
            self.id.clone(),
            self.description.clone(),
            self.tool.name(),
            self.priority,
        );
        for (key, value) in &self.args {
            task = task.with_arg(key.clone(), vars.render(value));
        }
        for dep in &self.depends_on {
            task = task.depends_on(dep.clone());
        }
        task
    }
}

#[derive(Debug, Clone)]
pub struct GoalTemplate {
    pub kind: GoalKind,
    /// Name shown to users
    pub label: String,
    /// Lower-cased; any one contained in a goal label selects this template
    pub keywords: Vec<String>,
    pub tasks: Vec<TaskTemplate>,
}

impl GoalTemplate {
    pub fn matches(&self, goal_label: &str) -> bool {
        let label = goal_label.to_lowercase();
        self.keywords.iter().any(|k| label.contains(k.as_str()))
    }
}

/// Values substituted into `{name}` placeholders
#[derive(Debug, Clone, Default)]
pub struct PlanVars {
    values: BTreeMap<String, String>,
}

impl PlanVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard variables for a plan built at `now`
    ///
    /// `now`, `epoch_seconds`, `manifest`, `learning_summary`, `completion_report`
    pub fn capture(now: DateTime<Local>, stats: &MemoryStats, manifest: &str) -> Self {
        let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
        Self::new()
            .set("now", stamp.clone())
            .set("epoch_seconds", now.timestamp().to_string())
            .set("manifest", manifest)
            .set("learning_summary", learning_summary(&stamp))
            .set("completion_report", completion_report(&stamp, stats))
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Fill known placeholders; unknown ones are left as written
    pub fn render(&self, text: &str) -> String {
        let mut rendered = text.to_string();
        for (name, value) in &self.values {
            rendered = rendered.replace(&format!("{{{}}}", name), value);
        }
        rendered
    }
}

fn learning_summary(stamp: &str) -> String {
    format!(
        "# Learning Summary\n\n\
         ## Written\n{stamp}\n\n\
         ## Covered\n\
         1. Tool dispatch over a fixed tool catalog\n\
         2. File reading, writing, listing and search\n\
         3. Restricted arithmetic evaluation\n\
         4. Clock queries in several formats\n\
         5. Goal planning with task dependencies\n\
         6. Bounded execution memory\n\n\
         ## Next steps\n\
         1. Web search integration\n\
         2. Database access\n\
         3. Message delivery\n\n\
         ---\n\
         *Generated by the planning agent.*\n"
    )
}

fn completion_report(stamp: &str, stats: &MemoryStats) -> String {
    format!(
        "# Completion Report\n\n\
         ## Execution statistics\n\
         - Tasks run: {}\n\
         - Tasks succeeded: {}\n\
         - Success rate: {:.1}%\n\
         - Written: {}\n\n\
         ---\n\
         *Generated by the planning agent.*\n",
        stats.total, stats.successful, stats.success_rate, stamp
    )
}

// --- TOML loading ---

#[derive(Debug, Deserialize)]
pub(crate) struct TomlPlans {
    pub goals: Vec<TomlGoal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TomlGoal {
    kind: String,
    label: String,
    keywords: Vec<String>,
    tasks: Vec<TomlTask>,
}

#[derive(Debug, Deserialize)]
struct TomlTask {
    id: String,
    description: String,
    tool: String,
    priority: u32,
    #[serde(default)]
    args: BTreeMap<String, String>,
    #[serde(default)]
    depends_on: Vec<String>,
}

impl TomlGoal {
    pub(crate) fn into_template(self) -> Result<GoalTemplate> {
        let kind = GoalKind::from_name(&self.kind)
            .ok_or_else(|| AgentError::PlanTemplate(format!("unknown goal kind '{}'", self.kind)))?;

        let ids: Vec<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        for task in &self.tasks {
            if let Some(missing) = task.depends_on.iter().find(|d| !ids.contains(&d.as_str())) {
                return Err(AgentError::PlanTemplate(format!(
                    "task '{}' in goal '{}' depends on unknown task '{}'",
                    task.id, self.kind, missing
                )));
            }
        }

        let tasks = self
            .tasks
            .into_iter()
            .map(TomlTask::into_template)
            .collect::<Result<Vec<_>>>()?;

        Ok(GoalTemplate {
            kind,
            label: self.label,
            keywords: self.keywords.iter().map(|k| k.to_lowercase()).collect(),
            tasks,
        })
    }
}

impl TomlTask {
    fn into_template(self) -> Result<TaskTemplate> {
        let tool = ToolId::from_name(&self.tool).ok_or_else(|| {
            AgentError::PlanTemplate(format!("task '{}' uses unknown tool '{}'", self.id, self.tool))
        })?;
        Ok(TaskTemplate {
            id: self.id,
            description: self.description,
            tool,
            priority: self.priority,
            args: self.args,
            depends_on: self.depends_on,
        })
    }
}
