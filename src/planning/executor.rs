//! Plan execution
//!
//! Tasks run one at a time in priority order. A task whose dependencies have
//! not completed in the current run is skipped, never retried. Every executed
//! task is recorded in memory, success or not.

use crate::core::config::AgentConfig;
use crate::core::types::{truncate_chars, RunId};
use crate::memory::MemoryStore;
use crate::planning::task::{Plan, Task};
use crate::tools::dispatcher::ToolDispatcher;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How tasks with dependencies are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    /// One pass in priority order; a task is skipped if any dependency has
    /// not completed by the time it comes up
    #[default]
    SinglePass,
    /// After each task, run the highest-priority task whose dependencies are
    /// met; whatever never becomes ready is skipped at the end
    ReadyQueue,
}

/// What happened to one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskOutcome {
    Completed { content: String },
    Failed { error: String },
    Skipped { missing: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub task_id: String,
    pub description: String,
    pub tool: String,
    pub outcome: TaskOutcome,
}

/// Progress notifications emitted while a plan runs
#[derive(Debug)]
pub enum ExecutionEvent<'a> {
    Started(&'a Task),
    /// The tool has been used this many times according to memory
    Recalled { tool: &'a str, uses: usize },
    Finished(&'a TaskReport),
}

/// Result of one executor run
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub run_id: RunId,
    pub tasks: Vec<TaskReport>,
    completed: AHashSet<String>,
}

impl ExecutionReport {
    fn new() -> Self {
        Self {
            run_id: RunId::new(),
            tasks: Vec::new(),
            completed: AHashSet::new(),
        }
    }

    pub fn is_completed(&self, task_id: &str) -> bool {
        self.completed.contains(task_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Failed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Skipped { .. }))
    }

    /// Task ids in the order they were reported
    pub fn order(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.task_id.as_str()).collect()
    }

    pub fn outcome(&self, task_id: &str) -> Option<&TaskOutcome> {
        self.tasks
            .iter()
            .find(|t| t.task_id == task_id)
            .map(|t| &t.outcome)
    }

    fn count(&self, pred: impl Fn(&TaskOutcome) -> bool) -> usize {
        self.tasks.iter().filter(|t| pred(&t.outcome)).count()
    }
}

/// Runs plans against the dispatcher, recording into memory
pub struct TaskExecutor {
    dispatcher: ToolDispatcher,
    memory: MemoryStore,
    mode: SchedulingMode,
    step_delay: Duration,
}

impl TaskExecutor {
    pub fn new(dispatcher: ToolDispatcher, memory: MemoryStore) -> Self {
        Self {
            dispatcher,
            memory,
            mode: SchedulingMode::default(),
            step_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            ToolDispatcher::from_config(config),
            MemoryStore::new(config.memory_capacity),
        )
        .with_mode(config.scheduling)
        .with_step_delay(Duration::from_millis(config.step_delay_ms))
    }

    pub fn with_mode(mut self, mode: SchedulingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    pub fn execute(&mut self, plan: &Plan) -> ExecutionReport {
        self.execute_observed(plan, |_| {})
    }

    /// Execute, reporting progress to `observe` as it happens
    pub fn execute_observed(
        &mut self,
        plan: &Plan,
        mut observe: impl FnMut(ExecutionEvent<'_>),
    ) -> ExecutionReport {
        let mut report = ExecutionReport::new();
        tracing::info!(
            run = %report.run_id,
            goal = %plan.goal,
            tasks = plan.len(),
            "Executing plan"
        );

        let mut ordered: Vec<&Task> = plan.tasks.iter().collect();
        ordered.sort_by_key(|t| t.priority);

        match self.mode {
            SchedulingMode::SinglePass => {
                for task in ordered {
                    let missing = missing_dependencies(task, &report.completed);
                    if missing.is_empty() {
                        self.run_task(task, &mut report, &mut observe);
                    } else {
                        skip_task(task, missing, &mut report, &mut observe);
                    }
                }
            }
            SchedulingMode::ReadyQueue => {
                let mut pending = ordered;
                while let Some(idx) = pending
                    .iter()
                    .position(|t| missing_dependencies(t, &report.completed).is_empty())
                {
                    let task = pending.remove(idx);
                    self.run_task(task, &mut report, &mut observe);
                }
                for task in pending {
                    let missing = missing_dependencies(task, &report.completed);
                    skip_task(task, missing, &mut report, &mut observe);
                }
            }
        }

        tracing::info!(
            run = %report.run_id,
            completed = report.completed_count(),
            failed = report.failed_count(),
            skipped = report.skipped_count(),
            "Plan finished"
        );
        report
    }

    fn run_task(
        &mut self,
        task: &Task,
        report: &mut ExecutionReport,
        observe: &mut impl FnMut(ExecutionEvent<'_>),
    ) {
        tracing::info!("Running task {}: {}", task.id, task.description);
        observe(ExecutionEvent::Started(task));

        let uses = self.memory.query(&task.tool).len();
        if uses > 0 {
            tracing::info!("Memory: {} used {} times before", task.tool, uses);
            observe(ExecutionEvent::Recalled {
                tool: &task.tool,
                uses,
            });
        }

        let result = self.dispatcher.invoke(&task.tool, &task.args);
        let outcome = if result.success {
            self.memory.record(&task.description, &result.content, true);
            report.completed.insert(task.id.clone());
            tracing::debug!(
                "Task {} result: {}",
                task.id,
                truncate_chars(&result.content, 100)
            );
            TaskOutcome::Completed {
                content: result.content,
            }
        } else {
            let error = result.display_text().to_string();
            tracing::warn!("Task {} failed: {}", task.id, error);
            self.memory
                .record(&task.description, format!("Error: {}", error), false);
            TaskOutcome::Failed { error }
        };

        report.tasks.push(TaskReport {
            task_id: task.id.clone(),
            description: task.description.clone(),
            tool: task.tool.clone(),
            outcome,
        });
        if let Some(entry) = report.tasks.last() {
            observe(ExecutionEvent::Finished(entry));
        }

        if !self.step_delay.is_zero() {
            std::thread::sleep(self.step_delay);
        }
    }
}

fn missing_dependencies(task: &Task, completed: &AHashSet<String>) -> Vec<String> {
    task.dependencies
        .iter()
        .filter(|dep| !completed.contains(dep.as_str()))
        .cloned()
        .collect()
}

fn skip_task(
    task: &Task,
    missing: Vec<String>,
    report: &mut ExecutionReport,
    observe: &mut impl FnMut(ExecutionEvent<'_>),
) {
    tracing::warn!(
        "Skipping task {} (waiting on {})",
        task.id,
        missing.join(", ")
    );
    report.tasks.push(TaskReport {
        task_id: task.id.clone(),
        description: task.description.clone(),
        tool: task.tool.clone(),
        outcome: TaskOutcome::Skipped { missing },
    });
    if let Some(entry) = report.tasks.last() {
        observe(ExecutionEvent::Finished(entry));
    }
}
