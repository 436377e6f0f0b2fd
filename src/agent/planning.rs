//! Goal-driven agent: plan a goal, run it, remember what happened

use crate::core::config::AgentConfig;
use crate::core::error::Result;
use crate::core::types::truncate_chars;
use crate::planning::executor::{ExecutionEvent, ExecutionReport, TaskExecutor, TaskOutcome};
use crate::planning::planner::Planner;
use crate::planning::templates::PlanVars;
use chrono::Local;
use std::io::Write;

/// Records shown by the `memory` command
const MEMORY_VIEW_LEN: usize = 5;

pub struct PlanningAgent {
    planner: Planner,
    executor: TaskExecutor,
    project_manifest: String,
    preview_chars: usize,
    /// Tasks completed across every run of this agent
    completed_tasks: usize,
}

impl PlanningAgent {
    pub fn new(planner: Planner, executor: TaskExecutor) -> Self {
        let defaults = AgentConfig::default();
        Self {
            planner,
            executor,
            project_manifest: defaults.project_manifest,
            preview_chars: defaults.result_preview_chars,
            completed_tasks: 0,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let mut agent = Self::new(Planner::from_config(config)?, TaskExecutor::from_config(config));
        agent.project_manifest = config.project_manifest.clone();
        agent.preview_chars = config.result_preview_chars;
        Ok(agent)
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn executor(&self) -> &TaskExecutor {
        &self.executor
    }

    /// Handle one prompt line: `memory`, `stats`, or a goal
    pub fn handle(&mut self, input: &str, out: &mut dyn Write) -> Result<()> {
        match input.trim() {
            "memory" => self.show_memory(out),
            "stats" => self.show_stats(out),
            goal if self.planner.match_goal(goal).is_some() => {
                self.run_goal(goal, out)?;
                Ok(())
            }
            _ => {
                let labels: Vec<&str> = self
                    .planner
                    .templates()
                    .iter()
                    .filter_map(|t| t.keywords.first().map(String::as_str))
                    .collect();
                writeln!(
                    out,
                    "Hint: ask for a goal ({}), or type \"memory\" or \"stats\".\n",
                    labels.join(", ")
                )?;
                Ok(())
            }
        }
    }

    /// Plan `goal` with variables captured from memory, run it, narrate progress
    pub fn run_goal(&mut self, goal: &str, out: &mut dyn Write) -> Result<ExecutionReport> {
        let vars = PlanVars::capture(
            Local::now(),
            &self.executor.memory().stats(),
            &self.project_manifest,
        );
        let plan = self.planner.plan_with(goal, &vars);

        writeln!(out, "Goal: {}", goal)?;
        writeln!(out, "Plan: {} ({} tasks)\n", plan.goal, plan.len())?;

        let preview_chars = self.preview_chars;
        let mut write_error = None;
        let report = self.executor.execute_observed(&plan, |event| {
            if write_error.is_none() {
                if let Err(e) = narrate(out, &event, preview_chars) {
                    write_error = Some(e);
                }
            }
        });
        if let Some(e) = write_error {
            return Err(e.into());
        }

        self.completed_tasks += report.completed_count();
        writeln!(
            out,
            "Plan finished: {} done, {} failed, {} skipped.\n",
            report.completed_count(),
            report.failed_count(),
            report.skipped_count()
        )?;
        Ok(report)
    }

    fn show_memory(&self, out: &mut dyn Write) -> Result<()> {
        let memory = self.executor.memory();
        writeln!(out, "\nAgent memory:")?;
        if memory.is_empty() {
            writeln!(out, "   Nothing remembered yet.")?;
        } else {
            for record in memory.recent(MEMORY_VIEW_LEN) {
                let status = if record.success { "ok " } else { "err" };
                writeln!(
                    out,
                    "   [{}] {}: {}",
                    status,
                    record.timestamp.format("%H:%M:%S"),
                    record.event
                )?;
            }
            if memory.len() > MEMORY_VIEW_LEN {
                writeln!(out, "   ... and {} more", memory.len() - MEMORY_VIEW_LEN)?;
            }
        }
        writeln!(out)?;
        Ok(())
    }

    fn show_stats(&self, out: &mut dyn Write) -> Result<()> {
        let memory = self.executor.memory();
        let stats = memory.stats();
        writeln!(out, "\nAgent statistics:")?;
        writeln!(out, "   Tasks run: {}", stats.total)?;
        writeln!(out, "   Succeeded: {}", stats.successful)?;
        writeln!(out, "   Success rate: {:.1}%", stats.success_rate)?;
        writeln!(out, "   Memory: {}/{}", memory.len(), memory.capacity())?;
        writeln!(out, "   Completed tasks: {}\n", self.completed_tasks)?;
        Ok(())
    }
}

fn narrate(out: &mut dyn Write, event: &ExecutionEvent<'_>, preview_chars: usize) -> std::io::Result<()> {
    match event {
        ExecutionEvent::Started(task) => writeln!(out, "Running: {}", task.description),
        ExecutionEvent::Recalled { tool, uses } => {
            writeln!(out, "Memory: used {} {} times before", tool, uses)
        }
        ExecutionEvent::Finished(entry) => match &entry.outcome {
            TaskOutcome::Completed { content } => {
                let preview = truncate_chars(content, preview_chars);
                let ellipsis = if preview.len() < content.len() { "..." } else { "" };
                writeln!(out, "Done: {}", entry.description)?;
                writeln!(out, "Result: {}{}\n", preview, ellipsis)
            }
            TaskOutcome::Failed { error } => {
                writeln!(out, "Failed: {} - {}\n", entry.description, error)
            }
            TaskOutcome::Skipped { missing } => writeln!(
                out,
                "Waiting: task \"{}\" (depends on: {})",
                entry.task_id,
                missing.join(", ")
            ),
        },
    }
}
