//! Goal planning and plan execution
//!
//! A goal label selects a hand-authored template, the template becomes a
//! [`Plan`], and the [`TaskExecutor`] runs it against the tool dispatcher.

pub mod executor;
pub mod planner;
pub mod task;
pub mod templates;

pub use executor::{ExecutionEvent, ExecutionReport, SchedulingMode, TaskExecutor, TaskOutcome};
pub use planner::Planner;
pub use task::{Plan, Task};
pub use templates::{GoalKind, PlanVars};
