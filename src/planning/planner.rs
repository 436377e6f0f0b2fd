//! Goal label to plan

use crate::core::config::AgentConfig;
use crate::core::error::{AgentError, Result};
use crate::memory::MemoryStore;
use crate::planning::task::Plan;
use crate::planning::templates::{GoalKind, GoalTemplate, PlanVars, TomlPlans};
use chrono::Local;
use std::path::Path;

/// Template table compiled into the binary
pub const BUILTIN_PLANS: &str = include_str!("../../data/plans.toml");

/// Goal planned when no template matches
pub const DEFAULT_GOAL: GoalKind = GoalKind::ProjectAnalysis;

/// Expands goal labels into task lists from a template table
#[derive(Debug, Clone)]
pub struct Planner {
    templates: Vec<GoalTemplate>,
}

impl Planner {
    /// Planner over the built-in templates
    pub fn with_defaults() -> Self {
        Self::parse_toml(BUILTIN_PLANS).expect("built-in plan table is valid")
    }

    /// Built-in templates, or the configured `plans_file`
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        match &config.plans_file {
            Some(path) => Self::load_from_toml(path),
            None => Ok(Self::with_defaults()),
        }
    }

    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let planner = Self::parse_toml(&content)?;
        tracing::info!(
            "Loaded {} goal templates from {}",
            planner.templates.len(),
            path.display()
        );
        Ok(planner)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let table: TomlPlans = toml::from_str(content)?;
        let templates = table
            .goals
            .into_iter()
            .map(|goal| goal.into_template())
            .collect::<Result<Vec<_>>>()?;

        if !templates.iter().any(|t| t.kind == DEFAULT_GOAL) {
            return Err(AgentError::PlanTemplate(format!(
                "no template for default goal '{}'",
                DEFAULT_GOAL
            )));
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[GoalTemplate] {
        &self.templates
    }

    /// First template whose keywords appear in the label
    pub fn match_goal(&self, goal_label: &str) -> Option<&GoalTemplate> {
        self.templates.iter().find(|t| t.matches(goal_label))
    }

    /// Build a plan with variables captured now from an empty memory
    pub fn plan(&self, goal_label: &str) -> Plan {
        let vars = PlanVars::capture(
            Local::now(),
            &MemoryStore::default().stats(),
            &AgentConfig::default().project_manifest,
        );
        self.plan_with(goal_label, &vars)
    }

    /// Build a plan; unmatched labels get the default goal
    pub fn plan_with(&self, goal_label: &str, vars: &PlanVars) -> Plan {
        let template = match self.match_goal(goal_label) {
            Some(template) => template,
            None => {
                tracing::info!("No goal matched {:?}, using {}", goal_label, DEFAULT_GOAL);
                self.default_template()
            }
        };

        tracing::info!(
            goal = %template.kind,
            tasks = template.tasks.len(),
            "Planned goal"
        );

        Plan {
            goal: template.kind,
            label: goal_label.to_string(),
            tasks: template.tasks.iter().map(|t| t.instantiate(vars)).collect(),
        }
    }

    fn default_template(&self) -> &GoalTemplate {
        // parse_toml guarantees the default goal is present
        self.templates
            .iter()
            .find(|t| t.kind == DEFAULT_GOAL)
            .unwrap_or(&self.templates[0])
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::arg_str;

    fn ids(plan: &Plan) -> Vec<&str> {
        plan.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_builtin_table_parses() {
        let planner = Planner::with_defaults();
        let kinds: Vec<_> = planner.templates().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                GoalKind::ProjectAnalysis,
                GoalKind::DocumentGeneration,
                GoalKind::Cleanup,
                GoalKind::Demo
            ]
        );
    }

    #[test]
    fn test_project_analysis_plan() {
        let plan = Planner::with_defaults().plan("프로젝트 분석해줘");
        assert_eq!(plan.goal, GoalKind::ProjectAnalysis);
        assert_eq!(ids(&plan), vec!["analyze-1", "analyze-2", "analyze-3", "analyze-4"]);
        assert_eq!(arg_str(&plan.tasks[2].args, "path"), Some("Cargo.toml"));
        assert!(plan.tasks[1..].iter().all(|t| t.dependencies == vec!["analyze-1"]));
    }

    #[test]
    fn test_document_plan_fills_placeholders() {
        let plan = Planner::with_defaults().plan("문서 생성");
        assert_eq!(plan.goal, GoalKind::DocumentGeneration);
        let content = arg_str(&plan.tasks[1].args, "content").unwrap();
        assert!(content.starts_with("# Learning Summary"));
        let expression = arg_str(&plan.tasks[2].args, "expression").unwrap();
        assert!(expression.ends_with(" / 60 / 60"));
        assert!(!expression.contains('{'));
    }

    #[test]
    fn test_cleanup_plan_is_a_chain() {
        let plan = Planner::with_defaults().plan("Cleanup");
        assert_eq!(plan.goal, GoalKind::Cleanup);
        assert_eq!(ids(&plan), vec!["clean-1", "clean-2", "clean-3"]);
        assert!(plan.tasks[0].dependencies.is_empty());
        assert_eq!(plan.tasks[1].dependencies, vec!["clean-1"]);
        assert_eq!(plan.tasks[2].dependencies, vec!["clean-2"]);
    }

    #[test]
    fn test_unmatched_label_uses_default_goal() {
        let planner = Planner::with_defaults();
        assert!(planner.match_goal("make me a sandwich").is_none());
        let plan = planner.plan("make me a sandwich");
        assert_eq!(plan.goal, GoalKind::ProjectAnalysis);
        assert_eq!(plan.label, "make me a sandwich");
    }

    #[test]
    fn test_demo_read_depends_on_write() {
        let plan = Planner::with_defaults().plan("auto");
        assert_eq!(plan.goal, GoalKind::Demo);
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.task("demo-5").unwrap().dependencies, vec!["demo-4"]);
    }

    #[test]
    fn test_custom_table_requires_default_goal() {
        let result = Planner::parse_toml(
            r#"
            [[goals]]
            kind = "cleanup"
            label = "Cleanup"
            keywords = ["clean"]

            [[goals.tasks]]
            id = "clean-1"
            description = "List"
            tool = "list_directory"
            priority = 1
            "#,
        );
        assert!(matches!(result, Err(AgentError::PlanTemplate(_))));
    }

    #[test]
    fn test_plan_with_custom_vars() {
        let vars = PlanVars::new()
            .set("manifest", "package.json")
            .set("epoch_seconds", "0");
        let plan = Planner::with_defaults().plan_with("analysis", &vars);
        assert_eq!(arg_str(&plan.tasks[2].args, "path"), Some("package.json"));
    }
}
