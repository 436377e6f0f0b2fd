//! Classify free text into a single tool-ready intent

use crate::core::types::ToolArgs;
use crate::intent::entities::{EntityExtractor, EntityKind};
use crate::intent::rules::{self, IntentAction, IntentRule, UNKNOWN_CONFIDENCE};
use crate::tools::dispatcher::PROJECT_ANALYSIS_TASK;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Intents below this confidence are not acted on
pub const MIN_CONFIDENCE: f32 = 0.3;

/// Classified user request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub action: IntentAction,
    /// Confidence in the interpretation (0.0 - 1.0)
    pub confidence: f32,
    /// Extracted entities keyed by `EntityKind::key`
    pub entities: BTreeMap<String, String>,
    /// Tool to invoke, or `"unknown"`
    pub tool: String,
    pub args: ToolArgs,
}

impl Intent {
    pub fn unknown() -> Self {
        Self {
            action: IntentAction::Unknown,
            confidence: UNKNOWN_CONFIDENCE,
            entities: BTreeMap::new(),
            tool: IntentAction::Unknown.name().to_string(),
            args: ToolArgs::new(),
        }
    }

    pub fn is_actionable(&self, min_confidence: f32) -> bool {
        self.action != IntentAction::Unknown && self.confidence >= min_confidence
    }

    pub fn entity(&self, kind: EntityKind) -> Option<&str> {
        self.entities.get(kind.key()).map(String::as_str)
    }
}

/// Rule-table classifier
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one input; always returns exactly one intent
    pub fn classify(&self, text: &str) -> Intent {
        let normalized = text.trim().to_lowercase();
        let Some(rule) = rules::first_match(&normalized) else {
            tracing::debug!("No intent rule matched {:?}", text);
            return Intent::unknown();
        };

        let intent = build_intent(rule, text);
        tracing::debug!(
            action = %intent.action,
            confidence = intent.confidence,
            "Classified input"
        );
        intent
    }
}

fn build_intent(rule: &IntentRule, text: &str) -> Intent {
    let mut entities = BTreeMap::new();
    let mut args = ToolArgs::new();
    let mut take = |kind: EntityKind, arg: &str| {
        let value = EntityExtractor::extract(kind, text);
        entities.insert(kind.key().to_string(), value.clone());
        args.insert(arg.to_string(), Value::String(value));
    };

    match rule.action {
        IntentAction::ReadFile => take(EntityKind::ReadFileName, "path"),
        IntentAction::WriteFile => {
            take(EntityKind::WriteFileName, "path");
            take(EntityKind::Content, "content");
        }
        IntentAction::ListDirectory => take(EntityKind::Path, "path"),
        IntentAction::SearchFiles => take(EntityKind::SearchTerm, "term"),
        IntentAction::Calculate => take(EntityKind::Expression, "expression"),
        IntentAction::GetCurrentTime | IntentAction::AnalyzeProject | IntentAction::Unknown => {}
    }

    match rule.action {
        IntentAction::SearchFiles => {
            args.insert("path".into(), Value::String(".".into()));
        }
        IntentAction::GetCurrentTime => {
            args.insert("format".into(), Value::String("local".into()));
        }
        IntentAction::AnalyzeProject => {
            args.insert("task".into(), Value::String(PROJECT_ANALYSIS_TASK.into()));
        }
        _ => {}
    }

    Intent {
        action: rule.action,
        confidence: rule.confidence,
        entities,
        tool: rule.tool.to_string(),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::arg_str;

    fn classify(text: &str) -> Intent {
        IntentClassifier::new().classify(text)
    }

    #[test]
    fn test_read_intent() {
        let intent = classify("read file notes.md");
        assert_eq!(intent.action, IntentAction::ReadFile);
        assert_eq!(intent.confidence, 0.9);
        assert_eq!(intent.tool, "read_file");
        assert_eq!(arg_str(&intent.args, "path"), Some("notes.md"));
        assert_eq!(intent.entity(EntityKind::ReadFileName), Some("notes.md"));
    }

    #[test]
    fn test_write_intent_has_path_and_content() {
        let intent = classify("create file hello.txt with \"hi there\"를");
        assert_eq!(intent.action, IntentAction::WriteFile);
        assert_eq!(intent.confidence, 0.8);
        assert_eq!(arg_str(&intent.args, "path"), Some("hello.txt"));
        assert_eq!(arg_str(&intent.args, "content"), Some("hi there"));
    }

    #[test]
    fn test_list_intent_defaults_to_current_dir() {
        let intent = classify("뭐가 있어?");
        assert_eq!(intent.action, IntentAction::ListDirectory);
        assert_eq!(arg_str(&intent.args, "path"), Some("."));
    }

    #[test]
    fn test_search_intent_searches_current_dir() {
        let intent = classify("search .rs");
        assert_eq!(intent.action, IntentAction::SearchFiles);
        assert_eq!(arg_str(&intent.args, "term"), Some(".rs"));
        assert_eq!(arg_str(&intent.args, "path"), Some("."));
    }

    #[test]
    fn test_calculate_intent_spoken() {
        let intent = classify("2 더하기 3");
        assert_eq!(intent.action, IntentAction::Calculate);
        assert_eq!(arg_str(&intent.args, "expression"), Some("2 + 3"));
    }

    #[test]
    fn test_time_intent() {
        let intent = classify("지금 몇시야?");
        assert_eq!(intent.tool, "get_current_time");
        assert_eq!(arg_str(&intent.args, "format"), Some("local"));
        assert!(intent.entities.is_empty());
    }

    #[test]
    fn test_analyze_intent_maps_to_complex_task() {
        let intent = classify("프로젝트 분석해줘");
        assert_eq!(intent.action, IntentAction::AnalyzeProject);
        assert_eq!(intent.tool, "complex_task");
        assert_eq!(arg_str(&intent.args, "task"), Some("project_analysis"));
    }

    #[test]
    fn test_unknown_intent() {
        for input in ["", "hi", "hello"] {
            let intent = classify(input);
            assert_eq!(intent.action, IntentAction::Unknown);
            assert!(intent.confidence <= 0.1);
            assert_eq!(intent.tool, "unknown");
            assert!(intent.args.is_empty());
            assert!(!intent.is_actionable(MIN_CONFIDENCE));
        }
    }

    #[test]
    fn test_confidence_in_range() {
        for rule in crate::intent::rules::RULES {
            assert!((0.0..=1.0).contains(&rule.confidence));
            assert!(rule.confidence >= MIN_CONFIDENCE);
        }
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&classify("지금 몇시야?")).unwrap();
        assert!(json.contains("\"action\":\"get_current_time\""));
    }
}
