//! Intent rule table
//!
//! An ordered decision list: the first rule with any matching pattern
//! decides the intent. Patterns run against trimmed, lower-cased input.

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

/// Actions a user can ask for in free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    ReadFile,
    WriteFile,
    ListDirectory,
    SearchFiles,
    Calculate,
    GetCurrentTime,
    AnalyzeProject,
    /// Could not determine intent
    Unknown,
}

impl IntentAction {
    pub fn name(&self) -> &'static str {
        match self {
            IntentAction::ReadFile => "read_file",
            IntentAction::WriteFile => "write_file",
            IntentAction::ListDirectory => "list_directory",
            IntentAction::SearchFiles => "search_files",
            IntentAction::Calculate => "calculate",
            IntentAction::GetCurrentTime => "get_current_time",
            IntentAction::AnalyzeProject => "analyze_project",
            IntentAction::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IntentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the decision list
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub action: IntentAction,
    pub confidence: f32,
    /// Tool the action maps onto
    pub tool: &'static str,
    pub patterns: &'static [&'static str],
}

/// Confidence given to input no rule recognizes
pub const UNKNOWN_CONFIDENCE: f32 = 0.1;

pub const RULES: &[IntentRule] = &[
    IntentRule {
        action: IntentAction::ReadFile,
        confidence: 0.9,
        tool: "read_file",
        patterns: &[
            "파일.*읽",
            ".*내용.*보여",
            ".*열어",
            ".*확인.*파일",
            "read.*file",
            "show.*content",
        ],
    },
    IntentRule {
        action: IntentAction::WriteFile,
        confidence: 0.8,
        tool: "write_file",
        patterns: &[
            "파일.*만들",
            ".*저장",
            ".*생성.*파일",
            ".*작성",
            "create.*file",
            "write.*file",
        ],
    },
    IntentRule {
        action: IntentAction::ListDirectory,
        confidence: 0.9,
        tool: "list_directory",
        patterns: &[
            "폴더.*보여",
            "디렉토리.*확인",
            ".*목록",
            "뭐.*있",
            "list.*dir",
            "show.*folder",
        ],
    },
    IntentRule {
        action: IntentAction::SearchFiles,
        confidence: 0.8,
        tool: "search_files",
        patterns: &["찾.*파일", "검색", ".*어디.*있", "find.*file", "search"],
    },
    IntentRule {
        action: IntentAction::Calculate,
        confidence: 0.9,
        tool: "calculate",
        patterns: &[
            "계산",
            "더하",
            "빼",
            "곱하",
            "나누",
            "calculate",
            r"\+|-|\*|/|=",
        ],
    },
    IntentRule {
        action: IntentAction::GetCurrentTime,
        confidence: 0.9,
        tool: "get_current_time",
        patterns: &["시간", "몇시", "언제", "time", "clock"],
    },
    IntentRule {
        action: IntentAction::AnalyzeProject,
        confidence: 0.8,
        tool: "complex_task",
        patterns: &["프로젝트.*분석", "구조.*파악", "전체.*확인", "analyze.*project"],
    },
];

static COMPILED: Lazy<Vec<RegexSet>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|rule| RegexSet::new(rule.patterns).expect("intent patterns are valid"))
        .collect()
});

/// First rule matching already-normalized input
pub fn first_match(normalized: &str) -> Option<&'static IntentRule> {
    RULES
        .iter()
        .zip(COMPILED.iter())
        .find(|(_, set)| set.is_match(normalized))
        .map(|(rule, _)| rule)
}
