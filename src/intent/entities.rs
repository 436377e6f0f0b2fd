//! Heuristic entity extraction from free text
//!
//! Each entity kind has an ordered list of patterns. The first pattern that
//! matches wins; later patterns are only fallbacks. Extraction runs on the
//! original text, not the lower-cased form used for intent matching.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kinds of entity the classifier asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// File to read
    ReadFileName,
    /// File to create or overwrite
    WriteFileName,
    /// Text to write
    Content,
    /// Directory to list
    Path,
    /// Name fragment to search for
    SearchTerm,
    /// Arithmetic expression
    Expression,
}

impl EntityKind {
    /// Key used in `Intent::entities`
    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::ReadFileName | EntityKind::WriteFileName => "file_name",
            EntityKind::Content => "content",
            EntityKind::Path => "path",
            EntityKind::SearchTerm => "search_term",
            EntityKind::Expression => "expression",
        }
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("entity pattern is valid"))
        .collect()
}

static FILE_NAME: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?:파일|file)\s*[이가를]?\s*(\S+)",
        r"(\S+\.(?:md|txt|js|ts|json|py|rs|toml))",
        r#""([^"]+)""#,
        r"'([^']+)'",
    ])
});

static CONTENT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r#"내용[은이가]?\s*["']([^"']+)["']"#,
        r#"["']([^"']+)["']\s*(?:로|으로|를|을)"#,
        r#"저장[하해]\s*["']([^"']+)["']"#,
    ])
});

static PATH: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?:폴더|디렉토리|directory)\s*(\S+)",
        r"(\S+/)",
        r"(src|docs|examples)",
    ])
});

static SEARCH_TERM: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r#"찾.*["']([^"']+)["']"#,
        r#"검색.*["']([^"']+)["']"#,
        r"(\.[a-zA-Z]+)",
        r"([a-zA-Z0-9_-]+)",
    ])
});

static ARITHMETIC_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9+\-*/().\s]+").expect("arithmetic run pattern is valid"));

/// Spoken operators, replaced before numerals so `마이너스` survives intact
const OPERATOR_WORDS: &[(&str, &str)] = &[
    ("더하기", "+"),
    ("플러스", "+"),
    ("빼기", "-"),
    ("마이너스", "-"),
    ("곱하기", "*"),
    ("곱", "*"),
    ("나누기", "/"),
    ("나눈", "/"),
];

const NUMERALS: &[(char, char)] = &[
    ('일', '1'),
    ('이', '2'),
    ('삼', '3'),
    ('사', '4'),
    ('오', '5'),
    ('육', '6'),
    ('칠', '7'),
    ('팔', '8'),
    ('구', '9'),
];

pub const DEFAULT_READ_FILE: &str = "README.md";
pub const DEFAULT_WRITE_FILE: &str = "new-file.txt";
pub const DEFAULT_PATH: &str = ".";
pub const DEFAULT_SEARCH_TERM: &str = ".ts";
pub const DEFAULT_EXPRESSION: &str = "2 + 2";

/// Stateless extractor over the pattern tables above
pub struct EntityExtractor;

impl EntityExtractor {
    /// Raw heuristic match, if any
    pub fn find(kind: EntityKind, text: &str) -> Option<String> {
        match kind {
            EntityKind::ReadFileName | EntityKind::WriteFileName => first_capture(&FILE_NAME, text),
            EntityKind::Content => first_capture(&CONTENT, text),
            EntityKind::Path => first_capture(&PATH, text),
            EntityKind::SearchTerm => first_capture(&SEARCH_TERM, text),
            EntityKind::Expression => find_expression(text),
        }
    }

    /// Heuristic match, or the kind's default
    pub fn extract(kind: EntityKind, text: &str) -> String {
        Self::find(kind, text).unwrap_or_else(|| default_for(kind))
    }
}

fn default_for(kind: EntityKind) -> String {
    match kind {
        EntityKind::ReadFileName => DEFAULT_READ_FILE.to_string(),
        EntityKind::WriteFileName => DEFAULT_WRITE_FILE.to_string(),
        EntityKind::Content => format!(
            "Created by the command agent.\nCreated at: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
        EntityKind::Path => DEFAULT_PATH.to_string(),
        EntityKind::SearchTerm => DEFAULT_SEARCH_TERM.to_string(),
        EntityKind::Expression => DEFAULT_EXPRESSION.to_string(),
    }
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

fn find_expression(text: &str) -> Option<String> {
    arithmetic_run(text).or_else(|| arithmetic_run(&spell_out(text)))
}

/// First run of arithmetic characters holding both a digit and an operator
fn arithmetic_run(text: &str) -> Option<String> {
    ARITHMETIC_RUN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|run| {
            run.chars().any(|c| c.is_ascii_digit()) && run.chars().any(|c| "+-*/".contains(c))
        })
        .map(str::to_string)
}

/// Replace spoken operators and numerals with symbols
fn spell_out(text: &str) -> String {
    let mut replaced = text.to_string();
    for (word, symbol) in OPERATOR_WORDS {
        replaced = replaced.replace(word, symbol);
    }
    replaced
        .chars()
        .map(|c| {
            NUMERALS
                .iter()
                .find(|(numeral, _)| *numeral == c)
                .map_or(c, |(_, digit)| *digit)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_after_keyword() {
        assert_eq!(
            EntityExtractor::find(EntityKind::ReadFileName, "read file notes.md please"),
            Some("notes.md".into())
        );
    }

    #[test]
    fn test_file_name_by_extension() {
        assert_eq!(
            EntityExtractor::find(EntityKind::WriteFileName, "config.toml 만들어줘"),
            Some("config.toml".into())
        );
    }

    #[test]
    fn test_file_name_quoted() {
        assert_eq!(
            EntityExtractor::find(EntityKind::ReadFileName, r#"open "LICENSE" now"#),
            Some("LICENSE".into())
        );
    }

    #[test]
    fn test_file_name_defaults() {
        assert_eq!(EntityExtractor::extract(EntityKind::ReadFileName, "보여줘"), "README.md");
        assert_eq!(EntityExtractor::extract(EntityKind::WriteFileName, "만들어줘"), "new-file.txt");
    }

    #[test]
    fn test_content_patterns_in_order() {
        assert_eq!(
            EntityExtractor::find(EntityKind::Content, "내용은 'hello world' 로 해줘"),
            Some("hello world".into())
        );
        assert_eq!(
            EntityExtractor::find(EntityKind::Content, "a.txt에 \"안녕\"을 저장"),
            Some("안녕".into())
        );
    }

    #[test]
    fn test_content_default_is_timestamped() {
        let content = EntityExtractor::extract(EntityKind::Content, "파일 만들어줘");
        assert!(content.contains("Created at: "));
    }

    #[test]
    fn test_path_patterns() {
        assert_eq!(
            EntityExtractor::find(EntityKind::Path, "directory target 보여줘"),
            Some("target".into())
        );
        assert_eq!(
            EntityExtractor::find(EntityKind::Path, "tests/ 목록"),
            Some("tests/".into())
        );
        assert_eq!(
            EntityExtractor::find(EntityKind::Path, "docs 안에 뭐 있어"),
            Some("docs".into())
        );
        assert_eq!(EntityExtractor::extract(EntityKind::Path, "뭐 있어"), ".");
    }

    #[test]
    fn test_search_term_prefers_quoted() {
        assert_eq!(
            EntityExtractor::find(EntityKind::SearchTerm, "찾아줘 'config'"),
            Some("config".into())
        );
        assert_eq!(
            EntityExtractor::find(EntityKind::SearchTerm, "검색 .rs 파일"),
            Some(".rs".into())
        );
        assert_eq!(
            EntityExtractor::find(EntityKind::SearchTerm, "search main"),
            Some("search".into())
        );
        assert_eq!(EntityExtractor::extract(EntityKind::SearchTerm, "검색"), ".ts");
    }

    #[test]
    fn test_expression_digits_and_operators() {
        assert_eq!(
            EntityExtractor::find(EntityKind::Expression, "15 * 7 + 25 계산해줘"),
            Some("15 * 7 + 25".into())
        );
    }

    #[test]
    fn test_expression_spoken_operator() {
        assert_eq!(
            EntityExtractor::find(EntityKind::Expression, "2 더하기 3은 얼마야?"),
            Some("2 + 3".into())
        );
        assert_eq!(
            EntityExtractor::find(EntityKind::Expression, "10 마이너스 4"),
            Some("10 - 4".into())
        );
    }

    #[test]
    fn test_expression_spoken_numerals() {
        assert_eq!(
            EntityExtractor::find(EntityKind::Expression, "삼 곱하기 사"),
            Some("3 * 4".into())
        );
    }

    #[test]
    fn test_expression_default() {
        assert_eq!(EntityExtractor::extract(EntityKind::Expression, "계산해줘"), "2 + 2");
    }
}
