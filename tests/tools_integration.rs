//! Tool dispatch integration tests

use command_agent::core::types::{string_args, ToolArgs};
use command_agent::intent::IntentClassifier;
use command_agent::tools::{LocalFileTools, ToolDispatcher};
use tempfile::TempDir;

fn dispatcher(dir: &TempDir) -> ToolDispatcher {
    ToolDispatcher::new(Box::new(LocalFileTools::new(dir.path())))
}

#[test]
fn test_write_then_read_round_trip() {
    let dir = TempDir::new().unwrap();
    let tools = dispatcher(&dir);

    let written = tools.invoke(
        "write_file",
        &string_args([("path", "greeting.txt"), ("content", "안녕하세요 world")]),
    );
    assert!(written.success);
    assert_eq!(written.content, "File saved: greeting.txt");

    let read = tools.invoke("read_file", &string_args([("path", "greeting.txt")]));
    assert!(read.success);
    assert!(read.content.contains("안녕하세요 world"));
}

#[test]
fn test_spoken_arithmetic_end_to_end() {
    let dir = TempDir::new().unwrap();
    let intent = IntentClassifier::new().classify("2 더하기 3");
    assert_eq!(intent.tool, "calculate");

    let result = dispatcher(&dir).invoke(&intent.tool, &intent.args);
    assert!(result.success);
    assert_eq!(result.content, "2 + 3 = 5");
}

#[test]
fn test_unsafe_expression_never_evaluated() {
    let dir = TempDir::new().unwrap();
    let result = dispatcher(&dir).invoke(
        "calculate",
        &string_args([("expression", "1; std::process::exit(1)")]),
    );
    assert!(!result.success);
    assert!(result.error.unwrap().starts_with("Unsafe expression"));
}

#[test]
fn test_runaway_operators_rejected_without_crashing() {
    let dir = TempDir::new().unwrap();
    let tools = dispatcher(&dir);

    let signs = format!("{}1", "-".repeat(100_000));
    let result = tools.invoke("calculate", &string_args([("expression", signs.as_str())]));
    assert!(!result.success);
    assert!(result.error.unwrap().starts_with("Calculation error: more than"));

    let result = tools.invoke("calculate", &string_args([("expression", "--7 * -2")]));
    assert!(result.success);
    assert_eq!(result.content, "--7 * -2 = -14");
}

#[test]
fn test_unknown_tool_is_descriptive_error() {
    let dir = TempDir::new().unwrap();
    let result = dispatcher(&dir).invoke("unknown", &ToolArgs::new());
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Unknown tool: unknown"));
}

#[test]
fn test_project_analysis_on_workspace() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"sample\"\n").unwrap();
    std::fs::create_dir(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src").join("lib.rs"), "").unwrap();

    let result = dispatcher(&dir).invoke("complex_task", &string_args([("task", "project_analysis")]));
    assert!(result.success);
    assert!(result.content.contains("[dir] src"));
    assert!(result.content.contains("name = \"sample\""));
    assert!(result.content.contains("[file] lib.rs"));
}

#[test]
fn test_search_lists_only_matches() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ai-notes.md"), "").unwrap();
    std::fs::write(dir.path().join("plain.md"), "").unwrap();

    let result = dispatcher(&dir).invoke("search_files", &string_args([("term", "ai-")]));
    assert!(result.success);
    assert!(result.content.contains("ai-notes.md"));
    assert!(!result.content.contains("plain.md"));
}
