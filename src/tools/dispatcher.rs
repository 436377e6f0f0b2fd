//! Tool dispatch - maps a tool name and argument bag onto a concrete call
//!
//! Every failure below this point, including a panicking collaborator, is
//! converted into an error-shaped [`ToolResult`]. Callers never see an `Err`.

use crate::core::config::AgentConfig;
use crate::core::error::{AgentError, Result};
use crate::core::types::{arg_str, truncate_chars, ToolArgs};
use crate::tools::calculator;
use crate::tools::catalog::ToolId;
use crate::tools::clock::{self, TimeFormat};
use crate::tools::filesystem::{FileTools, LocalFileTools};
use crate::tools::result::ToolResult;
use std::panic::{self, AssertUnwindSafe};

/// Composite task understood by `complex_task`
pub const PROJECT_ANALYSIS_TASK: &str = "project_analysis";

/// Characters of the manifest quoted in a project analysis
const MANIFEST_EXCERPT_CHARS: usize = 200;

/// Routes tool invocations to the file collaborator, calculator and clock
pub struct ToolDispatcher {
    files: Box<dyn FileTools>,
    project_manifest: String,
}

impl ToolDispatcher {
    pub fn new(files: Box<dyn FileTools>) -> Self {
        Self {
            files,
            project_manifest: AgentConfig::default().project_manifest,
        }
    }

    /// Dispatcher over the local disk rooted at the configured workspace
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            files: Box::new(LocalFileTools::new(&config.workspace_root)),
            project_manifest: config.project_manifest.clone(),
        }
    }

    /// Invoke a tool by name
    pub fn invoke(&self, tool: &str, args: &ToolArgs) -> ToolResult {
        tracing::debug!(tool, ?args, "Invoking tool");

        let Some(tool_id) = ToolId::from_name(tool) else {
            tracing::warn!("Rejected unknown tool {}", tool);
            return ToolResult::err(AgentError::UnknownTool(tool.to_string()).to_string());
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(tool_id, args)));
        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => ToolResult::err(e.to_string()),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!("Tool {} panicked: {}", tool_id, message);
                ToolResult::err(AgentError::ToolPanic(message).to_string())
            }
        };

        tracing::debug!(tool, success = result.success, "Tool finished");
        result
    }

    fn dispatch(&self, tool: ToolId, args: &ToolArgs) -> Result<ToolResult> {
        match tool {
            ToolId::ReadFile => {
                let path = required(tool, args, "path")?;
                Ok(self.files.read_file(path))
            }
            ToolId::WriteFile => {
                let path = required(tool, args, "path")?;
                let content = required(tool, args, "content")?;
                Ok(self.files.write_file(path, content))
            }
            ToolId::ListDirectory => {
                let path = arg_str(args, "path").unwrap_or(".");
                Ok(self.files.list_directory(path))
            }
            ToolId::SearchFiles => {
                let term = required(tool, args, "term")?;
                let path = arg_str(args, "path").unwrap_or(".");
                Ok(self.files.search_files(term, path))
            }
            ToolId::Calculate => {
                let expression = required(tool, args, "expression")?;
                Ok(ToolResult::ok(evaluate(expression)?))
            }
            ToolId::GetCurrentTime => {
                let format = TimeFormat::parse(arg_str(args, "format").unwrap_or("local"));
                Ok(ToolResult::ok(clock::current_time(format)))
            }
            ToolId::ComplexTask => {
                let task = required(tool, args, "task")?;
                match task {
                    PROJECT_ANALYSIS_TASK => Ok(ToolResult::ok(self.project_analysis())),
                    other => Err(AgentError::UnknownComplexTask(other.to_string())),
                }
            }
        }
    }

    fn project_analysis(&self) -> String {
        let mut report = String::from("Project analysis:\n\n");

        let root = self.files.list_directory(".");
        report.push_str(&format!("Root directory:\n{}\n\n", root.display_text()));

        let manifest = self.files.read_file(&self.project_manifest);
        if manifest.success {
            report.push_str(&format!(
                "Project manifest:\n{}...\n\n",
                truncate_chars(&manifest.content, MANIFEST_EXCERPT_CHARS)
            ));
        }

        let sources = self.files.list_directory("src");
        if sources.success {
            report.push_str(&format!("Source code:\n{}\n\n", sources.content));
        }

        report.push_str("Analysis complete.");
        report
    }
}

/// Allow-list check, then parse and evaluate
fn evaluate(expression: &str) -> Result<String> {
    if !calculator::is_allowed(expression) {
        return Err(AgentError::UnsafeExpression(format!(
            "{} (use digits and + - * / ( ) . only)",
            expression
        )));
    }
    let value = calculator::calculate(expression)?;
    Ok(format!(
        "{} = {}",
        expression.trim(),
        calculator::format_number(value)
    ))
}

fn required<'a>(tool: ToolId, args: &'a ToolArgs, name: &str) -> Result<&'a str> {
    arg_str(args, name).ok_or_else(|| AgentError::MissingArgument {
        tool: tool.name().to_string(),
        arg: name.to_string(),
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::string_args;

    /// File tools that remember nothing and always answer the same way
    struct StubFiles;

    impl FileTools for StubFiles {
        fn read_file(&self, path: &str) -> ToolResult {
            if path == "Cargo.toml" {
                ToolResult::ok("[package]\nname = \"demo\"")
            } else {
                ToolResult::err(format!("File not found: {}", path))
            }
        }
        fn write_file(&self, path: &str, _content: &str) -> ToolResult {
            ToolResult::ok(format!("File saved: {}", path))
        }
        fn list_directory(&self, path: &str) -> ToolResult {
            ToolResult::ok(format!("Directory contents ({}):\n\n[file] main.rs", path))
        }
        fn search_files(&self, term: &str, _path: &str) -> ToolResult {
            ToolResult::ok(format!("Search results \"{}\"", term))
        }
    }

    struct PanickingFiles;

    impl FileTools for PanickingFiles {
        fn read_file(&self, _path: &str) -> ToolResult {
            panic!("disk on fire")
        }
        fn write_file(&self, _path: &str, _content: &str) -> ToolResult {
            panic!("disk on fire")
        }
        fn list_directory(&self, _path: &str) -> ToolResult {
            panic!("disk on fire")
        }
        fn search_files(&self, _term: &str, _path: &str) -> ToolResult {
            panic!("disk on fire")
        }
    }

    fn dispatcher() -> ToolDispatcher {
        ToolDispatcher::new(Box::new(StubFiles))
    }

    #[test]
    fn test_unknown_tool_is_error_result() {
        let result = dispatcher().invoke("format_disk", &ToolArgs::new());
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Unknown tool: format_disk"));
    }

    #[test]
    fn test_calculate_success() {
        let result = dispatcher().invoke("calculate", &string_args([("expression", "2 + 3")]));
        assert!(result.success);
        assert_eq!(result.content, "2 + 3 = 5");
    }

    #[test]
    fn test_calculate_rejects_letters() {
        let result = dispatcher().invoke(
            "calculate",
            &string_args([("expression", "Math.floor(Date.now())")]),
        );
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("Unsafe expression"));
    }

    #[test]
    fn test_calculate_division_by_zero_is_error() {
        let result = dispatcher().invoke("calculate", &string_args([("expression", "4 / 0")]));
        assert!(!result.success);
        assert!(result.error.unwrap().contains("division by zero"));
    }

    #[test]
    fn test_calculate_long_sign_run_is_error() {
        let expression = format!("{}1", "-".repeat(200_000));
        let result = dispatcher().invoke(
            "calculate",
            &string_args([("expression", expression.as_str())]),
        );
        assert!(!result.success);
        assert!(result.error.unwrap().contains("operators"));
    }

    #[test]
    fn test_missing_argument_named() {
        let result = dispatcher().invoke("write_file", &string_args([("path", "a.txt")]));
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Missing argument 'content' for tool write_file")
        );
    }

    #[test]
    fn test_list_directory_defaults_to_current() {
        let result = dispatcher().invoke("list_directory", &ToolArgs::new());
        assert!(result.success);
        assert!(result.content.contains("(.)"));
    }

    #[test]
    fn test_file_results_pass_through() {
        let result = dispatcher().invoke("read_file", &string_args([("path", "missing.md")]));
        assert_eq!(result, ToolResult::err("File not found: missing.md"));
    }

    #[test]
    fn test_time_unknown_format_uses_local() {
        let result = dispatcher().invoke("get_current_time", &string_args([("format", "weird")]));
        assert!(result.success);
        assert!(result.content.starts_with("Current time: "));
    }

    #[test]
    fn test_project_analysis_includes_manifest() {
        let result = dispatcher().invoke("complex_task", &string_args([("task", "project_analysis")]));
        assert!(result.success);
        assert!(result.content.contains("name = \"demo\""));
        assert!(result.content.contains("Source code:"));
        assert!(result.content.ends_with("Analysis complete."));
    }

    #[test]
    fn test_unknown_complex_task() {
        let result = dispatcher().invoke("complex_task", &string_args([("task", "world_peace")]));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Unknown complex task: world_peace"));
    }

    #[test]
    fn test_panicking_collaborator_is_contained() {
        let dispatcher = ToolDispatcher::new(Box::new(PanickingFiles));
        let result = dispatcher.invoke("read_file", &string_args([("path", "x")]));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Tool panicked: disk on fire"));
    }
}
