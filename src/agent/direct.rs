//! Direct tool commands: `<tool> <args...>` typed at the prompt
//!
//! Arguments are split on whitespace. The last argument of `calculate` and
//! `write_file` takes the rest of the line.

use crate::core::error::{AgentError, Result};
use crate::core::types::{string_args, ToolArgs};
use crate::tools::catalog::{ToolCategory, ToolId};
use crate::tools::dispatcher::PROJECT_ANALYSIS_TASK;

/// Parsed prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum DirectCommand {
    /// Show the tool catalog
    Tools,
    /// Run the built-in demo plan
    Demo,
    Invoke { tool: ToolId, args: ToolArgs },
}

/// Short aliases accepted in place of tool names
const ALIASES: &[(&str, ToolId)] = &[
    ("read", ToolId::ReadFile),
    ("cat", ToolId::ReadFile),
    ("write", ToolId::WriteFile),
    ("list", ToolId::ListDirectory),
    ("ls", ToolId::ListDirectory),
    ("search", ToolId::SearchFiles),
    ("find", ToolId::SearchFiles),
    ("calc", ToolId::Calculate),
    ("time", ToolId::GetCurrentTime),
    ("analyze", ToolId::ComplexTask),
];

fn resolve_tool(word: &str) -> Option<ToolId> {
    ToolId::from_name(word).or_else(|| {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == word)
            .map(|(_, tool)| *tool)
    })
}

/// Parse one prompt line
pub fn parse(line: &str) -> Result<DirectCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = parts.split_first() else {
        return Err(AgentError::UnknownTool(String::new()));
    };

    match head {
        "tools" | "help" => return Ok(DirectCommand::Tools),
        "auto" | "demo" => return Ok(DirectCommand::Demo),
        _ => {}
    }

    let tool = resolve_tool(head).ok_or_else(|| AgentError::UnknownTool(head.to_string()))?;
    let arg = |i: usize| rest.get(i).copied();
    let tail = |from: usize| rest.get(from..).map(|r| r.join(" ")).unwrap_or_default();

    let mut pairs: Vec<(&str, String)> = Vec::new();
    match tool {
        ToolId::ReadFile => {
            if let Some(path) = arg(0) {
                pairs.push(("path", path.to_string()));
            }
        }
        ToolId::WriteFile => {
            if let Some(path) = arg(0) {
                pairs.push(("path", path.to_string()));
                pairs.push(("content", tail(1)));
            }
        }
        ToolId::ListDirectory => pairs.push(("path", arg(0).unwrap_or(".").to_string())),
        ToolId::SearchFiles => {
            if let Some(term) = arg(0) {
                pairs.push(("term", term.to_string()));
            }
            pairs.push(("path", arg(1).unwrap_or(".").to_string()));
        }
        ToolId::Calculate => {
            if !rest.is_empty() {
                pairs.push(("expression", tail(0)));
            }
        }
        ToolId::GetCurrentTime => pairs.push(("format", arg(0).unwrap_or("local").to_string())),
        ToolId::ComplexTask => {
            pairs.push(("task", arg(0).unwrap_or(PROJECT_ANALYSIS_TASK).to_string()))
        }
    }

    let args = string_args(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(DirectCommand::Invoke { tool, args })
}

/// Catalog listing for the `tools` command, grouped by category
pub fn tool_listing() -> String {
    let mut lines = Vec::new();
    for category in ToolCategory::ALL {
        lines.push(format!("{}:", category.label()));
        for tool in category.tools() {
            lines.push(format!("  - {}: {}", tool.usage(), tool.description()));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::arg_str;

    fn invoke(line: &str) -> (ToolId, ToolArgs) {
        match parse(line).unwrap() {
            DirectCommand::Invoke { tool, args } => (tool, args),
            other => panic!("Expected invocation, got {:?}", other),
        }
    }

    #[test]
    fn test_write_takes_rest_of_line() {
        let (tool, args) = invoke("write notes.txt hello there world");
        assert_eq!(tool, ToolId::WriteFile);
        assert_eq!(arg_str(&args, "path"), Some("notes.txt"));
        assert_eq!(arg_str(&args, "content"), Some("hello there world"));
    }

    #[test]
    fn test_calculate_joins_expression() {
        let (tool, args) = invoke("calculate (15 + 25) * 3");
        assert_eq!(tool, ToolId::Calculate);
        assert_eq!(arg_str(&args, "expression"), Some("(15 + 25) * 3"));
    }

    #[test]
    fn test_defaults() {
        let (_, args) = invoke("ls");
        assert_eq!(arg_str(&args, "path"), Some("."));
        let (_, args) = invoke("time");
        assert_eq!(arg_str(&args, "format"), Some("local"));
        let (_, args) = invoke("search .rs");
        assert_eq!(arg_str(&args, "path"), Some("."));
        let (_, args) = invoke("analyze");
        assert_eq!(arg_str(&args, "task"), Some("project_analysis"));
    }

    #[test]
    fn test_missing_required_arg_left_for_dispatcher() {
        let (tool, args) = invoke("read_file");
        assert_eq!(tool, ToolId::ReadFile);
        assert!(args.is_empty());
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse("tools").unwrap(), DirectCommand::Tools);
        assert_eq!(parse("auto").unwrap(), DirectCommand::Demo);
    }

    #[test]
    fn test_unknown_tool() {
        let err = parse("launch rockets").unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: launch");
    }

    #[test]
    fn test_listing_mentions_every_tool() {
        let listing = tool_listing();
        for tool in ToolId::ALL {
            assert!(listing.contains(tool.name()));
        }
    }

    #[test]
    fn test_listing_groups_by_category() {
        let listing = tool_listing();
        let files = listing.find("Files:").unwrap();
        let utilities = listing.find("Utilities:").unwrap();
        let calculate = listing.find("calculate <expression>").unwrap();
        assert!(files < utilities);
        assert!(utilities < calculate);
        assert!(listing.find("read_file <path>").unwrap() < utilities);
    }
}
