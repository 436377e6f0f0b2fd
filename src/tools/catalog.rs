//! Tool definitions and catalog

use serde::{Deserialize, Serialize};

/// Known tool identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    ReadFile,
    WriteFile,
    ListDirectory,
    SearchFiles,
    Calculate,
    GetCurrentTime,
    ComplexTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Filesystem,
    Utility,
    Composite,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 3] = [
        ToolCategory::Filesystem,
        ToolCategory::Utility,
        ToolCategory::Composite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::Filesystem => "Files",
            ToolCategory::Utility => "Utilities",
            ToolCategory::Composite => "Multi-step",
        }
    }

    /// Tools in this category, in listing order
    pub fn tools(&self) -> impl Iterator<Item = ToolId> + '_ {
        ToolId::ALL.into_iter().filter(move |tool| tool.category() == *self)
    }
}

impl ToolId {
    /// Every tool, in the order they are listed to users
    pub const ALL: [ToolId; 7] = [
        ToolId::ReadFile,
        ToolId::WriteFile,
        ToolId::ListDirectory,
        ToolId::SearchFiles,
        ToolId::Calculate,
        ToolId::GetCurrentTime,
        ToolId::ComplexTask,
    ];

    /// Wire name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolId::ReadFile => "read_file",
            ToolId::WriteFile => "write_file",
            ToolId::ListDirectory => "list_directory",
            ToolId::SearchFiles => "search_files",
            ToolId::Calculate => "calculate",
            ToolId::GetCurrentTime => "get_current_time",
            ToolId::ComplexTask => "complex_task",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolId> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolId::ReadFile => "Read the contents of a file",
            ToolId::WriteFile => "Write content to a file",
            ToolId::ListDirectory => "List the entries of a directory",
            ToolId::SearchFiles => "Search directory entries by name",
            ToolId::Calculate => "Evaluate an arithmetic expression",
            ToolId::GetCurrentTime => "Report the current time (iso, timestamp, local)",
            ToolId::ComplexTask => "Run a multi-step analysis",
        }
    }

    /// Argument names, required ones first
    pub fn arguments(&self) -> &'static [ToolArgSpec] {
        match self {
            ToolId::ReadFile => &[ToolArgSpec { name: "path", required: true }],
            ToolId::WriteFile => &[
                ToolArgSpec { name: "path", required: true },
                ToolArgSpec { name: "content", required: true },
            ],
            ToolId::ListDirectory => &[ToolArgSpec { name: "path", required: false }],
            ToolId::SearchFiles => &[
                ToolArgSpec { name: "term", required: true },
                ToolArgSpec { name: "path", required: false },
            ],
            ToolId::Calculate => &[ToolArgSpec { name: "expression", required: true }],
            ToolId::GetCurrentTime => &[ToolArgSpec { name: "format", required: false }],
            ToolId::ComplexTask => &[ToolArgSpec { name: "task", required: true }],
        }
    }

    pub fn category(&self) -> ToolCategory {
        match self {
            ToolId::ReadFile | ToolId::WriteFile | ToolId::ListDirectory | ToolId::SearchFiles => {
                ToolCategory::Filesystem
            }
            ToolId::Calculate | ToolId::GetCurrentTime => ToolCategory::Utility,
            ToolId::ComplexTask => ToolCategory::Composite,
        }
    }

    /// One-line usage string, e.g. `search_files <term> [path]`
    pub fn usage(&self) -> String {
        let mut usage = self.name().to_string();
        for arg in self.arguments() {
            if arg.required {
                usage.push_str(&format!(" <{}>", arg.name));
            } else {
                usage.push_str(&format!(" [{}]", arg.name));
            }
        }
        usage
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolArgSpec {
    pub name: &'static str,
    pub required: bool,
}
